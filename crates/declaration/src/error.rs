use std::path::PathBuf;

use jdecl_class_file::ClassFileError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Class not found: {0}")]
    ClassNotFound(String),
    #[error("Could not read {}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum DeclarationError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("Corrupt class file {name}: {source}")]
    ClassFile {
        name: String,
        #[source]
        source: ClassFileError,
    },
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}
