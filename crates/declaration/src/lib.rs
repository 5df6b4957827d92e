//! Lists the declared members of a compiled class, like `javap -private`.

mod error;
mod render;
mod sink;
mod source;

use jdecl_class_file::{ClassFile, ClassFileError, ClassModel};
use log::{debug, warn};

pub use error::{DeclarationError, SourceError};
pub use render::render;
pub use sink::LineSink;
pub use source::{ClassSource, DirectorySource, FileSource, MemorySource};

/// Decodes a class file and renders its declaration.
///
/// Nothing is rendered unless the whole class file decodes.
pub fn decode(bytes: &[u8]) -> Result<Vec<String>, ClassFileError> {
    let class_file = ClassFile::parse(bytes)?;
    let model = ClassModel::new(&class_file)?;
    Ok(render(&model))
}

/// Loads `class_name` from `source` and writes its declaration to `sink`.
pub fn declare(
    source: &impl ClassSource,
    class_name: &str,
    sink: &mut impl LineSink,
) -> Result<(), DeclarationError> {
    let bytes = source.load(class_name)?;
    debug!("Loaded {} bytes for {}", bytes.len(), class_name);

    let class_file = ClassFile::parse(&bytes).map_err(|e| corrupt(class_name, e))?;
    let model = ClassModel::new(&class_file).map_err(|e| corrupt(class_name, e))?;
    if let Some(expected) = source.expected_class(class_name) {
        if model.name != expected {
            warn!("{} contains the class {}", expected, model.name);
        }
    }

    sink.write_lines(&render(&model))?;
    Ok(())
}

fn corrupt(class_name: &str, source: ClassFileError) -> DeclarationError {
    DeclarationError::ClassFile {
        name: class_name.to_owned(),
        source,
    }
}
