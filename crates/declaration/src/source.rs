use std::{collections::HashMap, fs, io, path::PathBuf};

use log::debug;

use crate::SourceError;

/// Supplies the raw bytes of a class, by its source name (`com.example.Widget`).
pub trait ClassSource {
    fn load(&self, class_name: &str) -> Result<Vec<u8>, SourceError>;

    /// The class that `load(class_name)` should hold, `None` when the source
    /// does not name its classes.
    fn expected_class<'n>(&self, class_name: &'n str) -> Option<&'n str> {
        Some(class_name)
    }
}

/// Looks classes up below a class path directory.
#[derive(Debug)]
pub struct DirectorySource {
    root: PathBuf,
}
impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn class_path(&self, class_name: &str) -> PathBuf {
        self.root
            .join(format!("{}.class", class_name.replace('.', "/")))
    }
}
impl ClassSource for DirectorySource {
    fn load(&self, class_name: &str) -> Result<Vec<u8>, SourceError> {
        let path = self.class_path(class_name);
        debug!("Loading {} from {}", class_name, path.display());
        read(path, class_name)
    }
}

/// A single class file, returned whatever class is asked for.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
}
impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}
impl ClassSource for FileSource {
    fn load(&self, class_name: &str) -> Result<Vec<u8>, SourceError> {
        read(self.path.clone(), class_name)
    }

    fn expected_class<'n>(&self, _class_name: &'n str) -> Option<&'n str> {
        None
    }
}

#[derive(Debug, Default)]
pub struct MemorySource {
    classes: HashMap<String, Vec<u8>>,
}
impl MemorySource {
    pub fn insert(&mut self, class_name: impl Into<String>, bytes: Vec<u8>) {
        self.classes.insert(class_name.into(), bytes);
    }
}
impl ClassSource for MemorySource {
    fn load(&self, class_name: &str) -> Result<Vec<u8>, SourceError> {
        self.classes
            .get(class_name)
            .cloned()
            .ok_or_else(|| SourceError::ClassNotFound(class_name.to_owned()))
    }
}

fn read(path: PathBuf, class_name: &str) -> Result<Vec<u8>, SourceError> {
    match fs::read(&path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(SourceError::ClassNotFound(class_name.to_owned()))
        }
        Err(source) => Err(SourceError::Unreadable { path, source }),
    }
}
