use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ClassFileError {
    #[error("Truncated input at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
    #[error("Invalid constant pool index {index}: expected {expected}, found {found}")]
    InvalidConstantPoolIndex {
        index: u16,
        expected: &'static str,
        found: &'static str,
    },
    #[error("Not a class file, invalid magic identifier: 0x{0:X}")]
    NotAClassFile(u32),
    #[error("Malformed class file at offset {offset}: {reason}")]
    MalformedClassFile { offset: usize, reason: String },
}

impl ClassFileError {
    pub(crate) fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        ClassFileError::MalformedClassFile {
            offset,
            reason: reason.into(),
        }
    }
}
