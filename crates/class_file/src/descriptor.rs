use std::{fmt, iter::Peekable, str::Chars};

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DescriptorError {
    #[error("Unexpected end of descriptor {0:?}")]
    UnexpectedEnd(String),
    #[error("Invalid type code {1:?} in descriptor {0:?}")]
    InvalidTypeCode(String, char),
    #[error("Empty class name in descriptor {0:?}")]
    EmptyClassName(String),
    #[error("Method descriptor {0:?} does not start with '('")]
    MissingParameters(String),
    #[error("Trailing characters in descriptor {0:?}")]
    TrailingCharacters(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseType {
    Boolean,
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    /// A class or interface, in internal form (`java/lang/String`).
    Object(String),
}

/// A decoded field descriptor, e.g. `[[I` is an `int` with an array depth of 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldType {
    pub base: BaseType,
    pub array_depth: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnType {
    Void,
    Type(FieldType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub parameters: Vec<FieldType>,
    pub return_type: ReturnType,
}

// The grammar for descriptors is:
//   FieldDescriptor:
//     FieldType
//
//   MethodDescriptor:
//     "(" FieldType* ")" ReturnDescriptor
//
//   ReturnDescriptor:
//     FieldType | "V"
//
//   FieldType:
//     "B" | "C" | "D" | "F" | "I" | "J" | "S" | "Z" |
//     "L" ClassName ";" |
//     "[" FieldType
struct DescriptorReader<'a> {
    descriptor: &'a str,
    chars: Peekable<Chars<'a>>,
}
impl<'a> DescriptorReader<'a> {
    fn new(descriptor: &'a str) -> Self {
        Self {
            descriptor,
            chars: descriptor.chars().peekable(),
        }
    }

    fn next(&mut self) -> Result<char, DescriptorError> {
        self.chars
            .next()
            .ok_or_else(|| DescriptorError::UnexpectedEnd(self.descriptor.to_owned()))
    }

    fn read_field_type(&mut self) -> Result<FieldType, DescriptorError> {
        let mut array_depth = 0;
        while self.chars.next_if_eq(&'[').is_some() {
            array_depth += 1;
        }

        let base = match self.next()? {
            'Z' => BaseType::Boolean,
            'B' => BaseType::Byte,
            'C' => BaseType::Char,
            'D' => BaseType::Double,
            'F' => BaseType::Float,
            'I' => BaseType::Int,
            'J' => BaseType::Long,
            'S' => BaseType::Short,
            'L' => {
                let mut name = String::new();
                loop {
                    match self.next()? {
                        ';' => break,
                        c => name.push(c),
                    }
                }
                if name.is_empty() {
                    return Err(DescriptorError::EmptyClassName(self.descriptor.to_owned()));
                }
                BaseType::Object(name)
            }
            c => {
                return Err(DescriptorError::InvalidTypeCode(
                    self.descriptor.to_owned(),
                    c,
                ))
            }
        };

        Ok(FieldType { base, array_depth })
    }

    fn read_return_type(&mut self) -> Result<ReturnType, DescriptorError> {
        if self.chars.next_if_eq(&'V').is_some() {
            Ok(ReturnType::Void)
        } else {
            self.read_field_type().map(ReturnType::Type)
        }
    }

    fn finish(mut self) -> Result<(), DescriptorError> {
        match self.chars.next() {
            None => Ok(()),
            Some(_) => Err(DescriptorError::TrailingCharacters(
                self.descriptor.to_owned(),
            )),
        }
    }
}

impl FieldType {
    pub fn parse(descriptor: &str) -> Result<FieldType, DescriptorError> {
        let mut reader = DescriptorReader::new(descriptor);
        let field_type = reader.read_field_type()?;
        reader.finish()?;
        Ok(field_type)
    }

    /// The name as written in Java source: `/` becomes `.`, a `java.lang.`
    /// prefix is dropped for classes directly in that package, and every
    /// array dimension adds a `[]`.
    pub fn display_name(&self) -> String {
        let base = match &self.base {
            BaseType::Boolean => "boolean".to_owned(),
            BaseType::Byte => "byte".to_owned(),
            BaseType::Char => "char".to_owned(),
            BaseType::Double => "double".to_owned(),
            BaseType::Float => "float".to_owned(),
            BaseType::Int => "int".to_owned(),
            BaseType::Long => "long".to_owned(),
            BaseType::Short => "short".to_owned(),
            BaseType::Object(name) => strip_java_lang(&name.replace('/', ".")).to_owned(),
        };

        base + &"[]".repeat(self.array_depth)
    }

    pub fn to_descriptor(&self) -> String {
        let base = match &self.base {
            BaseType::Boolean => "Z".to_owned(),
            BaseType::Byte => "B".to_owned(),
            BaseType::Char => "C".to_owned(),
            BaseType::Double => "D".to_owned(),
            BaseType::Float => "F".to_owned(),
            BaseType::Int => "I".to_owned(),
            BaseType::Long => "J".to_owned(),
            BaseType::Short => "S".to_owned(),
            BaseType::Object(name) => format!("L{};", name),
        };

        "[".repeat(self.array_depth) + &base
    }
}
impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

impl ReturnType {
    /// `None` for `void`.
    pub fn display_name(&self) -> Option<String> {
        match self {
            ReturnType::Void => None,
            ReturnType::Type(field_type) => Some(field_type.display_name()),
        }
    }
}

impl MethodDescriptor {
    pub fn parse(descriptor: &str) -> Result<MethodDescriptor, DescriptorError> {
        let mut reader = DescriptorReader::new(descriptor);
        if reader.chars.next_if_eq(&'(').is_none() {
            return Err(DescriptorError::MissingParameters(descriptor.to_owned()));
        }

        let mut parameters = Vec::new();
        while reader.chars.next_if_eq(&')').is_none() {
            parameters.push(reader.read_field_type()?);
        }

        let return_type = reader.read_return_type()?;
        reader.finish()?;

        Ok(MethodDescriptor {
            parameters,
            return_type,
        })
    }

    pub fn parameter_names(&self) -> Vec<String> {
        self.parameters.iter().map(ToString::to_string).collect()
    }

    pub fn to_descriptor(&self) -> String {
        let parameters: String = self.parameters.iter().map(FieldType::to_descriptor).collect();
        let return_type = match &self.return_type {
            ReturnType::Void => "V".to_owned(),
            ReturnType::Type(field_type) => field_type.to_descriptor(),
        };

        format!("({}){}", parameters, return_type)
    }
}

/// Drops the `java.lang.` package from a source name, but not from names in
/// its subpackages such as `java.lang.reflect.Method`.
pub fn strip_java_lang(name: &str) -> &str {
    match name.strip_prefix("java.lang.") {
        Some(simple) if !simple.contains('.') => simple,
        _ => name,
    }
}
