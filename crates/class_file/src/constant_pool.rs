use crate::{ClassFileError, Result};

#[macro_export]
macro_rules! matches_cp_info {
    ($cp:expr, $index:expr, $i:ident) => {{
        let index: u16 = $index;
        $cp.entry(index, stringify!($i))
            .and_then(|cp_info| match cp_info {
                $crate::constant_pool::CpInfo::$i(n) => Ok(n),
                c => Err($crate::ClassFileError::InvalidConstantPoolIndex {
                    index,
                    expected: stringify!($i),
                    found: c.kind(),
                }),
            })
    }};
}

/// The decoded constant pool.
///
/// Indices are 1-based, as everywhere in the class file format. The slot
/// following a `Long` or `Double` entry is stored as [`CpInfo::Unusable`] and
/// every lookup of it fails.
#[derive(Debug, Default, PartialEq)]
pub struct ConstantPool {
    cp_infos: Vec<CpInfo>,
}
impl ConstantPool {
    pub fn new(cp_infos: Vec<CpInfo>) -> Self {
        Self { cp_infos }
    }

    /// The `constant_pool_count` of the class file, which counts the unused slot 0.
    pub fn count(&self) -> usize {
        self.cp_infos.len() + 1
    }

    pub fn get(&self, index: u16) -> Result<&CpInfo> {
        self.entry(index, "any entry")
    }

    /// Looks up `index`, failing for slot 0, anything past the end and reserved slots.
    pub fn entry(&self, index: u16, expected: &'static str) -> Result<&CpInfo> {
        let slot = index
            .checked_sub(1)
            .and_then(|i| self.cp_infos.get(i as usize));

        match slot {
            Some(CpInfo::Unusable) => Err(ClassFileError::InvalidConstantPoolIndex {
                index,
                expected,
                found: CpInfo::Unusable.kind(),
            }),
            Some(cp_info) => Ok(cp_info),
            None => Err(ClassFileError::InvalidConstantPoolIndex {
                index,
                expected,
                found: "nothing",
            }),
        }
    }

    pub fn utf8(&self, index: u16) -> Result<&str> {
        matches_cp_info!(self, index, Utf8).map(String::as_str)
    }

    pub fn string(&self, index: u16) -> Result<&str> {
        let StringInfo { string_index } = matches_cp_info!(self, index, String)?;
        self.utf8(*string_index)
    }

    /// The name of a `Class` entry in internal form, e.g. `java/lang/Object`.
    pub fn binary_class_name(&self, index: u16) -> Result<&str> {
        let ClassInfo { name_index } = matches_cp_info!(self, index, Class)?;
        self.utf8(*name_index)
    }

    /// The name of a `Class` entry with `/` replaced by `.`, e.g. `java.lang.Object`.
    pub fn class_name(&self, index: u16) -> Result<String> {
        Ok(self.binary_class_name(index)?.replace('/', "."))
    }

    /// Resolves a `NameAndType` entry to its name and descriptor.
    pub fn name_and_type(&self, index: u16) -> Result<(&str, &str)> {
        let NameAndTypeInfo {
            name_index,
            descriptor_index,
        } = matches_cp_info!(self, index, NameAndType)?;

        Ok((self.utf8(*name_index)?, self.utf8(*descriptor_index)?))
    }
}
impl<'a> IntoIterator for &'a ConstantPool {
    type Item = &'a CpInfo;
    type IntoIter = std::slice::Iter<'a, CpInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.cp_infos.iter()
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum CpInfo {
    MethodRef(RefInfo),
    FieldRef(RefInfo),
    Float(f32),
    InterfaceMethodRef(RefInfo),
    Class(ClassInfo),
    NameAndType(NameAndTypeInfo),
    Utf8(String),
    String(StringInfo),
    Dynamic(DynamicInfo),
    InvokeDynamic(DynamicInfo),
    Integer(i32),
    MethodHandle(MethodHandleInfo),
    MethodType(MethodTypeInfo),
    Module(ModuleInfo),
    Package(PackageInfo),
    Long(i64),
    Double(f64),
    Unusable,
}
impl CpInfo {
    pub fn kind(&self) -> &'static str {
        match self {
            CpInfo::MethodRef(_) => "MethodRef",
            CpInfo::FieldRef(_) => "FieldRef",
            CpInfo::Float(_) => "Float",
            CpInfo::InterfaceMethodRef(_) => "InterfaceMethodRef",
            CpInfo::Class(_) => "Class",
            CpInfo::NameAndType(_) => "NameAndType",
            CpInfo::Utf8(_) => "Utf8",
            CpInfo::String(_) => "String",
            CpInfo::Dynamic(_) => "Dynamic",
            CpInfo::InvokeDynamic(_) => "InvokeDynamic",
            CpInfo::Integer(_) => "Integer",
            CpInfo::MethodHandle(_) => "MethodHandle",
            CpInfo::MethodType(_) => "MethodType",
            CpInfo::Module(_) => "Module",
            CpInfo::Package(_) => "Package",
            CpInfo::Long(_) => "Long",
            CpInfo::Double(_) => "Double",
            CpInfo::Unusable => "Unusable",
        }
    }

    /// How many pool slots the entry occupies.
    pub fn slot_size(&self) -> usize {
        match self {
            CpInfo::Long(_) | CpInfo::Double(_) => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct RefInfo {
    pub class_index: u16,
    pub name_and_type_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ClassInfo {
    // The value of the name_index item must be a valid index into the constant_pool table.
    // The constant_pool entry at that index must be a CONSTANT_Utf8_info structure (§4.4.7)
    // representing a valid binary class or interface name encoded in internal form (§4.2.1).
    pub name_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct StringInfo {
    pub string_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct NameAndTypeInfo {
    pub name_index: u16,
    pub descriptor_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct DynamicInfo {
    pub bootstrap_method_attr_index: u16,
    pub name_and_type_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct MethodHandleInfo {
    pub reference_kind: u8,
    pub reference_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct MethodTypeInfo {
    pub descriptor_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ModuleInfo {
    pub name_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct PackageInfo {
    pub name_index: u16,
}
