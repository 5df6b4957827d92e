//! The class with every name and type resolved through the constant pool.

use log::debug;

use crate::{
    constant_pool::CpInfo,
    descriptor::{DescriptorError, FieldType, MethodDescriptor},
    AccessFlags, ClassFile, ClassFileError, ConstantPool, FieldInfo, MethodInfo, Result, Version,
};

const CONSTRUCTOR_NAME: &str = "<init>";

#[derive(Debug)]
pub struct ClassModel<'a> {
    pub version: Version,
    pub constant_pool: &'a ConstantPool,
    pub access_flags: AccessFlags,
    /// Binary name in source form, e.g. `com.example.Widget$Part`.
    pub name: String,
    /// `None` for interfaces and for `java.lang.Object`.
    pub super_name: Option<String>,
    pub interfaces: Vec<String>,
    /// The `<init>` methods, in declaration order.
    pub constructors: Vec<Method<'a>>,
    pub fields: Vec<Field<'a>>,
    /// Everything but the constructors, `<clinit>` included.
    pub methods: Vec<Method<'a>>,
}

#[derive(Debug)]
pub struct Field<'a> {
    pub access_flags: AccessFlags,
    pub name: &'a str,
    pub descriptor: &'a str,
    pub field_type: FieldType,
    pub type_name: String,
    pub constant_value: Option<&'a CpInfo>,
}

#[derive(Debug)]
pub struct Method<'a> {
    pub access_flags: AccessFlags,
    pub name: &'a str,
    pub descriptor: &'a str,
    pub parameter_type_names: Vec<String>,
    /// `None` for `void` and for constructors.
    pub return_type_name: Option<String>,
    /// `None` without an `Exceptions` attribute.
    pub exceptions: Option<Vec<String>>,
}

impl<'a> ClassModel<'a> {
    pub fn new(class_file: &'a ClassFile) -> Result<Self> {
        let constant_pool = &class_file.constant_pool;

        let name = class_file.class_name()?;
        let super_name = class_file.super_class()?;
        let interfaces = class_file.interface_names()?;

        let fields = class_file
            .fields
            .iter()
            .map(|field| Field::new(field, constant_pool))
            .collect::<Result<Vec<_>>>()?;

        let mut constructors = Vec::new();
        let mut methods = Vec::new();
        for method in &class_file.methods {
            let method = Method::new(method, constant_pool)?;
            if method.is_constructor() {
                constructors.push(method);
            } else {
                methods.push(method);
            }
        }

        debug!(
            "Resolved {}: {} constructors, {} fields, {} methods",
            name,
            constructors.len(),
            fields.len(),
            methods.len()
        );

        Ok(ClassModel {
            version: class_file.version,
            constant_pool,
            access_flags: class_file.access_flags,
            name,
            super_name,
            interfaces,
            constructors,
            fields,
            methods,
        })
    }

    pub fn is_interface(&self) -> bool {
        self.access_flags.contains(AccessFlags::INTERFACE)
    }

    /// The package of the class, `None` for the unnamed package.
    pub fn package(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(package, _)| package)
    }
}

impl<'a> Field<'a> {
    fn new(field: &FieldInfo, constant_pool: &'a ConstantPool) -> Result<Self> {
        let name = constant_pool.utf8(field.name_index)?;
        let descriptor = constant_pool.utf8(field.descriptor_index)?;
        let field_type =
            FieldType::parse(descriptor).map_err(|e| descriptor_error(field.offset, e))?;

        let constant_value = match field.attributes.constant_value_attribute(constant_pool)? {
            Some(attribute) => Some(constant_pool.get(attribute.constant_value_index)?),
            None => None,
        };

        Ok(Field {
            access_flags: field.access_flags,
            name,
            descriptor,
            type_name: field_type.display_name(),
            field_type,
            constant_value,
        })
    }
}

impl<'a> Method<'a> {
    fn new(method: &MethodInfo, constant_pool: &'a ConstantPool) -> Result<Self> {
        let name = constant_pool.utf8(method.name_index)?;
        let descriptor = constant_pool.utf8(method.descriptor_index)?;
        let parsed =
            MethodDescriptor::parse(descriptor).map_err(|e| descriptor_error(method.offset, e))?;

        let return_type_name = if name == CONSTRUCTOR_NAME {
            None
        } else {
            parsed.return_type.display_name()
        };

        let exceptions = match method.attributes.exceptions_attribute(constant_pool)? {
            Some(attribute) => Some(
                attribute
                    .exception_index_table
                    .iter()
                    .map(|&index| constant_pool.class_name(index))
                    .collect::<Result<Vec<_>>>()?,
            ),
            None => None,
        };

        Ok(Method {
            access_flags: method.access_flags,
            name,
            descriptor,
            parameter_type_names: parsed.parameter_names(),
            return_type_name,
            exceptions,
        })
    }

    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }
}

fn descriptor_error(offset: usize, e: DescriptorError) -> ClassFileError {
    ClassFileError::malformed(offset, e.to_string())
}
