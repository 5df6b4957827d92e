use crate::{cursor::ByteCursor, Attribute, ClassFileError, ConstantPool, Result};

#[derive(Debug, Default)]
pub struct Attributes(pub Vec<Attribute>);
impl Attributes {
    pub fn find_by_name(
        &self,
        name: &str,
        constant_pool: &ConstantPool,
    ) -> Result<Option<&Attribute>> {
        for a in &self.0 {
            if constant_pool.utf8(a.attribute_name_index)? == name {
                return Ok(Some(a));
            }
        }

        Ok(None)
    }

    /// The checked exceptions declared by a method, `None` without an `Exceptions` attribute.
    pub fn exceptions_attribute(
        &self,
        constant_pool: &ConstantPool,
    ) -> Result<Option<ExceptionsAttribute>> {
        let Some(attribute) = self.find_by_name("Exceptions", constant_pool)? else {
            return Ok(None);
        };

        let mut r = attribute.cursor();
        let number_of_exceptions = r.read_u16()?;
        let exception_index_table = (0..number_of_exceptions)
            .map(|_| r.read_u16())
            .collect::<Result<Vec<_>>>()?;
        attribute.expect_consumed(&r, "Exceptions")?;

        Ok(Some(ExceptionsAttribute {
            exception_index_table,
        }))
    }

    pub fn constant_value_attribute(
        &self,
        constant_pool: &ConstantPool,
    ) -> Result<Option<ConstantValueAttribute>> {
        let Some(attribute) = self.find_by_name("ConstantValue", constant_pool)? else {
            return Ok(None);
        };

        let mut r = attribute.cursor();
        let constant_value_index = r.read_u16()?;
        attribute.expect_consumed(&r, "ConstantValue")?;

        Ok(Some(ConstantValueAttribute {
            constant_value_index,
        }))
    }
}

impl Attribute {
    fn cursor(&self) -> ByteCursor<'_> {
        ByteCursor::with_base(&self.info, self.offset)
    }

    fn expect_consumed(&self, r: &ByteCursor, name: &str) -> Result<()> {
        if !r.is_empty() {
            return Err(ClassFileError::malformed(
                r.offset(),
                format!(
                    "{} attribute declares {} bytes but only {} are used",
                    name,
                    self.info.len(),
                    self.info.len() - r.remaining()
                ),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq)]
pub struct ExceptionsAttribute {
    pub exception_index_table: Vec<u16>,
}

#[derive(Debug, PartialEq)]
pub struct ConstantValueAttribute {
    pub constant_value_index: u16,
}
