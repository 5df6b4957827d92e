use log::{debug, trace};

use crate::{
    attributes::Attributes,
    class_file::{FieldInfo, MethodInfo, Version},
    constant_pool::{
        self, ClassInfo, CpInfo, DynamicInfo, MethodHandleInfo, MethodTypeInfo, ModuleInfo,
        NameAndTypeInfo, PackageInfo, StringInfo,
    },
    cursor::ByteCursor,
    AccessFlags, Attribute, ClassFile, ClassFileError, ConstantPool, Result,
};

const MAGIC_IDENTIFIER: u32 = 0xCAFEBABE;

pub struct Parser<'a> {
    r: ByteCursor<'a>,
}
impl<'a> Parser<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            r: ByteCursor::new(buf),
        }
    }

    pub fn parse(&mut self) -> Result<ClassFile> {
        self.parse_magic_identifier()?;
        let version = self.parse_version()?;
        debug!("Class file version {}", version);

        let constant_pool = self.parse_constant_pool()?;
        let access_flags = self.parse_class_access_flags()?;
        let this_class = self.read_u16()?;
        let super_class = self.read_u16()?;

        let interfaces_count = self.read_u16()?;
        let interfaces = (0..interfaces_count)
            .map(|_| self.read_u16())
            .collect::<Result<Vec<_>>>()?;

        let fields_count = self.read_u16()?;
        let fields = (0..fields_count)
            .map(|_| self.parse_field_info())
            .collect::<Result<Vec<_>>>()?;

        let methods_count = self.read_u16()?;
        let methods = (0..methods_count)
            .map(|_| self.parse_method_info())
            .collect::<Result<Vec<_>>>()?;

        let attributes = self.parse_attributes()?;

        debug!(
            "Parsed {} interfaces, {} fields, {} methods, {} attributes",
            interfaces.len(),
            fields.len(),
            methods.len(),
            attributes.0.len()
        );

        if !self.r.is_empty() {
            return Err(ClassFileError::malformed(
                self.r.offset(),
                format!("{} trailing bytes after the class file", self.r.remaining()),
            ));
        }

        Ok(ClassFile {
            version,
            constant_pool,
            access_flags,
            this_class,
            super_class,
            interfaces,
            fields,
            methods,
            attributes,
        })
    }

    fn parse_class_access_flags(&mut self) -> Result<AccessFlags> {
        let offset = self.r.offset();
        match self.read_u16()? {
            0 => Err(ClassFileError::malformed(offset, "class access flags are zero")),
            bits => Ok(AccessFlags::from_bits_truncate(bits)),
        }
    }

    fn parse_field_info(&mut self) -> Result<FieldInfo> {
        let offset = self.r.offset();
        let access_flags = AccessFlags::from_bits_truncate(self.read_u16()?);
        let name_index = self.read_u16()?;
        let descriptor_index = self.read_u16()?;
        let attributes = self.parse_attributes()?;

        Ok(FieldInfo {
            access_flags,
            name_index,
            descriptor_index,
            attributes,
            offset,
        })
    }

    fn parse_method_info(&mut self) -> Result<MethodInfo> {
        let offset = self.r.offset();
        let access_flags = AccessFlags::from_bits_truncate(self.read_u16()?);
        let name_index = self.read_u16()?;
        let descriptor_index = self.read_u16()?;
        let attributes = self.parse_attributes()?;

        Ok(MethodInfo {
            access_flags,
            name_index,
            descriptor_index,
            attributes,
            offset,
        })
    }

    fn parse_magic_identifier(&mut self) -> Result<()> {
        match self.read_u32()? {
            MAGIC_IDENTIFIER => Ok(()),
            magic_identifier => Err(ClassFileError::NotAClassFile(magic_identifier)),
        }
    }

    fn parse_version(&mut self) -> Result<Version> {
        let minor = self.read_u16()?;
        let major = self.read_u16()?;
        Ok(Version { major, minor })
    }

    fn parse_constant_pool(&mut self) -> Result<ConstantPool> {
        let offset = self.r.offset();
        let constant_pool_count = self.read_u16()?;
        if constant_pool_count == 0 {
            return Err(ClassFileError::malformed(offset, "constant pool count is zero"));
        }
        debug!("Constant pool count {}", constant_pool_count);

        let mut count = constant_pool_count as usize - 1;
        let mut res = Vec::with_capacity(count);
        while count > 0 {
            let offset = self.r.offset();
            let cp_info = self.parse_cp_info()?;
            trace!("#{} = {:?}", res.len() + 1, cp_info);

            let slot_size = cp_info.slot_size();
            if slot_size > count {
                return Err(ClassFileError::malformed(
                    offset,
                    format!(
                        "{} entry at index {} overflows the constant pool",
                        cp_info.kind(),
                        res.len() + 1
                    ),
                ));
            }

            res.push(cp_info);
            (0..slot_size - 1).for_each(|_| res.push(CpInfo::Unusable));

            count -= slot_size;
        }
        Ok(ConstantPool::new(res))
    }

    fn parse_cp_info(&mut self) -> Result<CpInfo> {
        let offset = self.r.offset();
        let tag = self.read_u8()?;
        let cp_info = match tag {
            1 => self.parse_utf8()?,
            3 => CpInfo::Integer(self.r.read_i32()?),
            4 => CpInfo::Float(f32::from_bits(self.read_u32()?)),
            5 => CpInfo::Long(self.r.read_i64()?),
            6 => CpInfo::Double(f64::from_bits(self.r.read_u64()?)),
            7 => CpInfo::Class(ClassInfo {
                name_index: self.read_u16()?,
            }),
            8 => CpInfo::String(StringInfo {
                string_index: self.read_u16()?,
            }),
            9 => CpInfo::FieldRef(self.parse_ref_info()?),
            10 => CpInfo::MethodRef(self.parse_ref_info()?),
            11 => CpInfo::InterfaceMethodRef(self.parse_ref_info()?),
            12 => self.parse_name_and_type_info()?,
            15 => self.parse_method_handle()?,
            16 => CpInfo::MethodType(MethodTypeInfo {
                descriptor_index: self.read_u16()?,
            }),
            17 => CpInfo::Dynamic(self.parse_dynamic_info()?),
            18 => CpInfo::InvokeDynamic(self.parse_dynamic_info()?),
            19 => CpInfo::Module(ModuleInfo {
                name_index: self.read_u16()?,
            }),
            20 => CpInfo::Package(PackageInfo {
                name_index: self.read_u16()?,
            }),
            _ => {
                return Err(ClassFileError::malformed(
                    offset,
                    format!("invalid constant pool tag {}", tag),
                ))
            }
        };

        Ok(cp_info)
    }

    fn parse_utf8(&mut self) -> Result<CpInfo> {
        let length = self.read_u16()?;
        let offset = self.r.offset();
        let bytes = self.r.read_bytes(length as usize)?;

        match cesu8::from_java_cesu8(bytes) {
            Ok(s) => Ok(CpInfo::Utf8(s.into_owned())),
            Err(_) => Err(ClassFileError::malformed(
                offset,
                "invalid modified UTF-8 in constant pool entry",
            )),
        }
    }

    fn parse_name_and_type_info(&mut self) -> Result<CpInfo> {
        let name_index = self.read_u16()?;
        let descriptor_index = self.read_u16()?;

        Ok(CpInfo::NameAndType(NameAndTypeInfo {
            name_index,
            descriptor_index,
        }))
    }

    fn parse_method_handle(&mut self) -> Result<CpInfo> {
        let reference_kind = self.read_u8()?;
        let reference_index = self.read_u16()?;

        Ok(CpInfo::MethodHandle(MethodHandleInfo {
            reference_kind,
            reference_index,
        }))
    }

    fn parse_dynamic_info(&mut self) -> Result<DynamicInfo> {
        let bootstrap_method_attr_index = self.read_u16()?;
        let name_and_type_index = self.read_u16()?;

        Ok(DynamicInfo {
            bootstrap_method_attr_index,
            name_and_type_index,
        })
    }

    fn parse_ref_info(&mut self) -> Result<constant_pool::RefInfo> {
        let class_index = self.read_u16()?;
        let name_and_type_index = self.read_u16()?;

        Ok(constant_pool::RefInfo {
            class_index,
            name_and_type_index,
        })
    }

    fn parse_attribute(&mut self) -> Result<Attribute> {
        let attribute_name_index = self.read_u16()?;
        let attribute_length = self.read_u32()?;
        let offset = self.r.offset();
        let info = self.r.read_bytes(attribute_length as usize)?.to_vec();
        trace!(
            "Attribute #{} ({} bytes) at offset {}",
            attribute_name_index,
            attribute_length,
            offset
        );

        Ok(Attribute {
            attribute_name_index,
            info,
            offset,
        })
    }

    fn parse_attributes(&mut self) -> Result<Attributes> {
        let attributes_count = self.read_u16()?;
        (0..attributes_count)
            .map(|_| self.parse_attribute())
            .collect::<Result<Vec<_>>>()
            .map(Attributes)
    }

    fn read_u32(&mut self) -> Result<u32> {
        self.r.read_u32()
    }

    fn read_u16(&mut self) -> Result<u16> {
        self.r.read_u16()
    }

    fn read_u8(&mut self) -> Result<u8> {
        self.r.read_u8()
    }
}



#[cfg(test)]
mod parse_constant_pool_tests {
    use super::*;

    #[test]
    fn it_should_parse_numeric_entries() {
        #[rustfmt::skip]
        let constant_pool = Parser::new(&[
            0x00, 0x05,
            0x03, 0xff, 0xff, 0xff, 0xff,
            0x04, 0x7f, 0x80, 0x00, 0x00,
            0x06, 0x40, 0x09, 0x21, 0xfb, 0x54, 0x44, 0x2d, 0x18,
        ])
        .parse_constant_pool()
        .unwrap();

        assert_eq!(constant_pool.get(1), Ok(&CpInfo::Integer(-1)));
        assert_eq!(constant_pool.get(2), Ok(&CpInfo::Float(f32::INFINITY)));
        assert_eq!(
            constant_pool.get(3),
            Ok(&CpInfo::Double(std::f64::consts::PI))
        );
        assert!(constant_pool.get(4).is_err());
        assert!(constant_pool.get(5).is_err());
    }

    #[test]
    fn it_should_reserve_the_slot_after_a_long() {
        #[rustfmt::skip]
        let constant_pool = Parser::new(&[
            0x00, 0x04,
            0x05, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02,
            0x01, 0x00, 0x01, b'x',
        ])
        .parse_constant_pool()
        .unwrap();

        assert_eq!(constant_pool.get(1), Ok(&CpInfo::Long(0x1_0000_0002)));
        assert!(matches!(
            constant_pool.get(2),
            Err(ClassFileError::InvalidConstantPoolIndex { index: 2, .. })
        ));
        assert_eq!(constant_pool.utf8(3), Ok("x"));
    }

    #[test]
    fn it_should_decode_modified_utf8() {
        // U+0000 is encoded as two bytes, U+1F600 as a surrogate pair.
        #[rustfmt::skip]
        let constant_pool = Parser::new(&[
            0x00, 0x02,
            0x01, 0x00, 0x09, b'a', 0xc0, 0x80, 0xed, 0xa0, 0xbd, 0xed, 0xb8, 0x80,
        ])
        .parse_constant_pool()
        .unwrap();

        assert_eq!(constant_pool.utf8(1), Ok("a\u{0}\u{1F600}"));
    }

    #[test]
    fn it_should_parse_dynamic_and_module_entries() {
        #[rustfmt::skip]
        let constant_pool = Parser::new(&[
            0x00, 0x08,
            0x0f, 0x06, 0x00, 0x01,
            0x10, 0x00, 0x02,
            0x11, 0x00, 0x00, 0x00, 0x03,
            0x12, 0x00, 0x01, 0x00, 0x03,
            0x13, 0x00, 0x04,
            0x14, 0x00, 0x05,
            0x01, 0x00, 0x01, b'z',
        ])
        .parse_constant_pool()
        .unwrap();

        assert_eq!(
            constant_pool.get(1),
            Ok(&CpInfo::MethodHandle(MethodHandleInfo {
                reference_kind: 6,
                reference_index: 1
            }))
        );
        assert_eq!(
            constant_pool.get(2),
            Ok(&CpInfo::MethodType(MethodTypeInfo {
                descriptor_index: 2
            }))
        );
        assert_eq!(
            constant_pool.get(3),
            Ok(&CpInfo::Dynamic(DynamicInfo {
                bootstrap_method_attr_index: 0,
                name_and_type_index: 3
            }))
        );
        assert_eq!(
            constant_pool.get(4),
            Ok(&CpInfo::InvokeDynamic(DynamicInfo {
                bootstrap_method_attr_index: 1,
                name_and_type_index: 3
            }))
        );
        assert_eq!(
            constant_pool.get(5),
            Ok(&CpInfo::Module(ModuleInfo { name_index: 4 }))
        );
        assert_eq!(
            constant_pool.get(6),
            Ok(&CpInfo::Package(PackageInfo { name_index: 5 }))
        );
        assert_eq!(constant_pool.utf8(7), Ok("z"));
    }

    #[test]
    fn it_should_fail_for_invalid_modified_utf8() {
        assert_eq!(
            Parser::new(&[0x00, 0x02, 0x01, 0x00, 0x01, 0xff]).parse_constant_pool(),
            Err(ClassFileError::MalformedClassFile {
                offset: 5,
                reason: "invalid modified UTF-8 in constant pool entry".into()
            })
        );
    }

    #[test]
    fn it_should_fail_for_an_invalid_tag() {
        assert_eq!(
            Parser::new(&[0x00, 0x02, 0x02]).parse_constant_pool(),
            Err(ClassFileError::MalformedClassFile {
                offset: 2,
                reason: "invalid constant pool tag 2".into()
            })
        );
    }

    #[test]
    fn it_should_fail_for_a_zero_count() {
        assert!(matches!(
            Parser::new(&[0x00, 0x00]).parse_constant_pool(),
            Err(ClassFileError::MalformedClassFile { offset: 0, .. })
        ));
    }

    #[test]
    fn it_should_fail_if_a_double_overflows_the_pool() {
        #[rustfmt::skip]
        let result = Parser::new(&[
            0x00, 0x02,
            0x06, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ])
        .parse_constant_pool();

        assert!(matches!(
            result,
            Err(ClassFileError::MalformedClassFile { offset: 2, .. })
        ));
    }

    #[test]
    fn it_should_fail_if_an_entry_is_truncated() {
        assert_eq!(
            Parser::new(&[0x00, 0x02, 0x01, 0x00, 0x05, b'a', b'b']).parse_constant_pool(),
            Err(ClassFileError::TruncatedInput {
                offset: 5,
                needed: 5,
                remaining: 2
            })
        );
    }
}
