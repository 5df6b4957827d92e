//! Assembles class files byte by byte.

#![allow(dead_code)]

pub const PUBLIC: u16 = 0x0001;
pub const PRIVATE: u16 = 0x0002;
pub const PROTECTED: u16 = 0x0004;
pub const STATIC: u16 = 0x0008;
pub const FINAL: u16 = 0x0010;
pub const SUPER: u16 = 0x0020;
pub const SYNCHRONIZED: u16 = 0x0020;
pub const VOLATILE: u16 = 0x0040;
pub const TRANSIENT: u16 = 0x0080;
pub const NATIVE: u16 = 0x0100;
pub const INTERFACE: u16 = 0x0200;
pub const ABSTRACT: u16 = 0x0400;
pub const STRICT: u16 = 0x0800;

pub struct ClassBuilder {
    next_index: u16,
    pool: Vec<u8>,
    access_flags: u16,
    this_class: u16,
    super_class: u16,
    interfaces: Vec<u16>,
    fields: Vec<Vec<u8>>,
    methods: Vec<Vec<u8>>,
}

impl ClassBuilder {
    /// A class extending `java/lang/Object`.
    pub fn new(name: &str, access_flags: u16) -> Self {
        let mut builder = Self::without_super_class(name, access_flags);
        builder.super_class = builder.class("java/lang/Object");
        builder
    }

    pub fn without_super_class(name: &str, access_flags: u16) -> Self {
        let mut builder = ClassBuilder {
            next_index: 1,
            pool: Vec::new(),
            access_flags,
            this_class: 0,
            super_class: 0,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        };
        builder.this_class = builder.class(name);
        builder
    }

    fn push_entry(&mut self, bytes: &[u8], slots: u16) -> u16 {
        let index = self.next_index;
        self.pool.extend_from_slice(bytes);
        self.next_index += slots;
        index
    }

    pub fn utf8(&mut self, s: &str) -> u16 {
        let mut bytes = vec![1];
        bytes.extend_from_slice(&(s.len() as u16).to_be_bytes());
        bytes.extend_from_slice(s.as_bytes());
        self.push_entry(&bytes, 1)
    }

    pub fn class(&mut self, name: &str) -> u16 {
        let name_index = self.utf8(name);
        let mut bytes = vec![7];
        bytes.extend_from_slice(&name_index.to_be_bytes());
        self.push_entry(&bytes, 1)
    }

    pub fn integer(&mut self, value: i32) -> u16 {
        let mut bytes = vec![3];
        bytes.extend_from_slice(&value.to_be_bytes());
        self.push_entry(&bytes, 1)
    }

    pub fn long(&mut self, value: i64) -> u16 {
        let mut bytes = vec![5];
        bytes.extend_from_slice(&value.to_be_bytes());
        self.push_entry(&bytes, 2)
    }

    pub fn double(&mut self, value: f64) -> u16 {
        let mut bytes = vec![6];
        bytes.extend_from_slice(&value.to_bits().to_be_bytes());
        self.push_entry(&bytes, 2)
    }

    pub fn set_super_class(&mut self, name: &str) -> &mut Self {
        self.super_class = self.class(name);
        self
    }

    pub fn set_super_class_index(&mut self, index: u16) -> &mut Self {
        self.super_class = index;
        self
    }

    pub fn interface(&mut self, name: &str) -> &mut Self {
        let index = self.class(name);
        self.interfaces.push(index);
        self
    }

    pub fn field(&mut self, access_flags: u16, name: &str, descriptor: &str) -> &mut Self {
        let member = self.member(access_flags, name, descriptor, Vec::new());
        self.fields.push(member);
        self
    }

    pub fn constant_field(
        &mut self,
        access_flags: u16,
        name: &str,
        descriptor: &str,
        constant_value_index: u16,
    ) -> &mut Self {
        let attribute_name = self.utf8("ConstantValue");
        let attribute = (attribute_name, constant_value_index.to_be_bytes().to_vec());
        let member = self.member(access_flags, name, descriptor, vec![attribute]);
        self.fields.push(member);
        self
    }

    pub fn method(&mut self, access_flags: u16, name: &str, descriptor: &str) -> &mut Self {
        self.method_throwing(access_flags, name, descriptor, None)
    }

    pub fn method_throwing(
        &mut self,
        access_flags: u16,
        name: &str,
        descriptor: &str,
        exceptions: Option<&[&str]>,
    ) -> &mut Self {
        // Every method gets an opaque Code attribute, which must be skipped.
        let code_name = self.utf8("Code");
        #[rustfmt::skip]
        let code = vec![
            0x00, 0x01, 0x00, 0x01,
            0x00, 0x00, 0x00, 0x01, 0xb1,
            0x00, 0x00,
            0x00, 0x00,
        ];
        let mut attributes = vec![(code_name, code)];

        if let Some(exceptions) = exceptions {
            let attribute_name = self.utf8("Exceptions");
            let mut info = (exceptions.len() as u16).to_be_bytes().to_vec();
            for exception in exceptions {
                info.extend_from_slice(&self.class(exception).to_be_bytes());
            }
            attributes.push((attribute_name, info));
        }

        let member = self.member(access_flags, name, descriptor, attributes);
        self.methods.push(member);
        self
    }

    /// Adds a raw method record, with the attributes given as name index and payload.
    pub fn raw_method(
        &mut self,
        access_flags: u16,
        name: &str,
        descriptor: &str,
        attributes: Vec<(u16, Vec<u8>)>,
    ) -> &mut Self {
        let member = self.member(access_flags, name, descriptor, attributes);
        self.methods.push(member);
        self
    }

    fn member(
        &mut self,
        access_flags: u16,
        name: &str,
        descriptor: &str,
        attributes: Vec<(u16, Vec<u8>)>,
    ) -> Vec<u8> {
        let name_index = self.utf8(name);
        let descriptor_index = self.utf8(descriptor);

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&access_flags.to_be_bytes());
        bytes.extend_from_slice(&name_index.to_be_bytes());
        bytes.extend_from_slice(&descriptor_index.to_be_bytes());
        bytes.extend_from_slice(&(attributes.len() as u16).to_be_bytes());
        for (name_index, info) in attributes {
            bytes.extend_from_slice(&name_index.to_be_bytes());
            bytes.extend_from_slice(&(info.len() as u32).to_be_bytes());
            bytes.extend_from_slice(&info);
        }
        bytes
    }

    pub fn build(&self) -> Vec<u8> {
        let mut bytes = vec![0xca, 0xfe, 0xba, 0xbe, 0x00, 0x00, 0x00, 0x34];
        bytes.extend_from_slice(&self.next_index.to_be_bytes());
        bytes.extend_from_slice(&self.pool);
        bytes.extend_from_slice(&self.access_flags.to_be_bytes());
        bytes.extend_from_slice(&self.this_class.to_be_bytes());
        bytes.extend_from_slice(&self.super_class.to_be_bytes());

        bytes.extend_from_slice(&(self.interfaces.len() as u16).to_be_bytes());
        for interface in &self.interfaces {
            bytes.extend_from_slice(&interface.to_be_bytes());
        }

        for members in [&self.fields, &self.methods] {
            bytes.extend_from_slice(&(members.len() as u16).to_be_bytes());
            for member in members {
                bytes.extend_from_slice(member);
            }
        }

        // No class attributes.
        bytes.extend_from_slice(&[0x00, 0x00]);
        bytes
    }
}
