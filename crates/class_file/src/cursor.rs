use std::io::{self, Cursor};

use byteorder::{BigEndian, ReadBytesExt};

use crate::{ClassFileError, Result};

type Endian = BigEndian;

/// Sequential big-endian reader over a fixed buffer.
///
/// Offsets reported by [`ByteCursor::offset`] and in errors are relative to
/// the start of the class file, also for cursors created over a nested
/// attribute payload with [`ByteCursor::with_base`].
pub struct ByteCursor<'a> {
    r: Cursor<&'a [u8]>,
    base: usize,
}
impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_base(buf, 0)
    }

    pub fn with_base(buf: &'a [u8], base: usize) -> Self {
        Self {
            r: Cursor::new(buf),
            base,
        }
    }

    pub fn offset(&self) -> usize {
        self.base + self.r.position() as usize
    }

    pub fn remaining(&self) -> usize {
        self.r.get_ref().len().saturating_sub(self.r.position() as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_with(1, |r| r.read_u8())
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_with(2, |r| r.read_u16::<Endian>())
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_with(4, |r| r.read_u32::<Endian>())
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_with(4, |r| r.read_i32::<Endian>())
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.read_with(8, |r| r.read_i64::<Endian>())
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_with(8, |r| r.read_u64::<Endian>())
    }

    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        self.ensure(length)?;
        let start = self.r.position() as usize;
        let buf: &'a [u8] = *self.r.get_ref();
        let bytes = &buf[start..start + length];
        self.r.set_position((start + length) as u64);
        Ok(bytes)
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(ClassFileError::TruncatedInput {
                offset: self.offset(),
                needed,
                remaining,
            });
        }
        Ok(())
    }

    // A failed read must not move the cursor, so the bounds check happens up front.
    fn read_with<T>(
        &mut self,
        needed: usize,
        f: impl FnOnce(&mut Cursor<&'a [u8]>) -> io::Result<T>,
    ) -> Result<T> {
        self.ensure(needed)?;
        let offset = self.offset();
        f(&mut self.r).map_err(|_| ClassFileError::TruncatedInput {
            offset,
            needed,
            remaining: 0,
        })
    }
}
