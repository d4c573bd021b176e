//! Little-endian cursor pair for the catbuffer wire format.
//!
//! All multi-byte integers in the catbuffer layout are little-endian at
//! fixed offsets; the writer appends, the reader advances and fails hard on
//! short buffers.

use crate::error::TransactionError;

/// Appends fixed-width little-endian fields to a growing buffer.
#[derive(Default)]
pub struct CatWriter {
    buf: Vec<u8>,
}

impl CatWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.buf.push(value as u8);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Reads fixed-width little-endian fields from a byte slice.
pub struct CatReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> CatReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn ensure(&self, needed: usize) -> Result<(), TransactionError> {
        if self.remaining() < needed {
            return Err(TransactionError::BufferTooShort {
                needed,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], TransactionError> {
        self.ensure(len)?;
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], TransactionError> {
        let slice = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, TransactionError> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, TransactionError> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16, TransactionError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, TransactionError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, TransactionError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Split off the next `len` bytes as a nested reader.
    pub fn sub_reader(&mut self, len: usize) -> Result<CatReader<'a>, TransactionError> {
        Ok(CatReader::new(self.read_bytes(len)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_read_roundtrip() {
        let mut w = CatWriter::new();
        w.write_u8(0x01);
        w.write_u16(0x0203);
        w.write_u32(0x04050607);
        w.write_u64(0x08090a0b0c0d0e0f);
        w.write_i8(-5);
        w.write_bytes(&[0xaa, 0xbb]);
        let bytes = w.into_bytes();

        let mut r = CatReader::new(&bytes);
        assert_eq!(r.read_u8().unwrap(), 0x01);
        assert_eq!(r.read_u16().unwrap(), 0x0203);
        assert_eq!(r.read_u32().unwrap(), 0x04050607);
        assert_eq!(r.read_u64().unwrap(), 0x08090a0b0c0d0e0f);
        assert_eq!(r.read_i8().unwrap(), -5);
        assert_eq!(r.read_bytes(2).unwrap(), &[0xaa, 0xbb]);
        assert!(r.is_empty());
    }

    #[test]
    fn integers_are_little_endian() {
        let mut w = CatWriter::new();
        w.write_u32(0x11223344);
        assert_eq!(w.into_bytes(), vec![0x44, 0x33, 0x22, 0x11]);
    }

    #[test]
    fn short_buffer_is_a_hard_error() {
        let mut r = CatReader::new(&[0x01, 0x02]);
        let err = r.read_u32().unwrap_err();
        assert!(matches!(
            err,
            TransactionError::BufferTooShort {
                needed: 4,
                remaining: 2
            }
        ));
    }

    #[test]
    fn sub_reader_consumes_parent() {
        let bytes = [1u8, 2, 3, 4, 5];
        let mut r = CatReader::new(&bytes);
        let mut sub = r.sub_reader(3).unwrap();
        assert_eq!(sub.read_bytes(3).unwrap(), &[1, 2, 3]);
        assert_eq!(r.remaining(), 2);
        assert!(r.sub_reader(3).is_err());
    }
}
