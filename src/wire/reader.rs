//! Cursor-style reader over a flat byte buffer.

use crate::util::{Error, Result};

/// Sequential reader over `&[u8]` with an explicit position.
///
/// Every read is bounds-checked; running past the end of the buffer yields
/// [`Error::UnexpectedEof`] carrying the absolute byte offset where the read
/// would have started.
#[derive(Clone)]
pub struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Create a reader at the start of the buffer.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Create a reader positioned past an already-validated prefix, so that
    /// reported offsets stay absolute within `data`.
    pub fn new_at(data: &'a [u8], pos: usize) -> Self {
        debug_assert!(pos <= data.len());
        Self {
            data,
            pos: pos.min(data.len()),
        }
    }

    /// Current absolute position in the buffer.
    #[inline]
    pub fn pos(&self) -> u64 {
        self.pos as u64
    }

    /// Bytes remaining past the current position.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// True once the whole buffer has been consumed.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos == self.data.len()
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(Error::UnexpectedEof(self.pos as u64));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Read a fixed number of raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.take(len)
    }

    /// Read a little-endian i32.
    pub fn read_i32(&mut self) -> Result<i32> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Read a little-endian u16.
    pub fn read_u16(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read a little-endian f32.
    pub fn read_f32(&mut self) -> Result<f32> {
        let b = self.take(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Read a single-byte bool (nonzero = true).
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Read a length-prefixed string: 4-byte byte count, then the raw bytes.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_i32()?;
        if len < 0 {
            return Err(Error::invalid(format!("negative string length: {len}")));
        }
        let bytes = self.take(len as usize)?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    /// Read an i32 count field, rejecting negative values.
    pub fn read_count(&mut self, what: &str) -> Result<usize> {
        let count = self.read_i32()?;
        if count < 0 {
            return Err(Error::invalid(format!("negative {what} count: {count}")));
        }
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_reads() -> Result<()> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&(-5i32).to_le_bytes());
        buf.extend_from_slice(&2.5f32.to_le_bytes());
        buf.push(1);

        let mut r = WireReader::new(&buf);
        assert_eq!(r.read_i32()?, -5);
        assert_eq!(r.read_f32()?, 2.5);
        assert!(r.read_bool()?);
        assert!(r.is_at_end());
        Ok(())
    }

    #[test]
    fn test_eof_carries_offset() {
        let buf = [0u8; 6];
        let mut r = WireReader::new(&buf);
        r.read_i32().unwrap();
        match r.read_i32() {
            Err(Error::UnexpectedEof(pos)) => assert_eq!(pos, 4),
            other => panic!("expected UnexpectedEof, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_string_decodes() -> Result<()> {
        let buf = [0u8; 4];
        let mut r = WireReader::new(&buf);
        assert_eq!(r.read_string()?, "");
        assert!(r.is_at_end());
        Ok(())
    }

    #[test]
    fn test_negative_string_length_rejected() {
        let buf = (-1i32).to_le_bytes();
        let mut r = WireReader::new(&buf);
        assert!(matches!(r.read_string(), Err(Error::InvalidStructure(_))));
    }
}
