//! Output stream for writing wire-format data.

use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::util::Result;

/// Buffered, position-tracking writer over any seekable sink.
///
/// Both archive writers append through this and perform exactly one backward
/// seek, to patch their record-count placeholder after the last record.
pub struct WireWriter<W: Write + Seek> {
    sink: W,
    pos: u64,
}

impl WireWriter<BufWriter<File>> {
    /// Create a wire writer over a new file, truncating any existing one.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Seek> WireWriter<W> {
    /// Wrap an existing sink. The sink is assumed to be at position 0.
    pub fn new(sink: W) -> Self {
        Self { sink, pos: 0 }
    }

    /// Get the current write position.
    #[inline]
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// Write raw bytes verbatim and advance position.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.sink.write_all(data)?;
        self.pos += data.len() as u64;
        Ok(())
    }

    /// Write an i32 value (little-endian).
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.sink.write_i32::<LittleEndian>(value)?;
        self.pos += 4;
        Ok(())
    }

    /// Write a u16 value (little-endian).
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.sink.write_u16::<LittleEndian>(value)?;
        self.pos += 2;
        Ok(())
    }

    /// Write a u8 value.
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.sink.write_u8(value)?;
        self.pos += 1;
        Ok(())
    }

    /// Write an f32 value (little-endian).
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.sink.write_f32::<LittleEndian>(value)?;
        self.pos += 4;
        Ok(())
    }

    /// Write a bool as a single byte (1 = true, 0 = false).
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(value as u8)
    }

    /// Write a length-prefixed string: 4-byte byte count, then the raw bytes.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_i32(value.len() as i32)?;
        self.write_bytes(value.as_bytes())
    }

    /// Seek to an absolute position, flushing buffered bytes first.
    pub fn seek(&mut self, pos: u64) -> Result<u64> {
        self.sink.flush()?;
        let new_pos = self.sink.seek(SeekFrom::Start(pos))?;
        self.pos = new_pos;
        Ok(new_pos)
    }

    /// Flush the buffer to the sink.
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    /// Flush and return the underlying sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}
