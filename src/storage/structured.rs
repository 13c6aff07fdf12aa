//! Fixed-width binary I/O for the index file format.
//!
//! Every integer is 32 bits wide and little-endian. The reader knows the
//! total input size up front, so callers can validate a declared element
//! count against the bytes actually left before allocating for it.

use std::io::{ErrorKind, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{BoolSearchError, Result};

/// Largest count or value representable in the on-disk `int32` fields.
pub const MAX_INT32_FIELD: u64 = i32::MAX as u64;

/// A structured writer for binary data.
pub struct StructWriter<W: Write> {
    writer: W,
    position: u64,
}

impl<W: Write> StructWriter<W> {
    /// Create a new structured writer.
    pub fn new(writer: W) -> Self {
        StructWriter {
            writer,
            position: 0,
        }
    }

    /// Write a u32 value (little-endian).
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.writer.write_u32::<LittleEndian>(value)?;
        self.position += 4;
        Ok(())
    }

    /// Write a length or count as an `int32` field.
    pub fn write_len(&mut self, len: usize) -> Result<()> {
        if len as u64 > MAX_INT32_FIELD {
            return Err(BoolSearchError::index(format!(
                "Length {len} does not fit in an int32 field"
            )));
        }
        self.write_u32(len as u32)
    }

    /// Write a slice of u32 values without a length prefix.
    pub fn write_u32_slice(&mut self, values: &[u32]) -> Result<()> {
        for &value in values {
            self.writer.write_u32::<LittleEndian>(value)?;
        }
        self.position += 4 * values.len() as u64;
        Ok(())
    }

    /// Write raw bytes without length prefix.
    pub fn write_raw(&mut self, value: &[u8]) -> Result<()> {
        self.writer.write_all(value)?;
        self.position += value.len() as u64;
        Ok(())
    }

    /// Get the number of bytes written.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// A structured reader for binary data.
///
/// Short reads are reported as [`BoolSearchError::Corrupted`] carrying the
/// offset where the read started.
pub struct StructReader<R: Read> {
    reader: R,
    position: u64,
    size: u64,
}

impl<R: Read> StructReader<R> {
    /// Create a new structured reader over `size` bytes of input.
    pub fn new(reader: R, size: u64) -> Self {
        StructReader {
            reader,
            position: 0,
            size,
        }
    }

    /// Read a u32 value (little-endian).
    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure_remaining(4, "u32")?;
        let value = self
            .reader
            .read_u32::<LittleEndian>()
            .map_err(|e| self.short_read(e))?;
        self.position += 4;
        Ok(value)
    }

    /// Read an `int32` count of elements that are each at least
    /// `min_element_size` bytes, rejecting counts the rest of the input
    /// cannot hold.
    pub fn read_count(&mut self, min_element_size: u64, what: &str) -> Result<usize> {
        let offset = self.position;
        let count = self.read_u32()? as u64;

        if count > MAX_INT32_FIELD {
            return Err(BoolSearchError::corrupted(
                offset,
                format!("negative {what}: {}", count as u32 as i32),
            ));
        }

        let needed = count * min_element_size;
        if needed > self.remaining() {
            return Err(BoolSearchError::corrupted(
                offset,
                format!(
                    "{what} {count} needs {needed} bytes but only {} remain",
                    self.remaining()
                ),
            ));
        }

        Ok(count as usize)
    }

    /// Read `count` u32 values.
    pub fn read_u32_vec(&mut self, count: usize) -> Result<Vec<u32>> {
        self.ensure_remaining(4 * count as u64, "u32 array")?;
        let mut values = vec![0u32; count];
        self.reader
            .read_u32_into::<LittleEndian>(&mut values)
            .map_err(|e| self.short_read(e))?;
        self.position += 4 * count as u64;
        Ok(values)
    }

    /// Read exact number of raw bytes.
    pub fn read_raw(&mut self, length: usize) -> Result<Vec<u8>> {
        self.ensure_remaining(length as u64, "byte string")?;
        let mut bytes = vec![0u8; length];
        self.reader
            .read_exact(&mut bytes)
            .map_err(|e| self.short_read(e))?;
        self.position += length as u64;
        Ok(bytes)
    }

    /// Get current read position.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Get the declared input size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Bytes left between the current position and the declared size.
    pub fn remaining(&self) -> u64 {
        self.size.saturating_sub(self.position)
    }

    /// Check if we're at the end of the input.
    pub fn is_eof(&self) -> bool {
        self.position >= self.size
    }

    fn ensure_remaining(&self, needed: u64, what: &str) -> Result<()> {
        if needed > self.remaining() {
            return Err(BoolSearchError::corrupted(
                self.position,
                format!(
                    "truncated {what}: need {needed} bytes, {} remain",
                    self.remaining()
                ),
            ));
        }
        Ok(())
    }

    fn short_read(&self, err: std::io::Error) -> BoolSearchError {
        if err.kind() == ErrorKind::UnexpectedEof {
            BoolSearchError::corrupted(self.position, "unexpected end of input")
        } else {
            BoolSearchError::Io(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_struct_writer_layout() {
        let mut writer = StructWriter::new(Vec::new());
        writer.write_u32(1).unwrap();
        writer.write_len(3).unwrap();
        writer.write_raw(b"abc").unwrap();
        writer.write_u32_slice(&[0x0102_0304]).unwrap();
        assert_eq!(writer.position(), 15);

        let bytes = writer.into_inner().unwrap();
        assert_eq!(
            bytes,
            vec![1, 0, 0, 0, 3, 0, 0, 0, b'a', b'b', b'c', 4, 3, 2, 1]
        );
    }

    #[test]
    fn test_struct_reader_roundtrip() {
        let bytes = vec![2, 0, 0, 0, 7, 0, 0, 0, 9, 0, 0, 0, b'x'];
        let size = bytes.len() as u64;
        let mut reader = StructReader::new(Cursor::new(bytes), size);

        let count = reader.read_count(4, "values").unwrap();
        assert_eq!(count, 2);
        assert_eq!(reader.read_u32_vec(count).unwrap(), vec![7, 9]);
        assert_eq!(reader.read_raw(1).unwrap(), b"x");
        assert!(reader.is_eof());
    }

    #[test]
    fn test_count_exceeding_input_is_rejected() {
        let bytes = vec![10, 0, 0, 0, 1, 0, 0, 0];
        let mut reader = StructReader::new(Cursor::new(bytes), 8);

        let err = reader.read_count(4, "positions").unwrap_err();
        assert!(err.is_corruption());
    }

    #[test]
    fn test_negative_count_is_rejected() {
        let bytes = (-1i32).to_le_bytes().to_vec();
        let mut reader = StructReader::new(Cursor::new(bytes), 4);

        let err = reader.read_count(1, "entries").unwrap_err();
        assert!(err.to_string().contains("negative entries"));
    }

    #[test]
    fn test_short_read_is_corruption() {
        let mut reader = StructReader::new(Cursor::new(vec![1, 2]), 2);
        assert!(reader.read_u32().unwrap_err().is_corruption());
    }
}
