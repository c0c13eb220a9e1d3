//! Bounds-checked byte reading for WDB buffers
//!
//! The container grammar mixes sequential fields with pointer fields whose
//! values are absolute offsets into the buffer being decoded. [`Cursor`]
//! supports both: ordinary reads advance the position, while
//! [`Cursor::resolve_pointer`] seeks to an offset, decodes a nested structure
//! and restores the position so the enclosing sequential walk is undisturbed.

use crate::error::{Result, WdbError};

/// A cursor for reading binary data from a byte slice
///
/// Offsets are always measured from the start of the buffer the cursor was
/// created over. An embedded blob is decoded with its own cursor, so pointer
/// fields inside the blob resolve relative to the blob start, not the file.
#[derive(Debug)]
pub struct Cursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the beginning of the data
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Current read position, measured from the start of the buffer
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes left between the position and the end of the buffer
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Bounds-checked access to the next `n` bytes, advancing the position
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(WdbError::UnexpectedEof {
                offset: self.position,
                wanted: n,
            });
        }
        let bytes = &self.data[self.position..self.position + n];
        self.position += n;
        Ok(bytes)
    }

    /// Read a single unsigned 8-bit integer
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read an unsigned 16-bit integer in little-endian format
    pub fn read_u16_le(&mut self) -> Result<u16> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Read an unsigned 32-bit integer in little-endian format
    pub fn read_u32_le(&mut self) -> Result<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a signed 32-bit integer in little-endian format
    pub fn read_i32_le(&mut self) -> Result<i32> {
        let bytes = self.take(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read an IEEE-754 single-precision float in little-endian format
    pub fn read_f32_le(&mut self) -> Result<f32> {
        let bytes = self.take(4)?;
        Ok(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read three consecutive floats as a 3-component vector
    pub fn read_vec3(&mut self) -> Result<[f32; 3]> {
        Ok([
            self.read_f32_le()?,
            self.read_f32_le()?,
            self.read_f32_le()?,
        ])
    }

    /// Read exactly `n` bytes
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        Ok(self.take(n)?.to_vec())
    }

    /// Read a string prefixed with an unsigned 32-bit length
    ///
    /// Trailing NUL padding is kept; strip it with
    /// [`strip_padding`](crate::types::strip_padding) before using the value
    /// as a name or path segment.
    pub fn read_string_u32(&mut self) -> Result<String> {
        let len = self.read_u32_le()?;
        self.read_string_bytes(len as usize)
    }

    /// Read a string prefixed with a signed 32-bit length
    ///
    /// A negative length is a format error.
    pub fn read_string_i32(&mut self) -> Result<String> {
        let len = self.read_i32_le()?;
        if len < 0 {
            return Err(WdbError::NegativeLength {
                field: "string length",
                value: len,
            });
        }
        self.read_string_bytes(len as usize)
    }

    fn read_string_bytes(&mut self, len: usize) -> Result<String> {
        let offset = self.position;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| WdbError::InvalidString { offset })
    }

    /// Reposition the cursor to an absolute offset from the buffer start
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            return Err(WdbError::BadSeek {
                offset,
                len: self.data.len(),
            });
        }
        self.position = offset;
        Ok(())
    }

    /// Decode a nested structure at an absolute offset without disturbing
    /// the sequential read position
    ///
    /// Snapshots the position, seeks to `offset`, runs `f`, then restores the
    /// snapshot. The position after the call equals the position before it,
    /// whatever `f` read in between.
    pub fn resolve_pointer<T, F>(&mut self, offset: usize, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let saved = self.position;
        self.seek(offset)?;
        let result = f(self);
        self.position = saved;
        result
    }
}
