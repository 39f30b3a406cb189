//! Bounds-checked sequential reads over a byte slice.

use alloc::string::String;

use thiserror::Error;

/// The cursor ran past the end of its slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unexpectedly reached the end of the data.")]
pub struct OutOfData;

/// Byte order of multi-byte values, fixed per message definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// A read position within a fixed slice.
///
/// Every read either consumes exactly the bytes it asked for, or fails with
/// [`OutOfData`] and leaves the position where it was.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    r: &'a [u8],
    i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(r: &'a [u8]) -> Self {
        Self { r, i: 0 }
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.i
    }

    /// Number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.r.len() - self.i
    }

    /// Advance past `n` bytes without inspecting them.
    pub fn skip(&mut self, n: usize) -> Result<(), OutOfData> {
        self.slice(n).map(|_| ())
    }

    /// Take an exact number of bytes as an array.
    pub fn take<const N: usize>(&mut self) -> Result<[u8; N], OutOfData> {
        let mut buf = [0; N];
        buf.copy_from_slice(self.slice(N)?);
        Ok(buf)
    }

    /// Take an exact number of bytes as a borrowed slice.
    pub fn slice(&mut self, n: usize) -> Result<&'a [u8], OutOfData> {
        let end = self.i.checked_add(n).ok_or(OutOfData)?;
        let r = self.r.get(self.i..end).ok_or(OutOfData)?;
        self.i = end;
        Ok(r)
    }

    /// Read an unsigned integer of `width` bytes (at most eight).
    ///
    /// # Panics
    ///
    /// If `width` exceeds eight.
    pub fn read_uint(&mut self, width: usize, endian: Endian) -> Result<u64, OutOfData> {
        assert!(width <= 8, "integer width {width} exceeds eight bytes");

        let r = self.slice(width)?;
        let mut buf = [0; 8];

        Ok(match endian {
            Endian::Little => {
                buf[..width].copy_from_slice(r);
                u64::from_le_bytes(buf)
            }
            Endian::Big => {
                buf[8 - width..].copy_from_slice(r);
                u64::from_be_bytes(buf)
            }
        })
    }

    /// Read a two's complement integer of `width` bytes (one to eight).
    ///
    /// # Panics
    ///
    /// If `width` is zero or exceeds eight.
    pub fn read_int(&mut self, width: usize, endian: Endian) -> Result<i64, OutOfData> {
        assert!(width != 0, "integer width must be non-zero");

        let shift = 64 - 8 * width as u32;
        let x = self.read_uint(width, endian)?;

        // Sign-extend from the top bit of the narrower value.
        Ok(((x << shift) as i64) >> shift)
    }

    /// Read an IEEE 754 float of four or eight bytes.
    ///
    /// Any width other than four is read as eight.
    pub fn read_float(&mut self, width: usize, endian: Endian) -> Result<f64, OutOfData> {
        Ok(if width == 4 {
            f32::from_bits(self.read_uint(4, endian)? as u32) as f64
        } else {
            f64::from_bits(self.read_uint(8, endian)?)
        })
    }

    /// Read a NUL-terminated string stored in a field of `len` bytes.
    ///
    /// All `len` bytes are consumed. Invalid UTF-8 is replaced.
    pub fn read_string(&mut self, len: usize) -> Result<String, OutOfData> {
        let r = self.slice(len)?;
        let end = r.iter().position(|b| *b == 0).unwrap_or(r.len());
        Ok(String::from_utf8_lossy(&r[..end]).into_owned())
    }
}
