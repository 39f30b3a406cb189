//! Base types and decoded field values.

use alloc::{string::String, vec::Vec};

use super::cursor::{Cursor, Endian, OutOfData};

/// The storage type of a field, as declared by its definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    /// `enum`
    Enum,
    /// `sint8`
    I8,
    /// `uint8`
    U8,
    /// `sint16`
    I16,
    /// `uint16`
    U16,
    /// `sint32`
    I32,
    /// `uint32`
    U32,
    /// `string`
    String,
    /// `float32`
    F32,
    /// `float64`
    F64,
    /// `uint8z`
    U8Z,
    /// `uint16z`
    U16Z,
    /// `uint32z`
    U32Z,
    /// `byte`
    Byte,
    /// `sint64`
    I64,
    /// `uint64`
    U64,
    /// `uint64z`
    U64Z,
    /// A base type this decoder does not know, skipped by size.
    Opaque(u8),
}

impl BaseType {
    /// Interpret a base type byte from a definition record.
    ///
    /// Only the low five bits identify the type; the high bit merely repeats
    /// whether the type is wider than a byte.
    pub fn from_byte(b: u8) -> Self {
        match b & 0x1F {
            0x00 => Self::Enum,
            0x01 => Self::I8,
            0x02 => Self::U8,
            0x03 => Self::I16,
            0x04 => Self::U16,
            0x05 => Self::I32,
            0x06 => Self::U32,
            0x07 => Self::String,
            0x08 => Self::F32,
            0x09 => Self::F64,
            0x0A => Self::U8Z,
            0x0B => Self::U16Z,
            0x0C => Self::U32Z,
            0x0D => Self::Byte,
            0x0E => Self::I64,
            0x0F => Self::U64,
            0x10 => Self::U64Z,
            _ => Self::Opaque(b),
        }
    }

    /// Width in bytes of a single element of this type.
    pub fn width(self) -> usize {
        match self {
            Self::Enum | Self::I8 | Self::U8 | Self::U8Z => 1,
            Self::String | Self::Byte | Self::Opaque(_) => 1,
            Self::I16 | Self::U16 | Self::U16Z => 2,
            Self::I32 | Self::U32 | Self::U32Z | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::U64Z | Self::F64 => 8,
        }
    }

    /// Decode one element of this numeric type, or `None` for its 'invalid'
    /// marker value.
    fn decode_element(self, c: &mut Cursor, endian: Endian) -> Result<Option<Value>, OutOfData> {
        let width = self.width();

        macro_rules! unsigned {
            ($invalid:expr) => {{
                let x = c.read_uint(width, endian)?;
                (x != $invalid).then_some(Value::UInt(x))
            }};
        }

        Ok(match self {
            Self::Enum | Self::U8 | Self::U16 | Self::U32 | Self::U64 => {
                unsigned!(u64::MAX >> (64 - 8 * width))
            }
            Self::U8Z | Self::U16Z | Self::U32Z | Self::U64Z => unsigned!(0),
            Self::I8 | Self::I16 | Self::I32 | Self::I64 => {
                let x = c.read_int(width, endian)?;
                (x != i64::MAX >> (64 - 8 * width)).then_some(Value::SInt(x))
            }
            Self::F32 | Self::F64 => {
                let x = c.read_float(width, endian)?;
                (!x.is_nan()).then_some(Value::Float(x))
            }
            Self::String | Self::Byte | Self::Opaque(_) => {
                let x = c.read_uint(1, endian)?;
                Some(Value::UInt(x))
            }
        })
    }

    /// Decode a field of this type occupying `size` bytes.
    ///
    /// Returns `None` if the field holds its 'invalid' marker value. Fields
    /// spanning several elements decode to [`Value::Array`], and fields whose
    /// size does not fit the type are read as raw bytes.
    pub fn decode(
        self,
        c: &mut Cursor,
        size: usize,
        endian: Endian,
    ) -> Result<Option<Value>, OutOfData> {
        let width = self.width();

        match self {
            Self::String => {
                let s = c.read_string(size)?;
                return Ok((!s.is_empty()).then_some(Value::String(s)));
            }
            Self::Opaque(_) => {
                c.skip(size)?;
                return Ok(None);
            }
            _ if self == Self::Byte || size % width != 0 => {
                let r = c.slice(size)?;
                return Ok((!r.iter().all(|b| *b == 0xFF)).then(|| Value::Bytes(r.to_vec())));
            }
            _ => {}
        }

        if size == width {
            return self.decode_element(c, endian);
        }

        let mut elements = Vec::with_capacity(size / width);
        for _ in 0..size / width {
            elements.push(self.decode_element(c, endian)?);
        }

        Ok(elements
            .iter()
            .any(Option::is_some)
            .then_some(Value::Array(elements)))
    }
}

/// A field value, converted to the widest primitive of its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    UInt(u64),
    SInt(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    /// Elements of an array field, with invalid elements left empty.
    Array(Vec<Option<Value>>),
}

impl Value {
    /// The value as a float, if it is a single number.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::UInt(x) => Some(x as f64),
            Self::SInt(x) => Some(x as f64),
            Self::Float(x) => Some(x),
            _ => None,
        }
    }

    /// The value as a signed integer, if it is a single integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::UInt(x) => i64::try_from(x).ok(),
            Self::SInt(x) => Some(x),
            _ => None,
        }
    }

    /// The value as an unsigned integer, if it is a single integer that fits.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Self::UInt(x) => Some(x),
            Self::SInt(x) => u64::try_from(x).ok(),
            _ => None,
        }
    }
}
