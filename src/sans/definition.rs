//! Definition records, and the table of definitions active in a document.

use alloc::vec::Vec;

use thiserror::Error;
use zerocopy::FromBytes;

use super::{
    cursor::{Cursor, Endian, OutOfData},
    data::BaseType,
    header::DefinitionHeader,
    profile::{FieldProfile, MessageKind, field_profile},
};

/// An error decoding a definition record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// Unexpectedly reached the end of the data.
    #[error(transparent)]
    OutOfData(#[from] OutOfData),
    /// Architecture byte was neither little nor big endian.
    #[error("Unknown architecture ({0}).")]
    UnknownArchitecture(u8),
}

/// A data record referenced a local message type with no definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Undefined local message type ({0}).")]
pub struct UndefinedMessageType(pub u8);

/// How to read one field of a data record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub number: u8,
    /// Bytes occupied by the field in each data record.
    pub size: u8,
    pub base_type: BaseType,
    pub endian: Endian,
    /// Meaning of the field, if it matters to a track.
    pub profile: Option<FieldProfile>,
}

/// The layout of data records for a local message type.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDefinition {
    pub global: u16,
    pub kind: MessageKind,
    pub endian: Endian,
    /// Standard fields, in the order they appear in data records.
    pub fields: Vec<FieldDefinition>,
    /// Bytes of developer fields following the standard fields.
    pub developer_size: usize,
}

#[repr(C, packed)]
#[derive(Debug, FromBytes)]
struct DefinitionMessage {
    _reserved: u8,
    architecture: u8,
    global_message: [u8; 2],
    fields: u8,
}

// Developer field descriptions share this layout, with the developer data
// index in place of the base type.
#[repr(C, packed)]
#[derive(Debug, FromBytes)]
struct FieldHeader {
    field: u8,
    size: u8,
    base_type: u8,
}

impl MessageDefinition {
    /// Decode the body of a definition record.
    pub fn decode(c: &mut Cursor, header: DefinitionHeader) -> Result<Self, DefinitionError> {
        let DefinitionMessage {
            architecture,
            global_message,
            fields,
            ..
        } = zerocopy::transmute!(c.take::<5>()?);

        let (endian, global) = match architecture {
            0 => (Endian::Little, u16::from_le_bytes(global_message)),
            1 => (Endian::Big, u16::from_be_bytes(global_message)),
            _ => Err(DefinitionError::UnknownArchitecture(architecture))?,
        };

        let kind = MessageKind::from_global(global);

        let fields = (0..fields)
            .map(|_| {
                let FieldHeader {
                    field,
                    size,
                    base_type,
                } = zerocopy::transmute!(c.take::<3>()?);

                Ok(FieldDefinition {
                    number: field,
                    size,
                    base_type: BaseType::from_byte(base_type),
                    endian,
                    profile: field_profile(kind, field),
                })
            })
            .collect::<Result<Vec<_>, OutOfData>>()?;

        let mut developer_size = 0;

        if header.has_developer_fields {
            let [count] = c.take::<1>()?;

            for _ in 0..count {
                let FieldHeader { size, .. } = zerocopy::transmute!(c.take::<3>()?);
                developer_size += size as usize;
            }
        }

        Ok(Self {
            global,
            kind,
            endian,
            fields,
            developer_size,
        })
    }

    /// Total bytes of a data record body using this definition.
    pub fn data_size(&self) -> usize {
        let standard: usize = self.fields.iter().map(|f| f.size as usize).sum();
        standard + self.developer_size
    }
}

/// The definitions currently active for each local message type.
///
/// A document may redefine a local message type at any point; the newest
/// definition always replaces the previous one.
#[derive(Debug, Default)]
pub struct DefinitionTable {
    definitions: [Option<MessageDefinition>; 16],
}

impl DefinitionTable {
    /// Register a definition, returning the one it replaced.
    pub fn define(
        &mut self,
        local: u8,
        definition: MessageDefinition,
    ) -> Option<MessageDefinition> {
        self.definitions[(local & 0x0F) as usize].replace(definition)
    }

    /// Find the active definition for a local message type.
    pub fn lookup(&self, local: u8) -> Result<&MessageDefinition, UndefinedMessageType> {
        self.definitions[(local & 0x0F) as usize]
            .as_ref()
            .ok_or(UndefinedMessageType(local))
    }
}
