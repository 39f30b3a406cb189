//! Record-by-record decoding of a record section.

use alloc::vec::Vec;

use either::Either::{Left, Right};
use thiserror::Error;
use tracing::{debug, trace};

use super::{
    cursor::{Cursor, OutOfData},
    data::Value,
    definition::{DefinitionError, DefinitionTable, MessageDefinition, UndefinedMessageType},
    header::{DataHeader, RecordHeaderError, decode_record_header},
    profile::{FieldProfile, MessageKind, Role, TIMESTAMP_FIELD, field_profile},
};

/// An error decoding a record. Decoding cannot continue after any of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error(transparent)]
    OutOfData(#[from] OutOfData),
    #[error(transparent)]
    UndefinedMessageType(#[from] UndefinedMessageType),
    #[error(transparent)]
    Header(#[from] RecordHeaderError),
    #[error("Unknown architecture ({0}).")]
    UnknownArchitecture(u8),
}

impl From<DefinitionError> for RecordError {
    fn from(err: DefinitionError) -> Self {
        match err {
            DefinitionError::OutOfData(err) => Self::OutOfData(err),
            DefinitionError::UnknownArchitecture(b) => Self::UnknownArchitecture(b),
        }
    }
}

/// A field of a data record.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedField {
    pub number: u8,
    pub profile: Option<FieldProfile>,
    /// The stored value, or `None` if the field held its 'invalid' marker.
    pub value: Option<Value>,
}

impl DecodedField {
    pub fn role(&self) -> Option<Role> {
        self.profile.map(|p| p.role)
    }

    /// The value with its profile's scale and offset applied.
    pub fn scaled(&self) -> Option<f64> {
        let x = self.value.as_ref()?.as_f64()?;
        Some(match self.profile {
            Some(profile) => profile.apply(x),
            None => x,
        })
    }
}

/// A data record of a message in the profile.
#[derive(Debug, Clone, PartialEq)]
pub struct DataRecord {
    pub local: u8,
    pub kind: MessageKind,
    /// Fields in definition order. A timestamp reconstructed from a compressed
    /// header fills the declared timestamp field, or is appended last.
    pub fields: Vec<DecodedField>,
}

impl DataRecord {
    /// The first field playing a role and holding a value.
    pub fn field(&self, role: Role) -> Option<&DecodedField> {
        self.fields
            .iter()
            .find(|f| f.role() == Some(role) && f.value.is_some())
    }

    /// The raw value of the first field playing a role.
    pub fn value(&self, role: Role) -> Option<&Value> {
        self.field(role)?.value.as_ref()
    }
}

/// Decoder for the records of a single document.
///
/// Holds the definitions seen so far and the last full timestamp, against
/// which compressed timestamps are expanded.
#[derive(Debug)]
pub struct RecordDecoder<'a> {
    cursor: Cursor<'a>,
    definitions: DefinitionTable,
    last_timestamp: Option<u32>,
}

impl<'a> RecordDecoder<'a> {
    /// Start decoding a record section, excluding document header and CRC.
    pub fn new(r: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(r),
            definitions: DefinitionTable::default(),
            last_timestamp: None,
        }
    }

    /// Bytes of the record section not yet decoded.
    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    /// Offset into the record section of the next record.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Decode the next record.
    ///
    /// Returns the record if it is a data record of a message in the profile.
    /// Definition records and data records of opaque messages are consumed
    /// without producing anything.
    pub fn advance(&mut self) -> Result<Option<DataRecord>, RecordError> {
        let (local, successor) = decode_record_header(self.cursor.take()?)?;

        match successor {
            Left(header) => {
                let definition = MessageDefinition::decode(&mut self.cursor, header)?;
                let global = definition.global;

                if let Some(previous) = self.definitions.define(local, definition) {
                    trace!(local, global, previous = previous.global, "redefined local message");
                }

                Ok(None)
            }
            Right(header) => self.decode_data(local, header),
        }
    }

    fn decode_data(
        &mut self,
        local: u8,
        header: DataHeader,
    ) -> Result<Option<DataRecord>, RecordError> {
        let definition = self.definitions.lookup(local)?;
        let kind = definition.kind;

        // Take the whole record up front, so it is consumed entirely or not at all.
        let c = &mut Cursor::new(self.cursor.slice(definition.data_size())?);

        let mut fields = Vec::new();
        let mut timestamp = None;

        for field in &definition.fields {
            let size = field.size as usize;

            if field.profile.is_none() && matches!(kind, MessageKind::Opaque(_)) {
                c.skip(size)?;
                continue;
            }

            let value = field.base_type.decode(c, size, field.endian)?;

            if field.profile.map(|p| p.role) == Some(Role::Timestamp) {
                timestamp = value
                    .as_ref()
                    .and_then(Value::as_u64)
                    .and_then(|x| u32::try_from(x).ok());
            }

            fields.push(DecodedField {
                number: field.number,
                profile: field.profile,
                value,
            });
        }

        match (timestamp, header.time_offset) {
            (Some(timestamp), _) => self.last_timestamp = Some(timestamp),
            (None, Some(offset)) => match self.last_timestamp {
                Some(last) => {
                    let timestamp = expand_time_offset(last, offset);
                    self.last_timestamp = Some(timestamp);

                    let value = Some(Value::UInt(timestamp as u64));

                    match fields.iter_mut().find(|f| f.number == TIMESTAMP_FIELD) {
                        Some(field) => field.value = value,
                        None => fields.push(DecodedField {
                            number: TIMESTAMP_FIELD,
                            profile: field_profile(kind, TIMESTAMP_FIELD),
                            value,
                        }),
                    }
                }
                None => debug!(local, offset, "compressed timestamp with no reference"),
            },
            (None, None) => {}
        }

        if let MessageKind::Opaque(global) = kind {
            trace!(local, global, "skipped opaque record");
            return Ok(None);
        }

        Ok(Some(DataRecord {
            local,
            kind,
            fields,
        }))
    }
}

/// Reconstruct a timestamp from the five-bit offset of a compressed header.
///
/// The offset replaces the low five bits of the last full timestamp, rolling
/// over into the next 32-second window if it is smaller than them.
fn expand_time_offset(last: u32, offset: u8) -> u32 {
    let offset = (offset & 0x1F) as u32;
    let mut timestamp = (last & !0x1F).wrapping_add(offset);

    if offset < last & 0x1F {
        timestamp = timestamp.wrapping_add(0x20);
    }

    timestamp
}
