//! Document and record headers.

use either::Either::{self, Left, Right};
use tartan_bitfield::bitfield;
use thiserror::Error;
use zerocopy::FromBytes;

/// An error decoding a document header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentHeaderError {
    /// Incorrect filetype marker.
    #[error("Incorrect file type marker.")]
    NotFitData,
    /// Unknown header length.
    #[error("Unknown header length ({0}).")]
    UnknownHeaderLength(u8),
}

/// The fixed leading bytes of a document.
#[derive(Debug, Clone, Copy)]
pub struct DocumentHeader {
    /// Bytes in the header, including any extension after the first twelve.
    pub header_size: u8,
    /// Bytes in the record section following the header.
    pub data_size: u32,
}

impl DocumentHeader {
    /// Length of the common part of every document header.
    pub const SIZE: usize = 12;

    /// Decode the common part of a document header.
    ///
    /// An extended header carries `header_size - SIZE` further bytes (a header
    /// checksum) which the caller should skip.
    pub fn decode(r: [u8; 12]) -> Result<Self, DocumentHeaderError> {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct FileHeader {
            header_size: u8,
            protocol_version: u8,
            profile_version: u16,
            data_size: u32,
            data_type: [u8; 4],
        }

        let FileHeader {
            header_size,
            data_size,
            data_type,
            ..
        } = zerocopy::transmute!(r);

        if &data_type != b".FIT" {
            Err(DocumentHeaderError::NotFitData)?;
        }

        if header_size != 12 && header_size != 14 {
            Err(DocumentHeaderError::UnknownHeaderLength(header_size))?;
        }

        Ok(Self {
            header_size,
            // Stored little endian regardless of the architecture of records.
            data_size: u32::from_le(data_size),
        })
    }
}

/// An error decoding a record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecordHeaderError {
    /// Reserved bits were set.
    #[error("Malformed record header ({0:#04x}).")]
    Malformed(u8),
}

/// A record header introducing a definition record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefinitionHeader {
    /// Whether developer field descriptions follow the standard ones.
    pub has_developer_fields: bool,
}

/// A record header introducing a data record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataHeader {
    /// The low five bits of the record's timestamp, for compressed headers.
    pub time_offset: Option<u8>,
}

/// Decode a record header.
///
/// Returns the local message type, and the kind of record that follows.
pub fn decode_record_header(
    r: [u8; 1],
) -> Result<(u8, Either<DefinitionHeader, DataHeader>), RecordHeaderError> {
    let r = r[0];

    bitfield! {
        struct RecordHeader(u8) {
            [7] is_compressed,
        }
    }

    if RecordHeader(r).is_compressed() {
        bitfield! {
            struct CompressedHeader(u8) {
                [0..5] time_offset: u8,
                [5..7] local_message: u8,
            }
        }

        let header = CompressedHeader(r);

        let successor = Right(DataHeader {
            time_offset: Some(header.time_offset()),
        });

        Ok((header.local_message(), successor))
    } else {
        bitfield! {
            struct NormalHeader(u8) {
                [0..4] local_message: u8,
                [4] is_reserved,
                [5] is_developer,
                [6] is_definition,
            }
        }

        let header = NormalHeader(r);

        if header.is_reserved() || (header.is_developer() && !header.is_definition()) {
            Err(RecordHeaderError::Malformed(r))?;
        }

        let successor = if header.is_definition() {
            Left(DefinitionHeader {
                has_developer_fields: header.is_developer(),
            })
        } else {
            Right(DataHeader { time_offset: None })
        };

        Ok((header.local_message(), successor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_header_rejects_foreign_data() {
        let mut r = *b"\x0e\x20\x00\x00\x10\x00\x00\x00.FIT";
        assert_eq!(DocumentHeader::decode(r).map(|h| h.data_size), Ok(16));

        r[8..].copy_from_slice(b".GPX");
        assert_eq!(
            DocumentHeader::decode(r).map(|h| h.data_size),
            Err(DocumentHeaderError::NotFitData)
        );

        r[8..].copy_from_slice(b".FIT");
        r[0] = 13;
        assert_eq!(
            DocumentHeader::decode(r).map(|h| h.data_size),
            Err(DocumentHeaderError::UnknownHeaderLength(13))
        );
    }

    #[test]
    fn normal_headers() {
        assert_eq!(
            decode_record_header([0x43]),
            Ok((
                3,
                Left(DefinitionHeader {
                    has_developer_fields: false
                })
            ))
        );
        assert_eq!(
            decode_record_header([0x6F]),
            Ok((
                15,
                Left(DefinitionHeader {
                    has_developer_fields: true
                })
            ))
        );
        assert_eq!(
            decode_record_header([0x02]),
            Ok((2, Right(DataHeader { time_offset: None })))
        );
    }

    #[test]
    fn compressed_timestamp_header() {
        // Local type 2, offset 17.
        assert_eq!(
            decode_record_header([0b1101_0001]),
            Ok((
                2,
                Right(DataHeader {
                    time_offset: Some(17)
                })
            ))
        );
    }

    #[test]
    fn reserved_bits_are_malformed() {
        assert_eq!(
            decode_record_header([0x10]),
            Err(RecordHeaderError::Malformed(0x10))
        );
        assert_eq!(
            decode_record_header([0x21]),
            Err(RecordHeaderError::Malformed(0x21))
        );
    }
}
