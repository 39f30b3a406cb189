//! Slice-based decoder implementation.

use thiserror::Error;
use tracing::{debug, warn};

use crate::sans::{
    check::compute_crc,
    cursor::{Cursor, OutOfData},
    header::{DocumentHeader, DocumentHeaderError, RecordHeaderError},
    record::{RecordDecoder, RecordError},
};

use super::{Track, extract::Extractor};

/// Errors occurring while decoding a document.
///
/// Every error is scoped to the document being decoded. Records decoded before
/// the error still contribute to the [`Decoded`] track.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Unexpectedly reached the end of the data.
    #[error("Unexpectedly reached the end of the data.")]
    OutOfData,
    /// A data record referenced a local message type never defined before it.
    #[error("Undefined local message type ({0}).")]
    UndefinedMessageType(u8),
    /// A record header had reserved bits set.
    #[error("Malformed record header ({0:#04x}).")]
    MalformedHeader(u8),
    /// A definition record declared an unknown architecture.
    #[error("Unknown architecture ({0}).")]
    UnknownArchitecture(u8),
    /// Incorrect file header.
    #[error("Incorrect file header: {0}")]
    Header(#[from] DocumentHeaderError),
    /// Calculated and found CRC values do not match.
    #[error("Calculated ({calculated}) and found ({found}) CRC values do not match.")]
    CyclicRedundancyCheck { found: u16, calculated: u16 },
    /// The document decoded, but held no position on the globe.
    #[error("No usable track points.")]
    NoUsableTrackPoints,
}

impl From<OutOfData> for Error {
    fn from(_: OutOfData) -> Self {
        Self::OutOfData
    }
}

impl From<RecordError> for Error {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::OutOfData(_) => Self::OutOfData,
            RecordError::UndefinedMessageType(err) => Self::UndefinedMessageType(err.0),
            RecordError::Header(RecordHeaderError::Malformed(b)) => Self::MalformedHeader(b),
            RecordError::UnknownArchitecture(b) => Self::UnknownArchitecture(b),
        }
    }
}

/// The outcome of decoding a document: the track recovered, and the error
/// that stopped decoding early, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    track: Track,
    error: Option<Error>,
}

impl Decoded {
    /// The track recovered, which may be partial or empty.
    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn into_parts(self) -> (Track, Option<Error>) {
        (self.track, self.error)
    }

    /// Accept the track only if the whole document decoded.
    pub fn into_result(self) -> Result<Track, Error> {
        match self.error {
            Some(err) => Err(err),
            None if self.track.is_empty() => Err(Error::NoUsableTrackPoints),
            None => Ok(self.track),
        }
    }

    /// Accept the track if it holds any point, even if decoding stopped early.
    pub fn salvage(self) -> Result<Track, Error> {
        match self.error {
            _ if !self.track.is_empty() => Ok(self.track),
            Some(err) => Err(err),
            None => Err(Error::NoUsableTrackPoints),
        }
    }
}

/// Decode a document into a track, failing on any error.
///
/// This method is also re-exported as `freewheel::decode`.
pub fn decode(r: &[u8]) -> Result<Track, Error> {
    decode_partial(r).into_result()
}

/// Decode a document into a track, keeping what was recovered before any error.
///
/// Several documents may be chained in one slice; their points are collected
/// into a single track. Trailing bytes that do not begin a document are
/// ignored.
///
/// This method is also re-exported as `freewheel::decode_partial`.
#[tracing::instrument(level = "debug", skip_all, fields(len = r.len()))]
pub fn decode_partial(r: &[u8]) -> Decoded {
    let mut extractor = Extractor::default();
    let error = decode_documents(r, &mut extractor).err();

    if let Some(err) = &error {
        debug!(%err, points = extractor.points(), "decoding stopped early");
    }

    Decoded {
        track: extractor.finish(),
        error,
    }
}

fn decode_documents(r: &[u8], o: &mut Extractor) -> Result<(), Error> {
    let mut i = decode_document(r, o)?;

    while let Some(r) = r.get(i..).filter(|r| !r.is_empty()) {
        let mut c = Cursor::new(r);

        if !matches!(c.take::<12>().map(DocumentHeader::decode), Ok(Ok(_))) {
            debug!(trailing = r.len(), "ignored trailing bytes");
            break;
        }

        i += decode_document(r, o)?;
    }

    Ok(())
}

/// Decode a single document from the start of a slice, publishing its records
/// to an extractor. Returns the length of the document.
fn decode_document(r: &[u8], o: &mut Extractor) -> Result<usize, Error> {
    let c = &mut Cursor::new(r);

    let header = DocumentHeader::decode(c.take()?)?;
    c.skip(header.header_size as usize - DocumentHeader::SIZE)?;

    let start = c.position();
    let end = start.saturating_add(header.data_size as usize);

    // A truncated document still yields the records it holds.
    let records = r.get(start..end).or_else(|| r.get(start..)).unwrap_or_default();
    let mut decoder = RecordDecoder::new(records);

    while decoder.remaining() != 0 {
        let offset = start + decoder.position();

        match decoder.advance() {
            Ok(Some(record)) => o.add(&record),
            Ok(None) => {}
            Err(err) => {
                debug!(offset, %err, "unreadable record");
                Err(err)?
            }
        }
    }

    let found = u16::from_le_bytes(Cursor::new(r.get(end..).unwrap_or_default()).take()?);
    let calculated = compute_crc(0, r.get(..end).unwrap_or_default());

    if found != calculated {
        warn!(found, calculated, "CRC mismatch");
        Err(Error::CyclicRedundancyCheck { found, calculated })?;
    }

    Ok(end + 2)
}
