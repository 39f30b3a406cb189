//! Record-level machinery for decoding FIT documents.
//!
//! Nothing in this module knows what a track is. It turns a byte slice into a
//! sequence of data records, each a list of decoded fields annotated with the
//! semantic role they play (if any), and leaves their interpretation to
//! [`crate::avec`].
//!
//! # Architecture
//!
//! A [`cursor::Cursor`] walks the record section of a document. The
//! [`record::RecordDecoder`] reads one record header at a time, and:
//!
//! - for definition records, builds a [`definition::MessageDefinition`] and
//! registers it in the [`definition::DefinitionTable`] under its local message
//! type, replacing any earlier definition for that type;
//!
//! - for data records, looks up the definition for the record's local message
//! type and reads each field with the width, base type and byte order it
//! declares. Records of messages without a [`profile`] entry are stepped over
//! by their total size without being inspected.
//!
//! Every record is consumed whole or not at all: a failure leaves the cursor in
//! an unspecified position, and the document cannot be decoded further.

pub mod check;
pub mod cursor;
pub mod data;
pub mod definition;
pub mod header;
pub mod profile;
pub mod record;
