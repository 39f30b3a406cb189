#![no_std]

//! A forgiving decoder turning Garmin's Flexible and Interoperable Data
//! Transfer files into GPS tracks.
//!
//! Freewheel reads a fully materialized FIT document and extracts the ordered
//! positions it records, along with the activity's sport and start date. It is
//! built to be run over large archives of recordings, so a damaged file never
//! takes the process down: decoding stops at the first unreadable record and
//! hands back whatever was recovered up to that point.
//!
//! Most users should call [`decode`] or, to keep partial tracks from truncated
//! or corrupted files, [`decode_partial`]. See the [`avec`] module for details.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable reader-based decoding (default).
//! - `cli`: build the `freewheel` heatmap generator (default).

extern crate alloc;

pub mod avec;
mod sans;

pub use avec::{
    Decoded, Error, Sport, Track, TrackPoint, decode, decode_partial, fit_time,
    semicircles_to_degrees,
};
#[cfg(feature = "std")]
pub use avec::decode_reader;
pub use sans::check;
