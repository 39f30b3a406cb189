//! Tracks, and the functions extracting them from FIT documents.
//!
//! A [`Track`] holds the positions of an activity in the order they were
//! recorded, converted from semicircles to degrees, along with the activity's
//! [`Sport`] and start date. Positions are taken from `record` messages, the
//! summary from `session` and `lap` messages. Every other message is stepped
//! over.
//!
//! # Partial results
//!
//! Decoding stops at the first record that cannot be read, since the layout of
//! anything after it is unknown. [`decode_partial`] returns a [`Decoded`]
//! holding both the points recovered up to that record and the error, and
//! leaves the choice of accepting a partial track to the caller:
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("fixtures/evening-ride.fit")?;
//! let track = freewheel::decode_partial(&data).salvage()?;
//! println!("{} points", track.points().len());
//! # Ok(())
//! # }
//! ```
//!
//! [`decode`] is the strict alternative, rejecting any document that did not
//! decode cleanly to at least one point.
//!
//! # Summary records
//!
//! A document may hold several summaries: one per lap, and one per session.
//! The sport and start date of a track are those of the last summary carrying
//! them. This is an assumption rather than a rule of the protocol, which does
//! not say which summary describes the activity as a whole; in practice devices
//! write the session after its laps. Without a summary start date, a track
//! starts when its document was created, or failing that at its first
//! timestamped point.

mod extract;
#[cfg(feature = "std")]
pub mod reader;
pub mod slice;
mod sport;
mod track;

#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use slice::{Decoded, Error, decode, decode_partial};
pub use sport::Sport;
pub use track::{FIT_EPOCH, Track, TrackPoint, fit_time, semicircles_to_degrees};

pub use crate::sans::header::DocumentHeaderError;
