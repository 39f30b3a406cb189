//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::{io::Read, vec::Vec};

use super::slice::{Decoded, decode_partial};

extern crate std;

/// Read a document to its end, then decode it into a track, keeping what was
/// recovered before any decoding error.
///
/// Only errors from the reader itself are returned as errors.
///
/// This method is also re-exported as `freewheel::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(r: &mut impl Read) -> Result<Decoded, std::io::Error> {
    let mut buf = Vec::new();
    r.read_to_end(&mut buf)?;

    Ok(decode_partial(&buf))
}
