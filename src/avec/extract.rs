//! Folding data records into a track.

use alloc::vec::Vec;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::sans::{
    data::Value,
    profile::{MessageKind, Role},
    record::{DataRecord, DecodedField},
};

use super::{
    Sport, Track, TrackPoint,
    track::{fit_time, semicircles_to_degrees},
};

/// Accumulates the track of a document as its records are decoded.
///
/// Summary values (sport and start time) are taken from the last session or
/// lap record holding them. Sessions usually close a document, after the laps
/// they contain, so the activity's own summary tends to come last.
#[derive(Debug, Default)]
pub(super) struct Extractor {
    points: Vec<TrackPoint>,
    sport: Option<Sport>,
    start: Option<DateTime<Utc>>,
    time_created: Option<DateTime<Utc>>,
}

impl Extractor {
    pub fn add(&mut self, record: &DataRecord) {
        match record.kind {
            MessageKind::Record => self.add_point(record),
            MessageKind::FileId => {
                if let Some(t) = time(record, Role::TimeCreated) {
                    self.time_created = Some(t);
                }
            }
            kind if kind.is_summary() => self.add_summary(record),
            _ => {}
        }
    }

    fn add_point(&mut self, record: &DataRecord) {
        let lat = record.value(Role::Latitude).and_then(Value::as_i64);
        let long = record.value(Role::Longitude).and_then(Value::as_i64);

        // Points missing either coordinate have no place on a map.
        let (Some(lat), Some(long)) = (lat, long) else {
            return;
        };

        let (lat, long) = (semicircles_to_degrees(lat), semicircles_to_degrees(long));

        let Some(point) = TrackPoint::new(lat, long) else {
            debug!(lat, long, "dropped point off the globe");
            return;
        };

        let altitude = record
            .field(Role::EnhancedAltitude)
            .or_else(|| record.field(Role::Altitude))
            .and_then(DecodedField::scaled);

        self.points.push(
            point
                .with_timestamp(time(record, Role::Timestamp))
                .with_altitude(altitude),
        );
    }

    fn add_summary(&mut self, record: &DataRecord) {
        if let Some(sport) = record.value(Role::Sport).and_then(Value::as_u64) {
            self.sport = u8::try_from(sport).ok().map(Sport::from_value);
        }

        if let Some(t) = time(record, Role::StartTime) {
            self.start = Some(t);
        }
    }

    pub fn points(&self) -> usize {
        self.points.len()
    }

    pub fn finish(self) -> Track {
        Track::new(self.points, self.sport, self.start.or(self.time_created))
    }
}

fn time(record: &DataRecord, role: Role) -> Option<DateTime<Utc>> {
    let x = record.value(role).and_then(Value::as_u64)?;
    fit_time(u32::try_from(x).ok()?)
}
