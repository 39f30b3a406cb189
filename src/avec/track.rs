//! Tracks and the points they are made of.

use alloc::vec::Vec;

use chrono::{DateTime, Datelike, Utc};

use super::Sport;

/// Seconds from the Unix epoch to the FIT epoch, 1989-12-31T00:00:00Z.
pub const FIT_EPOCH: i64 = 631_065_600;

/// Degrees per semicircle, FIT's native angular unit.
const DEGREES_PER_SEMICIRCLE: f64 = 180.0 / 2_147_483_648.0;

/// Convert an angle in semicircles to degrees.
pub fn semicircles_to_degrees(x: i64) -> f64 {
    x as f64 * DEGREES_PER_SEMICIRCLE
}

/// Convert seconds since the FIT epoch to a point in time.
pub fn fit_time(x: u32) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(FIT_EPOCH + x as i64, 0)
}

/// A position recorded during an activity.
///
/// Points only exist on the globe: latitude within `-90.0..=90.0` and
/// longitude within `-180.0..=180.0` degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    latitude: f64,
    longitude: f64,
    timestamp: Option<DateTime<Utc>>,
    altitude: Option<f64>,
}

impl TrackPoint {
    /// Create a point at a position, if the position is on the globe.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let on_globe =
            (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);

        on_globe.then_some(Self {
            latitude,
            longitude,
            timestamp: None,
            altitude: None,
        })
    }

    pub fn with_timestamp(self, timestamp: Option<DateTime<Utc>>) -> Self {
        Self { timestamp, ..self }
    }

    /// Set the altitude, in metres above sea level. Non-finite values are
    /// treated as unknown.
    pub fn with_altitude(self, altitude: Option<f64>) -> Self {
        Self {
            altitude: altitude.filter(|x| x.is_finite()),
            ..self
        }
    }

    /// Degrees north.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Degrees east.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// Metres above sea level.
    pub fn altitude(&self) -> Option<f64> {
        self.altitude
    }
}

/// The positions and summary of one activity, in recorded order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    points: Vec<TrackPoint>,
    sport: Option<Sport>,
    start: Option<DateTime<Utc>>,
}

impl Track {
    /// Assemble a track. Without an explicit start, the track starts at its
    /// first timestamped point.
    pub fn new(
        points: Vec<TrackPoint>,
        sport: Option<Sport>,
        start: Option<DateTime<Utc>>,
    ) -> Self {
        let start = start.or_else(|| points.iter().find_map(|p| p.timestamp));

        Self {
            points,
            sport,
            start,
        }
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<TrackPoint> {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn sport(&self) -> Option<Sport> {
        self.sport
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    /// Calendar year in which the activity started.
    pub fn year(&self) -> Option<i32> {
        self.start.map(|t| t.year())
    }
}
