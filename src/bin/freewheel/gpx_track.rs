//! Tracks from GPX documents.

use std::io::Cursor;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use freewheel::{Track, TrackPoint};

/// Read every track segment of a GPX document into a single track.
///
/// The track starts at the document's metadata time if it has one.
pub fn read(data: &[u8]) -> Result<Track> {
    let gpx = gpx::read(Cursor::new(data)).context("parsing GPX")?;

    let start = gpx.metadata.as_ref().and_then(|m| m.time.clone()).and_then(time);

    let mut points = Vec::new();

    for waypoint in gpx
        .tracks
        .into_iter()
        .flat_map(|t| t.segments)
        .flat_map(|s| s.points)
    {
        let position = waypoint.point();

        let Some(point) = TrackPoint::new(position.y(), position.x()) else {
            continue;
        };

        points.push(
            point
                .with_timestamp(waypoint.time.and_then(time))
                .with_altitude(waypoint.elevation),
        );
    }

    Ok(Track::new(points, None, start))
}

fn time(t: gpx::Time) -> Option<DateTime<Utc>> {
    let t = t.format().ok()?;
    DateTime::parse_from_rfc3339(&t)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="freewheel" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>Evening walk</name>
    <trkseg>
      <trkpt lat="46.9480" lon="7.4474"><ele>540.0</ele><time>2022-06-01T18:00:00Z</time></trkpt>
      <trkpt lat="46.9490" lon="7.4480"><time>2022-06-01T18:00:10Z</time></trkpt>
    </trkseg>
    <trkseg>
      <trkpt lat="46.9500" lon="7.4490"></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

    #[test]
    fn reads_points_of_all_segments() {
        let track = read(DOCUMENT.as_bytes()).unwrap();

        assert_eq!(track.points().len(), 3);
        assert_eq!(track.points()[0].latitude(), 46.948);
        assert_eq!(track.points()[0].longitude(), 7.4474);
        assert_eq!(track.points()[0].altitude(), Some(540.0));
        assert_eq!(track.points()[2].timestamp(), None);
        assert_eq!(track.year(), Some(2022));
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(read(b"<gpx><trk>").is_err());
    }
}
