//! Render a heatmap of every GPS track found under a directory.

mod discover;
mod gpx_track;
mod render;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result, bail, ensure};
use clap::Parser;
use freewheel::Track;
use rayon::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use discover::{Activity, Format};

/// Collect the tracks of FIT and GPX activity files into a single heatmap.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Directory searched recursively for `.fit` and `.gpx` files, optionally
    /// gzipped.
    #[arg(default_value = "activities")]
    input: PathBuf,
    /// Path of the generated HTML page.
    #[arg(short, long, default_value = "heatmap.html")]
    output: PathBuf,
    /// Only include activities started in this year.
    #[arg(short, long)]
    year: Option<i32>,
    /// Keep the points recovered from FIT files that could not be fully
    /// decoded.
    #[arg(long)]
    partial: bool,
    /// Log decoding details. `RUST_LOG` takes precedence.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    ensure!(
        args.input.is_dir(),
        "input folder not found: {}",
        args.input.display()
    );

    let activities = discover::find(&args.input)?;

    if activities.is_empty() {
        bail!("no .fit or .gpx files found in {}", args.input.display());
    }

    let total = activities.len();
    info!("processing {total} activity files");

    let tracks: Vec<Track> = activities
        .par_iter()
        .enumerate()
        .filter_map(|(i, activity)| {
            info!("processing file {}/{total}: {}", i + 1, activity.name());

            match load(activity, args.partial) {
                Ok(track) => Some(track),
                Err(err) => {
                    warn!(path = %activity.path.display(), "skipped: {err:#}");
                    None
                }
            }
        })
        .collect();

    let tracks = filter_year(tracks, args.year);

    let points: Vec<[f64; 2]> = tracks
        .iter()
        .flat_map(Track::points)
        .map(|p| [p.latitude(), p.longitude()])
        .collect();

    ensure!(
        !points.is_empty(),
        "zero track points were extracted; check the files for corruption"
    );

    info!(
        tracks = tracks.len(),
        points = points.len(),
        "extracted track points"
    );

    let page = render::heatmap(&points)?;
    fs::write(&args.output, page)
        .with_context(|| format!("writing {}", args.output.display()))?;

    info!("heatmap saved to {}", args.output.display());

    Ok(())
}

/// Decode one activity file into a track.
fn load(activity: &Activity, partial: bool) -> Result<Track> {
    let data = activity.read()?;

    let track = match activity.format {
        Format::Fit => {
            let decoded = freewheel::decode_partial(&data);

            if partial {
                if let (Some(err), false) = (decoded.error(), decoded.track().is_empty()) {
                    warn!(
                        path = %activity.path.display(),
                        points = decoded.track().points().len(),
                        "kept partial track: {err}"
                    );
                }

                decoded.salvage()?
            } else {
                decoded.into_result()?
            }
        }
        Format::Gpx => {
            let track = gpx_track::read(&data)?;
            ensure!(!track.is_empty(), freewheel::Error::NoUsableTrackPoints);
            track
        }
    };

    Ok(track)
}

/// Keep the tracks started in `year`, or all tracks without a year.
///
/// Tracks with no known start date cannot be placed in a year, and are dropped
/// when filtering.
fn filter_year(tracks: Vec<Track>, year: Option<i32>) -> Vec<Track> {
    let Some(year) = year else {
        return tracks;
    };

    let total = tracks.len();
    let tracks: Vec<Track> = tracks
        .into_iter()
        .filter(|t| t.year() == Some(year))
        .collect();

    info!("{} of {total} tracks started in {year}", tracks.len());

    tracks
}

#[cfg(test)]
mod tests {
    use freewheel::{TrackPoint, fit_time};

    use super::*;

    fn track(start: Option<u32>) -> Track {
        let point = TrackPoint::new(47.0, 8.0).unwrap();
        Track::new(vec![point], None, start.and_then(fit_time))
    }

    #[test]
    fn year_filter_keeps_matching_tracks() {
        // 2021-09-08 and 2023-11-14.
        let tracks = vec![track(Some(1_000_000_000)), track(Some(1_068_934_400)), track(None)];

        let kept = filter_year(tracks.clone(), Some(2021));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].year(), Some(2021));

        assert_eq!(filter_year(tracks, None).len(), 3);
    }
}
