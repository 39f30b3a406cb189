//! Finding and reading activity files.

use std::{
    borrow::Cow,
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Fit,
    Gpx,
}

/// An activity file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub path: PathBuf,
    pub format: Format,
    /// Whether the file is gzipped.
    pub compressed: bool,
}

impl Activity {
    /// Recognize an activity file by its extension, ignoring case.
    pub fn classify(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();

        let (name, compressed) = match name.strip_suffix(".gz") {
            Some(name) => (name, true),
            None => (name.as_str(), false),
        };

        let format = if name.ends_with(".fit") {
            Format::Fit
        } else if name.ends_with(".gpx") {
            Format::Gpx
        } else {
            return None;
        };

        Some(Self {
            path: path.to_path_buf(),
            format,
            compressed,
        })
    }

    pub fn name(&self) -> Cow<'_, str> {
        match self.path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => self.path.to_string_lossy(),
        }
    }

    /// Read the whole file, inflating it if gzipped.
    pub fn read(&self) -> Result<Vec<u8>> {
        let file = File::open(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;

        let mut data = Vec::new();

        let read = if self.compressed {
            GzDecoder::new(BufReader::new(file)).read_to_end(&mut data)
        } else {
            BufReader::new(file).read_to_end(&mut data)
        };

        read.with_context(|| format!("reading {}", self.path.display()))?;

        Ok(data)
    }
}

/// Find every activity file below a directory, in path order.
pub fn find(dir: &Path) -> Result<Vec<Activity>> {
    let dir = dir
        .to_str()
        .with_context(|| format!("path is not valid UTF-8: {}", dir.display()))?;

    let pattern = format!("{}/**/*", glob::Pattern::escape(dir));

    let mut activities = Vec::new();

    for entry in glob::glob(&pattern)? {
        match entry {
            Ok(path) if path.is_file() => activities.extend(Activity::classify(&path)),
            Ok(_) => {}
            Err(err) => warn!("unreadable path: {err}"),
        }
    }

    activities.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(activities)
}
