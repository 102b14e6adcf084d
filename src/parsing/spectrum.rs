//! Parser for spectrum count files.
//!
//! A spectrum file is whitespace separated text. The first two values are the
//! acquisition start and end times in whole seconds, followed by one raw
//! count per channel, lowest energy first:
//!
//! ```text
//! 1000 1060
//! 0 0 3 12 45 130 ...
//! ```
//!
//! Counts are divided by the live time (`end - start`) so spectra recorded
//! over different durations can be compared. Gzip-compressed files (`.gz`)
//! are decompressed transparently.

use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;
use tracing::debug;

use crate::core::spectrum::Spectrum;
use crate::utils::validation::{is_valid_count, validate_bins, ValidationError};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing acquisition start and end times")]
    MissingTimes,

    #[error("Invalid acquisition time: '{0}'")]
    InvalidTime(String),

    #[error("Unable to normalise data, live time is {} seconds (start {start}, end {end})", .end - .start)]
    InvalidLiveTime { start: i64, end: i64 },

    #[error("Invalid count for channel {channel}: '{token}'")]
    InvalidCount { channel: usize, token: String },

    #[error("Negative count for channel {channel}")]
    NegativeCount { channel: usize },

    #[error("Not enough bins: expected {expected}, read {found} before end of data")]
    NotEnoughBins { expected: usize, found: usize },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Check if the path names a gzip-compressed file
#[must_use]
pub fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Read a spectrum file and normalise its first `bins` channels to counts per second
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or any error from
/// [`parse_spectrum_text`].
pub fn parse_spectrum_file(path: &Path, bins: usize) -> Result<Spectrum, ParseError> {
    let file = std::fs::File::open(path)?;

    let mut text = String::new();
    if is_gzipped(path) {
        GzDecoder::new(file).read_to_string(&mut text)?;
    } else {
        std::io::BufReader::new(file).read_to_string(&mut text)?;
    }

    let spectrum = parse_spectrum_text(&text, bins)?;
    Ok(spectrum.with_source(path.display().to_string()))
}

/// Parse spectrum text and normalise its first `bins` channels to counts per second
///
/// # Errors
///
/// Returns `ParseError::Validation` for zero or excessive `bins`,
/// `ParseError::MissingTimes` / `ParseError::InvalidTime` for a bad time
/// header, `ParseError::InvalidLiveTime` unless the end time is after the
/// start time, `ParseError::InvalidCount` / `ParseError::NegativeCount` for
/// unusable channel values, or `ParseError::NotEnoughBins` if the data ends
/// early.
pub fn parse_spectrum_text(text: &str, bins: usize) -> Result<Spectrum, ParseError> {
    let bins = validate_bins(bins)?;
    let mut tokens = text.split_whitespace();

    let start = parse_time(tokens.next())?;
    let end = parse_time(tokens.next())?;
    if end <= start {
        return Err(ParseError::InvalidLiveTime { start, end });
    }
    #[allow(clippy::cast_precision_loss)] // Acquisition times are far below 2^52 seconds
    let live_time = end.saturating_sub(start) as f64;

    let mut raw = Vec::with_capacity(bins);
    for (channel, token) in tokens.by_ref().take(bins).enumerate() {
        let count: f64 = token.parse().map_err(|_| ParseError::InvalidCount {
            channel,
            token: token.to_string(),
        })?;
        if !count.is_finite() {
            return Err(ParseError::InvalidCount {
                channel,
                token: token.to_string(),
            });
        }
        if !is_valid_count(count) {
            return Err(ParseError::NegativeCount { channel });
        }
        raw.push(count);
    }

    if raw.len() < bins {
        return Err(ParseError::NotEnoughBins {
            expected: bins,
            found: raw.len(),
        });
    }

    let ignored = tokens.count();
    if ignored > 0 {
        debug!("Ignoring {ignored} values after the first {bins} channels");
    }

    Ok(Spectrum::from_raw_counts(&raw, live_time))
}

fn parse_time(token: Option<&str>) -> Result<i64, ParseError> {
    let token = token.ok_or(ParseError::MissingTimes)?;
    token
        .parse()
        .map_err(|_| ParseError::InvalidTime(token.to_string()))
}
