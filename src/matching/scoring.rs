use serde::Serialize;

use crate::core::region::Region;
use crate::peaks::area::{even_width, peak_area, PeakAreaError};

/// Area comparison for one region
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeakScore {
    /// Reference peak area over the region
    pub reference_area: f64,

    /// Test peak area over the same channels
    pub test_area: f64,

    /// Share of the spectrum energy credited to this region, 0.0 when the
    /// areas disagree
    pub contribution: f64,
}

impl PeakScore {
    fn unmatched(reference_area: f64, test_area: f64) -> Self {
        Self {
            reference_area,
            test_area,
            contribution: 0.0,
        }
    }

    #[must_use]
    pub fn is_match(&self) -> bool {
        self.contribution > 0.0
    }
}

/// Score how well a test peak matches the reference peak over `region`.
///
/// Returns the reference peak's share of `spectrum_energy` when the test area
/// lies within `threshold` of the reference area, otherwise 0.0.
///
/// # Errors
///
/// Returns `PeakAreaError::WidthExceedsChannels` if the region runs past the
/// end of either spectrum.
pub fn match_peak(
    test: &[f64],
    reference: &[f64],
    region: &Region,
    spectrum_energy: f64,
    threshold: f64,
) -> Result<f64, PeakAreaError> {
    score_peak(test, reference, region, spectrum_energy, threshold).map(|s| s.contribution)
}

/// Detailed form of [`match_peak`] that also reports both peak areas.
///
/// The region width (`right - left`) is rounded up to an even channel count
/// and both spectra are integrated from `region.left`. The test area matches
/// when `lower / test <= 1` and `test / upper <= 1`, with
/// `lower = reference * (1 - threshold)` and `upper = reference * (1 + threshold)`.
/// Comparing ratios rather than differences keeps the tolerance independent
/// of peak magnitude.
///
/// # Errors
///
/// Returns `PeakAreaError::WidthExceedsChannels` if the region runs past the
/// end of either spectrum.
pub fn score_peak(
    test: &[f64],
    reference: &[f64],
    region: &Region,
    spectrum_energy: f64,
    threshold: f64,
) -> Result<PeakScore, PeakAreaError> {
    if spectrum_energy.abs() < f64::EPSILON {
        return Ok(PeakScore::unmatched(0.0, 0.0));
    }

    let width = even_width(region.span());
    let rpeak = peak_area(channels_from(reference, region.left, width)?, width)?;
    let tpeak = peak_area(channels_from(test, region.left, width)?, width)?;

    let lower = rpeak - rpeak * threshold;
    let upper = rpeak + rpeak * threshold;

    if tpeak.abs() <= f64::EPSILON || upper.abs() <= f64::EPSILON {
        return Ok(PeakScore::unmatched(rpeak, tpeak));
    }

    let above_lower = lower / tpeak <= 1.0 + f64::EPSILON;
    let below_upper = tpeak / upper <= 1.0 + f64::EPSILON;

    if above_lower && below_upper {
        Ok(PeakScore {
            reference_area: rpeak,
            test_area: tpeak,
            contribution: rpeak / spectrum_energy,
        })
    } else {
        Ok(PeakScore::unmatched(rpeak, tpeak))
    }
}

/// Channels from `left` onward, or `WidthExceedsChannels` when `left` is past the end.
fn channels_from(spectrum: &[f64], left: usize, width: usize) -> Result<&[f64], PeakAreaError> {
    spectrum
        .get(left..)
        .ok_or(PeakAreaError::WidthExceedsChannels {
            width,
            available: 0,
        })
}
