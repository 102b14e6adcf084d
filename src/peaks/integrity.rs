//! Peak shape checks for interference and tampering.
//!
//! Samples can be disturbed by nearby sources, poor test conditions or
//! deliberate manipulation. An undisturbed photopeak is close to Gaussian,
//! whose width at a tenth of its height is about 1.82 times its width at
//! half height. A distorted peak pushes that ratio up.

use serde::Serialize;

use crate::core::region::Region;

/// Largest FWTM/FWHM ratio accepted as an undisturbed peak
pub const MAX_SHAPE_RATIO: f64 = 1.9;

/// Widths measured around a peak, in channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeakShape {
    /// Full width at half maximum
    pub fwhm: usize,
    /// Full width at tenth maximum
    pub fwtm: usize,
}

impl PeakShape {
    /// FWTM / FWHM, or None when the half-maximum width is zero.
    #[must_use]
    pub fn ratio(&self) -> Option<f64> {
        if self.fwhm == 0 {
            None
        } else {
            Some(count_to_f64(self.fwtm) / count_to_f64(self.fwhm))
        }
    }

    #[must_use]
    pub fn is_sound(&self) -> bool {
        self.ratio().is_some_and(|ratio| ratio <= MAX_SHAPE_RATIO)
    }
}

/// Outcome of inspecting one test peak
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeAssessment {
    /// Peak height is too small to measure; assumed undisturbed
    TooSmall,
    /// Peak widths were measured
    Measured(PeakShape),
}

impl ShapeAssessment {
    #[must_use]
    pub fn is_sound(&self) -> bool {
        match self {
            Self::TooSmall => true,
            Self::Measured(shape) => shape.is_sound(),
        }
    }

    /// Integrity score for `region`: its full width when sound, else 0.0.
    #[must_use]
    pub fn integrity(&self, region: &Region) -> f64 {
        if self.is_sound() {
            count_to_f64(region.full_width())
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn shape(&self) -> Option<PeakShape> {
        match self {
            Self::TooSmall => None,
            Self::Measured(shape) => Some(*shape),
        }
    }
}

/// Score the shape of a test peak.
///
/// Returns the region's full width (`right - left + 1`) when the peak is
/// undisturbed or too small to measure, and 0.0 otherwise. The score depends
/// only on shape, never on peak magnitude.
///
/// # Panics
///
/// Panics if `region.peak` is not a channel of `test`.
#[must_use]
pub fn peak_integrity(test: &[f64], region: &Region) -> f64 {
    assess_peak_shape(test, region).integrity(region)
}

/// Measure FWHM and FWTM of the test peak at `region.peak`.
///
/// Widths are found by stepping outward from the peak channel to the first
/// channel below the level on each side. A side that never drops below the
/// level stops one channel past the region boundary. The tenth-maximum walk
/// continues from where the half-maximum walk stopped.
///
/// # Panics
///
/// Panics if `region.peak` is not a channel of `test`. Regions from
/// [`find_regions`](crate::peaks::regions::find_regions) over a spectrum of
/// the same length always satisfy this.
#[must_use]
pub fn assess_peak_shape(test: &[f64], region: &Region) -> ShapeAssessment {
    let peak_height = test[region.peak];
    let half_max = peak_height / 2.0;
    let tenth_max = peak_height / 10.0;
    if half_max < f64::EPSILON || tenth_max < f64::EPSILON {
        return ShapeAssessment::TooSmall;
    }

    let left = to_signed(region.peak);
    let right = region.peak;

    let half_left = walk_left(test, left, region.left, half_max);
    let half_right = walk_right(test, right, region.right, half_max);
    let fwhm = width_between(half_left, half_right);

    let tenth_left = walk_left(test, half_left, region.left, tenth_max);
    let tenth_right = walk_right(test, half_right, region.right, tenth_max);
    let fwtm = width_between(tenth_left, tenth_right);

    ShapeAssessment::Measured(PeakShape { fwhm, fwtm })
}

/// Step left while channels stay at or above `level`, no further than one past `bound`.
fn walk_left(test: &[f64], from: isize, bound: usize, level: f64) -> isize {
    let bound = to_signed(bound);
    let mut i = from;
    while i >= bound && test[to_index(i)] >= level {
        i -= 1;
    }
    i
}

/// Step right while channels stay at or above `level`, no further than one past `bound`.
fn walk_right(test: &[f64], from: usize, bound: usize, level: f64) -> usize {
    let mut j = from;
    while j <= bound && j < test.len() && test[j] >= level {
        j += 1;
    }
    j
}

fn width_between(left: isize, right: usize) -> usize {
    to_index(to_signed(right) - left)
}

#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

#[inline]
fn to_signed(channel: usize) -> isize {
    #[allow(clippy::cast_possible_wrap)]
    {
        channel as isize
    }
}

#[inline]
fn to_index(value: isize) -> usize {
    #[allow(clippy::cast_sign_loss)]
    {
        value as usize
    }
}
