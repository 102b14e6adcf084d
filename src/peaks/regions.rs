//! Region-of-interest search over a reference spectrum.
//!
//! Peaks are located with a smoothed second-difference search: the
//! background-subtracted reference is differenced to estimate curvature,
//! the curvature is box-smoothed several times, and the smoothed curve is
//! scanned for alternating minima and maxima. Each minimum becomes a region
//! boundary and each maximum a peak channel.

use std::collections::TryReserveError;

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::region::RegionList;

/// Number of box-smoothing passes applied to the curvature estimate
pub const SMOOTHING_ROUNDS: usize = 5;

/// Channels summed per smoothing pass
pub const SMOOTHING_WINDOW: usize = 7;

/// Channels lost from the curvature estimate by each smoothing pass
const SHRINK_PER_ROUND: usize = SMOOTHING_WINDOW - 1;

/// Offset from a smoothed index back to the spectrum channel it describes
const CHANNEL_OFFSET: usize = SMOOTHING_ROUNDS * (SHRINK_PER_ROUND / 2);

/// Smallest spectrum for which the boundary scan is defined.
///
/// The smoothed curve holds `bins - 30` values and the scan compares each
/// of the first `bins - 33` with its successor before checking the closing
/// boundary, so at least 33 channels are needed.
pub const MIN_REGION_BINS: usize = SMOOTHING_ROUNDS * SHRINK_PER_ROUND + 3;

#[derive(Error, Debug)]
pub enum RegionError {
    #[error("failed to allocate region working buffer: {0}")]
    ResourceExhaustion(#[from] TryReserveError),
}

/// Find candidate photopeak regions in a reference spectrum.
///
/// `background` is subtracted from `reference` before the curvature is
/// estimated; `None` means no background. Only the first `bins` channels of
/// each spectrum are read, and both must hold at least that many.
///
/// Spectra shorter than [`MIN_REGION_BINS`] produce an empty list, as do
/// inputs holding fewer than `bins` channels.
///
/// # Errors
///
/// Returns `RegionError::ResourceExhaustion` if the working buffer or the
/// region map cannot be allocated.
pub fn find_regions(
    reference: &[f64],
    background: Option<&[f64]>,
    bins: usize,
) -> Result<RegionList, RegionError> {
    if bins < MIN_REGION_BINS {
        warn!(
            "{bins} bins is too few to locate peaks (minimum {MIN_REGION_BINS}), no regions found"
        );
        return Ok(RegionList::new());
    }

    let available = background.map_or(reference.len(), |b| reference.len().min(b.len()));
    if available < bins {
        warn!("Spectra hold {available} channels, fewer than {bins} bins, no regions found");
        return Ok(RegionList::new());
    }

    let mut arena: Vec<f64> = Vec::new();
    arena.try_reserve_exact(bins)?;
    arena.resize(bins, 0.0);

    estimate_curvature(&reference[..bins], background.map(|b| &b[..bins]), &mut arena);

    let mut len = bins;
    for _ in 0..SMOOTHING_ROUNDS {
        len = smooth_in_place(&mut arena[..len]);
    }

    // Worst case every scanned channel is a turning point, plus the closing boundary
    let scan_len = bins - MIN_REGION_BINS;
    let mut regions = RegionList::try_with_capacity(scan_len + 1)?;
    scan_boundaries(&arena[..len], scan_len, &mut regions);

    debug!(
        "Region map is (min, max, min, max,...,min): {:?}",
        regions.boundaries()
    );

    Ok(regions)
}

/// Second difference of the background-subtracted reference.
///
/// Entry `j` describes the curvature around channel `j + 1`. The last two
/// entries have no neighbour on the right and stay at zero.
fn estimate_curvature(reference: &[f64], background: Option<&[f64]>, out: &mut [f64]) {
    let net = |j: usize| reference[j] - background.map_or(0.0, |b| b[j]);

    for j in 0..reference.len().saturating_sub(2) {
        out[j] = 2.0 * net(j + 1) - net(j) - net(j + 2);
    }
}

/// One box-smoothing pass, written over the front of the buffer.
///
/// Element `k` becomes the sum of elements `k..k + SMOOTHING_WINDOW`. Each
/// output only reads inputs at or after its own index, so the pass can
/// overwrite the buffer front to back. Returns the new length.
fn smooth_in_place(values: &mut [f64]) -> usize {
    let out_len = values.len() - SHRINK_PER_ROUND;
    for k in 0..out_len {
        let window_sum: f64 = values[k..k + SMOOTHING_WINDOW].iter().sum();
        values[k] = window_sum;
    }
    out_len
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Seek {
    Minimum,
    Maximum,
}

/// Walk the smoothed curve recording alternating minima and maxima.
fn scan_boundaries(smoothed: &[f64], scan_len: usize, regions: &mut RegionList) {
    let mut seeking = Seek::Minimum;

    for i in 0..scan_len {
        let turning = match seeking {
            Seek::Minimum => smoothed[i] < smoothed[i + 1],
            Seek::Maximum => smoothed[i] > smoothed[i + 1],
        };
        if turning {
            regions.push(i + CHANNEL_OFFSET);
            seeking = match seeking {
                Seek::Minimum => Seek::Maximum,
                Seek::Maximum => Seek::Minimum,
            };
        }
    }

    // Still falling at the end of the scan: close the last region there
    if seeking == Seek::Minimum && smoothed[scan_len] > smoothed[scan_len + 1] {
        regions.push(scan_len + CHANNEL_OFFSET);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::region::Region;

    fn gaussian(bins: usize, center: f64, sigma: f64, amplitude: f64) -> Vec<f64> {
        (0..bins)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let x = i as f64 - center;
                amplitude * (-(x * x) / (2.0 * sigma * sigma)).exp()
            })
            .collect()
    }

    #[test]
    fn test_constants() {
        assert_eq!(SMOOTHING_ROUNDS, 5);
        assert_eq!(SMOOTHING_WINDOW, 7);
        assert_eq!(CHANNEL_OFFSET, 15);
        assert_eq!(MIN_REGION_BINS, 33);
    }

    #[test]
    fn test_single_peak_yields_one_region() {
        let reference = gaussian(100, 50.0, 3.0, 1000.0);
        let regions = find_regions(&reference, None, 100).unwrap();

        assert_eq!(regions.len(), 1);
        let region = regions.regions().next().unwrap();
        assert!(region.peak.abs_diff(50) <= 1, "peak at {}", region.peak);
        assert!(region.left < region.peak && region.peak < region.right);
        assert_eq!(region, Region::new(39, 49, 59));
    }

    #[test]
    fn test_background_is_subtracted() {
        let peak = gaussian(100, 50.0, 3.0, 1000.0);
        let background = vec![25.0; 100];
        let reference: Vec<f64> = peak.iter().zip(&background).map(|(p, b)| p + b).collect();

        let with_background = find_regions(&reference, Some(&background), 100).unwrap();
        let without = find_regions(&peak, None, 100).unwrap();
        assert_eq!(with_background, without);
    }

    #[test]
    fn test_two_peaks_share_a_boundary() {
        let reference: Vec<f64> = gaussian(200, 60.0, 3.0, 1000.0)
            .into_iter()
            .zip(gaussian(200, 130.0, 4.0, 600.0))
            .map(|(a, b)| a + b)
            .collect();

        let regions = find_regions(&reference, None, 200).unwrap();
        let found: Vec<Region> = regions.regions().collect();

        assert_eq!(regions.boundaries().len() % 2, 1);
        assert!(found.iter().any(|r| r.peak.abs_diff(60) <= 1));
        assert!(found.iter().any(|r| r.peak.abs_diff(130) <= 1));
        for pair in found.windows(2) {
            assert_eq!(pair[0].right, pair[1].left);
        }
    }

    #[test]
    fn test_flat_spectrum_has_no_regions() {
        let reference = vec![10.0; 64];
        let regions = find_regions(&reference, None, 64).unwrap();
        assert!(regions.is_empty());
        assert!(regions.boundaries().is_empty());
    }

    #[test]
    fn test_too_few_bins() {
        let reference = gaussian(32, 16.0, 2.0, 100.0);
        let regions = find_regions(&reference, None, 32).unwrap();
        assert!(regions.is_empty());
    }

    #[test]
    fn test_short_input_finds_nothing() {
        let reference = gaussian(100, 50.0, 3.0, 1000.0);
        let background = vec![0.0; 60];

        assert!(find_regions(&reference[..80], None, 100).unwrap().is_empty());
        assert!(find_regions(&reference, Some(&background), 100)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_minimum_bins_scans() {
        let reference = vec![1.0; MIN_REGION_BINS];
        assert!(find_regions(&reference, None, MIN_REGION_BINS).is_ok());
    }

    #[test]
    fn test_boundaries_stay_inside_spectrum() {
        let reference = gaussian(40, 20.0, 2.0, 100.0);
        let regions = find_regions(&reference, None, 40).unwrap();

        assert_eq!(regions.boundaries(), &[15, 19, 22]);
        assert!(regions.boundaries().iter().all(|&c| c < 40));
    }

    #[test]
    fn test_smooth_in_place_sums_window() {
        let mut values: Vec<f64> = (0..10_u32).map(f64::from).collect();
        let len = smooth_in_place(&mut values);

        assert_eq!(len, 4);
        assert_eq!(&values[..len], &[21.0, 28.0, 35.0, 42.0]);
    }

    #[test]
    fn test_curvature_signs() {
        let reference = [0.0, 0.0, 5.0, 0.0, 0.0];
        let mut out = [0.0; 5];
        estimate_curvature(&reference, None, &mut out);

        assert_eq!(out, [-5.0, 10.0, -5.0, 0.0, 0.0]);
    }
}
