use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::region::Region;
use crate::core::types::{Detection, IntegrityStatus, SpectrumRole};
use crate::matching::scoring::{score_peak, PeakScore};
use crate::peaks::area::{even_width_floor, peak_area, PeakAreaError};
use crate::peaks::integrity::{assess_peak_shape, ShapeAssessment};
use crate::peaks::regions::{find_regions, RegionError};
use crate::utils::validation::{
    check_spectrum_length, require_bins, require_spectrum, validate_threshold, ValidationError,
};

/// Default relative tolerance on peak areas
pub const DEFAULT_THRESHOLD: f64 = 0.1;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("Resource exhaustion: {0}")]
    ResourceExhaustion(#[from] RegionError),

    #[error("Peak integration failed: {0}")]
    PeakArea(#[from] PeakAreaError),
}

/// Configuration for the spectrum matcher
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Relative tolerance between test and reference peak areas, in (0, 1)
    pub threshold: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl MatchingConfig {
    /// Create a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::ThresholdOutOfRange` unless `0 < threshold < 1`.
    pub fn new(threshold: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            threshold: validate_threshold(threshold)?,
        })
    }
}

/// Scores for one region of the reference spectrum
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionReport {
    pub region: Region,

    /// Full region width when the test peak shape is sound, else 0.0
    pub integrity: f64,

    /// Measured shape of the test peak
    pub shape: ShapeAssessment,

    /// Area comparison and contribution to the confidence
    pub peak: PeakScore,
}

/// Result of comparing a test spectrum against a reference
#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome {
    pub detection: Detection,

    /// Summed region contributions; matching every region gives about 1.0
    pub confidence: f64,

    /// Summed region integrity scores, in channels
    pub integrity: f64,

    /// `integrity / bins`
    pub integrity_ratio: f64,

    /// Advisory assessment derived from `integrity_ratio`
    pub integrity_status: IntegrityStatus,

    /// Integrity over the channels actually covered by regions (1.0 when
    /// every region's test peak is sound, or when there are no regions)
    pub sound_fraction: f64,

    /// Simpson area of the whole reference spectrum
    pub spectrum_energy: f64,

    pub bins: usize,

    pub regions: Vec<RegionReport>,
}

impl MatchOutcome {
    #[must_use]
    pub fn is_detected(&self) -> bool {
        self.detection.is_detected()
    }

    #[must_use]
    pub fn matched_regions(&self) -> usize {
        self.regions.iter().filter(|r| r.peak.is_match()).count()
    }
}

/// Compares test spectra against a reference, region by region
#[derive(Debug, Clone, Default)]
pub struct SpectrumMatcher {
    config: MatchingConfig,
}

impl SpectrumMatcher {
    #[must_use]
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Decide whether `test` carries the signature of `reference`.
    ///
    /// Regions are located in `reference` after subtracting `background`
    /// (`None` for no background). Each region's test peak is checked for
    /// shape integrity and its area compared with the reference area. Every
    /// supplied spectrum must hold exactly `bins` channels.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidInput` before any computation if a spectrum
    /// is missing or the wrong length, `bins` is zero, or the threshold is not
    /// strictly between 0 and 1. Returns `MatchError::ResourceExhaustion` if
    /// the region search cannot allocate its working buffer.
    pub fn analyze(
        &self,
        test: Option<&[f64]>,
        reference: Option<&[f64]>,
        background: Option<&[f64]>,
        bins: usize,
    ) -> Result<MatchOutcome, MatchError> {
        let threshold = validate_threshold(self.config.threshold)?;
        let bins = require_bins(bins)?;
        let test = require_spectrum(SpectrumRole::Test, test, bins)?;
        let reference = require_spectrum(SpectrumRole::Reference, reference, bins)?;
        if let Some(background) = background {
            check_spectrum_length(SpectrumRole::Background, background, bins)?;
        }

        // Apportions each region's match as a share of the whole spectrum
        let spectrum_energy = peak_area(reference, even_width_floor(bins))?;
        if spectrum_energy.abs() < f64::EPSILON {
            warn!("Reference spectrum has no measurable energy, no region can match");
        }

        let region_list = find_regions(reference, background, bins)?;
        if region_list.is_empty() {
            warn!("Unable to identify peaks in reference data");
        }

        let mut integrity = 0.0;
        let mut confidence = 0.0;
        let mut covered = 0.0;
        let mut reports = Vec::with_capacity(region_list.len());

        for region in region_list.regions() {
            let shape = assess_peak_shape(test, &region);
            let region_integrity = shape.integrity(&region);

            let peak = score_peak(test, reference, &region, spectrum_energy, threshold)?;

            debug!(
                "Region {region}: integrity {region_integrity}, reference area {:.4}, test area {:.4}, contribution {:.4}",
                peak.reference_area, peak.test_area, peak.contribution
            );

            integrity += region_integrity;
            confidence += peak.contribution;
            covered += count_to_f64(region.full_width());
            reports.push(RegionReport {
                region,
                integrity: region_integrity,
                shape,
                peak,
            });
        }

        let integrity_ratio = integrity / count_to_f64(bins);
        let integrity_status = IntegrityStatus::from_ratio(integrity_ratio);
        let sound_fraction = if covered > 0.0 {
            integrity / covered
        } else {
            1.0
        };
        let detection = Detection::from_confidence(confidence);

        info!(
            "Confidence {confidence:.4} over {} regions, integrity ratio {integrity_ratio:.4}: {detection}",
            reports.len()
        );

        Ok(MatchOutcome {
            detection,
            confidence,
            integrity,
            integrity_ratio,
            integrity_status,
            sound_fraction,
            spectrum_energy,
            bins,
            regions: reports,
        })
    }

    /// Convenience wrapper over [`analyze`](Self::analyze) for spectra that are
    /// all present, using the test spectrum's length as `bins`.
    ///
    /// # Errors
    ///
    /// Same as [`analyze`](Self::analyze).
    pub fn compare(
        &self,
        test: &[f64],
        reference: &[f64],
        background: Option<&[f64]>,
    ) -> Result<MatchOutcome, MatchError> {
        self.analyze(Some(test), Some(reference), background, test.len())
    }
}

#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::MAX_BINS;

    fn gaussian(bins: usize, center: f64, sigma: f64, amplitude: f64) -> Vec<f64> {
        (0..bins)
            .map(|i| {
                let x = count_to_f64(i) - center;
                amplitude * (-(x * x) / (2.0 * sigma * sigma)).exp()
            })
            .collect()
    }

    fn matcher(threshold: f64) -> SpectrumMatcher {
        SpectrumMatcher::new(MatchingConfig { threshold })
    }

    #[test]
    fn test_identical_spectra_match() {
        let reference = gaussian(100, 50.0, 3.0, 1000.0);
        let background = vec![0.0; 100];

        let outcome = matcher(0.1)
            .analyze(Some(&reference), Some(&reference), Some(&background), 100)
            .unwrap();

        assert_eq!(outcome.detection, Detection::Detected);
        assert!(outcome.confidence > 0.95);
        assert_eq!(outcome.regions.len(), 1);
        assert_eq!(outcome.matched_regions(), 1);
        assert!((outcome.sound_fraction - 1.0).abs() < f64::EPSILON);
        assert!((outcome.integrity - 21.0).abs() < f64::EPSILON);
        assert!((outcome.integrity_ratio - 0.21).abs() < 1e-12);
    }

    #[test]
    fn test_halved_test_peak_does_not_match() {
        let reference = gaussian(100, 50.0, 3.0, 1000.0);
        let test: Vec<f64> = reference.iter().map(|v| v * 0.5).collect();

        let outcome = matcher(0.1).compare(&test, &reference, None).unwrap();

        assert_eq!(outcome.detection, Detection::NotDetected);
        assert!(outcome.confidence.abs() < f64::EPSILON);
        assert_eq!(outcome.matched_regions(), 0);
    }

    #[test]
    fn test_missing_spectra_rejected() {
        let reference = gaussian(100, 50.0, 3.0, 1000.0);

        let err = matcher(0.1)
            .analyze(None, Some(&reference), None, 100)
            .unwrap_err();
        assert!(matches!(
            err,
            MatchError::InvalidInput(ValidationError::MissingSpectrum(SpectrumRole::Test))
        ));

        let err = matcher(0.1)
            .analyze(Some(&reference), None, None, 100)
            .unwrap_err();
        assert!(matches!(
            err,
            MatchError::InvalidInput(ValidationError::MissingSpectrum(SpectrumRole::Reference))
        ));
    }

    #[test]
    fn test_threshold_bounds_rejected() {
        let reference = gaussian(100, 50.0, 3.0, 1000.0);

        for threshold in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            let err = matcher(threshold)
                .compare(&reference, &reference, None)
                .unwrap_err();
            assert!(matches!(
                err,
                MatchError::InvalidInput(ValidationError::ThresholdOutOfRange(_))
            ));
        }
    }

    #[test]
    fn test_zero_bins_rejected() {
        let empty: Vec<f64> = Vec::new();
        let err = matcher(0.1)
            .analyze(Some(&empty), Some(&empty), None, 0)
            .unwrap_err();
        assert!(matches!(
            err,
            MatchError::InvalidInput(ValidationError::ZeroBins(0))
        ));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let reference = gaussian(100, 50.0, 3.0, 1000.0);
        let background = vec![0.0; 90];

        let err = matcher(0.1)
            .analyze(Some(&reference), Some(&reference), Some(&background), 100)
            .unwrap_err();
        assert!(matches!(
            err,
            MatchError::InvalidInput(ValidationError::LengthMismatch {
                role: SpectrumRole::Background,
                expected: 100,
                found: 90,
            })
        ));
    }

    #[test]
    fn test_small_spectrum_has_no_regions() {
        let reference = vec![1.0; 10];

        let outcome = matcher(0.1).compare(&reference, &reference, None).unwrap();

        assert!(outcome.regions.is_empty());
        assert_eq!(outcome.detection, Detection::NotDetected);
        assert!((outcome.sound_fraction - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_bin_spectrum() {
        let outcome = matcher(0.1).compare(&[4.0], &[4.0], None).unwrap();

        assert!(outcome.spectrum_energy.abs() < f64::EPSILON);
        assert_eq!(outcome.detection, Detection::NotDetected);
    }

    #[test]
    fn test_distorted_test_peak_lowers_integrity() {
        let reference = gaussian(100, 50.0, 3.0, 1000.0);
        let mut test = reference.clone();
        test[49] += 3000.0;

        let outcome = matcher(0.1).compare(&test, &reference, None).unwrap();

        assert!(outcome.integrity.abs() < f64::EPSILON);
        assert!(outcome.sound_fraction.abs() < f64::EPSILON);
        assert_eq!(outcome.integrity_status, IntegrityStatus::Poor);
    }

    #[test]
    fn test_bins_above_file_limit_accepted() {
        let bins = MAX_BINS + 2;
        let reference = gaussian(bins, 500.0, 3.0, 1000.0);

        let outcome = matcher(0.1).compare(&reference, &reference, None).unwrap();

        assert_eq!(outcome.bins, bins);
        assert!(outcome.is_detected());
    }

    #[test]
    fn test_config_validation() {
        assert!(MatchingConfig::new(0.25).is_ok());
        let matcher = SpectrumMatcher::new(MatchingConfig::new(0.25).unwrap());
        assert!((matcher.config().threshold - 0.25).abs() < f64::EPSILON);
        assert!(MatchingConfig::new(1.0).is_err());
        assert!((MatchingConfig::default().threshold - DEFAULT_THRESHOLD).abs() < f64::EPSILON);
    }
}
