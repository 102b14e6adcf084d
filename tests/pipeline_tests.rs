//! End-to-end matching tests
//!
//! These tests drive the library from spectrum text through region search,
//! integrity checks and area matching to the final verdict.

use gamma_check::matching::engine::{MatchError, MatchingConfig, SpectrumMatcher};
use gamma_check::parsing::spectrum::parse_spectrum_text;
use gamma_check::peaks::regions::find_regions;
use gamma_check::utils::validation::ValidationError;
use gamma_check::{Detection, IntegrityStatus, Region, SpectrumRole};

fn gaussian(bins: usize, center: f64, sigma: f64, amplitude: f64) -> Vec<f64> {
    (0..bins)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let x = i as f64 - center;
            amplitude * (-(x * x) / (2.0 * sigma * sigma)).exp()
        })
        .collect()
}

/// Two photopeaks in 200 channels
fn two_peak_reference() -> Vec<f64> {
    gaussian(200, 60.0, 3.0, 1000.0)
        .iter()
        .zip(gaussian(200, 130.0, 4.0, 600.0))
        .map(|(a, b)| a + b)
        .collect()
}

fn matcher(threshold: f64) -> SpectrumMatcher {
    SpectrumMatcher::new(MatchingConfig { threshold })
}

#[test]
fn test_single_peak_match() {
    let reference = gaussian(100, 50.0, 3.0, 1000.0);
    let background = vec![0.0; 100];

    let outcome = matcher(0.1)
        .analyze(Some(&reference), Some(&reference), Some(&background), 100)
        .unwrap();

    assert_eq!(outcome.detection, Detection::Detected);
    assert!(outcome.confidence > 0.95);
    assert_eq!(
        outcome.regions.iter().map(|r| r.region).collect::<Vec<_>>(),
        vec![Region::new(39, 49, 59)]
    );
    // One 21-channel region out of 100: every region is sound but most
    // channels lie outside any region
    assert!((outcome.integrity_ratio - 0.21).abs() < 1e-12);
    assert_eq!(outcome.integrity_status, IntegrityStatus::Poor);
    assert!((outcome.sound_fraction - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_halved_sample_not_detected() {
    let reference = gaussian(100, 50.0, 3.0, 1000.0);
    let test: Vec<f64> = reference.iter().map(|v| v * 0.5).collect();
    let background = vec![0.0; 100];

    let outcome = matcher(0.1)
        .analyze(Some(&test), Some(&reference), Some(&background), 100)
        .unwrap();

    assert_eq!(outcome.detection, Detection::NotDetected);
    assert!(outcome.confidence.abs() < f64::EPSILON);
    // Shape is unaffected by scaling
    assert!((outcome.sound_fraction - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_two_peaks_contributions_sum_to_confidence() {
    let reference = two_peak_reference();

    let outcome = matcher(0.1).compare(&reference, &reference, None).unwrap();

    assert_eq!(outcome.regions.len(), 3);
    assert_eq!(outcome.matched_regions(), 3);
    assert_eq!(outcome.detection, Detection::Detected);

    let summed: f64 = outcome.regions.iter().map(|r| r.peak.contribution).sum();
    assert!((summed - outcome.confidence).abs() < 1e-12);
    assert!((outcome.confidence - 0.990_505_582).abs() < 1e-6);
}

#[test]
fn test_one_weak_peak_spoils_detection() {
    let reference = two_peak_reference();
    let test: Vec<f64> = gaussian(200, 60.0, 3.0, 1000.0)
        .iter()
        .zip(gaussian(200, 130.0, 4.0, 300.0))
        .map(|(a, b)| a + b)
        .collect();

    let outcome = matcher(0.1).compare(&test, &reference, None).unwrap();

    assert_eq!(outcome.detection, Detection::NotDetected);
    assert!(outcome.confidence > 0.5 && outcome.confidence < 0.6);
    assert!(outcome.matched_regions() < outcome.regions.len());
}

#[test]
fn test_threshold_widens_acceptance() {
    let reference = two_peak_reference();
    let test: Vec<f64> = reference.iter().map(|v| v * 1.15).collect();

    let strict = matcher(0.05).compare(&test, &reference, None).unwrap();
    assert_eq!(strict.detection, Detection::NotDetected);

    let loose = matcher(0.2).compare(&test, &reference, None).unwrap();
    assert_eq!(loose.detection, Detection::Detected);
}

#[test]
fn test_background_shifts_region_search_only() {
    let peaks = two_peak_reference();
    let background = vec![25.0; 200];
    let reference: Vec<f64> = peaks.iter().map(|v| v + 25.0).collect();

    // Constant background has no curvature, so the regions are unchanged
    let with_background = find_regions(&reference, Some(&background), 200).unwrap();
    let without = find_regions(&peaks, None, 200).unwrap();
    assert_eq!(with_background, without);

    // The background still counts towards the spectrum energy, so the
    // regions no longer account for all of it
    let outcome = matcher(0.1)
        .analyze(Some(&reference), Some(&reference), Some(&background), 200)
        .unwrap();
    assert_eq!(outcome.matched_regions(), 3);
    assert_eq!(outcome.detection, Detection::NotDetected);
}

#[test]
fn test_parsed_spectra_match() {
    let mut text = String::from("1000 1010\n");
    for v in gaussian(100, 50.0, 3.0, 10_000.0) {
        text.push_str(&format!("{} ", v.round()));
    }

    let test = parse_spectrum_text(&text, 100).unwrap();
    let reference = parse_spectrum_text(&text, 100).unwrap();

    let outcome = matcher(0.1)
        .analyze(Some(test.counts()), Some(reference.counts()), None, 100)
        .unwrap();
    assert!(outcome.is_detected());
}

#[test]
fn test_invalid_inputs_fail_fast() {
    let reference = gaussian(100, 50.0, 3.0, 1000.0);

    let err = matcher(0.1)
        .analyze(None, Some(&reference), None, 100)
        .unwrap_err();
    assert!(matches!(
        err,
        MatchError::InvalidInput(ValidationError::MissingSpectrum(SpectrumRole::Test))
    ));

    for threshold in [0.0, 1.0] {
        let err = matcher(threshold)
            .compare(&reference, &reference, None)
            .unwrap_err();
        assert!(matches!(
            err,
            MatchError::InvalidInput(ValidationError::ThresholdOutOfRange(_))
        ));
    }

    let err = matcher(0.1)
        .analyze(Some(&reference), Some(&reference), None, 120)
        .unwrap_err();
    assert!(matches!(
        err,
        MatchError::InvalidInput(ValidationError::LengthMismatch { .. })
    ));
}
