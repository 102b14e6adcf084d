//! Centralized validation and helper functions.

use crate::core::types::SpectrumRole;

/// Maximum number of channels read from a single spectrum file
pub const MAX_BINS: usize = 1 << 20;

/// Input validation error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("No {0} spectrum supplied")]
    MissingSpectrum(SpectrumRole),

    #[error("bins must be a positive integer, got {0}")]
    ZeroBins(usize),

    #[error("Too many bins: {0} exceeds maximum allowed ({MAX_BINS})")]
    TooManyBins(usize),

    #[error("threshold must be greater than zero and less than one, got {0}")]
    ThresholdOutOfRange(f64),

    #[error("{role} spectrum has {found} channels, expected {expected}")]
    LengthMismatch {
        role: SpectrumRole,
        expected: usize,
        found: usize,
    },
}

/// Check that a match threshold lies strictly inside (0, 1).
///
/// NaN is rejected along with the boundary values.
///
/// # Examples
///
/// ```
/// use gamma_check::utils::validation::validate_threshold;
///
/// assert!(validate_threshold(0.1).is_ok());
/// assert!(validate_threshold(0.0).is_err());
/// assert!(validate_threshold(1.0).is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::ThresholdOutOfRange` for values outside (0, 1).
pub fn validate_threshold(threshold: f64) -> Result<f64, ValidationError> {
    if threshold > 0.0 && threshold < 1.0 {
        Ok(threshold)
    } else {
        Err(ValidationError::ThresholdOutOfRange(threshold))
    }
}

/// Check that a channel count is positive.
///
/// # Errors
///
/// Returns `ValidationError::ZeroBins` for zero.
pub fn require_bins(bins: usize) -> Result<usize, ValidationError> {
    if bins == 0 {
        Err(ValidationError::ZeroBins(bins))
    } else {
        Ok(bins)
    }
}

/// Check that a channel count read from a file is positive and within [`MAX_BINS`].
///
/// # Errors
///
/// Returns `ValidationError::ZeroBins` or `ValidationError::TooManyBins`.
pub fn validate_bins(bins: usize) -> Result<usize, ValidationError> {
    let bins = require_bins(bins)?;
    if bins > MAX_BINS {
        return Err(ValidationError::TooManyBins(bins));
    }
    Ok(bins)
}

/// Require a spectrum to be present and to hold exactly `bins` channels.
///
/// # Errors
///
/// Returns `ValidationError::MissingSpectrum` for an absent spectrum or
/// `ValidationError::LengthMismatch` when the channel count differs from `bins`.
pub fn require_spectrum<'a>(
    role: SpectrumRole,
    spectrum: Option<&'a [f64]>,
    bins: usize,
) -> Result<&'a [f64], ValidationError> {
    let spectrum = spectrum.ok_or(ValidationError::MissingSpectrum(role))?;
    check_spectrum_length(role, spectrum, bins)?;
    Ok(spectrum)
}

/// Check an optional spectrum's length without requiring it to be present.
///
/// # Errors
///
/// Returns `ValidationError::LengthMismatch` when the channel count differs from `bins`.
pub fn check_spectrum_length(
    role: SpectrumRole,
    spectrum: &[f64],
    bins: usize,
) -> Result<(), ValidationError> {
    if spectrum.len() == bins {
        Ok(())
    } else {
        Err(ValidationError::LengthMismatch {
            role,
            expected: bins,
            found: spectrum.len(),
        })
    }
}

/// A channel value is usable when it is a finite, non-negative count rate.
#[must_use]
pub fn is_valid_count(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
