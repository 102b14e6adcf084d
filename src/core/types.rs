use serde::{Deserialize, Serialize};

/// Confidence above which a test spectrum is reported as matching the reference
pub const CONFIDENCE_CUTOFF: f64 = 0.95;

/// Integrity ratio above which peak shapes are reported as undisturbed
pub const INTEGRITY_CUTOFF: f64 = 0.95;

/// Which of the three input spectra a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpectrumRole {
    Test,
    Reference,
    Background,
}

impl std::fmt::Display for SpectrumRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Test => write!(f, "test"),
            Self::Reference => write!(f, "reference"),
            Self::Background => write!(f, "background"),
        }
    }
}

/// Final verdict of a spectrum comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Detection {
    /// The test spectrum carries the reference signature
    Detected,
    /// No match against the reference
    NotDetected,
}

impl Detection {
    #[must_use]
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > CONFIDENCE_CUTOFF {
            Self::Detected
        } else {
            Self::NotDetected
        }
    }

    #[must_use]
    pub fn is_detected(self) -> bool {
        matches!(self, Self::Detected)
    }
}

impl std::fmt::Display for Detection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Detected => write!(f, "Fissile material detected in sample."),
            Self::NotDetected => write!(f, "No fissile material detected in sample."),
        }
    }
}

/// Advisory assessment of the test spectrum's peak shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrityStatus {
    Good,
    Poor,
}

impl IntegrityStatus {
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > INTEGRITY_CUTOFF {
            Self::Good
        } else {
            Self::Poor
        }
    }
}

impl std::fmt::Display for IntegrityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Good => write!(f, "Peak integrity is good across the spectrum"),
            Self::Poor => write!(
                f,
                "Peak integrity is poor. Check for interference or tampering in test sample."
            ),
        }
    }
}
