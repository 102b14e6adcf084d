//! Spectrum matching engine and peak scoring.
//!
//! This module provides the comparison pipeline:
//!
//! - [`SpectrumMatcher`](engine::SpectrumMatcher): main entry point, renders the verdict
//! - [`match_peak`](scoring::match_peak): area agreement for one region
//! - [`MatchOutcome`](engine::MatchOutcome): verdict plus per-region detail
//!
//! ## Matching Algorithm
//!
//! 1. **Spectrum energy**: Simpson area of the whole reference spectrum
//! 2. **Region search**: candidate photopeaks in the background-subtracted reference
//! 3. **Integrity**: each test peak's FWTM/FWHM ratio is checked for distortion
//! 4. **Area match**: each test peak area must lie within the threshold of the
//!    reference area; a match credits the region's share of the spectrum energy
//!
//! ## Verdict
//!
//! - **Detection**: summed region credit above 0.95
//! - **Integrity**: summed sound-region width over `bins` above 0.95 (advisory)
//!
//! ## Example
//!
//! ```rust
//! use gamma_check::matching::engine::{MatchingConfig, SpectrumMatcher};
//!
//! let reference: Vec<f64> = (0..100_i32)
//!     .map(|i| 1000.0 * (-((f64::from(i) - 50.0).powi(2)) / 18.0).exp())
//!     .collect();
//!
//! let matcher = SpectrumMatcher::new(MatchingConfig::new(0.1).unwrap());
//! let outcome = matcher.compare(&reference, &reference, None).unwrap();
//!
//! assert!(outcome.is_detected());
//! ```

pub mod engine;
pub mod scoring;

pub use engine::{MatchError, MatchOutcome, MatchingConfig, RegionReport, SpectrumMatcher};
pub use scoring::{match_peak, score_peak, PeakScore};
