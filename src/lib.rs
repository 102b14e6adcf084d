//! # gamma-check
//!
//! A library for detecting fissile material by comparing gamma-ray spectra.
//!
//! A sample is measured with a gamma-ray detector and its spectrum, count
//! rates binned by photon energy, is compared with the spectrum of a known
//! reference material such as plutonium-239. If the sample's photopeaks line
//! up with the reference's in both position and area, the material is
//! reported as present.
//!
//! ## Features
//!
//! - **Region search**: Finds candidate photopeaks from the smoothed curvature
//!   of the background-subtracted reference spectrum
//! - **Peak areas**: Integrates each region with Simpson's rule
//! - **Integrity check**: Flags test peaks whose shape suggests interference
//!   or tampering (FWTM/FWHM ratio)
//! - **Area matching**: Credits each region whose test area lies within a
//!   relative threshold of the reference area
//!
//! ## Example
//!
//! ```rust,no_run
//! use gamma_check::parsing::spectrum::parse_spectrum_file;
//! use gamma_check::{MatchingConfig, SpectrumMatcher};
//! use std::path::Path;
//!
//! let bins = 1024;
//! let test = parse_spectrum_file(Path::new("sample.spe"), bins).unwrap();
//! let reference = parse_spectrum_file(Path::new("pu239.spe"), bins).unwrap();
//! let background = parse_spectrum_file(Path::new("background.spe"), bins).unwrap();
//!
//! let matcher = SpectrumMatcher::new(MatchingConfig::new(0.1).unwrap());
//! let outcome = matcher
//!     .analyze(
//!         Some(test.counts()),
//!         Some(reference.counts()),
//!         Some(background.counts()),
//!         bins,
//!     )
//!     .unwrap();
//!
//! println!("{}", outcome.integrity_status);
//! println!("{} (confidence {:.3})", outcome.detection, outcome.confidence);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Core data types for spectra, regions, and verdicts
//! - [`peaks`]: Region search, peak area, and peak integrity
//! - [`matching`]: Spectrum matcher and per-region scoring
//! - [`parsing`]: Parser for spectrum count files
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod peaks;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::region::{Region, RegionList};
pub use core::spectrum::Spectrum;
pub use core::types::*;
pub use matching::engine::{MatchError, MatchOutcome, MatchingConfig, SpectrumMatcher};
