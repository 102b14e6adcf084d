//! Parsers for gamma-ray spectrum files.
//!
//! - **Spectrum count files**: acquisition times followed by raw channel
//!   counts, plain text or gzip-compressed
//!
//! ## Example
//!
//! ```rust,no_run
//! use gamma_check::parsing::spectrum::{parse_spectrum_file, parse_spectrum_text};
//! use std::path::Path;
//!
//! // Parse from a file, reading 1024 channels
//! let reference = parse_spectrum_file(Path::new("reference.spe"), 1024).unwrap();
//!
//! // Or from text: 60 second acquisition, four channels
//! let test = parse_spectrum_text("0 60\n0 120 600 60\n", 4).unwrap();
//! assert_eq!(test.counts(), &[0.0, 2.0, 10.0, 1.0]);
//! ```
//!
//! ## File Layout
//!
//! | Position | Value | Type |
//! |----------|-------|------|
//! | 1 | Acquisition start (seconds) | integer |
//! | 2 | Acquisition end (seconds) | integer |
//! | 3.. | Raw count per channel, lowest energy first | real, non-negative |

pub mod spectrum;
