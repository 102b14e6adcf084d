//! Core data types for gamma-ray spectrum comparison.
//!
//! - [`Spectrum`](spectrum::Spectrum): time-normalised count rates per channel
//! - [`Region`](region::Region): one candidate photopeak (left boundary, peak, right boundary)
//! - [`RegionList`](region::RegionList): the alternating `min, max, ..., min` region map
//! - [`Detection`](types::Detection), [`IntegrityStatus`](types::IntegrityStatus): verdict types
//!
//! ## Channel Layout
//!
//! All three spectra (test, reference and background) share one channel layout.
//! Index 0 is the lowest energy channel and every spectrum in a comparison has
//! the same number of bins. No energy calibration is applied; regions are
//! plain channel indices.

pub mod region;
pub mod spectrum;
pub mod types;
