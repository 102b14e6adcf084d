//! Photopeak detection, integration and shape checks.
//!
//! - [`regions`]: locate candidate peak regions in a reference spectrum
//! - [`area`]: Simpson's-rule peak area over unit-spaced channels
//! - [`integrity`]: FWTM/FWHM shape check for disturbed test peaks
//!
//! ## Detection Calibration
//!
//! The constants below are tuned together and are not configuration:
//!
//! | Constant | Value | Used by |
//! |----------|-------|---------|
//! | [`SMOOTHING_ROUNDS`](regions::SMOOTHING_ROUNDS) | 5 | region search |
//! | [`SMOOTHING_WINDOW`](regions::SMOOTHING_WINDOW) | 7 | region search |
//! | [`MAX_SHAPE_RATIO`](integrity::MAX_SHAPE_RATIO) | 1.9 | integrity check |

pub mod area;
pub mod integrity;
pub mod regions;

pub use area::{peak_area, PeakAreaError};
pub use integrity::{assess_peak_shape, peak_integrity, PeakShape, ShapeAssessment};
pub use regions::{find_regions, RegionError, MIN_REGION_BINS};
