//! Peak area integration over unit-spaced channels.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeakAreaError {
    #[error("Simpson's rule needs an even number of channels, got {0}")]
    OddWidth(usize),

    #[error("Peak width {width} exceeds the {available} channels available")]
    WidthExceedsChannels { width: usize, available: usize },
}

/// Round a channel count up to the next even number.
#[inline]
#[must_use]
pub fn even_width(width: usize) -> usize {
    width + width % 2
}

/// Round a channel count down to the previous even number.
#[inline]
#[must_use]
pub fn even_width_floor(width: usize) -> usize {
    width - width % 2
}

/// Area under the first `width` channels using Simpson's rule.
///
/// Channels are one unit apart, so the area is
/// `(y[0] + 4 * sum(odd offsets) + 2 * sum(even offsets) + y[width - 1]) / 3`,
/// where the odd offsets run `1, 3, ..., width - 3` and the even offsets
/// `2, 4, ..., width - 2`. Two channels are a special case with area
/// `(y[0] + y[1]) / 3`, and zero channels have no area.
///
/// # Examples
///
/// ```
/// use gamma_check::peaks::area::peak_area;
///
/// let area = peak_area(&[3.0, 6.0], 2).unwrap();
/// assert_eq!(area, 3.0);
/// assert!(peak_area(&[1.0, 2.0, 3.0], 3).is_err());
/// ```
///
/// # Errors
///
/// Returns `PeakAreaError::OddWidth` for an odd `width`, or
/// `PeakAreaError::WidthExceedsChannels` when `channels` is shorter than `width`.
pub fn peak_area(channels: &[f64], width: usize) -> Result<f64, PeakAreaError> {
    if width % 2 != 0 {
        return Err(PeakAreaError::OddWidth(width));
    }
    if width > channels.len() {
        return Err(PeakAreaError::WidthExceedsChannels {
            width,
            available: channels.len(),
        });
    }

    match width {
        0 => Ok(0.0),
        2 => Ok((channels[0] + channels[1]) / 3.0),
        _ => {
            let mut sum_odd_offsets = 0.0;
            let mut sum_even_offsets = 0.0;
            for i in (1..width - 1).step_by(2) {
                sum_odd_offsets += channels[i];
                sum_even_offsets += channels[i + 1];
            }

            Ok((channels[0]
                + 4.0 * sum_odd_offsets
                + 2.0 * sum_even_offsets
                + channels[width - 1])
                / 3.0)
        }
    }
}
