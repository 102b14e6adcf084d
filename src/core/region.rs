use serde::{Deserialize, Serialize};

/// One candidate photopeak, bounded by the curvature minima either side of it.
///
/// All three values are channel indices into the spectrum with
/// `left <= peak <= right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub left: usize,
    pub peak: usize,
    pub right: usize,
}

impl Region {
    #[must_use]
    pub fn new(left: usize, peak: usize, right: usize) -> Self {
        debug_assert!(left <= peak && peak <= right, "region bounds out of order");
        Self { left, peak, right }
    }

    /// Number of channels covered, both boundaries included.
    #[must_use]
    pub fn full_width(&self) -> usize {
        self.right - self.left + 1
    }

    /// Distance from the left boundary to the right boundary.
    #[must_use]
    pub fn span(&self) -> usize {
        self.right - self.left
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}]", self.left, self.peak, self.right)
    }
}

/// Alternating boundary/peak channels found in a reference spectrum.
///
/// The map reads `min, max, min, max, ..., min`; consecutive regions share a
/// boundary, so region `i` is the triple starting at index `2 * i`. A trailing
/// boundary without a following peak and boundary does not form a region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionList {
    boundaries: Vec<usize>,
}

impl RegionList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from an already alternating channel map.
    #[must_use]
    pub fn from_boundaries(boundaries: Vec<usize>) -> Self {
        debug_assert!(
            boundaries.windows(2).all(|w| w[0] <= w[1]),
            "region map must be non-decreasing"
        );
        Self { boundaries }
    }

    pub(crate) fn try_with_capacity(
        capacity: usize,
    ) -> Result<Self, std::collections::TryReserveError> {
        let mut boundaries = Vec::new();
        boundaries.try_reserve_exact(capacity)?;
        Ok(Self { boundaries })
    }

    pub(crate) fn push(&mut self, channel: usize) {
        self.boundaries.push(channel);
    }

    /// The raw `min, max, ..., min` channel map.
    #[must_use]
    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    /// Number of complete regions in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boundaries.len().saturating_sub(1) / 2
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate regions as overlapping triples, advancing two channels per step.
    pub fn regions(&self) -> impl Iterator<Item = Region> + '_ {
        self.boundaries
            .windows(3)
            .step_by(2)
            .map(|w| Region::new(w[0], w[1], w[2]))
    }
}
