use serde::{Deserialize, Serialize};

/// A time-normalised gamma-ray spectrum.
///
/// Channel 0 is the lowest energy bin. Counts are rates in counts per second,
/// already divided by the acquisition live time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    /// Source file path (if known)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Acquisition live time in seconds
    pub live_time: f64,

    /// Count rate per channel
    pub counts: Vec<f64>,
}

impl Spectrum {
    /// Normalise raw channel counts by the acquisition live time.
    #[must_use]
    pub fn from_raw_counts(raw: &[f64], live_time: f64) -> Self {
        Self {
            source: None,
            live_time,
            counts: raw.iter().map(|count| count / live_time).collect(),
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    /// Sum of all channel rates
    #[must_use]
    pub fn total_rate(&self) -> f64 {
        self.counts.iter().sum()
    }

    /// Channel holding the highest rate, first one wins on ties
    #[must_use]
    pub fn max_channel(&self) -> Option<usize> {
        self.counts
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, &value)| match best {
                Some((_, top)) if top >= value => best,
                _ => Some((i, value)),
            })
            .map(|(i, _)| i)
    }
}
