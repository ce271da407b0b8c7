//! Right-alignment of warm-up-trimmed indicator output onto its source bars.

use serde::Serialize;
use std::fmt::Display;

use crate::Ohlcv;

/// One indicator output point, stamped with the time of the bar it was
/// computed on.
///
/// `time` is copied verbatim from the source bar; it is never parsed,
/// recomputed or interpolated.
///
/// Serializes as `{"time": ..., "value": ...}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sample<T> {
    time: String,
    value: T,
}

impl<T> Sample<T> {
    #[must_use]
    pub fn new(time: impl Into<String>, value: T) -> Self {
        Self {
            time: time.into(),
            value,
        }
    }

    #[inline]
    #[must_use]
    pub fn time(&self) -> &str {
        &self.time
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Splits the sample into its time and value.
    #[must_use]
    pub fn into_parts(self) -> (String, T) {
        (self.time, self.value)
    }
}

impl<T: Display> Display for Sample<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.time, self.value)
    }
}

/// Pairs each computed value with the bar it belongs to.
///
/// Indicators drop their warm-up prefix, so `values` is shorter than `bars`.
/// With `diff = bars.len() - values.len()`, value `i` lands on
/// `bars[i + diff]`: the outputs are right-aligned to the tail of the input.
///
/// This is the only place bar times are attached to indicator output.
///
/// # Panics
///
/// Panics if there are more values than bars, which no indicator produces.
///
/// # Example
///
/// ```
/// use chart_indicators::{Bar, align_to_tail};
///
/// let bars: Vec<_> = ["d1", "d2", "d3"]
///     .into_iter()
///     .map(|t| Bar::new(t, 1.0, 1.0, 1.0, 1.0))
///     .collect();
///
/// let samples = align_to_tail(&bars, vec![10.0, 20.0]);
/// assert_eq!(samples[0].time(), "d2");
/// assert_eq!(samples[1].time(), "d3");
/// ```
#[must_use]
pub fn align_to_tail<B, T>(bars: &[B], values: Vec<T>) -> Vec<Sample<T>>
where
    B: Ohlcv,
{
    assert!(
        values.len() <= bars.len(),
        "indicator produced {} values for {} bars",
        values.len(),
        bars.len(),
    );

    let diff = bars.len() - values.len();

    bars[diff..]
        .iter()
        .zip(values)
        .map(|(bar, value)| Sample::new(bar.time(), value))
        .collect()
}
