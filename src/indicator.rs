use crate::{Ohlcv, PriceSource};

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

/// Configuration for a technical [`Indicator`].
///
/// Every indicator has a corresponding config type that holds its parameters
/// (lengths, price source, etc). Configs are value types: cheap to copy,
/// compare, and hash.
pub trait IndicatorConfig: Sized + Copy + PartialEq + Eq + Hash + Display + Debug {
    /// Builder type for constructing this config.
    type Builder: IndicatorConfigBuilder<Self>;

    /// Returns a new builder with default values.
    fn builder() -> Self::Builder;

    /// Price source to extract from each bar.
    fn source(&self) -> PriceSource;

    /// Number of bars consumed before the first value is produced.
    ///
    /// Feeding `n` bars yields `n.saturating_sub(warm_up() - 1)` values.
    fn warm_up(&self) -> usize;
}

/// Builder for an [`IndicatorConfig`].
///
/// Lengths are set through inherent methods on each builder, since
/// indicators differ in how many they take.
pub trait IndicatorConfigBuilder<Config>
where
    Config: IndicatorConfig,
{
    /// Sets the price source.
    #[must_use]
    fn source(self, source: PriceSource) -> Self;

    /// Builds the config. Panics if required fields are missing.
    #[must_use]
    fn build(self) -> Config;
}

/// An incremental technical indicator.
///
/// Indicators keep internal state and advance by one bar on each call to
/// [`compute`](Indicator::compute). Output is `None` while the indicator is
/// still consuming its warm-up window; once it produces a value it produces
/// one for every following bar.
///
/// # Example
///
/// ```
/// use chart_indicators::{Bar, Indicator, Sma, SmaConfig};
/// use std::num::NonZero;
///
/// let mut sma = Sma::new(SmaConfig::close(NonZero::new(3).unwrap()));
///
/// assert_eq!(sma.compute(&Bar::new("d1", 10.0, 10.0, 10.0, 10.0)), None);
/// assert_eq!(sma.compute(&Bar::new("d2", 20.0, 20.0, 20.0, 20.0)), None);
/// assert_eq!(sma.compute(&Bar::new("d3", 30.0, 30.0, 30.0, 30.0)), Some(20.0));
/// ```
pub trait Indicator: Sized + Clone + Display + Debug {
    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Computed output type. `f64` for simple indicators,
    /// a struct for composite ones (e.g. Bollinger Bands).
    type Output: Copy + Send + Sync + Display + Debug;

    /// Creates a new indicator from the given config.
    fn new(config: Self::Config) -> Self;

    /// Feeds the next bar and returns the updated value,
    /// or `None` during warm-up.
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Self::Output>;

    /// Returns the last computed value without advancing state,
    /// or `None` during warm-up.
    fn value(&self) -> Option<Self::Output>;
}
