use std::{fmt::Display, num::NonZero};

use serde::Serialize;

use crate::{
    Ema, EmaConfig, Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource,
};

/// Configuration for the Moving Average Convergence Divergence ([`Macd`])
/// indicator.
///
/// All three averages are plain EMAs seeded with an SMA.
///
/// # Example
///
/// ```
/// use chart_indicators::{IndicatorConfig, MacdConfig};
///
/// let config = MacdConfig::default_12_26_9();
/// assert_eq!(config.fast(), 12);
/// assert_eq!(config.slow(), 26);
/// assert_eq!(config.signal(), 9);
/// assert_eq!(config.warm_up(), 26);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct MacdConfig {
    fast: usize,
    slow: usize,
    signal: usize,
    source: PriceSource,
}

impl IndicatorConfig for MacdConfig {
    type Builder = MacdConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        MacdConfigBuilder::new()
    }

    #[inline]
    fn source(&self) -> PriceSource {
        self.source
    }

    /// The MACD line appears once both averages have seeded; the signal
    /// line needs `signal - 1` further bars on top of that.
    #[inline]
    fn warm_up(&self) -> usize {
        self.fast.max(self.slow)
    }
}

impl MacdConfig {
    /// Fast EMA length.
    #[inline]
    #[must_use]
    pub fn fast(&self) -> usize {
        self.fast
    }

    /// Slow EMA length.
    #[inline]
    #[must_use]
    pub fn slow(&self) -> usize {
        self.slow
    }

    /// Signal EMA length, applied to the MACD line.
    #[inline]
    #[must_use]
    pub fn signal(&self) -> usize {
        self.signal
    }

    /// MACD(12, 26, 9) on closing price.
    #[must_use]
    pub fn default_12_26_9() -> Self {
        Self::builder().build()
    }
}

impl Display for MacdConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MacdConfig({}, {}, {}, {})",
            self.fast, self.slow, self.signal, self.source
        )
    }
}

const DEFAULT_FAST: NonZero<usize> = NonZero::new(12).unwrap();
const DEFAULT_SLOW: NonZero<usize> = NonZero::new(26).unwrap();
const DEFAULT_SIGNAL: NonZero<usize> = NonZero::new(9).unwrap();

/// Builder for [`MacdConfig`].
///
/// Defaults: fast = 12, slow = 26, signal = 9,
/// source = [`PriceSource::Close`].
pub struct MacdConfigBuilder {
    fast: NonZero<usize>,
    slow: NonZero<usize>,
    signal: NonZero<usize>,
    source: PriceSource,
}

impl MacdConfigBuilder {
    fn new() -> Self {
        Self {
            fast: DEFAULT_FAST,
            slow: DEFAULT_SLOW,
            signal: DEFAULT_SIGNAL,
            source: PriceSource::Close,
        }
    }

    #[inline]
    #[must_use]
    pub fn fast(mut self, length: NonZero<usize>) -> Self {
        self.fast = length;
        self
    }

    #[inline]
    #[must_use]
    pub fn slow(mut self, length: NonZero<usize>) -> Self {
        self.slow = length;
        self
    }

    #[inline]
    #[must_use]
    pub fn signal(mut self, length: NonZero<usize>) -> Self {
        self.signal = length;
        self
    }
}

impl IndicatorConfigBuilder<MacdConfig> for MacdConfigBuilder {
    #[inline]
    fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    #[inline]
    fn build(self) -> MacdConfig {
        MacdConfig {
            fast: self.fast.get(),
            slow: self.slow.get(),
            signal: self.signal.get(),
            source: self.source,
        }
    }
}

/// MACD output. Each field is absent until its own average has warmed up:
/// `signal` and `histogram` lag the MACD line by `signal - 1` bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacdValue {
    #[serde(rename = "MACD", skip_serializing_if = "Option::is_none")]
    macd: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    signal: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    histogram: Option<Price>,
}

impl MacdValue {
    /// MACD line: fast EMA − slow EMA.
    #[inline]
    #[must_use]
    pub fn macd(&self) -> Option<Price> {
        self.macd
    }

    /// Signal line: EMA of the MACD line.
    #[inline]
    #[must_use]
    pub fn signal(&self) -> Option<Price> {
        self.signal
    }

    /// Histogram: MACD − signal.
    #[inline]
    #[must_use]
    pub fn histogram(&self) -> Option<Price> {
        self.histogram
    }
}

impl Display for MacdValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn field(value: Option<Price>) -> String {
            value.map_or_else(|| "-".to_owned(), |v| v.to_string())
        }

        write!(
            f,
            "MACD(m: {}, s: {}, h: {})",
            field(self.macd),
            field(self.signal),
            field(self.histogram)
        )
    }
}

/// Moving Average Convergence Divergence (MACD).
///
/// Tracks momentum as the gap between a fast and a slow EMA of price,
/// smoothed by a third EMA (the signal line):
///
/// ```text
/// macd      = EMA(fast) − EMA(slow)
/// signal    = EMA(signal) of macd
/// histogram = macd − signal
/// ```
///
/// Returns `None` until both price EMAs have seeded. After that every bar
/// yields a [`MacdValue`] whose `signal` and `histogram` stay absent until
/// the signal EMA has seen `signal` MACD values.
///
/// # Example
///
/// ```
/// use chart_indicators::{Bar, IndicatorConfig, IndicatorConfigBuilder, Macd, MacdConfig};
/// use std::num::NonZero;
///
/// let config = MacdConfig::builder()
///     .fast(NonZero::new(1).unwrap())
///     .slow(NonZero::new(2).unwrap())
///     .signal(NonZero::new(2).unwrap())
///     .build();
/// let mut macd = Macd::new(config);
/// let bar = |close| Bar::new("2024-01-02", close, close, close, close);
///
/// assert!(macd.compute(&bar(1.0)).is_none());
///
/// // EMA(1) = 3, EMA(2) seed = 2 → macd 1, no signal yet
/// let first = macd.compute(&bar(3.0)).unwrap();
/// assert_eq!(first.macd(), Some(1.0));
/// assert_eq!(first.signal(), None);
/// ```
#[derive(Clone, Debug)]
pub struct Macd {
    config: MacdConfig,
    fast: Ema,
    slow: Ema,
    signal: Ema,
    current: Option<MacdValue>,
}

impl Indicator for Macd {
    type Config = MacdConfig;
    type Output = MacdValue;

    fn new(config: Self::Config) -> Self {
        let ema = |length: usize| {
            Ema::new(
                EmaConfig::builder()
                    .length(
                        NonZero::new(length).expect("MacdConfig lengths are non-zero by construction"),
                    )
                    .source(config.source)
                    .build(),
            )
        };

        Self {
            config,
            fast: ema(config.fast),
            slow: ema(config.slow),
            signal: ema(config.signal),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Self::Output> {
        let price = self.config.source.extract(ohlcv);

        let fast = self.fast.push(price);
        let slow = self.slow.push(price);

        self.current = match (fast, slow) {
            (Some(fast), Some(slow)) => {
                let macd = fast - slow;
                let signal = self.signal.push(macd);

                Some(MacdValue {
                    macd: Some(macd),
                    signal,
                    histogram: signal.map(|signal| macd - signal),
                })
            }
            _ => None,
        };

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Self::Output> {
        self.current
    }
}

impl Display for Macd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD({}, {}, {}, {})",
            self.config.fast, self.config.slow, self.config.signal, self.config.source
        )
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{bar, nz};

    fn macd(fast: usize, slow: usize, signal: usize) -> Macd {
        Macd::new(
            MacdConfig::builder()
                .fast(nz(fast))
                .slow(nz(slow))
                .signal(nz(signal))
                .build(),
        )
    }

    mod warm_up {
        use super::*;

        #[test]
        fn none_until_slow_ema_seeds() {
            let mut macd = macd(2, 3, 2);
            assert!(macd.compute(&bar(1.0, 1)).is_none());
            assert!(macd.compute(&bar(2.0, 2)).is_none());
            assert!(macd.compute(&bar(3.0, 3)).is_some());
        }

        #[test]
        fn signal_lags_macd_line() {
            let mut macd = macd(2, 3, 3);
            let outputs: Vec<_> = (1..=7)
                .filter_map(|day| macd.compute(&bar(f64::from(day), day)))
                .collect();

            assert_eq!(outputs.len(), 5);
            assert!(outputs[0].signal().is_none());
            assert!(outputs[1].signal().is_none());
            assert!(outputs[2].signal().is_some());
            assert!(outputs.iter().all(|v| v.macd().is_some()));
            assert!(
                outputs
                    .iter()
                    .all(|v| v.signal().is_some() == v.histogram().is_some())
            );
        }

        #[test]
        fn default_warm_up() {
            let mut macd = Macd::new(MacdConfig::default_12_26_9());
            let count = (1..=40)
                .filter_map(|day| macd.compute(&bar(100.0 + f64::from(day), day)))
                .count();
            // 40 - 26 + 1
            assert_eq!(count, 15);
        }
    }

    mod computation {
        use super::*;

        #[test]
        fn hand_computed_values() {
            // fast EMA(1) = price, slow EMA(2): α = 2/3, signal EMA(2)
            // prices 1, 3, 6, 10
            // slow: seed (1+3)/2 = 2, then 2 + 2/3·(6-2) = 14/3, then 14/3 + 2/3·(10-14/3) = 74/9
            // macd: 3-2 = 1, 6-14/3 = 4/3, 10-74/9 = 16/9
            // signal: seed (1 + 4/3)/2 = 7/6, then 7/6 + 2/3·(16/9 - 7/6) = 85/54
            let mut macd = macd(1, 2, 2);
            assert!(macd.compute(&bar(1.0, 1)).is_none());

            let v = macd.compute(&bar(3.0, 2)).unwrap();
            assert_eq!(v.macd(), Some(1.0));
            assert_eq!(v.signal(), None);
            assert_eq!(v.histogram(), None);

            let v = macd.compute(&bar(6.0, 3)).unwrap();
            assert!((v.macd().unwrap() - 4.0 / 3.0).abs() < 1e-12);
            assert!((v.signal().unwrap() - 7.0 / 6.0).abs() < 1e-12);
            assert!((v.histogram().unwrap() - 1.0 / 6.0).abs() < 1e-12);

            let v = macd.compute(&bar(10.0, 4)).unwrap();
            assert!((v.macd().unwrap() - 16.0 / 9.0).abs() < 1e-12);
            assert!((v.signal().unwrap() - 85.0 / 54.0).abs() < 1e-12);
        }

        #[test]
        fn histogram_is_macd_minus_signal() {
            let mut macd = macd(3, 5, 2);
            for (day, close) in (1..).zip([5.0, 7.0, 6.0, 9.0, 11.0, 10.0, 13.0, 12.0, 15.0]) {
                if let Some(v) = macd.compute(&bar(close, day))
                    && let (Some(m), Some(s), Some(h)) = (v.macd(), v.signal(), v.histogram())
                {
                    assert_eq!(h, m - s);
                }
            }
        }

        #[test]
        fn constant_prices_give_zero_lines() {
            let mut macd = macd(2, 4, 2);
            let mut last = None;
            for day in 1..=10 {
                last = macd.compute(&bar(42.0, day));
            }
            let v = last.unwrap();
            assert_eq!(v.macd(), Some(0.0));
            assert_eq!(v.signal(), Some(0.0));
            assert_eq!(v.histogram(), Some(0.0));
        }
    }

    mod output {
        use super::*;

        #[test]
        fn serializes_only_present_fields() {
            let mut macd = macd(1, 2, 2);
            macd.compute(&bar(1.0, 1));
            let json = serde_json::to_string(&macd.compute(&bar(3.0, 2)).unwrap()).unwrap();
            assert_eq!(json, r#"{"MACD":1.0}"#);
        }

        #[test]
        fn display() {
            assert_eq!(
                Macd::new(MacdConfig::default_12_26_9()).to_string(),
                "MACD(12, 26, 9, Close)"
            );
            let value = MacdValue {
                macd: Some(1.5),
                signal: None,
                histogram: None,
            };
            assert_eq!(value.to_string(), "MACD(m: 1.5, s: -, h: -)");
        }
    }
}
