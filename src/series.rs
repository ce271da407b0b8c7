//! Whole-series indicator functions for chart rendering.
//!
//! Each function takes an ascending, deduplicated bar slice and returns one
//! [`Sample`] per bar that has enough history, stamped with that bar's time.
//! Too little data, or a zero period, yields an empty `Vec`, never an error
//! and never a placeholder value.
//!
//! ```
//! use chart_indicators::{Bar, series};
//!
//! let bars: Vec<_> = [1.0, 2.0, 3.0, 4.0, 5.0]
//!     .iter()
//!     .zip(1..)
//!     .map(|(&c, d)| Bar::new(format!("2024-01-0{d}"), c, c, c, c))
//!     .collect();
//!
//! let sma = series::sma(&bars, 3);
//! let values: Vec<f64> = sma.iter().map(|s| *s.value()).collect();
//!
//! assert_eq!(values, [2.0, 3.0, 4.0]);
//! assert_eq!(sma[0].time(), "2024-01-03");
//! ```

use std::num::NonZero;

use tracing::{debug, warn};

use crate::{
    Bb, BbConfig, BbValue, Ema, EmaConfig, Indicator, IndicatorConfig, IndicatorConfigBuilder,
    Macd, MacdConfig, MacdValue, Ohlcv, Price, Rsi, RsiConfig, Sample, Sma, SmaConfig, StdDev,
    align_to_tail,
};

/// RSI look-back used by the chart when none is given.
pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Bollinger window used by the chart when none is given.
pub const DEFAULT_BB_PERIOD: usize = 20;

/// Bollinger band multiplier used by the chart when none is given.
pub const DEFAULT_BB_STD_DEV: f64 = 2.0;

/// Runs indicator `I` over `bars` and aligns its output to their times.
///
/// Works with any config, including non-close price sources.
#[must_use]
pub fn calculate<I, B>(bars: &[B], config: I::Config) -> Vec<Sample<I::Output>>
where
    I: Indicator,
    B: Ohlcv,
{
    if bars.len() < config.warm_up() {
        debug!(
            %config,
            bars = bars.len(),
            warm_up = config.warm_up(),
            "not enough bars for indicator"
        );
        return Vec::new();
    }

    let mut indicator = I::new(config);
    let values: Vec<_> = bars
        .iter()
        .filter_map(|bar| indicator.compute(bar))
        .collect();

    align_to_tail(bars, values)
}

/// Simple moving average of closes over `period` bars.
///
/// The first sample lands on `bars[period - 1]`.
#[must_use]
pub fn sma<B: Ohlcv>(bars: &[B], period: usize) -> Vec<Sample<Price>> {
    match positive("sma", period) {
        Some(length) => calculate::<Sma, _>(bars, SmaConfig::close(length)),
        None => Vec::new(),
    }
}

/// Exponential moving average of closes, seeded with the SMA of the first
/// `period` closes.
///
/// The first sample lands on `bars[period - 1]` and equals that SMA.
#[must_use]
pub fn ema<B: Ohlcv>(bars: &[B], period: usize) -> Vec<Sample<Price>> {
    match positive("ema", period) {
        Some(length) => calculate::<Ema, _>(bars, EmaConfig::close(length)),
        None => Vec::new(),
    }
}

/// Wilder's relative strength index of closes, in `[0, 100]`.
///
/// Needs `period` price changes, so the first sample lands on
/// `bars[period]`. See [`DEFAULT_RSI_PERIOD`].
///
/// Values keep full `f64` precision. Web charting libraries commonly round
/// RSI to two decimals; round at display time to match them.
#[must_use]
pub fn rsi<B: Ohlcv>(bars: &[B], period: usize) -> Vec<Sample<Price>> {
    match positive("rsi", period) {
        Some(length) => calculate::<Rsi, _>(bars, RsiConfig::close(length)),
        None => Vec::new(),
    }
}

/// MACD(12, 26, 9) of closes using plain EMAs for both the oscillator and
/// the signal line.
///
/// The first sample lands on `bars[25]`. The first eight samples carry the
/// MACD line only.
#[must_use]
pub fn macd<B: Ohlcv>(bars: &[B]) -> Vec<Sample<MacdValue>> {
    calculate::<Macd, _>(bars, MacdConfig::default_12_26_9())
}

/// Bollinger Bands of closes: SMA(`period`) ± `std_dev` population
/// standard deviations.
///
/// A negative or non-finite `std_dev` yields an empty output.
/// See [`DEFAULT_BB_PERIOD`] and [`DEFAULT_BB_STD_DEV`].
#[must_use]
pub fn bollinger<B: Ohlcv>(bars: &[B], period: usize, std_dev: f64) -> Vec<Sample<BbValue>> {
    let Some(length) = positive("bollinger", period) else {
        return Vec::new();
    };
    let Some(std_dev) = StdDev::try_new(std_dev) else {
        warn!(std_dev, "rejecting bollinger multiplier");
        return Vec::new();
    };

    calculate::<Bb, _>(
        bars,
        BbConfig::builder().length(length).std_dev(std_dev).build(),
    )
}

fn positive(indicator: &'static str, period: usize) -> Option<NonZero<usize>> {
    let length = NonZero::new(period);
    if length.is_none() {
        debug!(indicator, "zero period, no output");
    }
    length
}
