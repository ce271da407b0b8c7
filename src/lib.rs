//! Technical indicators for stock charts.
//!
//! Two layers share one set of indicator state machines:
//!
//! - **Incremental.** [`Sma`], [`Ema`], [`Rsi`], [`Macd`] and [`Bb`] accept
//!   one [`Ohlcv`] bar at a time and return `None` until they have seen
//!   enough data. Each exposes [`new`](Sma::new), [`compute`](Sma::compute)
//!   and [`value`](Sma::value) as inherent methods, so no trait import is
//!   needed. Import [`Indicator`] only for generic code.
//! - **Series.** The [`series`] functions run an indicator over a whole bar
//!   slice and return time-stamped [`Sample`]s, right-aligned to the input.
//!
//! Bars from an external source go through [`load_bars`] (or
//! [`prepare_bars`]) first, which sorts them and drops repeated times.
//! [`ChartConfig`] selects indicators and turns their output into
//! [`LineSeries`] for a renderer.
//!
//! ```
//! use chart_indicators::{ChartConfig, load_bars};
//!
//! let bars = load_bars(r#"[
//!     {"time": "2024-01-02", "open": 1, "high": 3, "low": 1, "close": 3},
//!     {"time": "2024-01-01", "open": 1, "high": 1, "low": 1, "close": 1}
//! ]"#).unwrap();
//!
//! let config = ChartConfig::from_json(r#"{"overlays": [{"kind": "sma", "period": 2}]}"#).unwrap();
//! let lines = config.render(&bars);
//!
//! assert_eq!(lines[0].title(), "SMA 2");
//! assert_eq!(lines[0].points()[0].time(), "2024-01-02");
//! assert_eq!(*lines[0].points()[0].value(), 2.0);
//! ```

mod align;
mod bar;
mod bb;
mod ema;
mod error;
mod indicator;
mod macd;
mod overlay;
mod prepare;
mod price_source;
mod price_window;
mod ring_buffer;
mod rsi;
pub mod series;
mod sma;

pub use crate::align::{Sample, align_to_tail};
pub use crate::bar::{Bar, Ohlcv, Price};
pub use crate::error::{Error, Result};
pub use crate::indicator::{Indicator, IndicatorConfig, IndicatorConfigBuilder};
pub use crate::overlay::{ChartConfig, IndicatorOutput, LineSeries, OverlayKind, compute};
pub use crate::prepare::{load_bars, parse_bars, prepare_bars};
pub use crate::price_source::PriceSource;

pub use crate::bb::{Bb, BbConfig, BbConfigBuilder, BbValue, StdDev};
pub use crate::ema::{Ema, EmaConfig, EmaConfigBuilder};
pub use crate::macd::{Macd, MacdConfig, MacdConfigBuilder, MacdValue};
pub use crate::rsi::{Rsi, RsiConfig, RsiConfigBuilder};
pub use crate::sma::{Sma, SmaConfig, SmaConfigBuilder};

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty, $output:ty) => {
        impl $type {
            /// See [`Indicator::new`].
            #[must_use]
            pub fn new(config: $config) -> Self {
                <Self as Indicator>::new(config)
            }

            /// See [`Indicator::compute`].
            #[inline]
            pub fn compute(&mut self, bar: &impl Ohlcv) -> Option<$output> {
                <Self as Indicator>::compute(self, bar)
            }

            /// See [`Indicator::value`].
            #[must_use]
            #[inline]
            pub fn value(&self) -> Option<$output> {
                <Self as Indicator>::value(self)
            }
        }
    };
}

impl_indicator_methods!(Sma, SmaConfig, Price);
impl_indicator_methods!(Ema, EmaConfig, Price);
impl_indicator_methods!(Rsi, RsiConfig, Price);
impl_indicator_methods!(Macd, MacdConfig, MacdValue);
impl_indicator_methods!(Bb, BbConfig, BbValue);

#[cfg(test)]
mod test_util;
