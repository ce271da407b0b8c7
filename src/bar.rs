use serde::{Deserialize, Serialize};

/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// OHLCV bar data used as input to all indicators.
///
/// Implement this on your own candle type to avoid per-request
/// conversion. Indicators accept `&impl Ohlcv` and extract the
/// configured [`PriceSource`](crate::PriceSource) internally.
///
/// # Time
///
/// [`time`](Ohlcv::time) is an opaque identifier. Indicators never parse
/// or compare it: batch functions copy it verbatim onto the aligned output
/// sample. Ordering is the caller's job (see [`prepare_bars`](crate::prepare_bars)).
///
/// # Example
///
/// ```
/// use chart_indicators::{Ohlcv, Price};
///
/// struct MyCandle {
///     day: String,
///     o: f64, h: f64, l: f64, c: f64,
/// }
///
/// impl Ohlcv for MyCandle {
///     fn time(&self) -> &str { &self.day }
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
/// }
/// ```
pub trait Ohlcv {
    /// Bar timestamp, e.g. `2024-01-31` or `2024-01-31 09:15`.
    fn time(&self) -> &str;

    /// Opening price of the bar.
    fn open(&self) -> Price;

    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Closing price of the bar.
    fn close(&self) -> Price;

    /// Traded volume, if the source reports it. Defaults to `None`.
    fn volume(&self) -> Option<f64> {
        None
    }
}

/// One OHLC(V) sample as served by the bar-source proxy route.
///
/// Serializes to and from `{time, open, high, low, close, volume}`;
/// `volume` may be missing or `null`.
///
/// ```
/// use chart_indicators::{Bar, Ohlcv};
///
/// let bar: Bar = serde_json::from_str(
///     r#"{"time":"2024-03-01","open":10.0,"high":12.0,"low":9.5,"close":11.0}"#,
/// ).unwrap();
///
/// assert_eq!(bar.time(), "2024-03-01");
/// assert_eq!(bar.volume(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    time: String,
    open: Price,
    high: Price,
    low: Price,
    close: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    volume: Option<f64>,
}

impl Bar {
    #[must_use]
    pub fn new(
        time: impl Into<String>,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
    ) -> Self {
        Self {
            time: time.into(),
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    /// Returns the bar with `volume` set.
    #[must_use]
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }
}

impl Ohlcv for Bar {
    #[inline]
    fn time(&self) -> &str {
        &self.time
    }

    #[inline]
    fn open(&self) -> Price {
        self.open
    }

    #[inline]
    fn high(&self) -> Price {
        self.high
    }

    #[inline]
    fn low(&self) -> Price {
        self.low
    }

    #[inline]
    fn close(&self) -> Price {
        self.close
    }

    #[inline]
    fn volume(&self) -> Option<f64> {
        self.volume
    }
}
