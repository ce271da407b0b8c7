//! Chart overlay selection and the hand-off to a line-series renderer.
//!
//! The renderer draws independent line series keyed by bar time. Bands and
//! MACD are therefore split into one series per line.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    BbValue, MacdValue, Ohlcv, Price, Result, Sample,
    series::{self, DEFAULT_BB_PERIOD, DEFAULT_BB_STD_DEV, DEFAULT_RSI_PERIOD},
};

const DEFAULT_MA_PERIOD: usize = 20;

fn default_ma_period() -> usize {
    DEFAULT_MA_PERIOD
}

fn default_bb_period() -> usize {
    DEFAULT_BB_PERIOD
}

fn default_bb_std_dev() -> f64 {
    DEFAULT_BB_STD_DEV
}

fn default_rsi_period() -> usize {
    DEFAULT_RSI_PERIOD
}

/// An indicator a chart can display.
///
/// Deserializes from `{"kind": "sma", "period": 20}`; omitted parameters
/// take the chart defaults.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OverlayKind {
    Sma {
        #[serde(default = "default_ma_period")]
        period: usize,
    },
    Ema {
        #[serde(default = "default_ma_period")]
        period: usize,
    },
    Bollinger {
        #[serde(default = "default_bb_period")]
        period: usize,
        #[serde(default = "default_bb_std_dev")]
        std_dev: f64,
    },
    Rsi {
        #[serde(default = "default_rsi_period")]
        period: usize,
    },
    Macd,
}

impl OverlayKind {
    #[must_use]
    pub fn default_sma() -> Self {
        Self::Sma {
            period: DEFAULT_MA_PERIOD,
        }
    }

    #[must_use]
    pub fn default_ema() -> Self {
        Self::Ema {
            period: DEFAULT_MA_PERIOD,
        }
    }

    #[must_use]
    pub fn default_bollinger() -> Self {
        Self::Bollinger {
            period: DEFAULT_BB_PERIOD,
            std_dev: DEFAULT_BB_STD_DEV,
        }
    }

    #[must_use]
    pub fn default_rsi() -> Self {
        Self::Rsi {
            period: DEFAULT_RSI_PERIOD,
        }
    }

    /// True for indicators drawn on the price scale, false for
    /// oscillators that need their own pane.
    #[must_use]
    pub fn is_overlay(&self) -> bool {
        matches!(
            self,
            Self::Sma { .. } | Self::Ema { .. } | Self::Bollinger { .. }
        )
    }
}

impl Display for OverlayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sma { period } => write!(f, "SMA {period}"),
            Self::Ema { period } => write!(f, "EMA {period}"),
            Self::Bollinger { period, .. } => write!(f, "BB {period}"),
            Self::Rsi { period } => write!(f, "RSI {period}"),
            Self::Macd => write!(f, "MACD"),
        }
    }
}

/// Time-aligned output of one indicator, before it is split into lines.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "samples", rename_all = "lowercase")]
pub enum IndicatorOutput {
    Line(Vec<Sample<Price>>),
    Bands(Vec<Sample<BbValue>>),
    Macd(Vec<Sample<MacdValue>>),
}

impl IndicatorOutput {
    /// Number of bars that received a value.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Line(samples) => samples.len(),
            Self::Bands(samples) => samples.len(),
            Self::Macd(samples) => samples.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Splits the output into renderer lines titled after `title`.
    ///
    /// Bands become `"{title} Upper"` and `"{title} Lower"`; the middle band
    /// is the SMA and is left to an SMA overlay. MACD becomes `"{title}"`,
    /// `"{title} Signal"` and `"{title} Histogram"`, each holding only the
    /// samples where that field is present.
    #[must_use]
    pub fn into_series(self, title: &str) -> Vec<LineSeries> {
        match self {
            Self::Line(samples) => vec![LineSeries::new(title, samples)],
            Self::Bands(samples) => vec![
                LineSeries::project(format!("{title} Upper"), &samples, |v| Some(v.upper())),
                LineSeries::project(format!("{title} Lower"), &samples, |v| Some(v.lower())),
            ],
            Self::Macd(samples) => vec![
                LineSeries::project(title, &samples, MacdValue::macd),
                LineSeries::project(format!("{title} Signal"), &samples, MacdValue::signal),
                LineSeries::project(format!("{title} Histogram"), &samples, MacdValue::histogram),
            ],
        }
    }
}

/// One line for the renderer: a title and `{time, value}` points.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineSeries {
    title: String,
    points: Vec<Sample<Price>>,
}

impl LineSeries {
    #[must_use]
    pub fn new(title: impl Into<String>, points: Vec<Sample<Price>>) -> Self {
        Self {
            title: title.into(),
            points,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn points(&self) -> &[Sample<Price>] {
        &self.points
    }

    fn project<T>(
        title: impl Into<String>,
        samples: &[Sample<T>],
        field: impl Fn(&T) -> Option<Price>,
    ) -> Self {
        let points = samples
            .iter()
            .filter_map(|s| field(s.value()).map(|v| Sample::new(s.time(), v)))
            .collect();
        Self::new(title, points)
    }
}

/// Runs the indicator selected by `kind` over prepared bars.
#[must_use]
pub fn compute<B: Ohlcv>(bars: &[B], kind: OverlayKind) -> IndicatorOutput {
    match kind {
        OverlayKind::Sma { period } => IndicatorOutput::Line(series::sma(bars, period)),
        OverlayKind::Ema { period } => IndicatorOutput::Line(series::ema(bars, period)),
        OverlayKind::Rsi { period } => IndicatorOutput::Line(series::rsi(bars, period)),
        OverlayKind::Bollinger { period, std_dev } => {
            IndicatorOutput::Bands(series::bollinger(bars, period, std_dev))
        }
        OverlayKind::Macd => IndicatorOutput::Macd(series::macd(bars)),
    }
}

/// The indicators a user has switched on. None are on by default.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub overlays: Vec<OverlayKind>,
}

impl ChartConfig {
    /// Reads a chart config such as
    /// `{"overlays": [{"kind": "sma"}, {"kind": "bollinger", "std_dev": 2.5}]}`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) for malformed JSON or an
    /// unknown indicator kind.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Computes every selected indicator and flattens the result into
    /// renderer lines, in selection order.
    ///
    /// ```
    /// use chart_indicators::{Bar, ChartConfig, OverlayKind};
    ///
    /// let bars: Vec<_> = (1..=25)
    ///     .map(|d| Bar::new(format!("2024-01-{d:02}"), 1.0, 1.0, 1.0, f64::from(d)))
    ///     .collect();
    /// let config = ChartConfig {
    ///     overlays: vec![OverlayKind::default_sma(), OverlayKind::default_bollinger()],
    /// };
    ///
    /// let titles: Vec<_> = config.render(&bars).iter().map(|s| s.title().to_owned()).collect();
    /// assert_eq!(titles, ["SMA 20", "BB 20 Upper", "BB 20 Lower"]);
    /// ```
    #[must_use]
    pub fn render<B: Ohlcv>(&self, bars: &[B]) -> Vec<LineSeries> {
        self.overlays
            .iter()
            .flat_map(|&kind| {
                let output = compute(bars, kind);
                debug!(%kind, samples = output.len(), "computed overlay");
                output.into_series(&kind.to_string())
            })
            .collect()
    }
}
