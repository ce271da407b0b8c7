#![allow(dead_code)]

use chart_indicators::{Ohlcv, Price, Sample};
use serde::{Deserialize, de::DeserializeOwned};

/// Daily OHLCV bar parsed from CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub time: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Ohlcv for RefBar {
    fn time(&self) -> &str {
        &self.time
    }

    fn open(&self) -> Price {
        self.open
    }

    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }

    fn close(&self) -> Price {
        self.close
    }

    fn volume(&self) -> Option<f64> {
        Some(self.volume)
    }
}

/// Reference value with bar time.
#[derive(Debug, Deserialize)]
pub struct RefValue {
    pub time: String,
    pub expected: f64,
}

/// Reference BB value with bar time.
#[derive(Debug, Deserialize)]
pub struct RefBbValue {
    pub time: String,
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Reference MACD value with bar time. Empty cells are absent fields.
#[derive(Debug, Deserialize)]
pub struct RefMacdValue {
    pub time: String,
    pub macd: f64,
    pub signal: Option<f64>,
    pub histogram: Option<f64>,
}

const BARS_PATH: &str = "tests/fixtures/data/bars-1d.csv";

/// Load reference daily bars, ascending and unique by time.
pub fn load_reference_bars() -> Vec<RefBar> {
    load_records(BARS_PATH, "invalid bar record")
}

/// Load single-value reference data (SMA, EMA, RSI).
pub fn load_ref_values(path: &str) -> Vec<RefValue> {
    load_records(path, "invalid reference record")
}

/// Load BB reference data (upper, middle, lower).
pub fn load_bb_ref(path: &str) -> Vec<RefBbValue> {
    load_records(path, "invalid BB reference record")
}

/// Load MACD reference data (macd, signal, histogram).
pub fn load_macd_ref(path: &str) -> Vec<RefMacdValue> {
    load_records(path, "invalid MACD reference record")
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Assert two optional values are both absent or both present and near.
pub fn assert_near_opt(
    actual: Option<f64>,
    expected: Option<f64>,
    tolerance: f64,
    context: &str,
) {
    match (actual, expected) {
        (None, None) => {}
        (Some(a), Some(e)) => assert_near(a, e, tolerance, context),
        (a, e) => panic!("{context}: presence mismatch, expected {e:?}, got {a:?}"),
    }
}

/// Assert that output samples carry exactly the reference times, in order.
pub fn assert_times<T, R>(samples: &[Sample<T>], reference: &[R], time: impl Fn(&R) -> &str) {
    assert_eq!(
        samples.len(),
        reference.len(),
        "sample count differs from reference"
    );
    for (i, (sample, expected)) in samples.iter().zip(reference).enumerate() {
        assert_eq!(sample.time(), time(expected), "time mismatch at sample {i}");
    }
}

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
