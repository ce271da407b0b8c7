// src/test_util.rs

use crate::Bar;
use std::num::NonZero;

/// Asserts that two `f64` values are approximately equal using a
/// relative epsilon of `4 * f64::EPSILON`.
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e) = ($actual, $expected);
        assert!(
            (a - e).abs() <= e.abs() * 4.0 * f64::EPSILON,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

pub fn nz(n: usize) -> NonZero<usize> {
    NonZero::new(n).unwrap()
}

/// Bar with OHLC all equal to `close`, stamped with a synthetic day.
pub fn bar(close: f64, day: u32) -> Bar {
    Bar::new(format!("2024-01-{day:02}"), close, close, close, close)
}

/// Bars for a sequence of closes, stamped day 1, 2, 3, ...
pub fn bars(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .zip(1..)
        .map(|(&close, day)| bar(close, day))
        .collect()
}
