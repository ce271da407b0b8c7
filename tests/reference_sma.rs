mod fixtures;

use chart_indicators::{Sma, SmaConfig, series};
use std::num::NonZero;

use crate::fixtures::{assert_near, assert_times, load_ref_values, load_reference_bars};

const REF_PATH: &str = "tests/fixtures/data/sma-20-close.csv";

/// Tolerance: 1e-9.
/// SMA is pure arithmetic over a fixed window; the running sum only adds
/// representation noise.
const TOLERANCE: f64 = 1e-9;

#[test]
fn sma_20_close_matches_reference() {
    let bars = load_reference_bars();
    let reference = load_ref_values(REF_PATH);

    let samples = series::sma(&bars, 20);

    assert_times(&samples, &reference, |r| r.time.as_str());
    for (i, (sample, expected)) in samples.iter().zip(&reference).enumerate() {
        assert_near(
            *sample.value(),
            expected.expected,
            TOLERANCE,
            &format!("SMA(20) at sample {i} ({})", expected.time),
        );
    }
}

#[test]
fn sma_20_first_sample_on_twentieth_bar() {
    let bars = load_reference_bars();
    let samples = series::sma(&bars, 20);

    assert_eq!(samples.len(), bars.len() - 19);
    assert_eq!(samples[0].time(), bars[19].time);
}

#[test]
fn sma_20_incremental_matches_series() {
    let bars = load_reference_bars();
    let samples = series::sma(&bars, 20);

    let mut sma = Sma::new(SmaConfig::close(NonZero::new(20).unwrap()));
    let incremental: Vec<_> = bars.iter().filter_map(|bar| sma.compute(bar)).collect();

    let batch: Vec<_> = samples.iter().map(|s| *s.value()).collect();
    assert_eq!(incremental, batch);
}
