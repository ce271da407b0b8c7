#[path = "../tests/fixtures/mod.rs"]
mod fixtures;

use crate::fixtures::load_reference_bars;

use chart_indicators::{
    Bar, Bb, BbConfig, ChartConfig, Ema, EmaConfig, Macd, MacdConfig, OverlayKind, Rsi,
    RsiConfig, Sma, SmaConfig, load_bars, series,
};
use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use std::{hint::black_box, num::NonZero, time::Duration};

fn nz(n: usize) -> NonZero<usize> {
    NonZero::new(n).expect("non zero value")
}

fn stream_benchmarks(c: &mut Criterion) {
    let bars = load_reference_bars();
    let mut group = c.benchmark_group("stream");
    group.throughput(Throughput::Elements(bars.len() as u64));
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(10));

    macro_rules! stream_bench {
        ($name:expr, $ind_type:ty, $config:expr) => {
            group.bench_function($name, |b| {
                b.iter_batched(
                    || <$ind_type>::new($config),
                    |mut ind| {
                        for bar in &bars {
                            black_box(ind.compute(bar));
                        }
                    },
                    BatchSize::SmallInput,
                );
            });
        };
    }

    stream_bench!("sma20", Sma, SmaConfig::close(nz(20)));
    stream_bench!("sma200", Sma, SmaConfig::close(nz(200)));
    stream_bench!("ema20", Ema, EmaConfig::close(nz(20)));
    stream_bench!("ema200", Ema, EmaConfig::close(nz(200)));
    stream_bench!("bb20", Bb, BbConfig::close(nz(20)));
    stream_bench!("bb200", Bb, BbConfig::close(nz(200)));
    stream_bench!("rsi14", Rsi, RsiConfig::close(nz(14)));
    stream_bench!("rsi140", Rsi, RsiConfig::close(nz(140)));
    stream_bench!("macd", Macd, MacdConfig::default_12_26_9());

    group.finish();
}

fn series_benchmarks(c: &mut Criterion) {
    let bars = load_reference_bars();
    let mut group = c.benchmark_group("series");
    group.throughput(Throughput::Elements(bars.len() as u64));
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("sma20", |b| b.iter(|| series::sma(black_box(&bars), 20)));
    group.bench_function("ema20", |b| b.iter(|| series::ema(black_box(&bars), 20)));
    group.bench_function("rsi14", |b| b.iter(|| series::rsi(black_box(&bars), 14)));
    group.bench_function("bb20", |b| {
        b.iter(|| series::bollinger(black_box(&bars), 20, 2.0));
    });
    group.bench_function("macd", |b| b.iter(|| series::macd(black_box(&bars))));

    let config = ChartConfig {
        overlays: vec![
            OverlayKind::default_sma(),
            OverlayKind::default_ema(),
            OverlayKind::default_bollinger(),
            OverlayKind::default_rsi(),
            OverlayKind::Macd,
        ],
    };
    group.bench_function("render_all", |b| b.iter(|| config.render(black_box(&bars))));

    group.finish();
}

fn prepare_benchmarks(c: &mut Criterion) {
    let bars = load_reference_bars();
    let mut group = c.benchmark_group("prepare");
    group.throughput(Throughput::Elements(bars.len() as u64));

    // Newest first, as a proxy might serve them.
    let payload: Vec<Bar> = bars
        .iter()
        .rev()
        .map(|b| Bar::new(b.time.as_str(), b.open, b.high, b.low, b.close).with_volume(b.volume))
        .collect();
    let json = serde_json::to_string(&payload).expect("bars serialize");

    group.bench_function("load_bars", |b| {
        b.iter_batched(
            || json.as_str(),
            |json| black_box(load_bars(json)),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(
    benches,
    stream_benchmarks,
    series_benchmarks,
    prepare_benchmarks
);
criterion_main!(benches);
