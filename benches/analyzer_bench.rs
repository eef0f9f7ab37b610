//! Analyzer throughput over a season of 6-hour windows
//!
//! Run with: cargo bench --bench analyzer_bench

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use snowpack_classifier::{analyze_all, Analyzer, WeatherPoint};

/// 150 days of 6-hour windows with storms, thaws and cold snaps
fn season(offset: usize) -> Vec<WeatherPoint> {
    let start = Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap();
    (0..600)
        .map(|i| {
            let day = (i / 4 + offset) as f64;
            let max_temp_c = 4.0 * (day / 9.0).sin() - 3.0 + (i % 4) as f64;
            WeatherPoint {
                timestamp: start + Duration::hours(6 * i as i64),
                window_hours: 6,
                snowfall_cm: if (i + offset) % 11 == 0 {
                    4.5
                } else if i % 5 == 0 {
                    0.8
                } else {
                    0.0
                },
                rainfall_mm: if max_temp_c > 2.0 { 1.2 } else { 0.0 },
                min_temp_c: max_temp_c - 7.0,
                max_temp_c,
                humidity: 0.5 + 0.1 * ((i % 5) as f64),
            }
        })
        .collect()
}

fn bench_single_season(c: &mut Criterion) {
    let analyzer = Analyzer::new();
    let points = season(0);

    c.bench_function("analyze_season_600_windows", |b| {
        b.iter(|| analyzer.analyze(black_box(&points)))
    });
}

fn bench_batch(c: &mut Criterion) {
    let analyzer = Analyzer::new();
    let inputs: Vec<Vec<WeatherPoint>> = (0..32).map(season).collect();

    c.bench_function("analyze_all_32_seasons", |b| {
        b.iter(|| analyze_all(&analyzer, black_box(&inputs)))
    });
}

criterion_group!(benches, bench_single_season, bench_batch);
criterion_main!(benches);
