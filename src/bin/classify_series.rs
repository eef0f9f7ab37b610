//! Classify a weather series from a JSON file
//!
//! Reads a JSON array of weather points, runs the snowpack analyzer and
//! prints one line per window followed by the series aggregates.
//!
//! Run with: cargo run --features cli --bin classify_series -- series.json [--json]
//!
//! Environment:
//! - THRESHOLDS_PATH: optional JSON file overriding default thresholds
//! - RUST_LOG: log filter (default: snowpack_classifier=info,warn)

use anyhow::{Context, Result};
use snowpack_classifier::{Analyzer, Thresholds, WeatherPoint};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snowpack_classifier=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut series_path: Option<PathBuf> = None;
    let mut json_output = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json_output = true,
            _ => series_path = Some(PathBuf::from(arg)),
        }
    }
    let series_path = series_path
        .context("Usage: classify_series <series.json> [--json]")?;

    let thresholds = match std::env::var("THRESHOLDS_PATH") {
        Ok(path) => {
            tracing::info!("Loading thresholds: {}", path);
            Thresholds::load(&PathBuf::from(path))?
        }
        Err(_) => Thresholds::default(),
    };

    let contents = fs::read_to_string(&series_path)
        .with_context(|| format!("Failed to read series file: {:?}", series_path))?;
    let points: Vec<WeatherPoint> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse series file: {:?}", series_path))?;
    tracing::info!("Loaded {} weather points from {:?}", points.len(), series_path);

    let analyzer = Analyzer::new().with_thresholds(thresholds);
    let analysis = analyzer.analyze(&points)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    for entry in &analysis.assessments {
        println!(
            "{}  {:<24} {:<6}  {}",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.result.snow_type.display_name(),
            entry.result.confidence.key(),
            entry.result.reason_key
        );
    }

    let stats = &analysis.statistics;
    println!();
    println!("Windows:             {}", stats.point_count);
    println!("Total snowfall:      {:.1} cm", stats.total_snowfall);
    println!("Total rainfall:      {:.1} mm", stats.total_rainfall);
    if let Some(avg) = stats.average_snowfall {
        println!("Average snowfall:    {:.2} cm", avg);
    }
    if let Some(avg) = stats.average_temperature {
        println!("Average temperature: {:.1} °C", avg);
    }

    match analysis.current_assessment() {
        Ok(current) => println!(
            "Current surface:     {} ({} confidence)",
            current.snow_type, current.confidence
        ),
        Err(e) => println!("Current surface:     unavailable ({})", e),
    }

    Ok(())
}
