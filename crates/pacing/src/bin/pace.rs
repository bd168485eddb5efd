//! Synthesizes a loop course and paces a rider around it.
//!
//! Run with:
//! ```
//! cargo run -p pacing --bin pace
//! ```
//!
//! `PACING_CONFIG` may name a JSON [`RunConfig`] file; `PACING_SEED`,
//! `PACING_POINTS` and `PACING_LENGTH` override individual fields.
//! `PACING_COURSE` (standard, rolling, technical) and `PACING_RIDER`
//! (time_trial_specialist, climber, recreational) pick presets. The report
//! is written to stdout as JSON.

use std::env;
use std::str::FromStr;

use anyhow::Context;
use pacing::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Distance between power samples in the report, in meters.
const SAMPLE_SPACING_M: f64 = 10.0;

#[derive(Debug, Serialize)]
struct Report<'a> {
    seed: u64,
    constraints_satisfied: bool,
    attempts: u32,
    course: TrackSummary,
    rider: &'a RiderProfile,
    total_time_seconds: f64,
    average_power_watts: f64,
    fallbacks: usize,
    power_by_distance: Vec<(f64, f64)>,
    power_curve: PowerCurve,
}

fn env_override<T: FromStr>(name: &str) -> anyhow::Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => Ok(Some(
            raw.parse::<T>()
                .with_context(|| format!("{name}={raw} is not valid"))?,
        )),
        Err(_) => Ok(None),
    }
}

fn load_config() -> anyhow::Result<RunConfig> {
    let mut config = match env::var("PACING_CONFIG") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading run config {path}"))?;
            RunConfig::from_json(&json).with_context(|| format!("parsing run config {path}"))?
        }
        Err(_) => RunConfig::default(),
    };

    if let Some(seed) = env_override("PACING_SEED")? {
        config.seed = seed;
    }
    if let Some(points) = env_override("PACING_POINTS")? {
        config.point_count = points;
    }
    if let Some(length) = env_override("PACING_LENGTH")? {
        config.total_length = length;
    }
    if let Some(course) = env_override::<CoursePreset>("PACING_COURSE")? {
        config = config.with_course(course);
    }
    if let Some(rider) = env_override::<RiderPreset>("PACING_RIDER")? {
        config = config.with_rider_preset(rider);
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config()?;
    tracing::info!(
        seed = config.seed,
        points = config.point_count,
        length = config.total_length,
        course = ?config.course,
        "Synthesizing course"
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let course = TrackSynthesizer::new(config.synth.clone())
        .generate(config.point_count, config.total_length, &mut rng)
        .context("track synthesis failed")?;
    if !course.constraints_satisfied {
        tracing::warn!("Course is best-effort: ruggedness constraints not met");
    }

    let result = PacingOptimizer::new(config.physics)
        .optimize(&config.rider, &course.track)
        .context("pacing optimization failed")?;
    let profile = build_power_profile(&result, &course.track)?;
    let power_curve = PowerCurve::time_trial(&config.rider, &PowerCurve::default_durations())?;

    let summary = summarize(&course.track, config.synth.sharp_turn_threshold);
    let sample_count = (config.total_length / SAMPLE_SPACING_M).ceil() as usize + 1;

    tracing::info!("Pacing completed!");
    tracing::info!("  Segments: {}", course.track.len());
    tracing::info!("  Elevation gain: {:.1} m", summary.elevation_gain);
    tracing::info!("  Total time: {:.1} s", result.total_time());
    tracing::info!("  Average power: {:.1} W", result.average_power());
    tracing::info!("  Ceiling fallbacks: {}", result.fallbacks);

    let report = Report {
        seed: config.seed,
        constraints_satisfied: course.constraints_satisfied,
        attempts: course.attempts,
        course: summary,
        rider: &config.rider,
        total_time_seconds: result.total_time(),
        average_power_watts: result.average_power(),
        fallbacks: result.fallbacks,
        power_by_distance: profile.sample(0.0, config.total_length, sample_count),
        power_curve,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
