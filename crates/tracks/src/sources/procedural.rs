//! Procedural closed-loop course synthesis.

use std::f64::consts::{PI, TAU};

use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::{debug, warn};

use crate::config::SynthConfig;
use crate::errors::TrackError;
use crate::models::{Position, Segment, SynthesizedTrack, Track};
use crate::terrain::{ElevationGenerator, balanced_noise};

/// Planar geometry of one closed-loop attempt.
///
/// `xs`/`ys` hold `n + 1` points (the origin plus one per segment end) after
/// the taper correction, so the last point coincides with the first.
#[derive(Debug, Clone)]
struct LoopGeometry {
    xs: Vec<f64>,
    ys: Vec<f64>,
    turning_angles: Vec<f64>,
}

impl LoopGeometry {
    fn sharp_turns(&self, threshold: f64) -> usize {
        self.turning_angles
            .iter()
            .filter(|a| a.abs() > threshold)
            .count()
    }

    fn net_turn(&self) -> f64 {
        self.turning_angles.iter().sum()
    }
}

/// Generates closed-loop synthetic courses.
///
/// Slopes are drawn once per course; the planar loop is re-drawn until it
/// has enough sharp corners and a small enough net rotation, or until the
/// attempt budget runs out.
#[derive(Debug, Clone)]
pub struct TrackSynthesizer {
    config: SynthConfig,
    elevation: ElevationGenerator,
}

impl TrackSynthesizer {
    pub fn new(config: SynthConfig) -> Self {
        let elevation = ElevationGenerator::from_config(&config);
        Self { config, elevation }
    }

    /// Replaces the slope generator (e.g. [`ElevationGenerator::flat`]).
    pub fn with_elevation(mut self, elevation: ElevationGenerator) -> Self {
        self.elevation = elevation;
        self
    }

    /// Synthesizes a loop of `point_count` equal segments totalling `total_length`.
    ///
    /// Never fails because of the ruggedness rules: if no attempt is accepted
    /// the last one is returned with `constraints_satisfied == false`.
    pub fn generate(
        &self,
        point_count: usize,
        total_length: f64,
        rng: &mut impl Rng,
    ) -> Result<SynthesizedTrack, TrackError> {
        if point_count == 0 {
            return Err(TrackError::invalid("point_count must be at least 1"));
        }
        if !total_length.is_finite() || total_length <= 0.0 {
            return Err(TrackError::invalid(format!(
                "total_length must be finite and positive, got {total_length}"
            )));
        }
        self.config.validate()?;

        let segment_length = total_length / point_count as f64;
        let slopes = self.elevation.slopes(point_count, rng)?;

        let mut attempts = 0;
        let mut geometry = None;
        let mut accepted = false;

        while attempts < self.config.max_attempts {
            attempts += 1;
            let candidate = self.closed_loop(point_count, segment_length, rng)?;

            let sharp = candidate.sharp_turns(self.config.sharp_turn_threshold);
            let net = candidate.net_turn();
            accepted = sharp >= self.config.min_sharp_turns && net.abs() < self.config.max_net_turn;
            debug!(attempt = attempts, sharp, net, accepted, "loop geometry attempt");

            geometry = Some(candidate);
            if accepted {
                break;
            }
        }

        let geometry = geometry.ok_or_else(|| TrackError::invalid("no geometry attempt was made"))?;
        if !accepted {
            warn!(
                attempts,
                "could not satisfy sharpness/closure constraints; returning best-effort track"
            );
        }

        let track = self.assemble(&geometry, &slopes, segment_length, rng)?;
        Ok(SynthesizedTrack {
            track,
            constraints_satisfied: accepted,
            attempts,
        })
    }

    /// Draws balanced heading noise, integrates it and tapers the result shut.
    fn closed_loop(
        &self,
        n: usize,
        segment_length: f64,
        rng: &mut impl Rng,
    ) -> Result<LoopGeometry, TrackError> {
        let angles = balanced_noise(n, self.config.turn_sigma, self.config.smoothing_window, rng)?;

        let mut xs = Vec::with_capacity(n + 1);
        let mut ys = Vec::with_capacity(n + 1);
        xs.push(0.0);
        ys.push(0.0);

        let mut heading = 0.0_f64;
        let (mut x, mut y) = (0.0_f64, 0.0_f64);
        for angle in &angles {
            heading += angle;
            x += segment_length * heading.cos();
            y += segment_length * heading.sin();
            xs.push(x);
            ys.push(y);
        }

        // Spread the closure error linearly along the path.
        let x_err = xs[n] - xs[0];
        let y_err = ys[n] - ys[0];
        for i in 0..=n {
            let factor = i as f64 / n as f64;
            xs[i] -= x_err * factor;
            ys[i] -= y_err * factor;
        }

        let headings: Vec<f64> = (0..n)
            .map(|i| (ys[i + 1] - ys[i]).atan2(xs[i + 1] - xs[i]))
            .collect();

        let turning_angles = (0..n)
            .map(|i| {
                if i == 0 {
                    0.0
                } else {
                    normalize_angle(headings[i] - headings[i - 1])
                }
            })
            .collect();

        Ok(LoopGeometry {
            xs,
            ys,
            turning_angles,
        })
    }

    /// Turns loop geometry plus slopes into segments, sampling roughness.
    fn assemble(
        &self,
        geometry: &LoopGeometry,
        slopes: &[f64],
        segment_length: f64,
        rng: &mut impl Rng,
    ) -> Result<Track, TrackError> {
        let roughness = Normal::new(self.config.roughness_mean, self.config.roughness_sigma)
            .map_err(|e| TrackError::invalid(format!("roughness distribution: {e}")))?;

        let heights = ElevationGenerator::elevation_profile(slopes, segment_length);
        let segments = slopes
            .iter()
            .zip(heights)
            .enumerate()
            .map(|(i, (&slope, z))| {
                Segment {
                    position: Position::new(geometry.xs[i + 1], geometry.ys[i + 1], z),
                    length: segment_length,
                    slope,
                    turning_angle: geometry.turning_angles[i],
                    roughness: roughness.sample(rng).clamp(0.0, 1.0),
                }
            })
            .collect();

        Track::new(segments)
    }
}

impl Default for TrackSynthesizer {
    fn default() -> Self {
        Self::new(SynthConfig::default())
    }
}

/// Synthesizes a loop with the default configuration.
pub fn generate_track(
    point_count: usize,
    total_length: f64,
    rng: &mut impl Rng,
) -> Result<SynthesizedTrack, TrackError> {
    TrackSynthesizer::default().generate(point_count, total_length, rng)
}

/// Wraps an angle difference into (-π, π].
fn normalize_angle(mut angle: f64) -> f64 {
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generate_track() {
        let mut rng = StdRng::seed_from_u64(42);
        let result = generate_track(100, 1000.0, &mut rng).unwrap();

        assert_eq!(result.track.len(), 100);
        for segment in &result.track {
            assert_eq!(segment.length, 10.0);
            assert!((0.0..=1.0).contains(&segment.roughness));
            assert!(segment.turning_angle > -PI && segment.turning_angle <= PI);
        }
        assert_eq!(result.track.segments()[0].turning_angle, 0.0);
    }

    #[test]
    fn test_loop_closes_by_construction() {
        let mut rng = StdRng::seed_from_u64(5);
        let result = generate_track(250, 5000.0, &mut rng).unwrap();
        assert!(result.track.closure_distance() < 1e-6);
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            generate_track(0, 1000.0, &mut rng),
            Err(TrackError::InvalidParameter(_))
        ));
        assert!(generate_track(10, 0.0, &mut rng).is_err());
        assert!(generate_track(10, -5.0, &mut rng).is_err());
        assert!(generate_track(10, f64::INFINITY, &mut rng).is_err());
    }

    #[test]
    fn test_exhausted_budget_returns_best_effort() {
        // More sharp turns required than there are segments: never accepted.
        let config = SynthConfig::default()
            .with_sharp_turns(0.08, 1000)
            .with_max_attempts(3);
        let mut rng = StdRng::seed_from_u64(11);
        let result = TrackSynthesizer::new(config)
            .generate(60, 600.0, &mut rng)
            .unwrap();

        assert!(!result.constraints_satisfied);
        assert_eq!(result.attempts, 3);
        assert_eq!(result.track.len(), 60);
        assert!((result.track.total_length() - 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_segment_track() {
        let mut rng = StdRng::seed_from_u64(8);
        let result = generate_track(1, 50.0, &mut rng).unwrap();
        assert_eq!(result.track.len(), 1);
        assert!(!result.constraints_satisfied);
        assert!(result.track.net_elevation_change().abs() < 1e-12);
    }

    #[test]
    fn test_flat_elevation_keeps_grades_gentle() {
        let mut rng = StdRng::seed_from_u64(21);
        let result = TrackSynthesizer::default()
            .with_elevation(ElevationGenerator::flat())
            .generate(300, 3000.0, &mut rng)
            .unwrap();
        assert!(result.track.iter().all(|s| s.slope.abs() < 0.01));
        assert!(result.track.net_elevation_change().abs() < 1e-9);
    }

    #[test]
    fn test_segment_heights_follow_elevation_profile() {
        let mut rng = StdRng::seed_from_u64(33);
        let result = generate_track(200, 2000.0, &mut rng).unwrap();
        let slopes: Vec<f64> = result.track.iter().map(|s| s.slope).collect();
        let profile = ElevationGenerator::elevation_profile(&slopes, 10.0);

        for (segment, z) in result.track.iter().zip(&profile) {
            assert_eq!(segment.position.z, *z);
        }
    }

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((normalize_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-12);
        assert_eq!(normalize_angle(-PI), PI);
        assert_eq!(normalize_angle(0.5), 0.5);
    }
}
