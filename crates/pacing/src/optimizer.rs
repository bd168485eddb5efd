//! Greedy energy-constrained pacing.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tracks::Track;

use crate::config::PhysicsConfig;
use crate::energy::cumulative_trapezoid;
use crate::errors::PacingError;
use crate::physics::velocity_from_power;
use crate::profiles::RiderProfile;

/// Per-segment outcome of a pacing run, aligned one-to-one with the track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacingResult {
    /// Chosen power on each segment in watts.
    pub powers: Vec<f64>,
    /// Elapsed time at the end of each segment in seconds.
    pub times: Vec<f64>,
    /// Steady speed held on each segment in m/s.
    pub velocities: Vec<f64>,
    /// Segments where the energy ceiling forced the climbing boost off.
    pub fallbacks: usize,
}

impl PacingResult {
    pub fn len(&self) -> usize {
        self.powers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.powers.is_empty()
    }

    pub fn total_time(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Mechanical work done by the end of each segment, in joules.
    ///
    /// Integrated from a standing start at t = 0 with zero power, matching
    /// the history the optimizer budgets against.
    pub fn cumulative_work(&self) -> Vec<f64> {
        let powers: Vec<f64> = std::iter::once(0.0).chain(self.powers.iter().copied()).collect();
        let times: Vec<f64> = std::iter::once(0.0).chain(self.times.iter().copied()).collect();
        cumulative_trapezoid(&powers, &times)
            .into_iter()
            .skip(1)
            .collect()
    }

    /// Time-weighted mean power over the run.
    pub fn average_power(&self) -> f64 {
        let total = self.total_time();
        if total <= 0.0 {
            return 0.0;
        }
        let mut previous = 0.0;
        let mut work = 0.0;
        for (power, time) in self.powers.iter().zip(&self.times) {
            work += power * (time - previous);
            previous = *time;
        }
        work / total
    }
}

/// Allocates power segment by segment under a cumulative energy budget.
///
/// Each segment first gets the rider's local target (critical power, plus
/// the climbing increment on uphill segments). If riding that target would
/// push total work above the rider's energy ceiling, the segment falls back
/// to plain critical power.
#[derive(Debug, Clone, Default)]
pub struct PacingOptimizer {
    physics: PhysicsConfig,
}

impl PacingOptimizer {
    pub fn new(physics: PhysicsConfig) -> Self {
        Self { physics }
    }

    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    /// Runs the greedy allocation over `track` in order.
    ///
    /// Any physics failure aborts the whole run; no partial result is returned.
    pub fn optimize(&self, rider: &RiderProfile, track: &Track) -> Result<PacingResult, PacingError> {
        rider.validate()?;
        self.physics.validate()?;

        let n = track.len();
        let mut powers = Vec::with_capacity(n);
        let mut times = Vec::with_capacity(n);
        let mut velocities = Vec::with_capacity(n);
        let mut fallbacks = 0;

        // History starts at rest: zero power at t = 0.
        let mut last_power = 0.0;
        let mut elapsed = 0.0;
        let mut work = 0.0;

        for (index, segment) in track.iter().enumerate() {
            let mut power = rider.target_power(segment.slope);
            let mut velocity = velocity_from_power(power, segment.slope, &self.physics)?;
            let mut dt = segment.length / velocity;

            let provisional_work = work + 0.5 * (last_power + power) * dt;
            let ceiling = rider.energy_ceiling(elapsed + dt);

            if provisional_work > ceiling && power != rider.critical_power {
                debug!(
                    segment = index,
                    provisional_work, ceiling, "energy ceiling reached, dropping climbing boost"
                );
                power = rider.critical_power;
                velocity = velocity_from_power(power, segment.slope, &self.physics)?;
                dt = segment.length / velocity;
                fallbacks += 1;
            }

            work += 0.5 * (last_power + power) * dt;
            elapsed += dt;
            last_power = power;

            powers.push(power);
            times.push(elapsed);
            velocities.push(velocity);
        }

        info!(
            segments = n,
            total_time = elapsed,
            work,
            fallbacks,
            "pacing optimization complete"
        );

        Ok(PacingResult {
            powers,
            times,
            velocities,
            fallbacks,
        })
    }
}

/// Optimizes pacing with default physics for a rider given by its four magnitudes.
pub fn optimize(
    critical_power_mean: f64,
    critical_power_sd: f64,
    reserve_capacity_kj: f64,
    power_increment: f64,
    track: &Track,
) -> Result<PacingResult, PacingError> {
    let rider = RiderProfile::new(
        critical_power_mean,
        critical_power_sd,
        reserve_capacity_kj,
        power_increment,
    );
    PacingOptimizer::default().optimize(&rider, track)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracks::Segment;

    fn track_of(slopes: &[f64], length: f64) -> Track {
        Track::new(slopes.iter().map(|&s| Segment::straight(length, s)).collect()).unwrap()
    }

    #[test]
    fn test_result_is_aligned_with_track() {
        let track = track_of(&[0.0, 0.02, -0.02, 0.04], 250.0);
        let result = optimize(395.3, 31.8, 22.0, 600.0, &track).unwrap();

        assert_eq!(result.len(), 4);
        assert_eq!(result.times.len(), 4);
        assert_eq!(result.velocities.len(), 4);
        assert!(result.times.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_segment_time_matches_velocity() {
        let track = track_of(&[0.03, -0.01], 400.0);
        let result = optimize(395.3, 31.8, 22.0, 600.0, &track).unwrap();

        let first = 400.0 / result.velocities[0];
        assert!((result.times[0] - first).abs() < 1e-9);
        let second = 400.0 / result.velocities[1];
        assert!((result.times[1] - result.times[0] - second).abs() < 1e-9);
    }

    #[test]
    fn test_small_reserve_forces_fallback() {
        // A long climb with almost no reserve: the boost cannot be afforded.
        let track = track_of(&[0.05; 20], 500.0);
        let result = optimize(395.3, 31.8, 0.5, 600.0, &track).unwrap();

        assert!(result.fallbacks > 0);
        assert!(result.powers.iter().any(|&p| p == 395.3));
    }

    #[test]
    fn test_cumulative_work_of_constant_power() {
        let track = track_of(&[0.0, 0.0], 100.0);
        let result = optimize(300.0, 20.0, 10.0, 100.0, &track).unwrap();
        let work = result.cumulative_work();

        // Ramp from rest over the first segment, then constant.
        let t0 = result.times[0];
        let t1 = result.times[1];
        assert!((work[0] - 150.0 * t0).abs() < 1e-9);
        assert!((work[1] - (150.0 * t0 + 300.0 * (t1 - t0))).abs() < 1e-9);
        assert!((result.average_power() - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_invalid_rider() {
        let track = track_of(&[0.0], 100.0);
        assert!(matches!(
            optimize(-1.0, 31.8, 22.0, 600.0, &track),
            Err(PacingError::InvalidParameter(_))
        ));
    }
}
