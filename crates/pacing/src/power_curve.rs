//! Time-trial power-duration curve.

use serde::{Deserialize, Serialize};

use crate::errors::PacingError;
use crate::profiles::RiderProfile;

/// Longest effort covered by [`PowerCurve::default_durations`], in seconds.
const HOUR_SECONDS: f64 = 3600.0;
const DEFAULT_SAMPLES: usize = 1000;

/// Sustainable power as a function of effort duration.
///
/// Uses a hyperbolic decay from `CP + increment` toward critical power:
///
/// ```text
/// P(t) = CP + increment / (1 + t/τ),   τ = W′ / increment
/// ```
///
/// so the area above critical power over an effort approaches the rider's
/// anaerobic reserve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerCurve {
    pub durations: Vec<f64>,
    pub powers: Vec<f64>,
}

impl PowerCurve {
    pub fn time_trial(rider: &RiderProfile, durations: &[f64]) -> Result<Self, PacingError> {
        rider.validate()?;
        let tau = time_constant(rider);
        let powers = durations
            .iter()
            .map(|&t| rider.critical_power + rider.power_increment / (1.0 + t / tau))
            .collect();
        Ok(Self {
            durations: durations.to_vec(),
            powers,
        })
    }

    /// One second to one hour, evenly spaced.
    pub fn default_durations() -> Vec<f64> {
        let step = (HOUR_SECONDS - 1.0) / (DEFAULT_SAMPLES - 1) as f64;
        (0..DEFAULT_SAMPLES)
            .map(|i| 1.0 + step * i as f64)
            .collect()
    }

    /// Power predicted for an effort lasting `seconds`.
    pub fn power_at(rider: &RiderProfile, seconds: f64) -> f64 {
        rider.critical_power + rider.power_increment / (1.0 + seconds / time_constant(rider))
    }
}

/// τ in seconds: how long the increment could be held on W′ alone.
fn time_constant(rider: &RiderProfile) -> f64 {
    rider.reserve_capacity_joules() / rider.power_increment
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_durations_span_an_hour() {
        let durations = PowerCurve::default_durations();
        assert_eq!(durations.len(), 1000);
        assert_eq!(durations[0], 1.0);
        assert!((durations[999] - 3600.0).abs() < 1e-9);
    }

    #[test]
    fn test_curve_decays_toward_critical_power() {
        let rider = RiderProfile::time_trial_specialist();
        let curve = PowerCurve::time_trial(&rider, &PowerCurve::default_durations()).unwrap();

        assert!(curve.powers.windows(2).all(|w| w[1] < w[0]));
        assert!(curve.powers[0] < rider.critical_power + rider.power_increment);
        assert!(*curve.powers.last().unwrap() > rider.critical_power);
    }

    #[test]
    fn test_half_increment_at_time_constant() {
        let rider = RiderProfile::new(400.0, 30.0, 24.0, 600.0);
        // τ = 24 000 J / 600 W = 40 s
        assert!((PowerCurve::power_at(&rider, 40.0) - 700.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_invalid_rider() {
        let rider = RiderProfile::new(400.0, 30.0, 24.0, 0.0);
        assert!(PowerCurve::time_trial(&rider, &[1.0]).is_err());
    }
}
