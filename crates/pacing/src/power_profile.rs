//! Continuous power-versus-distance profile.

use serde::{Deserialize, Serialize};
use tracks::Track;

use crate::errors::PacingError;
use crate::optimizer::PacingResult;

/// Piecewise-linear map from distance travelled to target power.
///
/// Breakpoints sit at each segment's end distance. Inside the sampled range
/// values are linearly interpolated; outside it the first or last interval's
/// line is extended. Evaluating exactly at a breakpoint returns that
/// breakpoint's power unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerProfile {
    distances: Vec<f64>,
    powers: Vec<f64>,
}

impl PowerProfile {
    /// Builds the profile from a pacing result and the track it was computed on.
    pub fn from_result(result: &PacingResult, track: &Track) -> Result<Self, PacingError> {
        if result.len() != track.len() {
            return Err(PacingError::invalid(format!(
                "pacing result has {} segments but track has {}",
                result.len(),
                track.len()
            )));
        }
        Self::new(track.cumulative_distances(), result.powers.clone())
    }

    /// Builds a profile from raw breakpoints; distances must be strictly increasing.
    pub fn new(distances: Vec<f64>, powers: Vec<f64>) -> Result<Self, PacingError> {
        if distances.is_empty() || distances.len() != powers.len() {
            return Err(PacingError::invalid(
                "power profile needs matching, non-empty distance and power tables",
            ));
        }
        if distances.windows(2).any(|w| !(w[1] > w[0])) {
            return Err(PacingError::invalid(
                "power profile distances must be strictly increasing",
            ));
        }
        Ok(Self { distances, powers })
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    pub fn powers(&self) -> &[f64] {
        &self.powers
    }

    /// Power at `distance` meters.
    pub fn evaluate(&self, distance: f64) -> f64 {
        let n = self.distances.len();
        if n == 1 {
            return self.powers[0];
        }

        let upper = match self.distances.binary_search_by(|d| d.total_cmp(&distance)) {
            Ok(i) => return self.powers[i],
            Err(i) => i.clamp(1, n - 1),
        };
        let lower = upper - 1;

        let (x0, x1) = (self.distances[lower], self.distances[upper]);
        let (y0, y1) = (self.powers[lower], self.powers[upper]);
        y0 + (distance - x0) * (y1 - y0) / (x1 - x0)
    }

    /// `count` evenly spaced `(distance, power)` samples over `[start, end]`.
    pub fn sample(&self, start: f64, end: f64, count: usize) -> Vec<(f64, f64)> {
        match count {
            0 => Vec::new(),
            1 => vec![(start, self.evaluate(start))],
            _ => {
                let step = (end - start) / (count - 1) as f64;
                (0..count)
                    .map(|i| {
                        let d = start + step * i as f64;
                        (d, self.evaluate(d))
                    })
                    .collect()
            }
        }
    }
}

/// Builds the power-vs-distance function for a pacing run.
pub fn build_power_profile(result: &PacingResult, track: &Track) -> Result<PowerProfile, PacingError> {
    PowerProfile::from_result(result, track)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> PowerProfile {
        PowerProfile::new(vec![10.0, 20.0, 40.0], vec![400.0, 1000.0, 400.0]).unwrap()
    }

    #[test]
    fn test_passes_through_breakpoints() {
        let p = profile();
        assert_eq!(p.evaluate(10.0), 400.0);
        assert_eq!(p.evaluate(20.0), 1000.0);
        assert_eq!(p.evaluate(40.0), 400.0);
    }

    #[test]
    fn test_interpolates_between_breakpoints() {
        let p = profile();
        assert!((p.evaluate(15.0) - 700.0).abs() < 1e-9);
        assert!((p.evaluate(30.0) - 700.0).abs() < 1e-9);
    }

    #[test]
    fn test_extrapolates_with_edge_slopes() {
        let p = profile();
        // First interval rises 60 W/m, last falls 30 W/m.
        assert!((p.evaluate(0.0) - (-200.0)).abs() < 1e-9);
        assert!((p.evaluate(50.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_breakpoint_is_constant() {
        let p = PowerProfile::new(vec![100.0], vec![395.3]).unwrap();
        assert_eq!(p.evaluate(-5.0), 395.3);
        assert_eq!(p.evaluate(1e6), 395.3);
    }

    #[test]
    fn test_rejects_unsorted_or_mismatched_tables() {
        assert!(PowerProfile::new(vec![1.0, 1.0], vec![1.0, 2.0]).is_err());
        assert!(PowerProfile::new(vec![2.0, 1.0], vec![1.0, 2.0]).is_err());
        assert!(PowerProfile::new(vec![1.0], vec![1.0, 2.0]).is_err());
        assert!(PowerProfile::new(Vec::new(), Vec::new()).is_err());
    }

    #[test]
    fn test_sample_spans_range() {
        let samples = profile().sample(10.0, 40.0, 4);
        assert_eq!(samples.len(), 4);
        assert_eq!(samples[0], (10.0, 400.0));
        assert_eq!(samples[3], (40.0, 400.0));
        assert!((samples[1].1 - 1000.0).abs() < 1e-9);
    }
}
