//! Slope and elevation profiles for closed loops.

use rand::Rng;

use super::smoothing::balanced_noise;
use crate::config::SynthConfig;
use crate::errors::TrackError;

/// Generates spatially correlated slopes whose net rise over a loop is zero.
///
/// Raw Gaussian slope noise is passed through a centered moving average and
/// then de-meaned, so a rider who completes the loop ends at the height they
/// started from.
#[derive(Debug, Clone)]
pub struct ElevationGenerator {
    /// Standard deviation of raw slope noise (rise/run).
    sigma: f64,
    /// Moving-average window in segments.
    window: usize,
}

impl ElevationGenerator {
    pub fn new(sigma: f64, window: usize) -> Self {
        Self { sigma, window }
    }

    pub fn from_config(config: &SynthConfig) -> Self {
        Self::new(config.slope_sigma, config.smoothing_window)
    }

    /// Flat-ish terrain with barely any grade.
    pub fn flat() -> Self {
        Self::new(0.005, 50)
    }

    /// Draws one slope per segment.
    pub fn slopes(&self, point_count: usize, rng: &mut impl Rng) -> Result<Vec<f64>, TrackError> {
        balanced_noise(point_count, self.sigma, self.window, rng)
    }

    /// Running height at the end of each segment, starting from zero.
    pub fn elevation_profile(slopes: &[f64], segment_length: f64) -> Vec<f64> {
        slopes
            .iter()
            .scan(0.0, |z, slope| {
                *z += slope * segment_length;
                Some(*z)
            })
            .collect()
    }
}

impl Default for ElevationGenerator {
    fn default() -> Self {
        Self::from_config(&SynthConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_slopes_have_zero_mean() {
        let mut rng = StdRng::seed_from_u64(42);
        let slopes = ElevationGenerator::default().slopes(500, &mut rng).unwrap();
        assert_eq!(slopes.len(), 500);
        assert!(slopes.iter().sum::<f64>().abs() < 1e-9);
    }

    #[test]
    fn test_profile_returns_to_start_height() {
        let mut rng = StdRng::seed_from_u64(3);
        let slopes = ElevationGenerator::default().slopes(300, &mut rng).unwrap();
        let profile = ElevationGenerator::elevation_profile(&slopes, 10.0);
        assert_eq!(profile.len(), 300);
        assert!(profile.last().unwrap().abs() < 1e-6);
    }

    #[test]
    fn test_flat_is_gentler_than_default() {
        let flat = ElevationGenerator::flat()
            .slopes(400, &mut StdRng::seed_from_u64(9))
            .unwrap();
        let max = flat.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()));
        assert!(max < 0.01);
    }
}
