//! Noise series and the filters that shape them.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::errors::TrackError;

/// Draws `n` independent samples from a zero-mean Gaussian with standard deviation `sigma`.
pub fn gaussian_series(n: usize, sigma: f64, rng: &mut impl Rng) -> Result<Vec<f64>, TrackError> {
    let normal = Normal::new(0.0, sigma)
        .map_err(|e| TrackError::invalid(format!("noise sigma {sigma}: {e}")))?;
    Ok((0..n).map(|_| normal.sample(rng)).collect())
}

/// Centered moving average.
///
/// Element `i` is the mean of `data[i - window/2 ..= i + window/2]`, with the
/// window clamped to the slice bounds. When the window is wider than the data
/// every element averages whatever is available on each side, so short
/// series are smoothed heavily rather than rejected.
pub fn moving_average(data: &[f64], window: usize) -> Vec<f64> {
    let half = window / 2;
    let n = data.len();

    (0..n)
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half + 1).min(n);
            let slice = &data[start..end];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

/// Subtracts the sample mean so the series sums to zero.
pub fn demean(data: &[f64]) -> Vec<f64> {
    if data.is_empty() {
        return Vec::new();
    }
    let mean = data.iter().sum::<f64>() / data.len() as f64;
    data.iter().map(|v| v - mean).collect()
}

/// Smooths then de-means `n` Gaussian samples: locally correlated, globally balanced.
pub fn balanced_noise(
    n: usize,
    sigma: f64,
    window: usize,
    rng: &mut impl Rng,
) -> Result<Vec<f64>, TrackError> {
    let raw = gaussian_series(n, sigma, rng)?;
    Ok(demean(&moving_average(&raw, window)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_moving_average_interior_and_edges() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let smoothed = moving_average(&data, 2);
        // half = 1: edges average two values, interior three
        assert_eq!(smoothed, vec![1.5, 2.0, 3.0, 4.0, 4.5]);
    }

    #[test]
    fn test_moving_average_window_wider_than_data() {
        let data = [1.0, 2.0, 3.0];
        let smoothed = moving_average(&data, 50);
        for value in smoothed {
            assert!((value - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_moving_average_constant_is_fixed_point() {
        let data = vec![0.25; 120];
        assert_eq!(moving_average(&data, 50), data);
    }

    #[test]
    fn test_demean_sums_to_zero() {
        let centered = demean(&[1.0, 4.0, 7.0, 10.0]);
        assert!(centered.iter().sum::<f64>().abs() < 1e-12);
        assert_eq!(centered, vec![-4.5, -1.5, 1.5, 4.5]);
    }

    #[test]
    fn test_balanced_noise_is_deterministic() {
        let a = balanced_noise(200, 0.05, 50, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = balanced_noise(200, 0.05, 50, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
        assert!(a.iter().sum::<f64>().abs() < 1e-12);
    }

    #[test]
    fn test_gaussian_series_rejects_bad_sigma() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(gaussian_series(10, f64::NAN, &mut rng).is_err());
    }
}
