//! Terrain shaping utilities.
//!
//! Slopes and headings both start life as Gaussian noise; this module
//! smooths and balances that noise so it is locally random but sums to zero
//! over a loop.

mod elevation;
mod smoothing;

pub use elevation::ElevationGenerator;
pub use smoothing::{balanced_noise, demean, gaussian_series, moving_average};
