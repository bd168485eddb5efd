//! Closed-loop synthetic course generation.
//!
//! A course is a [`Track`]: an ordered list of equal-length [`Segment`]s, each
//! carrying slope, turning angle and surface roughness. The synthesizer
//! guarantees that every loop it emits closes on itself in the plane, covers
//! exactly the requested distance and returns to its starting height.
//!
//! # Quick Start
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use tracks::prelude::*;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let result = TrackSynthesizer::default().generate(100, 1000.0, &mut rng)?;
//!
//! assert_eq!(result.track.len(), 100);
//! assert!(result.track.net_elevation_change().abs() < 1e-6);
//! # Ok::<(), tracks::errors::TrackError>(())
//! ```

pub mod config;
pub mod errors;
pub mod models;
pub mod sources;
pub mod summary;
pub mod terrain;

pub use errors::TrackError;
pub use models::{Position, Segment, SynthesizedTrack, Track};
pub use sources::generate_track;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{CoursePreset, SynthConfig};
    pub use crate::errors::TrackError;
    pub use crate::models::{Position, Segment, SynthesizedTrack, Track};
    pub use crate::sources::{TrackSynthesizer, generate_track};
    pub use crate::summary::{TrackSummary, summarize};
    pub use crate::terrain::ElevationGenerator;
}
