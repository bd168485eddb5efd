//! Track sources.
//!
//! - [`TrackSynthesizer`]: Generate closed-loop synthetic courses with configurable ruggedness

mod procedural;

pub use procedural::{TrackSynthesizer, generate_track};
