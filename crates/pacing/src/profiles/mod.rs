//! Rider physiological profiles.
//!
//! A profile tells the optimizer how much power a rider can hold
//! indefinitely (critical power), how uncertain that figure is, how large
//! their anaerobic reserve is, and how hard they push on climbs.

mod rider;

pub use rider::{RiderPreset, RiderProfile};
