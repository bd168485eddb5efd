//! Energy-constrained pacing for synthetic loop courses.
//!
//! Given a [`tracks::Track`] and a [`RiderProfile`](profiles::RiderProfile),
//! the [`PacingOptimizer`](optimizer::PacingOptimizer) walks the course once,
//! choosing critical power on flats and descents and a boosted target on
//! climbs, as long as total mechanical work stays under the rider's energy
//! ceiling.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pacing::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(2022);
//! let course = TrackSynthesizer::default().generate(1000, 5000.0, &mut rng)?;
//!
//! let result = optimize(395.3, 31.8, 22.0, 600.0, &course.track)?;
//! let profile = build_power_profile(&result, &course.track)?;
//! let watts_at_2km = profile.evaluate(2000.0);
//! ```

pub mod config;
pub mod energy;
pub mod errors;
pub mod optimizer;
pub mod physics;
pub mod power_curve;
pub mod power_profile;
pub mod profiles;

pub use errors::PacingError;
pub use optimizer::{PacingOptimizer, PacingResult, optimize};
pub use power_profile::{PowerProfile, build_power_profile};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{PhysicsConfig, RunConfig};
    pub use crate::errors::PacingError;
    pub use crate::optimizer::{PacingOptimizer, PacingResult, optimize};
    pub use crate::physics::velocity_from_power;
    pub use crate::power_curve::PowerCurve;
    pub use crate::power_profile::{PowerProfile, build_power_profile};
    pub use crate::profiles::{RiderPreset, RiderProfile};
    pub use tracks::prelude::*;
}
