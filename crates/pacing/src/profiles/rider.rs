//! Critical-power rider profile.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::PacingError;

/// Joules per kilojoule; reserves are stored in kJ and budgeted in J.
const JOULES_PER_KJ: f64 = 1000.0;

/// Physiological inputs to a pacing run.
///
/// Based on the two-parameter critical-power model:
/// - Critical power: sustainable output in watts
/// - W′: finite work above critical power, stored in kilojoules
/// - Climbing increment: extra watts added above critical power on uphill segments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiderProfile {
    /// Mean critical power in watts.
    pub critical_power: f64,
    /// Standard deviation of critical power in watts.
    pub critical_power_sd: f64,
    /// Mean anaerobic work capacity (W′) in kilojoules.
    pub reserve_capacity_kj: f64,
    /// Watts added above critical power on climbs.
    pub power_increment: f64,
}

/// Named rider archetypes, each mapping to a [`RiderProfile`] preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiderPreset {
    #[default]
    TimeTrialSpecialist,
    Climber,
    Recreational,
}

impl FromStr for RiderPreset {
    type Err = PacingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "time_trial_specialist" | "tt" => Ok(Self::TimeTrialSpecialist),
            "climber" => Ok(Self::Climber),
            "recreational" => Ok(Self::Recreational),
            other => Err(PacingError::invalid(format!("unknown rider preset '{other}'"))),
        }
    }
}

impl Default for RiderProfile {
    fn default() -> Self {
        Self::time_trial_specialist()
    }
}

impl RiderProfile {
    pub fn new(
        critical_power: f64,
        critical_power_sd: f64,
        reserve_capacity_kj: f64,
        power_increment: f64,
    ) -> Self {
        Self {
            critical_power,
            critical_power_sd,
            reserve_capacity_kj,
            power_increment,
        }
    }

    /// Creates the profile for a named archetype.
    pub fn for_preset(preset: RiderPreset) -> Self {
        match preset {
            RiderPreset::TimeTrialSpecialist => Self::time_trial_specialist(),
            RiderPreset::Climber => Self::climber(),
            RiderPreset::Recreational => Self::recreational(),
        }
    }

    /// Elite time-trial rider (~395 W critical power, 22 kJ reserve).
    pub fn time_trial_specialist() -> Self {
        Self::new(395.3, 31.8, 22.0, 600.0)
    }

    /// Lighter-engined rider with a deep reserve and a modest climbing surge.
    pub fn climber() -> Self {
        Self::new(340.0, 25.0, 28.0, 250.0)
    }

    /// Recreational rider (~220 W critical power).
    pub fn recreational() -> Self {
        Self::new(220.0, 20.0, 15.0, 120.0)
    }

    /// Sets the anaerobic reserve in kilojoules.
    pub fn with_reserve_kj(mut self, kj: f64) -> Self {
        self.reserve_capacity_kj = kj;
        self
    }

    /// W′ in joules.
    pub fn reserve_capacity_joules(&self) -> f64 {
        self.reserve_capacity_kj * JOULES_PER_KJ
    }

    /// Power targeted on a segment of the given slope before any budget check.
    pub fn target_power(&self, slope: f64) -> f64 {
        if slope > 0.0 {
            self.critical_power + self.power_increment
        } else {
            self.critical_power
        }
    }

    /// Upper bound on mechanical work after `elapsed` seconds.
    ///
    /// Sustainable power (inflated by one standard deviation) over the
    /// elapsed time plus the whole anaerobic reserve.
    pub fn energy_ceiling(&self, elapsed: f64) -> f64 {
        (self.critical_power + self.critical_power_sd) * elapsed + self.reserve_capacity_joules()
    }

    /// Rejects any magnitude that is not finite and strictly positive.
    pub fn validate(&self) -> Result<(), PacingError> {
        let fields = [
            ("critical_power", self.critical_power),
            ("critical_power_sd", self.critical_power_sd),
            ("reserve_capacity_kj", self.reserve_capacity_kj),
            ("power_increment", self.power_increment),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(PacingError::invalid(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}
