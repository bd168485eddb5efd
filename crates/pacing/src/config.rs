//! Configuration types for pacing runs.

use serde::{Deserialize, Serialize};
use tracks::config::{CoursePreset, SynthConfig};

use crate::errors::PacingError;
use crate::profiles::{RiderPreset, RiderProfile};

/// Physical constants of the rider-plus-bike system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Rider mass in kilograms.
    pub rider_mass_kg: f64,
    /// Bike and equipment mass in kilograms.
    pub equipment_mass_kg: f64,
    /// Gravitational acceleration in m/s².
    pub gravity: f64,
    /// Air density in kg/m³.
    pub air_density: f64,
    /// Drag area CdA in m².
    pub drag_area: f64,
    /// Rolling-resistance coefficient.
    pub rolling_resistance: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            rider_mass_kg: 72.6,
            equipment_mass_kg: 8.0,
            gravity: 9.81,
            air_density: 1.225,
            drag_area: 0.276,
            rolling_resistance: 0.004,
        }
    }
}

impl PhysicsConfig {
    /// Rider plus equipment.
    pub fn system_mass(&self) -> f64 {
        self.rider_mass_kg + self.equipment_mass_kg
    }

    /// Sets the rider mass in kilograms.
    pub fn with_rider_mass(mut self, kg: f64) -> Self {
        self.rider_mass_kg = kg;
        self
    }

    /// Sets the drag area CdA.
    pub fn with_drag_area(mut self, cda: f64) -> Self {
        self.drag_area = cda;
        self
    }

    /// Rejects non-physical constants.
    pub fn validate(&self) -> Result<(), PacingError> {
        let positive = [
            ("system mass", self.system_mass()),
            ("gravity", self.gravity),
            ("air_density", self.air_density),
            ("drag_area", self.drag_area),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PacingError::invalid(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        if !self.rolling_resistance.is_finite() || self.rolling_resistance < 0.0 {
            return Err(PacingError::invalid(
                "rolling_resistance must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// Everything one `pace` run needs: course shape, physics and rider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Seed for the course generator.
    pub seed: u64,
    /// Number of segments on the course.
    pub point_count: usize,
    /// Course length in meters.
    pub total_length: f64,
    /// Named course character; when set it replaces `synth`.
    pub course: Option<CoursePreset>,
    /// Named rider archetype; when set it replaces `rider`.
    pub rider_preset: Option<RiderPreset>,
    pub synth: SynthConfig,
    pub physics: PhysicsConfig,
    pub rider: RiderProfile,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 2022,
            point_count: 1000,
            total_length: 5000.0,
            course: None,
            rider_preset: None,
            synth: SynthConfig::default(),
            physics: PhysicsConfig::default(),
            rider: RiderProfile::default(),
        }
    }
}

impl RunConfig {
    /// Parses a JSON document; missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.apply_presets())
    }

    /// Selects a course character, replacing the synthesis settings.
    pub fn with_course(mut self, preset: CoursePreset) -> Self {
        self.course = Some(preset);
        self.apply_presets()
    }

    /// Selects a rider archetype, replacing the rider profile.
    pub fn with_rider_preset(mut self, preset: RiderPreset) -> Self {
        self.rider_preset = Some(preset);
        self.apply_presets()
    }

    fn apply_presets(mut self) -> Self {
        if let Some(course) = self.course {
            self.synth = SynthConfig::for_course(course);
        }
        if let Some(rider) = self.rider_preset {
            self.rider = RiderProfile::for_preset(rider);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_mass() {
        let physics = PhysicsConfig::default();
        assert!((physics.system_mass() - 80.6).abs() < 1e-12);
        assert!(physics.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_drag() {
        let physics = PhysicsConfig::default().with_drag_area(0.0);
        assert!(physics.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = RunConfig::from_json(
            r#"{ "seed": 7, "rider": { "critical_power": 300.0, "critical_power_sd": 20.0,
                 "reserve_capacity_kj": 18.0, "power_increment": 150.0 } }"#,
        )
        .unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.point_count, 1000);
        assert_eq!(config.rider.critical_power, 300.0);
        assert_eq!(config.physics, PhysicsConfig::default());
        assert_eq!(config.synth, SynthConfig::default());
    }

    #[test]
    fn test_json_presets_replace_synth_and_rider() {
        let config =
            RunConfig::from_json(r#"{ "course": "technical", "rider_preset": "climber" }"#)
                .unwrap();

        assert_eq!(config.synth, SynthConfig::for_course(CoursePreset::Technical));
        assert_eq!(config.rider, RiderProfile::climber());
        assert_eq!(config.physics, PhysicsConfig::default());
    }

    #[test]
    fn test_preset_builders() {
        let config = RunConfig::default()
            .with_course(CoursePreset::Rolling)
            .with_rider_preset(RiderPreset::Recreational);

        assert_eq!(config.synth.slope_sigma, 0.025);
        assert_eq!(config.rider.critical_power, 220.0);
        assert!(RunConfig::from_json(r#"{ "course": "alpine" }"#).is_err());
    }
}
