//! Configuration types for track synthesis.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TrackError;

/// Named course characters, each mapping to a [`SynthConfig`] preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoursePreset {
    #[default]
    Standard,
    Rolling,
    Technical,
}

impl FromStr for CoursePreset {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "rolling" => Ok(Self::Rolling),
            "technical" => Ok(Self::Technical),
            other => Err(TrackError::invalid(format!("unknown course preset '{other}'"))),
        }
    }
}

/// Tunables for [`TrackSynthesizer`](crate::sources::TrackSynthesizer).
///
/// Every field has a default, so a partial JSON document deserializes into a
/// complete config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Standard deviation of raw per-segment slope noise (rise/run).
    pub slope_sigma: f64,
    /// Standard deviation of raw per-segment turning-angle noise in radians.
    pub turn_sigma: f64,
    /// Width of the centered moving-average filter, in segments.
    pub smoothing_window: usize,
    /// Number of geometry attempts before giving up on the ruggedness constraints.
    pub max_attempts: u32,
    /// A turn counts as sharp when its magnitude exceeds this (radians).
    pub sharp_turn_threshold: f64,
    /// Minimum number of sharp turns an accepted track must contain.
    pub min_sharp_turns: usize,
    /// Accepted tracks have a net turning angle strictly below this (radians).
    pub max_net_turn: f64,
    /// Mean of the per-segment roughness distribution.
    pub roughness_mean: f64,
    /// Standard deviation of the per-segment roughness distribution.
    pub roughness_sigma: f64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            slope_sigma: 0.05,
            turn_sigma: 0.1,
            smoothing_window: 50,
            max_attempts: 50,
            sharp_turn_threshold: 0.08,
            min_sharp_turns: 4,
            max_net_turn: 1.0,
            roughness_mean: 0.5,
            roughness_sigma: 0.1,
        }
    }
}

impl SynthConfig {
    /// Creates the config for a named course character.
    pub fn for_course(preset: CoursePreset) -> Self {
        match preset {
            CoursePreset::Standard => Self::default(),
            CoursePreset::Rolling => Self::rolling(),
            CoursePreset::Technical => Self::technical(),
        }
    }

    /// Gentle rolling terrain: half the slope noise of the default.
    pub fn rolling() -> Self {
        Self {
            slope_sigma: 0.025,
            ..Default::default()
        }
    }

    /// Technical course: steeper pitches, twistier heading, rougher surface.
    pub fn technical() -> Self {
        Self {
            slope_sigma: 0.08,
            turn_sigma: 0.15,
            roughness_mean: 0.65,
            roughness_sigma: 0.15,
            ..Default::default()
        }
    }

    /// Sets the raw slope noise deviation.
    pub fn with_slope_sigma(mut self, sigma: f64) -> Self {
        self.slope_sigma = sigma;
        self
    }

    /// Sets the raw turning-angle noise deviation.
    pub fn with_turn_sigma(mut self, sigma: f64) -> Self {
        self.turn_sigma = sigma;
        self
    }

    /// Sets the moving-average window.
    pub fn with_smoothing_window(mut self, window: usize) -> Self {
        self.smoothing_window = window;
        self
    }

    /// Sets the geometry attempt budget.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Sets the sharpness acceptance rule: at least `count` turns above `threshold`.
    pub fn with_sharp_turns(mut self, threshold: f64, count: usize) -> Self {
        self.sharp_turn_threshold = threshold;
        self.min_sharp_turns = count;
        self
    }

    /// Sets the net-turn acceptance bound.
    pub fn with_max_net_turn(mut self, radians: f64) -> Self {
        self.max_net_turn = radians;
        self
    }

    /// Checks that every distribution parameter is usable.
    pub fn validate(&self) -> Result<(), TrackError> {
        let sigmas = [
            ("slope_sigma", self.slope_sigma),
            ("turn_sigma", self.turn_sigma),
            ("roughness_sigma", self.roughness_sigma),
        ];
        for (name, value) in sigmas {
            if !value.is_finite() || value < 0.0 {
                return Err(TrackError::invalid(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !self.roughness_mean.is_finite() {
            return Err(TrackError::invalid("roughness_mean must be finite"));
        }
        if self.smoothing_window == 0 {
            return Err(TrackError::invalid("smoothing_window must be at least 1"));
        }
        if self.max_attempts == 0 {
            return Err(TrackError::invalid("max_attempts must be at least 1"));
        }
        if !self.sharp_turn_threshold.is_finite() || self.sharp_turn_threshold < 0.0 {
            return Err(TrackError::invalid(
                "sharp_turn_threshold must be finite and non-negative",
            ));
        }
        if !(self.max_net_turn > 0.0) {
            return Err(TrackError::invalid("max_net_turn must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SynthConfig::default().validate().is_ok());
        assert!(SynthConfig::rolling().validate().is_ok());
        assert!(SynthConfig::technical().validate().is_ok());
    }

    #[test]
    fn test_course_presets() {
        assert_eq!(SynthConfig::for_course(CoursePreset::Standard), SynthConfig::default());
        assert_eq!(SynthConfig::for_course(CoursePreset::Technical).slope_sigma, 0.08);
        assert_eq!("Rolling".parse::<CoursePreset>(), Ok(CoursePreset::Rolling));
        assert!("mountain".parse::<CoursePreset>().is_err());
    }

    #[test]
    fn test_rejects_negative_sigma() {
        let config = SynthConfig::default().with_slope_sigma(-0.1);
        assert!(matches!(
            config.validate(),
            Err(TrackError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_rejects_zero_window_and_budget() {
        assert!(SynthConfig::default().with_smoothing_window(0).validate().is_err());
        assert!(SynthConfig::default().with_max_attempts(0).validate().is_err());
    }
}
