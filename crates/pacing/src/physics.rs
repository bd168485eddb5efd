//! Steady-state cycling force balance.
//!
//! At constant speed on a grade α the rider's power equals aerodynamic drag
//! plus gravity plus rolling resistance:
//!
//! ```text
//! P = ½·CdA·ρ·v³ + m·g·(sin α + Crr·cos α)·v
//! ```
//!
//! Solving for `v` means finding the positive real root of a cubic with no
//! quadratic term.

use std::f64::consts::TAU;

use crate::config::PhysicsConfig;
use crate::errors::PacingError;

/// Real roots of `a·x³ + b·x² + c·x + d = 0`, in no particular order.
///
/// Degenerate leading coefficients fall through to the quadratic and linear
/// cases. Repeated roots are reported once per multiplicity class.
pub fn real_cubic_roots(a: f64, b: f64, c: f64, d: f64) -> Vec<f64> {
    if a == 0.0 {
        return real_quadratic_roots(b, c, d);
    }

    let (b, c, d) = (b / a, c / a, d / a);
    let shift = b / 3.0;

    // Depressed cubic t³ + p·t + q = 0 with x = t - b/3.
    let p = c - b * b / 3.0;
    let q = 2.0 * b * b * b / 27.0 - b * c / 3.0 + d;
    let discriminant = (q / 2.0).powi(2) + (p / 3.0).powi(3);

    if discriminant > 0.0 {
        // One real root. Pick the cube root that avoids cancellation.
        let s = discriminant.sqrt();
        let u = -q.signum() * (q.abs() / 2.0 + s).cbrt();
        let v = if u != 0.0 { -p / (3.0 * u) } else { 0.0 };
        vec![u + v - shift]
    } else if discriminant == 0.0 {
        if p == 0.0 {
            vec![-shift]
        } else {
            vec![3.0 * q / p - shift, -3.0 * q / (2.0 * p) - shift]
        }
    } else {
        // Three distinct real roots; p < 0 here.
        let r = 2.0 * (-p / 3.0).sqrt();
        let cos_arg = (3.0 * q / (2.0 * p) * (-3.0 / p).sqrt()).clamp(-1.0, 1.0);
        let phi = cos_arg.acos() / 3.0;
        (0..3)
            .map(|k| r * (phi - TAU * k as f64 / 3.0).cos() - shift)
            .collect()
    }
}

fn real_quadratic_roots(a: f64, b: f64, c: f64) -> Vec<f64> {
    if a == 0.0 {
        return if b == 0.0 { Vec::new() } else { vec![-c / b] };
    }
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        Vec::new()
    } else if discriminant == 0.0 {
        vec![-b / (2.0 * a)]
    } else {
        let sq = discriminant.sqrt();
        let q = -0.5 * (b + b.signum() * sq);
        if q == 0.0 {
            vec![0.0, -b / a]
        } else {
            vec![q / a, c / q]
        }
    }
}

/// Steady speed in m/s that `power` watts sustains on `slope` (rise/run).
///
/// Fails with [`PacingError::NoPositiveRoot`] when the power is not a
/// positive finite number or the force balance has no positive finite root.
pub fn velocity_from_power(
    power: f64,
    slope: f64,
    physics: &PhysicsConfig,
) -> Result<f64, PacingError> {
    if !power.is_finite() || power <= 0.0 {
        return Err(PacingError::NoPositiveRoot { power, slope });
    }

    let alpha = slope.atan();
    let a = 0.5 * physics.drag_area * physics.air_density;
    let c = physics.system_mass()
        * physics.gravity
        * (alpha.sin() + physics.rolling_resistance * alpha.cos());

    // With P > 0 the cubic has exactly one positive root; take the largest
    // in case rounding nudges a spurious one above zero.
    real_cubic_roots(a, 0.0, c, -power)
        .into_iter()
        .filter(|v| v.is_finite() && *v > 0.0)
        .max_by(f64::total_cmp)
        .ok_or(PacingError::NoPositiveRoot { power, slope })
}

/// Power in watts needed to hold `velocity` on `slope`; the inverse of
/// [`velocity_from_power`].
pub fn power_at_velocity(velocity: f64, slope: f64, physics: &PhysicsConfig) -> f64 {
    let alpha = slope.atan();
    let drag = 0.5 * physics.drag_area * physics.air_density * velocity.powi(3);
    let resist = physics.system_mass()
        * physics.gravity
        * (alpha.sin() + physics.rolling_resistance * alpha.cos())
        * velocity;
    drag + resist
}
