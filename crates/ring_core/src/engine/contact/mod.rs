//! Contact capture and force estimation.
//!
//! Two paths feed the judge:
//! - discrete collisions reported by the physics engine (impulse based, ground truth)
//! - a per-tick sphere sweep along each glove's travel, for strikes fast
//!   enough to tunnel through a target between steps
//!
//! A discrete hit on an appendage suppresses that appendage's sweep for the
//! same tick. Every candidate passes the appendage's `AppendageSensor`
//! dedup before it becomes a `ContactEvent`.

mod calibration;
mod sensor;
mod sweep;

pub use calibration::ForceCalibration;
pub use sensor::{Admission, AppendageSensor};
pub use sweep::{sweep_sphere_vs_aabb, Aabb, AabbSweepWorld, NoSweep, SweepCollider, SweepHit, SweepQuery};

use serde::{Deserialize, Serialize};

use crate::engine::timestep::MIN_DT;
use crate::engine::types::{Appendage, BodyRef, Corner, SurfaceClass, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactSource {
    Discrete,
    Swept,
}

/// Kinematics of one striking appendage at the moment of sampling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppendageFrame {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Glove forward axis (knuckle direction)
    pub forward: Vec3,
    pub mass: f32,
}

impl Default for AppendageFrame {
    fn default() -> Self {
        Self { position: Vec3::zeros(), velocity: Vec3::zeros(), forward: Vec3::z(), mass: 1.0 }
    }
}

/// Raw collision as the physics engine reports it. Any missing reference
/// makes the collision malformed and it is dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscreteCollision {
    pub attacker: Option<Corner>,
    pub appendage: Appendage,
    pub victim: Option<BodyRef>,
    pub surface: Option<SurfaceClass>,
    /// First contact point; `None` when the engine reported no contact points
    pub point: Option<Vec3>,
    pub normal: Option<Vec3>,
    pub impulse: Vec3,
    pub relative_velocity: Vec3,
    /// Striking appendage at callback time
    pub striker: AppendageFrame,
}

/// A fighter-on-fighter contact that passed dedup, ready for judgment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub attacker: Corner,
    pub appendage: Appendage,
    pub victim: Corner,
    pub surface: SurfaceClass,
    pub point: Vec3,
    pub normal: Vec3,
    pub appendage_position: Vec3,
    pub appendage_velocity: Vec3,
    pub appendage_forward: Vec3,
    /// Only discrete collisions carry one
    pub relative_velocity: Option<Vec3>,
    pub source: ContactSource,
    pub force: f32,
}

/// Impulse-derived force, `|J| / dt`.
pub fn impulse_force(impulse: &Vec3, dt: f32) -> f32 {
    finite_or_zero(impulse.norm() / dt.max(MIN_DT))
}

/// Velocity-derived force, `m * |v| / dt`. Uncalibrated.
pub fn approx_force(frame: &AppendageFrame, dt: f32) -> f32 {
    finite_or_zero(frame.mass.max(0.0) * frame.velocity.norm() / dt.max(MIN_DT))
}

#[inline]
fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse_force_divides_by_dt() {
        let f = impulse_force(&Vec3::new(3.0, 4.0, 0.0), 0.02);
        assert!((f - 250.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_dt_is_floored() {
        let f = impulse_force(&Vec3::new(1.0, 0.0, 0.0), 0.0);
        assert!((f - 1.0 / MIN_DT).abs() < 1.0);
    }

    #[test]
    fn test_approx_force() {
        let frame = AppendageFrame { velocity: Vec3::new(0.0, 0.0, 6.0), mass: 0.8, ..Default::default() };
        assert!((approx_force(&frame, 0.02) - 240.0).abs() < 1e-3);
    }

    #[test]
    fn test_non_finite_force_is_zero() {
        let frame = AppendageFrame { velocity: Vec3::new(f32::NAN, 0.0, 0.0), ..Default::default() };
        assert_eq!(approx_force(&frame, 0.02), 0.0);
    }
}
