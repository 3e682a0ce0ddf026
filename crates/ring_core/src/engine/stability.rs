//! Center of mass and support-region stability.
//!
//! The support region is the planted foot (a point) or the segment between
//! both planted feet, grown by the support radius. Stability maps the
//! signed distance from the planar center of mass to that region onto
//! [0, 1] over twice the radius.

use serde::{Deserialize, Serialize};

use crate::engine::config::StabilityConfig;
use crate::engine::frame::{FootContact, SegmentState};
use crate::engine::types::{planar, Vec2, Vec3};

/// Per-segment mass floor
const MIN_SEGMENT_MASS: f32 = 1e-4;
/// Below this total mass the reference point stands in for the CoM
const MIN_TOTAL_MASS: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StabilityReading {
    pub stability01: f32,
    /// Positive inside the support radius, negative outside; −1 airborne
    pub signed_distance: f32,
    /// Planar unit direction from the support region toward the CoM
    pub outward: Vec2,
    pub com: Vec3,
    pub com_velocity: Vec3,
}

impl StabilityReading {
    pub fn is_unstable(&self) -> bool {
        self.signed_distance < 0.0
    }

    /// CoM speed away from the support region, negative when moving back over it
    pub fn outward_speed(&self) -> f32 {
        planar(&self.com_velocity).dot(&self.outward)
    }
}

/// Mass-weighted center of mass; `fallback` when the rig has no mass.
pub fn center_of_mass(segments: &[SegmentState], fallback: Vec3) -> Vec3 {
    let (total, sum) = segments.iter().fold((0.0f32, Vec3::zeros()), |(total, sum), s| {
        let m = s.mass.max(MIN_SEGMENT_MASS);
        (total + m, sum + s.position * m)
    });
    if total > MIN_TOTAL_MASS {
        sum / total
    } else {
        fallback
    }
}

pub fn center_of_mass_velocity(segments: &[SegmentState]) -> Vec3 {
    let (total, sum) = segments.iter().fold((0.0f32, Vec3::zeros()), |(total, sum), s| {
        let m = s.mass.max(MIN_SEGMENT_MASS);
        (total + m, sum + s.velocity * m)
    });
    if total > MIN_TOTAL_MASS {
        sum / total
    } else {
        Vec3::zeros()
    }
}

/// Distance from `p` to segment `ab` and the closest point on it.
pub fn distance_to_segment(p: &Vec2, a: &Vec2, b: &Vec2) -> (f32, Vec2) {
    let ab = b - a;
    let ab2 = ab.norm_squared();
    if ab2 < 1e-8 {
        return ((p - a).norm(), *a);
    }
    let t = ((p - a).dot(&ab) / ab2).clamp(0.0, 1.0);
    let closest = a + ab * t;
    ((p - closest).norm(), closest)
}

/// Stability of a CoM over the given feet (left, right).
pub fn measure(
    segments: &[SegmentState],
    fallback: Vec3,
    feet: &[FootContact; 2],
    cfg: &StabilityConfig,
) -> StabilityReading {
    let com = center_of_mass(segments, fallback);
    let com_velocity = center_of_mass_velocity(segments);
    let (stability01, signed_distance, outward) = stability_2d(&planar(&com), feet, cfg.support_foot_radius);
    StabilityReading { stability01, signed_distance, outward, com, com_velocity }
}

/// (stability01, signed distance, outward direction) for a planar CoM.
pub fn stability_2d(com: &Vec2, feet: &[FootContact; 2], support_radius: f32) -> (f32, f32, Vec2) {
    let [left, right] = feet;
    let closest = match (left.grounded, right.grounded) {
        (false, false) => return (0.0, -1.0, Vec2::zeros()),
        (true, true) => distance_to_segment(com, &planar(&left.position), &planar(&right.position)).1,
        (true, false) => planar(&left.position),
        (false, true) => planar(&right.position),
    };

    let r = support_radius.max(0.01);
    let offset = com - closest;
    let signed = r - offset.norm();
    let stability01 = ((signed + r) / (2.0 * r)).clamp(0.0, 1.0);
    let outward = if offset.norm_squared() > 1e-8 { offset.normalize() } else { Vec2::zeros() };
    (stability01, signed, outward)
}

/// Unstable penalty plus the outward-momentum term. Zero while stable.
pub fn stability_penalty(reading: &StabilityReading, cfg: &StabilityConfig) -> f32 {
    if !reading.is_unstable() {
        return 0.0;
    }
    let mut penalty = cfg.unstable_penalty;
    let outward_speed = reading.outward_speed();
    if outward_speed > 0.0 {
        penalty += cfg.momentum_to_edge_penalty_scale * outward_speed;
    }
    penalty
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::BodyPart;
    use proptest::prelude::*;

    fn foot(x: f32, z: f32, grounded: bool) -> FootContact {
        FootContact { position: Vec3::new(x, 0.05, z), grounded }
    }

    fn segment(mass: f32, position: Vec3, velocity: Vec3) -> SegmentState {
        SegmentState {
            part: BodyPart::Hips,
            mass,
            position,
            velocity,
            angular_velocity: Vec3::zeros(),
            strength01: 0.0,
        }
    }

    #[test]
    fn test_airborne_is_zero() {
        let feet = [foot(0.0, 0.0, false), foot(0.3, 0.0, false)];
        let (s, d, out) = stability_2d(&Vec2::zeros(), &feet, 0.14);
        assert_eq!(s, 0.0);
        assert_eq!(d, -1.0);
        assert_eq!(out, Vec2::zeros());
    }

    #[test]
    fn test_centered_between_feet_is_max() {
        let feet = [foot(-0.15, 0.0, true), foot(0.15, 0.0, true)];
        let (s, d, _) = stability_2d(&Vec2::new(0.0, 0.0), &feet, 0.14);
        assert!((s - 1.0).abs() < 1e-6);
        assert!((d - 0.14).abs() < 1e-6);
    }

    #[test]
    fn test_single_foot_uses_point() {
        let feet = [foot(0.0, 0.0, true), foot(5.0, 0.0, false)];
        let (s, d, out) = stability_2d(&Vec2::new(0.14, 0.0), &feet, 0.14);
        assert!(d.abs() < 1e-6);
        assert!((s - 0.5).abs() < 1e-6);
        assert!((out.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_com_weighting_and_fallback() {
        let segs = [
            segment(1.0, Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0)),
            segment(3.0, Vec3::new(4.0, 1.0, 0.0), Vec3::zeros()),
        ];
        let com = center_of_mass(&segs, Vec3::zeros());
        assert!((com.x - 3.0).abs() < 1e-5);
        assert!((center_of_mass_velocity(&segs).x - 0.25).abs() < 1e-5);

        let fallback = Vec3::new(9.0, 9.0, 9.0);
        assert_eq!(center_of_mass(&[], fallback), fallback);
        assert_eq!(center_of_mass_velocity(&[]), Vec3::zeros());
    }

    #[test]
    fn test_penalty_adds_outward_momentum() {
        let cfg = StabilityConfig::default();
        let feet = [foot(0.0, 0.0, true), foot(0.0, 0.0, false)];
        let segs = [segment(10.0, Vec3::new(0.5, 1.0, 0.0), Vec3::new(2.0, 0.0, 0.0))];
        let reading = measure(&segs, Vec3::zeros(), &feet, &cfg);
        assert!(reading.is_unstable());
        let p = stability_penalty(&reading, &cfg);
        assert!((p - (cfg.unstable_penalty + cfg.momentum_to_edge_penalty_scale * 2.0)).abs() < 1e-6);

        // falling back toward the foot: flat unstable penalty only
        let back = [segment(10.0, Vec3::new(0.5, 1.0, 0.0), Vec3::new(-2.0, 0.0, 0.0))];
        let reading = measure(&back, Vec3::zeros(), &feet, &cfg);
        assert!((stability_penalty(&reading, &cfg) - cfg.unstable_penalty).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_stability_monotone_in_distance(
            ax in -1.0f32..1.0, az in -1.0f32..1.0,
            bx in -1.0f32..1.0, bz in -1.0f32..1.0,
            px in -3.0f32..3.0, pz in -3.0f32..3.0,
            qx in -3.0f32..3.0, qz in -3.0f32..3.0,
        ) {
            let feet = [foot(ax, az, true), foot(bx, bz, true)];
            let (a, b) = (Vec2::new(ax, az), Vec2::new(bx, bz));
            let (p, q) = (Vec2::new(px, pz), Vec2::new(qx, qz));

            let (dp, _) = distance_to_segment(&p, &a, &b);
            let (dq, _) = distance_to_segment(&q, &a, &b);
            let (sp, _, _) = stability_2d(&p, &feet, 0.14);
            let (sq, _, _) = stability_2d(&q, &feet, 0.14);

            // closer to the support region is never less stable
            if dp < dq {
                prop_assert!(sp >= sq - 1e-5);
            } else if dq < dp {
                prop_assert!(sq >= sp - 1e-5);
            }
        }
    }
}
