//! Shared identifiers and math aliases.

use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// World-space vector (y is up).
pub type Vec3 = Vector3<f32>;
/// Planar (x, z) vector.
pub type Vec2 = Vector2<f32>;

/// Project a world vector onto the ground plane.
#[inline]
pub fn planar(v: &Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Inverse lerp clamped to [0, 1]. Degenerate ranges map to 0.
#[inline]
pub fn inverse_lerp01(min: f32, max: f32, value: f32) -> f32 {
    let span = max - min;
    if span.abs() < f32::EPSILON {
        return 0.0;
    }
    ((value - min) / span).clamp(0.0, 1.0)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// One of the two competitors in the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    Red,
    Blue,
}

impl Corner {
    pub const BOTH: [Corner; 2] = [Corner::Red, Corner::Blue];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Corner::Red => 0,
            Corner::Blue => 1,
        }
    }

    #[inline]
    pub fn other(self) -> Corner {
        match self {
            Corner::Red => Corner::Blue,
            Corner::Blue => Corner::Red,
        }
    }
}

/// Striking appendage owned by a fighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Appendage {
    LeftHand,
    RightHand,
}

impl Appendage {
    pub const ALL: [Appendage; 2] = [Appendage::LeftHand, Appendage::RightHand];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Appendage::LeftHand => 0,
            Appendage::RightHand => 1,
        }
    }
}

/// Articulated body segments of a fighter rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Hips,
    Chest,
    Spine,
    Head,
    ThighL,
    ShinL,
    FootL,
    ThighR,
    ShinR,
    FootR,
    ArmL,
    ForearmL,
    HandL,
    ArmR,
    ForearmR,
    HandR,
}

/// Number of tracked body parts
pub const PART_COUNT: usize = 16;

impl BodyPart {
    pub const ALL: [BodyPart; PART_COUNT] = [
        BodyPart::Hips,
        BodyPart::Chest,
        BodyPart::Spine,
        BodyPart::Head,
        BodyPart::ThighL,
        BodyPart::ShinL,
        BodyPart::FootL,
        BodyPart::ThighR,
        BodyPart::ShinR,
        BodyPart::FootR,
        BodyPart::ArmL,
        BodyPart::ForearmL,
        BodyPart::HandL,
        BodyPart::ArmR,
        BodyPart::ForearmR,
        BodyPart::HandR,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Physical body a contact landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyRef {
    Fighter(Corner),
    /// Ring posts, ropes, floor.
    Environment,
    /// Any other rigid body, identified by the engine.
    Prop(u32),
}

/// Classification of the struck surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceClass {
    Head,
    Torso,
    Guard,
    Illegal,
    Wall,
    Ground,
    Other,
}

impl SurfaceClass {
    /// Map an engine collider tag to a classification.
    pub fn from_tag(tag: &str) -> SurfaceClass {
        match tag {
            "BoxingHead" => SurfaceClass::Head,
            "BoxingTorso" => SurfaceClass::Torso,
            "BoxingGuard" => SurfaceClass::Guard,
            "BoxingIllegal" => SurfaceClass::Illegal,
            "Wall" => SurfaceClass::Wall,
            "Ground" => SurfaceClass::Ground,
            _ => SurfaceClass::Other,
        }
    }

    #[inline]
    pub fn is_scoring(self) -> bool {
        matches!(self, SurfaceClass::Head | SurfaceClass::Torso)
    }

    #[inline]
    pub fn is_environment(self) -> bool {
        matches!(self, SurfaceClass::Wall | SurfaceClass::Ground)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_tags() {
        assert_eq!(SurfaceClass::from_tag("BoxingHead"), SurfaceClass::Head);
        assert_eq!(SurfaceClass::from_tag("BoxingIllegal"), SurfaceClass::Illegal);
        assert_eq!(SurfaceClass::from_tag("Ground"), SurfaceClass::Ground);
        assert_eq!(SurfaceClass::from_tag("ropes"), SurfaceClass::Other);
        assert!(SurfaceClass::Torso.is_scoring());
        assert!(!SurfaceClass::Guard.is_scoring());
        assert!(SurfaceClass::Wall.is_environment());
    }

    #[test]
    fn test_corner_other() {
        assert_eq!(Corner::Red.other(), Corner::Blue);
        assert_eq!(Corner::Blue.other().index(), 0);
    }

    #[test]
    fn test_inverse_lerp_clamps() {
        assert_eq!(inverse_lerp01(180.0, 900.0, 100.0), 0.0);
        assert_eq!(inverse_lerp01(180.0, 900.0, 2000.0), 1.0);
        assert!((inverse_lerp01(180.0, 900.0, 540.0) - 0.5).abs() < 1e-6);
        assert_eq!(inverse_lerp01(1.0, 1.0, 5.0), 0.0);
    }
}
