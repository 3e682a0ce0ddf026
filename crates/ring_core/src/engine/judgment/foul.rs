//! Illegal-contact classification.

use serde::{Deserialize, Serialize};

use crate::engine::types::{planar, SurfaceClass, Vec3};

use super::BodyPose;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoulKind {
    /// Surface tagged illegal
    Illegal,
    /// Below the victim's belt line
    LowBlow,
    /// Head or torso struck from behind
    Behind,
}

/// First matching foul, checked in the order illegal, low blow, behind.
pub fn classify_foul(
    surface: SurfaceClass,
    contact_point: &Vec3,
    victim: &BodyPose,
    belt_line_offset: f32,
) -> Option<FoulKind> {
    if surface == SurfaceClass::Illegal {
        return Some(FoulKind::Illegal);
    }
    if contact_point.y < victim.hips_position.y + belt_line_offset {
        return Some(FoulKind::LowBlow);
    }
    if surface.is_scoring() && is_behind(contact_point, victim) {
        return Some(FoulKind::Behind);
    }
    None
}

/// Contact lies behind the victim's facing on the ground plane. Vertical
/// facing is ignored.
pub fn is_behind(contact_point: &Vec3, victim: &BodyPose) -> bool {
    let Some(fwd) = planar(&victim.hips_forward).try_normalize(1e-3) else {
        return false;
    };
    let Some(dir) = planar(&(contact_point - victim.hips_position)).try_normalize(1e-3) else {
        return false;
    };
    fwd.dot(&dir) < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose() -> BodyPose {
        BodyPose { hips_position: Vec3::new(0.0, 1.0, 0.0), hips_forward: Vec3::z() }
    }

    #[test]
    fn test_front_head_is_legal() {
        let p = Vec3::new(0.0, 1.6, 0.2);
        assert_eq!(classify_foul(SurfaceClass::Head, &p, &pose(), 0.02), None);
    }

    #[test]
    fn test_low_blow() {
        let p = Vec3::new(0.0, 1.01, 0.2);
        assert_eq!(classify_foul(SurfaceClass::Torso, &p, &pose(), 0.02), Some(FoulKind::LowBlow));
    }

    #[test]
    fn test_behind_only_on_scoring_surfaces() {
        let p = Vec3::new(0.0, 1.6, -0.2);
        assert_eq!(classify_foul(SurfaceClass::Head, &p, &pose(), 0.02), Some(FoulKind::Behind));
        assert_eq!(classify_foul(SurfaceClass::Guard, &p, &pose(), 0.02), None);
    }

    #[test]
    fn test_illegal_tag_wins() {
        let p = Vec3::new(0.0, 1.6, 0.2);
        assert_eq!(classify_foul(SurfaceClass::Illegal, &p, &pose(), 0.02), Some(FoulKind::Illegal));
    }

    #[test]
    fn test_behind_ignores_vertical_facing() {
        // facing straight up: no planar facing, never behind
        let up = BodyPose { hips_forward: Vec3::y(), ..pose() };
        assert!(!is_behind(&Vec3::new(0.0, 1.6, -0.5), &up));

        // pitched forward still uses its planar part
        let pitched = BodyPose { hips_forward: Vec3::new(0.0, -0.9, 0.3), ..pose() };
        assert!(is_behind(&Vec3::new(0.0, 1.6, -0.5), &pitched));
    }

    #[test]
    fn test_directly_above_hips_is_not_behind() {
        assert!(!is_behind(&Vec3::new(0.0, 1.8, 0.0), &pose()));
    }
}
