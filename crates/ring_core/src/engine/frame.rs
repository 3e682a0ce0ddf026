//! Per-tick kinematic snapshot of one fighter, supplied by the physics engine.

use serde::{Deserialize, Serialize};

use crate::engine::contact::AppendageFrame;
use crate::engine::judgment::BodyPose;
use crate::engine::types::{Appendage, BodyPart, Vec3, PART_COUNT};

/// One controlled rigid segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentState {
    pub part: BodyPart,
    pub mass: f32,
    /// World-space center of mass of the segment
    pub position: Vec3,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    /// Current joint strength as a fraction of the joint force limit
    pub strength01: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FootContact {
    pub position: Vec3,
    pub grounded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterFrame {
    pub hips: BodyPose,
    pub segments: Vec<SegmentState>,
    /// World-space sole positions, left then right
    pub foot_positions: [Vec3; 2],
    /// Floor contact per body part, indexed by `BodyPart::index`. The only
    /// source of foot grounding; `support_feet` reads it.
    pub ground_contacts: [bool; PART_COUNT],
    /// Indexed by `Appendage::index`
    pub gloves: [AppendageFrame; 2],
}

impl FighterFrame {
    /// Standing still at `hips_position`, feet planted, no segments.
    pub fn standing(hips_position: Vec3, facing: Vec3) -> Self {
        let foot = |dx: f32| Vec3::new(hips_position.x + dx, 0.0, hips_position.z);
        let glove = |dx: f32| AppendageFrame {
            position: hips_position + Vec3::new(dx, 0.5, 0.0),
            forward: facing,
            ..AppendageFrame::default()
        };
        let mut ground_contacts = [false; PART_COUNT];
        ground_contacts[BodyPart::FootL.index()] = true;
        ground_contacts[BodyPart::FootR.index()] = true;
        Self {
            hips: BodyPose { hips_position, hips_forward: facing },
            segments: Vec::new(),
            foot_positions: [foot(-0.15), foot(0.15)],
            ground_contacts,
            gloves: [glove(-0.2), glove(0.2)],
        }
    }

    pub fn glove(&self, appendage: Appendage) -> &AppendageFrame {
        &self.gloves[appendage.index()]
    }

    /// Feet for the stability measure, grounded per `ground_contacts`.
    pub fn support_feet(&self) -> [FootContact; 2] {
        let [left, right] = self.foot_positions;
        [
            FootContact { position: left, grounded: self.touching_ground(BodyPart::FootL) },
            FootContact { position: right, grounded: self.touching_ground(BodyPart::FootR) },
        ]
    }

    pub fn touching_ground(&self, part: BodyPart) -> bool {
        self.ground_contacts[part.index()]
    }

    pub fn hands_on_ground(&self) -> bool {
        self.touching_ground(BodyPart::HandL) || self.touching_ground(BodyPart::HandR)
    }
}
