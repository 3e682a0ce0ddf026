//! Fixed layout of the 39-value control vector.
//!
//! ```text
//! [0..26)   joint rotation targets, 1-3 axes per part
//! [26..39)  joint strengths, one per part
//! ```
//!
//! Axes a part does not drive are held at zero.

use serde::{Deserialize, Serialize};

use crate::engine::config::CONTROL_DIM;
use crate::engine::types::BodyPart;

/// (part, driven axes) in control-vector order
pub const ROTATION_LAYOUT: [(BodyPart, usize); 13] = [
    (BodyPart::Chest, 3),
    (BodyPart::Spine, 3),
    (BodyPart::ThighL, 2),
    (BodyPart::ThighR, 2),
    (BodyPart::ShinL, 1),
    (BodyPart::ShinR, 1),
    (BodyPart::FootR, 3),
    (BodyPart::FootL, 3),
    (BodyPart::ArmL, 2),
    (BodyPart::ArmR, 2),
    (BodyPart::ForearmL, 1),
    (BodyPart::ForearmR, 1),
    (BodyPart::Head, 2),
];

pub const STRENGTH_LAYOUT: [BodyPart; 13] = [
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
    BodyPart::ArmR,
    BodyPart::ForearmR,
];

pub const ROTATION_DIMS: usize = 26;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointCommand {
    pub part: BodyPart,
    /// Normalized target per axis, [-1, 1]
    pub target: [f32; 3],
    /// Fraction of the joint force limit, [0, 1]
    pub strength: f32,
}

/// Joint commands for one tick, in `STRENGTH_LAYOUT` order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointCommands {
    pub joints: Vec<JointCommand>,
    /// Absolute force limit the engine should scale strengths by
    pub force_limit: f32,
}

impl JointCommands {
    pub fn get(&self, part: BodyPart) -> Option<&JointCommand> {
        self.joints.iter().find(|j| j.part == part)
    }
}

/// Split a shaped control vector into per-joint commands.
///
/// Strength = multiplier × clamp01(value); the caller folds performance and
/// stun into `strength_multiplier`.
pub fn map_controls(values: &[f32; CONTROL_DIM], strength_multiplier: f32, force_limit: f32) -> JointCommands {
    let mut targets = [[0.0f32; 3]; BodyPart::ALL.len()];
    let mut idx = 0;
    for (part, axes) in ROTATION_LAYOUT {
        for axis in 0..axes {
            targets[part.index()][axis] = values[idx];
            idx += 1;
        }
    }

    let joints = STRENGTH_LAYOUT
        .iter()
        .enumerate()
        .map(|(i, &part)| JointCommand {
            part,
            target: targets[part.index()],
            strength: strength_multiplier * values[ROTATION_DIMS + i].clamp(0.0, 1.0),
        })
        .collect();

    JointCommands { joints, force_limit }
}
