//! Sustained floor-contact monitor.
//!
//! Brief touches are ignored so exploratory moves and attacks are not
//! punished. Once a part stays on the floor past its sustain time it costs
//! reward every second, and past its end time the fighter is treated as
//! incapacitated: the monitor asks for the episode to end, it never ends it.

use crate::engine::config::{GroundContactConfig, GroundContactRule};
use crate::engine::types::{BodyPart, PART_COUNT};

/// Result of one monitor tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroundContactStatus {
    /// Summed sustained-contact penalty for this tick
    pub reward: f32,
    /// Some part passed its end-episode time
    pub request_end: bool,
}

#[derive(Debug, Clone)]
pub struct GroundContactMonitor {
    rules: [Option<GroundContactRule>; PART_COUNT],
    touching: [bool; PART_COUNT],
    duration: [f32; PART_COUNT],
}

impl GroundContactMonitor {
    pub fn new(cfg: &GroundContactConfig) -> Self {
        let mut rules = [None; PART_COUNT];
        for rule in &cfg.rules {
            rules[rule.part.index()] = Some(*rule);
        }
        Self { rules, touching: [false; PART_COUNT], duration: [0.0; PART_COUNT] }
    }

    /// Advance one tick with the engine's per-part floor contact flags.
    pub fn update(&mut self, touching: &[bool; PART_COUNT], dt: f32) -> GroundContactStatus {
        let mut status = GroundContactStatus::default();

        for part in BodyPart::ALL {
            let i = part.index();
            if !touching[i] {
                self.touching[i] = false;
                self.duration[i] = 0.0;
                continue;
            }

            self.touching[i] = true;
            self.duration[i] += dt;

            let Some(rule) = self.rules[i] else { continue };
            if self.duration[i] < rule.min_sustain_time {
                continue;
            }
            if rule.penalty_per_second != 0.0 {
                status.reward += rule.penalty_per_second * dt;
            }
            if rule.end_episode_after > 0.0 && self.duration[i] >= rule.end_episode_after {
                status.request_end = true;
            }
        }

        status
    }

    pub fn is_touching(&self, part: BodyPart) -> bool {
        self.touching[part.index()]
    }

    pub fn duration(&self, part: BodyPart) -> f32 {
        self.duration[part.index()]
    }

    pub fn reset(&mut self) {
        self.touching = [false; PART_COUNT];
        self.duration = [0.0; PART_COUNT];
    }
}
