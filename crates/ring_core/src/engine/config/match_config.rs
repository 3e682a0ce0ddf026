//! Match lifecycle, ring shaping and ground-contact configuration

use serde::{Deserialize, Serialize};

use crate::engine::types::BodyPart;

/// Health, knockdown, round and result rewards
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    // === Health / KO ===
    pub max_health: f32,
    /// Health at or below this is a knockout (default: 0)
    pub ko_health_threshold: f32,

    // === Knockdown (TKO) ===
    /// Hips below this height count as down, m (default: 0.55)
    pub knockdown_hips_height: f32,
    /// Continuous time down before TKO, seconds (default: 1.2)
    pub knockdown_hold_seconds: f32,
    /// Reward per tick while down (default: -0.004)
    pub knockdown_penalty_per_tick: f32,

    // === Round / Decision ===
    pub round_seconds: f32,
    pub win_reward: f32,
    pub lose_reward: f32,
    /// Score difference is clamped to +/- this before the bonus (default: 10)
    pub score_diff_clamp: f32,
    /// Bonus per point of clamped score difference (default: 0.05)
    pub score_diff_bonus_scale: f32,

    // === Ring Out ===
    /// Slack beyond the ring bounds before ring-out, m (default: 0.05)
    pub ring_out_margin: f32,
    pub ring_out_penalty: f32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            ko_health_threshold: 0.0,

            knockdown_hips_height: 0.55,
            knockdown_hold_seconds: 1.2,
            knockdown_penalty_per_tick: -0.004,

            round_seconds: 45.0,
            win_reward: 1.0,
            lose_reward: -1.0,
            score_diff_clamp: 10.0,
            score_diff_bonus_scale: 0.05,

            ring_out_margin: 0.05,
            ring_out_penalty: -1.0,
        }
    }
}

/// Dense behaviour penalties evaluated every tick
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorRewardConfig {
    /// Normalized edge distance that counts as camping (default: 0.18)
    pub edge_danger_threshold: f32,
    pub edge_camping_penalty: f32,
    /// Hips farther than this from the opponent are penalized, m (default: 4.5)
    pub far_distance: f32,
    pub far_penalty: f32,
    /// Hips closer than this to the opponent are penalized, m (default: 0.75)
    pub near_distance: f32,
    pub near_penalty: f32,
    /// Scale of the summed squared angular speed penalty (default: 0.00015)
    pub angular_velocity_penalty_scale: f32,
}

impl Default for BehaviorRewardConfig {
    fn default() -> Self {
        Self {
            edge_danger_threshold: 0.18,
            edge_camping_penalty: -0.0025,
            far_distance: 4.5,
            far_penalty: -0.0035,
            near_distance: 0.75,
            near_penalty: -0.0025,
            angular_velocity_penalty_scale: 0.00015,
        }
    }
}

/// Sustained floor contact rule for one body part
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundContactRule {
    pub part: BodyPart,
    /// Touches shorter than this are ignored, seconds
    pub min_sustain_time: f32,
    /// Reward per second once sustained (0 = observe only)
    pub penalty_per_second: f32,
    /// Request episode end after this long (0 = never)
    pub end_episode_after: f32,
}

impl GroundContactRule {
    pub fn observe_only(part: BodyPart) -> Self {
        Self { part, min_sustain_time: 999.0, penalty_per_second: 0.0, end_episode_after: 0.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundContactConfig {
    pub rules: Vec<GroundContactRule>,
}

impl GroundContactConfig {
    /// Boxing table: torso/head parts end the episode, hands and forearms
    /// only penalize crawling, feet are observation only.
    pub fn boxing() -> Self {
        let mut rules: Vec<GroundContactRule> =
            BodyPart::ALL.iter().map(|&p| GroundContactRule::observe_only(p)).collect();

        let table = [
            (BodyPart::Head, 0.25, -0.35, 1.00),
            (BodyPart::Chest, 0.35, -0.25, 1.20),
            (BodyPart::Spine, 0.35, -0.20, 1.30),
            (BodyPart::Hips, 0.45, -0.15, 1.60),
            (BodyPart::HandL, 0.70, -0.08, 0.0),
            (BodyPart::HandR, 0.70, -0.08, 0.0),
            (BodyPart::ForearmL, 0.70, -0.10, 0.0),
            (BodyPart::ForearmR, 0.70, -0.10, 0.0),
        ];
        for (part, min_sustain_time, penalty_per_second, end_episode_after) in table {
            rules[part.index()] =
                GroundContactRule { part, min_sustain_time, penalty_per_second, end_episode_after };
        }
        Self { rules }
    }

    pub fn rule_for(&self, part: BodyPart) -> Option<&GroundContactRule> {
        self.rules.iter().find(|r| r.part == part)
    }
}

impl Default for GroundContactConfig {
    fn default() -> Self {
        Self::boxing()
    }
}
