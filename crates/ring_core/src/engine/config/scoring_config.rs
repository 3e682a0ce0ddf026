//! Punch judgment configuration

use serde::{Deserialize, Serialize};

/// Scoring gates, rewards, fouls and damage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    // === Gates ===
    /// Belt line = victim hips height + this offset, m (default: 0.02)
    pub belt_line_offset: f32,
    /// Below this a contact never scores (default: 180)
    pub min_scoring_force: f32,
    /// Force that maps to normalized force 1.0 (default: 900)
    pub max_scoring_force: f32,
    /// Minimum approach speed along the strike direction, m/s (default: 1.2)
    pub min_approach_speed: f32,
    /// Glove alignment below this cosine contributes nothing (default: 0.25)
    pub min_glove_direction_cos: f32,
    /// Attacker-wide scoring cooldown, seconds (default: 0.20)
    pub attacker_cooldown: f32,

    // === Rewards ===
    pub reward_head: f32,
    pub reward_torso: f32,
    pub reward_blocked_defender: f32,
    pub penalty_blocked_attacker: f32,
    pub penalty_foul: f32,
    pub penalty_environment_strike: f32,
    /// Share of the attacker's reward charged to the victim (default: 0.8)
    pub victim_penalty_factor: f32,

    // === Fouls ===
    pub max_fouls_before_dq: u32,

    // === Damage ===
    /// Base damage of a full clean, full force hit (default: 10)
    pub damage_base: f32,
    pub damage_head_multiplier: f32,
    pub damage_torso_multiplier: f32,
    /// Damage to the striker's own hand on wall/ground strikes (default: 1.5)
    pub environment_damage: f32,

    // === Stun ===
    pub stun_head_force01: f32,
    pub stun_clean_threshold: f32,
    pub stun_seconds: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            belt_line_offset: 0.02,
            min_scoring_force: 180.0,
            max_scoring_force: 900.0,
            min_approach_speed: 1.2,
            min_glove_direction_cos: 0.25,
            attacker_cooldown: 0.20,

            reward_head: 1.0,
            reward_torso: 0.5,
            reward_blocked_defender: 0.03,
            penalty_blocked_attacker: -0.01,
            penalty_foul: -0.35,
            penalty_environment_strike: -0.05,
            victim_penalty_factor: 0.8,

            max_fouls_before_dq: 3,

            damage_base: 10.0,
            damage_head_multiplier: 1.2,
            damage_torso_multiplier: 1.0,
            environment_damage: 1.5,

            stun_head_force01: 0.75,
            stun_clean_threshold: 0.70,
            stun_seconds: 0.35,
        }
    }
}
