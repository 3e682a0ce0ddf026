//! Action shaping configuration (annealed smoothing)

use serde::{Deserialize, Serialize};

/// Control vector size expected from the policy
pub const CONTROL_DIM: usize = 39;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapingConfig {
    // === Annealing ===
    /// Smoothing weight in the first episode (default: 0.85)
    pub smoothing_start_alpha: f32,
    /// Smoothing weight after annealing (default: 0.35)
    pub smoothing_end_alpha: f32,
    pub max_delta_start: f32,
    pub max_delta_end: f32,
    /// Episodes to go from start to end values (default: 200)
    pub anneal_episodes: u32,

    // === Penalties ===
    /// Scale of the squared raw-delta penalty (default: 0.0008)
    pub action_delta_penalty_scale: f32,

    // === Impairment ===
    /// Max step multiplier at zero performance (default: 0.65)
    pub min_performance_step_scale: f32,
    /// Max step multiplier while stunned (default: 0.6)
    pub stunned_step_scale: f32,
    /// Raw target multiplier while stunned (default: 0.2)
    pub stunned_target_scale: f32,
    /// Joint strength multiplier while stunned (default: 0.45)
    pub stunned_strength_scale: f32,
}

impl Default for ShapingConfig {
    fn default() -> Self {
        Self {
            smoothing_start_alpha: 0.85,
            smoothing_end_alpha: 0.35,
            max_delta_start: 0.35,
            max_delta_end: 0.12,
            anneal_episodes: 200,

            action_delta_penalty_scale: 0.0008,

            min_performance_step_scale: 0.65,
            stunned_step_scale: 0.6,
            stunned_target_scale: 0.2,
            stunned_strength_scale: 0.45,
        }
    }
}
