//! Fatigue and stability configuration

use serde::{Deserialize, Serialize};

/// Stamina / performance parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FatigueConfig {
    /// Stamina drain per unit effort energy per second (default: 0.002)
    pub stamina_drain_scale: f32,
    /// Flat recovery per second (default: 0.08)
    pub stamina_recovery_per_second: f32,
    /// Performance floor, exhausted fighters keep this much (default: 0.35)
    pub min_performance: f32,
    /// Performance factor while stunned (default: 0.45)
    pub stunned_performance_factor: f32,
    /// Per-tick lerp toward the target force limit (default: 0.10)
    pub force_limit_smoothing: f32,
    /// Actuator force limit at full performance
    pub base_max_joint_force: f32,
}

impl Default for FatigueConfig {
    fn default() -> Self {
        Self {
            stamina_drain_scale: 0.002,
            stamina_recovery_per_second: 0.08,
            min_performance: 0.35,
            stunned_performance_factor: 0.45,
            force_limit_smoothing: 0.10,
            base_max_joint_force: 20_000.0,
        }
    }
}

/// Balance / support polygon parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilityConfig {
    /// Support radius around each grounded foot, m (default: 0.14)
    pub support_foot_radius: f32,
    /// Flat penalty when the CoM leaves the support radius (default: -0.002)
    pub unstable_penalty: f32,
    /// Penalty per m/s of outward CoM velocity (default: -0.0018)
    pub momentum_to_edge_penalty_scale: f32,
    /// Penalty per tick with a hand on the floor (default: -0.0025)
    pub hands_on_ground_penalty: f32,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            support_foot_radius: 0.14,
            unstable_penalty: -0.0020,
            momentum_to_edge_penalty_scale: -0.0018,
            hands_on_ground_penalty: -0.0025,
        }
    }
}
