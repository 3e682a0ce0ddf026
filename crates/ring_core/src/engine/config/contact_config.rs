//! Contact capture configuration (appendage sensors + force calibration)

use serde::{Deserialize, Serialize};

/// Per-appendage capture, dedup and sweep parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    // === Noise Screen ===
    /// Contacts weaker than this never notify anyone (default: 120)
    pub min_notify_force: f32,

    // === De-duplication ===
    /// Any-victim cooldown per appendage, seconds (default: 0.10)
    pub per_appendage_cooldown: f32,
    /// Same-victim cooldown per appendage, seconds (default: 0.18)
    pub per_victim_cooldown: f32,

    // === Anti-Tunneling Sweep ===
    pub sweep_enabled: bool,
    /// Sphere radius for the swept query, m (default: 0.06)
    pub sweep_radius: f32,
    /// Minimum tick displacement before sweeping, m (default: 0.03)
    pub sweep_min_travel: f32,
    /// Minimum appendage speed before sweeping, m/s (default: 2.5)
    pub sweep_min_speed: f32,
    /// Hit buffer size for one sweep (default: 8)
    pub sweep_max_hits: usize,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            min_notify_force: 120.0,

            per_appendage_cooldown: 0.10,
            per_victim_cooldown: 0.18,

            sweep_enabled: true,
            sweep_radius: 0.06,
            sweep_min_travel: 0.03,
            sweep_min_speed: 2.5,
            sweep_max_hits: 8,
        }
    }
}

/// Swept-force calibration toward impulse ground truth
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// EMA step toward the observed ratio (default: 0.05)
    pub ema_alpha: f32,
    pub scale_min: f32,
    pub scale_max: f32,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self { ema_alpha: 0.05, scale_min: 0.25, scale_max: 4.0 }
    }
}
