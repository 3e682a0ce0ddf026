//! Stamina, performance multiplier and joint force limit.
//!
//! Effort drains stamina, time restores it. Performance follows health and
//! stamina, collapses while stunned, and never drops under the configured
//! floor. The joint force limit eases toward `base * performance` so the
//! rig weakens gradually instead of going limp in one tick.

use crate::engine::agent_state::AgentCombatState;
use crate::engine::config::FatigueConfig;
use crate::engine::frame::SegmentState;
use crate::engine::types::lerp;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FatigueReading {
    pub energy: f32,
    pub stamina: f32,
    pub performance: f32,
    pub force_limit: f32,
}

#[derive(Debug, Clone)]
pub struct FatigueModel {
    force_limit: f32,
}

impl FatigueModel {
    pub fn new(cfg: &FatigueConfig) -> Self {
        Self { force_limit: cfg.base_max_joint_force }
    }

    pub fn force_limit(&self) -> f32 {
        self.force_limit
    }

    pub fn reset(&mut self, cfg: &FatigueConfig) {
        self.force_limit = cfg.base_max_joint_force;
    }

    /// One tick of fatigue for `state`.
    pub(crate) fn update(
        &mut self,
        state: &mut AgentCombatState,
        segments: &[SegmentState],
        dt: f32,
        now: f32,
        cfg: &FatigueConfig,
    ) -> FatigueReading {
        let energy = effort_energy(segments);
        let drain = cfg.stamina_drain_scale * energy * dt;
        let recover = cfg.stamina_recovery_per_second * dt;
        state.set_stamina(state.stamina() - drain + recover);

        let target = performance_target(state.health01(), state.stamina(), state.is_stunned(now), cfg);
        state.set_performance(target);

        let desired = cfg.base_max_joint_force * target;
        self.force_limit = lerp(self.force_limit, desired, cfg.force_limit_smoothing.clamp(0.0, 1.0));

        FatigueReading {
            energy,
            stamina: state.stamina(),
            performance: state.performance(),
            force_limit: self.force_limit,
        }
    }
}

/// Σ strength × |ω|² over all segments. Non-finite segments contribute nothing.
pub fn effort_energy(segments: &[SegmentState]) -> f32 {
    segments
        .iter()
        .map(|s| s.strength01.clamp(0.0, 1.0) * s.angular_velocity.norm_squared())
        .filter(|e| e.is_finite())
        .sum()
}

pub fn performance_target(health01: f32, stamina: f32, stunned: bool, cfg: &FatigueConfig) -> f32 {
    let mut target = health01.clamp(0.0, 1.0) * (0.25 + 0.75 * stamina.clamp(0.0, 1.0));
    if stunned {
        target *= cfg.stunned_performance_factor;
    }
    target.max(cfg.min_performance)
}

/// Posture penalty on fast-spinning segments: −scale × Σ|ω|².
pub fn angular_velocity_penalty(segments: &[SegmentState], scale: f32) -> f32 {
    let sum: f32 = segments
        .iter()
        .map(|s| s.angular_velocity.norm_squared())
        .filter(|w2| w2.is_finite())
        .sum();
    -scale * sum
}
