//! Swept-force calibration.
//!
//! The swept path can only approximate force as `m * v / dt`. Each discrete
//! collision gives a ground-truth impulse force for the same actuator, and
//! the running scale is nudged toward their ratio. The scale describes the
//! actuator, not the episode, so it survives episode resets.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::engine::config::CalibrationConfig;

/// Forces at or below this are treated as missing samples
const MIN_SAMPLE_FORCE: f32 = 1e-4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ForceCalibration {
    scale: f32,
}

impl ForceCalibration {
    pub fn new() -> Self {
        Self { scale: 1.0 }
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Feed one paired (impulse-derived, velocity-derived) force sample.
    ///
    /// Returns false when the sample was ignored.
    pub fn update(&mut self, real_force: f32, approx_force: f32, cfg: &CalibrationConfig) -> bool {
        if !(real_force > MIN_SAMPLE_FORCE && approx_force > MIN_SAMPLE_FORCE) {
            return false;
        }
        if !real_force.is_finite() || !approx_force.is_finite() {
            return false;
        }
        if !(cfg.scale_min > 0.0 && cfg.scale_min <= cfg.scale_max) {
            trace!(scale_min = cfg.scale_min, scale_max = cfg.scale_max, "calibration range unusable");
            return false;
        }

        let ratio = (real_force / approx_force).clamp(cfg.scale_min, cfg.scale_max);
        let alpha = cfg.ema_alpha.clamp(0.0, 1.0);
        let next = self.scale + (ratio - self.scale) * alpha;
        // a config change can narrow the range under an existing scale
        self.scale = next.clamp(cfg.scale_min, cfg.scale_max);

        trace!(real_force, approx_force, ratio, scale = self.scale, "calibration update");
        true
    }
}

impl Default for ForceCalibration {
    fn default() -> Self {
        Self::new()
    }
}
