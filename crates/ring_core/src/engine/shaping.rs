//! Action smoothing and rate limiting.
//!
//! Raw policy outputs never reach the joints directly. Each dimension is
//! rate-limited against the previous smoothed value and blended toward it.
//! Both the blend weight and the step limit anneal from heavy smoothing to
//! direct control as training episodes accumulate.

use crate::engine::config::{ShapingConfig, CONTROL_DIM};
use crate::engine::types::lerp;
use crate::error::ShapingError;

/// Smoothed control vector plus the jitter penalty for this tick
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedActions {
    pub values: [f32; CONTROL_DIM],
    /// −scale × Σ(raw − previous raw)², already negative
    pub delta_penalty: f32,
    /// Max per-tick change that was applied
    pub max_step: f32,
}

#[derive(Debug, Clone)]
pub struct ActionShaper {
    last_raw: [f32; CONTROL_DIM],
    smoothed: [f32; CONTROL_DIM],
}

impl ActionShaper {
    pub fn new() -> Self {
        Self { last_raw: [0.0; CONTROL_DIM], smoothed: [0.0; CONTROL_DIM] }
    }

    pub fn smoothed(&self) -> &[f32; CONTROL_DIM] {
        &self.smoothed
    }

    pub fn reset(&mut self) {
        self.last_raw = [0.0; CONTROL_DIM];
        self.smoothed = [0.0; CONTROL_DIM];
    }

    /// Shape one raw control vector. A wrong length leaves every buffer untouched.
    pub fn apply(
        &mut self,
        raw: &[f32],
        episode_count: u32,
        performance: f32,
        stunned: bool,
        cfg: &ShapingConfig,
    ) -> Result<ShapedActions, ShapingError> {
        if raw.len() != CONTROL_DIM {
            return Err(ShapingError::DimensionMismatch { expected: CONTROL_DIM, found: raw.len() });
        }

        let mut sum_sq = 0.0;
        for (last, &r) in self.last_raw.iter_mut().zip(raw) {
            let r = sanitize(r);
            let d = r - *last;
            sum_sq += d * d;
            *last = r;
        }
        let delta_penalty = -cfg.action_delta_penalty_scale * sum_sq;

        let t = anneal_progress(episode_count, cfg.anneal_episodes);
        let alpha = lerp(cfg.smoothing_start_alpha, cfg.smoothing_end_alpha, t).clamp(0.0, 1.0);
        let max_step = effective_max_step(t, performance, stunned, cfg);

        let mut values = [0.0; CONTROL_DIM];
        for (i, &r) in raw.iter().enumerate() {
            let mut target = sanitize(r);
            if stunned {
                target *= cfg.stunned_target_scale;
            }
            let prev = self.smoothed[i];
            let limited = prev + (target - prev).clamp(-max_step, max_step);
            let next = lerp(prev, limited, alpha).clamp(-1.0, 1.0);
            self.smoothed[i] = next;
            values[i] = next;
        }

        Ok(ShapedActions { values, delta_penalty, max_step })
    }
}

impl Default for ActionShaper {
    fn default() -> Self {
        Self::new()
    }
}

/// 0 at the first episode, 1 once `anneal_episodes` have passed.
pub fn anneal_progress(episode_count: u32, anneal_episodes: u32) -> f32 {
    if anneal_episodes == 0 {
        return 1.0;
    }
    (episode_count as f32 / anneal_episodes as f32).clamp(0.0, 1.0)
}

pub fn effective_max_step(t: f32, performance: f32, stunned: bool, cfg: &ShapingConfig) -> f32 {
    let mut step = lerp(cfg.max_delta_start, cfg.max_delta_end, t);
    step *= lerp(cfg.min_performance_step_scale, 1.0, performance.clamp(0.0, 1.0));
    if stunned {
        step *= cfg.stunned_step_scale;
    }
    step.max(0.0)
}

#[inline]
fn sanitize(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wrong_length_leaves_state() {
        let cfg = ShapingConfig::default();
        let mut s = ActionShaper::new();
        s.apply(&[0.5; CONTROL_DIM], 0, 1.0, false, &cfg).unwrap();
        let before = *s.smoothed();

        let err = s.apply(&[1.0; 12], 0, 1.0, false, &cfg).unwrap_err();
        assert_eq!(err, ShapingError::DimensionMismatch { expected: CONTROL_DIM, found: 12 });
        assert_eq!(*s.smoothed(), before);
    }

    #[test]
    fn test_first_step_is_limited_and_blended() {
        let cfg = ShapingConfig::default();
        let mut s = ActionShaper::new();
        let out = s.apply(&[1.0; CONTROL_DIM], 0, 1.0, false, &cfg).unwrap();
        // step clamped to 0.35, blended by 0.85
        assert!((out.values[0] - 0.35 * 0.85).abs() < 1e-6);
        assert!((out.delta_penalty + 0.0008 * CONTROL_DIM as f32).abs() < 1e-6);
    }

    #[test]
    fn test_anneal_endpoints() {
        assert_eq!(anneal_progress(0, 200), 0.0);
        assert_eq!(anneal_progress(100, 200), 0.5);
        assert_eq!(anneal_progress(5000, 200), 1.0);
        assert_eq!(anneal_progress(0, 0), 1.0);
    }

    #[test]
    fn test_stun_dampens_targets() {
        let cfg = ShapingConfig::default();
        let mut calm = ActionShaper::new();
        let mut dazed = ActionShaper::new();
        let a = calm.apply(&[1.0; CONTROL_DIM], 200, 1.0, false, &cfg).unwrap();
        let b = dazed.apply(&[1.0; CONTROL_DIM], 200, 1.0, true, &cfg).unwrap();
        assert!(b.values[0] < a.values[0]);
        assert!(b.max_step < a.max_step);
    }

    #[test]
    fn test_non_finite_treated_as_zero() {
        let cfg = ShapingConfig::default();
        let mut s = ActionShaper::new();
        let mut raw = [0.0; CONTROL_DIM];
        raw[3] = f32::NAN;
        raw[4] = f32::INFINITY;
        let out = s.apply(&raw, 0, 1.0, false, &cfg).unwrap();
        assert_eq!(out.values[3], 0.0);
        assert_eq!(out.values[4], 0.0);
        assert_eq!(out.delta_penalty, 0.0);
    }

    #[test]
    fn test_reset_zeroes_buffers() {
        let cfg = ShapingConfig::default();
        let mut s = ActionShaper::new();
        s.apply(&[0.7; CONTROL_DIM], 0, 1.0, false, &cfg).unwrap();
        s.reset();
        assert!(s.smoothed().iter().all(|v| *v == 0.0));
    }

    proptest! {
        #[test]
        fn prop_output_bounded_and_rate_limited(
            frames in prop::collection::vec(prop::collection::vec(-5.0f32..5.0, CONTROL_DIM), 1..30),
            episode in 0u32..400,
            performance in 0.0f32..=1.0,
            stunned in any::<bool>(),
        ) {
            let cfg = ShapingConfig::default();
            let mut s = ActionShaper::new();
            for raw in frames {
                let prev = *s.smoothed();
                let out = s.apply(&raw, episode, performance, stunned, &cfg).unwrap();
                for (i, v) in out.values.iter().enumerate() {
                    prop_assert!((-1.0..=1.0).contains(v));
                    prop_assert!((v - prev[i]).abs() <= out.max_step + 1e-6);
                }
            }
        }
    }
}
