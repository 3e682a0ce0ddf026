//! Clean-hit quality: approach speed and glove alignment.

use crate::engine::config::ScoringConfig;
use crate::engine::types::Vec3;

use super::RejectReason;

/// Minimum appendage-to-contact distance for a usable direction
const MIN_DIRECTION_LENGTH: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CleanHit {
    /// Glove velocity along the glove-to-contact direction (m/s)
    pub approach_speed: f32,
    /// 0..1, how far past the minimum approach speed
    pub speed_factor: f32,
    /// 0..1, knuckles pointed at the contact
    pub glove_factor: f32,
    /// Combined quality in [0.1225, 1]
    pub clean: f32,
}

/// Gate and grade a strike by how it arrived at the contact point.
pub fn assess_clean_hit(
    appendage_position: &Vec3,
    appendage_velocity: &Vec3,
    appendage_forward: &Vec3,
    contact_point: &Vec3,
    cfg: &ScoringConfig,
) -> Result<CleanHit, RejectReason> {
    let to_contact = contact_point - appendage_position;
    let length = to_contact.norm();
    if !length.is_finite() || length < MIN_DIRECTION_LENGTH {
        return Err(RejectReason::DegenerateDirection);
    }
    let dir = to_contact / length;

    let approach_speed = appendage_velocity.dot(&dir);
    if !approach_speed.is_finite() || approach_speed < cfg.min_approach_speed {
        return Err(RejectReason::SlowApproach);
    }

    let glove_cos = appendage_forward.try_normalize(1e-6).map_or(0.0, |fwd| fwd.dot(&dir));
    let cos_span = (1.0 - cfg.min_glove_direction_cos).max(1e-4);
    let glove_factor = ((glove_cos - cfg.min_glove_direction_cos) / cos_span).clamp(0.0, 1.0);

    let speed_span = (cfg.min_approach_speed * 2.0).max(1e-4);
    let speed_factor = ((approach_speed - cfg.min_approach_speed) / speed_span).clamp(0.0, 1.0);

    let clean = (0.35 + 0.65 * speed_factor).clamp(0.0, 1.0) * (0.35 + 0.65 * glove_factor).clamp(0.0, 1.0);

    Ok(CleanHit { approach_speed, speed_factor, glove_factor, clean })
}
