//! # Combat Configuration Module
//!
//! Every tunable constant of the judgment, fatigue, shaping and lifecycle
//! code lives here, so those algorithms stay pure functions of
//! (state, config, event).
//!
//! ## Presets
//! - `standard()`: default boxing rules
//! - `sparring()`: lighter scoring gates, no DQ pressure, longer rounds
//! - `strict()`: harder gates, fewer fouls tolerated
//!
//! ## Usage
//! ```rust
//! use ring_core::engine::config::CombatConfig;
//!
//! let config = CombatConfig::default();
//! let sparring = CombatConfig::sparring();
//! assert!(sparring.scoring.min_scoring_force < config.scoring.min_scoring_force);
//! ```
//!
//! ## Environment Variables
//!
//! - `RING_CONFIG_PROFILE`: Select preset (sparring, strict, standard)

mod body_config;
mod contact_config;
mod match_config;
mod scoring_config;
mod shaping_config;

pub use body_config::{FatigueConfig, StabilityConfig};
pub use contact_config::{CalibrationConfig, ContactConfig};
pub use match_config::{BehaviorRewardConfig, GroundContactConfig, GroundContactRule, MatchConfig};
pub use scoring_config::ScoringConfig;
pub use shaping_config::{ShapingConfig, CONTROL_DIM};

use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{ConfigError, Result};

/// Full bout configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CombatConfig {
    pub contact: ContactConfig,
    pub calibration: CalibrationConfig,
    pub scoring: ScoringConfig,
    pub fatigue: FatigueConfig,
    pub shaping: ShapingConfig,
    pub stability: StabilityConfig,
    #[serde(rename = "match")]
    pub match_rules: MatchConfig,
    pub behavior: BehaviorRewardConfig,
    pub ground_contact: GroundContactConfig,
}

impl CombatConfig {
    pub fn standard() -> Self {
        Self::default()
    }

    /// Early curriculum: easier to land scoring hits, fouls rarely end the bout
    pub fn sparring() -> Self {
        let mut cfg = Self::default();
        cfg.scoring.min_scoring_force = 140.0;
        cfg.scoring.min_approach_speed = 0.9;
        cfg.scoring.max_fouls_before_dq = 6;
        cfg.match_rules.round_seconds = 60.0;
        cfg.match_rules.knockdown_hold_seconds = 2.0;
        cfg
    }

    /// Tighter clean-hit gates and less foul tolerance
    pub fn strict() -> Self {
        let mut cfg = Self::default();
        cfg.scoring.min_scoring_force = 240.0;
        cfg.scoring.min_approach_speed = 1.6;
        cfg.scoring.min_glove_direction_cos = 0.45;
        cfg.scoring.max_fouls_before_dq = 2;
        cfg.scoring.penalty_foul = -0.5;
        cfg
    }

    pub fn from_env_or_default() -> Self {
        match env::var("RING_CONFIG_PROFILE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "sparring" => Self::sparring(),
            "strict" => Self::strict(),
            _ => Self::default(),
        }
    }

    /// Parse and validate. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: CombatConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: CombatConfig = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject settings the algorithms cannot divide by or clamp with.
    pub fn validate(&self) -> Result<()> {
        let s = &self.scoring;
        if !(s.min_scoring_force < s.max_scoring_force) {
            return Err(ConfigError::InvertedRange {
                field: "scoring.min_scoring_force",
                min: s.min_scoring_force,
                max: s.max_scoring_force,
            });
        }
        if !(s.min_approach_speed > 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "scoring.min_approach_speed",
                value: s.min_approach_speed,
            });
        }
        if !(-1.0..1.0).contains(&s.min_glove_direction_cos) {
            return Err(ConfigError::OutOfRange {
                field: "scoring.min_glove_direction_cos",
                value: s.min_glove_direction_cos,
            });
        }
        if s.max_fouls_before_dq == 0 {
            return Err(ConfigError::OutOfRange { field: "scoring.max_fouls_before_dq", value: 0.0 });
        }

        let c = &self.calibration;
        // NaN bounds fail every comparison and land here too
        if !(c.scale_min > 0.0 && c.scale_min <= c.scale_max && c.scale_max.is_finite()) {
            return Err(ConfigError::InvertedRange {
                field: "calibration.scale_min",
                min: c.scale_min,
                max: c.scale_max,
            });
        }
        if !(0.0..=1.0).contains(&c.ema_alpha) {
            return Err(ConfigError::OutOfRange { field: "calibration.ema_alpha", value: c.ema_alpha });
        }

        let f = &self.fatigue;
        if !(0.0..=1.0).contains(&f.min_performance) {
            return Err(ConfigError::OutOfRange {
                field: "fatigue.min_performance",
                value: f.min_performance,
            });
        }

        let m = &self.match_rules;
        if !(m.max_health > 0.0) {
            return Err(ConfigError::OutOfRange { field: "match.max_health", value: m.max_health });
        }
        if !(m.ko_health_threshold < m.max_health) {
            return Err(ConfigError::InvertedRange {
                field: "match.ko_health_threshold",
                min: m.ko_health_threshold,
                max: m.max_health,
            });
        }
        if !(m.round_seconds > 0.0) {
            return Err(ConfigError::OutOfRange { field: "match.round_seconds", value: m.round_seconds });
        }
        if !(m.score_diff_clamp >= 0.0 && m.score_diff_clamp.is_finite()) {
            return Err(ConfigError::OutOfRange {
                field: "match.score_diff_clamp",
                value: m.score_diff_clamp,
            });
        }

        if !(self.stability.support_foot_radius > 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "stability.support_foot_radius",
                value: self.stability.support_foot_radius,
            });
        }
        Ok(())
    }
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::BodyPart;

    #[test]
    fn test_default_config() {
        let cfg = CombatConfig::default();
        assert!((cfg.scoring.min_scoring_force - 180.0).abs() < 0.01);
        assert!((cfg.scoring.max_scoring_force - 900.0).abs() < 0.01);
        assert_eq!(cfg.scoring.max_fouls_before_dq, 3);
        assert!((cfg.calibration.scale_max - 4.0).abs() < 0.01);
        assert!((cfg.match_rules.round_seconds - 45.0).abs() < 0.01);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(CombatConfig::sparring().validate().is_ok());
        assert!(CombatConfig::strict().validate().is_ok());
        assert!(
            CombatConfig::strict().scoring.min_scoring_force
                > CombatConfig::standard().scoring.min_scoring_force
        );
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let cfg = CombatConfig::from_json_str(r#"{"scoring": {"reward_head": 2.0}}"#).unwrap();
        assert!((cfg.scoring.reward_head - 2.0).abs() < 1e-6);
        assert!((cfg.scoring.reward_torso - 0.5).abs() < 1e-6);
        assert_eq!(cfg.ground_contact.rules.len(), BodyPart::ALL.len());
    }

    #[test]
    fn test_yaml_round_seconds() {
        let cfg = CombatConfig::from_yaml_str("match:\n  round_seconds: 30.0\n").unwrap();
        assert!((cfg.match_rules.round_seconds - 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_inverted_force_range_rejected() {
        let err = CombatConfig::from_json_str(
            r#"{"scoring": {"min_scoring_force": 900.0, "max_scoring_force": 100.0}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvertedRange { .. }));
        assert!(!err.is_parse_error());
    }

    #[test]
    fn test_negative_score_diff_clamp_rejected() {
        let err = CombatConfig::from_json_str(r#"{"match": {"score_diff_clamp": -1.0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "match.score_diff_clamp", .. }));

        let mut cfg = CombatConfig::default();
        cfg.match_rules.score_diff_clamp = f32::INFINITY;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_nan_bounds_rejected() {
        let mut cfg = CombatConfig::default();
        cfg.calibration.scale_min = f32::NAN;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvertedRange { .. })));

        let mut cfg = CombatConfig::default();
        cfg.calibration.scale_max = f32::NAN;
        assert!(cfg.validate().is_err());

        let mut cfg = CombatConfig::default();
        cfg.scoring.max_scoring_force = f32::NAN;
        assert!(cfg.validate().is_err());

        let mut cfg = CombatConfig::default();
        cfg.match_rules.round_seconds = f32::NAN;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_inverted_calibration_rejected() {
        let mut cfg = CombatConfig::default();
        cfg.calibration.scale_min = 4.0;
        cfg.calibration.scale_max = 0.25;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvertedRange { field: "calibration.scale_min", .. })));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = CombatConfig::from_json_str("{not json").unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_config_serialization() {
        let cfg = CombatConfig::strict();
        let json = serde_json::to_string(&cfg).unwrap();
        let parsed: CombatConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.scoring.max_fouls_before_dq, 2);
    }

    #[test]
    fn test_boxing_ground_table() {
        let gc = GroundContactConfig::boxing();
        let head = gc.rule_for(BodyPart::Head).unwrap();
        assert!((head.end_episode_after - 1.0).abs() < 1e-6);
        let hand = gc.rule_for(BodyPart::HandL).unwrap();
        assert_eq!(hand.end_episode_after, 0.0);
        assert!(hand.penalty_per_second < 0.0);
        let foot = gc.rule_for(BodyPart::FootR).unwrap();
        assert_eq!(foot.penalty_per_second, 0.0);
        assert_eq!(foot.end_episode_after, 0.0);
    }
}
