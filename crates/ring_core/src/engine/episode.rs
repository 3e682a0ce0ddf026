//! EpisodeMetrics - per-fighter episode statistics
//!
//! Collected while the bout runs and handed to the trainer when the
//! episode ends.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ring_core::engine::episode::{EpisodeMetrics, TerminationReason};
//!
//! let mut metrics = EpisodeMetrics::new();
//! metrics.record_tick();
//! metrics.record_reward(0.5);
//! metrics.set_termination(TerminationReason::Knockout);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// TerminationReason
// ============================================================================

/// Why a match (or an episode without a match result) ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// Still fighting
    #[default]
    InProgress,
    /// Health reached the KO threshold
    Knockout,
    /// Stayed down past the knockdown hold
    TechnicalKnockout,
    /// Left the ring bounds
    RingOut,
    /// Foul count reached the DQ threshold
    Disqualification,
    /// Round expired, decided on score
    DecisionScore,
    /// Round expired, equal score, decided on health
    DecisionHealth,
    /// Round expired with equal score and health
    Draw,
    /// Round expired in a bout without an opponent
    RoundExpired,
    /// Sustained floor contact with head or torso parts
    Incapacitated,
    /// Requested from outside (trainer, scene manager)
    External,
}

impl TerminationReason {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TerminationReason::InProgress)
    }

    pub fn is_decision(&self) -> bool {
        matches!(
            self,
            TerminationReason::DecisionScore
                | TerminationReason::DecisionHealth
                | TerminationReason::Draw
                | TerminationReason::RoundExpired
        )
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            TerminationReason::InProgress => "In Progress",
            TerminationReason::Knockout => "KO (Health)",
            TerminationReason::TechnicalKnockout => "TKO (Down)",
            TerminationReason::RingOut => "Ring Out",
            TerminationReason::Disqualification => "DQ (Fouls)",
            TerminationReason::DecisionScore => "Decision (Score)",
            TerminationReason::DecisionHealth => "Decision (Health)",
            TerminationReason::Draw => "Draw",
            TerminationReason::RoundExpired => "Round Expired",
            TerminationReason::Incapacitated => "Incapacitated",
            TerminationReason::External => "External",
        };
        write!(f, "{}", s)
    }
}

/// Result from one fighter's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    Win,
    Loss,
    Draw,
}

// ============================================================================
// EpisodeMetrics
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EpisodeMetrics {
    pub total_ticks: u64,
    pub cumulative_reward: f32,

    /// Scoring hits landed
    pub hits_landed: u32,
    pub head_hits_landed: u32,
    pub hits_taken: u32,
    /// Strikes this fighter blocked with the guard
    pub blocks_made: u32,
    /// Strikes of this fighter that hit a guard
    pub strikes_blocked: u32,
    pub fouls_committed: u32,
    pub environment_strikes: u32,
    pub damage_dealt: f32,
    pub damage_taken: f32,
    pub knockdowns: u32,

    pub termination_reason: TerminationReason,
    pub outcome: Option<MatchOutcome>,
}

impl EpisodeMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_tick(&mut self) {
        self.total_ticks += 1;
    }

    pub fn record_reward(&mut self, reward: f32) {
        self.cumulative_reward += reward;
    }

    pub fn set_termination(&mut self, reason: TerminationReason) {
        if !self.termination_reason.is_terminal() {
            self.termination_reason = reason;
        }
    }

    /// Landed-hit share of all strikes that reached a guard or a scoring area
    pub fn accuracy(&self) -> f32 {
        let attempts = self.hits_landed + self.strikes_blocked;
        if attempts == 0 {
            return 0.0;
        }
        self.hits_landed as f32 / attempts as f32
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_termination_reason_is_sticky() {
        let mut m = EpisodeMetrics::new();
        assert!(!m.termination_reason.is_terminal());
        m.set_termination(TerminationReason::Knockout);
        m.set_termination(TerminationReason::RingOut);
        assert_eq!(m.termination_reason, TerminationReason::Knockout);
    }

    #[test]
    fn test_accuracy() {
        let mut m = EpisodeMetrics::new();
        assert_eq!(m.accuracy(), 0.0);
        m.hits_landed = 3;
        m.strikes_blocked = 1;
        assert!((m.accuracy() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(TerminationReason::Disqualification.to_string(), "DQ (Fouls)");
        assert!(TerminationReason::Draw.is_decision());
        assert!(!TerminationReason::RingOut.is_decision());
    }

    #[test]
    fn test_serialization_snake_case() {
        let json = serde_json::to_string(&TerminationReason::TechnicalKnockout).unwrap();
        assert_eq!(json, "\"technical_knockout\"");
    }
}
