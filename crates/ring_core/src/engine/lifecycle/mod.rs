//! Match lifecycle: deferred termination, knockdown tracking, decisions.
//!
//! Deciding an outcome and ending the episode are separate steps. Anything
//! running inside a physics callback may only *request* termination; the
//! bout's tick loop consumes the request once the physics step has settled.
//!
//! ```text
//! Active ──(KO / TKO / ring-out / DQ / decision)──▶ MatchOver
//!    │                                                  │
//!    └──── request(deadline) ──▶ Pending ──(tick ≥ deadline)──▶ EpisodeEnded
//! ```

mod ground_contact;

pub use ground_contact::{GroundContactMonitor, GroundContactStatus};

use serde::{Deserialize, Serialize};

use crate::engine::agent_state::AgentCombatState;
use crate::engine::config::MatchConfig;
use crate::engine::effects::CombatEffect;
use crate::engine::episode::TerminationReason;
use crate::engine::types::Corner;

// ============================================================================
// PendingTermination
// ============================================================================

/// Single pending end-of-episode request. Later requests only win when they
/// shorten the deadline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PendingTermination {
    deadline: Option<f32>,
    reason: Option<TerminationReason>,
}

impl PendingTermination {
    /// Returns true when the request changed the pending deadline.
    pub fn request(&mut self, now: f32, delay: f32, reason: TerminationReason) -> bool {
        let delay = if delay.is_finite() { delay.max(0.0) } else { 0.0 };
        let at = now + delay;
        match self.deadline {
            Some(current) if current <= at => false,
            _ => {
                self.deadline = Some(at);
                self.reason = Some(reason);
                true
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<f32> {
        self.deadline
    }

    /// Take the request if its deadline has passed.
    pub fn consume(&mut self, now: f32) -> Option<TerminationReason> {
        match self.deadline {
            Some(at) if now >= at => {
                self.deadline = None;
                self.reason.take().or(Some(TerminationReason::External))
            }
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.deadline = None;
        self.reason = None;
    }
}

// ============================================================================
// Knockdown
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnockdownStatus {
    Standing,
    /// Down, hold time not yet exceeded
    Down,
    /// Down longer than the hold duration
    Counted,
}

/// Track the hips-height knockdown timer. Rising above the threshold resets
/// it immediately.
pub(crate) fn update_knockdown(
    state: &mut AgentCombatState,
    hips_height: f32,
    now: f32,
    cfg: &MatchConfig,
) -> KnockdownStatus {
    if hips_height >= cfg.knockdown_hips_height {
        state.set_knockdown_start(None);
        return KnockdownStatus::Standing;
    }

    let start = match state.knockdown_start() {
        Some(start) => start,
        None => {
            state.set_knockdown_start(Some(now));
            state.metrics_mut().knockdowns += 1;
            now
        }
    };

    if now - start > cfg.knockdown_hold_seconds {
        KnockdownStatus::Counted
    } else {
        KnockdownStatus::Down
    }
}

// ============================================================================
// Decision
// ============================================================================

/// Round-expiry verdict: score first, then health, then a draw.
pub fn decide_round(
    me: Corner,
    mine: &AgentCombatState,
    theirs: &AgentCombatState,
) -> CombatEffect {
    let opp = me.other();
    if mine.score() > theirs.score() {
        CombatEffect::EndMatch { winner: me, loser: opp, reason: TerminationReason::DecisionScore }
    } else if mine.score() < theirs.score() {
        CombatEffect::EndMatch { winner: opp, loser: me, reason: TerminationReason::DecisionScore }
    } else if mine.health() > theirs.health() {
        CombatEffect::EndMatch { winner: me, loser: opp, reason: TerminationReason::DecisionHealth }
    } else if mine.health() < theirs.health() {
        CombatEffect::EndMatch { winner: opp, loser: me, reason: TerminationReason::DecisionHealth }
    } else {
        CombatEffect::EndDraw
    }
}

/// Result rewards for a finished match.
///
/// The score-difference bonus is one-sided: the winner never loses reward
/// through it and the loser never gains.
pub fn result_rewards(winner_score: f32, loser_score: f32, cfg: &MatchConfig) -> (f32, f32) {
    // an unchecked config may carry a negative or NaN clamp
    let limit = if cfg.score_diff_clamp.is_nan() { 0.0 } else { cfg.score_diff_clamp.abs() };
    let diff = winner_score - loser_score;
    let bonus = (diff.clamp(-limit, limit) * cfg.score_diff_bonus_scale).max(0.0);
    (cfg.win_reward + bonus, cfg.lose_reward - bonus)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earliest_request_wins() {
        let mut p = PendingTermination::default();
        assert!(p.request(1.0, 0.5, TerminationReason::Knockout));
        assert!(!p.request(1.0, 2.0, TerminationReason::RingOut));
        assert_eq!(p.deadline(), Some(1.5));
        assert!(p.request(1.0, 0.0, TerminationReason::External));
        assert_eq!(p.deadline(), Some(1.0));
    }

    #[test]
    fn test_consume_waits_for_deadline() {
        let mut p = PendingTermination::default();
        p.request(0.0, 0.1, TerminationReason::Incapacitated);
        assert_eq!(p.consume(0.05), None);
        assert_eq!(p.consume(0.1), Some(TerminationReason::Incapacitated));
        assert!(!p.is_pending());
        assert_eq!(p.consume(0.2), None);
    }

    #[test]
    fn test_negative_delay_is_immediate() {
        let mut p = PendingTermination::default();
        p.request(3.0, -5.0, TerminationReason::External);
        assert_eq!(p.deadline(), Some(3.0));
    }

    #[test]
    fn test_knockdown_resets_when_rising() {
        let cfg = MatchConfig::default();
        let mut s = AgentCombatState::new(100.0, 0.35);

        assert_eq!(update_knockdown(&mut s, 0.3, 0.0, &cfg), KnockdownStatus::Down);
        assert_eq!(update_knockdown(&mut s, 0.3, 1.0, &cfg), KnockdownStatus::Down);
        assert_eq!(s.knockdown_start(), Some(0.0));

        assert_eq!(update_knockdown(&mut s, 0.9, 1.1, &cfg), KnockdownStatus::Standing);
        assert_eq!(s.knockdown_start(), None);

        // fresh timer after getting back up
        assert_eq!(update_knockdown(&mut s, 0.3, 1.2, &cfg), KnockdownStatus::Down);
        assert_eq!(update_knockdown(&mut s, 0.3, 2.3, &cfg), KnockdownStatus::Down);
        assert_eq!(update_knockdown(&mut s, 0.3, 2.5, &cfg), KnockdownStatus::Counted);
        assert_eq!(s.metrics().knockdowns, 2);
    }

    #[test]
    fn test_decide_round_tiebreaks() {
        let mut red = AgentCombatState::new(100.0, 0.35);
        let mut blue = AgentCombatState::new(100.0, 0.35);

        assert_eq!(decide_round(Corner::Red, &red, &blue), CombatEffect::EndDraw);

        blue.apply_damage(10.0);
        assert_eq!(
            decide_round(Corner::Red, &red, &blue),
            CombatEffect::EndMatch {
                winner: Corner::Red,
                loser: Corner::Blue,
                reason: TerminationReason::DecisionHealth
            }
        );

        blue.add_score(1.0);
        red.apply_damage(50.0);
        assert_eq!(
            decide_round(Corner::Red, &red, &blue),
            CombatEffect::EndMatch {
                winner: Corner::Blue,
                loser: Corner::Red,
                reason: TerminationReason::DecisionScore
            }
        );
    }

    #[test]
    fn test_result_rewards_one_sided_bonus() {
        let cfg = MatchConfig::default();
        let (w, l) = result_rewards(5.0, 3.0, &cfg);
        assert!((w - 1.1).abs() < 1e-6);
        assert!((l + 1.1).abs() < 1e-6);

        // winner behind on score (e.g. KO from behind): no bonus either way
        let (w, l) = result_rewards(1.0, 4.0, &cfg);
        assert!((w - 1.0).abs() < 1e-6);
        assert!((l + 1.0).abs() < 1e-6);

        let (w, _) = result_rewards(50.0, 0.0, &cfg);
        assert!((w - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_result_rewards_tolerate_bad_clamp() {
        let mut cfg = MatchConfig::default();
        cfg.score_diff_clamp = -1.0;
        let (w, l) = result_rewards(5.0, 3.0, &cfg);
        // magnitude is used: diff 2 clamped to 1
        assert!((w - 1.05).abs() < 1e-6);
        assert!((l + 1.05).abs() < 1e-6);

        cfg.score_diff_clamp = f32::NAN;
        let (w, l) = result_rewards(5.0, 3.0, &cfg);
        assert_eq!((w, l), (cfg.win_reward, cfg.lose_reward));
    }
}
