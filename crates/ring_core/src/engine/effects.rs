//! Effect commands and the arbiter that applies them.
//!
//! Judgment and lifecycle code never write another fighter's state. They
//! describe what should happen as `CombatEffect` values; `apply_effects`
//! is the single writer and applies them in list order, so a knockout
//! always sees the damage that caused it and result rewards see the final
//! scores.

use tracing::info;

use crate::engine::agent_state::AgentCombatState;
use crate::engine::config::MatchConfig;
use crate::engine::episode::{MatchOutcome, TerminationReason};
use crate::engine::lifecycle::result_rewards;
use crate::engine::types::Corner;

/// Statistics-only events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatEvent {
    HitLanded { head: bool },
    HitTaken,
    BlockMade,
    StrikeBlocked,
    EnvironmentStrike,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CombatEffect {
    Reward { target: Corner, amount: f32 },
    Score { target: Corner, amount: f32 },
    Damage { target: Corner, amount: f32, source: Option<Corner> },
    Foul { offender: Corner },
    Stun { target: Corner, until: f32 },
    ArmScoringCooldown { target: Corner, at: f32 },
    Stat { target: Corner, event: StatEvent },
    /// Both fighters become MatchOver; no-op if either already is.
    EndMatch { winner: Corner, loser: Corner, reason: TerminationReason },
    /// Round expired level: both MatchOver, no result rewards.
    EndDraw,
    /// Single-fighter bout: only this fighter ends.
    EndSolo { corner: Corner, reason: TerminationReason },
}

/// Apply effects to both fighters in order.
pub fn apply_effects(
    agents: &mut [AgentCombatState; 2],
    effects: &[CombatEffect],
    now: f32,
    cfg: &MatchConfig,
) {
    for effect in effects {
        apply_one(agents, *effect, now, cfg);
    }
}

fn apply_one(agents: &mut [AgentCombatState; 2], effect: CombatEffect, now: f32, cfg: &MatchConfig) {
    match effect {
        CombatEffect::Reward { target, amount } => agents[target.index()].add_reward(amount),
        CombatEffect::Score { target, amount } => agents[target.index()].add_score(amount),
        CombatEffect::Damage { target, amount, source } => {
            let dealt = agents[target.index()].apply_damage(amount);
            agents[target.index()].metrics_mut().damage_taken += dealt;
            if let Some(src) = source {
                if src != target {
                    agents[src.index()].metrics_mut().damage_dealt += dealt;
                }
            }
        }
        CombatEffect::Foul { offender } => {
            let state = &mut agents[offender.index()];
            state.increment_fouls();
            state.metrics_mut().fouls_committed += 1;
        }
        CombatEffect::Stun { target, until } => agents[target.index()].stun_until_at_least(until),
        CombatEffect::ArmScoringCooldown { target, at } => {
            agents[target.index()].arm_scoring_cooldown(at)
        }
        CombatEffect::Stat { target, event } => {
            let m = agents[target.index()].metrics_mut();
            match event {
                StatEvent::HitLanded { head } => {
                    m.hits_landed += 1;
                    if head {
                        m.head_hits_landed += 1;
                    }
                }
                StatEvent::HitTaken => m.hits_taken += 1,
                StatEvent::BlockMade => m.blocks_made += 1,
                StatEvent::StrikeBlocked => m.strikes_blocked += 1,
                StatEvent::EnvironmentStrike => m.environment_strikes += 1,
            }
        }
        CombatEffect::EndMatch { winner, loser, reason } => end_match(agents, winner, loser, reason, now, cfg),
        CombatEffect::EndDraw => {
            if agents.iter().any(|a| a.is_match_over()) {
                return;
            }
            for state in agents.iter_mut() {
                state.mark_match_over();
                state.metrics_mut().set_termination(TerminationReason::Draw);
                state.metrics_mut().outcome = Some(MatchOutcome::Draw);
                state.termination_mut().request(now, 0.0, TerminationReason::Draw);
            }
            info!(reason = %TerminationReason::Draw, "match over");
        }
        CombatEffect::EndSolo { corner, reason } => {
            let state = &mut agents[corner.index()];
            if state.is_match_over() {
                return;
            }
            state.mark_match_over();
            state.metrics_mut().set_termination(reason);
            state.termination_mut().request(now, 0.0, reason);
            info!(?corner, %reason, "solo bout over");
        }
    }
}

fn end_match(
    agents: &mut [AgentCombatState; 2],
    winner: Corner,
    loser: Corner,
    reason: TerminationReason,
    now: f32,
    cfg: &MatchConfig,
) {
    if winner == loser {
        return;
    }
    if agents[winner.index()].is_match_over() || agents[loser.index()].is_match_over() {
        return;
    }

    let (win_reward, lose_reward) =
        result_rewards(agents[winner.index()].score(), agents[loser.index()].score(), cfg);

    for (corner, reward, outcome) in
        [(winner, win_reward, MatchOutcome::Win), (loser, lose_reward, MatchOutcome::Loss)]
    {
        let state = &mut agents[corner.index()];
        state.mark_match_over();
        state.add_reward(reward);
        state.metrics_mut().set_termination(reason);
        state.metrics_mut().outcome = Some(outcome);
        state.termination_mut().request(now, 0.0, reason);
    }

    info!(
        ?winner,
        ?loser,
        %reason,
        winner_score = agents[winner.index()].score(),
        loser_score = agents[loser.index()].score(),
        "match over"
    );
}
