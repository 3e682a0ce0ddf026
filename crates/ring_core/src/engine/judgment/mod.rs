//! Punch judgment.
//!
//! Turns an accepted `ContactEvent` into a verdict and the effects it
//! causes. The judge only reads fighter state; the arbiter applies the
//! returned effects.
//!
//! Decision order (first match wins):
//! 1. reject: victim already over, self contact, force under the scoring minimum
//! 2. reject: attacker scoring cooldown still running (otherwise it is armed now)
//! 3. reject: degenerate direction or too slow an approach
//! 4. foul: illegal tag, low blow, strike from behind
//! 5. blocked by the guard
//! 6. ignored: anything that is not head or torso
//! 7. scored

mod clean;
mod foul;

pub use clean::{assess_clean_hit, CleanHit};
pub use foul::{classify_foul, is_behind, FoulKind};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::agent_state::AgentCombatState;
use crate::engine::config::{CombatConfig, ScoringConfig};
use crate::engine::contact::ContactEvent;
use crate::engine::effects::{CombatEffect, StatEvent};
use crate::engine::episode::TerminationReason;
use crate::engine::types::{inverse_lerp01, Corner, SurfaceClass, Vec3};

/// Victim reference frame used by the foul checks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPose {
    pub hips_position: Vec3,
    pub hips_forward: Vec3,
}

impl Default for BodyPose {
    fn default() -> Self {
        Self { hips_position: Vec3::new(0.0, 1.0, 0.0), hips_forward: Vec3::z() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    VictimMatchOver,
    SelfContact,
    BelowScoringForce,
    AttackerCooldown,
    DegenerateDirection,
    SlowApproach,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitRegion {
    Head,
    Torso,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Rejected(RejectReason),
    Foul { kind: FoulKind, disqualified: bool },
    Blocked,
    /// Legal, clean enough, but not a scoring surface
    Ignored,
    Scored { region: HitRegion, reward: f32, damage: f32, stunned: bool, knockout: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Judgment {
    pub verdict: Verdict,
    pub effects: Vec<CombatEffect>,
}

impl Judgment {
    fn rejected(reason: RejectReason, effects: Vec<CombatEffect>) -> Self {
        Self { verdict: Verdict::Rejected(reason), effects }
    }
}

/// Normalized force: scoring range mapped onto [0, 1].
#[inline]
pub fn force01(force: f32, cfg: &ScoringConfig) -> f32 {
    inverse_lerp01(cfg.min_scoring_force, cfg.max_scoring_force, force)
}

/// Judge one fighter-on-fighter contact.
pub fn judge(
    event: &ContactEvent,
    attacker: &AgentCombatState,
    victim: &AgentCombatState,
    victim_pose: &BodyPose,
    now: f32,
    config: &CombatConfig,
) -> Judgment {
    let cfg = &config.scoring;
    let a = event.attacker;
    let v = event.victim;

    if victim.is_match_over() {
        return Judgment::rejected(RejectReason::VictimMatchOver, Vec::new());
    }
    if a == v {
        return Judgment::rejected(RejectReason::SelfContact, Vec::new());
    }
    if !(event.force >= cfg.min_scoring_force) {
        return Judgment::rejected(RejectReason::BelowScoringForce, Vec::new());
    }

    if !attacker.scoring_cooldown_ready(now, cfg.attacker_cooldown) {
        return Judgment::rejected(RejectReason::AttackerCooldown, Vec::new());
    }
    // from here on the cooldown is spent, even if the strike is not clean
    let mut effects = vec![CombatEffect::ArmScoringCooldown { target: a, at: now }];

    let clean = match assess_clean_hit(
        &event.appendage_position,
        &event.appendage_velocity,
        &event.appendage_forward,
        &event.point,
        cfg,
    ) {
        Ok(clean) => clean,
        Err(reason) => return Judgment::rejected(reason, effects),
    };

    let f01 = force01(event.force, cfg);

    if let Some(kind) = classify_foul(event.surface, &event.point, victim_pose, cfg.belt_line_offset) {
        let disqualified = attacker.foul_count() + 1 >= cfg.max_fouls_before_dq;
        effects.push(CombatEffect::Reward { target: a, amount: cfg.penalty_foul * (0.7 + 0.6 * f01) });
        effects.push(CombatEffect::Foul { offender: a });
        if disqualified {
            effects.push(CombatEffect::EndMatch {
                winner: v,
                loser: a,
                reason: TerminationReason::Disqualification,
            });
        }
        debug!(attacker = ?a, ?kind, fouls = attacker.foul_count() + 1, disqualified, "foul");
        return Judgment { verdict: Verdict::Foul { kind, disqualified }, effects };
    }

    let region = match event.surface {
        SurfaceClass::Guard => {
            let k = 0.5 + 0.5 * f01;
            effects.push(CombatEffect::Reward { target: a, amount: cfg.penalty_blocked_attacker * k });
            effects.push(CombatEffect::Reward { target: v, amount: cfg.reward_blocked_defender * k });
            effects.push(CombatEffect::Stat { target: a, event: StatEvent::StrikeBlocked });
            effects.push(CombatEffect::Stat { target: v, event: StatEvent::BlockMade });
            debug!(attacker = ?a, force01 = f01, "blocked");
            return Judgment { verdict: Verdict::Blocked, effects };
        }
        SurfaceClass::Head => HitRegion::Head,
        SurfaceClass::Torso => HitRegion::Torso,
        _ => return Judgment { verdict: Verdict::Ignored, effects },
    };

    let (base_reward, damage_mul) = match region {
        HitRegion::Head => (cfg.reward_head, cfg.damage_head_multiplier),
        HitRegion::Torso => (cfg.reward_torso, cfg.damage_torso_multiplier),
    };
    let reward = base_reward * clean.clean * (0.45 + 0.55 * f01);
    let damage = cfg.damage_base * damage_mul * clean.clean * (0.35 + 0.65 * f01);

    effects.push(CombatEffect::Reward { target: a, amount: reward });
    effects.push(CombatEffect::Reward { target: v, amount: -reward * cfg.victim_penalty_factor });
    effects.push(CombatEffect::Score { target: a, amount: reward.max(0.0) });
    effects.push(CombatEffect::Damage { target: v, amount: damage, source: Some(a) });
    effects.push(CombatEffect::Stat { target: a, event: StatEvent::HitLanded { head: region == HitRegion::Head } });
    effects.push(CombatEffect::Stat { target: v, event: StatEvent::HitTaken });

    let stunned = region == HitRegion::Head
        && f01 >= cfg.stun_head_force01
        && clean.clean >= cfg.stun_clean_threshold;
    if stunned {
        effects.push(CombatEffect::Stun { target: v, until: now + cfg.stun_seconds });
    }

    let remaining = (victim.health() - damage.max(0.0)).max(0.0);
    let knockout = remaining <= config.match_rules.ko_health_threshold;
    if knockout {
        effects.push(CombatEffect::EndMatch { winner: a, loser: v, reason: TerminationReason::Knockout });
    }

    debug!(
        attacker = ?a,
        ?region,
        force01 = f01,
        clean = clean.clean,
        reward,
        damage,
        stunned,
        knockout,
        source = ?event.source,
        "scored"
    );

    Judgment { verdict: Verdict::Scored { region, reward, damage, stunned, knockout }, effects }
}

/// Striker hit a wall or the floor. Only the striker pays.
pub fn judge_environment_strike(
    striker: Corner,
    state: &AgentCombatState,
    force: f32,
    cfg: &ScoringConfig,
) -> Vec<CombatEffect> {
    if state.is_match_over() {
        return Vec::new();
    }
    let f01 = force01(force, cfg);
    debug!(?striker, force, "environment strike");
    vec![
        CombatEffect::Reward { target: striker, amount: cfg.penalty_environment_strike * (0.6 + 0.8 * f01) },
        CombatEffect::Damage {
            target: striker,
            amount: cfg.environment_damage * (0.5 + 0.5 * f01),
            source: None,
        },
        CombatEffect::Stat { target: striker, event: StatEvent::EnvironmentStrike },
    ]
}
