//! Bout orchestrator.
//!
//! Owns both fighters and everything attached to them, exposes the entry
//! points the physics engine and the trainer call, and runs the
//! authoritative per-tick step.
//!
//! ## Tick contract
//!
//! ```text
//! physics step ──▶ on_discrete_collision (0..n per glove)
//!              ──▶ step(frames, sweep)
//!                    1. consume due termination requests (reported, skipped)
//!                    2. per fighter: fatigue, posture, ring, stability,
//!                       floor contact, knockdown, round clock
//!                    3. per glove: sweep unless a discrete hit already landed
//!                    4. advance the clock
//! ```
//!
//! Collision callbacks never end an episode themselves; a finished match
//! only requests termination, which the next `step` consumes.

use serde::Serialize;
use tracing::{debug, trace};

use crate::engine::agent_state::AgentCombatState;
use crate::engine::arena::{distance_band_penalty, edge_camping_penalty, ArenaBounds, RingObservation};
use crate::engine::config::CombatConfig;
use crate::engine::contact::{
    approx_force, impulse_force, Admission, AppendageFrame, AppendageSensor, ContactEvent, ContactSource,
    DiscreteCollision, ForceCalibration, SweepHit, SweepQuery,
};
use crate::engine::control_layout::{map_controls, JointCommands};
use crate::engine::effects::{apply_effects, CombatEffect};
use crate::engine::episode::{EpisodeMetrics, MatchOutcome, TerminationReason};
use crate::engine::fatigue::{angular_velocity_penalty, FatigueModel};
use crate::engine::frame::FighterFrame;
use crate::engine::judgment::{judge, judge_environment_strike, BodyPose, Verdict};
use crate::engine::lifecycle::{decide_round, update_knockdown, GroundContactMonitor, KnockdownStatus};
use crate::engine::shaping::ActionShaper;
use crate::engine::stability::{measure, stability_penalty, StabilityReading};
use crate::engine::timestep::SimClock;
use crate::engine::types::{Appendage, BodyRef, Corner, Vec3};
use crate::error::{ConfigError, ShapingError};

/// A fighter's episode finished this tick
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeEnded {
    pub corner: Corner,
    pub reason: TerminationReason,
    pub outcome: Option<MatchOutcome>,
    pub metrics: EpisodeMetrics,
}

/// Contact judged during the sweep phase of a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweptContact {
    pub attacker: Corner,
    pub appendage: Appendage,
    pub victim: Corner,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub tick: u64,
    pub time: f32,
    pub episodes_ended: Vec<EpisodeEnded>,
    pub swept_contacts: Vec<SweptContact>,
}

impl TickReport {
    pub fn ended(&self, corner: Corner) -> Option<&EpisodeEnded> {
        self.episodes_ended.iter().find(|e| e.corner == corner)
    }
}

pub struct Bout {
    config: CombatConfig,
    clock: SimClock,
    /// Single fighter (Red), no opponent
    solo: bool,
    agents: [AgentCombatState; 2],
    sensors: [[AppendageSensor; 2]; 2],
    calibration: [ForceCalibration; 2],
    fatigue: [FatigueModel; 2],
    shapers: [ActionShaper; 2],
    ground: [GroundContactMonitor; 2],
    poses: [BodyPose; 2],
    stability: [Option<StabilityReading>; 2],
    arena: Option<ArenaBounds>,
}

impl Bout {
    /// Two fighters, Red and Blue. Fails on a config `validate` rejects.
    pub fn new(config: CombatConfig, dt: f32) -> Result<Self, ConfigError> {
        Self::build(config, dt, false)
    }

    /// Red alone, e.g. for locomotion or shadow-boxing curricula.
    pub fn solo(config: CombatConfig, dt: f32) -> Result<Self, ConfigError> {
        Self::build(config, dt, true)
    }

    fn build(config: CombatConfig, dt: f32, solo: bool) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(solo, dt, "bout created");
        let agent = || AgentCombatState::new(config.match_rules.max_health, config.fatigue.min_performance);
        let sensors = || [AppendageSensor::new(Appendage::LeftHand), AppendageSensor::new(Appendage::RightHand)];
        let fatigue = FatigueModel::new(&config.fatigue);
        let ground = GroundContactMonitor::new(&config.ground_contact);

        Ok(Self {
            clock: SimClock::new(dt),
            solo,
            agents: [agent(), agent()],
            sensors: [sensors(), sensors()],
            calibration: [ForceCalibration::new(); 2],
            fatigue: [fatigue.clone(), fatigue],
            shapers: [ActionShaper::new(), ActionShaper::new()],
            ground: [ground.clone(), ground],
            poses: [BodyPose::default(); 2],
            stability: [None; 2],
            arena: None,
            config,
        })
    }

    pub fn with_arena(mut self, arena: ArenaBounds) -> Self {
        self.arena = Some(arena);
        self
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn is_solo(&self) -> bool {
        self.solo
    }

    pub fn now(&self) -> f32 {
        self.clock.now()
    }

    pub fn tick(&self) -> u64 {
        self.clock.tick()
    }

    pub fn is_active(&self, corner: Corner) -> bool {
        !self.solo || corner == Corner::Red
    }

    fn active_count(&self) -> usize {
        if self.solo {
            1
        } else {
            2
        }
    }

    // ========================================================================
    // Episode control
    // ========================================================================

    /// Reset one fighter for a new episode. Calibration and contact cooldowns
    /// carry over.
    pub fn begin_episode(&mut self, corner: Corner) {
        let i = corner.index();
        self.agents[i].begin_episode();
        self.fatigue[i].reset(&self.config.fatigue);
        self.shapers[i].reset();
        self.ground[i].reset();
        self.stability[i] = None;
        for sensor in &mut self.sensors[i] {
            sensor.forget_position();
        }
        debug!(?corner, episode = self.agents[i].episode_count(), "episode begin");
    }

    /// Ask for the fighter's episode to end after `delay` seconds (now when
    /// `None`). Only ever shortens an existing request.
    pub fn request_termination(&mut self, corner: Corner, delay: Option<f32>) {
        let now = self.clock.now();
        let changed = self.agents[corner.index()].termination_mut().request(
            now,
            delay.unwrap_or(0.0),
            TerminationReason::External,
        );
        trace!(?corner, ?delay, changed, "termination requested");
    }

    /// Latest hips pose for a fighter; foul checks use it between steps.
    pub fn update_pose(&mut self, corner: Corner, pose: BodyPose) {
        self.poses[corner.index()] = pose;
    }

    // ========================================================================
    // Contact entry points
    // ========================================================================

    /// Physics callback: a glove collided with something. Malformed
    /// collisions are dropped.
    pub fn on_discrete_collision(&mut self, collision: &DiscreteCollision) -> Option<Verdict> {
        let Some(attacker) = collision.attacker else {
            trace!("collision without attacker dropped");
            return None;
        };
        if !self.is_active(attacker) {
            return None;
        }
        let Some(body) = collision.victim else {
            trace!(?attacker, "collision without victim dropped");
            return None;
        };
        if body == BodyRef::Fighter(attacker) {
            return None;
        }

        let i = attacker.index();
        let a = collision.appendage.index();
        self.sensors[i][a].mark_discrete();

        let Some(surface) = collision.surface else {
            trace!(?attacker, "collision without surface dropped");
            return None;
        };

        let now = self.clock.now();
        let dt = self.clock.safe_dt();
        let force = impulse_force(&collision.impulse, dt);

        match self.sensors[i][a].screen(attacker, body, surface, force, now, &self.config.contact)? {
            Admission::Environment => {
                self.register_environment_strike(attacker, force);
                None
            }
            Admission::Fighter(victim) => {
                let striker = &collision.striker;
                let event = ContactEvent {
                    attacker,
                    appendage: collision.appendage,
                    victim,
                    surface,
                    point: collision.point.unwrap_or(striker.position),
                    normal: collision.normal.unwrap_or_else(Vec3::y),
                    appendage_position: striker.position,
                    appendage_velocity: striker.velocity,
                    appendage_forward: striker.forward,
                    relative_velocity: Some(collision.relative_velocity),
                    source: ContactSource::Discrete,
                    force,
                };
                let verdict = self.notify_contact(&event);
                self.update_calibration(attacker, force, approx_force(striker, dt));
                verdict
            }
        }
    }

    /// Judge a deduplicated fighter-on-fighter contact and apply its effects.
    pub fn notify_contact(&mut self, event: &ContactEvent) -> Option<Verdict> {
        if event.attacker == event.victim || !self.is_active(event.attacker) || !self.is_active(event.victim) {
            trace!(attacker = ?event.attacker, victim = ?event.victim, "contact between invalid corners");
            return None;
        }
        let now = self.clock.now();
        let judgment = judge(
            event,
            &self.agents[event.attacker.index()],
            &self.agents[event.victim.index()],
            &self.poses[event.victim.index()],
            now,
            &self.config,
        );
        apply_effects(&mut self.agents, &judgment.effects, now, &self.config.match_rules);
        Some(judgment.verdict)
    }

    /// A glove struck a wall or the floor.
    pub fn register_environment_strike(&mut self, striker: Corner, force: f32) {
        if !self.is_active(striker) {
            return;
        }
        let effects =
            judge_environment_strike(striker, &self.agents[striker.index()], force, &self.config.scoring);
        apply_effects(&mut self.agents, &effects, self.clock.now(), &self.config.match_rules);
    }

    /// Feed a paired impulse / velocity force sample for the attacker's
    /// swept-force calibration.
    pub fn update_calibration(&mut self, attacker: Corner, real_force: f32, approx_force: f32) -> bool {
        self.calibration[attacker.index()].update(real_force, approx_force, &self.config.calibration)
    }

    // ========================================================================
    // Control
    // ========================================================================

    /// Shape a raw control vector into joint commands for this tick.
    pub fn apply_actions(&mut self, corner: Corner, raw: &[f32]) -> Result<JointCommands, ShapingError> {
        let i = corner.index();
        let now = self.clock.now();
        let stunned = self.agents[i].is_stunned(now);
        let performance = self.agents[i].performance();

        let shaped = self.shapers[i].apply(
            raw,
            self.agents[i].episode_count(),
            performance,
            stunned,
            &self.config.shaping,
        )?;
        self.agents[i].add_reward(shaped.delta_penalty);

        let stun_scale = if stunned { self.config.shaping.stunned_strength_scale } else { 1.0 };
        Ok(map_controls(&shaped.values, performance * stun_scale, self.fatigue[i].force_limit()))
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advance the bout by one fixed step. `frames[i]` belongs to
    /// `Corner::BOTH[i]`; a fighter without a frame only takes part in
    /// termination bookkeeping.
    pub fn step<Q: SweepQuery + ?Sized>(&mut self, frames: &[FighterFrame], sweep: &Q) -> TickReport {
        let now = self.clock.now();
        let dt = self.clock.dt();
        let count = self.active_count();
        let mut report = TickReport { tick: self.clock.tick(), time: now, ..TickReport::default() };

        for (corner, frame) in Corner::BOTH.into_iter().zip(frames).take(count) {
            self.poses[corner.index()] = frame.hips;
        }

        let mut ended = [false; 2];
        for corner in Corner::BOTH.into_iter().take(count) {
            let state = &mut self.agents[corner.index()];
            if let Some(reason) = state.termination_mut().consume(now) {
                state.metrics_mut().set_termination(reason);
                debug!(?corner, %reason, tick = report.tick, "episode ended");
                report.episodes_ended.push(EpisodeEnded {
                    corner,
                    reason,
                    outcome: state.metrics().outcome,
                    metrics: state.metrics().clone(),
                });
                ended[corner.index()] = true;
            }
        }

        for (corner, frame) in Corner::BOTH.into_iter().zip(frames).take(count) {
            let i = corner.index();
            if ended[i] || self.agents[i].is_match_over() {
                continue;
            }
            self.agents[i].metrics_mut().record_tick();
            let opponent = if self.solo { None } else { frames.get(corner.other().index()) };
            self.update_fighter(corner, frame, opponent, now, dt);
        }

        for (corner, frame) in Corner::BOTH.into_iter().zip(frames).take(count) {
            for appendage in Appendage::ALL {
                let glove = *frame.glove(appendage);
                let hits = self.sensors[corner.index()][appendage.index()].sweep(
                    corner,
                    &glove,
                    sweep,
                    &self.config.contact,
                );
                for hit in hits {
                    if let Some(contact) = self.process_swept_hit(corner, appendage, &glove, &hit) {
                        report.swept_contacts.push(contact);
                    }
                }
            }
        }

        self.clock.advance();
        report
    }

    fn update_fighter(
        &mut self,
        corner: Corner,
        frame: &FighterFrame,
        opponent: Option<&FighterFrame>,
        now: f32,
        dt: f32,
    ) {
        let i = corner.index();
        let hips = frame.hips.hips_position;

        self.fatigue[i].update(&mut self.agents[i], &frame.segments, dt, now, &self.config.fatigue);

        let cfg = &self.config;
        let state = &mut self.agents[i];
        state.add_reward(angular_velocity_penalty(&frame.segments, cfg.behavior.angular_velocity_penalty_scale));

        if let Some(arena) = self.arena {
            if arena.is_out(&hips, cfg.match_rules.ring_out_margin) {
                state.add_reward(cfg.match_rules.ring_out_penalty);
                self.end_against(corner, TerminationReason::RingOut, now);
                return;
            }
            state.add_reward(edge_camping_penalty(arena.min_boundary_distance01(&hips), &cfg.behavior));
        }

        if let Some(opp) = opponent {
            let distance = (hips - opp.hips.hips_position).norm();
            state.add_reward(distance_band_penalty(distance, &cfg.behavior));
        }

        let reading = measure(&frame.segments, hips, &frame.support_feet(), &cfg.stability);
        state.add_reward(stability_penalty(&reading, &cfg.stability));
        self.stability[i] = Some(reading);

        if frame.hands_on_ground() {
            state.add_reward(cfg.stability.hands_on_ground_penalty);
        }

        let floor = self.ground[i].update(&frame.ground_contacts, dt);
        state.add_reward(floor.reward);
        if floor.request_end && state.termination_mut().request(now, 0.0, TerminationReason::Incapacitated) {
            debug!(?corner, "incapacitated on the floor");
        }

        match update_knockdown(state, hips.y, now, &cfg.match_rules) {
            KnockdownStatus::Counted => {
                self.end_against(corner, TerminationReason::TechnicalKnockout, now);
                return;
            }
            KnockdownStatus::Down => state.add_reward(cfg.match_rules.knockdown_penalty_per_tick),
            KnockdownStatus::Standing => {}
        }

        if state.advance_round_timer(dt) >= cfg.match_rules.round_seconds {
            let effect = if self.solo {
                CombatEffect::EndSolo { corner, reason: TerminationReason::RoundExpired }
            } else {
                decide_round(corner, &self.agents[i], &self.agents[corner.other().index()])
            };
            apply_effects(&mut self.agents, &[effect], now, &self.config.match_rules);
        }
    }

    /// `corner` lost by `reason`; the opponent wins, or the solo bout ends.
    fn end_against(&mut self, corner: Corner, reason: TerminationReason, now: f32) {
        let effect = if self.solo {
            CombatEffect::EndSolo { corner, reason }
        } else {
            CombatEffect::EndMatch { winner: corner.other(), loser: corner, reason }
        };
        apply_effects(&mut self.agents, &[effect], now, &self.config.match_rules);
    }

    fn process_swept_hit(
        &mut self,
        attacker: Corner,
        appendage: Appendage,
        glove: &AppendageFrame,
        hit: &SweepHit,
    ) -> Option<SweptContact> {
        let i = attacker.index();
        let now = self.clock.now();
        let force = approx_force(glove, self.clock.safe_dt()) * self.calibration[i].scale();

        let admission = self.sensors[i][appendage.index()].screen(
            attacker,
            hit.body,
            hit.surface,
            force,
            now,
            &self.config.contact,
        )?;

        match admission {
            Admission::Environment => {
                self.register_environment_strike(attacker, force);
                None
            }
            Admission::Fighter(victim) => {
                // glove center at first touch; the end-of-tick position may
                // already be past the contact
                let touch = hit.point + hit.normal * self.config.contact.sweep_radius;
                let event = ContactEvent {
                    attacker,
                    appendage,
                    victim,
                    surface: hit.surface,
                    point: hit.point,
                    normal: hit.normal,
                    appendage_position: touch,
                    appendage_velocity: glove.velocity,
                    appendage_forward: glove.forward,
                    relative_velocity: None,
                    source: ContactSource::Swept,
                    force,
                };
                let verdict = self.notify_contact(&event)?;
                Some(SweptContact { attacker, appendage, victim, verdict })
            }
        }
    }

    // ========================================================================
    // Observation accessors
    // ========================================================================

    pub fn agent(&self, corner: Corner) -> &AgentCombatState {
        &self.agents[corner.index()]
    }

    pub fn health01(&self, corner: Corner) -> f32 {
        self.agents[corner.index()].health01()
    }

    pub fn stamina(&self, corner: Corner) -> f32 {
        self.agents[corner.index()].stamina()
    }

    pub fn performance(&self, corner: Corner) -> f32 {
        self.agents[corner.index()].performance()
    }

    pub fn is_stunned(&self, corner: Corner) -> bool {
        self.agents[corner.index()].is_stunned(self.clock.now())
    }

    /// Own share of the combined score; 0.5 before anyone has scored.
    pub fn score_share(&self, corner: Corner) -> f32 {
        let own = self.agents[corner.index()].score();
        let opp = if self.solo { 0.0 } else { self.agents[corner.other().index()].score() };
        let total = own + opp;
        if total <= f32::EPSILON {
            0.5
        } else {
            own / total
        }
    }

    /// Drain the reward accumulated since the last call.
    pub fn take_reward(&mut self, corner: Corner) -> f32 {
        self.agents[corner.index()].take_reward()
    }

    pub fn ring_observation(&self, corner: Corner) -> Option<RingObservation> {
        let arena = self.arena.as_ref()?;
        Some(arena.observe(&self.poses[corner.index()].hips_position))
    }

    /// Stability measured during the last step; `None` before the first one
    /// of an episode.
    pub fn stability(&self, corner: Corner) -> Option<&StabilityReading> {
        self.stability[corner.index()].as_ref()
    }

    pub fn calibration_scale(&self, corner: Corner) -> f32 {
        self.calibration[corner.index()].scale()
    }

    pub fn force_limit(&self, corner: Corner) -> f32 {
        self.fatigue[corner.index()].force_limit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::CONTROL_DIM;
    use crate::engine::contact::NoSweep;
    use crate::engine::types::{BodyPart, SurfaceClass};

    fn duel() -> Bout {
        Bout::new(CombatConfig::default(), 0.02).unwrap()
    }

    fn frames() -> Vec<FighterFrame> {
        vec![
            FighterFrame::standing(Vec3::new(0.0, 1.0, -0.6), Vec3::z()),
            FighterFrame::standing(Vec3::new(0.0, 1.0, 0.6), -Vec3::z()),
        ]
    }

    #[test]
    fn test_invalid_config_refused() {
        let mut cfg = CombatConfig::default();
        cfg.calibration.scale_min = 4.0;
        cfg.calibration.scale_max = 0.25;
        assert!(matches!(Bout::new(cfg.clone(), 0.02), Err(ConfigError::InvertedRange { .. })));
        assert!(Bout::solo(cfg, 0.02).is_err());

        let mut cfg = CombatConfig::default();
        cfg.match_rules.score_diff_clamp = -1.0;
        assert!(matches!(Bout::new(cfg, 0.02), Err(ConfigError::OutOfRange { .. })));
    }

    #[test]
    fn test_request_termination_consumed_next_step() {
        let mut bout = duel();
        bout.request_termination(Corner::Blue, None);
        let report = bout.step(&frames(), &NoSweep);
        let ended = report.ended(Corner::Blue).unwrap();
        assert_eq!(ended.reason, TerminationReason::External);
        assert!(report.ended(Corner::Red).is_none());
    }

    #[test]
    fn test_delayed_termination_waits() {
        let mut bout = Bout::new(CombatConfig::default(), 0.125).unwrap();
        bout.request_termination(Corner::Red, Some(0.5));
        let f = frames();
        let mut ended_at = None;
        for _ in 0..10 {
            let report = bout.step(&f, &NoSweep);
            if report.ended(Corner::Red).is_some() {
                ended_at = Some(report.tick);
                break;
            }
        }
        assert_eq!(ended_at, Some(4));
    }

    #[test]
    fn test_apply_actions_rejects_wrong_dimension() {
        let mut bout = duel();
        let err = bout.apply_actions(Corner::Red, &[0.0; 10]).unwrap_err();
        assert_eq!(err, ShapingError::DimensionMismatch { expected: CONTROL_DIM, found: 10 });
        assert_eq!(bout.take_reward(Corner::Red), 0.0);
    }

    #[test]
    fn test_apply_actions_scales_strength_by_performance() {
        let mut bout = duel();
        let cmds = bout.apply_actions(Corner::Red, &[1.0; CONTROL_DIM]).unwrap();
        let chest = cmds.get(BodyPart::Chest).unwrap();
        assert!(chest.strength > 0.0 && chest.strength <= 1.0);
        assert!(bout.take_reward(Corner::Red) < 0.0);
    }

    #[test]
    fn test_environment_strike_damages_striker() {
        let mut bout = duel();
        bout.register_environment_strike(Corner::Red, 900.0);
        assert!(bout.health01(Corner::Red) < 1.0);
        assert_eq!(bout.health01(Corner::Blue), 1.0);
    }

    #[test]
    fn test_malformed_collision_dropped() {
        let mut bout = duel();
        let collision = DiscreteCollision {
            attacker: Some(Corner::Red),
            appendage: Appendage::LeftHand,
            victim: Some(BodyRef::Fighter(Corner::Blue)),
            surface: None,
            point: None,
            normal: None,
            impulse: Vec3::new(0.0, 0.0, 50.0),
            relative_velocity: Vec3::zeros(),
            striker: AppendageFrame::default(),
        };
        assert_eq!(bout.on_discrete_collision(&collision), None);
        assert_eq!(bout.health01(Corner::Blue), 1.0);
    }

    #[test]
    fn test_ring_out_ends_match() {
        let mut bout = duel().with_arena(ArenaBounds::square(6.0));
        let mut f = frames();
        f[0].hips.hips_position = Vec3::new(3.5, 1.0, 0.0);
        bout.step(&f, &NoSweep);
        assert!(bout.agent(Corner::Red).is_match_over());
        assert!(bout.agent(Corner::Blue).is_match_over());
        let report = bout.step(&f, &NoSweep);
        assert_eq!(report.ended(Corner::Red).unwrap().reason, TerminationReason::RingOut);
        assert_eq!(report.ended(Corner::Blue).unwrap().outcome, Some(MatchOutcome::Win));
    }

    #[test]
    fn test_solo_round_expiry() {
        let mut cfg = CombatConfig::default();
        cfg.match_rules.round_seconds = 0.5;
        let mut bout = Bout::solo(cfg, 0.125).unwrap();
        let f = frames();
        for _ in 0..4 {
            bout.step(&f[..1], &NoSweep);
        }
        assert!(bout.agent(Corner::Red).is_match_over());
        assert!(!bout.agent(Corner::Blue).is_match_over());
        let report = bout.step(&f[..1], &NoSweep);
        assert_eq!(report.ended(Corner::Red).unwrap().reason, TerminationReason::RoundExpired);
    }

    #[test]
    fn test_begin_episode_keeps_calibration() {
        let mut bout = duel();
        bout.update_calibration(Corner::Red, 2000.0, 1000.0);
        let scale = bout.calibration_scale(Corner::Red);
        bout.begin_episode(Corner::Red);
        assert_eq!(bout.calibration_scale(Corner::Red), scale);
        assert_eq!(bout.agent(Corner::Red).episode_count(), 1);
    }

    #[test]
    fn test_score_share() {
        let mut bout = duel();
        assert_eq!(bout.score_share(Corner::Red), 0.5);
        bout.agents[0].add_score(3.0);
        bout.agents[1].add_score(1.0);
        assert!((bout.score_share(Corner::Red) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_hands_down_penalized() {
        let mut bout = duel();
        let mut f = frames();
        f[0].ground_contacts[BodyPart::HandL.index()] = true;
        bout.step(&f, &NoSweep);
        let red = bout.take_reward(Corner::Red);
        let blue = bout.take_reward(Corner::Blue);
        assert!(red < blue);
    }

    #[test]
    fn test_surface_tag_to_wall_strike() {
        let mut bout = duel();
        let collision = DiscreteCollision {
            attacker: Some(Corner::Blue),
            appendage: Appendage::RightHand,
            victim: Some(BodyRef::Environment),
            surface: Some(SurfaceClass::from_tag("Wall")),
            point: None,
            normal: None,
            impulse: Vec3::new(0.0, 0.0, 10.0),
            relative_velocity: Vec3::zeros(),
            striker: AppendageFrame::default(),
        };
        assert_eq!(bout.on_discrete_collision(&collision), None);
        assert!(bout.health01(Corner::Blue) < 1.0);
        assert_eq!(bout.agent(Corner::Blue).metrics().environment_strikes, 1);
    }
}
