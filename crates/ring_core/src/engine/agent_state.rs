//! Per-fighter combat state.
//!
//! Fields are private: only the effect arbiter, the fatigue model and the
//! lifecycle write them (crate-internal setters). Everything else reads
//! through the accessors, which double as the observation surface.

use serde::{Deserialize, Serialize};

use crate::engine::episode::EpisodeMetrics;
use crate::engine::lifecycle::PendingTermination;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentCombatState {
    health: f32,
    max_health: f32,
    score: f32,
    foul_count: u32,
    stamina: f32,
    performance: f32,
    min_performance: f32,
    stun_until: Option<f32>,
    last_scoring_time: Option<f32>,
    match_over: bool,
    round_timer: f32,
    knockdown_start: Option<f32>,
    episode_count: u32,
    pending_reward: f32,
    termination: PendingTermination,
    metrics: EpisodeMetrics,
}

impl AgentCombatState {
    pub fn new(max_health: f32, min_performance: f32) -> Self {
        let max_health = max_health.max(1.0);
        Self {
            health: max_health,
            max_health,
            score: 0.0,
            foul_count: 0,
            stamina: 1.0,
            performance: 1.0,
            min_performance: min_performance.clamp(0.0, 1.0),
            stun_until: None,
            last_scoring_time: None,
            match_over: false,
            round_timer: 0.0,
            knockdown_start: None,
            episode_count: 0,
            pending_reward: 0.0,
            termination: PendingTermination::default(),
            metrics: EpisodeMetrics::new(),
        }
    }

    /// Fresh episode: everything but the episode counter goes back to start.
    pub(crate) fn begin_episode(&mut self) {
        self.episode_count += 1;
        self.health = self.max_health;
        self.score = 0.0;
        self.foul_count = 0;
        self.stamina = 1.0;
        self.performance = 1.0;
        self.stun_until = None;
        self.last_scoring_time = None;
        self.match_over = false;
        self.round_timer = 0.0;
        self.knockdown_start = None;
        self.pending_reward = 0.0;
        self.termination.clear();
        self.metrics.reset();
    }

    // ========== Read accessors ==========

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn health01(&self) -> f32 {
        (self.health / self.max_health.max(1.0)).clamp(0.0, 1.0)
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn foul_count(&self) -> u32 {
        self.foul_count
    }

    pub fn stamina(&self) -> f32 {
        self.stamina
    }

    pub fn performance(&self) -> f32 {
        self.performance
    }

    pub fn is_stunned(&self, now: f32) -> bool {
        self.stun_until.is_some_and(|until| now < until)
    }

    pub fn stun_until(&self) -> Option<f32> {
        self.stun_until
    }

    pub fn is_match_over(&self) -> bool {
        self.match_over
    }

    pub fn round_timer(&self) -> f32 {
        self.round_timer
    }

    pub fn knockdown_start(&self) -> Option<f32> {
        self.knockdown_start
    }

    pub fn episode_count(&self) -> u32 {
        self.episode_count
    }

    pub fn pending_reward(&self) -> f32 {
        self.pending_reward
    }

    pub fn termination(&self) -> &PendingTermination {
        &self.termination
    }

    pub fn metrics(&self) -> &EpisodeMetrics {
        &self.metrics
    }

    pub fn scoring_cooldown_ready(&self, now: f32, cooldown: f32) -> bool {
        match self.last_scoring_time {
            Some(t) => now - t >= cooldown,
            None => true,
        }
    }

    // ========== Crate-internal writers ==========

    pub(crate) fn add_reward(&mut self, amount: f32) {
        if !amount.is_finite() {
            return;
        }
        self.pending_reward += amount;
        self.metrics.record_reward(amount);
    }

    /// Drain the reward accumulated since the last call.
    pub(crate) fn take_reward(&mut self) -> f32 {
        std::mem::take(&mut self.pending_reward)
    }

    pub(crate) fn add_score(&mut self, amount: f32) {
        self.score += amount.max(0.0);
    }

    /// Returns the damage actually removed.
    pub(crate) fn apply_damage(&mut self, amount: f32) -> f32 {
        let before = self.health;
        self.health = (self.health - amount.max(0.0)).max(0.0);
        before - self.health
    }

    pub(crate) fn increment_fouls(&mut self) -> u32 {
        self.foul_count += 1;
        self.foul_count
    }

    /// Extend-only stun window.
    pub(crate) fn stun_until_at_least(&mut self, until: f32) {
        if self.stun_until.map_or(true, |current| until > current) {
            self.stun_until = Some(until);
        }
    }

    pub(crate) fn arm_scoring_cooldown(&mut self, now: f32) {
        self.last_scoring_time = Some(now);
    }

    pub(crate) fn set_stamina(&mut self, stamina: f32) {
        self.stamina = stamina.clamp(0.0, 1.0);
    }

    pub(crate) fn set_performance(&mut self, performance: f32) {
        self.performance = performance.max(self.min_performance);
    }

    /// One-way latch for the current episode.
    pub(crate) fn mark_match_over(&mut self) {
        self.match_over = true;
    }

    pub(crate) fn advance_round_timer(&mut self, dt: f32) -> f32 {
        self.round_timer += dt;
        self.round_timer
    }

    pub(crate) fn set_knockdown_start(&mut self, start: Option<f32>) {
        self.knockdown_start = start;
    }

    pub(crate) fn termination_mut(&mut self) -> &mut PendingTermination {
        &mut self.termination
    }

    pub(crate) fn metrics_mut(&mut self) -> &mut EpisodeMetrics {
        &mut self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_floors_at_zero() {
        let mut s = AgentCombatState::new(100.0, 0.35);
        assert!((s.apply_damage(30.0) - 30.0).abs() < 1e-6);
        assert!((s.apply_damage(500.0) - 70.0).abs() < 1e-6);
        assert_eq!(s.health(), 0.0);
        // negative damage never heals
        s.apply_damage(-20.0);
        assert_eq!(s.health(), 0.0);
    }

    #[test]
    fn test_stun_only_extends() {
        let mut s = AgentCombatState::new(100.0, 0.35);
        s.stun_until_at_least(2.0);
        s.stun_until_at_least(1.0);
        assert_eq!(s.stun_until(), Some(2.0));
        assert!(s.is_stunned(1.5));
        assert!(!s.is_stunned(2.0));
    }

    #[test]
    fn test_score_ignores_negative() {
        let mut s = AgentCombatState::new(100.0, 0.35);
        s.add_score(0.4);
        s.add_score(-1.0);
        assert!((s.score() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_performance_floor() {
        let mut s = AgentCombatState::new(100.0, 0.35);
        s.set_performance(0.1);
        assert!((s.performance() - 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_begin_episode_resets_but_counts() {
        let mut s = AgentCombatState::new(100.0, 0.35);
        s.apply_damage(50.0);
        s.increment_fouls();
        s.mark_match_over();
        s.add_reward(1.0);
        s.begin_episode();
        assert_eq!(s.health(), 100.0);
        assert_eq!(s.foul_count(), 0);
        assert!(!s.is_match_over());
        assert_eq!(s.pending_reward(), 0.0);
        assert_eq!(s.episode_count(), 1);
    }

    #[test]
    fn test_take_reward_drains() {
        let mut s = AgentCombatState::new(100.0, 0.35);
        s.add_reward(0.25);
        s.add_reward(-0.05);
        assert!((s.take_reward() - 0.2).abs() < 1e-6);
        assert_eq!(s.take_reward(), 0.0);
        assert!((s.metrics().cumulative_reward - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_scoring_cooldown() {
        let mut s = AgentCombatState::new(100.0, 0.35);
        assert!(s.scoring_cooldown_ready(0.0, 0.2));
        s.arm_scoring_cooldown(1.0);
        assert!(!s.scoring_cooldown_ready(1.1, 0.2));
        assert!(s.scoring_cooldown_ready(1.2, 0.2));
    }
}
