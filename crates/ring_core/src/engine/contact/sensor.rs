//! Per-appendage contact dedup and sweep gating.

use std::collections::HashMap;

use tracing::trace;

use super::sweep::{SweepHit, SweepQuery};
use super::AppendageFrame;
use crate::engine::config::ContactConfig;
use crate::engine::types::{Appendage, BodyRef, Corner, SurfaceClass, Vec3};

/// Where an accepted contact goes next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Wall or ground: striker-only consequences
    Environment,
    /// Another fighter: goes to the judge
    Fighter(Corner),
}

/// Dedup state for one glove.
///
/// Cooldown stamps only move when a contact is accepted, and they are never
/// cleared, so a glove resting against a target cannot farm events.
#[derive(Debug, Clone)]
pub struct AppendageSensor {
    appendage: Appendage,
    last_accepted: Option<f32>,
    last_by_victim: HashMap<Corner, f32>,
    had_discrete_this_tick: bool,
    last_position: Option<Vec3>,
}

impl AppendageSensor {
    pub fn new(appendage: Appendage) -> Self {
        Self {
            appendage,
            last_accepted: None,
            last_by_victim: HashMap::with_capacity(2),
            had_discrete_this_tick: false,
            last_position: None,
        }
    }

    pub fn appendage(&self) -> Appendage {
        self.appendage
    }

    pub fn had_discrete_this_tick(&self) -> bool {
        self.had_discrete_this_tick
    }

    /// Record that the engine reported a collision for this glove this tick,
    /// accepted or not.
    pub fn mark_discrete(&mut self) {
        self.had_discrete_this_tick = true;
    }

    /// Forget the sweep origin, e.g. after the rig was teleported for a new
    /// episode. Cooldowns are kept.
    pub fn forget_position(&mut self) {
        self.last_position = None;
    }

    /// Run dedup for one candidate contact.
    pub fn screen(
        &mut self,
        attacker: Corner,
        body: BodyRef,
        surface: SurfaceClass,
        force: f32,
        now: f32,
        cfg: &ContactConfig,
    ) -> Option<Admission> {
        if let Some(last) = self.last_accepted {
            if now - last < cfg.per_appendage_cooldown {
                trace!(?attacker, appendage = ?self.appendage, "appendage cooldown");
                return None;
            }
        }

        if surface.is_environment() {
            if force < cfg.min_notify_force {
                return None;
            }
            self.last_accepted = Some(now);
            return Some(Admission::Environment);
        }

        let victim = match body {
            BodyRef::Fighter(victim) if victim != attacker => victim,
            _ => {
                trace!(?attacker, ?body, "contact with non-opponent body dropped");
                return None;
            }
        };

        if let Some(last) = self.last_by_victim.get(&victim) {
            if now - last < cfg.per_victim_cooldown {
                trace!(?attacker, ?victim, "victim cooldown");
                return None;
            }
        }

        if force < cfg.min_notify_force {
            trace!(?attacker, force, "below notify force");
            return None;
        }

        self.last_accepted = Some(now);
        self.last_by_victim.insert(victim, now);
        Some(Admission::Fighter(victim))
    }

    /// End-of-tick sweep along the glove's travel since the previous tick.
    ///
    /// Skipped when a discrete collision already covered this tick, when the
    /// glove barely moved, or when it is slow. The discrete flag is cleared
    /// and the sweep origin advanced in every case.
    pub fn sweep<Q: SweepQuery + ?Sized>(
        &mut self,
        striker: Corner,
        frame: &AppendageFrame,
        query: &Q,
        cfg: &ContactConfig,
    ) -> Vec<SweepHit> {
        let current = frame.position;
        let mut hits = Vec::new();

        if let Some(prev) = self.last_position {
            if cfg.sweep_enabled && !self.had_discrete_this_tick {
                let delta = current - prev;
                let dist = delta.norm();
                let speed = frame.velocity.norm();
                if dist.is_finite()
                    && speed.is_finite()
                    && dist >= cfg.sweep_min_travel
                    && speed >= cfg.sweep_min_speed
                {
                    let dir = delta / dist.max(1e-6);
                    hits = query
                        .sphere_cast(prev, cfg.sweep_radius, dir, dist, cfg.sweep_max_hits)
                        .into_iter()
                        .filter(|hit| hit.body != BodyRef::Fighter(striker))
                        .collect();
                }
            }
        }

        if current.iter().all(|c| c.is_finite()) {
            self.last_position = Some(current);
        }
        self.had_discrete_this_tick = false;
        hits
    }
}
