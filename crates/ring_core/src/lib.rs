//! # ring_core - Ragdoll Boxing Adjudication Core
//!
//! Rules, scoring and episode lifecycle for two physically simulated boxers
//! sharing one ring. The physics engine and the trainer stay outside; this
//! crate only sees their narrow interfaces.
//!
//! ## Features
//! - Discrete + swept (anti-tunneling) contact capture with force calibration
//! - Clean-hit gating, foul/DQ detection, guard blocks, KO/stun
//! - Fatigue, stamina and performance multiplier
//! - Annealed action smoothing for the 39-dim control vector
//! - Center-of-mass / support-polygon stability
//! - Deferred, physics-safe episode termination

// Engine APIs take many physics inputs at once.
#![allow(clippy::too_many_arguments)]

pub mod engine;
pub mod error;

pub use engine::bout::{Bout, EpisodeEnded, SweptContact, TickReport};
pub use engine::config::CombatConfig;
pub use engine::types::{Corner, SurfaceClass, Vec2, Vec3};
pub use error::{ConfigError, Result, ShapingError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
