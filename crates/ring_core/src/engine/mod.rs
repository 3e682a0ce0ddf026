pub mod agent_state;
pub mod arena;
pub mod bout;
pub mod config;
pub mod contact;
pub mod control_layout;
pub mod effects;
pub mod episode;
pub mod fatigue;
pub mod frame;
pub mod judgment;
pub mod lifecycle;
pub mod shaping;
pub mod stability;
pub mod timestep;
pub mod types;
