//! `hm-effect`: time-boxed environmental effects and their scheduler.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`effect`]    | `AgentEffect` trait, `ForceField`, `Slowdown`, `Effect`   |
//! | [`scheduler`] | `EffectScheduler` (add / tick / apply_all, toggles)       |
//!
//! # Effect model (summary)
//!
//! ```text
//! ForceField  force = perp(n) * strength + n * strength * outward_ratio
//!             for agents with eps < |p - c| < radius, n = (p - c) / |p - c|
//! Slowdown    speed_effect_multiplier = factor, for every agent
//! ```
//!
//! Lifetimes are measured in simulation seconds; see [`scheduler`].

pub mod effect;
pub mod scheduler;


pub use effect::{ActiveEffect, AgentEffect, Effect, ForceField, Slowdown};
pub use scheduler::EffectScheduler;
