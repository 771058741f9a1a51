//! `hm-sim`: frame loop orchestrator for the `hamlet` agent simulation.
//!
//! # Frame loop
//!
//! ```text
//! every frame (dt clamped to config.max_dt):
//!   ① Clock     : advance by dt × speed; report a day/night flip once.
//!   ② Effects   : purge effects whose expiry (simulation time) has passed.
//!   ③ Agents    : apply effects, transitions, steering, forces, bounce.
//!   ④ Collisions: N passes of agent-agent and agent-obstacle resolution;
//!                 agents inside a hole are marked, then removed in one
//!                 batch together with their hut memberships.
//!   ⑤ Report    : FrameStats, and a RenderSnapshot every K frames.
//! ```
//!
//! Commands (`Command`) are applied between frames and take effect on the
//! next one.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for the broadphase grid.      |
//! | `serde`   | Serde derives on config, geometry and placeable types.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hm_core::{PlaceableKind, SimConfig, ToolKind, Vec2};
//! use hm_sim::{Command, NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default()).build()?;
//! sim.apply(Command::Place { tool: ToolKind::Place(PlaceableKind::Hut), position: Vec2::new(200.0, 150.0) })?;
//! sim.run_frames(3_000, 1.0 / 60.0, &mut NoopObserver);
//! ```

pub mod builder;
pub mod collision;
pub mod command;
pub mod error;
pub mod grid;
pub mod observer;
pub mod placement;
pub mod sim;
pub mod snapshot;
pub mod world;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use collision::{CollisionReport, CollisionResolver};
pub use command::{Command, CommandOutcome};
pub use error::{Rejected, SimError, SimResult};
pub use observer::{FrameStats, NoopObserver, SimObserver};
pub use sim::Sim;
pub use snapshot::{DrawEntry, DrawItem, RenderSnapshot};
pub use world::World;
