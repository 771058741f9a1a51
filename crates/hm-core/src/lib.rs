//! `hm-core`: foundational types for the `hamlet` agent simulation.
//!
//! This crate is a dependency of every other `hm-*` crate.  It intentionally
//! has no `hm-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `PlaceableId`                              |
//! | [`geo`]         | `Vec2`, `Circle`, `Rect`, `Bounds`, push-apart math   |
//! | [`kind`]        | `PlaceableKind`, `EffectKind`, `ToolKind`             |
//! | [`time`]        | `WorldClock`, `Phase`, frame-dt clamping              |
//! | [`config`]      | `SimConfig` and its parameter groups                  |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`error`]       | `HmError`, `HmResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, kinds, `Vec2` and   |
//! |         | every configuration type.                                  |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod kind;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    AgentParams, ClockConfig, CollisionParams, EffectParams, PlaceableParams, SeedingParams,
    SimConfig, WorldBounds,
};
pub use error::{HmError, HmResult};
pub use geo::{Bounds, Circle, Rect, Vec2};
pub use ids::{AgentId, PlaceableId};
pub use kind::{EffectKind, PlaceableKind, ToolKind};
pub use rng::{AgentRng, SimRng};
pub use time::{FrameTimer, Phase, WorldClock, clamp_frame_dt};
