//! `hm-agent`: agents, their Wandering / GoingHome / AtHome state machine,
//! and arena storage for the `hamlet` simulation.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`agent`]       | `Agent`, `AgentState`                                     |
//! | [`steering`]    | `Agent::update`, `StepContext`, `HomeAnchor`, `Transition`|
//! | [`store`]       | `AgentStore` (id-indexed arena, batch removal)            |
//! | [`builder`]     | `AgentStoreBuilder` (seeded construction)                 |
//!
//! Agents know their home only by `PlaceableId`.  Resolving that id to an
//! anchor point is the caller's job, which keeps this crate free of any
//! placeable types.

pub mod agent;
pub mod builder;
pub mod steering;
pub mod store;


pub use agent::{Agent, AgentState};
pub use builder::AgentStoreBuilder;
pub use steering::{HomeAnchor, StepContext, Transition};
pub use store::AgentStore;
