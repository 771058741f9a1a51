//! Placeable-store error type.

use thiserror::Error;

use hm_core::{AgentId, PlaceableId};

/// Errors produced by `hm-place`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaceError {
    #[error("placeable {0} not found")]
    NotFound(PlaceableId),

    #[error("placeable {0} is not a hut")]
    NotAHut(PlaceableId),

    #[error("hut {hut} is full ({capacity} residents)")]
    HutFull { hut: PlaceableId, capacity: u32 },

    #[error("agent {agent} already lives in hut {hut}")]
    AlreadyResident { hut: PlaceableId, agent: AgentId },
}

pub type PlaceResult<T> = Result<T, PlaceError>;
