use thiserror::Error;

use hm_core::{PlaceableId, PlaceableKind, Vec2};

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("initial {kind} at {position} rejected: {reason}")]
    InitialPlacement {
        kind:     PlaceableKind,
        position: Vec2,
        reason:   Rejected,
    },
}

pub type SimResult<T> = Result<T, SimError>;

/// Why a user command was refused.  A rejected command never mutates the
/// world.
#[derive(Copy, Clone, Debug, Error, PartialEq)]
pub enum Rejected {
    #[error("position {position} is outside the world")]
    OutOfBounds { position: Vec2 },

    #[error("bounds overlap existing placeable {existing}")]
    Overlaps { existing: PlaceableId },

    #[error("position lies inside placeable {obstacle}")]
    InsideObstacle { obstacle: PlaceableId },
}
