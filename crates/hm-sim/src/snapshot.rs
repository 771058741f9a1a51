//! Read-only render snapshot handed to the drawing layer.
//!
//! One draw list merges agents and placeables, sorted back to front by a
//! depth key: an agent's `y`, a placeable's bounds bottom.  Ties keep
//! placeables before agents.

use hm_agent::AgentState;
use hm_core::{AgentId, Bounds, Circle, Phase, PlaceableId, PlaceableKind, Vec2};

use crate::world::World;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawItem {
    Agent {
        id:       AgentId,
        position: Vec2,
        radius:   f64,
        heading:  f64,
        state:    AgentState,
        /// At home: not drawn.
        hidden:   bool,
        homeless: bool,
    },
    Placeable {
        id:       PlaceableId,
        kind:     PlaceableKind,
        position: Vec2,
        bounds:   Bounds,
        /// Resident count for huts, zero otherwise.
        residents: usize,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawEntry {
    pub depth: f64,
    pub item:  DrawItem,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSnapshot {
    pub frame:            u64,
    pub phase:            Phase,
    pub phase_remaining:  f64,
    pub speed_multiplier: f64,
    pub slowdown_active:  bool,
    /// Changes whenever the slowdown is switched on; renderers reset their
    /// particle state when it differs from the last value they saw.
    pub slowdown_generation: u64,
    pub force_field:      Option<Circle>,
    /// Back to front.
    pub entries:          Vec<DrawEntry>,
}

impl RenderSnapshot {
    pub fn agents(&self) -> impl Iterator<Item = &DrawItem> {
        self.entries
            .iter()
            .map(|e| &e.item)
            .filter(|i| matches!(i, DrawItem::Agent { .. }))
    }

    pub fn placeables(&self) -> impl Iterator<Item = &DrawItem> {
        self.entries
            .iter()
            .map(|e| &e.item)
            .filter(|i| matches!(i, DrawItem::Placeable { .. }))
    }
}

impl World {
    pub fn snapshot(&self) -> RenderSnapshot {
        let mut entries = Vec::with_capacity(self.placeables.len() + self.agents.len());

        entries.extend(self.placeables.iter().map(|p| DrawEntry {
            depth: p.depth_key(),
            item:  DrawItem::Placeable {
                id:        p.id,
                kind:      p.kind,
                position:  p.position,
                bounds:    p.bounds,
                residents: p.as_hut().map_or(0, |h| h.residents().len()),
            },
        }));
        entries.extend(self.agents.iter().map(|a| DrawEntry {
            depth: a.position.y,
            item:  DrawItem::Agent {
                id:       a.id,
                position: a.position,
                radius:   a.collision_radius(),
                heading:  a.heading,
                state:    a.state(),
                hidden:   a.state() == AgentState::AtHome,
                homeless: a.is_homeless(),
            },
        }));
        entries.sort_by(|a, b| a.depth.total_cmp(&b.depth));

        RenderSnapshot {
            frame:               self.frame,
            phase:               self.clock.phase(),
            phase_remaining:     self.clock.phase_remaining(),
            speed_multiplier:    self.clock.speed_multiplier(),
            slowdown_active:     self.effects.slowdown_active(),
            slowdown_generation: self.effects.slowdown_generation(),
            force_field:         self.effects.force_field().map(|f| f.disc()),
            entries,
        }
    }
}
