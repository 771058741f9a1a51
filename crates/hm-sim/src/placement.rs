//! Placement and resident assignment.

use tracing::{debug, info};

use hm_core::{AgentId, PlaceableId, PlaceableKind, Vec2};

use crate::error::Rejected;
use crate::world::World;

impl World {
    /// Place a new object of `kind` at `position`.
    ///
    /// Rejected, with no mutation, when `position` is outside the world or
    /// the new bounds overlap an existing placeable.  A new hut immediately
    /// adopts up to its capacity of homeless agents, picked in random order.
    pub fn try_place(&mut self, kind: PlaceableKind, position: Vec2) -> Result<PlaceableId, Rejected> {
        if !self.config.world.contains(position) {
            debug!(%kind, %position, "placement rejected: out of bounds");
            return Err(Rejected::OutOfBounds { position });
        }
        let candidate = self.placeables.candidate(kind, position, &self.config.placeables);
        if let Some(existing) = self.placeables.first_overlap(&candidate.bounds) {
            debug!(%kind, %position, %existing, "placement rejected: overlap");
            return Err(Rejected::Overlaps { existing });
        }

        let id = self.placeables.insert(candidate);
        let assigned = if kind == PlaceableKind::Hut { self.assign_residents(id).len() } else { 0 };
        info!(%kind, %id, %position, assigned, "placed");
        Ok(id)
    }

    /// Add a wandering, homeless agent at `position`.
    ///
    /// Rejected when `position` is outside the world or inside any
    /// placeable's bounds.
    pub fn add_agent(&mut self, position: Vec2) -> Result<AgentId, Rejected> {
        if !self.config.world.contains(position) {
            debug!(%position, "agent rejected: out of bounds");
            return Err(Rejected::OutOfBounds { position });
        }
        if let Some(obstacle) = self.placeables.containing(position) {
            debug!(%position, %obstacle, "agent rejected: inside obstacle");
            return Err(Rejected::InsideObstacle { obstacle });
        }
        let id = self.agents.spawn(position, self.config.agent.body_radius);
        debug!(agent = %id, %position, "agent added");
        Ok(id)
    }

    /// Move up to the hut's vacancies of homeless agents into hut `hut`,
    /// chosen in random order.  Returns the agents assigned.
    pub(crate) fn assign_residents(&mut self, hut: PlaceableId) -> Vec<AgentId> {
        let vacancies = match self.placeables.hut(hut) {
            Ok(h) => h.vacancies(),
            Err(_) => return Vec::new(),
        };

        let mut pool = self.agents.homeless_ids();
        self.rng.shuffle(&mut pool);

        let mut assigned = Vec::with_capacity(vacancies.min(pool.len()));
        for agent in pool.into_iter().take(vacancies) {
            if self.placeables.admit_resident(hut, agent).is_err() {
                break;
            }
            if let Some(a) = self.agents.get_mut(agent) {
                a.assign_home(hut);
            }
            assigned.push(agent);
        }
        assigned
    }
}
