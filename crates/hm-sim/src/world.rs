//! The `World` aggregate: every collection the frame loop touches.

use tracing::debug;

use hm_agent::{AgentStore, HomeAnchor};
use hm_core::{AgentId, PlaceableId, SimConfig, SimRng, WorldClock};
use hm_effect::EffectScheduler;
use hm_place::PlaceableStore;

/// All mutable simulation state, owned by [`Sim`](crate::Sim) and passed by
/// reference to each phase.
///
/// Hut membership is kept consistent by the only two code paths that touch
/// it: resident assignment on hut placement and batch removal of consumed
/// agents.
pub struct World {
    pub(crate) config:     SimConfig,
    pub(crate) clock:      WorldClock,
    pub(crate) agents:     AgentStore,
    pub(crate) placeables: PlaceableStore,
    pub(crate) effects:    EffectScheduler,
    pub(crate) rng:        SimRng,
    /// Completed frames.
    pub(crate) frame:      u64,
}

impl World {
    pub fn new(config: SimConfig, agents: AgentStore, rng: SimRng) -> Self {
        Self {
            clock: WorldClock::new(&config.clock),
            config,
            agents,
            placeables: PlaceableStore::new(),
            effects: EffectScheduler::new(),
            rng,
            frame: 0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn clock(&self) -> &WorldClock {
        &self.clock
    }

    /// Mutable clock access for hosts that jump the cycle (e.g. a "skip to
    /// dusk" control).  Flips caused this way are not reported.
    #[inline]
    pub fn clock_mut(&mut self) -> &mut WorldClock {
        &mut self.clock
    }

    #[inline]
    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    #[inline]
    pub fn placeables(&self) -> &PlaceableStore {
        &self.placeables
    }

    #[inline]
    pub fn effects(&self) -> &EffectScheduler {
        &self.effects
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Where agent `id` goes at night, if it has a home.
    pub fn home_anchor(&self, id: AgentId) -> Option<HomeAnchor> {
        let hut = self.agents.get(id)?.home()?;
        home_anchor_of(&self.placeables, hut)
    }

    // ── Membership ────────────────────────────────────────────────────────

    /// Remove consumed agents and excise them from their huts.  Returns the
    /// ids actually removed.
    pub(crate) fn remove_consumed(&mut self, ids: &[AgentId]) -> Vec<AgentId> {
        let removed = self.agents.remove_batch(ids);
        for agent in &removed {
            if let Some(hut) = agent.home() {
                if let Err(e) = self.placeables.evict_resident(hut, agent.id) {
                    debug!(agent = %agent.id, error = %e, "consumed agent had a dangling home");
                }
            }
        }
        removed.into_iter().map(|a| a.id).collect()
    }

    /// Check capacity and two-way membership between agents and huts.
    ///
    /// Holds when every hut is within capacity, every listed resident is a
    /// live agent pointing back at that hut, listed once, and every housed
    /// agent appears in its hut's list.
    pub fn membership_consistent(&self) -> bool {
        let mut listed = 0usize;
        for (hut_id, hut) in self.placeables.huts() {
            if hut.residents().len() > hut.capacity() as usize {
                return false;
            }
            for (i, &agent) in hut.residents().iter().enumerate() {
                if hut.residents()[..i].contains(&agent) {
                    return false;
                }
                match self.agents.get(agent) {
                    Some(a) if a.home() == Some(hut_id) => listed += 1,
                    _ => return false,
                }
            }
        }
        let housed = self.agents.iter().filter(|a| !a.is_homeless()).count();
        housed == listed
    }
}

pub(crate) fn home_anchor_of(placeables: &PlaceableStore, hut: PlaceableId) -> Option<HomeAnchor> {
    placeables
        .hut(hut)
        .ok()
        .map(|h| HomeAnchor { anchor: h.anchor, jitter_radius: h.jitter_radius })
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("frame", &self.frame)
            .field("clock", &self.clock)
            .field("agents", &self.agents.len())
            .field("placeables", &self.placeables.len())
            .field("effects", &self.effects.len())
            .finish()
    }
}
