//! Arena storage for agents.
//!
//! # Layout
//!
//! Agents live in a `Vec<Option<Agent>>` indexed by `AgentId`.  Removal
//! empties the slot; ids are never reused, so a stale `AgentId` held by a hut
//! or a pending batch can only ever miss, never alias a newer agent.
//!
//! Removal is batched: collision passes collect the ids to delete and the
//! world drains them in one call to [`AgentStore::remove_batch`] after the
//! pass, so no agent is removed while the collection is being iterated.

use hm_core::{AgentId, AgentRng, Vec2};

use crate::agent::Agent;

pub struct AgentStore {
    slots: Vec<Option<Agent>>,
    live: usize,
    /// Global seed for per-agent RNGs.
    seed: u64,
}

impl AgentStore {
    pub fn new(seed: u64) -> Self {
        Self { slots: Vec::new(), live: 0, seed }
    }

    /// Insert a new wandering agent and return its id.
    pub fn spawn(&mut self, position: Vec2, collision_radius: f64) -> AgentId {
        let id = AgentId(self.slots.len() as u32);
        let rng = AgentRng::new(self.seed, id);
        self.slots.push(Some(Agent::new(id, position, collision_radius, rng)));
        self.live += 1;
        id
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    #[inline]
    pub fn contains(&self, id: AgentId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live agents.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of ids ever handed out (live or removed).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Live agents in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }

    /// Ids of live agents in ascending order.
    pub fn ids(&self) -> Vec<AgentId> {
        self.iter().map(|a| a.id).collect()
    }

    /// Ids of live agents without a home, in ascending order.
    pub fn homeless_ids(&self) -> Vec<AgentId> {
        self.iter().filter(|a| a.is_homeless()).map(|a| a.id).collect()
    }

    /// Mutable access to two distinct live agents at once.
    ///
    /// Returns `None` if `a == b` or either agent is gone.
    pub fn pair_mut(&mut self, a: AgentId, b: AgentId) -> Option<(&mut Agent, &mut Agent)> {
        let (ia, ib) = (a.index(), b.index());
        if ia == ib || ia >= self.slots.len() || ib >= self.slots.len() {
            return None;
        }
        let (lo, hi, swapped) = if ia < ib { (ia, ib, false) } else { (ib, ia, true) };
        let (head, tail) = self.slots.split_at_mut(hi);
        let first = head[lo].as_mut()?;
        let second = tail[0].as_mut()?;
        Some(if swapped { (second, first) } else { (first, second) })
    }

    /// Remove one agent, returning it if it was live.
    pub fn remove(&mut self, id: AgentId) -> Option<Agent> {
        let agent = self.slots.get_mut(id.index())?.take()?;
        self.live -= 1;
        Some(agent)
    }

    /// Remove every listed agent.  Duplicates and already-removed ids are
    /// skipped.  Returns the removed agents in the order given.
    pub fn remove_batch(&mut self, ids: &[AgentId]) -> Vec<Agent> {
        ids.iter().filter_map(|&id| self.remove(id)).collect()
    }
}

impl std::fmt::Debug for AgentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentStore")
            .field("live", &self.live)
            .field("capacity", &self.slots.len())
            .finish()
    }
}
