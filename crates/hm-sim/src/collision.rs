//! Collision resolution: agent-agent separation, agent-obstacle push-out,
//! and hazard consumption.
//!
//! # Pass structure
//!
//! ```text
//! for pass in 0..passes:
//!   ① agent-agent : broadphase pairs (a < b, ascending), symmetric
//!                   overlap-proportional push
//!   ② obstacles   : per agent: hole consumption check, then constant push
//!                   away from each touching placeable's centre with
//!                   inward-velocity damping; a homing or housed agent
//!                   ignores its own hut
//! ```
//!
//! Consumed agents are only *marked*; they are skipped by later checks and
//! returned in [`CollisionReport::consumed`] for one batch removal after the
//! last pass.

use hm_agent::{AgentState, AgentStore};
use hm_core::geo::{push_direction, separation};
use hm_core::{AgentId, Circle, CollisionParams};
use hm_place::PlaceableStore;

use crate::grid::SpatialHash;

/// Outcome of one frame's collision resolution.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionReport {
    /// Agent pairs pushed apart, summed over passes.
    pub agent_contacts:    usize,
    /// Agent-placeable pushes, summed over passes.
    pub obstacle_contacts: usize,
    /// Agents inside a hole's consumption radius, in detection order.
    pub consumed:          Vec<AgentId>,
}

/// Reusable collision state (broadphase grid and scratch buffers).
#[derive(Debug, Default)]
pub struct CollisionResolver {
    grid:   SpatialHash,
    pairs:  Vec<(AgentId, AgentId)>,
    marked: Vec<bool>,
}

impl CollisionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `passes` resolution passes (at least one).  Agents are moved in
    /// place; consumed agents are reported, not removed.
    pub fn resolve(
        &mut self,
        agents:     &mut AgentStore,
        placeables: &PlaceableStore,
        params:     &CollisionParams,
        passes:     u32,
    ) -> CollisionReport {
        let mut report = CollisionReport::default();
        self.marked.clear();
        self.marked.resize(agents.capacity(), false);

        for _ in 0..passes.max(1) {
            report.agent_contacts += self.agent_pass(agents, params);
            report.obstacle_contacts += self.obstacle_pass(agents, placeables, params, &mut report.consumed);
        }
        report
    }

    fn agent_pass(&mut self, agents: &mut AgentStore, params: &CollisionParams) -> usize {
        let marked = &self.marked;
        let mut cell = 0.0_f64;
        let mut entries = Vec::with_capacity(agents.len());
        for a in agents.iter().filter(|a| !marked[a.id.index()]) {
            cell = cell.max(a.collision_radius() * 2.0);
            entries.push((a.id, a.position));
        }
        self.grid.rebuild(cell, entries);
        self.grid.candidate_pairs(&mut self.pairs);

        let mut contacts = 0;
        for &(a, b) in &self.pairs {
            let Some((x, y)) = agents.pair_mut(a, b) else { continue };
            if let Some(push) = separation(
                x.position,
                x.collision_radius(),
                y.position,
                y.collision_radius(),
                params.agent_push_factor,
                params.pair_epsilon_sq,
            ) {
                x.position += push;
                y.position -= push;
                contacts += 1;
            }
        }
        contacts
    }

    fn obstacle_pass(
        &mut self,
        agents:     &mut AgentStore,
        placeables: &PlaceableStore,
        params:     &CollisionParams,
        consumed:   &mut Vec<AgentId>,
    ) -> usize {
        let mut contacts = 0;
        for agent in agents.iter_mut() {
            let idx = agent.id.index();
            if self.marked[idx] {
                continue;
            }

            let in_hole = placeables
                .holes()
                .any(|(_, zone)| agent.position.distance_sq(zone.center) < zone.radius * zone.radius);
            if in_hole {
                self.marked[idx] = true;
                consumed.push(agent.id);
                continue;
            }

            let own_hut = match agent.state() {
                AgentState::GoingHome { .. } | AgentState::AtHome => agent.home(),
                AgentState::Wandering => None,
            };
            let body = Circle::new(agent.position, agent.collision_radius());
            for id in placeables.overlapping_circle(&body) {
                if Some(id) == own_hut {
                    continue;
                }
                let Some(obstacle) = placeables.get(id) else { continue };
                let n = push_direction(obstacle.bounds.center(), agent.position);
                agent.position += n * params.obstacle_push;
                let inward = agent.velocity.dot(n);
                if inward < 0.0 {
                    agent.velocity -= n * (inward * params.obstacle_velocity_damping);
                }
                contacts += 1;
            }
        }
        contacts
    }
}
