//! `EffectScheduler`: the set of live effects and their lifetimes.
//!
//! # Timebase
//!
//! `now` is simulation seconds (`WorldClock::now`), so effect lifetimes
//! stretch and shrink with the speed multiplier exactly like the day/night
//! cycle does.
//!
//! # Per-frame protocol
//!
//! ```text
//! scheduler.tick(now);            // purge everything with expires_at <= now
//! for agent in agents {
//!     scheduler.apply_all(agent); // reset multiplier, then each live effect
//! }
//! ```
//!
//! At most one effect of each kind is live: [`EffectScheduler::add`] retires
//! any existing effect of the same kind before inserting.

use tracing::debug;

use hm_agent::Agent;
use hm_core::{EffectKind, EffectParams, Vec2};

use crate::effect::{ActiveEffect, AgentEffect, Effect, ForceField, Slowdown};

#[derive(Clone, Debug, Default)]
pub struct EffectScheduler {
    active: Vec<ActiveEffect>,
    /// Incremented on every slowdown activation; the renderer compares it
    /// against its own copy to know when to reset particle state.
    slowdown_generation: u64,
}

impl EffectScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `effect`, live for `duration` simulation seconds from `now`.
    ///
    /// Any live effect of the same kind is retired first.  Returns the
    /// expiry time.
    pub fn add(&mut self, effect: Effect, now: f64, duration: f64) -> f64 {
        let kind = effect.kind();
        self.retire(kind);
        if kind == EffectKind::Slowdown {
            self.slowdown_generation += 1;
        }
        let expires_at = now + duration.max(0.0);
        self.active.push(ActiveEffect { effect, expires_at });
        expires_at
    }

    /// Remove every effect with `expires_at <= now`.  Returns the kinds that
    /// expired.
    pub fn tick(&mut self, now: f64) -> Vec<EffectKind> {
        let mut expired = Vec::new();
        self.active.retain(|e| {
            let live = e.is_live(now);
            if !live {
                expired.push(e.effect.kind());
            }
            live
        });
        for kind in &expired {
            debug!(effect = %kind, now, "effect expired");
        }
        expired
    }

    /// Reset the agent's per-frame effect state, then apply every live
    /// effect in insertion order.
    pub fn apply_all(&self, agent: &mut Agent) {
        agent.speed_effect_multiplier = 1.0;
        for e in &self.active {
            e.effect.apply(agent);
        }
    }

    /// Drop the live effect of `kind`, if any.  Returns whether one was live.
    pub fn retire(&mut self, kind: EffectKind) -> bool {
        let before = self.active.len();
        self.active.retain(|e| e.effect.kind() != kind);
        self.active.len() != before
    }

    /// Start a force field centred on `center`, replacing any active one.
    pub fn spawn_force_field(&mut self, center: Vec2, now: f64, params: &EffectParams) -> f64 {
        self.add(ForceField::from_params(center, params).into(), now, params.force_field_duration)
    }

    /// Turn the slowdown on if it is off, off if it is on.  Returns whether
    /// it is active afterwards.
    pub fn toggle_slowdown(&mut self, now: f64, params: &EffectParams) -> bool {
        if self.retire(EffectKind::Slowdown) {
            false
        } else {
            self.add(Slowdown::from_params(params).into(), now, params.slowdown_duration);
            true
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.active.iter().any(|e| e.effect.kind() == kind)
    }

    #[inline]
    pub fn slowdown_active(&self) -> bool {
        self.is_active(EffectKind::Slowdown)
    }

    #[inline]
    pub fn slowdown_generation(&self) -> u64 {
        self.slowdown_generation
    }

    /// The live force field, if any.
    pub fn force_field(&self) -> Option<&ForceField> {
        self.active.iter().find_map(|e| match &e.effect {
            Effect::ForceField(f) => Some(f),
            _ => None,
        })
    }

    /// Simulation seconds until the live effect of `kind` expires.
    pub fn remaining(&self, kind: EffectKind, now: f64) -> Option<f64> {
        self.active
            .iter()
            .find(|e| e.effect.kind() == kind)
            .map(|e| (e.expires_at - now).max(0.0))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.active.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
