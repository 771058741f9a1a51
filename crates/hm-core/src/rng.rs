//! Deterministic per-agent and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each agent gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent IDs uniformly across the seed space.
//! Wander noise and arrival jitter therefore depend only on the seed and the
//! agent's own history, not on how many other agents exist or in which order
//! they are updated.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{AgentId, Vec2};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG, owned by the agent it drives.
#[derive(Clone, Debug)]
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and an agent ID.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Symmetric sample in `[-magnitude, magnitude]`; zero when the
    /// magnitude is not positive.
    #[inline]
    pub fn symmetric(&mut self, magnitude: f64) -> f64 {
        if magnitude > 0.0 {
            self.0.gen_range(-magnitude..=magnitude)
        } else {
            0.0
        }
    }

    /// Uniform angle in `[0, 2π)`.
    #[inline]
    pub fn angle(&mut self) -> f64 {
        self.0.gen_range(0.0..std::f64::consts::TAU)
    }

    /// Point at a uniform angle and uniform radius in `[0, max_radius]`
    /// around `center`.  Radius sampling is uniform (not area-uniform), so
    /// points cluster slightly towards the centre.
    pub fn point_near(&mut self, center: Vec2, max_radius: f64) -> Vec2 {
        let angle = self.angle();
        let r = if max_radius > 0.0 { self.0.gen_range(0.0..=max_radius) } else { 0.0 };
        center + Vec2::from_angle(angle) * r
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for world operations: initial seeding and the
/// randomized resident-assignment order.
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }

    /// Point at a uniform angle and uniform radius in `[0, max_radius]`
    /// around `center`.
    pub fn point_near(&mut self, center: Vec2, max_radius: f64) -> Vec2 {
        let angle = self.0.gen_range(0.0..std::f64::consts::TAU);
        let r = if max_radius > 0.0 { self.0.gen_range(0.0..=max_radius) } else { 0.0 };
        center + Vec2::from_angle(angle) * r
    }
}
