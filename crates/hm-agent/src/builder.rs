//! Fluent builder for a seeded [`AgentStore`].
//!
//! # Usage
//!
//! ```rust
//! use hm_agent::AgentStoreBuilder;
//! use hm_core::{SimRng, Vec2};
//!
//! let mut rng = SimRng::new(42);
//! let store = AgentStoreBuilder::new(42, 8.0)
//!     .scatter(20, Vec2::new(400.0, 300.0), 70.0)
//!     .agent_at(Vec2::new(10.0, 10.0))
//!     .build(&mut rng);
//!
//! assert_eq!(store.len(), 21);
//! ```

use hm_core::{SimRng, Vec2};

use crate::AgentStore;

enum Placement {
    Scatter { count: usize, center: Vec2, radius: f64 },
    At(Vec2),
}

/// Fluent builder for [`AgentStore`].
///
/// Placements are applied in the order they were added, so agent ids follow
/// call order.
pub struct AgentStoreBuilder {
    seed: u64,
    collision_radius: f64,
    placements: Vec<Placement>,
}

impl AgentStoreBuilder {
    /// `seed` seeds the per-agent RNGs; `collision_radius` applies to every
    /// agent built here.
    pub fn new(seed: u64, collision_radius: f64) -> Self {
        Self { seed, collision_radius, placements: Vec::new() }
    }

    /// Add `count` agents at uniform angles and uniform radii within
    /// `radius` of `center`.
    pub fn scatter(mut self, count: usize, center: Vec2, radius: f64) -> Self {
        self.placements.push(Placement::Scatter { count, center, radius });
        self
    }

    /// Add one agent at an exact position.
    pub fn agent_at(mut self, position: Vec2) -> Self {
        self.placements.push(Placement::At(position));
        self
    }

    /// Construct the store.  `rng` draws scatter positions only.
    pub fn build(self, rng: &mut SimRng) -> AgentStore {
        let mut store = AgentStore::new(self.seed);
        for placement in self.placements {
            match placement {
                Placement::Scatter { count, center, radius } => {
                    for _ in 0..count {
                        store.spawn(rng.point_near(center, radius), self.collision_radius);
                    }
                }
                Placement::At(position) => {
                    store.spawn(position, self.collision_radius);
                }
            }
        }
        store
    }
}
