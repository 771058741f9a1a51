//! Fluent builder for constructing a [`Sim`].

use hm_agent::{AgentStore, AgentStoreBuilder};
use hm_core::{PlaceableKind, SimConfig, SimRng, Vec2};

use crate::world::World;
use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: world size, seed, frame clamp, parameter groups, …
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                                          |
/// |---------------------|--------------------------------------------------|
/// | `.agents(store)`    | `config.seeding.initial_agents` scattered around |
/// |                     | the world centre                                 |
/// | `.place(kind, pos)` | no placeables                                    |
/// | `.cycle_timer(t)`   | `0.0` (dawn of day one)                          |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig::default())
///     .place(PlaceableKind::Hut, Vec2::new(200.0, 150.0))
///     .build()?;
/// sim.run_frames(600, 1.0 / 60.0, &mut NoopObserver);
/// ```
pub struct SimBuilder {
    config:      SimConfig,
    agents:      Option<AgentStore>,
    placements:  Vec<(PlaceableKind, Vec2)>,
    cycle_timer: Option<f64>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, agents: None, placements: Vec::new(), cycle_timer: None }
    }

    /// Supply a pre-built agent store instead of the seeded scatter.
    pub fn agents(mut self, agents: AgentStore) -> Self {
        self.agents = Some(agents);
        self
    }

    /// Place an object before the first frame.  Placements run in call
    /// order after agents exist, so an initial hut adopts residents.
    pub fn place(mut self, kind: PlaceableKind, position: Vec2) -> Self {
        self.placements.push((kind, position));
        self
    }

    /// Start at `t` seconds into the day/night cycle.
    pub fn cycle_timer(mut self, t: f64) -> Self {
        self.cycle_timer = Some(t);
        self
    }

    /// Validate the configuration, seed agents, apply initial placements, and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate().map_err(|e| SimError::Config(e.to_string()))?;

        let mut rng = SimRng::new(self.config.seed);
        let agents = match self.agents {
            Some(store) => store,
            None => AgentStoreBuilder::new(self.config.seed, self.config.agent.body_radius)
                .scatter(
                    self.config.seeding.initial_agents,
                    self.config.world.center(),
                    self.config.seeding.spawn_radius,
                )
                .build(&mut rng),
        };

        let mut world = World::new(self.config, agents, rng.child(1));
        if let Some(t) = self.cycle_timer {
            world.clock.set_cycle_timer(t);
        }
        for (kind, position) in self.placements {
            world
                .try_place(kind, position)
                .map_err(|reason| SimError::InitialPlacement { kind, position, reason })?;
        }
        Ok(Sim::new(world))
    }
}
