//! The `Sim` struct and its frame loop.

use tracing::{debug, info};

use hm_agent::StepContext;
use hm_core::clamp_frame_dt;

use crate::collision::CollisionResolver;
use crate::command::{Command, CommandOutcome};
use crate::error::Rejected;
use crate::observer::{FrameStats, SimObserver};
use crate::world::{World, home_anchor_of};

/// The main simulation runner.
///
/// `Sim` owns the [`World`] and drives the five-phase frame:
///
/// 1. **Clock**: clamp `dt`, advance the world clock, detect a phase flip.
/// 2. **Effects**: purge expired effects.
/// 3. **Agents** (ascending `AgentId`): reset and apply effects, then run
///    transitions, steering, force integration and boundary bounce.
/// 4. **Collisions**: `collision_passes` resolution passes, then one batch
///    removal of consumed agents (and their hut memberships).
/// 5. **Report**: frame stats and, at the configured interval, a render
///    snapshot to the observer.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub world: World,
    resolver:  CollisionResolver,
}

impl Sim {
    pub(crate) fn new(world: World) -> Self {
        Self { world, resolver: CollisionResolver::new() }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Apply a user command before the next frame.
    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome, Rejected> {
        self.world.apply(command)
    }

    /// Run exactly `n` frames of `dt` wall seconds each.
    pub fn run_frames<O: SimObserver>(&mut self, n: u64, dt: f64, observer: &mut O) {
        for _ in 0..n {
            self.step(dt, observer);
        }
    }

    /// Advance the simulation by one frame of `dt` wall seconds.
    ///
    /// `dt` is clamped to `[0, config.max_dt]`; the step never fails.
    pub fn step<O: SimObserver>(&mut self, dt: f64, observer: &mut O) -> FrameStats {
        let world = &mut self.world;
        let frame = world.frame;
        observer.on_frame_start(frame);

        // ── Phase 1: clock ────────────────────────────────────────────────
        let dt = clamp_frame_dt(dt, world.config.max_dt);
        let flip = world.clock.advance(dt);
        if let Some(phase) = flip {
            info!(%phase, frame, "phase changed");
            observer.on_phase_change(frame, phase);
        }
        let now = world.clock.now();

        // ── Phase 2: effect expiry ────────────────────────────────────────
        world.effects.tick(now);

        // ── Phase 3: agents ───────────────────────────────────────────────
        let ctx = StepContext {
            dt,
            speed_multiplier: world.clock.speed_multiplier(),
            phase_flip:       flip,
            world:            world.config.world,
            params:           &world.config.agent,
        };
        let mut transitions = 0;
        for agent in world.agents.iter_mut() {
            world.effects.apply_all(agent);
            let home = agent.home().and_then(|h| home_anchor_of(&world.placeables, h));
            if agent.update(&ctx, home).is_some() {
                transitions += 1;
            }
        }

        // ── Phase 4: collisions and deferred removal ──────────────────────
        let report = self.resolver.resolve(
            &mut world.agents,
            &world.placeables,
            &world.config.collision,
            world.config.collision_passes,
        );
        let consumed = world.remove_consumed(&report.consumed);
        if !consumed.is_empty() {
            debug!(consumed = consumed.len(), frame, "agents consumed");
            observer.on_agents_consumed(frame, &consumed);
        }

        // ── Phase 5: report ───────────────────────────────────────────────
        world.frame += 1;
        let stats = FrameStats {
            frame,
            dt,
            sim_time:          now,
            agents:            world.agents.len(),
            consumed:          consumed.len(),
            agent_contacts:    report.agent_contacts,
            obstacle_contacts: report.obstacle_contacts,
            transitions,
        };
        observer.on_frame_end(&stats);

        let interval = world.config.snapshot_interval_frames;
        if interval > 0 && world.frame % interval == 0 {
            observer.on_snapshot(&world.snapshot());
        }
        stats
    }
}

impl std::fmt::Debug for Sim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sim").field("world", &self.world).finish()
    }
}
