//! The command interface consumed from the UI layer.
//!
//! Commands are synchronous: [`World::apply`] mutates the world immediately,
//! so the effect is visible to the next frame's update phase.

use tracing::info;

use hm_core::{AgentId, EffectKind, PlaceableId, ToolKind, Vec2};

use crate::error::Rejected;
use crate::world::World;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    /// Use `tool` at `position` (a click in the world).
    Place { tool: ToolKind, position: Vec2 },
    /// Turn an effect kind off if it is live.  The slowdown is turned on
    /// when it is not; a force field needs a centre, so it can only be
    /// started through [`Command::Place`].
    ToggleEffect(EffectKind),
    /// Add `delta` to the clock speed multiplier (clamped).
    AdjustSpeed(f64),
    AddAgent(Vec2),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CommandOutcome {
    Placed(PlaceableId),
    AgentAdded(AgentId),
    EffectStarted(EffectKind),
    EffectStopped(EffectKind),
    /// New speed multiplier.
    SpeedChanged(f64),
    /// The command was valid but changed nothing.
    Unchanged,
}

impl World {
    /// Apply one command.  A rejection leaves the world untouched.
    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome, Rejected> {
        match command {
            Command::Place { tool, position } => self.use_tool(tool, position),
            Command::ToggleEffect(kind) => Ok(self.toggle_effect(kind)),
            Command::AdjustSpeed(delta) => Ok(CommandOutcome::SpeedChanged(self.adjust_speed(delta))),
            Command::AddAgent(position) => self.add_agent(position).map(CommandOutcome::AgentAdded),
        }
    }

    fn use_tool(&mut self, tool: ToolKind, position: Vec2) -> Result<CommandOutcome, Rejected> {
        match tool {
            ToolKind::Place(kind) => self.try_place(kind, position).map(CommandOutcome::Placed),
            ToolKind::AddAgent => self.add_agent(position).map(CommandOutcome::AgentAdded),
            ToolKind::Slowdown => Ok(self.toggle_effect(EffectKind::Slowdown)),
            ToolKind::ForceField => {
                if !self.config.world.contains(position) {
                    return Err(Rejected::OutOfBounds { position });
                }
                let now = self.clock.now();
                let expires_at = self.effects.spawn_force_field(position, now, &self.config.effects);
                info!(effect = %EffectKind::ForceField, %position, expires_at, "effect started");
                Ok(CommandOutcome::EffectStarted(EffectKind::ForceField))
            }
        }
    }

    /// Toggle an effect kind.  See [`Command::ToggleEffect`].
    pub fn toggle_effect(&mut self, kind: EffectKind) -> CommandOutcome {
        match kind {
            EffectKind::Slowdown => {
                let now = self.clock.now();
                if self.effects.toggle_slowdown(now, &self.config.effects) {
                    info!(
                        effect = %kind,
                        generation = self.effects.slowdown_generation(),
                        "effect started"
                    );
                    CommandOutcome::EffectStarted(kind)
                } else {
                    info!(effect = %kind, "effect stopped");
                    CommandOutcome::EffectStopped(kind)
                }
            }
            EffectKind::ForceField => {
                if self.effects.retire(kind) {
                    info!(effect = %kind, "effect stopped");
                    CommandOutcome::EffectStopped(kind)
                } else {
                    CommandOutcome::Unchanged
                }
            }
        }
    }

    /// Add `delta` to the speed multiplier; returns the clamped result.
    pub fn adjust_speed(&mut self, delta: f64) -> f64 {
        self.clock.adjust_speed(delta)
    }
}
