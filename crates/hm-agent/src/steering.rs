//! Per-frame agent update: state transitions, steering, force integration,
//! and world-boundary bounce.
//!
//! The update order within one agent is fixed:
//!
//! 1. state transitions (phase flip, arrival),
//! 2. steering velocity from the current state,
//! 3. accumulated force folded into velocity, then cleared,
//! 4. position integration,
//! 5. boundary clamp with damped reflection.

use hm_core::{AgentParams, Phase, Vec2, WorldBounds};

use crate::agent::{Agent, AgentState};

/// Inputs shared by every agent on one frame.
#[derive(Copy, Clone, Debug)]
pub struct StepContext<'a> {
    /// Clamped wall-clock seconds for this frame.
    pub dt: f64,
    /// Global clock speed multiplier.
    pub speed_multiplier: f64,
    /// The phase entered this frame, if the clock flipped.
    pub phase_flip: Option<Phase>,
    pub world: WorldBounds,
    pub params: &'a AgentParams,
}

impl StepContext<'_> {
    /// Scaled simulation seconds for this frame.
    #[inline]
    pub fn scaled_dt(&self) -> f64 {
        self.dt * self.speed_multiplier
    }
}

/// Where an agent's home wants it to be.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HomeAnchor {
    /// Steering target while going home.
    pub anchor: Vec2,
    /// Arrival snaps the agent to a random point within this radius of
    /// `anchor`.
    pub jitter_radius: f64,
}

/// What happened to an agent's state during one update.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    LeftForHome,
    ArrivedHome,
    WentOut,
}

impl Agent {
    /// Advance this agent by one frame.
    ///
    /// `home` must be the anchor of the hut referenced by [`Agent::home`]
    /// (or `None` for homeless agents).
    pub fn update(&mut self, ctx: &StepContext<'_>, home: Option<HomeAnchor>) -> Option<Transition> {
        let transition = self.transition(ctx, home);
        self.steer(ctx);
        self.integrate(ctx);
        self.confine(ctx);
        transition
    }

    /// Apply phase-flip and arrival transitions.
    pub fn transition(&mut self, ctx: &StepContext<'_>, home: Option<HomeAnchor>) -> Option<Transition> {
        let Some(home) = home else {
            // Without a home there is nowhere to go.
            if self.state != AgentState::Wandering {
                self.state = AgentState::Wandering;
                return Some(Transition::WentOut);
            }
            return None;
        };

        let mut transition = None;
        match (ctx.phase_flip, self.state) {
            (Some(Phase::Night), AgentState::Wandering) => {
                self.state = AgentState::GoingHome { target: home.anchor };
                transition = Some(Transition::LeftForHome);
            }
            (Some(Phase::Day), AgentState::AtHome | AgentState::GoingHome { .. }) => {
                self.state = AgentState::Wandering;
                transition = Some(Transition::WentOut);
            }
            _ => {}
        }

        if let AgentState::GoingHome { target } = self.state {
            let near = ctx.params.home_proximity;
            if self.position.distance_sq(target) < near * near {
                self.state = AgentState::AtHome;
                self.position = self.rng.point_near(home.anchor, home.jitter_radius);
                self.velocity = Vec2::ZERO;
                transition = Some(Transition::ArrivedHome);
            }
        }
        transition
    }

    /// Set the steering velocity for the current state.
    fn steer(&mut self, ctx: &StepContext<'_>) {
        let speed = ctx.params.base_speed * self.speed_effect_multiplier * ctx.speed_multiplier;
        match self.state {
            AgentState::AtHome => {
                self.velocity = Vec2::ZERO;
            }
            AgentState::GoingHome { target } => {
                let to_target = target - self.position;
                if to_target.length() > ctx.params.arrival_epsilon {
                    self.heading = to_target.angle();
                    self.velocity = Vec2::from_angle(self.heading) * speed;
                } else {
                    self.velocity = Vec2::ZERO;
                }
            }
            AgentState::Wandering => {
                self.heading += self.rng.symmetric(ctx.params.wander_strength) * ctx.scaled_dt();
                self.velocity = Vec2::from_angle(self.heading) * speed;
            }
        }
    }

    /// Fold the frame's force into velocity and move.
    fn integrate(&mut self, ctx: &StepContext<'_>) {
        self.velocity += self.accumulated_force * ctx.scaled_dt();
        self.accumulated_force = Vec2::ZERO;
        self.position += self.velocity * ctx.dt;
    }

    /// Keep the drawn figure (head above, shadow below) inside the world.
    fn confine(&mut self, ctx: &StepContext<'_>) {
        let p = ctx.params;
        let buffer = self.collision_radius + p.outline_width;
        let damping = p.bounce_damping;
        let mut bounced = false;

        let left = buffer;
        let right = ctx.world.width - buffer;
        if self.position.x < left {
            self.position.x = left;
            self.velocity.x = (self.velocity.x * damping).abs();
            bounced = true;
        } else if self.position.x > right {
            self.position.x = right;
            self.velocity.x = -(self.velocity.x * damping).abs();
            bounced = true;
        }

        let top = p.head_extent() + buffer;
        let bottom = ctx.world.height - (p.shadow_offset + self.collision_radius + buffer);
        if self.position.y < top {
            self.position.y = top;
            self.velocity.y = (self.velocity.y * damping).abs();
            bounced = true;
        } else if self.position.y > bottom {
            self.position.y = bottom;
            self.velocity.y = -(self.velocity.y * damping).abs();
            bounced = true;
        }

        if bounced && self.velocity != Vec2::ZERO {
            self.heading = self.velocity.angle();
        }
    }
}
