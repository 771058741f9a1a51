//! The agent entity and its behavioral state.

use hm_core::{AgentId, AgentRng, PlaceableId, Vec2};

// ── AgentState ────────────────────────────────────────────────────────────────

/// Motion policy of an agent.
///
/// The homing target lives inside `GoingHome`, so an agent has a target
/// exactly when it is on its way home.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AgentState {
    /// Random-walk steering.  Homeless agents never leave this state.
    Wandering,
    /// Steering straight at `target`, the home's anchor point.
    GoingHome { target: Vec2 },
    /// Parked near home with zero steering velocity.
    AtHome,
}

impl AgentState {
    #[inline]
    pub fn target(&self) -> Option<Vec2> {
        match self {
            AgentState::GoingHome { target } => Some(*target),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentState::Wandering        => "wandering",
            AgentState::GoingHome { .. } => "going_home",
            AgentState::AtHome           => "at_home",
        }
    }
}

impl std::fmt::Display for AgentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// A mobile simulated entity.
///
/// `home` is a lookup-only back-reference: the hut owns the membership list
/// and the world keeps the two sides in step.  The accumulated force is an
/// acceleration that is folded into velocity and cleared once per frame.
#[derive(Clone, Debug)]
pub struct Agent {
    pub id: AgentId,

    pub position: Vec2,
    /// Pixels per second.
    pub velocity: Vec2,
    /// Radians.
    pub heading:  f64,

    /// Always positive; fixed at creation.
    pub(crate) collision_radius: f64,

    /// External forces for the current frame (from effects).
    pub accumulated_force: Vec2,

    /// Set every frame by the active global effects; 1.0 when none apply.
    pub speed_effect_multiplier: f64,

    pub(crate) state: AgentState,
    pub(crate) home:  Option<PlaceableId>,
    pub(crate) rng:   AgentRng,
}

impl Agent {
    /// A wandering, homeless agent at `position` with a random heading.
    ///
    /// A non-positive `collision_radius` is replaced by `f64::EPSILON` so the
    /// radius stays strictly positive.
    pub fn new(id: AgentId, position: Vec2, collision_radius: f64, mut rng: AgentRng) -> Self {
        let heading = rng.angle();
        Self {
            id,
            position,
            velocity: Vec2::ZERO,
            heading,
            collision_radius: if collision_radius > 0.0 { collision_radius } else { f64::EPSILON },
            accumulated_force: Vec2::ZERO,
            speed_effect_multiplier: 1.0,
            state: AgentState::Wandering,
            home: None,
            rng,
        }
    }

    #[inline]
    pub fn state(&self) -> AgentState {
        self.state
    }

    /// Homing target; `Some` only while going home.
    #[inline]
    pub fn target_position(&self) -> Option<Vec2> {
        self.state.target()
    }

    #[inline]
    pub fn collision_radius(&self) -> f64 {
        self.collision_radius
    }

    #[inline]
    pub fn home(&self) -> Option<PlaceableId> {
        self.home
    }

    #[inline]
    pub fn is_homeless(&self) -> bool {
        self.home.is_none()
    }

    /// Record `hut` as this agent's home.
    ///
    /// This only sets the back-reference; the caller must append the agent
    /// to the hut's resident list in the same step.
    pub fn assign_home(&mut self, hut: PlaceableId) {
        self.home = Some(hut);
    }

    /// Drop the home back-reference and fall back to wandering.
    pub fn clear_home(&mut self) {
        self.home = None;
        self.state = AgentState::Wandering;
    }

    /// Accumulate an external force (acceleration) for this frame.
    #[inline]
    pub fn apply_force(&mut self, force: Vec2) {
        self.accumulated_force += force;
    }

    /// Force the state machine into `state`.  Used by hosts restoring a
    /// scripted scene; normal transitions happen in [`Agent::update`].
    pub fn set_state(&mut self, state: AgentState) {
        self.state = state;
    }
}
