//! Effect variants and the per-agent contribution each one makes.
//!
//! Every effect implements [`AgentEffect`].  The scheduler stores them as the
//! closed [`Effect`] enum and dispatches by match.

use hm_agent::Agent;
use hm_core::{Circle, EffectKind, EffectParams, Vec2};

// ── Trait ─────────────────────────────────────────────────────────────────────

/// Contribution of one live effect to one agent for the current frame.
///
/// # Contract
///
/// - Called once per live effect per agent per frame, after the agent's
///   `speed_effect_multiplier` has been reset to 1.0.
/// - Forces go through [`Agent::apply_force`]; they are accelerations the
///   agent folds into its velocity during integration.
/// - Must not block or perform I/O.
pub trait AgentEffect {
    fn apply(&self, agent: &mut Agent);
}

// ── Force field ───────────────────────────────────────────────────────────────

/// Localized swirl: a tangential force plus a small outward component.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForceField {
    pub center:   Vec2,
    pub radius:   f64,
    /// Magnitude of the tangential component.
    pub strength: f64,
    /// Outward component as a fraction of `strength`.
    pub outward_ratio: f64,
    /// Agents this close (squared) to the centre receive no force.
    pub center_epsilon_sq: f64,
}

impl ForceField {
    pub fn from_params(center: Vec2, params: &EffectParams) -> Self {
        Self {
            center,
            radius:            params.force_field_radius,
            strength:          params.force_field_strength,
            outward_ratio:     params.force_field_outward,
            center_epsilon_sq: params.center_epsilon_sq,
        }
    }

    /// Force on a body at `p`, or `None` outside the disc or at the centre.
    pub fn force_at(&self, p: Vec2) -> Option<Vec2> {
        let d = p - self.center;
        let dist_sq = d.length_sq();
        if dist_sq >= self.radius * self.radius || dist_sq <= self.center_epsilon_sq {
            return None;
        }
        let n = d * (1.0 / dist_sq.sqrt());
        Some(n.perp() * self.strength + n * (self.strength * self.outward_ratio))
    }

    #[inline]
    pub fn disc(&self) -> Circle {
        Circle::new(self.center, self.radius)
    }
}

impl AgentEffect for ForceField {
    fn apply(&self, agent: &mut Agent) {
        if let Some(f) = self.force_at(agent.position) {
            agent.apply_force(f);
        }
    }
}

// ── Slowdown ──────────────────────────────────────────────────────────────────

/// Global precipitation-style slowdown.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slowdown {
    /// Speed fraction imposed on every agent, in `(0, 1)`.
    pub factor: f64,
}

impl Slowdown {
    pub fn from_params(params: &EffectParams) -> Self {
        Self { factor: params.slowdown_factor }
    }
}

impl AgentEffect for Slowdown {
    fn apply(&self, agent: &mut Agent) {
        agent.speed_effect_multiplier = self.factor;
    }
}

// ── Effect ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    ForceField(ForceField),
    Slowdown(Slowdown),
}

impl Effect {
    pub fn kind(&self) -> EffectKind {
        match self {
            Effect::ForceField(_) => EffectKind::ForceField,
            Effect::Slowdown(_)   => EffectKind::Slowdown,
        }
    }
}

impl AgentEffect for Effect {
    #[inline]
    fn apply(&self, agent: &mut Agent) {
        match self {
            Effect::ForceField(f) => f.apply(agent),
            Effect::Slowdown(s)   => s.apply(agent),
        }
    }
}

impl From<ForceField> for Effect {
    fn from(f: ForceField) -> Self {
        Effect::ForceField(f)
    }
}

impl From<Slowdown> for Effect {
    fn from(s: Slowdown) -> Self {
        Effect::Slowdown(s)
    }
}

/// A scheduled effect with its expiry in simulation seconds.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect {
    pub effect:     Effect,
    pub expires_at: f64,
}

impl ActiveEffect {
    /// Live strictly before `expires_at`.
    #[inline]
    pub fn is_live(&self, now: f64) -> bool {
        now < self.expires_at
    }
}
