//! Simulation configuration.
//!
//! Typically loaded from a TOML file by the application crate (with the
//! `serde` feature enabled) and passed to the simulation builder.  Every
//! group has a `Default`, and with serde every field falls back to it, so a
//! config file only needs to name what it overrides.

use crate::{HmError, HmResult, Vec2};

// ── World bounds ──────────────────────────────────────────────────────────────

/// Size of the simulated area.  Fixed at startup; the origin is the
/// top-left corner.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldBounds {
    pub width:  f64,
    pub height: f64,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self { width: 800.0, height: 600.0 }
    }
}

impl WorldBounds {
    /// `true` if `p` lies inside the world (edges inclusive).
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

// ── Agent parameters ──────────────────────────────────────────────────────────

/// Agent body, silhouette and steering constants.
///
/// The silhouette extends above the logical position by a head
/// (`head_offset + head_radius`) and below it by a shadow
/// (`shadow_offset`), so the vertical boundary envelope is taller than the
/// horizontal one.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentParams {
    /// Body radius; also the collision radius of newly created agents.
    pub body_radius:      f64,
    /// Head centre distance above the body centre.
    pub head_offset:      f64,
    pub head_radius:      f64,
    /// Shadow centre distance below the body centre.
    pub shadow_offset:    f64,
    pub outline_width:    f64,
    /// Pixels per simulated second at multiplier 1.0.
    pub base_speed:       f64,
    /// Maximum heading change in radians per simulated second.
    pub wander_strength:  f64,
    /// Distance to the home anchor that counts as "arrived".
    pub home_proximity:   f64,
    /// Below this distance to the target a homing agent stops steering.
    pub arrival_epsilon:  f64,
    /// Fraction of the reflected velocity kept after hitting a world edge.
    pub bounce_damping:   f64,
}

impl Default for AgentParams {
    fn default() -> Self {
        Self {
            body_radius:     8.0,
            head_offset:     6.0,
            head_radius:     4.0,
            shadow_offset:   2.0,
            outline_width:   1.0,
            base_speed:      50.0,
            wander_strength: 1.5,
            home_proximity:  15.0,
            arrival_epsilon: 1.0,
            bounce_damping:  0.5,
        }
    }
}

impl AgentParams {
    /// How far the head reaches above the logical position.
    #[inline]
    pub fn head_extent(&self) -> f64 {
        self.head_offset + self.head_radius
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClockConfig {
    /// Simulated seconds of daylight per cycle.
    pub day_length:    f64,
    /// Simulated seconds of night per cycle.
    pub night_length:  f64,
    pub initial_speed: f64,
    pub min_speed:     f64,
    pub max_speed:     f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            day_length:    30.0,
            night_length:  20.0,
            initial_speed: 1.0,
            min_speed:     0.2,
            max_speed:     5.0,
        }
    }
}

// ── Collision ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CollisionParams {
    /// Scale on the half-overlap correction applied to each agent of a pair.
    pub agent_push_factor:         f64,
    /// Constant displacement away from an obstacle's centre per contact.
    pub obstacle_push:             f64,
    /// Fraction of the into-obstacle velocity component removed per contact.
    pub obstacle_velocity_damping: f64,
    /// Squared distance under which a pair has no defined direction and is skipped.
    pub pair_epsilon_sq:           f64,
}

impl Default for CollisionParams {
    fn default() -> Self {
        Self {
            agent_push_factor:         1.0,
            obstacle_push:             1.5,
            obstacle_velocity_damping: 0.8,
            pair_epsilon_sq:           0.001,
        }
    }
}

// ── Placeables ────────────────────────────────────────────────────────────────

/// Per-kind dimensions of placeable objects.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlaceableParams {
    pub hole_radius:            f64,
    /// Consumption radius as a fraction of `hole_radius`, in `(0, 1]`.
    pub hole_consumption_ratio: f64,

    pub hut_base_width:   f64,
    pub hut_base_height:  f64,
    pub hut_roof_height:  f64,
    pub hut_capacity:     u32,
    /// Arrival jitter radius as a fraction of the hut base width.
    pub hut_jitter_ratio: f64,

    pub farm_width:  f64,
    pub farm_height: f64,

    pub factory_width:  f64,
    pub factory_height: f64,
    pub chimney_width:  f64,
    pub chimney_height: f64,
    /// Gap between the chimney and the factory's right wall.
    pub chimney_inset:  f64,

    pub tree_trunk_radius:  f64,
    /// Visual only; trees collide with their trunk.
    pub tree_canopy_radius: f64,
}

impl Default for PlaceableParams {
    fn default() -> Self {
        Self {
            hole_radius:            30.0,
            hole_consumption_ratio: 0.8,
            hut_base_width:         50.0,
            hut_base_height:        30.0,
            hut_roof_height:        30.0,
            hut_capacity:           4,
            hut_jitter_ratio:       0.3,
            farm_width:             100.0,
            farm_height:            70.0,
            factory_width:          70.0,
            factory_height:         50.0,
            chimney_width:          8.0,
            chimney_height:         30.0,
            chimney_inset:          5.0,
            tree_trunk_radius:      3.0,
            tree_canopy_radius:     15.0,
        }
    }
}

// ── Effects ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EffectParams {
    pub force_field_radius:   f64,
    /// Tangential force magnitude (acceleration, px/s²).
    pub force_field_strength: f64,
    /// Outward component as a fraction of `force_field_strength`.
    pub force_field_outward:  f64,
    /// Simulated seconds a force field lives.
    pub force_field_duration: f64,
    /// Speed multiplier applied to every agent while the slowdown is active.
    pub slowdown_factor:      f64,
    /// Simulated seconds a slowdown lives unless toggled off.
    pub slowdown_duration:    f64,
    /// Agents within this squared distance of a field centre feel no force.
    pub center_epsilon_sq:    f64,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            force_field_radius:   100.0,
            force_field_strength: 80.0,
            force_field_outward:  0.1,
            force_field_duration: 8.0,
            slowdown_factor:      0.6,
            slowdown_duration:    10.0,
            center_epsilon_sq:    0.01,
        }
    }
}

// ── Seeding ───────────────────────────────────────────────────────────────────

/// Initial population scattered around the world centre.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SeedingParams {
    pub initial_agents: usize,
    pub spawn_radius:   f64,
}

impl Default for SeedingParams {
    fn default() -> Self {
        Self { initial_agents: 20, spawn_radius: 70.0 }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    pub world: WorldBounds,

    /// Master RNG seed.  The same seed and command script always produce
    /// identical runs.
    pub seed: u64,

    /// Upper bound on a single frame's `dt`, in seconds.
    pub max_dt: f64,

    /// Collision resolution passes per frame (at least 1).
    pub collision_passes: u32,

    /// Call `SimObserver::on_snapshot` every N frames.  0 disables snapshots.
    pub snapshot_interval_frames: u64,

    pub seeding:    SeedingParams,
    pub agent:      AgentParams,
    pub clock:      ClockConfig,
    pub collision:  CollisionParams,
    pub placeables: PlaceableParams,
    pub effects:    EffectParams,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world:                    WorldBounds::default(),
            seed:                     42,
            max_dt:                   0.05,
            collision_passes:         1,
            snapshot_interval_frames: 1,
            seeding:                  SeedingParams::default(),
            agent:                    AgentParams::default(),
            clock:                    ClockConfig::default(),
            collision:                CollisionParams::default(),
            placeables:               PlaceableParams::default(),
            effects:                  EffectParams::default(),
        }
    }
}

fn positive(what: &str, v: f64) -> HmResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(HmError::Config(format!("{what} must be positive, got {v}")))
    }
}

fn non_negative(what: &str, v: f64) -> HmResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(HmError::Config(format!("{what} must be non-negative, got {v}")))
    }
}

impl SimConfig {
    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> HmResult<()> {
        positive("world.width", self.world.width)?;
        positive("world.height", self.world.height)?;
        positive("max_dt", self.max_dt)?;
        if self.collision_passes == 0 {
            return Err(HmError::Config("collision_passes must be at least 1".into()));
        }
        non_negative("seeding.spawn_radius", self.seeding.spawn_radius)?;

        let a = &self.agent;
        positive("agent.body_radius", a.body_radius)?;
        non_negative("agent.head_offset", a.head_offset)?;
        non_negative("agent.head_radius", a.head_radius)?;
        non_negative("agent.shadow_offset", a.shadow_offset)?;
        non_negative("agent.outline_width", a.outline_width)?;
        non_negative("agent.base_speed", a.base_speed)?;
        non_negative("agent.wander_strength", a.wander_strength)?;
        positive("agent.home_proximity", a.home_proximity)?;
        non_negative("agent.arrival_epsilon", a.arrival_epsilon)?;
        if !(0.0..=1.0).contains(&a.bounce_damping) {
            return Err(HmError::Config(format!(
                "agent.bounce_damping must be in [0, 1], got {}",
                a.bounce_damping
            )));
        }

        let c = &self.clock;
        non_negative("clock.day_length", c.day_length)?;
        non_negative("clock.night_length", c.night_length)?;
        positive("clock.day_length + clock.night_length", c.day_length + c.night_length)?;
        positive("clock.min_speed", c.min_speed)?;
        if !(c.min_speed <= c.initial_speed && c.initial_speed <= c.max_speed) {
            return Err(HmError::Config(format!(
                "clock speeds must satisfy min <= initial <= max, got {} <= {} <= {}",
                c.min_speed, c.initial_speed, c.max_speed
            )));
        }

        let col = &self.collision;
        non_negative("collision.agent_push_factor", col.agent_push_factor)?;
        non_negative("collision.obstacle_push", col.obstacle_push)?;
        non_negative("collision.obstacle_velocity_damping", col.obstacle_velocity_damping)?;
        non_negative("collision.pair_epsilon_sq", col.pair_epsilon_sq)?;

        let p = &self.placeables;
        positive("placeables.hole_radius", p.hole_radius)?;
        if !(p.hole_consumption_ratio > 0.0 && p.hole_consumption_ratio <= 1.0) {
            return Err(HmError::Config(format!(
                "placeables.hole_consumption_ratio must be in (0, 1], got {}",
                p.hole_consumption_ratio
            )));
        }
        positive("placeables.hut_base_width", p.hut_base_width)?;
        positive("placeables.hut_base_height", p.hut_base_height)?;
        non_negative("placeables.hut_roof_height", p.hut_roof_height)?;
        non_negative("placeables.hut_jitter_ratio", p.hut_jitter_ratio)?;
        positive("placeables.farm_width", p.farm_width)?;
        positive("placeables.farm_height", p.farm_height)?;
        positive("placeables.factory_width", p.factory_width)?;
        positive("placeables.factory_height", p.factory_height)?;
        non_negative("placeables.chimney_width", p.chimney_width)?;
        non_negative("placeables.chimney_height", p.chimney_height)?;
        positive("placeables.tree_trunk_radius", p.tree_trunk_radius)?;

        let e = &self.effects;
        positive("effects.force_field_radius", e.force_field_radius)?;
        non_negative("effects.force_field_strength", e.force_field_strength)?;
        non_negative("effects.force_field_outward", e.force_field_outward)?;
        positive("effects.force_field_duration", e.force_field_duration)?;
        if !(e.slowdown_factor > 0.0 && e.slowdown_factor <= 1.0) {
            return Err(HmError::Config(format!(
                "effects.slowdown_factor must be in (0, 1], got {}",
                e.slowdown_factor
            )));
        }
        positive("effects.slowdown_duration", e.slowdown_duration)?;
        Ok(())
    }
}
