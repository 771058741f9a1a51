//! Static world objects and their per-kind geometry.
//!
//! All kinds share one struct with a mandatory collision `bounds`; anything
//! kind-specific lives in [`KindData`] and is reached by pattern matching.
//!
//! Geometry, for a placement at `(x, y)`:
//!
//! | Kind      | Collision bounds                                  | Extra                     |
//! |-----------|---------------------------------------------------|---------------------------|
//! | `Hole`    | circle, `hole_radius`                             | consumption radius        |
//! | `Hut`     | box: base centred on `(x, y)` plus roof above it  | anchor = base centre      |
//! | `Farm`    | box centred on `(x, y)`                           |                           |
//! | `Factory` | union of the base box and the chimney box         | chimney rect              |
//! | `Tree`    | circle, trunk radius                              | canopy radius (visual)    |

use hm_core::{AgentId, Bounds, Circle, PlaceableId, PlaceableKind, PlaceableParams, Rect, Vec2};

use crate::error::{PlaceError, PlaceResult};

// ── Hut ───────────────────────────────────────────────────────────────────────

/// Residence payload.  The hut owns the membership list; agents only hold
/// the hut's id.
///
/// `residents.len() <= capacity` is enforced by [`Hut::admit`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hut {
    /// Centre of the base; where residents head at night.
    pub anchor: Vec2,
    /// Arrival jitter radius around `anchor`.
    pub jitter_radius: f64,
    capacity:  u32,
    residents: Vec<AgentId>,
}

impl Hut {
    pub fn new(anchor: Vec2, jitter_radius: f64, capacity: u32) -> Self {
        Self { anchor, jitter_radius, capacity, residents: Vec::new() }
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    #[inline]
    pub fn residents(&self) -> &[AgentId] {
        &self.residents
    }

    #[inline]
    pub fn vacancies(&self) -> usize {
        (self.capacity as usize).saturating_sub(self.residents.len())
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.vacancies() == 0
    }

    pub fn has_resident(&self, agent: AgentId) -> bool {
        self.residents.contains(&agent)
    }

    /// Append `agent` to the resident list.  `id` is this hut's id, used
    /// only for error reporting.
    pub fn admit(&mut self, id: PlaceableId, agent: AgentId) -> PlaceResult<()> {
        if self.has_resident(agent) {
            return Err(PlaceError::AlreadyResident { hut: id, agent });
        }
        if self.is_full() {
            return Err(PlaceError::HutFull { hut: id, capacity: self.capacity });
        }
        self.residents.push(agent);
        Ok(())
    }

    /// Remove `agent` from the resident list.  Returns whether it was there.
    pub fn evict(&mut self, agent: AgentId) -> bool {
        let before = self.residents.len();
        self.residents.retain(|&a| a != agent);
        self.residents.len() != before
    }
}

// ── KindData ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KindData {
    /// Agents whose centre comes within `consumption_radius` are destroyed.
    Hole { consumption_radius: f64 },
    Hut(Hut),
    Farm,
    Factory { base: Rect, chimney: Rect },
    Tree { canopy_radius: f64 },
}

// ── Placeable ─────────────────────────────────────────────────────────────────

/// A static object placed by the user.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placeable {
    pub id:       PlaceableId,
    pub kind:     PlaceableKind,
    /// The point the user clicked.
    pub position: Vec2,
    pub bounds:   Bounds,
    pub data:     KindData,
}

impl Placeable {
    /// Build a placeable of `kind` at `position` using `params` for its
    /// dimensions.
    pub fn new(id: PlaceableId, kind: PlaceableKind, position: Vec2, params: &PlaceableParams) -> Self {
        let (bounds, data) = match kind {
            PlaceableKind::Hole => {
                let r = params.hole_radius;
                (
                    Bounds::Circle(Circle::new(position, r)),
                    KindData::Hole { consumption_radius: r * params.hole_consumption_ratio },
                )
            }
            PlaceableKind::Hut => {
                let base = Rect::centered(position, params.hut_base_width, params.hut_base_height);
                let full = Rect::from_min_max(
                    Vec2::new(base.min.x, base.min.y - params.hut_roof_height),
                    base.max,
                );
                let hut = Hut::new(
                    base.center(),
                    params.hut_base_width * params.hut_jitter_ratio,
                    params.hut_capacity,
                );
                (Bounds::Rect(full), KindData::Hut(hut))
            }
            PlaceableKind::Farm => (
                Bounds::Rect(Rect::centered(position, params.farm_width, params.farm_height)),
                KindData::Farm,
            ),
            PlaceableKind::Factory => {
                let base = Rect::centered(position, params.factory_width, params.factory_height);
                let chimney_right = base.max.x - params.chimney_inset;
                let chimney = Rect::from_min_max(
                    Vec2::new(chimney_right - params.chimney_width, base.min.y - params.chimney_height),
                    Vec2::new(chimney_right, base.min.y),
                );
                (Bounds::Rect(base.union(&chimney)), KindData::Factory { base, chimney })
            }
            PlaceableKind::Tree => (
                Bounds::Circle(Circle::new(position, params.tree_trunk_radius)),
                KindData::Tree { canopy_radius: params.tree_canopy_radius },
            ),
        };
        Self { id, kind, position, bounds, data }
    }

    /// Back-to-front draw order key: the bottom edge of the bounds.
    #[inline]
    pub fn depth_key(&self) -> f64 {
        self.bounds.bottom()
    }

    #[inline]
    pub fn as_hut(&self) -> Option<&Hut> {
        match &self.data {
            KindData::Hut(h) => Some(h),
            _ => None,
        }
    }

    #[inline]
    pub fn as_hut_mut(&mut self) -> Option<&mut Hut> {
        match &mut self.data {
            KindData::Hut(h) => Some(h),
            _ => None,
        }
    }

    /// The consumption disc if this is a hole.
    pub fn consumption_zone(&self) -> Option<Circle> {
        match self.data {
            KindData::Hole { consumption_radius } => Some(Circle::new(self.bounds.center(), consumption_radius)),
            _ => None,
        }
    }
}
