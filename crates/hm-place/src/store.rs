//! `PlaceableStore`: append-only placeable collection with an R-tree index.
//!
//! # Spatial index
//!
//! Every placeable's bounding box is inserted into an `rstar` R-tree.  Overlap
//! and containment queries first collect the candidates whose boxes touch the
//! query box, then run the exact circle/rect test from `hm-core`.  Results are
//! sorted by id so callers see placement order regardless of tree layout.
//!
//! Placeables are never removed, so ids double as indices into `items`.

use rstar::{AABB, Envelope, RTree, RTreeObject, SelectionFunction};

use hm_core::{AgentId, Bounds, Circle, PlaceableId, PlaceableKind, PlaceableParams, Rect, Vec2};

use crate::error::{PlaceError, PlaceResult};
use crate::placeable::{Hut, Placeable};

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct BoxEntry {
    id:  PlaceableId,
    min: [f64; 2],
    max: [f64; 2],
}

impl BoxEntry {
    fn new(id: PlaceableId, r: &Rect) -> Self {
        Self { id, min: [r.min.x, r.min.y], max: [r.max.x, r.max.y] }
    }
}

impl RTreeObject for BoxEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

fn to_aabb(r: &Rect) -> AABB<[f64; 2]> {
    AABB::from_corners([r.min.x, r.min.y], [r.max.x, r.max.y])
}

/// Selects entries whose boxes intersect the query box (touching counts).
struct Intersecting(AABB<[f64; 2]>);

impl SelectionFunction<BoxEntry> for Intersecting {
    fn should_unpack_parent(&self, envelope: &AABB<[f64; 2]>) -> bool {
        self.0.intersects(envelope)
    }

    fn should_unpack_leaf(&self, leaf: &BoxEntry) -> bool {
        self.0.intersects(&leaf.envelope())
    }
}

// ── PlaceableStore ────────────────────────────────────────────────────────────

pub struct PlaceableStore {
    items: Vec<Placeable>,
    index: RTree<BoxEntry>,
}

impl Default for PlaceableStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaceableStore {
    pub fn new() -> Self {
        Self { items: Vec::new(), index: RTree::new() }
    }

    /// The id the next insertion will receive.
    #[inline]
    pub fn next_id(&self) -> PlaceableId {
        PlaceableId(self.items.len() as u32)
    }

    /// Construct the placeable that [`insert`](Self::insert) would add,
    /// without adding it.
    pub fn candidate(&self, kind: PlaceableKind, position: Vec2, params: &PlaceableParams) -> Placeable {
        Placeable::new(self.next_id(), kind, position, params)
    }

    /// Append a placeable built by [`candidate`](Self::candidate).
    ///
    /// Overlap is not checked here; callers run [`first_overlap`](Self::first_overlap)
    /// first.
    pub fn insert(&mut self, mut placeable: Placeable) -> PlaceableId {
        let id = self.next_id();
        placeable.id = id;
        self.index.insert(BoxEntry::new(id, &placeable.bounds.aabb()));
        self.items.push(placeable);
        id
    }

    #[inline]
    pub fn get(&self, id: PlaceableId) -> Option<&Placeable> {
        self.items.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: PlaceableId) -> Option<&mut Placeable> {
        self.items.get_mut(id.index())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All placeables in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &Placeable> {
        self.items.iter()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    fn candidates(&self, query: &Rect) -> Vec<PlaceableId> {
        let mut ids: Vec<PlaceableId> = self
            .index
            .locate_with_selection_function(Intersecting(to_aabb(query)))
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// The lowest-id placeable whose bounds strictly overlap `bounds`.
    pub fn first_overlap(&self, bounds: &Bounds) -> Option<PlaceableId> {
        self.candidates(&bounds.aabb())
            .into_iter()
            .find(|&id| self.items[id.index()].bounds.overlaps(bounds))
    }

    /// The lowest-id placeable whose bounds contain `p`.
    pub fn containing(&self, p: Vec2) -> Option<PlaceableId> {
        self.candidates(&Rect::from_min_max(p, p))
            .into_iter()
            .find(|&id| self.items[id.index()].bounds.contains_point(p))
    }

    /// Every placeable whose bounds overlap `circle`, in id order.
    pub fn overlapping_circle(&self, circle: &Circle) -> Vec<PlaceableId> {
        self.candidates(&circle.aabb())
            .into_iter()
            .filter(|&id| self.items[id.index()].bounds.overlaps_circle(circle))
            .collect()
    }

    // ── Kind-specific access ──────────────────────────────────────────────

    /// Consumption discs of every hole, in placement order.
    pub fn holes(&self) -> impl Iterator<Item = (PlaceableId, Circle)> + '_ {
        self.items.iter().filter_map(|p| p.consumption_zone().map(|c| (p.id, c)))
    }

    pub fn hut(&self, id: PlaceableId) -> PlaceResult<&Hut> {
        self.get(id).ok_or(PlaceError::NotFound(id))?.as_hut().ok_or(PlaceError::NotAHut(id))
    }

    pub fn hut_mut(&mut self, id: PlaceableId) -> PlaceResult<&mut Hut> {
        self.get_mut(id).ok_or(PlaceError::NotFound(id))?.as_hut_mut().ok_or(PlaceError::NotAHut(id))
    }

    /// Huts in placement order.
    pub fn huts(&self) -> impl Iterator<Item = (PlaceableId, &Hut)> + '_ {
        self.items.iter().filter_map(|p| p.as_hut().map(|h| (p.id, h)))
    }

    /// Add `agent` to hut `id`'s resident list.
    pub fn admit_resident(&mut self, id: PlaceableId, agent: AgentId) -> PlaceResult<()> {
        self.hut_mut(id)?.admit(id, agent)
    }

    /// Remove `agent` from hut `id`'s resident list.  Returns whether the
    /// agent was listed.
    pub fn evict_resident(&mut self, id: PlaceableId, agent: AgentId) -> PlaceResult<bool> {
        Ok(self.hut_mut(id)?.evict(agent))
    }
}

impl std::fmt::Debug for PlaceableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceableStore").field("len", &self.items.len()).finish()
    }
}
