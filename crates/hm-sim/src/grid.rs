//! Uniform spatial hash used as the agent-agent broadphase.
//!
//! With the cell size set to the largest agent diameter, two overlapping
//! agents always sit in the same or adjacent cells, so scanning the 3×3
//! neighbourhood of each agent finds every overlapping pair.  A pair is
//! emitted only from its lower id, which visits it exactly once.

use hm_core::{AgentId, Vec2};

#[cfg(feature = "fx-hash")]
type CellMap = rustc_hash::FxHashMap<(i32, i32), Vec<AgentId>>;
#[cfg(not(feature = "fx-hash"))]
type CellMap = std::collections::HashMap<(i32, i32), Vec<AgentId>>;

#[derive(Debug, Default)]
pub struct SpatialHash {
    cell_size: f64,
    cells:     CellMap,
}

impl SpatialHash {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn key(&self, p: Vec2) -> (i32, i32) {
        ((p.x / self.cell_size).floor() as i32, (p.y / self.cell_size).floor() as i32)
    }

    /// Re-bucket `entries` into cells of `cell_size`.  A non-positive or
    /// non-finite size falls back to 1.0.
    pub fn rebuild<I>(&mut self, cell_size: f64, entries: I)
    where
        I: IntoIterator<Item = (AgentId, Vec2)>,
    {
        self.cell_size = if cell_size.is_finite() && cell_size > 0.0 { cell_size } else { 1.0 };
        self.cells.clear();
        for (id, p) in entries {
            let key = self.key(p);
            self.cells.entry(key).or_default().push(id);
        }
    }

    /// Every unordered pair `(a, b)` with `a < b` sharing or bordering a
    /// cell, sorted ascending.
    pub fn candidate_pairs(&self, out: &mut Vec<(AgentId, AgentId)>) {
        out.clear();
        for (&(cx, cy), ids) in &self.cells {
            for &a in ids {
                for dx in -1..=1 {
                    for dy in -1..=1 {
                        let Some(others) = self.cells.get(&(cx.saturating_add(dx), cy.saturating_add(dy))) else {
                            continue;
                        };
                        out.extend(others.iter().filter(|&&b| b > a).map(|&b| (a, b)));
                    }
                }
            }
        }
        out.sort_unstable();
        out.dedup();
    }

    pub fn len(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
