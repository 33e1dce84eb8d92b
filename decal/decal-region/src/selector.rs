//! Anchor-based region selection that grows and shrinks ring by ring.

use tracing::debug;

use crate::adjacency::FaceAdjacency;
use crate::error::{RegionError, RegionResult};
use crate::selection::FaceSelection;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of [`RegionSelector::grow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GrowOutcome {
    /// A new ring was added.
    Expanded {
        /// Faces added by this ring.
        added: usize,
        /// Selection size afterwards.
        total: usize,
    },
    /// No unselected face borders the selection.
    Saturated,
}

/// Result of [`RegionSelector::shrink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShrinkOutcome {
    /// The outermost ring was removed.
    Reduced {
        /// Faces removed with the ring.
        removed: usize,
        /// Selection size afterwards.
        total: usize,
    },
    /// Only the anchor (or nothing) is selected.
    Unchanged,
}

/// Maintains the selected region around an anchor face.
///
/// Selecting a face makes it the anchor and the whole selection. Each
/// [`grow`](Self::grow) adds one breadth-first ring of edge neighbors and
/// records it, so [`shrink`](Self::shrink) can peel exactly that ring off
/// again: after `n` grows and one shrink the selection equals `n - 1` grows
/// from the anchor.
///
/// # Example
///
/// ```
/// use decal_region::{AdjacencyParams, FaceAdjacency, GrowOutcome, RegionSelector};
/// use decal_types::unit_cube;
///
/// let adjacency = FaceAdjacency::build(&unit_cube(), &AdjacencyParams::default()).unwrap();
/// let mut selector = RegionSelector::new(adjacency);
///
/// selector.select_face(0).unwrap();
/// assert_eq!(selector.grow(), GrowOutcome::Expanded { added: 3, total: 4 });
/// assert_eq!(selector.selection().to_sorted_vec(), vec![0, 1, 4, 10]);
///
/// selector.shrink();
/// assert_eq!(selector.selection().to_sorted_vec(), vec![0]);
/// ```
#[derive(Debug, Clone)]
pub struct RegionSelector {
    adjacency: FaceAdjacency,
    selection: FaceSelection,
    anchor: Option<u32>,
    /// Faces added by each grow, innermost first.
    rings: Vec<Vec<u32>>,
}

impl RegionSelector {
    /// Create a selector with nothing selected.
    #[must_use]
    pub fn new(adjacency: FaceAdjacency) -> Self {
        Self {
            adjacency,
            selection: FaceSelection::new(),
            anchor: None,
            rings: Vec::new(),
        }
    }

    /// The adjacency this selector grows through.
    #[must_use]
    pub fn adjacency(&self) -> &FaceAdjacency {
        &self.adjacency
    }

    /// The current selection.
    #[must_use]
    pub fn selection(&self) -> &FaceSelection {
        &self.selection
    }

    /// The most recently selected face, if any.
    #[must_use]
    pub fn anchor(&self) -> Option<u32> {
        self.anchor
    }

    /// Number of rings grown around the anchor.
    #[must_use]
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    /// Replace the selection with `face` alone and make it the anchor.
    ///
    /// Returns `false` if `face` was already the only selected face.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidFace`] if `face` is not a face of the
    /// mesh; the selection is left untouched.
    pub fn select_face(&mut self, face: u32) -> RegionResult<bool> {
        let face_count = self.adjacency.face_count();
        if face as usize >= face_count {
            return Err(RegionError::InvalidFace { face, face_count });
        }
        if self.anchor == Some(face) && self.rings.is_empty() {
            return Ok(false);
        }

        self.selection.clear();
        self.selection.insert(face);
        self.anchor = Some(face);
        self.rings.clear();

        debug!(face, "Selected face");
        Ok(true)
    }

    /// Add every unselected face that shares an edge with the selection.
    ///
    /// Growing a saturated selection (the whole connected component, or
    /// nothing selected) changes nothing and records no ring.
    pub fn grow(&mut self) -> GrowOutcome {
        let Some(anchor) = self.anchor else {
            return GrowOutcome::Saturated;
        };

        // Faces inside the outermost ring already have all neighbors selected.
        let frontier = self.rings.last().map_or(std::slice::from_ref(&anchor), Vec::as_slice);

        let mut ring: Vec<u32> = frontier
            .iter()
            .flat_map(|&face| self.adjacency.neighbors(face))
            .copied()
            .filter(|&n| !self.selection.contains(n))
            .collect();
        ring.sort_unstable();
        ring.dedup();

        if ring.is_empty() {
            debug!(total = self.selection.len(), "Selection saturated");
            return GrowOutcome::Saturated;
        }

        for &face in &ring {
            self.selection.insert(face);
        }
        let added = ring.len();
        self.rings.push(ring);

        debug!(
            added,
            total = self.selection.len(),
            rings = self.rings.len(),
            "Expanded selection"
        );
        GrowOutcome::Expanded {
            added,
            total: self.selection.len(),
        }
    }

    /// Remove the outermost ring grown from the anchor.
    pub fn shrink(&mut self) -> ShrinkOutcome {
        let Some(ring) = self.rings.pop() else {
            return ShrinkOutcome::Unchanged;
        };

        for &face in &ring {
            self.selection.remove(face);
        }

        debug!(
            removed = ring.len(),
            total = self.selection.len(),
            rings = self.rings.len(),
            "Reduced selection"
        );
        ShrinkOutcome::Reduced {
            removed: ring.len(),
            total: self.selection.len(),
        }
    }

    /// Empty the selection and forget the anchor.
    pub fn clear(&mut self) {
        self.selection.clear();
        self.anchor = None;
        self.rings.clear();
    }

    /// Consume the selector, keeping only the selection.
    #[must_use]
    pub fn into_selection(self) -> FaceSelection {
        self.selection
    }
}
