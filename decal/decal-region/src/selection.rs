//! The set of currently selected faces.

use hashbrown::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An unordered set of selected face ids.
///
/// Only [`RegionSelector`](crate::RegionSelector) mutates a live selection;
/// hosts read it to highlight faces or assign a material.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaceSelection {
    faces: HashSet<u32>,
}

impl FaceSelection {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of selected faces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Whether `face` is selected.
    #[must_use]
    pub fn contains(&self, face: u32) -> bool {
        self.faces.contains(&face)
    }

    /// Iterate over selected faces in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.faces.iter().copied()
    }

    /// Selected faces in ascending order.
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<u32> {
        let mut faces: Vec<u32> = self.faces.iter().copied().collect();
        faces.sort_unstable();
        faces
    }

    pub(crate) fn insert(&mut self, face: u32) -> bool {
        self.faces.insert(face)
    }

    pub(crate) fn remove(&mut self, face: u32) -> bool {
        self.faces.remove(&face)
    }

    pub(crate) fn clear(&mut self) {
        self.faces.clear();
    }
}

impl FromIterator<u32> for FaceSelection {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self {
            faces: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_vec_is_ordered() {
        let selection: FaceSelection = [9, 3, 7, 3].into_iter().collect();
        assert_eq!(selection.len(), 3);
        assert_eq!(selection.to_sorted_vec(), vec![3, 7, 9]);
    }

    #[test]
    fn empty_by_default() {
        let selection = FaceSelection::new();
        assert!(selection.is_empty());
        assert!(!selection.contains(0));
    }

    #[test]
    fn equality_ignores_order() {
        let a: FaceSelection = [1, 2, 3].into_iter().collect();
        let b: FaceSelection = [3, 1, 2].into_iter().collect();
        assert_eq!(a, b);
    }
}
