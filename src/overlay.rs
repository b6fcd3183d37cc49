//! Sparse per-cell color overrides layered over the default dot color.

use crate::types::{CellKey, Rgba};
use std::collections::BTreeMap;

/// Mapping from grid cell to a painted color.
///
/// Entries are only added by painting and are only removed all at once, either
/// by an explicit clear or because a structural change invalidated the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorOverlay {
    colors: BTreeMap<CellKey, Rgba>,
}

impl ColorOverlay {
    /// Creates an empty overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or overwrites the color of one cell.
    ///
    /// Returns `true` when the stored color actually changed.
    pub fn paint(&mut self, cell: CellKey, color: Rgba) -> bool {
        self.colors.insert(cell, color) != Some(color)
    }

    /// Override color for `cell`, if painted.
    pub fn get(&self, cell: CellKey) -> Option<Rgba> {
        self.colors.get(&cell).copied()
    }

    /// Number of painted cells.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether no cell has been painted.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Removes every override.
    pub fn clear(&mut self) {
        self.colors.clear();
    }

    /// Iterates overrides in `(i, j)` order.
    pub fn iter(&self) -> impl Iterator<Item = (CellKey, Rgba)> + '_ {
        self.colors.iter().map(|(cell, color)| (*cell, *color))
    }
}

impl FromIterator<(CellKey, Rgba)> for ColorOverlay {
    fn from_iter<T: IntoIterator<Item = (CellKey, Rgba)>>(iter: T) -> Self {
        Self {
            colors: iter.into_iter().collect(),
        }
    }
}
