//! Viewport layout domain entity.
//!
//! A [`ViewportLayout`] is an ordered list of [`NormalizedRect`] boxes.  The
//! position of a box in the list is its *slot index*: slot 0 is the first box
//! added, slot 1 the second, and so on.  Content and selection elsewhere in
//! the system are addressed by slot index, so insertion order is meaningful.
//!
//! # Append, then freeze
//!
//! A layout is populated through [`ViewportLayout::add`] while the builder
//! still owns it.  Once populated it is frozen with [`ViewportLayout::freeze`],
//! which moves it into an `Arc`.  There is no API to remove or replace a box,
//! and an `Arc` hands out only shared references, so a frozen layout cannot
//! change for the rest of its life.
//!
//! # Identity
//!
//! Two layouts are never compared by content.  The service detects layout
//! changes with [`Arc::ptr_eq`]; `ViewportLayout` has no `PartialEq`.

use std::sync::Arc;

use crate::domain::grid::GridShape;
use crate::domain::rect::NormalizedRect;

/// An ordered, append-only arrangement of viewport boxes.
#[derive(Debug, Clone)]
pub struct ViewportLayout {
    title: String,
    id: String,
    entries: Vec<NormalizedRect>,
    grid: Option<GridShape>,
}

impl ViewportLayout {
    /// Creates an empty layout with a display `title` and a lookup `id`.
    pub fn new(title: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            id: id.into(),
            entries: Vec::new(),
            grid: None,
        }
    }

    pub(crate) fn with_grid_shape(mut self, shape: GridShape) -> Self {
        self.grid = Some(shape);
        self
    }

    /// Appends a box, returning the new number of slots.
    ///
    /// `NaN` components are coerced to `0.0`.  A box that fails validation is
    /// dropped and the current slot count is returned unchanged; this is a
    /// best-effort insert, not an error.
    pub fn add(&mut self, x0: f64, y1: f64, x1: f64, y0: f64) -> usize {
        if let Some(rect) = NormalizedRect::new(x0, y1, x1, y0) {
            self.entries.push(rect);
        }
        self.entries.len()
    }

    /// Returns the box at slot `index`, or `None` when the index is out of
    /// range or the stored box no longer validates.
    pub fn get(&self, index: usize) -> Option<&NormalizedRect> {
        self.entries.get(index).filter(|rect| rect.is_valid())
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Human-readable label, e.g. `"Grid 2x2"`.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Stable lookup key, e.g. `"grid-2x2"`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Rows and columns, for layouts produced by the grid builder.
    pub fn grid_shape(&self) -> Option<GridShape> {
        self.grid
    }

    /// Iterates over the boxes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &NormalizedRect> {
        self.entries.iter()
    }

    /// Freezes the layout so it can be shared.
    pub fn freeze(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Populates `self` with the standard three-plane arrangement: two
    /// stacked boxes on the left half and one full-height box on the right.
    ///
    /// ```text
    /// ┌─────┬─────┐
    /// │  0  │     │
    /// ├─────┤  2  │
    /// │  1  │     │
    /// └─────┴─────┘
    /// ```
    pub fn populate_three_plane(&mut self) -> usize {
        self.add(0.0, 1.0, 0.5, 0.5);
        self.add(0.0, 0.5, 0.5, 0.0);
        self.add(0.5, 1.0, 1.0, 0.0)
    }

    /// Builds the `"3-Plane"` layout with id `"3-plane"`.
    pub fn three_plane() -> Self {
        let mut layout = Self::new("3-Plane", "3-plane");
        layout.populate_three_plane();
        layout
    }

    #[cfg(test)]
    pub(crate) fn entries_mut(&mut self) -> &mut Vec<NormalizedRect> {
        &mut self.entries
    }
}

impl<'a> IntoIterator for &'a ViewportLayout {
    type Item = &'a NormalizedRect;
    type IntoIter = std::slice::Iter<'a, NormalizedRect>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
