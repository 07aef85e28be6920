//! LayoutCatalog: the built-in default layouts.
//!
//! The catalog is built lazily the first time it is requested and is then
//! shared, unchanged, for the rest of the process.  Every call to
//! [`LayoutCatalog::default_layouts`] returns the same slice, and every entry
//! is the same `Arc`, so layout identity (`Arc::ptr_eq`) is stable across
//! callers.
//!
//! | Id          | Title       | Slots |
//! |-------------|-------------|-------|
//! | `grid-1x1`  | Grid 1x1    | 1     |
//! | `grid-1x2`  | Grid 1x2    | 2     |
//! | `grid-1x3`  | Grid 1x3    | 3     |
//! | `grid-2x1`  | Grid 2x1    | 2     |
//! | `grid-2x2`  | Grid 2x2    | 4     |
//! | `grid-2x3`  | Grid 2x3    | 6     |
//! | `grid-3x3`  | Grid 3x3    | 9     |
//! | `3-plane`   | 3-Plane     | 3     |

use std::sync::{Arc, OnceLock};

use viewport_core::ViewportLayout;

/// Grid sizes included in the catalog, in display order.
const DEFAULT_GRIDS: [(u32, u32); 7] = [(1, 1), (1, 2), (1, 3), (2, 1), (2, 2), (2, 3), (3, 3)];

static DEFAULT_LAYOUTS: OnceLock<Vec<Arc<ViewportLayout>>> = OnceLock::new();

/// Source of named layouts for the [`LayoutService`](super::layout_service::LayoutService).
///
/// [`LayoutCatalog`] is the production implementation; tests substitute a
/// mock to control which layouts exist.
#[cfg_attr(test, mockall::automock)]
pub trait LayoutProvider {
    /// Returns every available layout in display order.
    fn layouts(&self) -> Vec<Arc<ViewportLayout>>;

    /// Returns the first layout whose id equals `id`.
    fn lookup_by_id(&self, id: &str) -> Option<Arc<ViewportLayout>>;
}

/// The process-wide set of built-in layouts.
#[derive(Debug, Default, Clone, Copy)]
pub struct LayoutCatalog;

impl LayoutCatalog {
    /// Returns the shared list of default layouts, building it on first use.
    pub fn default_layouts() -> &'static [Arc<ViewportLayout>] {
        DEFAULT_LAYOUTS.get_or_init(build_default_layouts)
    }

    /// Linear scan for the first default layout with the given id.
    pub fn find(id: &str) -> Option<Arc<ViewportLayout>> {
        Self::default_layouts()
            .iter()
            .find(|layout| layout.id() == id)
            .cloned()
    }
}

impl LayoutProvider for LayoutCatalog {
    fn layouts(&self) -> Vec<Arc<ViewportLayout>> {
        Self::default_layouts().to_vec()
    }

    fn lookup_by_id(&self, id: &str) -> Option<Arc<ViewportLayout>> {
        Self::find(id)
    }
}

fn build_default_layouts() -> Vec<Arc<ViewportLayout>> {
    let mut layouts: Vec<Arc<ViewportLayout>> = DEFAULT_GRIDS
        .iter()
        .map(|&(rows, columns)| ViewportLayout::grid(rows, columns).freeze())
        .collect();
    layouts.push(ViewportLayout::three_plane().freeze());
    tracing::debug!(count = layouts.len(), "default layout catalog built");
    layouts
}
