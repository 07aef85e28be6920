//! Regular grid layouts.
//!
//! Two pure algorithms live here:
//!
//! - [`populate_grid`] tiles the unit square with `rows × columns` equal boxes.
//! - [`solve_grid_size`] picks a near-square grid big enough for a number of
//!   viewports.
//!
//! # Slot ordering
//!
//! Slots are numbered row-major from the top-left corner:
//!
//! ```text
//! rows = 2, columns = 3
//!
//!  y=1 ┌───┬───┬───┐
//!      │ 0 │ 1 │ 2 │
//!      ├───┼───┼───┤
//!      │ 3 │ 4 │ 5 │
//!  y=0 └───┴───┴───┘
//! ```
//!
//! Because the vertical axis grows upward, the first row has the *largest*
//! `y` values.  For linear index `i` the column is `c = i % columns` and the
//! top edge of its row is `(rows - i / columns) * y_step`.

use std::fmt;

use crate::domain::layout::ViewportLayout;

/// Rows and columns of a grid layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    pub rows: u32,
    pub columns: u32,
}

impl GridShape {
    pub fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }

    /// Number of boxes in the grid.
    pub fn cells(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.columns)
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

/// Fills `layout` with an evenly spaced `rows × columns` tiling.
///
/// Returns the number of boxes created.  When `rows * columns` is zero the
/// layout is left untouched and `0` is returned.
pub fn populate_grid(layout: &mut ViewportLayout, rows: u32, columns: u32) -> usize {
    let count = rows as usize * columns as usize;
    if count == 0 {
        return 0;
    }

    let x_step = 1.0 / f64::from(columns);
    let y_step = 1.0 / f64::from(rows);
    for i in 0..count {
        let column = i % columns as usize;
        let row_from_top = rows as usize - (i - column) / columns as usize;
        let x_origin = column as f64 * x_step;
        let y_origin = row_from_top as f64 * y_step;
        layout.add(x_origin, y_origin, x_origin + x_step, y_origin - y_step);
    }
    count
}

/// Chooses the smallest near-square grid that holds `count` viewports.
///
/// - `count < 2` → `1x1`
/// - `count == 2` → `1x2` (one row, side by side)
/// - otherwise `n x n` with `n = ceil(sqrt(count))`
pub fn solve_grid_size(count: i64) -> GridShape {
    if count < 2 {
        return GridShape::new(1, 1);
    }
    let columns = ceil_sqrt(count as u64);
    let rows = if count == 2 { 1 } else { columns };
    GridShape::new(rows, columns)
}

fn ceil_sqrt(value: u64) -> u32 {
    let mut root = (value as f64).sqrt() as u64;
    while root * root < value {
        root += 1;
    }
    while root > 0 && (root - 1) * (root - 1) >= value {
        root -= 1;
    }
    root.min(u64::from(u32::MAX)) as u32
}

impl ViewportLayout {
    /// Builds a frozen-ready grid layout titled `"Grid RxC"` with id
    /// `"grid-RxC"`.
    ///
    /// `rows` and `columns` are clamped to at least `1`.
    pub fn grid(rows: u32, columns: u32) -> Self {
        let shape = GridShape::new(rows.max(1), columns.max(1));
        let mut layout = ViewportLayout::new(format!("Grid {shape}"), format!("grid-{shape}"))
            .with_grid_shape(shape);
        populate_grid(&mut layout, shape.rows, shape.columns);
        layout
    }

    /// Builds the grid layout [`solve_grid_size`] picks for `count` viewports.
    pub fn grid_for(count: i64) -> Self {
        let shape = solve_grid_size(count);
        Self::grid(shape.rows, shape.columns)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
