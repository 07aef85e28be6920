//! Conversion from normalized rectangles to percentage box offsets.
//!
//! Rendering layers position each viewport box absolutely inside its
//! container using four offsets measured inward from the container edges.
//! [`SpatialStyle::from_rect`] is the single shared implementation.
//!
//! The rectangle stores `[x0, y1, x1, y0]` with y growing upward, while the
//! offsets are measured from each edge inward, so the top (`y1`) and right
//! (`x1`) components are inverted with `1.0 - value`.

use serde::Serialize;

use crate::domain::rect::NormalizedRect;

/// Percentage offsets for one viewport box, e.g. `"25.0000%"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpatialStyle {
    pub left: String,
    pub top: String,
    pub right: String,
    pub bottom: String,
}

impl SpatialStyle {
    pub fn from_rect(rect: &NormalizedRect) -> Self {
        let [left, top, right, bottom] = percent_offsets(rect).map(format_percent);
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Returns `[left, top, right, bottom]` offsets scaled to `0..=100`.
pub fn percent_offsets(rect: &NormalizedRect) -> [f64; 4] {
    let mut offsets = rect.to_array();
    for (i, value) in offsets.iter_mut().enumerate() {
        if i == 1 || i == 2 {
            *value = 1.0 - *value;
        }
        *value *= 100.0;
    }
    offsets
}

fn format_percent(value: f64) -> String {
    format!("{value:.4}%")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
