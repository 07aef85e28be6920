//! Normalized viewport rectangles.
//!
//! Every viewport box is described by four scalars inside the unit square.
//! The components are stored in the order `(x0, y1, x1, y0)`:
//!
//! ```text
//!  y=1 ┌───────────────────────┐
//!      │   (x0, y1)            │
//!      │      ┌────────┐       │
//!      │      │  slot  │       │
//!      │      └────────┘       │
//!      │            (x1, y0)   │
//!  y=0 └───────────────────────┘
//!     x=0                     x=1
//! ```
//!
//! The vertical axis grows **upward**: the top edge of the square is `y = 1`
//! and the bottom edge is `y = 0`.  The "lower-right" corner therefore has
//! the smaller `y` value.  This matches the DICOM Display Environment Spatial
//! Position attribute (0072,0108), which is where the convention comes from.

use serde::Serialize;

/// Number of scalar components in a rectangle entry.
pub const ENTRY_COMPONENTS: usize = 4;

/// A validated rectangle in unit-square coordinates describing one viewport.
///
/// Construct with [`NormalizedRect::new`], which enforces:
///
/// - `0.0 <= x0 < x1 <= 1.0` (strictly positive width)
/// - `0.0 <= y0 < y1 <= 1.0` (strictly positive height)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedRect {
    x0: f64,
    y1: f64,
    x1: f64,
    y0: f64,
}

impl NormalizedRect {
    /// Builds a rectangle from its four components, coercing `NaN` to `0.0`.
    ///
    /// Returns `None` when the coerced components violate the unit-square
    /// invariants.
    pub fn new(x0: f64, y1: f64, x1: f64, y0: f64) -> Option<Self> {
        let entry = [coerce(x0), coerce(y1), coerce(x1), coerce(y0)];
        if is_valid_entry(&entry) {
            Some(Self {
                x0: entry[0],
                y1: entry[1],
                x1: entry[2],
                y0: entry[3],
            })
        } else {
            None
        }
    }

    /// Left edge.
    pub fn x0(&self) -> f64 {
        self.x0
    }

    /// Top edge.
    pub fn y1(&self) -> f64 {
        self.y1
    }

    /// Right edge.
    pub fn x1(&self) -> f64 {
        self.x1
    }

    /// Bottom edge.
    pub fn y0(&self) -> f64 {
        self.y0
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Returns the components in storage order `[x0, y1, x1, y0]`.
    pub fn to_array(&self) -> [f64; ENTRY_COMPONENTS] {
        [self.x0, self.y1, self.x1, self.y0]
    }

    /// Returns `true` if this rectangle still satisfies every invariant.
    pub fn is_valid(&self) -> bool {
        is_valid_entry(&self.to_array())
    }

    #[cfg(test)]
    pub(crate) fn unchecked(x0: f64, y1: f64, x1: f64, y0: f64) -> Self {
        Self { x0, y1, x1, y0 }
    }

    /// Returns `true` if the two rectangles share a region of positive area.
    ///
    /// Rectangles that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &NormalizedRect) -> bool {
        self.x0 < other.x1 && self.x1 > other.x0 && self.y0 < other.y1 && self.y1 > other.y0
    }
}

/// Checks whether `candidate` is a well-formed rectangle entry.
///
/// The candidate must have exactly [`ENTRY_COMPONENTS`] numeric (non-`NaN`)
/// components laid out as `[x0, y1, x1, y0]` and satisfy the unit-square
/// invariants.
pub fn is_valid_entry(candidate: &[f64]) -> bool {
    let [x0, y1, x1, y0] = match candidate {
        [a, b, c, d] => [*a, *b, *c, *d],
        _ => return false,
    };
    if candidate.iter().any(|v| v.is_nan()) {
        return false;
    }
    x0 >= 0.0 && x1 <= 1.0 && x1 > x0 && y1 <= 1.0 && y0 >= 0.0 && y0 < y1
}

fn coerce(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
