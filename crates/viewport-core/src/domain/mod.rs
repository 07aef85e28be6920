//! Domain entities for viewport layouts.
//!
//! This module contains pure data and algorithms with no I/O: the normalized
//! rectangle type, the layout container, the grid generator, and the
//! rectangle-to-offsets conversion used by rendering layers.
//!
//! # Coordinate system (for beginners)
//!
//! Everything is expressed in a resolution-independent unit square.  `x`
//! runs from 0 (left) to 1 (right) and `y` runs from 0 (bottom) to 1 (top).
//! A rendering layer turns these fractions into real positions, so the same
//! layout works on any screen size.

pub mod grid;
pub mod layout;
pub mod rect;
pub mod style;
