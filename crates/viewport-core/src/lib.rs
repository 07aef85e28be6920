//! # viewport-core
//!
//! Shared library for multi-pane viewers containing the viewport layout data
//! model, the grid layout algorithms, and a synchronous event bus.
//!
//! This crate has no dependencies on UI frameworks, rendering code, or I/O.
//!
//! # Architecture overview (for beginners)
//!
//! A multi-pane viewer (for example a medical-image viewer) splits its
//! display area into rectangular *viewports*.  Which boxes exist, and where,
//! is described by a *layout*.
//!
//! - **`domain`** – The layout model.  A [`ViewportLayout`] is an ordered list
//!   of [`NormalizedRect`] boxes in unit-square coordinates; the list index of
//!   a box is its *slot*.  Grid layouts are generated by [`populate_grid`] and
//!   sized by [`solve_grid_size`].
//!
//! - **`events`** – The [`EventBus`], a named-event publish/subscribe registry
//!   used by higher layers to notify observers of state changes.

pub mod domain;
pub mod events;

// Re-export the most-used types at the crate root so callers can write
// `viewport_core::ViewportLayout` instead of the full module path.
pub use domain::grid::{populate_grid, solve_grid_size, GridShape};
pub use domain::layout::ViewportLayout;
pub use domain::rect::{is_valid_entry, NormalizedRect};
pub use domain::style::SpatialStyle;
pub use events::bus::{callback, Callback, Delivery, EventBus, EventBusError, SubscriptionId};
