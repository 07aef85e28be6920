//! viewport-service library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.

pub mod application;
pub mod infrastructure;

pub use application::catalog::{LayoutCatalog, LayoutProvider};
pub use application::layout_service::{
    LayoutEvent, LayoutService, LayoutServiceEvent, ViewerMode, DEFAULT_LAYOUT_ID,
};
pub use application::viewports::{layout_to_viewports, ViewportDescriptor};
