//! Application layer of the layout service.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure layout rules in `viewport_core`) and the infrastructure (files,
//! rendering, process setup).  Code here orchestrates domain objects for a
//! viewer and depends on traits such as [`catalog::LayoutProvider`] rather
//! than concrete sources.  It performs no I/O.
//!
//! # Sub-modules
//!
//! - **`catalog`**        – The shared, built-once list of default layouts.
//!
//! - **`layout_service`** – The viewer state machine: active layout, content
//!   slots, selection and viewer mode, with change notifications.
//!
//! - **`viewports`**      – Converts the active layout into descriptors the
//!   renderer can position.

pub mod catalog;
pub mod layout_service;
pub mod viewports;
