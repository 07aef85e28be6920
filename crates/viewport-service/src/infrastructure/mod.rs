//! Infrastructure layer for the layout service.
//!
//! Contains file-system facing adapters.  Today that is only the TOML
//! configuration loader used by the demo binary.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `viewport_core`, but MUST NOT be imported by the `application` or domain
//! layers.

pub mod config;
