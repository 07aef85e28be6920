//! Event notification for state changes.

/// Named-event publish/subscribe registry.
///
/// See [`bus::EventBus`] for the main type.
pub mod bus;
