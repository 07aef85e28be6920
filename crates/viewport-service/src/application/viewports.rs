//! Conversion of a layout into renderer viewport descriptors.

use serde::Serialize;
use viewport_core::{NormalizedRect, SpatialStyle, ViewportLayout};

/// One viewport the renderer should create.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewportDescriptor {
    /// Slot index in the layout (and in the service's content array).
    pub slot: usize,
    pub rect: NormalizedRect,
    pub style: SpatialStyle,
    /// Name of the rendering plugin that draws this viewport.
    pub plugin: String,
}

/// Builds one descriptor per valid slot of `layout`, in slot order.
///
/// Slots whose box fails re-validation are skipped; the remaining
/// descriptors keep their layout slot numbers.
pub fn layout_to_viewports(layout: &ViewportLayout, plugin: &str) -> Vec<ViewportDescriptor> {
    (0..layout.len())
        .filter_map(|slot| {
            let rect = *layout.get(slot)?;
            Some(ViewportDescriptor {
                slot,
                rect,
                style: SpatialStyle::from_rect(&rect),
                plugin: plugin.to_string(),
            })
        })
        .collect()
}
