//! Surface resolution and resize observation, as opaque capabilities.

use crate::runtime::SurfaceKey;

/// Maps an artboard identity to its rendering surface.
///
/// Returning `None` is a configuration error on the caller's side (the DOM is
/// not ready, or the id scheme does not match); the core does not retry.
pub trait SurfaceProvider {
    fn surface_for(&mut self, identity: &str) -> Option<SurfaceKey>;
}

/// Resize-observation primitive over a dynamic set of surfaces.
///
/// Delivery is batched with no per-surface payload guarantee: the host calls
/// back with "something changed", not which surface. Observation must be
/// stopped exactly when a surface's handle is removed; `disconnect` releases
/// every observation at manager teardown.
pub trait SurfaceObserver {
    fn observe(&mut self, surface: &SurfaceKey);
    fn unobserve(&mut self, surface: &SurfaceKey);
    fn disconnect(&mut self);
}
