//! Animation-runtime adapter traits.
//!
//! v1 uses small string keys as SurfaceKey. Loading is fire-and-forget:
//! `begin_load` only starts decoding; the host adapter reports completion (or
//! failure) back to whichever component issued the request. That keeps the
//! core single-threaded: a completion is just another call interleaved with
//! the rest of the API, never a concurrent one.

use thiserror::Error;

use crate::layout::Layout;

/// Opaque surface key for v1 (small string key). Hosts map it to whatever
/// their rendering target actually is (a canvas element id in the browser).
pub type SurfaceKey = String;

/// State-machine naming convention shared by every artboard in the asset:
/// artboard `"About"` drives state machine `"About State Machine"`.
pub fn state_machine_name(artboard: &str) -> String {
    format!("{artboard} State Machine")
}

/// Everything the runtime needs to start decoding one artboard instance.
#[derive(Clone, Debug)]
pub struct LoadRequest {
    /// Defensive copy of the shared asset bytes; the runtime may consume them.
    pub bytes: Vec<u8>,
    pub surface: SurfaceKey,
    pub artboard: String,
    pub state_machine: String,
    pub layout: Layout,
    pub autoplay: bool,
}

/// The runtime's own load path failed (corrupt or missing asset, dead
/// surface). Not retried by the core.
#[derive(Debug, Error)]
#[error("runtime load failure: {0}")]
pub struct RuntimeLoadError(pub String);

/// A resolved boolean or trigger input on a live state machine.
pub trait StateMachineInput {
    fn name(&self) -> &str;
    fn get(&self) -> bool;
    fn set(&mut self, value: bool);
    /// Fire a trigger input. No-op for plain boolean inputs.
    fn fire(&mut self);
}

/// A live, decoded artboard instance owned by exactly one handle.
pub trait RuntimeHandle {
    /// Resize the drawing surface to the current dimensions of its target.
    fn resize_to_surface(&mut self);
    /// Resolved inputs of the named state machine, in asset order.
    fn state_machine_inputs(&mut self, state_machine: &str) -> Vec<Box<dyn StateMachineInput>>;
    /// Release runtime resources. The handle must not be used afterwards.
    fn dispose(&mut self);
}

/// The decoding/rendering runtime itself, as seen by the core.
pub trait AnimationRuntime {
    /// Start loading asynchronously. Errors returned here are the
    /// synchronous slice of the load path (bad request, runtime gone);
    /// everything later arrives through the host's completion calls.
    fn begin_load(&mut self, request: LoadRequest) -> Result<(), RuntimeLoadError>;
}
