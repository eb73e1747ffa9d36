//! rivmount-api-core: shared contracts for rivmount (host-agnostic)
//!
//! This crate defines the seams between the stepper/lifecycle core and its
//! collaborators: the animation runtime adapter, the surface provider and
//! resize-observation primitive, layout configuration, and the asset byte
//! cache. Adapters (wasm, test fixtures) implement these traits; the core
//! consumes them as opaque capabilities.

pub mod asset;
pub mod layout;
pub mod runtime;
pub mod surface;

pub use asset::{AssetCache, AssetError, AssetFetcher};
pub use layout::{Alignment, Fit, Layout};
pub use runtime::{
    state_machine_name, AnimationRuntime, LoadRequest, RuntimeHandle, RuntimeLoadError,
    StateMachineInput, SurfaceKey,
};
pub use surface::{SurfaceObserver, SurfaceProvider};
