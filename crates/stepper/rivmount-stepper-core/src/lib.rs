//! rivmount-stepper-core: lifecycle manager for a collection of artboard
//! handles.
//!
//! One [`StepperManager`] owns a registry of handles keyed by artboard
//! identity, a resize coordinator shared by the whole collection, and the two
//! collection-wide desired-state fields (`active`, `visible`). Handles mount
//! asynchronously; the manager reserves a registry slot up front so state
//! changes arriving mid-load are applied, not lost, once loading completes.

pub mod error;
pub mod events;
pub mod handle;
pub mod manager;
pub mod registry;
pub mod resize;

pub use error::StepperError;
pub use events::StepperEvent;
pub use handle::Handle;
pub use manager::{StepperConfig, StepperManager};
pub use registry::HandleRegistry;
pub use resize::ResizeCoordinator;
