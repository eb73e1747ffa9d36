//! Error taxonomy for the stepper lifecycle.

use rivmount_api_core::{AssetError, RuntimeLoadError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StepperError {
    /// Mounting an identity twice without an intervening clean_up.
    #[error("artboard '{0}' is already mounted")]
    AlreadyMounted(String),

    /// Lookup of an identity that is not registered. Benign for cleanup
    /// paths; callers there treat it as a no-op.
    #[error("artboard '{0}' is not mounted")]
    NotFound(String),

    /// No rendering surface resolved for the identity. Configuration error,
    /// not retried.
    #[error("no surface found for artboard '{0}'")]
    SurfaceNotFound(String),

    /// The decoded asset lacks an expected named state-machine input.
    /// Asset-integrity error; state broadcasts assume both inputs exist.
    #[error("artboard '{artboard}' has no '{input}' input")]
    InputNotFound { artboard: String, input: String },

    #[error(transparent)]
    RuntimeLoadFailure(#[from] RuntimeLoadError),

    #[error(transparent)]
    Asset(#[from] AssetError),
}
