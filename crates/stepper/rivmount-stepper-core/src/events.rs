//! Discrete signals emitted while the collection changes.
//!
//! Failures inside a load-completion continuation have no caller to return
//! to, so they land here as well as in the continuation's own Result. Hosts
//! drain the buffer via [`crate::StepperManager::drain_events`].

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum StepperEvent {
    ArtboardMounted {
        identity: String,
    },
    ArtboardLoaded {
        identity: String,
    },
    /// The runtime's load path failed, or the loaded asset was missing an
    /// expected input. The handle's reservation has been dropped.
    LoadFailed {
        identity: String,
        message: String,
    },
    ArtboardRemoved {
        identity: String,
    },
}
