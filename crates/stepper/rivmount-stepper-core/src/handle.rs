//! One mounted artboard instance.

use std::fmt;

use rivmount_api_core::{RuntimeHandle, StateMachineInput, SurfaceKey};

/// Binds one artboard identity to its surface, runtime instance, and resolved
/// state-machine inputs.
///
/// A handle exists in the registry from the moment it is mounted
/// (reservation) until clean_up removes it, even while `loaded` is false.
/// Operations that need a live runtime are skipped on unloaded handles and
/// applied at load completion from the then-current desired state.
pub struct Handle {
    identity: String,
    surface: SurfaceKey,
    runtime: Option<Box<dyn RuntimeHandle>>,
    inactive_input: Option<Box<dyn StateMachineInput>>,
    visible_input: Option<Box<dyn StateMachineInput>>,
    loaded: bool,
}

impl Handle {
    /// A registry slot reserved before the asynchronous load begins.
    pub fn reserved(identity: impl Into<String>, surface: SurfaceKey) -> Self {
        Self {
            identity: identity.into(),
            surface,
            runtime: None,
            inactive_input: None,
            visible_input: None,
            loaded: false,
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn surface(&self) -> &SurfaceKey {
        &self.surface
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Fill in the runtime handle and resolved inputs once loading completes.
    pub(crate) fn complete(
        &mut self,
        runtime: Box<dyn RuntimeHandle>,
        inactive_input: Box<dyn StateMachineInput>,
        visible_input: Box<dyn StateMachineInput>,
    ) {
        self.runtime = Some(runtime);
        self.inactive_input = Some(inactive_input);
        self.visible_input = Some(visible_input);
        self.loaded = true;
    }

    /// Write the "Inactive" input. Skipped silently while unloaded.
    pub(crate) fn set_inactive(&mut self, value: bool) {
        if let Some(input) = self.inactive_input.as_mut() {
            input.set(value);
        }
    }

    /// Write the "Visible" input. Skipped silently while unloaded.
    pub(crate) fn set_visible(&mut self, value: bool) {
        if let Some(input) = self.visible_input.as_mut() {
            input.set(value);
        }
    }

    /// Resize the drawing surface if the runtime is live.
    pub(crate) fn resize(&mut self) {
        if let Some(runtime) = self.runtime.as_mut() {
            runtime.resize_to_surface();
        }
    }

    /// Release the runtime instance, consuming the handle.
    pub(crate) fn dispose(mut self) {
        if let Some(mut runtime) = self.runtime.take() {
            runtime.dispose();
        }
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("identity", &self.identity)
            .field("surface", &self.surface)
            .field("loaded", &self.loaded)
            .finish()
    }
}
