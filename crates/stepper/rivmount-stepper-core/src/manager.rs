//! Stepper manager: handle ownership, desired state, and broadcasts.

use serde::{Deserialize, Serialize};

use rivmount_api_core::{
    state_machine_name, AnimationRuntime, AssetCache, AssetFetcher, Layout, LoadRequest,
    RuntimeHandle, StateMachineInput, SurfaceObserver, SurfaceProvider,
};

use crate::error::StepperError;
use crate::events::StepperEvent;
use crate::handle::Handle;
use crate::registry::HandleRegistry;
use crate::resize::ResizeCoordinator;

/// Input names every artboard's state machine is expected to expose.
pub const INACTIVE_INPUT: &str = "Inactive";
pub const VISIBLE_INPUT: &str = "Visible";

/// Host-supplied configuration shared by every mount in the collection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StepperConfig {
    /// Source identifier of the shared binary asset.
    pub asset_src: String,
    pub layout: Layout,
    pub autoplay: bool,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            asset_src: String::new(),
            layout: Layout::default(),
            autoplay: true,
        }
    }
}

/// Owns the handle registry, the resize coordinator, and the collection-wide
/// desired state. All operations run on one control flow; load completion is
/// delivered by the host as a later call ([`finish_load`](Self::finish_load)
/// / [`fail_load`](Self::fail_load)), never concurrently.
pub struct StepperManager {
    cfg: StepperConfig,
    runtime: Box<dyn AnimationRuntime>,
    surfaces: Box<dyn SurfaceProvider>,
    assets: AssetCache,
    registry: HandleRegistry,
    resize: ResizeCoordinator,
    /// Desired state for the whole collection, authoritative regardless of
    /// individual handle load status.
    active: Option<String>,
    visible: Option<String>,
    events: Vec<StepperEvent>,
}

impl StepperManager {
    pub fn new(
        cfg: StepperConfig,
        runtime: Box<dyn AnimationRuntime>,
        surfaces: Box<dyn SurfaceProvider>,
        observer: Box<dyn SurfaceObserver>,
        fetcher: Box<dyn AssetFetcher>,
    ) -> Self {
        Self {
            cfg,
            runtime,
            surfaces,
            assets: AssetCache::new(fetcher),
            registry: HandleRegistry::new(),
            resize: ResizeCoordinator::new(observer),
            active: None,
            visible: None,
            events: Vec::new(),
        }
    }

    /// Reserve a registry slot for `identity` and start its asynchronous
    /// load. Returns once the reservation is made; loading continues in the
    /// background and lands via [`finish_load`](Self::finish_load).
    pub fn mount_artboard(&mut self, identity: &str) -> Result<(), StepperError> {
        if self.registry.contains(identity) {
            return Err(StepperError::AlreadyMounted(identity.to_string()));
        }
        let surface = self
            .surfaces
            .surface_for(identity)
            .ok_or_else(|| StepperError::SurfaceNotFound(identity.to_string()))?;
        let bytes = self.assets.bytes(&self.cfg.asset_src)?;

        // Reserve before the load begins so a setActive/setVisible arriving
        // mid-load targets a registered handle.
        self.registry
            .insert(Handle::reserved(identity, surface.clone()))?;

        let request = LoadRequest {
            bytes,
            surface,
            artboard: identity.to_string(),
            state_machine: state_machine_name(identity),
            layout: self.cfg.layout,
            autoplay: self.cfg.autoplay,
        };
        if let Err(err) = self.runtime.begin_load(request) {
            // Synchronous load failure: the reservation must not linger.
            if let Some(handle) = self.registry.remove(identity) {
                handle.dispose();
            }
            return Err(err.into());
        }

        log::debug!("mounted artboard '{identity}' (load pending)");
        self.events.push(StepperEvent::ArtboardMounted {
            identity: identity.to_string(),
        });
        Ok(())
    }

    /// Load-completion continuation, invoked by the host adapter.
    ///
    /// Re-reads the live desired state, so a `set_active`/`set_visible` that
    /// arrived while the load was in flight is honored here. A completion for
    /// an identity that was cleaned up mid-load disposes the incoming handle
    /// and changes nothing.
    pub fn finish_load(
        &mut self,
        identity: &str,
        mut runtime_handle: Box<dyn RuntimeHandle>,
    ) -> Result<(), StepperError> {
        if !self.registry.contains(identity) {
            log::warn!("load completed for '{identity}' after clean_up; discarding");
            runtime_handle.dispose();
            return Ok(());
        }

        let inputs = runtime_handle.state_machine_inputs(&state_machine_name(identity));
        let (mut inactive_input, mut visible_input) = match resolve_inputs(identity, inputs) {
            Ok(pair) => pair,
            Err(err) => {
                runtime_handle.dispose();
                if let Some(handle) = self.registry.remove(identity) {
                    handle.dispose();
                }
                log::warn!("load completed for '{identity}' but {err}");
                self.events.push(StepperEvent::LoadFailed {
                    identity: identity.to_string(),
                    message: err.to_string(),
                });
                return Err(err);
            }
        };

        // Current desired state, not the state at mount time.
        inactive_input.set(self.active.as_deref() != Some(identity));
        visible_input.set(self.visible.as_deref() == Some(identity));
        runtime_handle.resize_to_surface();

        if let Some(handle) = self.registry.get_mut(identity) {
            let surface = handle.surface().clone();
            handle.complete(runtime_handle, inactive_input, visible_input);
            self.resize.observe(&surface);
        }

        log::debug!("artboard '{identity}' loaded");
        self.events.push(StepperEvent::ArtboardLoaded {
            identity: identity.to_string(),
        });
        Ok(())
    }

    /// Load-failure continuation. Drops the reservation; no retry policy.
    pub fn fail_load(&mut self, identity: &str, message: &str) {
        if let Some(handle) = self.registry.remove(identity) {
            self.resize.unobserve(handle.surface());
            handle.dispose();
        }
        log::warn!("load failed for '{identity}': {message}");
        self.events.push(StepperEvent::LoadFailed {
            identity: identity.to_string(),
            message: message.to_string(),
        });
    }

    /// Dispose one handle and stop observing its surface. Cleaning up an
    /// identity that is not mounted is a no-op, not an error.
    pub fn clean_up(&mut self, identity: &str) {
        match self.registry.remove(identity) {
            Some(handle) => {
                self.resize.unobserve(handle.surface());
                handle.dispose();
                log::debug!("cleaned up artboard '{identity}'");
                self.events.push(StepperEvent::ArtboardRemoved {
                    identity: identity.to_string(),
                });
            }
            None => {
                log::debug!("clean_up: '{identity}' is not mounted");
            }
        }
    }

    /// Mark `identity` as the single active artboard and broadcast to every
    /// loaded handle. The identity need not be mounted yet; it is honored
    /// when its load completes.
    pub fn set_active(&mut self, identity: &str) {
        self.active = Some(identity.to_string());
        for handle in self.registry.iter_mut() {
            let inactive = handle.identity() != identity;
            handle.set_inactive(inactive);
        }
    }

    /// Mark `identity` as the single visible artboard and broadcast.
    pub fn set_visible(&mut self, identity: &str) {
        self.visible = Some(identity.to_string());
        for handle in self.registry.iter_mut() {
            let visible = handle.identity() == identity;
            handle.set_visible(visible);
        }
    }

    /// "No artboard visible" is a first-class desired state.
    pub fn forget_visible(&mut self) {
        self.visible = None;
        for handle in self.registry.iter_mut() {
            handle.set_visible(false);
        }
    }

    /// The observation primitive reported "something changed". Every loaded
    /// handle resizes, not only the one whose surface moved; redundant but
    /// matches the delivery contract, which names no surface.
    pub fn surfaces_resized(&mut self) {
        for handle in self.registry.iter_mut() {
            handle.resize();
        }
    }

    /// Whole-manager teardown: dispose every handle and release all
    /// observations.
    pub fn tear_down(&mut self) {
        for handle in self.registry.drain() {
            handle.dispose();
        }
        self.resize.disconnect();
        log::debug!("stepper manager torn down");
    }

    /// Signals accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<StepperEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn visible(&self) -> Option<&str> {
        self.visible.as_deref()
    }

    pub fn is_mounted(&self, identity: &str) -> bool {
        self.registry.contains(identity)
    }

    /// Look up a mounted handle.
    pub fn handle(&self, identity: &str) -> Result<&Handle, StepperError> {
        self.registry
            .get(identity)
            .ok_or_else(|| StepperError::NotFound(identity.to_string()))
    }

    pub fn is_loaded(&self, identity: &str) -> bool {
        self.registry
            .get(identity)
            .map(Handle::is_loaded)
            .unwrap_or(false)
    }

    pub fn mounted_identities(&self) -> Vec<String> {
        self.registry.identities()
    }
}

/// Pick the "Inactive" and "Visible" inputs out of the state machine's input
/// list. A missing name is an asset-integrity error: downstream broadcasts
/// assume both exist.
fn resolve_inputs(
    identity: &str,
    inputs: Vec<Box<dyn StateMachineInput>>,
) -> Result<(Box<dyn StateMachineInput>, Box<dyn StateMachineInput>), StepperError> {
    let mut inactive = None;
    let mut visible = None;
    for input in inputs {
        match input.name() {
            INACTIVE_INPUT if inactive.is_none() => inactive = Some(input),
            VISIBLE_INPUT if visible.is_none() => visible = Some(input),
            _ => {}
        }
    }
    let missing = |name: &str| StepperError::InputNotFound {
        artboard: identity.to_string(),
        input: name.to_string(),
    };
    match (inactive, visible) {
        (Some(i), Some(v)) => Ok((i, v)),
        (None, _) => Err(missing(INACTIVE_INPUT)),
        (_, None) => Err(missing(VISIBLE_INPUT)),
    }
}
