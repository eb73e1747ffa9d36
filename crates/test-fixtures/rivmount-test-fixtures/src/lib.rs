//! Mock collaborators for rivmount tests.
//!
//! Each mock implements one of the `rivmount-api-core` capability traits and
//! exposes a probe: shared `Rc<Cell>`/`Rc<RefCell>` views the test keeps
//! after the mock itself has been boxed and handed to the manager. Everything
//! here assumes the single-threaded cooperative model the core runs under.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use once_cell::sync::Lazy;

use rivmount_api_core::{
    AnimationRuntime, AssetError, AssetFetcher, LoadRequest, RuntimeHandle, RuntimeLoadError,
    StateMachineInput, SurfaceKey, SurfaceObserver, SurfaceProvider,
};

/// Stand-in for the shared binary asset. Content is arbitrary; tests only
/// care that every mount receives an independent copy of it.
pub static SAMPLE_ASSET: Lazy<Vec<u8>> = Lazy::new(|| b"RIVE\0sample-asset-bytes".repeat(8));

// ---------------------------------------------------------------------------
// State-machine inputs

struct MockInput {
    name: String,
    value: Rc<Cell<bool>>,
    fires: Rc<Cell<u32>>,
}

impl StateMachineInput for MockInput {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self) -> bool {
        self.value.get()
    }

    fn set(&mut self, value: bool) {
        self.value.set(value);
    }

    fn fire(&mut self) {
        self.fires.set(self.fires.get() + 1);
    }
}

// ---------------------------------------------------------------------------
// Runtime handle

/// Test-side view of one mock runtime handle after it has been handed to the
/// manager.
#[derive(Clone)]
pub struct HandleProbe {
    pub inactive: Rc<Cell<bool>>,
    pub visible: Rc<Cell<bool>>,
    resizes: Rc<Cell<u32>>,
    disposed: Rc<Cell<bool>>,
}

impl HandleProbe {
    pub fn resize_count(&self) -> u32 {
        self.resizes.get()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }
}

struct MockRuntimeHandle {
    /// (input name, value cell, fire counter) per exposed input.
    inputs: Vec<(String, Rc<Cell<bool>>, Rc<Cell<u32>>)>,
    requested_machine: Rc<RefCell<Option<String>>>,
    resizes: Rc<Cell<u32>>,
    disposed: Rc<Cell<bool>>,
}

impl RuntimeHandle for MockRuntimeHandle {
    fn resize_to_surface(&mut self) {
        self.resizes.set(self.resizes.get() + 1);
    }

    fn state_machine_inputs(&mut self, state_machine: &str) -> Vec<Box<dyn StateMachineInput>> {
        *self.requested_machine.borrow_mut() = Some(state_machine.to_string());
        self.inputs
            .iter()
            .map(|(name, value, fires)| {
                Box::new(MockInput {
                    name: name.clone(),
                    value: value.clone(),
                    fires: fires.clone(),
                }) as Box<dyn StateMachineInput>
            })
            .collect()
    }

    fn dispose(&mut self) {
        self.disposed.set(true);
    }
}

/// A handle exposing the standard "Inactive"/"Visible" input pair.
pub fn loaded_handle() -> (Box<dyn RuntimeHandle>, HandleProbe) {
    handle_with_inputs(&["Inactive", "Visible"])
}

/// A handle exposing an arbitrary input list; probes map onto the first
/// "Inactive" and "Visible" entries when present.
pub fn handle_with_inputs(names: &[&str]) -> (Box<dyn RuntimeHandle>, HandleProbe) {
    let inactive = Rc::new(Cell::new(false));
    let visible = Rc::new(Cell::new(false));
    let resizes = Rc::new(Cell::new(0));
    let disposed = Rc::new(Cell::new(false));

    let inputs = names
        .iter()
        .map(|name| {
            let value = match *name {
                "Inactive" => inactive.clone(),
                "Visible" => visible.clone(),
                _ => Rc::new(Cell::new(false)),
            };
            (name.to_string(), value, Rc::new(Cell::new(0)))
        })
        .collect();

    let handle = MockRuntimeHandle {
        inputs,
        requested_machine: Rc::new(RefCell::new(None)),
        resizes: resizes.clone(),
        disposed: disposed.clone(),
    };
    let probe = HandleProbe {
        inactive,
        visible,
        resizes,
        disposed,
    };
    (Box::new(handle), probe)
}

// ---------------------------------------------------------------------------
// Runtime

/// Records every `begin_load` request instead of decoding anything; the test
/// drives completions itself through the manager's `finish_load`/`fail_load`.
pub struct MockRuntime {
    pending: Rc<RefCell<Vec<LoadRequest>>>,
    refuse: Rc<Cell<bool>>,
}

#[derive(Clone)]
pub struct RuntimeProbe {
    pending: Rc<RefCell<Vec<LoadRequest>>>,
    refuse: Rc<Cell<bool>>,
}

impl MockRuntime {
    pub fn new() -> (Box<dyn AnimationRuntime>, RuntimeProbe) {
        let pending = Rc::new(RefCell::new(Vec::new()));
        let refuse = Rc::new(Cell::new(false));
        let probe = RuntimeProbe {
            pending: pending.clone(),
            refuse: refuse.clone(),
        };
        (Box::new(MockRuntime { pending, refuse }), probe)
    }
}

impl AnimationRuntime for MockRuntime {
    fn begin_load(&mut self, request: LoadRequest) -> Result<(), RuntimeLoadError> {
        if self.refuse.get() {
            return Err(RuntimeLoadError("runtime refused the request".into()));
        }
        self.pending.borrow_mut().push(request);
        Ok(())
    }
}

impl RuntimeProbe {
    /// Requests accepted since the last call, in arrival order.
    pub fn take_pending(&self) -> Vec<LoadRequest> {
        std::mem::take(&mut *self.pending.borrow_mut())
    }

    pub fn pending_artboards(&self) -> Vec<String> {
        self.pending
            .borrow()
            .iter()
            .map(|r| r.artboard.clone())
            .collect()
    }

    /// Make the next `begin_load` calls fail synchronously.
    pub fn refuse_loads(&self, refuse: bool) {
        self.refuse.set(refuse);
    }
}

// ---------------------------------------------------------------------------
// Surfaces

/// Resolves `identity` to `stepper_icon_<identity>`, optionally restricted to
/// a known id list so tests can exercise the missing-surface path.
pub struct MockSurfaces {
    known: Option<Vec<String>>,
}

impl MockSurfaces {
    /// Every identity resolves.
    pub fn all() -> Box<dyn SurfaceProvider> {
        Box::new(Self { known: None })
    }

    /// Only the listed identities resolve.
    pub fn only(ids: &[&str]) -> Box<dyn SurfaceProvider> {
        Box::new(Self {
            known: Some(ids.iter().map(|s| s.to_string()).collect()),
        })
    }
}

impl SurfaceProvider for MockSurfaces {
    fn surface_for(&mut self, identity: &str) -> Option<SurfaceKey> {
        match &self.known {
            Some(known) if !known.iter().any(|k| k == identity) => None,
            _ => Some(format!("stepper_icon_{identity}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Resize observation

pub struct MockObserver {
    observed: Rc<RefCell<Vec<SurfaceKey>>>,
    disconnects: Rc<Cell<u32>>,
}

#[derive(Clone)]
pub struct ObserverProbe {
    observed: Rc<RefCell<Vec<SurfaceKey>>>,
    disconnects: Rc<Cell<u32>>,
}

impl MockObserver {
    pub fn new() -> (Box<dyn SurfaceObserver>, ObserverProbe) {
        let observed = Rc::new(RefCell::new(Vec::new()));
        let disconnects = Rc::new(Cell::new(0));
        let probe = ObserverProbe {
            observed: observed.clone(),
            disconnects: disconnects.clone(),
        };
        (
            Box::new(MockObserver {
                observed,
                disconnects,
            }),
            probe,
        )
    }
}

impl SurfaceObserver for MockObserver {
    fn observe(&mut self, surface: &SurfaceKey) {
        self.observed.borrow_mut().push(surface.clone());
    }

    fn unobserve(&mut self, surface: &SurfaceKey) {
        self.observed.borrow_mut().retain(|s| s != surface);
    }

    fn disconnect(&mut self) {
        self.observed.borrow_mut().clear();
        self.disconnects.set(self.disconnects.get() + 1);
    }
}

impl ObserverProbe {
    /// Surfaces currently under observation, in observe order.
    pub fn observed(&self) -> Vec<SurfaceKey> {
        self.observed.borrow().clone()
    }

    pub fn disconnect_count(&self) -> u32 {
        self.disconnects.get()
    }
}

// ---------------------------------------------------------------------------
// Assets

/// Serves `SAMPLE_ASSET` for every source, counting fetches.
pub struct StaticAssetFetcher {
    fetches: Rc<Cell<u32>>,
}

#[derive(Clone)]
pub struct FetcherProbe {
    fetches: Rc<Cell<u32>>,
}

impl StaticAssetFetcher {
    pub fn new() -> (Box<dyn AssetFetcher>, FetcherProbe) {
        let fetches = Rc::new(Cell::new(0));
        let probe = FetcherProbe {
            fetches: fetches.clone(),
        };
        (Box::new(StaticAssetFetcher { fetches }), probe)
    }
}

impl AssetFetcher for StaticAssetFetcher {
    fn fetch_bytes(&mut self, _src: &str) -> Result<Vec<u8>, AssetError> {
        self.fetches.set(self.fetches.get() + 1);
        Ok(SAMPLE_ASSET.clone())
    }
}

impl FetcherProbe {
    pub fn fetch_count(&self) -> u32 {
        self.fetches.get()
    }
}
