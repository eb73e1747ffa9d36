//! rivmount-stepper-wasm: JS host bindings for the stepper manager.
//!
//! The JS side supplies a hooks object of functions bridging to the real
//! runtime and DOM:
//!
//! ```text
//! {
//!   surfaceFor(identity) -> string | null,
//!   beginLoad({ bytes, surface, artboard, stateMachine, layout, autoplay }),
//!   observe(surface), unobserve(surface), disconnect(),
//! }
//! ```
//!
//! `beginLoad` starts the runtime's own asynchronous decode; when it
//! completes the host calls `notifyLoaded(identity, handle)` with a handle
//! object exposing `resizeToSurface()`, `dispose()`, and
//! `stateMachineInputs(name) -> [{ name, value, fire() }]`, or
//! `notifyLoadFailed(identity, message)` on the error path.

use js_sys::{Array, Function, Object, Reflect, Uint8Array};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use rivmount_api_core::{
    AnimationRuntime, AssetError, AssetFetcher, LoadRequest, RuntimeHandle, RuntimeLoadError,
    StateMachineInput, SurfaceKey, SurfaceObserver, SurfaceProvider,
};
use rivmount_stepper_core::{StepperConfig, StepperManager};

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn hook_fn(hooks: &Object, name: &str) -> Result<Function, JsError> {
    Reflect::get(hooks, &JsValue::from_str(name))
        .ok()
        .and_then(|v| v.dyn_into::<Function>().ok())
        .ok_or_else(|| JsError::new(&format!("hooks.{name} must be a function")))
}

// ---------------------------------------------------------------------------
// JS-backed capability implementations

struct JsRuntime {
    begin_load: Function,
}

impl AnimationRuntime for JsRuntime {
    fn begin_load(&mut self, request: LoadRequest) -> Result<(), RuntimeLoadError> {
        let fail = |what: &str| RuntimeLoadError(format!("beginLoad: {what}"));

        let payload = Object::new();
        let set = |key: &str, value: &JsValue| {
            Reflect::set(&payload, &JsValue::from_str(key), value)
                .map(|_| ())
                .map_err(|_| fail("payload construction failed"))
        };
        set("bytes", &Uint8Array::from(request.bytes.as_slice()).into())?;
        set("surface", &JsValue::from_str(&request.surface))?;
        set("artboard", &JsValue::from_str(&request.artboard))?;
        set("stateMachine", &JsValue::from_str(&request.state_machine))?;
        let layout =
            swb::to_value(&request.layout).map_err(|_| fail("layout serialization failed"))?;
        set("layout", &layout)?;
        set("autoplay", &JsValue::from_bool(request.autoplay))?;

        self.begin_load
            .call1(&JsValue::UNDEFINED, &payload)
            .map(|_| ())
            .map_err(|e| fail(&format!("{e:?}")))
    }
}

struct JsSurfaces {
    surface_for: Function,
}

impl SurfaceProvider for JsSurfaces {
    fn surface_for(&mut self, identity: &str) -> Option<SurfaceKey> {
        match self
            .surface_for
            .call1(&JsValue::UNDEFINED, &JsValue::from_str(identity))
        {
            Ok(v) if !jsvalue_is_undefined_or_null(&v) => v.as_string(),
            _ => None,
        }
    }
}

struct JsObserver {
    observe: Function,
    unobserve: Function,
    disconnect: Function,
}

impl SurfaceObserver for JsObserver {
    fn observe(&mut self, surface: &SurfaceKey) {
        let _ = self
            .observe
            .call1(&JsValue::UNDEFINED, &JsValue::from_str(surface));
    }

    fn unobserve(&mut self, surface: &SurfaceKey) {
        let _ = self
            .unobserve
            .call1(&JsValue::UNDEFINED, &JsValue::from_str(surface));
    }

    fn disconnect(&mut self) {
        let _ = self.disconnect.call0(&JsValue::UNDEFINED);
    }
}

/// The JS host fetched the asset before constructing the stepper, so the
/// "fetch" is just a copy of the bytes it handed over.
struct PrefetchedAsset {
    bytes: Vec<u8>,
}

impl AssetFetcher for PrefetchedAsset {
    fn fetch_bytes(&mut self, _src: &str) -> Result<Vec<u8>, AssetError> {
        Ok(self.bytes.clone())
    }
}

struct JsInput {
    obj: Object,
    name: String,
}

impl StateMachineInput for JsInput {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self) -> bool {
        Reflect::get(&self.obj, &JsValue::from_str("value"))
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    fn set(&mut self, value: bool) {
        let _ = Reflect::set(
            &self.obj,
            &JsValue::from_str("value"),
            &JsValue::from_bool(value),
        );
    }

    fn fire(&mut self) {
        if let Ok(f) = Reflect::get(&self.obj, &JsValue::from_str("fire")) {
            if let Ok(f) = f.dyn_into::<Function>() {
                let _ = f.call0(&self.obj);
            }
        }
    }
}

struct JsHandle {
    obj: Object,
}

impl JsHandle {
    fn call0(&self, name: &str) -> Option<JsValue> {
        let f = Reflect::get(&self.obj, &JsValue::from_str(name))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        f.call0(&self.obj).ok()
    }

    fn call1(&self, name: &str, arg: &JsValue) -> Option<JsValue> {
        let f = Reflect::get(&self.obj, &JsValue::from_str(name))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        f.call1(&self.obj, arg).ok()
    }
}

impl RuntimeHandle for JsHandle {
    fn resize_to_surface(&mut self) {
        self.call0("resizeToSurface");
    }

    fn state_machine_inputs(&mut self, state_machine: &str) -> Vec<Box<dyn StateMachineInput>> {
        // A malformed handle yields an empty list; the core then reports the
        // missing inputs instead of this adapter guessing.
        let Some(list) = self.call1("stateMachineInputs", &JsValue::from_str(state_machine)) else {
            return Vec::new();
        };
        let Ok(list) = list.dyn_into::<Array>() else {
            return Vec::new();
        };
        let mut inputs: Vec<Box<dyn StateMachineInput>> = Vec::new();
        for entry in list.iter() {
            let Ok(obj) = entry.dyn_into::<Object>() else {
                continue;
            };
            let name = Reflect::get(&obj, &JsValue::from_str("name"))
                .ok()
                .and_then(|v| v.as_string());
            if let Some(name) = name {
                inputs.push(Box::new(JsInput { obj, name }));
            }
        }
        inputs
    }

    fn dispose(&mut self) {
        self.call0("dispose");
    }
}

// ---------------------------------------------------------------------------
// Public wrapper

#[wasm_bindgen]
pub struct RivmountStepper {
    core: StepperManager,
}

#[wasm_bindgen]
impl RivmountStepper {
    /// Create a stepper manager. `config` is a JSON-compatible
    /// `StepperConfig` object or undefined/null for defaults; `asset_bytes`
    /// is the already-fetched binary asset; `hooks` is the capability object
    /// described in the crate docs.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config: JsValue,
        asset_bytes: Vec<u8>,
        hooks: JsValue,
    ) -> Result<RivmountStepper, JsError> {
        console_error_panic_hook::set_once();

        let cfg: StepperConfig = if jsvalue_is_undefined_or_null(&config) {
            StepperConfig::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let hooks: Object = hooks
            .dyn_into()
            .map_err(|_| JsError::new("hooks must be an object"))?;

        let runtime = JsRuntime {
            begin_load: hook_fn(&hooks, "beginLoad")?,
        };
        let surfaces = JsSurfaces {
            surface_for: hook_fn(&hooks, "surfaceFor")?,
        };
        let observer = JsObserver {
            observe: hook_fn(&hooks, "observe")?,
            unobserve: hook_fn(&hooks, "unobserve")?,
            disconnect: hook_fn(&hooks, "disconnect")?,
        };
        let fetcher = PrefetchedAsset { bytes: asset_bytes };

        Ok(RivmountStepper {
            core: StepperManager::new(
                cfg,
                Box::new(runtime),
                Box::new(surfaces),
                Box::new(observer),
                Box::new(fetcher),
            ),
        })
    }

    #[wasm_bindgen(js_name = mountArtboard)]
    pub fn mount_artboard(&mut self, identity: &str) -> Result<(), JsError> {
        self.core
            .mount_artboard(identity)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Completion callback for a load started by `beginLoad`.
    #[wasm_bindgen(js_name = notifyLoaded)]
    pub fn notify_loaded(&mut self, identity: &str, handle: JsValue) -> Result<(), JsError> {
        let obj: Object = handle
            .dyn_into()
            .map_err(|_| JsError::new("handle must be an object"))?;
        self.core
            .finish_load(identity, Box::new(JsHandle { obj }))
            .map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(js_name = notifyLoadFailed)]
    pub fn notify_load_failed(&mut self, identity: &str, message: &str) {
        self.core.fail_load(identity, message);
    }

    #[wasm_bindgen(js_name = cleanUp)]
    pub fn clean_up(&mut self, identity: &str) {
        self.core.clean_up(identity);
    }

    #[wasm_bindgen(js_name = setActive)]
    pub fn set_active(&mut self, identity: &str) {
        self.core.set_active(identity);
    }

    #[wasm_bindgen(js_name = setVisible)]
    pub fn set_visible(&mut self, identity: &str) {
        self.core.set_visible(identity);
    }

    #[wasm_bindgen(js_name = forgetVisible)]
    pub fn forget_visible(&mut self) {
        self.core.forget_visible();
    }

    /// ResizeObserver callback: the host reports "something changed".
    #[wasm_bindgen(js_name = surfacesResized)]
    pub fn surfaces_resized(&mut self) {
        self.core.surfaces_resized();
    }

    #[wasm_bindgen(js_name = tearDown)]
    pub fn tear_down(&mut self) {
        self.core.tear_down();
    }

    /// Lifecycle events accumulated since the last drain, as a JS array.
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> Result<JsValue, JsError> {
        swb::to_value(&self.core.drain_events())
            .map_err(|e| JsError::new(&format!("event serialization error: {e}")))
    }

    pub fn active(&self) -> Option<String> {
        self.core.active().map(str::to_string)
    }

    pub fn visible(&self) -> Option<String> {
        self.core.visible().map(str::to_string)
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self, identity: &str) -> bool {
        self.core.is_mounted(identity)
    }

    #[wasm_bindgen(js_name = isLoaded)]
    pub fn is_loaded(&self, identity: &str) -> bool {
        self.core.is_loaded(identity)
    }

    #[wasm_bindgen(js_name = mountedArtboards)]
    pub fn mounted_artboards(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.core.mounted_identities())
            .map_err(|e| JsError::new(&format!("serialization error: {e}")))
    }
}
