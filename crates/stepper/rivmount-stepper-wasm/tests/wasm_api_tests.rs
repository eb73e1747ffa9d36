#![cfg(target_arch = "wasm32")]

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use rivmount_stepper_wasm::RivmountStepper;

fn set_hook(hooks: &Object, name: &str, args: &str, body: &str) {
    Reflect::set(
        hooks,
        &JsValue::from_str(name),
        &Function::new_with_args(args, body),
    )
    .unwrap();
}

fn default_hooks() -> Object {
    let hooks = Object::new();
    set_hook(&hooks, "surfaceFor", "id", "return 'stepper_icon_' + id;");
    set_hook(&hooks, "beginLoad", "req", "return undefined;");
    set_hook(&hooks, "observe", "s", "");
    set_hook(&hooks, "unobserve", "s", "");
    set_hook(&hooks, "disconnect", "", "");
    hooks
}

fn stepper() -> RivmountStepper {
    RivmountStepper::new(JsValue::UNDEFINED, vec![1, 2, 3, 4], default_hooks().into()).unwrap()
}

fn loaded_js_handle() -> JsValue {
    let handle = Object::new();
    set_hook(&handle, "resizeToSurface", "", "");
    set_hook(&handle, "dispose", "", "");
    set_hook(
        &handle,
        "stateMachineInputs",
        "sm",
        "return [
            { name: 'Inactive', value: false, fire: function () {} },
            { name: 'Visible', value: false, fire: function () {} },
        ];",
    );
    handle.into()
}

#[wasm_bindgen_test]
fn constructor_rejects_missing_hooks() {
    let hooks = Object::new();
    set_hook(&hooks, "surfaceFor", "id", "return null;");
    // No beginLoad/observe/unobserve/disconnect.
    assert!(RivmountStepper::new(JsValue::UNDEFINED, vec![], hooks.into()).is_err());
}

#[wasm_bindgen_test]
fn mount_and_duplicate_mount() {
    let mut stepper = stepper();

    stepper.mount_artboard("About").unwrap();
    assert!(stepper.is_mounted("About"));
    assert!(!stepper.is_loaded("About"));
    assert!(stepper.mount_artboard("About").is_err());
}

#[wasm_bindgen_test]
fn load_completion_applies_desired_state() {
    let mut stepper = stepper();

    stepper.mount_artboard("About").unwrap();
    stepper.set_active("About");
    stepper.notify_loaded("About", loaded_js_handle()).unwrap();

    assert!(stepper.is_loaded("About"));
    assert_eq!(stepper.active(), Some("About".to_string()));
}

#[wasm_bindgen_test]
fn state_calls_never_throw_for_unknown_identities() {
    let mut stepper = stepper();
    stepper.set_active("Nowhere");
    stepper.set_visible("Nowhere");
    stepper.forget_visible();
    stepper.clean_up("Nowhere");
    stepper.surfaces_resized();
    assert_eq!(stepper.visible(), None);
}
