use rivmount_stepper_core::{StepperConfig, StepperManager};
use rivmount_test_fixtures::{
    loaded_handle, HandleProbe, MockObserver, MockRuntime, MockSurfaces, ObserverProbe,
    StaticAssetFetcher,
};

fn rig() -> (StepperManager, ObserverProbe) {
    let (runtime, _rt) = MockRuntime::new();
    let (observer, observer_probe) = MockObserver::new();
    let (fetcher, _fetch) = StaticAssetFetcher::new();
    let cfg = StepperConfig {
        asset_src: "done-button.riv".into(),
        ..StepperConfig::default()
    };
    let manager = StepperManager::new(cfg, runtime, MockSurfaces::all(), observer, fetcher);
    (manager, observer_probe)
}

fn complete_load(mgr: &mut StepperManager, identity: &str) -> HandleProbe {
    let (handle, probe) = loaded_handle();
    mgr.finish_load(identity, handle).unwrap();
    probe
}

#[test]
fn load_completion_observes_the_surface_and_resizes_once() {
    let (mut mgr, obs) = rig();

    mgr.mount_artboard("About").unwrap();
    assert!(obs.observed().is_empty());

    let probe = complete_load(&mut mgr, "About");
    assert_eq!(obs.observed(), vec!["stepper_icon_About"]);
    assert_eq!(probe.resize_count(), 1);
}

#[test]
fn resize_broadcast_reaches_only_loaded_handles() {
    let (mut mgr, _obs) = rig();

    for id in ["A", "B", "C"] {
        mgr.mount_artboard(id).unwrap();
    }
    let a = complete_load(&mut mgr, "A");
    let b = complete_load(&mut mgr, "B");

    mgr.surfaces_resized();
    assert_eq!(a.resize_count(), 2);
    assert_eq!(b.resize_count(), 2);

    // C loads later: its initial resize arrives with the load, and the next
    // broadcast includes it.
    let c = complete_load(&mut mgr, "C");
    assert_eq!(c.resize_count(), 1);

    mgr.surfaces_resized();
    assert_eq!(a.resize_count(), 3);
    assert_eq!(b.resize_count(), 3);
    assert_eq!(c.resize_count(), 2);
}

#[test]
fn clean_up_stops_observation_for_exactly_that_surface() {
    let (mut mgr, obs) = rig();

    mgr.mount_artboard("A").unwrap();
    mgr.mount_artboard("B").unwrap();
    complete_load(&mut mgr, "A");
    complete_load(&mut mgr, "B");
    assert_eq!(obs.observed(), vec!["stepper_icon_A", "stepper_icon_B"]);

    mgr.clean_up("A");
    assert_eq!(obs.observed(), vec!["stepper_icon_B"]);
}

#[test]
fn resize_broadcast_with_no_loaded_handles_is_harmless() {
    let (mut mgr, _obs) = rig();
    mgr.surfaces_resized();

    mgr.mount_artboard("A").unwrap();
    mgr.surfaces_resized();
    assert!(!mgr.is_loaded("A"));
}
