//! Resize observation shared by one handle collection.

use rivmount_api_core::{SurfaceKey, SurfaceObserver};

/// Wraps the host's observation primitive and tracks which surfaces are
/// currently observed, so observe/unobserve stay balanced as handles come and
/// go. The coordinator never owns handles; the manager broadcasts resizes.
pub struct ResizeCoordinator {
    observer: Box<dyn SurfaceObserver>,
    observed: Vec<SurfaceKey>,
}

impl ResizeCoordinator {
    pub fn new(observer: Box<dyn SurfaceObserver>) -> Self {
        Self {
            observer,
            observed: Vec::new(),
        }
    }

    pub fn observe(&mut self, surface: &SurfaceKey) {
        if self.observed.contains(surface) {
            return;
        }
        self.observer.observe(surface);
        self.observed.push(surface.clone());
    }

    pub fn unobserve(&mut self, surface: &SurfaceKey) {
        if let Some(idx) = self.observed.iter().position(|s| s == surface) {
            self.observed.remove(idx);
            self.observer.unobserve(surface);
        }
    }

    /// Release every observation. Terminal: used at manager teardown.
    pub fn disconnect(&mut self) {
        self.observed.clear();
        self.observer.disconnect();
    }

    pub fn is_observing(&self, surface: &SurfaceKey) -> bool {
        self.observed.contains(surface)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder {
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl SurfaceObserver for Recorder {
        fn observe(&mut self, surface: &SurfaceKey) {
            self.calls.borrow_mut().push(format!("observe {surface}"));
        }

        fn unobserve(&mut self, surface: &SurfaceKey) {
            self.calls.borrow_mut().push(format!("unobserve {surface}"));
        }

        fn disconnect(&mut self) {
            self.calls.borrow_mut().push("disconnect".into());
        }
    }

    #[test]
    fn observe_is_deduplicated() {
        let recorder = Recorder::default();
        let mut coord = ResizeCoordinator::new(Box::new(recorder.clone()));

        let surface = "s1".to_string();
        coord.observe(&surface);
        coord.observe(&surface);
        assert!(coord.is_observing(&surface));
        assert_eq!(coord.observed_count(), 1);
        assert_eq!(*recorder.calls.borrow(), vec!["observe s1"]);
    }

    #[test]
    fn unobserve_only_forwards_for_observed_surfaces() {
        let recorder = Recorder::default();
        let mut coord = ResizeCoordinator::new(Box::new(recorder.clone()));

        let s1 = "s1".to_string();
        let s2 = "s2".to_string();
        coord.observe(&s1);
        coord.unobserve(&s2);
        coord.unobserve(&s1);
        assert!(!coord.is_observing(&s1));
        assert_eq!(*recorder.calls.borrow(), vec!["observe s1", "unobserve s1"]);
    }

    #[test]
    fn disconnect_clears_everything() {
        let recorder = Recorder::default();
        let mut coord = ResizeCoordinator::new(Box::new(recorder.clone()));

        coord.observe(&"s1".to_string());
        coord.observe(&"s2".to_string());
        coord.disconnect();
        assert_eq!(coord.observed_count(), 0);
        assert_eq!(
            *recorder.calls.borrow(),
            vec!["observe s1", "observe s2", "disconnect"]
        );
    }
}
