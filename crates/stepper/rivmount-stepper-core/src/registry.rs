//! Insertion-ordered handle storage keyed by artboard identity.

use crate::error::StepperError;
use crate::handle::Handle;

/// The collection's handle store. A Vec keyed by identity: collections are
/// small (one handle per stepper icon) and broadcasts want deterministic
/// insertion-order iteration.
#[derive(Debug, Default)]
pub struct HandleRegistry {
    entries: Vec<Handle>,
}

impl HandleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a handle; an identity can be registered only once at a time.
    pub fn insert(&mut self, handle: Handle) -> Result<(), StepperError> {
        if self.contains(handle.identity()) {
            return Err(StepperError::AlreadyMounted(handle.identity().to_string()));
        }
        self.entries.push(handle);
        Ok(())
    }

    /// Remove and return the handle, or `None` if absent. Absence is benign.
    pub fn remove(&mut self, identity: &str) -> Option<Handle> {
        let idx = self.entries.iter().position(|h| h.identity() == identity)?;
        Some(self.entries.remove(idx))
    }

    pub fn get(&self, identity: &str) -> Option<&Handle> {
        self.entries.iter().find(|h| h.identity() == identity)
    }

    pub fn get_mut(&mut self, identity: &str) -> Option<&mut Handle> {
        self.entries.iter_mut().find(|h| h.identity() == identity)
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.get(identity).is_some()
    }

    /// Handles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Handle> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Handle> {
        self.entries.iter_mut()
    }

    pub fn identities(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|h| h.identity().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drain every handle in insertion order (manager teardown).
    pub fn drain(&mut self) -> Vec<Handle> {
        std::mem::take(&mut self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reserved(identity: &str) -> Handle {
        Handle::reserved(identity, format!("surface_{identity}"))
    }

    #[test]
    fn insert_remove_membership() {
        let mut reg = HandleRegistry::new();
        reg.insert(reserved("A")).unwrap();
        reg.insert(reserved("B")).unwrap();
        assert_eq!(reg.identities(), vec!["A", "B"]);

        let removed = reg.remove("A").unwrap();
        assert_eq!(removed.identity(), "A");
        assert_eq!(reg.identities(), vec!["B"]);
        assert!(reg.remove("A").is_none());
    }

    #[test]
    fn duplicate_insert_rejected() {
        let mut reg = HandleRegistry::new();
        reg.insert(reserved("A")).unwrap();
        let err = reg.insert(reserved("A")).unwrap_err();
        assert!(matches!(err, StepperError::AlreadyMounted(id) if id == "A"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn iteration_is_insertion_ordered() {
        let mut reg = HandleRegistry::new();
        for id in ["C", "A", "B"] {
            reg.insert(reserved(id)).unwrap();
        }
        let order: Vec<&str> = reg.iter().map(|h| h.identity()).collect();
        assert_eq!(order, vec!["C", "A", "B"]);
    }
}
