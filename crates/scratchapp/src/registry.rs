//! Tracks which scratch buffers are currently open in the host.
//!
//! The registry is never persisted. Each process starts with an empty one and
//! fills it as buffers are requested.

use crate::model::{BufferHandle, ScratchName};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct BufferRegistry {
    live: HashMap<ScratchName, BufferHandle>,
}

impl BufferRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_live(&self, name: &ScratchName) -> Option<BufferHandle> {
        self.live.get(name).cloned()
    }

    /// Register `handle` under `name`. A handle already tracked there is
    /// replaced and returned.
    pub fn track(&mut self, name: ScratchName, handle: BufferHandle) -> Option<BufferHandle> {
        self.live.insert(name, handle)
    }

    pub fn untrack(&mut self, name: &ScratchName) -> Option<BufferHandle> {
        self.live.remove(name)
    }

    /// Whether `handle` is still the buffer tracked under `name`.
    pub fn is_tracked(&self, name: &ScratchName, handle: &BufferHandle) -> bool {
        self.live
            .get(name)
            .is_some_and(|tracked| tracked.same(handle))
    }

    /// Snapshot of every live entry at call time.
    pub fn all_live(&self) -> Vec<(ScratchName, BufferHandle)> {
        self.live
            .iter()
            .map(|(name, handle)| (name.clone(), handle.clone()))
            .collect()
    }

    pub fn names(&self) -> Vec<ScratchName> {
        let mut names: Vec<_> = self.live.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModeId, ScratchBuffer};

    fn handle() -> BufferHandle {
        BufferHandle::new(ScratchBuffer::new(ModeId::fallback()))
    }

    fn name(s: &str) -> ScratchName {
        ScratchName::new(s).unwrap()
    }

    #[test]
    fn test_track_and_get() {
        let mut registry = BufferRegistry::new();
        let h = handle();
        registry.track(name("a"), h.clone());

        let live = registry.get_live(&name("a")).unwrap();
        assert!(live.same(&h));
        assert!(registry.get_live(&name("b")).is_none());
    }

    #[test]
    fn test_track_replaces() {
        let mut registry = BufferRegistry::new();
        let first = handle();
        let second = handle();
        registry.track(name("a"), first.clone());
        let replaced = registry.track(name("a"), second.clone()).unwrap();

        assert!(replaced.same(&first));
        assert!(registry.is_tracked(&name("a"), &second));
        assert!(!registry.is_tracked(&name("a"), &first));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_untrack_is_idempotent() {
        let mut registry = BufferRegistry::new();
        registry.track(name("a"), handle());
        assert!(registry.untrack(&name("a")).is_some());
        assert!(registry.untrack(&name("a")).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_snapshot_survives_removal() {
        let mut registry = BufferRegistry::new();
        registry.track(name("a"), handle());
        registry.track(name("b"), handle());

        let snapshot = registry.all_live();
        registry.untrack(&name("a"));

        assert_eq!(snapshot.len(), 2);
        let still_live: Vec<_> = snapshot
            .iter()
            .filter(|(n, h)| registry.is_tracked(n, h))
            .map(|(n, _)| n.clone())
            .collect();
        assert_eq!(still_live, vec![name("b")]);
    }

    #[test]
    fn test_names_sorted() {
        let mut registry = BufferRegistry::new();
        registry.track(name("zeta"), handle());
        registry.track(name("alpha"), handle());
        assert_eq!(registry.names(), vec![name("alpha"), name("zeta")]);
    }
}
