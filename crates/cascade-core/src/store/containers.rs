//! Thread-safe container store (type tag -> containers, insertion order).

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use super::lock;
use crate::domain::{Container, ContainerKind};

/// Multi-map of containers keyed by type tag.
///
/// Both reads and writes take the lock; `get` returns a snapshot.
#[derive(Debug, Default)]
pub struct ContainerStore {
    inner: Mutex<HashMap<String, Vec<Container>>>,
}

impl ContainerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `container` under its own type tag.
    pub fn store(&self, container: Container) {
        let mut guard = lock(&self.inner);
        guard
            .entry(container.type_tag().to_string())
            .or_default()
            .push(container);
    }

    /// Snapshot of every container stored under `type_tag` (empty if none).
    pub fn get(&self, type_tag: &str) -> Vec<Container> {
        lock(&self.inner).get(type_tag).cloned().unwrap_or_default()
    }

    pub fn store_typed<T: ContainerKind>(&self, value: T) {
        self.store(Container::new(value));
    }

    pub fn get_typed<T: ContainerKind>(&self) -> Vec<Arc<T>> {
        self.get(T::CONTAINER_TYPE)
            .iter()
            .filter_map(Container::downcast::<T>)
            .collect()
    }

    /// Number of containers per tag, sorted by tag.
    pub fn counts(&self) -> BTreeMap<String, usize> {
        lock(&self.inner)
            .iter()
            .map(|(tag, items)| (tag.clone(), items.len()))
            .collect()
    }

    pub fn type_tags(&self) -> Vec<String> {
        self.counts().into_keys().collect()
    }

    pub fn len(&self) -> usize {
        lock(&self.inner).values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
