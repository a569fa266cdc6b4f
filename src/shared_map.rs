use parking_lot::RwLock;
use std::sync::Arc;

use crate::{
    error::InputError,
    model::{GetOutcome, MapSnapshot, PutOutcome, RemoveOutcome},
    operations::MapOperations,
    Key,
};

/// Wrapper for a map which is shareable across thread boundaries, e.g. a
/// render thread reading while an input thread mutates.
pub struct SharedMap<M>(Arc<RwLock<M>>)
where
    M: MapOperations;

impl<M> SharedMap<M>
where
    M: MapOperations,
{
    /// Wraps a map into a shared accessor, making it safe to move across
    /// thread boundaries.
    pub fn with_map(map: M) -> Self {
        Self(Arc::from(RwLock::from(map)))
    }

    /// Inserts or updates a pair.
    pub fn put(&self, key: Key, value: impl Into<String>) -> Result<PutOutcome, InputError> {
        self.0.write().put(key, value.into())
    }

    /// Looks a key up. The value is cloned out to keep the lock short.
    pub fn get(&self, key: Key) -> GetOutcome {
        self.0.read().get(key)
    }

    /// Removes a pair if it is present.
    pub fn remove(&self, key: Key) -> RemoveOutcome {
        self.0.write().remove(key)
    }

    pub fn contains_key(&self, key: Key) -> bool {
        self.0.read().contains_key(key)
    }

    pub fn key_set(&self) -> Vec<Key> {
        self.0.read().key_set()
    }

    pub fn values(&self) -> Vec<String> {
        self.0.read().values()
    }

    /// Clears the map.
    pub fn reset(&self) {
        self.0.write().reset()
    }

    /// The number of entries at present.
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    pub fn snapshot(&self) -> MapSnapshot {
        self.0.read().snapshot()
    }
}

impl<M> MapOperations for SharedMap<M>
where
    M: MapOperations,
{
    fn put(&mut self, key: Key, value: String) -> Result<PutOutcome, InputError> {
        SharedMap::put(self, key, value)
    }

    fn get(&self, key: Key) -> GetOutcome {
        SharedMap::get(self, key)
    }

    fn remove(&mut self, key: Key) -> RemoveOutcome {
        SharedMap::remove(self, key)
    }

    fn contains_key(&self, key: Key) -> bool {
        SharedMap::contains_key(self, key)
    }

    fn key_set(&self) -> Vec<Key> {
        SharedMap::key_set(self)
    }

    fn values(&self) -> Vec<String> {
        SharedMap::values(self)
    }

    fn reset(&mut self) {
        SharedMap::reset(self)
    }

    fn len(&self) -> usize {
        SharedMap::len(self)
    }

    fn snapshot(&self) -> MapSnapshot {
        SharedMap::snapshot(self)
    }
}

impl<M> Clone for SharedMap<M>
where
    M: MapOperations,
{
    fn clone(&self) -> Self {
        SharedMap(self.0.clone())
    }
}
