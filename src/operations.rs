use crate::{
    error::InputError,
    model::{GetOutcome, MapSnapshot, PutOutcome, RemoveOutcome, VisualMap},
    Key,
};

/// Describes what a visualizable map can do. Presentation code talks to this
/// rather than to [`VisualMap`] directly.
pub trait MapOperations {
    /// Insert a new pair at the tail, or replace the value of an existing key
    /// without moving it.
    fn put(&mut self, key: Key, value: String) -> Result<PutOutcome, InputError>;

    /// Look a key up without touching anything.
    fn get(&self, key: Key) -> GetOutcome;

    /// Drop a key from its bucket and from the list, if it is there.
    fn remove(&mut self, key: Key) -> RemoveOutcome;

    fn contains_key(&self, key: Key) -> bool;

    /// All keys, oldest first.
    fn key_set(&self) -> Vec<Key>;

    /// All values, oldest first.
    fn values(&self) -> Vec<String>;

    /// Empty the map entirely.
    fn reset(&mut self);

    /// The number of entries right now.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Everything a renderer needs, copied out.
    fn snapshot(&self) -> MapSnapshot;
}

impl MapOperations for VisualMap {
    fn put(&mut self, key: Key, value: String) -> Result<PutOutcome, InputError> {
        VisualMap::put(self, key, value)
    }

    fn get(&self, key: Key) -> GetOutcome {
        VisualMap::get(self, key)
    }

    fn remove(&mut self, key: Key) -> RemoveOutcome {
        VisualMap::remove(self, key)
    }

    fn contains_key(&self, key: Key) -> bool {
        VisualMap::contains_key(self, key)
    }

    fn key_set(&self) -> Vec<Key> {
        VisualMap::key_set(self)
    }

    fn values(&self) -> Vec<String> {
        VisualMap::values(self)
    }

    fn reset(&mut self) {
        VisualMap::reset(self)
    }

    fn len(&self) -> usize {
        VisualMap::len(self)
    }

    fn snapshot(&self) -> MapSnapshot {
        VisualMap::snapshot(self)
    }
}
