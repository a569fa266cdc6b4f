pub mod linked_hash_map;

pub use linked_hash_map::{LinkedHashMap, LinkedHashMapIter, ReverseLinkedHashMapIter};

/// A stored value together with the keys of its neighbours in insertion
/// order. `None` on the left means this is the head, `None` on the right
/// means this is the tail.
#[derive(Debug, PartialEq)]
pub struct LinkedMapNode<K, V> {
    left: Option<K>,
    value: V,
    right: Option<K>,
}

impl<K, V> LinkedMapNode<K, V>
where
    K: Copy,
{
    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn left(&self) -> Option<K> {
        self.left
    }

    pub fn right(&self) -> Option<K> {
        self.right
    }
}
