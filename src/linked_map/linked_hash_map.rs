use super::LinkedMapNode;
use std::{
    collections::{hash_map::RandomState, HashMap},
    hash::{BuildHasher, Hash},
};

/// A layer on top of [`HashMap`] that internally links nodes together
/// so they can be iterated over in insertion order. New keys go on the
/// tail; overwriting an existing key leaves its position alone.
pub struct LinkedHashMap<K, V, S = RandomState>
where
    K: Eq + Hash + Copy,
    S: BuildHasher,
{
    interior_map: HashMap<K, LinkedMapNode<K, V>, S>,
    head: Option<K>,
    tail: Option<K>,
}

pub struct LinkedHashMapIter<'a, K, V, S>
where
    K: Eq + Hash + Copy,
    S: BuildHasher,
{
    idx: Option<K>,
    inner_map: &'a LinkedHashMap<K, V, S>,
}

pub struct ReverseLinkedHashMapIter<'z, K, V, S>
where
    K: Eq + Hash + Copy,
    S: BuildHasher,
{
    idx: Option<K>,
    inner_map: &'z LinkedHashMap<K, V, S>,
}

impl<K, V> LinkedHashMap<K, V, RandomState>
where
    K: Eq + Hash + Copy,
{
    #[allow(unused)] // just leaving this here for completeness' sake
    pub fn with_capacity(capacity: usize) -> Self {
        LinkedHashMap::with_capacity_and_hash_builder(
            capacity,
            Default::default(),
        )
    }
}

impl<K, V, S> LinkedHashMap<K, V, S>
where
    K: Eq + Hash + Copy,
    S: BuildHasher,
{
    pub fn with_capacity_and_hash_builder(
        capacity: usize,
        hash_builder: S,
    ) -> Self {
        Self {
            interior_map: HashMap::with_capacity_and_hasher(
                capacity,
                hash_builder,
            ),
            head: None,
            tail: None,
        }
    }

    /// Walks the map from head to tail.
    pub fn iter(&self) -> LinkedHashMapIter<'_, K, V, S> {
        LinkedHashMapIter {
            idx: self.head,
            inner_map: self,
        }
    }

    /// Walks the map from tail to head.
    pub fn reverse_iter(
        &self,
    ) -> ReverseLinkedHashMapIter<'_, K, V, S> {
        ReverseLinkedHashMapIter {
            idx: self.tail,
            inner_map: self,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Inserts a value at the key, returning the previous value at that
    /// key. An absent key is appended to the tail; a present key has its
    /// value swapped out and keeps its place in the chain.
    pub fn insert(&mut self, k: K, v: V) -> Option<V> {
        #[cfg(test)]
        let original_size = self.len();

        if let Some(node) = self.interior_map.get_mut(&k) {
            let previous = std::mem::replace(&mut node.value, v);

            #[cfg(test)]
            {
                assert_eq!(original_size, self.len());
                self.continuity_test();
            }

            return Some(previous);
        }

        // reconfigure previous tail node
        if let Some(k_tail) = self.tail {
            if let Some(tail_node) = self.interior_map.get_mut(&k_tail)
            {
                tail_node.right = Some(k);
            }
        }

        // insert new node
        let node = LinkedMapNode {
            left: self.tail,
            value: v,
            right: None,
        };

        self.interior_map.insert(k, node);
        self.tail = Some(k);

        if self.head.is_none() {
            self.head = Some(k);
        }

        #[cfg(test)]
        {
            assert_eq!(original_size + 1, self.len());
            assert!(self.head.is_some());
            assert!(self.tail.is_some());
            self.continuity_test();
        }

        None
    }

    pub fn contains_key(&self, k: &K) -> bool {
        self.interior_map.contains_key(k)
    }

    pub fn get(&self, k: &K) -> Option<&V> {
        self.interior_map.get(k).map(|n| &n.value)
    }

    /// The full node, links included.
    pub fn node(&self, k: &K) -> Option<&LinkedMapNode<K, V>> {
        self.interior_map.get(k)
    }

    pub fn get_mut(&mut self, k: &K) -> Option<&mut V> {
        self.interior_map.get_mut(k).map(|n| &mut n.value)
    }

    pub fn remove(&mut self, k: &K) -> Option<V> {
        #[cfg(test)]
        let original_len = self.len();

        if let Some(removed_node) = self.interior_map.remove(k) {
            // link the nodes on either side together
            if let Some(left_k) = removed_node.left {
                if let Some(left_node) =
                    self.interior_map.get_mut(&left_k)
                {
                    left_node.right = removed_node.right;
                }
            }

            if let Some(right_k) = removed_node.right {
                if let Some(right_node) =
                    self.interior_map.get_mut(&right_k)
                {
                    right_node.left = removed_node.left;
                }
            }

            // link the head to the new head, if applicable
            if Some(*k) == self.head {
                self.head = removed_node.right;
            }

            // link the tail to the new tail, if applicable
            if Some(*k) == self.tail {
                self.tail = removed_node.left;
            }

            #[cfg(test)]
            {
                assert_eq!(original_len - 1, self.len());

                if self.len() > 0 {
                    assert!(self.head.is_some());
                    assert!(self.tail.is_some());
                }

                self.continuity_test();
            }

            Some(removed_node.value)
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.interior_map.clear();
        self.head = None;
        self.tail = None;

        #[cfg(test)]
        {
            assert_eq!(0, self.len());
            self.continuity_test();
        }
    }

    pub fn len(&self) -> usize {
        self.interior_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interior_map.is_empty()
    }

    /// The oldest key still in the map.
    pub fn head(&self) -> Option<K> {
        self.head
    }

    /// The most recently appended key.
    pub fn tail(&self) -> Option<K> {
        self.tail
    }

    #[cfg(test)]
    fn continuity_test(&self) {
        let mut count = 0;

        // iterate through the list and make sure it matches the number
        // of elements in the map
        for _item in self.iter() {
            count += 1;
            assert!(count <= self.len());
        }

        assert_eq!(self.len(), count);
        count = 0;

        // iterate through the list in reverse and make sure it matches
        // the number of elements in the map
        for _item in self.reverse_iter() {
            count += 1;
            assert!(count <= self.len());
        }

        assert_eq!(self.len(), count);
    }
}

impl<'a, K, V, S> Iterator for LinkedHashMapIter<'a, K, V, S>
where
    K: Eq + Hash + Copy,
    S: BuildHasher,
{
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(k) = self.idx {
            if let Some(node) = self.inner_map.interior_map.get(&k) {
                self.idx = node.right;
                return Some((k, &node.value));
            }
        }

        None
    }
}

impl<'z, K, V, S> Iterator for ReverseLinkedHashMapIter<'z, K, V, S>
where
    K: Eq + Hash + Copy,
    S: BuildHasher,
{
    type Item = (K, &'z V);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(k) = self.idx {
            if let Some(node) = self.inner_map.interior_map.get(&k) {
                self.idx = node.left;
                return Some((k, &node.value));
            }
        }

        None
    }
}
