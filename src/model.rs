//! The map model behind the visualization: one canonical store of entries,
//! kept in insertion order, plus a bucket index routing keys by digit sum.
//!
//! Entries are owned exactly once, by the store. Buckets only hold keys, so
//! a value update never has to be mirrored anywhere.

use log::debug;
use serde::Serialize;

use crate::{
    error::InputError,
    hashing::{bucket_index, BuildKeyHasher, BUCKET_COUNT},
    linked_map::LinkedHashMap,
    Key,
};

/// Stable handle for a stored pair. Keys are unique, so the key is the
/// identity, and it survives a value update in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntryId(Key);

impl EntryId {
    pub fn key(self) -> Key {
        self.0
    }
}

impl From<Key> for EntryId {
    fn from(key: Key) -> Self {
        EntryId(key)
    }
}

/// One key/value pair and the bucket it lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    key: Key,
    value: String,
    bucket_index: usize,
}

impl Entry {
    pub fn key(&self) -> Key {
        self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Always equal to `bucket_index(self.key())`.
    pub fn bucket_index(&self) -> usize {
        self.bucket_index
    }

    pub fn id(&self) -> EntryId {
        EntryId(self.key)
    }
}

/// What a put did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PutOutcome {
    /// `true` if the key was already present and only its value changed.
    pub updated: bool,
    pub bucket_index: usize,
    pub entry: EntryId,
}

/// What a get found. `value` is `None` when the key is absent, which is never
/// confused with an empty value since empty values are rejected on put.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetOutcome {
    pub bucket_index: usize,
    pub value: Option<String>,
}

impl GetOutcome {
    pub fn found(&self) -> bool {
        self.value.is_some()
    }
}

/// What a remove did. The bucket index is routed from the key before the
/// entry is excised, so it is reported even when nothing was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveOutcome {
    pub found: bool,
    pub bucket_index: usize,
}

/// A bucket as the renderer sees it.
#[derive(Debug)]
pub struct BucketView<'a> {
    pub index: usize,
    pub entries: Vec<&'a Entry>,
}

/// A node of the linked-list view. `is_first` and `is_last` drive the
/// `null` previous/next display.
#[derive(Debug)]
pub struct ListNode<'a> {
    pub entry: &'a Entry,
    pub is_first: bool,
    pub is_last: bool,
}

/// Owned copy of everything needed to draw the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapSnapshot {
    pub buckets: Vec<BucketSnapshot>,
    pub order: Vec<NodeSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketSnapshot {
    pub index: usize,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSnapshot {
    #[serde(flatten)]
    pub entry: Entry,
    pub is_first: bool,
    pub is_last: bool,
}

/// A hash-table-backed map which remembers insertion order, laid out so
/// both its bucket array and its doubly linked list can be drawn.
pub struct VisualMap {
    store: LinkedHashMap<Key, Entry, BuildKeyHasher>,
    buckets: Vec<Vec<Key>>,
}

impl Default for VisualMap {
    fn default() -> Self {
        Self::new()
    }
}

impl VisualMap {
    pub fn new() -> Self {
        Self {
            store: LinkedHashMap::with_capacity_and_hash_builder(
                BUCKET_COUNT,
                BuildKeyHasher,
            ),
            buckets: vec![Vec::new(); BUCKET_COUNT],
        }
    }

    /// Inserts or updates the mapping for `key`. A new key lands at the end
    /// of its bucket and at the tail of the list; an existing key only has
    /// its value replaced.
    pub fn put(
        &mut self,
        key: Key,
        value: impl Into<String>,
    ) -> Result<PutOutcome, InputError> {
        let value = value.into();
        if value.is_empty() {
            return Err(InputError::MissingValue);
        }

        if let Some(entry) = self.store.get_mut(&key) {
            debug!("put({}) updating value in bucket {}", key, entry.bucket_index);
            entry.value = value;

            return Ok(PutOutcome {
                updated: true,
                bucket_index: entry.bucket_index,
                entry: EntryId(key),
            });
        }

        let bucket_index = bucket_index(key);
        debug!("put({}) inserting into bucket {}", key, bucket_index);

        self.buckets[bucket_index].push(key);
        self.store.insert(
            key,
            Entry {
                key,
                value,
                bucket_index,
            },
        );

        Ok(PutOutcome {
            updated: false,
            bucket_index,
            entry: EntryId(key),
        })
    }

    /// Looks the key up in the bucket it routes to.
    pub fn get(&self, key: Key) -> GetOutcome {
        let bucket_index = bucket_index(key);

        GetOutcome {
            bucket_index,
            value: self
                .find_in_bucket(bucket_index, key)
                .map(|e| e.value.clone()),
        }
    }

    /// Deletes the mapping for `key` from its bucket and from the list.
    pub fn remove(&mut self, key: Key) -> RemoveOutcome {
        let bucket_index = bucket_index(key);

        let found = match self.store.remove(&key) {
            Some(entry) => {
                debug_assert_eq!(bucket_index, entry.bucket_index);
                self.buckets[entry.bucket_index].retain(|k| *k != key);
                true
            }
            None => false,
        };

        debug!("remove({}) from bucket {}: found={}", key, bucket_index, found);

        RemoveOutcome {
            found,
            bucket_index,
        }
    }

    pub fn contains_key(&self, key: Key) -> bool {
        self.find_in_bucket(bucket_index(key), key).is_some()
    }

    /// Keys in insertion order. A snapshot, not a live view.
    pub fn key_set(&self) -> Vec<Key> {
        self.store.keys().collect()
    }

    /// Values in insertion order. A snapshot, not a live view.
    pub fn values(&self) -> Vec<String> {
        self.store.values().map(|e| e.value.clone()).collect()
    }

    /// Empties every bucket and the list.
    pub fn reset(&mut self) {
        self.store.clear();
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn entry(&self, key: Key) -> Option<&Entry> {
        self.store.get(&key)
    }

    /// Every bucket in index order, with the entries it holds in arrival
    /// order.
    pub fn buckets(&self) -> impl Iterator<Item = BucketView<'_>> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .map(move |(index, keys)| BucketView {
                index,
                entries: keys.iter().filter_map(|k| self.store.get(k)).collect(),
            })
    }

    /// The linked-list view, head first.
    pub fn linked_list(&self) -> impl Iterator<Item = ListNode<'_>> + '_ {
        let head = self.store.head();
        let tail = self.store.tail();

        self.store.iter().map(move |(key, entry)| ListNode {
            entry,
            is_first: Some(key) == head,
            is_last: Some(key) == tail,
        })
    }

    pub fn snapshot(&self) -> MapSnapshot {
        MapSnapshot {
            buckets: self
                .buckets()
                .map(|b| BucketSnapshot {
                    index: b.index,
                    entries: b.entries.into_iter().cloned().collect(),
                })
                .collect(),
            order: self
                .linked_list()
                .map(|n| NodeSnapshot {
                    entry: n.entry.clone(),
                    is_first: n.is_first,
                    is_last: n.is_last,
                })
                .collect(),
        }
    }

    /// Verifies the structural rules tying the buckets to the list: every
    /// entry sits in exactly the bucket its key routes to, keys are unique,
    /// and both views count the same entries.
    pub fn check_invariants(&self) -> Result<(), String> {
        let bucketed: usize = self.buckets.iter().map(Vec::len).sum();
        if bucketed != self.store.len() {
            return Err(format!(
                "{} entries in buckets but {} in the list",
                bucketed,
                self.store.len()
            ));
        }

        for (index, keys) in self.buckets.iter().enumerate() {
            for (pos, key) in keys.iter().enumerate() {
                if keys[..pos].contains(key) {
                    return Err(format!("key {} repeated in bucket {}", key, index));
                }

                let entry = self
                    .store
                    .get(key)
                    .ok_or_else(|| format!("bucket {} holds unknown key {}", index, key))?;

                if entry.bucket_index != index || bucket_index(*key) != index {
                    return Err(format!(
                        "key {} sits in bucket {} but routes to {}",
                        key,
                        index,
                        bucket_index(*key)
                    ));
                }
            }
        }

        Ok(())
    }

    fn find_in_bucket(&self, bucket_index: usize, key: Key) -> Option<&Entry> {
        self.buckets[bucket_index]
            .iter()
            .find(|k| **k == key)
            .and_then(|k| self.store.get(k))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{EntryId, VisualMap};
    use crate::{error::InputError, hashing::bucket_index};

    #[test]
    fn reference_scenario() {
        let mut map = VisualMap::new();

        let apple = map.put(19, "Apple").unwrap();
        assert!(!apple.updated);
        assert_eq!(0, apple.bucket_index);
        assert_eq!(EntryId::from(19), apple.entry);

        let dog = map.put(14, "Dog").unwrap();
        assert_eq!(5, dog.bucket_index);

        assert!(map.contains_key(19));
        assert!(!map.contains_key(20));
        assert_eq!(vec![19, 14], map.key_set());

        let removed = map.remove(19);
        assert!(removed.found);
        assert_eq!(0, removed.bucket_index);
        assert_eq!(vec![14], map.key_set());
        assert!(map.buckets().next().unwrap().entries.is_empty());
        map.check_invariants().unwrap();
    }

    #[test]
    fn update_keeps_order_position() {
        let mut map = VisualMap::new();

        map.put(10, "A").unwrap();
        map.put(11, "B").unwrap();
        let outcome = map.put(10, "C").unwrap();

        assert!(outcome.updated);
        assert_eq!(1, outcome.bucket_index);
        assert_eq!(vec![10, 11], map.key_set());
        assert_eq!(vec!["C".to_owned(), "B".to_owned()], map.values());
    }

    #[test]
    fn repeated_put_reports_update() {
        let mut map = VisualMap::new();

        map.put(13, "Fox").unwrap();
        let before = map.snapshot();
        assert!(map.put(13, "Fox").unwrap().updated);
        assert_eq!(before, map.snapshot());
    }

    #[test]
    fn remove_then_get_is_absent() {
        let mut map = VisualMap::new();

        map.put(12, "Cat").unwrap();
        assert_eq!(Some("Cat".to_owned()), map.get(12).value);
        map.remove(12);

        let outcome = map.get(12);
        assert!(!outcome.found());
        assert_eq!(3, outcome.bucket_index);
    }

    #[test]
    fn removing_absent_key_changes_nothing() {
        let mut map = VisualMap::new();

        map.put(15, "Grape").unwrap();
        let outcome = map.remove(24);

        assert!(!outcome.found);
        assert_eq!(6, outcome.bucket_index);
        assert_eq!(vec![15], map.key_set());
    }

    #[test]
    fn empty_value_is_rejected() {
        let mut map = VisualMap::new();

        assert_eq!(Err(InputError::MissingValue), map.put(10, ""));
        assert!(map.is_empty());

        map.put(10, "Apple").unwrap();
        assert_eq!(Err(InputError::MissingValue), map.put(10, String::new()));
        assert_eq!("Apple", map.entry(10).unwrap().value());
    }

    #[test]
    fn colliding_keys_share_a_bucket() {
        let mut map = VisualMap::new();

        // 1+8 == 2+7 == 9
        map.put(18, "Horse").unwrap();
        map.put(27, "Iguana").unwrap();
        map.put(10, "Apple").unwrap();

        let nine = map.buckets().nth(9).unwrap();
        assert_eq!(
            vec![18, 27],
            nine.entries.iter().map(|e| e.key()).collect::<Vec<_>>()
        );

        map.remove(18);
        assert_eq!(Some("Iguana".to_owned()), map.get(27).value);
        map.check_invariants().unwrap();
    }

    #[test]
    fn linked_list_marks_ends() {
        let mut map = VisualMap::new();
        assert_eq!(0, map.linked_list().count());

        map.put(16, "Jaguar").unwrap();
        let only = map.linked_list().collect::<Vec<_>>();
        assert!(only[0].is_first && only[0].is_last);

        map.put(17, "Elephant").unwrap();
        map.put(11, "Banana").unwrap();
        let flags = map
            .linked_list()
            .map(|n| (n.entry.key(), n.is_first, n.is_last))
            .collect::<Vec<_>>();
        assert_eq!(
            vec![(16, true, false), (17, false, false), (11, false, true)],
            flags
        );
    }

    #[test]
    fn reset_clears_everything() {
        let mut map = VisualMap::new();

        map.put(10, "Apple").unwrap();
        map.put(19, "Jaguar").unwrap();
        map.remove(10);
        map.reset();

        assert!(map.key_set().is_empty());
        assert!(map.values().is_empty());
        assert!(map.buckets().all(|b| b.entries.is_empty()));
        assert_eq!(10, map.buckets().count());
        map.check_invariants().unwrap();
    }

    #[derive(Debug, Clone)]
    enum Op {
        Put(i64, String),
        Remove(i64),
        Reset,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => (0i64..40, "[A-Z][a-z]{0,5}").prop_map(|(k, v)| Op::Put(k, v)),
            3 => (0i64..40).prop_map(Op::Remove),
            1 => Just(Op::Reset),
        ]
    }

    proptest! {
        #[test]
        fn hash_is_digit_sum_mod_ten(k in any::<i64>()) {
            let expected = k
                .unsigned_abs()
                .to_string()
                .chars()
                .map(|c| c.to_digit(10).unwrap() as usize)
                .sum::<usize>() % 10;

            prop_assert_eq!(expected, bucket_index(k));
        }

        #[test]
        fn put_then_get_round_trips(k in any::<i64>(), v in "[a-zA-Z ]{1,12}") {
            let mut map = VisualMap::new();
            map.put(k, v.clone()).unwrap();
            prop_assert_eq!(Some(v), map.get(k).value);
            prop_assert!(map.contains_key(k));
        }

        #[test]
        fn operations_preserve_invariants(ops in proptest::collection::vec(op_strategy(), 0..64)) {
            let mut map = VisualMap::new();
            // naive reference: insertion-ordered pairs
            let mut reference: Vec<(i64, String)> = Vec::new();

            for op in ops {
                match op {
                    Op::Put(k, v) => {
                        let outcome = map.put(k, v.clone()).unwrap();
                        match reference.iter_mut().find(|(rk, _)| *rk == k) {
                            Some(pair) => {
                                prop_assert!(outcome.updated);
                                pair.1 = v;
                            }
                            None => {
                                prop_assert!(!outcome.updated);
                                reference.push((k, v));
                            }
                        }
                    }
                    Op::Remove(k) => {
                        let outcome = map.remove(k);
                        let before = reference.len();
                        reference.retain(|(rk, _)| *rk != k);
                        prop_assert_eq!(before != reference.len(), outcome.found);
                    }
                    Op::Reset => {
                        map.reset();
                        reference.clear();
                    }
                }

                prop_assert!(map.check_invariants().is_ok());
            }

            prop_assert_eq!(
                reference.iter().map(|(k, _)| *k).collect::<Vec<_>>(),
                map.key_set()
            );
            prop_assert_eq!(
                reference.iter().map(|(_, v)| v.clone()).collect::<Vec<_>>(),
                map.values()
            );
        }
    }
}
