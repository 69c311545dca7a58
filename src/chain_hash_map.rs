//! ChainHashMap: the open-chained hash table layer.

use crate::hash_code::hash_code;
use core::fmt::{self, Debug, Display};
use slotmap::{DefaultKey, SlotMap};

/// Number of buckets a new table starts with.
pub const INITIAL_BUCKET_COUNT: usize = 10;
/// Load factor above which an insertion doubles the bucket array.
pub const REHASH_THRESHOLD: f64 = 0.7;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    hash: u32,
    next: Option<DefaultKey>,
}

/// A hash map resolving collisions by open chaining.
///
/// Entries live in a slot arena and are threaded into per-bucket chains
/// through their `next` links; each bucket holds the chain head. A fresh
/// insertion prepends at the head, so a forward scan of a chain observes
/// the newest entries first. Growth never reallocates entries: a rehash
/// doubles the bucket array and relinks the existing slots by their
/// stored hash codes.
///
/// Looking up an absent key is never an error: `get_or_default` returns
/// the value type's default and `get_or_insert` creates the entry.
pub struct ChainHashMap<K, V> {
    buckets: Vec<Option<DefaultKey>>,
    slots: SlotMap<DefaultKey, Entry<K, V>>,
}

impl<K, V> ChainHashMap<K, V>
where
    K: Eq + Display,
{
    /// Create an empty map with `INITIAL_BUCKET_COUNT` buckets.
    pub fn new() -> Self {
        Self {
            buckets: vec![None; INITIAL_BUCKET_COUNT],
            slots: SlotMap::with_key(),
        }
    }

    /// Number of live entries; always the sum of all chain lengths.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current bucket count. Starts at `INITIAL_BUCKET_COUNT`, doubles on
    /// growth, never shrinks.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn bucket_of(&self, hash: u32) -> usize {
        hash as usize % self.buckets.len()
    }

    // Walk one chain head-to-tail looking for `key`.
    fn find_in_chain(&self, bucket: usize, key: &K) -> Option<DefaultKey> {
        let mut cur = self.buckets[bucket];
        while let Some(k) = cur {
            let e = &self.slots[k];
            if e.key == *key {
                return Some(k);
            }
            cur = e.next;
        }
        None
    }

    fn find(&self, key: &K) -> Option<DefaultKey> {
        let bucket = self.bucket_of(hash_code(key));
        self.find_in_chain(bucket, key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|k| &self.slots[k].value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let k = self.find(key)?;
        Some(&mut self.slots[k].value)
    }

    /// Value for `key`, or the value type's default when absent. Never
    /// mutates the map; the probing counterpart of `get_or_insert`.
    pub fn get_or_default(&self, key: &K) -> V
    where
        V: Default + Clone,
    {
        self.get(key).cloned().unwrap_or_default()
    }

    /// Mutable reference to the value for `key`, creating a default-valued
    /// entry first when absent (auto-vivification: reading a missing key
    /// through this path inserts it). A fresh insertion here is subject to
    /// the same load-factor check as `insert`; the returned reference is
    /// unaffected because growth relinks slots without moving them.
    pub fn get_or_insert(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let hash = hash_code(&key);
        let bucket = self.bucket_of(hash);
        let k = match self.find_in_chain(bucket, &key) {
            Some(k) => k,
            None => {
                let k = self.prepend(bucket, key, V::default(), hash);
                self.grow_if_overloaded();
                k
            }
        };
        &mut self.slots[k].value
    }

    /// Associate `value` with `key`. Overwrites in place when the key is
    /// already present, returning the previous value; otherwise prepends a
    /// new entry at the head of the key's chain and returns `None`. After
    /// a fresh insertion, a load factor strictly above `REHASH_THRESHOLD`
    /// triggers an immediate rehash. Never fails.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = hash_code(&key);
        let bucket = self.bucket_of(hash);
        if let Some(k) = self.find_in_chain(bucket, &key) {
            return Some(core::mem::replace(&mut self.slots[k].value, value));
        }
        self.prepend(bucket, key, value, hash);
        self.grow_if_overloaded();
        None
    }

    fn prepend(&mut self, bucket: usize, key: K, value: V, hash: u32) -> DefaultKey {
        let head = self.buckets[bucket];
        let k = self.slots.insert(Entry {
            key,
            value,
            hash,
            next: head,
        });
        self.buckets[bucket] = Some(k);
        k
    }

    fn grow_if_overloaded(&mut self) {
        if self.slots.len() as f64 / self.buckets.len() as f64 > REHASH_THRESHOLD {
            self.grow();
        }
    }

    // Double the bucket array and relink every slot by its stored hash,
    // walking old buckets in ascending order and each chain head-to-tail.
    // Prepending into the new buckets reverses relative order for entries
    // that land in the same new bucket; order across a rehash is not
    // part of the contract. Key code (`Display`/`Eq`) never runs here.
    fn grow(&mut self) {
        let doubled = self.buckets.len() * 2;
        let old_buckets = core::mem::replace(&mut self.buckets, vec![None; doubled]);
        for head in old_buckets {
            let mut cur = head;
            while let Some(k) = cur {
                cur = self.slots[k].next;
                let bucket = self.bucket_of(self.slots[k].hash);
                self.slots[k].next = self.buckets[bucket];
                self.buckets[bucket] = Some(k);
            }
        }
    }

    /// Remove `key`'s entry and return its value; no-op on a missing key.
    /// Removal never shrinks the bucket array.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let bucket = self.bucket_of(hash_code(key));
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.buckets[bucket];
        while let Some(k) = cur {
            if self.slots[k].key == *key {
                let next = self.slots[k].next;
                match prev {
                    None => self.buckets[bucket] = next,
                    Some(p) => self.slots[p].next = next,
                }
                return self.slots.remove(k).map(|e| e.value);
            }
            prev = Some(k);
            cur = self.slots[k].next;
        }
        None
    }

    /// Drop every entry, keeping the current bucket count.
    pub fn clear(&mut self) {
        self.slots.clear();
        for head in &mut self.buckets {
            *head = None;
        }
    }

    /// Iterate entries in ascending bucket order, head-to-tail within each
    /// chain. The order is a deterministic function of insertion history
    /// and the current bucket count, but it is not sorted and not stable
    /// across a rehash. The iterator is lazy and restartable.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: &self.buckets,
            slots: &self.slots,
            next_bucket: 0,
            cur: None,
        }
    }

    /// Snapshot of all keys in iteration order. Keys are unique.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    /// Snapshot of all values in iteration order. May contain duplicates.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    /// Structural, layout-sensitive equality: both maps must have the same
    /// entry count, the same bucket count, and pairwise-identical chains
    /// (key, value and position) in every bucket. Two maps holding the
    /// same pairs but grown through different histories can legitimately
    /// compare unequal; content-style equality belongs to the set layer.
    pub fn structural_eq(&self, other: &Self) -> bool
    where
        V: PartialEq,
    {
        if self.len() != other.len() || self.bucket_count() != other.bucket_count() {
            return false;
        }
        for bucket in 0..self.buckets.len() {
            let mut a = self.buckets[bucket];
            let mut b = other.buckets[bucket];
            loop {
                match (a, b) {
                    (None, None) => break,
                    (Some(x), Some(y)) => {
                        let ea = &self.slots[x];
                        let eb = &other.slots[y];
                        if ea.key != eb.key || ea.value != eb.value {
                            return false;
                        }
                        a = ea.next;
                        b = eb.next;
                    }
                    _ => return false,
                }
            }
        }
        true
    }
}

impl<K, V> Default for ChainHashMap<K, V>
where
    K: Eq + Display,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Deep copy: same bucket count as the source, each chain reproduced in
/// its exact head-to-tail traversal order by appending behind a tail key
/// while walking the source. Replaying `insert` instead would reverse
/// every chain and break `structural_eq` between original and copy.
impl<K, V> Clone for ChainHashMap<K, V>
where
    K: Eq + Display + Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        let mut slots = SlotMap::with_key();
        let mut buckets: Vec<Option<DefaultKey>> = vec![None; self.buckets.len()];
        for (bucket, head) in self.buckets.iter().enumerate() {
            let mut tail: Option<DefaultKey> = None;
            let mut cur = *head;
            while let Some(k) = cur {
                let e = &self.slots[k];
                let nk = slots.insert(Entry {
                    key: e.key.clone(),
                    value: e.value.clone(),
                    hash: e.hash,
                    next: None,
                });
                match tail {
                    None => buckets[bucket] = Some(nk),
                    Some(t) => slots[t].next = Some(nk),
                }
                tail = Some(nk);
                cur = e.next;
            }
        }
        Self { buckets, slots }
    }
}

impl<K, V> PartialEq for ChainHashMap<K, V>
where
    K: Eq + Display,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.structural_eq(other)
    }
}

impl<K, V> Eq for ChainHashMap<K, V>
where
    K: Eq + Display,
    V: Eq,
{
}

/// Renders as `{k1: v1, k2: v2}` in iteration order.
impl<K, V> Display for ChainHashMap<K, V>
where
    K: Eq + Display,
    V: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        let mut first = true;
        for (k, v) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{k}: {v}")?;
        }
        f.write_str("}")
    }
}

impl<K, V> Debug for ChainHashMap<K, V>
where
    K: Eq + Display + Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Extend<(K, V)> for ChainHashMap<K, V>
where
    K: Eq + Display,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ChainHashMap<K, V>
where
    K: Eq + Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

/// Immutable entry iterator returned by [`ChainHashMap::iter`].
pub struct Iter<'a, K, V> {
    buckets: &'a [Option<DefaultKey>],
    slots: &'a SlotMap<DefaultKey, Entry<K, V>>,
    next_bucket: usize,
    cur: Option<DefaultKey>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(k) = self.cur {
                let e = &self.slots[k];
                self.cur = e.next;
                return Some((&e.key, &e.value));
            }
            if self.next_bucket >= self.buckets.len() {
                return None;
            }
            self.cur = self.buckets[self.next_bucket];
            self.next_bucket += 1;
        }
    }
}

impl<'a, K, V> IntoIterator for &'a ChainHashMap<K, V>
where
    K: Eq + Display,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
