use std::borrow::Borrow;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::hash::Hash;
use std::num::NonZeroUsize;

use lru::LruCache;

/// Capacity-limited key/value store with least-recently-used eviction.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
/// use nguonc_cache::BoundedCache;
///
/// let mut cache = BoundedCache::new(NonZeroUsize::new(2).unwrap());
/// cache.set("a", 1);
/// cache.set("b", 2);
/// // Reading "a" makes "b" the least recently used entry.
/// assert_eq!(cache.get("a"), Some(&1));
/// assert_eq!(cache.set("c", 3), Some(("b", 2)));
/// assert!(cache.contains("a"));
/// ```
pub struct BoundedCache<K, V> {
    entries: LruCache<K, V>,
}

impl<K, V> BoundedCache<K, V>
where
    K: Hash + Eq,
{
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value for `key` and marks it as the most recently used.
    ///
    /// A miss has no side effects.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    /// Returns the value for `key` without touching its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.peek(key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains(key)
    }

    /// Inserts `value` as the most recently used entry, replacing any previous
    /// value for `key`.
    ///
    /// When the insert pushes the cache over capacity, exactly one entry (the
    /// least recently used) is evicted and handed back. Replacing the value of
    /// an existing key evicts nothing.
    pub fn set(&mut self, key: K, value: V) -> Option<(K, V)> {
        // `push` hands back the replaced pair too; only a different key was evicted.
        let displaced = self.entries.push(key, value)?;
        if self.entries.contains(&displaced.0) {
            return None;
        }
        tracing::trace!(capacity = self.capacity(), "Evicted least recently used cache entry");
        Some(displaced)
    }
}

impl<K, V> Debug for BoundedCache<K, V>
where
    K: Hash + Eq,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("BoundedCache")
            .field("capacity", &self.entries.cap())
            .field("len", &self.entries.len())
            .finish()
    }
}
