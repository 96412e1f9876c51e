use core::fmt::Debug;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ops::Index;

pub use crate::bucket_table::IntoIter;
pub use crate::bucket_table::Iter;
pub use crate::bucket_table::IterMut;
use crate::bucket_table::BucketTable;
use crate::bucket_table::MAX_CAPACITY;
use crate::error::OutOfRange;
use crate::hash::DefaultHashPair;
use crate::hash::HashCapability;
use crate::policy::Cuckoo;
use crate::policy::Linear;
use crate::policy::Policy;
use crate::policy::Quadratic;
use crate::policy::RobinHood;

/// [`HashMap`] with linear probing and backward-shift deletion.
pub type LinearHashMap<K, V, H = DefaultHashPair> = HashMap<K, V, Linear, H>;

/// [`HashMap`] with quadratic probing and tombstone deletion.
pub type QuadraticHashMap<K, V, H = DefaultHashPair> = HashMap<K, V, Quadratic, H>;

/// [`HashMap`] with Robin Hood hashing.
pub type RobinHoodHashMap<K, V, H = DefaultHashPair> = HashMap<K, V, RobinHood, H>;

/// [`HashMap`] with two-choice cuckoo hashing.
pub type CuckooHashMap<K, V, H = DefaultHashPair> = HashMap<K, V, Cuckoo, H>;

/// An open-addressing hash map whose collision resolution is picked by the
/// policy `P`.
///
/// Every entry lives directly in one [`BucketTable`] next to its 31-bit
/// tag; there is no per-entry allocation and no side storage. Vacant buckets
/// hold `K::default()` and `V::default()`, which is why most operations
/// require both to implement [`Default`].
///
/// Keys are hashed through the [`HashCapability`] `H`, by default a
/// [`HashPair`](crate::HashPair) of two randomly seeded builders.
///
/// # Performance Characteristics
///
/// - **Memory**: 4 bytes per slot for the tag plus the size of `K` and `V`.
///   Robin Hood tables carry 128 extra slots past the home slots.
/// - **Load**: the table grows once more than 51% of its slots have been
///   touched since the last rehash. Tombstones left by the quadratic policy
///   count toward that limit.
///
/// Unlike `std::collections::HashMap`, [`insert`](Self::insert) never
/// overwrites the value of a key that is already present.
///
/// # Examples
///
/// ```rust
/// use probe_hash::RobinHoodHashMap;
///
/// let mut map: RobinHoodHashMap<u64, &str> = RobinHoodHashMap::new();
/// map.insert(1, "one");
/// map.insert(2, "two");
///
/// assert_eq!(map.get(&1), Some(&"one"));
/// assert_eq!(map.erase(&2), 1);
/// assert_eq!(map.len(), 1);
/// ```
pub struct HashMap<K, V, P, H = DefaultHashPair> {
    table: BucketTable<K, V>,
    hasher: H,
    _policy: PhantomData<P>,
}

impl<K, V, P, H> Clone for HashMap<K, V, P, H>
where
    K: Clone,
    V: Clone,
    H: Clone,
{
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            hasher: self.hasher.clone(),
            _policy: PhantomData,
        }
    }
}

impl<K, V, P, H> Debug for HashMap<K, V, P, H>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, P, H> HashMap<K, V, P, H> {
    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::LinearHashMap;
    ///
    /// let mut map: LinearHashMap<u32, u32> = LinearHashMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.insert(1, 10);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the current number of home slots.
    ///
    /// This is always a power of two. The map holds at most 51% of it before
    /// the next insertion grows the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::QuadraticHashMap;
    ///
    /// let map: QuadraticHashMap<u32, u32> = QuadraticHashMap::with_capacity(100);
    /// assert_eq!(map.capacity(), 512);
    /// ```
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the largest number of home slots any map can grow to.
    pub fn max_capacity(&self) -> usize {
        MAX_CAPACITY
    }

    /// Returns a reference to the map's hash capability.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashCapability;
    /// use probe_hash::HashPair;
    /// use probe_hash::RobinHoodHashMap;
    /// use probe_hash::hash::Fmix64;
    /// use probe_hash::hash::WangMix;
    ///
    /// let map: RobinHoodHashMap<u64, u64, _> = RobinHoodHashMap::with_hasher(HashPair::new(Fmix64, WangMix));
    /// let home = map.hasher().primary(&7u64) as usize & (map.capacity() - 1);
    /// assert!(home < map.capacity());
    /// ```
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Returns the underlying bucket table.
    pub fn table(&self) -> &BucketTable<K, V> {
        &self.table
    }

    /// Returns an iterator over the key-value pairs of the map, in slot
    /// order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::CuckooHashMap;
    ///
    /// let mut map: CuckooHashMap<u32, u32> = CuckooHashMap::new();
    /// map.insert(1, 10);
    /// map.insert(2, 20);
    ///
    /// let mut pairs: Vec<_> = map.iter().collect();
    /// pairs.sort();
    /// assert_eq!(pairs, [(&1, &10), (&2, &20)]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.table.iter()
    }

    /// Returns an iterator over the key-value pairs of the map with mutable
    /// references to the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.table.iter_mut()
    }

    /// Returns an iterator over the keys of the map.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the map.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over mutable references to the values of the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::LinearHashMap;
    ///
    /// let mut map: LinearHashMap<u32, u32> = (0..4).map(|k| (k, k)).collect();
    /// for value in map.values_mut() {
    ///     *value *= 10;
    /// }
    /// assert_eq!(map.get(&3), Some(&30));
    /// ```
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }
}

impl<K, V, P, H> HashMap<K, V, P, H>
where
    P: Policy,
{
    /// Histogram of the number of probe steps needed to reach each entry.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> crate::stats::ProbeHistogram {
        self.table.probe_histogram::<P>()
    }

    /// Counters, load factors and memory use of the underlying table.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> crate::stats::DebugStats {
        self.table.debug_stats::<P>()
    }
}

impl<K, V, P, H> HashMap<K, V, P, H>
where
    K: Default,
    V: Default,
    P: Policy,
{
    /// Creates an empty map using the given hash capability.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashPair;
    /// use probe_hash::LinearHashMap;
    /// use probe_hash::hash::Fmix64;
    /// use probe_hash::hash::WangMix;
    ///
    /// let map: LinearHashMap<u64, u64, _> = LinearHashMap::with_hasher(HashPair::new(Fmix64, WangMix));
    /// assert!(map.is_empty());
    /// ```
    pub fn with_hasher(hasher: H) -> Self {
        Self::with_capacity_and_hasher(0, hasher)
    }

    /// Creates an empty map with at least `capacity` home slots, using the
    /// given hash capability.
    ///
    /// The capacity is rounded up along the growth law: 8, 64, 512, 4096,
    /// 32768 and 262144, then doubling.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`max_capacity`](Self::max_capacity).
    pub fn with_capacity_and_hasher(capacity: usize, hasher: H) -> Self {
        Self {
            table: BucketTable::with_capacity(capacity, P::OVERFLOW),
            hasher,
            _policy: PhantomData,
        }
    }

    /// Removes every entry, keeping the capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::QuadraticHashMap;
    ///
    /// let mut map: QuadraticHashMap<u32, u32> = (0..100).map(|k| (k, k)).collect();
    /// let capacity = map.capacity();
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), capacity);
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
    }
}

impl<K, V, P, H> HashMap<K, V, P, H>
where
    K: Default,
    V: Default,
    P: Policy,
    H: Default,
{
    /// Creates an empty map with the default hash capability.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::CuckooHashMap;
    ///
    /// let map: CuckooHashMap<u32, String> = CuckooHashMap::new();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 8);
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(H::default())
    }

    /// Creates an empty map with at least `capacity` home slots and the
    /// default hash capability.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`max_capacity`](Self::max_capacity).
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, H::default())
    }
}

impl<K, V, P, H> Default for HashMap<K, V, P, H>
where
    K: Default,
    V: Default,
    P: Policy,
    H: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, P, H> HashMap<K, V, P, H>
where
    K: Eq + Default,
    V: Default,
    P: Policy,
    H: HashCapability<K>,
{
    /// Returns a reference to the value for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::RobinHoodHashMap;
    ///
    /// let mut map: RobinHoodHashMap<u32, &str> = RobinHoodHashMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        P::locate(&self.table, &self.hasher, key).map(|index| self.table.entry(index).1)
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = P::locate(&self.table, &self.hasher, key)?;
        Some(self.table.entry_mut(index).1)
    }

    /// Returns the stored key and its value.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        P::locate(&self.table, &self.hasher, key).map(|index| self.table.entry(index))
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        P::locate(&self.table, &self.hasher, key).is_some()
    }

    /// Returns the number of entries stored under `key`: 0 or 1.
    pub fn count(&self, key: &K) -> usize {
        usize::from(self.contains_key(key))
    }

    /// Returns a reference to the value for `key`, or [`OutOfRange`] if the
    /// key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::LinearHashMap;
    /// use probe_hash::OutOfRange;
    ///
    /// let mut map: LinearHashMap<u32, u32> = LinearHashMap::new();
    /// map.insert(7, 70);
    /// assert_eq!(map.at(&7), Ok(&70));
    /// assert_eq!(map.at(&8), Err(OutOfRange));
    /// ```
    pub fn at(&self, key: &K) -> Result<&V, OutOfRange> {
        self.get(key).ok_or(OutOfRange)
    }

    /// Returns a mutable reference to the value for `key`, or
    /// [`OutOfRange`] if the key is absent.
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V, OutOfRange> {
        self.get_mut(key).ok_or(OutOfRange)
    }

    /// Returns the value for `key`, inserting `V::default()` first if the
    /// key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::QuadraticHashMap;
    ///
    /// let mut counts: QuadraticHashMap<char, u32> = QuadraticHashMap::new();
    /// for c in "hello".chars() {
    ///     *counts.get_or_insert_default(c) += 1;
    /// }
    /// assert_eq!(counts[&'l'], 2);
    /// assert_eq!(counts[&'h'], 1);
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V {
        let tag = self.hasher.primary(&key);
        let (index, _) = P::locate_or_reserve(&mut self.table, &self.hasher, key, tag);
        self.table.entry_mut(index).1
    }

    /// Inserts `key` with `value` unless the key is already present.
    ///
    /// Returns the value now stored under `key` and `true` if a new entry
    /// was created. An existing value is left untouched and `value` is
    /// dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::CuckooHashMap;
    ///
    /// let mut map: CuckooHashMap<u32, &str> = CuckooHashMap::new();
    /// assert_eq!(map.insert(1, "a"), (&mut "a", true));
    /// assert_eq!(map.insert(1, "b"), (&mut "a", false));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (&mut V, bool) {
        let tag = self.hasher.primary(&key);
        let (index, inserted) = P::locate_or_reserve(&mut self.table, &self.hasher, key, tag);
        let (_, slot) = self.table.entry_mut(index);
        if inserted {
            *slot = value;
        }
        (slot, inserted)
    }

    /// Removes `key` and returns the number of entries removed: 0 or 1.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::RobinHoodHashMap;
    ///
    /// let mut map: RobinHoodHashMap<u32, u32> = RobinHoodHashMap::new();
    /// map.insert(1, 10);
    /// assert_eq!(map.erase(&1), 1);
    /// assert_eq!(map.erase(&1), 0);
    /// ```
    pub fn erase(&mut self, key: &K) -> usize {
        usize::from(self.remove_entry(key).is_some())
    }

    /// Removes `key` and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` and returns the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let index = P::locate(&self.table, &self.hasher, key)?;
        let entry = self.table.take(index);
        P::repair(&mut self.table, index);
        Some(entry)
    }
}

impl<K, V, P, H> Index<&K> for HashMap<K, V, P, H>
where
    K: Eq + Default,
    V: Default,
    P: Policy,
    H: HashCapability<K>,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if `key` is not present in the map.
    fn index(&self, key: &K) -> &V {
        match self.at(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<K, V, P, H> Extend<(K, V)> for HashMap<K, V, P, H>
where
    K: Eq + Default,
    V: Default,
    P: Policy,
    H: HashCapability<K>,
{
    /// Inserts every pair. Keys already present keep their value.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, P, H> FromIterator<(K, V)> for HashMap<K, V, P, H>
where
    K: Eq + Default,
    V: Default,
    P: Policy,
    H: HashCapability<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, P, H> IntoIterator for HashMap<K, V, P, H> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        self.table.into_iter()
    }
}

impl<'a, K, V, P, H> IntoIterator for &'a HashMap<K, V, P, H> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, P, H> IntoIterator for &'a mut HashMap<K, V, P, H> {
    type IntoIter = IterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An iterator over the keys of a `HashMap`.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of a `HashMap`.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

/// An iterator over mutable references to the values of a `HashMap`.
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}
