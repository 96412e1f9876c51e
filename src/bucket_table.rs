//! The bucket array shared by every collision-resolution policy.
//!
//! A [`BucketTable`] owns one contiguous `Vec` of `capacity + overflow + 1`
//! buckets. Each bucket carries a 32-bit tag that is either a real hash in
//! `0..=MAX_HASH` or one of the sentinels [`EMPTY`], [`TOMBSTONE`] and
//! [`LAST`]. Every tag below [`CODE`] is live, so hot loops test liveness
//! with a single comparison.
//!
//! The table knows nothing about where a key belongs. Policies decide that
//! through the narrow contract below: [`occupy`](BucketTable::occupy) a slot,
//! [`take`](BucketTable::take) and [`release`](BucketTable::release) one,
//! move buckets around, and read the geometry. The growth law and the rehash
//! loop live here, written once for all policies.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::FusedIterator;
use core::mem;

use crate::hash::HashCapability;
use crate::policy::Policy;

/// Tag of a slot that has never held an entry since the last rebuild.
pub const EMPTY: u32 = u32::MAX;

/// Tag of a slot whose entry was removed without compaction.
pub const TOMBSTONE: u32 = u32::MAX - 1;

/// Tag of the permanent terminator in the final slot.
pub const LAST: u32 = u32::MAX - 2;

/// Every tag strictly below this value belongs to a live entry.
pub const CODE: u32 = u32::MAX - 3;

const BIT_SHIFT: u32 = 31;

/// Largest number of home slots a table can have.
pub const MAX_CAPACITY: usize = 1 << BIT_SHIFT;

/// Largest real hash a tag may hold.
pub const MAX_HASH: u32 = (1 << BIT_SHIFT) - 1;

const INITIAL_CAPACITY: usize = 8;
const SLOW_GROWTH_AT: usize = 256 * 1024;
const FAST_GROWTH_SHIFT: u32 = 3;
const SLOW_GROWTH_SHIFT: u32 = 1;

#[inline(always)]
fn max_occupied(capacity: usize) -> usize {
    ((capacity as u128 * 51) / 100) as usize
}

/// Smallest capacity reachable by the growth law that holds `requested`
/// home slots.
///
/// Capacities start at 8 and grow eightfold until 262,144, then double.
///
/// # Panics
///
/// Panics if `requested` exceeds [`MAX_CAPACITY`].
pub fn next_size_up(requested: usize) -> usize {
    assert!(requested <= MAX_CAPACITY, "capacity overflow");

    let mut capacity = INITIAL_CAPACITY;
    while capacity < requested {
        capacity <<= if capacity < SLOW_GROWTH_AT {
            FAST_GROWTH_SHIFT
        } else {
            SLOW_GROWTH_SHIFT
        };
    }
    capacity
}

/// One slot of a [`BucketTable`].
#[derive(Clone)]
pub struct Bucket<K, V> {
    tag: u32,
    key: K,
    value: V,
}

impl<K: Default, V: Default> Bucket<K, V> {
    fn vacant(tag: u32) -> Self {
        Self {
            tag,
            key: K::default(),
            value: V::default(),
        }
    }
}

impl<K, V> Bucket<K, V> {
    /// The stored hash, or a sentinel.
    #[inline(always)]
    pub fn tag(&self) -> u32 {
        self.tag
    }

    /// `true` if the bucket holds an entry reachable by lookup.
    #[inline(always)]
    pub fn is_live(&self) -> bool {
        self.tag < CODE
    }

    /// Home slot of a live bucket for the given mask.
    #[inline(always)]
    pub fn home(&self, mask: usize) -> usize {
        self.tag as usize & mask
    }

    /// The stored key. Meaningless unless the bucket is live.
    #[inline(always)]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The stored value. Meaningless unless the bucket is live.
    #[inline(always)]
    pub fn value(&self) -> &V {
        &self.value
    }
}

/// Storage, counters and geometry shared by every policy.
///
/// `live` counts entries reachable by lookup. `occupied` counts slots touched
/// since the last rebuild, tombstones included, and is what the load
/// threshold is checked against.
#[derive(Clone)]
pub struct BucketTable<K, V> {
    slots: Vec<Bucket<K, V>>,
    capacity: usize,
    overflow: usize,
    live: usize,
    occupied: usize,
    max_occupied: usize,
}

impl<K, V> Debug for BucketTable<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use alloc::format;
        use alloc::string::String;

        let tags = self
            .slots
            .chunks(16)
            .map(|chunk| {
                let mut line = String::new();
                for bucket in chunk {
                    match bucket.tag {
                        EMPTY => line.push_str(" ........"),
                        TOMBSTONE => line.push_str(" xxxxxxxx"),
                        LAST => line.push_str(" $$$$$$$$"),
                        tag => line.push_str(&format!(" {tag:08x}")),
                    }
                }
                line
            })
            .collect::<Vec<_>>();

        f.debug_struct("BucketTable")
            .field("capacity", &self.capacity)
            .field("overflow", &self.overflow)
            .field("live", &self.live)
            .field("occupied", &self.occupied)
            .field("max_occupied", &self.max_occupied)
            .field("tags", &tags)
            .finish()
    }
}

impl<K, V> BucketTable<K, V> {
    /// Number of live entries.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.live
    }

    /// `true` if no entry is live.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of home slots. Always a power of two.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Size of the trailing scratch region past the home slots.
    #[inline(always)]
    pub fn overflow(&self) -> usize {
        self.overflow
    }

    /// `capacity - 1`.
    #[inline(always)]
    pub fn mask(&self) -> usize {
        self.capacity - 1
    }

    /// Mask addressing one half of the home slots.
    #[inline(always)]
    pub fn half_mask(&self) -> usize {
        self.mask() >> 1
    }

    /// Index of the first slot of the second half.
    #[inline(always)]
    pub fn half_start(&self) -> usize {
        self.capacity >> 1
    }

    /// Index of the [`LAST`] terminator.
    #[inline(always)]
    pub fn end(&self) -> usize {
        self.capacity + self.overflow
    }

    /// Slots touched since the last rebuild, tombstones included.
    #[inline(always)]
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    /// Value of `occupied` past which the next insertion rehashes.
    #[inline(always)]
    pub fn max_occupied(&self) -> usize {
        self.max_occupied
    }

    /// The bucket at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is past [`end`](Self::end).
    #[inline(always)]
    pub fn bucket(&self, index: usize) -> &Bucket<K, V> {
        &self.slots[index]
    }

    /// All buckets in slot order, terminator included.
    pub fn buckets(&self) -> &[Bucket<K, V>] {
        &self.slots
    }

    /// `true` if the bucket at `index` holds `tag` and a key equal to `key`.
    #[inline(always)]
    pub fn is_match(&self, index: usize, tag: u32, key: &K) -> bool
    where
        K: Eq,
    {
        let bucket = &self.slots[index];
        bucket.tag == tag && bucket.key == *key
    }

    /// Key and value of a live bucket.
    #[inline(always)]
    pub fn entry(&self, index: usize) -> (&K, &V) {
        let bucket = &self.slots[index];
        (&bucket.key, &bucket.value)
    }

    /// Key and mutable value of a live bucket.
    #[inline(always)]
    pub fn entry_mut(&mut self, index: usize) -> (&K, &mut V) {
        let bucket = &mut self.slots[index];
        (&bucket.key, &mut bucket.value)
    }

    /// Exchanges two buckets, tags included.
    #[inline(always)]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }

    /// Overwrites the tag of the bucket at `index`.
    #[inline(always)]
    pub fn set_tag(&mut self, index: usize, tag: u32) {
        debug_assert!(tag < CODE, "sentinels are set through release");
        self.slots[index].tag = tag;
    }

    /// Moves the first [`EMPTY`] bucket after `from` into `from`, shifting
    /// every bucket in between one slot forward.
    ///
    /// Returns `false`, leaving the table untouched, if no empty bucket
    /// exists before the terminator.
    pub fn shift_forward(&mut self, from: usize) -> bool {
        let end = self.end();
        match self.slots[from + 1..end]
            .iter()
            .position(|bucket| bucket.tag == EMPTY)
        {
            Some(offset) => {
                self.slots[from..=from + 1 + offset].rotate_right(1);
                true
            }
            None => false,
        }
    }

    /// Moves the bucket at `from` to `to`, shifting every bucket in between
    /// one slot back.
    pub fn shift_back(&mut self, from: usize, to: usize) {
        if from < to {
            self.slots[from..=to].rotate_left(1);
        }
    }

    /// Returns an iterator over the live entries in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.live,
        }
    }

    /// Returns an iterator over the live entries with mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            remaining: self.live,
            slots: self.slots.iter_mut(),
        }
    }

    /// Histogram of probe lengths as measured by the policy `P`.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram<P: Policy>(&self) -> crate::stats::ProbeHistogram {
        let mut counts = alloc::vec::Vec::new();
        for (index, bucket) in self.slots.iter().enumerate() {
            if bucket.is_live() {
                let length = P::probe_length(self, index);
                if counts.len() <= length {
                    counts.resize(length + 1, 0);
                }
                counts[length] += 1;
            }
        }
        crate::stats::ProbeHistogram::new(counts)
    }

    /// Occupancy statistics for debugging.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats<P: Policy>(&self) -> crate::stats::DebugStats {
        let tombstones = self
            .slots
            .iter()
            .filter(|bucket| bucket.tag == TOMBSTONE)
            .count();
        let max_probe_length = self.probe_histogram::<P>().max_probe_length();

        crate::stats::DebugStats {
            policy: P::NAME,
            live: self.live,
            occupied: self.occupied,
            tombstones,
            capacity: self.capacity,
            total_slots: self.slots.len(),
            max_occupied: self.max_occupied,
            max_probe_length,
            load_factor: self.live as f64 / self.capacity as f64,
            occupied_factor: self.occupied as f64 / self.capacity as f64,
            total_bytes: self.slots.len() * mem::size_of::<Bucket<K, V>>(),
        }
    }
}

impl<K: Default, V: Default> BucketTable<K, V> {
    /// Creates a table with at least `capacity` home slots followed by
    /// `overflow` scratch slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`MAX_CAPACITY`].
    pub fn with_capacity(capacity: usize, overflow: usize) -> Self {
        let capacity = next_size_up(capacity);
        Self {
            slots: Self::allocate(capacity, overflow),
            capacity,
            overflow,
            live: 0,
            occupied: 0,
            max_occupied: max_occupied(capacity),
        }
    }

    fn allocate(capacity: usize, overflow: usize) -> Vec<Bucket<K, V>> {
        let mut slots = Vec::with_capacity(capacity + overflow + 1);
        slots.resize_with(capacity + overflow, || Bucket::vacant(EMPTY));
        slots.push(Bucket::vacant(LAST));
        slots
    }

    /// Resets every slot to [`EMPTY`], keeping the capacity.
    pub fn clear(&mut self) {
        let end = self.end();
        for bucket in &mut self.slots[..end] {
            if bucket.tag != EMPTY {
                *bucket = Bucket::vacant(EMPTY);
            }
        }
        self.live = 0;
        self.occupied = 0;
    }

    /// Claims the vacant slot at `index` for `key`.
    ///
    /// Fails, handing the key back, when the claim would push `occupied`
    /// past the load threshold. The caller is then expected to rehash.
    #[inline]
    pub fn occupy(&mut self, index: usize, tag: u32, key: K) -> Result<usize, K> {
        debug_assert!(tag <= MAX_HASH);
        debug_assert_eq!(self.slots[index].tag, EMPTY);

        if self.occupied >= self.max_occupied {
            return Err(key);
        }

        self.occupied += 1;
        self.live += 1;
        let bucket = &mut self.slots[index];
        bucket.tag = tag;
        bucket.key = key;
        Ok(index)
    }

    /// Moves the key and value out of a live bucket, leaving defaults behind.
    ///
    /// The bucket keeps its tag until the policy calls
    /// [`release`](Self::release) on whichever slot ends up vacant.
    #[inline]
    pub fn take(&mut self, index: usize) -> (K, V) {
        let bucket = &mut self.slots[index];
        (mem::take(&mut bucket.key), mem::take(&mut bucket.value))
    }

    /// Marks the slot at `index` as [`EMPTY`] or [`TOMBSTONE`] and drops one
    /// live entry from the counters.
    ///
    /// Only an [`EMPTY`] release gives the slot back to the load threshold.
    #[inline]
    pub fn release(&mut self, index: usize, sentinel: u32) {
        debug_assert!(sentinel == EMPTY || sentinel == TOMBSTONE);

        let bucket = &mut self.slots[index];
        bucket.tag = sentinel;
        bucket.key = K::default();
        bucket.value = V::default();

        self.live -= 1;
        if sentinel == EMPTY {
            self.occupied -= 1;
        }
    }
}

impl<K: Eq + Default, V: Default> BucketTable<K, V> {
    /// Occupies `index`, rehashing and retrying through `P` when the load
    /// threshold is reached. Returns the final slot of `key`.
    #[inline]
    pub fn insert_at<P, H>(&mut self, hasher: &H, index: usize, key: K, tag: u32) -> usize
    where
        P: Policy,
        H: HashCapability<K>,
    {
        match self.occupy(index, tag, key) {
            Ok(index) => index,
            Err(key) => self.reserve_while_full::<P, H>(hasher, key, tag),
        }
    }

    /// Grows the table and places `key` through `P` in the new storage.
    ///
    /// Used when the load threshold is hit and when a policy runs out of
    /// room to relocate buckets.
    pub fn reserve_while_full<P, H>(&mut self, hasher: &H, key: K, tag: u32) -> usize
    where
        P: Policy,
        H: HashCapability<K>,
    {
        self.rehash::<P, H>(hasher);
        P::locate_or_reserve(self, hasher, key, tag).0
    }

    /// Moves every live entry into fresh storage of the next capacity up.
    ///
    /// Entries are placed through the ordinary insertion path of `P` using
    /// the tag already stored with them. The old storage is dropped only
    /// once all of them have moved.
    pub fn rehash<P, H>(&mut self, hasher: &H)
    where
        P: Policy,
        H: HashCapability<K>,
    {
        let capacity = next_size_up(self.capacity + 1);
        tracing::debug!(
            policy = P::NAME,
            from = self.capacity,
            to = capacity,
            live = self.live,
            occupied = self.occupied,
            "rehashing bucket table"
        );

        let old = mem::replace(&mut self.slots, Self::allocate(capacity, self.overflow));
        self.capacity = capacity;
        self.max_occupied = max_occupied(capacity);
        self.live = 0;
        self.occupied = 0;

        for bucket in old {
            if bucket.is_live() {
                let (index, inserted) = P::locate_or_reserve(self, hasher, bucket.key, bucket.tag);
                debug_assert!(inserted);
                self.slots[index].value = bucket.value;
            }
        }
    }
}

/// Iterator over the live entries of a table, in slot order.
pub struct Iter<'a, K, V> {
    slots: core::slice::Iter<'a, Bucket<K, V>>,
    remaining: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for bucket in self.slots.by_ref() {
            if bucket.tag == LAST {
                break;
            }
            if bucket.is_live() {
                self.remaining -= 1;
                return Some((&bucket.key, &bucket.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over the live entries of a table with mutable values.
pub struct IterMut<'a, K, V> {
    slots: core::slice::IterMut<'a, Bucket<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        for bucket in self.slots.by_ref() {
            if bucket.tag == LAST {
                break;
            }
            if bucket.is_live() {
                self.remaining -= 1;
                return Some((&bucket.key, &mut bucket.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Owning iterator over the live entries of a table.
pub struct IntoIter<K, V> {
    slots: alloc::vec::IntoIter<Bucket<K, V>>,
    remaining: usize,
}

impl<K, V> IntoIterator for BucketTable<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            remaining: self.live,
            slots: self.slots.into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        for bucket in self.slots.by_ref() {
            if bucket.tag == LAST {
                break;
            }
            if bucket.is_live() {
                self.remaining -= 1;
                return Some((bucket.key, bucket.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Fmix64;
    use crate::hash::HashPair;
    use crate::hash::WangMix;
    use crate::policy::Linear;
    use crate::policy::Quadratic;

    #[test]
    fn growth_law_is_fast_then_slow() {
        assert_eq!(next_size_up(0), 8);
        assert_eq!(next_size_up(8), 8);
        assert_eq!(next_size_up(9), 64);
        assert_eq!(next_size_up(65), 512);
        assert_eq!(next_size_up(513), 4096);
        assert_eq!(next_size_up(4097), 32768);
        assert_eq!(next_size_up(32769), 262_144);
        assert_eq!(next_size_up(262_145), 524_288);
        assert_eq!(next_size_up(600_000), 1 << 20);
        assert_eq!(next_size_up(1 << 20), 1 << 20);
        assert_eq!(next_size_up(MAX_CAPACITY), MAX_CAPACITY);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn growth_law_rejects_oversized_requests() {
        next_size_up(MAX_CAPACITY + 1);
    }

    #[test]
    fn fresh_table_layout() {
        let table: BucketTable<u32, u32> = BucketTable::with_capacity(100, 128);
        assert_eq!(table.capacity(), 512);
        assert_eq!(table.mask(), 511);
        assert_eq!(table.half_mask(), 255);
        assert_eq!(table.half_start(), 256);
        assert_eq!(table.overflow(), 128);
        assert_eq!(table.end(), 640);
        assert_eq!(table.buckets().len(), 641);
        assert_eq!(table.max_occupied(), 261);
        assert_eq!(table.bucket(640).tag(), LAST);
        assert!(table.buckets()[..640].iter().all(|b| b.tag() == EMPTY));
        assert!(table.is_empty());
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn occupy_respects_threshold() {
        let mut table: BucketTable<u32, u32> = BucketTable::with_capacity(8, 0);
        assert_eq!(table.max_occupied(), 4);
        for index in 0..4 {
            assert_eq!(table.occupy(index, index as u32, index as u32), Ok(index));
        }
        assert_eq!(table.occupy(4, 4, 99), Err(99));
        assert_eq!(table.len(), 4);
        assert_eq!(table.occupied(), 4);
    }

    #[test]
    fn tombstones_keep_occupied_count() {
        let mut table: BucketTable<u32, u32> = BucketTable::with_capacity(8, 0);
        table.occupy(1, 1, 10).unwrap();
        table.occupy(2, 2, 20).unwrap();

        assert_eq!(table.take(1), (10, 0));
        table.release(1, TOMBSTONE);
        assert_eq!(table.len(), 1);
        assert_eq!(table.occupied(), 2);
        assert_eq!(table.bucket(1).tag(), TOMBSTONE);

        assert_eq!(*table.bucket(2).value(), 20);
        table.take(2);
        table.release(2, EMPTY);
        assert_eq!(table.len(), 0);
        assert_eq!(table.occupied(), 1);
    }

    #[test]
    fn clear_resets_tombstones() {
        let mut table: BucketTable<u32, u32> = BucketTable::with_capacity(8, 0);
        table.occupy(3, 3, 30).unwrap();
        table.take(3);
        table.release(3, TOMBSTONE);
        table.occupy(4, 4, 40).unwrap();

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.occupied(), 0);
        assert_eq!(table.capacity(), 8);
        assert!(table.buckets()[..8].iter().all(|b| b.tag() == EMPTY));
        assert_eq!(table.bucket(8).tag(), LAST);
    }

    #[test]
    fn shifting_moves_the_vacancy() {
        let mut table: BucketTable<u32, u32> = BucketTable::with_capacity(8, 4);
        for index in 2..5 {
            table.occupy(index, index as u32, index as u32).unwrap();
        }

        assert!(table.shift_forward(2));
        assert_eq!(table.bucket(2).tag(), EMPTY);
        assert_eq!(*table.bucket(3).key(), 2);
        assert_eq!(*table.bucket(5).key(), 4);

        table.shift_back(2, 5);
        assert_eq!(*table.bucket(2).key(), 2);
        assert_eq!(*table.bucket(4).key(), 4);
        assert_eq!(table.bucket(5).tag(), EMPTY);
    }

    #[test]
    fn shift_forward_fails_without_vacancy() {
        let mut table: BucketTable<u32, u32> = BucketTable::with_capacity(8, 0);
        for index in 4..8 {
            table.occupy(index, index as u32, index as u32).unwrap();
        }
        assert!(!table.shift_forward(4));
        assert_eq!(*table.bucket(4).key(), 4);
    }

    #[test]
    fn rehash_keeps_every_entry() {
        let hasher = HashPair::new(Fmix64, WangMix);
        let mut table: BucketTable<u64, u64> = BucketTable::with_capacity(8, 0);
        for key in 0..4u64 {
            let tag = HashCapability::<u64>::primary(&hasher, &key);
            let (index, inserted) = Quadratic::locate_or_reserve(&mut table, &hasher, key, tag);
            assert!(inserted);
            *table.entry_mut(index).1 = key * 3;
        }

        table.rehash::<Quadratic, _>(&hasher);
        assert_eq!(table.capacity(), 64);
        assert_eq!(table.len(), 4);
        assert_eq!(table.occupied(), 4);
        for key in 0..4u64 {
            let index = Quadratic::locate(&table, &hasher, &key).unwrap();
            assert_eq!(table.entry(index), (&key, &(key * 3)));
        }
    }

    #[test]
    fn iterators_stop_at_terminator() {
        let hasher = HashPair::new(Fmix64, WangMix);
        let mut table: BucketTable<u64, u64> = BucketTable::with_capacity(64, 0);
        for key in 0..20u64 {
            let tag = HashCapability::<u64>::primary(&hasher, &key);
            Linear::locate_or_reserve(&mut table, &hasher, key, tag);
        }

        assert_eq!(table.iter().len(), 20);
        for (_, value) in table.iter_mut() {
            *value += 1;
        }
        assert!(table.iter().all(|(_, v)| *v == 1));

        let mut keys: Vec<u64> = table.into_iter().map(|(k, _)| k).collect();
        keys.sort_unstable();
        assert_eq!(keys, (0..20).collect::<Vec<_>>());
    }
}
