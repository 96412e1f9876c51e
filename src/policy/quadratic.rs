use crate::bucket_table::BucketTable;
use crate::bucket_table::TOMBSTONE;
use crate::hash::HashCapability;
use crate::policy::Policy;
use crate::policy::probing;
use crate::policy::probing::Stride;

/// Quadratic probing with tombstone deletion.
///
/// The `i`-th retry advances the index by `i`, so the offsets from the home
/// slot are the triangular numbers 1, 3, 6, 10, ... taken modulo the
/// capacity. Removed entries leave a [`TOMBSTONE`] that lookups step over
/// and insertions never reclaim; tombstones keep counting toward the load
/// threshold until the next rehash sweeps them away.
#[derive(Clone, Copy, Debug, Default)]
pub struct Quadratic;

impl Stride for Quadratic {
    #[inline(always)]
    fn stride(retry: usize) -> usize {
        retry
    }
}

impl Policy for Quadratic {
    const NAME: &'static str = "quadratic";

    #[inline]
    fn locate<K, V, H>(table: &BucketTable<K, V>, hasher: &H, key: &K) -> Option<usize>
    where
        K: Eq,
        H: HashCapability<K>,
    {
        probing::locate::<Self, K, V>(table, hasher.primary(key), key)
    }

    #[inline]
    fn locate_or_reserve<K, V, H>(
        table: &mut BucketTable<K, V>,
        hasher: &H,
        key: K,
        tag: u32,
    ) -> (usize, bool)
    where
        K: Eq + Default,
        V: Default,
        H: HashCapability<K>,
    {
        probing::locate_or_reserve::<Self, Self, K, V, H>(table, hasher, key, tag)
    }

    #[inline]
    fn repair<K, V>(table: &mut BucketTable<K, V>, index: usize)
    where
        K: Default,
        V: Default,
    {
        table.release(index, TOMBSTONE);
    }

    fn probe_length<K, V>(table: &BucketTable<K, V>, index: usize) -> usize {
        probing::probe_length::<Self, K, V>(table, index)
    }
}
