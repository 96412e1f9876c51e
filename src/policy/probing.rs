//! The probe loop shared by linear and quadratic probing.
//!
//! Both start at `tag & mask`, add a policy-defined stride on every retry and
//! stop at the first match or the first [`EMPTY`] slot. Tombstones are
//! stepped over and never reclaimed, so a key always sits before the first
//! empty slot of its sequence.

use crate::bucket_table::BucketTable;
use crate::bucket_table::EMPTY;
use crate::hash::HashCapability;
use crate::policy::Policy;

pub(crate) trait Stride {
    /// Distance added to the index on the `retry`-th step, starting at 1.
    fn stride(retry: usize) -> usize;
}

pub(crate) fn locate<S, K, V>(table: &BucketTable<K, V>, tag: u32, key: &K) -> Option<usize>
where
    S: Stride,
    K: Eq,
{
    let mask = table.mask();
    let mut index = tag as usize & mask;
    let mut retry = 0;
    loop {
        let bucket = table.bucket(index);
        if bucket.tag() == tag && bucket.key() == key {
            return Some(index);
        }
        if bucket.tag() == EMPTY {
            return None;
        }
        retry += 1;
        index = index.wrapping_add(S::stride(retry)) & mask;
    }
}

pub(crate) fn locate_or_reserve<S, P, K, V, H>(
    table: &mut BucketTable<K, V>,
    hasher: &H,
    key: K,
    tag: u32,
) -> (usize, bool)
where
    S: Stride,
    P: Policy,
    K: Eq + Default,
    V: Default,
    H: HashCapability<K>,
{
    let mask = table.mask();
    let mut index = tag as usize & mask;
    let mut retry = 0;
    loop {
        let bucket = table.bucket(index);
        if bucket.tag() == EMPTY {
            return (table.insert_at::<P, H>(hasher, index, key, tag), true);
        }
        if bucket.tag() == tag && *bucket.key() == key {
            return (index, false);
        }
        retry += 1;
        index = index.wrapping_add(S::stride(retry)) & mask;
    }
}

/// Retries the sequence of `S` from the home of the bucket at `index` until
/// it lands there.
pub(crate) fn probe_length<S, K, V>(table: &BucketTable<K, V>, index: usize) -> usize
where
    S: Stride,
{
    let mask = table.mask();
    let mut probe = table.bucket(index).home(mask);
    let mut retry = 0;
    while probe != index && retry <= mask {
        retry += 1;
        probe = probe.wrapping_add(S::stride(retry)) & mask;
    }
    retry
}
