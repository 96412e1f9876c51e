use crate::bucket_table::BucketTable;
use crate::bucket_table::EMPTY;
use crate::hash::HashCapability;
use crate::policy::Policy;
use crate::policy::probing;
use crate::policy::probing::Stride;

/// Linear probing with backward-shift deletion.
///
/// Lookups walk forward one slot at a time. Removal never leaves a
/// tombstone: later entries of the cluster are pulled back into the hole as
/// long as that keeps them reachable from their home slot (Knuth, TAOCP vol.
/// 3, 6.4, Algorithm R).
#[derive(Clone, Copy, Debug, Default)]
pub struct Linear;

impl Stride for Linear {
    #[inline(always)]
    fn stride(_retry: usize) -> usize {
        1
    }
}

impl Policy for Linear {
    const NAME: &'static str = "linear";

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

    fn repair<K, V>(table: &mut BucketTable<K, V>, index: usize)
    where
        K: Default,
        V: Default,
    {
        let mask = table.mask();
        let mut hole = index;
        let mut next = index;
        loop {
            next = (next + 1) & mask;
            let bucket = table.bucket(next);
            if bucket.tag() == EMPTY {
                break;
            }

            // An entry stays put if its home lies cyclically in (hole, next].
            let home = bucket.home(mask);
            let stays = if hole < next {
                hole < home && home <= next
            } else {
                hole < home || home <= next
            };
            if !stays {
                table.swap(hole, next);
                hole = next;
            }
        }
        table.release(hole, EMPTY);
    }

    fn probe_length<K, V>(table: &BucketTable<K, V>, index: usize) -> usize {
        let mask = table.mask();
        index.wrapping_sub(table.bucket(index).home(mask)) & mask
    }
}
