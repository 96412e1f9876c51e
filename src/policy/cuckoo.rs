use crate::bucket_table::BucketTable;
use crate::bucket_table::EMPTY;
use crate::hash::HashCapability;
use crate::policy::Policy;

/// Bound on the slots a displacement chain may span, counting the origin and
/// the empty slot that ends it. Chains must stay below it.
const MAX_SEARCH: usize = 128;

/// Two-choice cuckoo hashing.
///
/// The home slots are split in two halves. A key may live only at
/// `primary & half_mask` in the first half or at
/// `half_start + (alternate & half_mask)` in the second, and the stored tag
/// is the hash that picked the slot. Lookups therefore touch at most two
/// buckets.
///
/// When both candidate slots are taken, the occupant of the first one is
/// moved to its other slot, displacing whatever sits there, and so on until
/// an empty slot turns up. Chains that would reach 128 slots, or that come
/// back to a slot they already visited, abandon the attempt and rehash.
///
/// Because a stored tag may be either hash, both hashes are always computed
/// from the key; the tag handed to
/// [`locate_or_reserve`](Policy::locate_or_reserve) is ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cuckoo;

#[inline(always)]
fn first_slot<K, V>(table: &BucketTable<K, V>, tag: u32) -> usize {
    tag as usize & table.half_mask()
}

#[inline(always)]
fn second_slot<K, V>(table: &BucketTable<K, V>, alt: u32) -> usize {
    table.half_start() + (alt as usize & table.half_mask())
}

/// The other candidate slot of the entry at `index`, with the tag it must
/// carry there.
fn other_slot<K, V, H>(table: &BucketTable<K, V>, hasher: &H, index: usize) -> (usize, u32)
where
    H: HashCapability<K>,
{
    let key = table.bucket(index).key();
    if index < table.half_start() {
        let alt = hasher.alternate(key);
        (second_slot(table, alt), alt)
    } else {
        let tag = hasher.primary(key);
        (first_slot(table, tag), tag)
    }
}

impl Cuckoo {
    fn evict<K, V, H>(
        table: &mut BucketTable<K, V>,
        hasher: &H,
        key: K,
        tag: u32,
        origin: usize,
    ) -> usize
    where
        K: Eq + Default,
        V: Default,
        H: HashCapability<K>,
    {
        if table.occupied() >= table.max_occupied() {
            return table.reserve_while_full::<Self, H>(hasher, key, tag);
        }

        // Each link is a slot on the chain and the tag its occupant takes
        // once moved to the next slot. The empty slot closing the chain needs
        // no link.
        let mut chain = [(0usize, 0u32); MAX_SEARCH - 2];
        let mut depth = 0;
        let mut slot = origin;
        while depth < chain.len() {
            let (next, moved_tag) = other_slot(table, hasher, slot);
            chain[depth] = (slot, moved_tag);
            depth += 1;

            if chain[..depth].iter().any(|&(visited, _)| visited == next) {
                tracing::trace!(origin, depth, "cuckoo chain revisited a slot");
                return table.reserve_while_full::<Self, H>(hasher, key, tag);
            }

            if table.bucket(next).tag() == EMPTY {
                let mut hole = next;
                for &(from, moved_tag) in chain[..depth].iter().rev() {
                    table.swap(from, hole);
                    table.set_tag(hole, moved_tag);
                    hole = from;
                }
                return table.insert_at::<Self, H>(hasher, origin, key, tag);
            }

            slot = next;
        }

        tracing::trace!(origin, depth, "cuckoo chain too long");
        table.reserve_while_full::<Self, H>(hasher, key, tag)
    }
}

impl Policy for Cuckoo {
    const NAME: &'static str = "cuckoo";

    #[inline]
    fn locate<K, V, H>(table: &BucketTable<K, V>, hasher: &H, key: &K) -> Option<usize>
    where
        K: Eq,
        H: HashCapability<K>,
    {
        let tag = hasher.primary(key);
        let first = first_slot(table, tag);
        if table.is_match(first, tag, key) {
            return Some(first);
        }

        let alt = hasher.alternate(key);
        let second = second_slot(table, alt);
        table.is_match(second, alt, key).then_some(second)
    }

    fn locate_or_reserve<K, V, H>(
        table: &mut BucketTable<K, V>,
        hasher: &H,
        key: K,
        _tag: u32,
    ) -> (usize, bool)
    where
        K: Eq + Default,
        V: Default,
        H: HashCapability<K>,
    {
        let tag = hasher.primary(&key);
        let alt = hasher.alternate(&key);
        let first = first_slot(table, tag);
        let second = second_slot(table, alt);

        if table.is_match(first, tag, &key) {
            return (first, false);
        }
        if table.is_match(second, alt, &key) {
            return (second, false);
        }

        if table.bucket(first).tag() == EMPTY {
            return (table.insert_at::<Self, H>(hasher, first, key, tag), true);
        }
        if table.bucket(second).tag() == EMPTY {
            return (table.insert_at::<Self, H>(hasher, second, key, alt), true);
        }

        (Self::evict(table, hasher, key, tag, first), true)
    }

    #[inline]
    fn repair<K, V>(table: &mut BucketTable<K, V>, index: usize)
    where
        K: Default,
        V: Default,
    {
        table.release(index, EMPTY);
    }

    fn probe_length<K, V>(table: &BucketTable<K, V>, index: usize) -> usize {
        usize::from(index >= table.half_start())
    }
}
