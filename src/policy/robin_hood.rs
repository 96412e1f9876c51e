use crate::bucket_table::BucketTable;
use crate::bucket_table::EMPTY;
use crate::hash::HashCapability;
use crate::policy::Policy;

/// Scratch slots past the home slots. Runs spill into them instead of
/// wrapping to the front of the table.
const OVERFLOW_AREA: usize = 128;

/// Robin Hood hashing with forward and backward bucket shifting.
///
/// Along every run of live buckets the home slots are non-decreasing, so an
/// entry that has travelled further never sits behind one that travelled
/// less. Insertion opens a gap in front of the first entry with a later home
/// by shifting the rest of the run one slot forward; removal shifts the run
/// back over the hole. There are no tombstones and the scans never wrap:
/// running off the overflow area triggers a rehash.
///
/// # Panics
///
/// A run starting at the last home slot can hold only 129 entries. If more
/// keys than that share a primary hash that homes them there at every
/// capacity (for example [`MAX_HASH`](crate::bucket_table::MAX_HASH)),
/// growing never makes room: the table keeps growing until the allocation
/// fails or the capacity passes
/// [`MAX_CAPACITY`](crate::bucket_table::MAX_CAPACITY) and panics. Real
/// hashers spread keys and never reach this.
#[derive(Clone, Copy, Debug, Default)]
pub struct RobinHood;

impl Policy for RobinHood {
    const NAME: &'static str = "robin-hood";
    const OVERFLOW: usize = OVERFLOW_AREA;

    #[inline]
    fn locate<K, V, H>(table: &BucketTable<K, V>, hasher: &H, key: &K) -> Option<usize>
    where
        K: Eq,
        H: HashCapability<K>,
    {
        let tag = hasher.primary(key);
        let mask = table.mask();
        let home = tag as usize & mask;

        let mut index = home;
        loop {
            let bucket = table.bucket(index);
            if !bucket.is_live() {
                return None;
            }
            if bucket.tag() == tag && bucket.key() == key {
                return Some(index);
            }
            if bucket.home(mask) > home {
                return None;
            }
            index += 1;
        }
    }

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
        let mask = table.mask();
        let home = tag as usize & mask;

        for index in home..table.end() {
            let bucket = table.bucket(index);
            if bucket.tag() == EMPTY {
                return (table.insert_at::<Self, H>(hasher, index, key, tag), true);
            }
            if bucket.tag() == tag && *bucket.key() == key {
                return (index, false);
            }
            if bucket.home(mask) > home {
                if table.shift_forward(index) {
                    return (table.insert_at::<Self, H>(hasher, index, key, tag), true);
                }
                break;
            }
        }

        tracing::trace!(
            home,
            capacity = table.capacity(),
            "robin hood run reached the end of the overflow area"
        );
        (table.reserve_while_full::<Self, H>(hasher, key, tag), true)
    }

    fn repair<K, V>(table: &mut BucketTable<K, V>, index: usize)
    where
        K: Default,
        V: Default,
    {
        let mask = table.mask();
        let mut hole = index;
        loop {
            let next = table.bucket(hole + 1);
            if !next.is_live() || next.home(mask) > hole {
                break;
            }
            hole += 1;
        }
        table.shift_back(index, hole);
        table.release(hole, EMPTY);
    }

    fn probe_length<K, V>(table: &BucketTable<K, V>, index: usize) -> usize {
        index - table.bucket(index).home(table.mask())
    }
}
