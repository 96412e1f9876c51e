//! Collision-resolution policies.
//!
//! A policy is a zero-sized marker deciding where a key lives inside a
//! [`BucketTable`]. All four policies share the table's storage, counters and
//! growth law; they differ only in how they probe, insert and repair.

use crate::bucket_table::BucketTable;
use crate::hash::HashCapability;

mod cuckoo;
mod linear;
mod probing;
mod quadratic;
mod robin_hood;

pub use cuckoo::Cuckoo;
pub use linear::Linear;
pub use quadratic::Quadratic;
pub use robin_hood::RobinHood;

/// Slot selection and repair for a [`BucketTable`].
pub trait Policy {
    /// Short name used in logs and statistics.
    const NAME: &'static str;

    /// Number of scratch slots the policy needs past the home slots.
    const OVERFLOW: usize = 0;

    /// Finds the slot holding `key` without modifying the table.
    fn locate<K, V, H>(table: &BucketTable<K, V>, hasher: &H, key: &K) -> Option<usize>
    where
        K: Eq,
        H: HashCapability<K>;

    /// Finds the slot holding `key`, or claims one for it.
    ///
    /// `tag` is the primary hash of `key`. Returns the slot and `true` if the
    /// key was newly placed, in which case its value is `V::default()`. May
    /// rehash the table before returning.
    fn locate_or_reserve<K, V, H>(
        table: &mut BucketTable<K, V>,
        hasher: &H,
        key: K,
        tag: u32,
    ) -> (usize, bool)
    where
        K: Eq + Default,
        V: Default,
        H: HashCapability<K>;

    /// Restores the policy's invariants after the entry at `index` was taken
    /// out, and releases whichever slot ends up vacant.
    fn repair<K, V>(table: &mut BucketTable<K, V>, index: usize)
    where
        K: Default,
        V: Default;

    /// Number of probe steps lookup takes to reach the live bucket at
    /// `index`.
    fn probe_length<K, V>(table: &BucketTable<K, V>, index: usize) -> usize;
}
