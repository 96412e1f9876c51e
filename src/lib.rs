#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod bucket_table;

/// The error returned by strict lookups.
pub mod error;

/// Hash capabilities: how keys become 31-bit tags.
pub mod hash;

/// The policy-generic `HashMap` and its per-policy aliases.
///
/// This module provides a `HashMap` that drives a `BucketTable` through one
/// collision-resolution policy and a pluggable hash capability.
pub mod hash_map;

pub mod policy;

#[cfg(any(test, feature = "stats"))]
pub mod stats;

pub use error::OutOfRange;
pub use hash::DefaultHashPair;
pub use hash::HashCapability;
pub use hash::HashPair;
pub use hash_map::CuckooHashMap;
pub use hash_map::HashMap;
pub use hash_map::LinearHashMap;
pub use hash_map::QuadraticHashMap;
pub use hash_map::RobinHoodHashMap;
pub use policy::Cuckoo;
pub use policy::Linear;
pub use policy::Policy;
pub use policy::Quadratic;
pub use policy::RobinHood;
