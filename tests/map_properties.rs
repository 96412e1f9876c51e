use std::collections::HashSet;

use probe_hash::HashCapability;
use probe_hash::HashMap;
use probe_hash::HashPair;
use probe_hash::Policy;
use probe_hash::hash::Fmix64;
use probe_hash::hash::WangMix;
use probe_hash::policy::Cuckoo;
use probe_hash::policy::Linear;
use probe_hash::policy::Quadratic;
use probe_hash::policy::RobinHood;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

type IntPair = HashPair<Fmix64, WangMix>;

fn int_map<P: Policy>() -> HashMap<u64, u64, P, IntPair> {
    HashMap::with_hasher(HashPair::new(Fmix64, WangMix))
}

fn distinct_keys(count: usize, seed: u64) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut seen = HashSet::with_capacity(count);
    while seen.len() < count {
        seen.insert(rng.random::<u64>());
    }
    seen.into_iter().collect()
}

fn inserted_keys_are_found_and_others_are_not<P: Policy>() {
    let keys = distinct_keys(20_000, 1);
    let (present, absent) = keys.split_at(10_000);

    let mut map = int_map::<P>();
    for &key in present {
        assert!(map.insert(key, key ^ 0x5a5a).1);
    }
    assert_eq!(map.len(), present.len());

    for &key in present {
        assert_eq!(map.get(&key), Some(&(key ^ 0x5a5a)));
    }
    for key in absent {
        assert_eq!(map.get(key), None);
        assert_eq!(map.erase(key), 0);
    }
    assert_eq!(map.len(), present.len());
}

fn iteration_yields_every_pair_once<P: Policy>() {
    let mut map = int_map::<P>();
    for key in 0..5_000u64 {
        map.insert(key, key * 3 + 1);
    }

    let mut seen = HashSet::new();
    for (key, value) in &map {
        assert_eq!(*value, key * 3 + 1);
        assert!(seen.insert(*key));
    }
    assert_eq!(seen.len(), 5_000);
    assert_eq!(map.keys().len(), 5_000);
    assert_eq!(
        map.values().map(|v| (v - 1) / 3).sum::<u64>(),
        (0..5_000u64).sum::<u64>()
    );
}

fn crossing_the_threshold_grows_and_keeps_keys<P: Policy>() {
    let mut map = int_map::<P>();
    let mut capacity = map.capacity();
    let mut growths = 0;

    for key in 0..40_000u64 {
        map.insert(key, key);
        if map.capacity() != capacity {
            assert!(map.capacity() > capacity);
            capacity = map.capacity();
            growths += 1;
            for earlier in (0..=key).step_by(37) {
                assert_eq!(map.get(&earlier), Some(&earlier));
            }
        }
        assert_eq!(map.len() as u64, key + 1);
    }
    assert!(growths >= 4, "{} grew only {growths} times", P::NAME);
    assert!(map.table().occupied() <= map.table().max_occupied());
}

fn erase_twice<P: Policy>() {
    let mut map = int_map::<P>();
    for key in 0..100 {
        map.insert(key, key);
    }
    for key in 0..100 {
        assert_eq!(map.erase(&key), 1);
        assert_eq!(map.erase(&key), 0);
        assert_eq!(map.len() as u64, 99 - key);
    }
}

fn churn_matches_model<P: Policy>() {
    let mut rng = SmallRng::seed_from_u64(0xfeed);
    let mut map = int_map::<P>();
    let mut model = std::collections::HashMap::new();

    for _ in 0..50_000 {
        let key = rng.random_range(0..2_000u64);
        match rng.random_range(0..4) {
            0 | 1 => {
                let value = rng.random::<u64>();
                let (stored, inserted) = map.insert(key, value);
                let stored = *stored;
                assert_eq!(inserted, !model.contains_key(&key));
                assert_eq!(stored, *model.entry(key).or_insert(value));
            }
            2 => {
                assert_eq!(map.remove(&key), model.remove(&key));
            }
            _ => {
                assert_eq!(map.get(&key), model.get(&key));
            }
        }
        assert_eq!(map.len(), model.len());
    }
}

/// All keys share a handful of home slots.
#[derive(Clone, Copy, Default)]
struct Clustered;

impl HashCapability<u64> for Clustered {
    fn primary(&self, key: &u64) -> u32 {
        (*key % 3) as u32
    }

    fn alternate(&self, key: &u64) -> u32 {
        *key as u32 & 0x7fff_ffff
    }
}

fn heavy_collisions_stay_consistent<P: Policy>() {
    let mut map: HashMap<u64, u64, P, Clustered> = HashMap::with_hasher(Clustered);
    for key in 0..90 {
        map.insert(key, key);
    }
    for key in (0..90).step_by(2) {
        assert_eq!(map.erase(&key), 1);
    }
    for key in 0..90 {
        assert_eq!(map.contains_key(&key), key % 2 == 1);
    }
    for key in 90..120 {
        map.insert(key, key);
    }
    assert_eq!(map.len(), 45 + 30);
    for key in 90..120 {
        assert_eq!(map.get(&key), Some(&key));
    }
}

macro_rules! policy_tests {
    ($policy:ident: $($name:ident),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                super::$name::<$policy>();
            }
        )*
    };
}

mod linear {
    use super::*;

    policy_tests!(Linear:
        inserted_keys_are_found_and_others_are_not,
        iteration_yields_every_pair_once,
        crossing_the_threshold_grows_and_keeps_keys,
        erase_twice,
        churn_matches_model,
        heavy_collisions_stay_consistent,
    );
}

mod quadratic {
    use super::*;

    policy_tests!(Quadratic:
        inserted_keys_are_found_and_others_are_not,
        iteration_yields_every_pair_once,
        crossing_the_threshold_grows_and_keeps_keys,
        erase_twice,
        churn_matches_model,
        heavy_collisions_stay_consistent,
    );
}

mod robin_hood {
    use super::*;

    policy_tests!(RobinHood:
        inserted_keys_are_found_and_others_are_not,
        iteration_yields_every_pair_once,
        crossing_the_threshold_grows_and_keeps_keys,
        erase_twice,
        churn_matches_model,
        heavy_collisions_stay_consistent,
    );
}

mod cuckoo {
    use super::*;

    // The clustered hasher would pin every key to three first-half slots,
    // which cuckoo placement cannot satisfy.
    policy_tests!(Cuckoo:
        inserted_keys_are_found_and_others_are_not,
        iteration_yields_every_pair_once,
        crossing_the_threshold_grows_and_keeps_keys,
        erase_twice,
        churn_matches_model,
    );
}
