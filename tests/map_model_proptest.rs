// Model-based property tests: every policy against std's HashMap.
//
// - Model: std::collections::HashMap<u16, u32> with "insert does not
//   overwrite" semantics (entry().or_insert).
// - Operations: insert, get_or_insert_default, in-place add, erase, get,
//   clear.
// - Invariant after each step: len() matches the model, and the result of
//   each operation matches what the model predicts.
// - Final check: iteration yields exactly the model's pairs.
use std::collections::HashMap as ModelMap;

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
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Insert(u16, u32),
    GetOrInsertDefault(u16),
    Add(u16, u32),
    Erase(u16),
    Get(u16),
    Clear,
}

fn op_strategy(keys: u16) -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..keys, any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        1 => (0..keys).prop_map(Op::GetOrInsertDefault),
        2 => (0..keys, any::<u32>()).prop_map(|(k, v)| Op::Add(k, v)),
        3 => (0..keys).prop_map(Op::Erase),
        2 => (0..keys).prop_map(Op::Get),
        1 => Just(Op::Clear),
    ]
}

/// Maps every key to one of four home slots.
#[derive(Clone, Copy, Default)]
struct FourHomes;

impl HashCapability<u16> for FourHomes {
    fn primary(&self, key: &u16) -> u32 {
        u32::from(*key % 4)
    }

    fn alternate(&self, key: &u16) -> u32 {
        u32::from(*key)
    }
}

fn run_model<P, H>(hasher: H, ops: Vec<Op>) -> Result<(), TestCaseError>
where
    P: Policy,
    H: HashCapability<u16>,
{
    let mut map: HashMap<u16, u32, P, H> = HashMap::with_hasher(hasher);
    let mut model: ModelMap<u16, u32> = ModelMap::new();

    for op in ops {
        match op {
            Op::Insert(k, v) => {
                let (stored, inserted) = map.insert(k, v);
                let stored = *stored;
                prop_assert_eq!(inserted, !model.contains_key(&k));
                prop_assert_eq!(stored, *model.entry(k).or_insert(v));
            }
            Op::GetOrInsertDefault(k) => {
                let got = *map.get_or_insert_default(k);
                prop_assert_eq!(got, *model.entry(k).or_default());
            }
            Op::Add(k, v) => match (map.get_mut(&k), model.get_mut(&k)) {
                (Some(ours), Some(theirs)) => {
                    *ours = ours.wrapping_add(v);
                    *theirs = theirs.wrapping_add(v);
                }
                (None, None) => {}
                (ours, theirs) => {
                    prop_assert!(false, "presence of {} differs: {:?} vs {:?}", k, ours, theirs);
                }
            },
            Op::Erase(k) => {
                prop_assert_eq!(map.erase(&k), usize::from(model.remove(&k).is_some()));
            }
            Op::Get(k) => {
                prop_assert_eq!(map.get(&k), model.get(&k));
                prop_assert_eq!(map.at(&k).ok(), model.get(&k));
            }
            Op::Clear => {
                map.clear();
                model.clear();
            }
        }
        prop_assert_eq!(map.len(), model.len());
    }

    let mut ours: Vec<(u16, u32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
    ours.sort_unstable();
    let mut theirs: Vec<(u16, u32)> = model.into_iter().collect();
    theirs.sort_unstable();
    prop_assert_eq!(ours, theirs);
    Ok(())
}

fn mixed() -> HashPair<Fmix64, WangMix> {
    HashPair::new(Fmix64, WangMix)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn linear_matches_model(ops in proptest::collection::vec(op_strategy(256), 1..400)) {
        run_model::<Linear, _>(mixed(), ops)?;
    }

    #[test]
    fn quadratic_matches_model(ops in proptest::collection::vec(op_strategy(256), 1..400)) {
        run_model::<Quadratic, _>(mixed(), ops)?;
    }

    #[test]
    fn robin_hood_matches_model(ops in proptest::collection::vec(op_strategy(256), 1..400)) {
        run_model::<RobinHood, _>(mixed(), ops)?;
    }

    #[test]
    fn cuckoo_matches_model(ops in proptest::collection::vec(op_strategy(256), 1..400)) {
        run_model::<Cuckoo, _>(mixed(), ops)?;
    }

    #[test]
    fn linear_clustered_matches_model(ops in proptest::collection::vec(op_strategy(48), 1..300)) {
        run_model::<Linear, _>(FourHomes, ops)?;
    }

    #[test]
    fn quadratic_clustered_matches_model(ops in proptest::collection::vec(op_strategy(48), 1..300)) {
        run_model::<Quadratic, _>(FourHomes, ops)?;
    }

    #[test]
    fn robin_hood_clustered_matches_model(ops in proptest::collection::vec(op_strategy(48), 1..300)) {
        run_model::<RobinHood, _>(FourHomes, ops)?;
    }
}
