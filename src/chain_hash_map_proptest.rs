#![cfg(test)]

// Property tests for ChainHashMap kept inside the crate so they can
// check internal invariants (bucket counts) alongside the public API.

use crate::chain_hash_map::{ChainHashMap, REHASH_THRESHOLD};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeMap, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    GetOrDefault(usize),
    GetOrInsertAdd(usize, i32),
    Contains(usize),
    Iterate,
    CloneCheck,
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Get),
            1 => idx.clone().prop_map(OpI::GetOrDefault),
            2 => (idx.clone(), -8i32..8).prop_map(|(i, d)| OpI::GetOrInsertAdd(i, d)),
            2 => idx.clone().prop_map(OpI::Contains),
            1 => Just(OpI::Iterate),
            1 => Just(OpI::CloneCheck),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Collision-heavy key pool: "Az" and "BY" have identical djb2 codes
// (33*'A' + 'z' == 33*'B' + 'Y'), and so does any same-length
// concatenation of the two blocks, so every bucket count co-locates them.
fn collision_pool() -> Vec<String> {
    let blocks = ["Az", "BY"];
    let mut pool = Vec::new();
    for a in blocks {
        pool.push(a.to_string());
        for b in blocks {
            pool.push(format!("{a}{b}"));
            for c in blocks {
                pool.push(format!("{a}{b}{c}"));
            }
        }
    }
    pool
}

fn arb_collision_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    let pool = collision_pool();
    let idx = 0..pool.len();
    let op = prop_oneof![
        4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
        3 => idx.clone().prop_map(OpI::Remove),
        2 => idx.clone().prop_map(OpI::Get),
        2 => idx.clone().prop_map(OpI::Contains),
        1 => Just(OpI::Iterate),
        1 => Just(OpI::CloneCheck),
    ];
    proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
}

fn run_scenario(pool: &[String], ops: Vec<OpI>) -> Result<(), TestCaseError> {
    let mut sut: ChainHashMap<String, i32> = ChainHashMap::new();
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = pool[i].clone();
                let old = sut.insert(k.clone(), v);
                prop_assert_eq!(old, model.insert(k, v), "insert must return prior value");
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(k));
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            OpI::GetOrDefault(i) => {
                let k = &pool[i];
                let expected = model.get(k).copied().unwrap_or_default();
                prop_assert_eq!(sut.get_or_default(k), expected);
                prop_assert_eq!(sut.contains_key(k), model.contains_key(k), "probe must not insert");
            }
            OpI::GetOrInsertAdd(i, d) => {
                let k = pool[i].clone();
                let v = sut.get_or_insert(k.clone());
                *v += d;
                let mv = model.entry(k).or_insert(0);
                *mv += d;
                prop_assert_eq!(*v, *mv);
            }
            OpI::Contains(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.contains_key(k), model.contains_key(k));
            }
            OpI::Iterate => {
                let seen: BTreeMap<String, i32> =
                    sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                let expected: BTreeMap<String, i32> =
                    model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(seen, expected, "iteration must match model content");
                prop_assert_eq!(sut.keys().len(), model.len());
                prop_assert_eq!(sut.values().len(), model.len());
            }
            OpI::CloneCheck => {
                let copy = sut.clone();
                prop_assert!(copy.structural_eq(&sut), "deep copy must be structural");
                prop_assert_eq!(copy.bucket_count(), sut.bucket_count());
            }
            OpI::Clear => {
                let buckets = sut.bucket_count();
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.bucket_count(), buckets, "clear keeps bucket count");
            }
        }

        // Post-conditions after each op
        // 1) Size parity with the model
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        // 2) Load-factor invariant: never above threshold at rest
        prop_assert!(
            sut.len() as f64 / sut.bucket_count() as f64 <= REHASH_THRESHOLD,
            "load factor invariant violated: {} entries over {} buckets",
            sut.len(),
            sut.bucket_count()
        );
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - insert returns the prior value and overwrites in place; remove/get/
//   contains_key parity with the model for present and absent keys.
// - get_or_default never mutates; get_or_insert vivifies exactly like
//   `entry(..).or_insert(0)`.
// - Iteration yields exactly the model's content; clear keeps buckets.
// - Deep copies are structurally equal; the load factor stays within
//   threshold after every operation.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_scenario(&pool, ops)?;
    }
}

// Property: Same invariants under worst-case chaining, with a key pool
// engineered so same-length keys share one djb2 code (and therefore one
// bucket at every bucket count). Stresses chain search, unlinking at
// arbitrary positions, and rehash relinking of long chains.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_collision_scenario()) {
        run_scenario(&pool, ops)?;
    }
}

/// Invariant: the engineered collision pool really does collide.
#[test]
fn collision_pool_collides() {
    use crate::hash_code::str_hash_code;
    assert_eq!(str_hash_code("Az"), str_hash_code("BY"));
    assert_eq!(str_hash_code("AzAz"), str_hash_code("BYBY"));
    assert_eq!(str_hash_code("AzBY"), str_hash_code("BYAz"));
}
