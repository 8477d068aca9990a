// Copyright 2025 Stoolap Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Randomized Window Function Tests
//!
//! Checks ranking and LAST_VALUE invariants over seeded random partitions.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stoolap_window::{global_registry, TypeDescriptor, Value, WindowEvaluator, WindowOutput};

const SEED: u64 = 0x5700_1a70;
const ROUNDS: usize = 200;

/// Sorted integer keys with frequent duplicates
fn sorted_keys(rng: &mut StdRng) -> Vec<i64> {
    let len = rng.random_range(0..64);
    let mut keys: Vec<i64> = (0..len).map(|_| rng.random_range(0..12)).collect();
    keys.sort_unstable();
    keys
}

fn run_keys(f: &mut dyn WindowEvaluator, keys: &[i64]) -> Vec<i64> {
    f.reset();
    for k in keys {
        f.consume(&[Value::integer(*k)]).unwrap();
    }
    match f.finish() {
        WindowOutput::Pivoted(v) => v,
        other => panic!("expected pivoted output, got {other:?}"),
    }
}

fn bind(name: &str) -> Box<dyn WindowEvaluator> {
    global_registry()
        .resolve(name, &[TypeDescriptor::integer()])
        .unwrap()
}

#[test]
fn test_row_number_is_sequential() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut f = global_registry().resolve("ROW_NUMBER", &[]).unwrap();
    for _ in 0..ROUNDS {
        let n = rng.random_range(0..100);
        f.reset();
        for _ in 0..n {
            f.consume(&[]).unwrap();
        }
        let expected: Vec<i64> = (1..=n as i64).collect();
        assert_eq!(f.finish(), WindowOutput::Pivoted(expected));
    }
}

#[test]
fn test_rank_invariants() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut rank = bind("RANK");
    for _ in 0..ROUNDS {
        let keys = sorted_keys(&mut rng);
        let ranks = run_keys(rank.as_mut(), &keys);
        assert_eq!(ranks.len(), keys.len());

        for (i, r) in ranks.iter().enumerate() {
            let position = i as i64 + 1;
            let group_start = i == 0 || keys[i] != keys[i - 1];
            if group_start {
                assert_eq!(*r, position, "keys {keys:?}");
            } else {
                assert_eq!(*r, ranks[i - 1], "keys {keys:?}");
                assert!(*r < position, "keys {keys:?}");
            }
        }
    }
}

#[test]
fn test_multi_column_rank_invariants() {
    let mut rng = StdRng::seed_from_u64(SEED ^ 4);
    let args = [TypeDescriptor::text(), TypeDescriptor::integer()];
    let mut rank = global_registry().resolve("RANK", &args).unwrap();
    let mut dense = global_registry().resolve("DENSE_RANK", &args).unwrap();
    let depts = ["eng", "fin", "ops"];

    for _ in 0..ROUNDS {
        let len = rng.random_range(0..48);
        let mut keys: Vec<(&str, i64)> = (0..len)
            .map(|_| (depts[rng.random_range(0..depts.len())], rng.random_range(0..4)))
            .collect();
        keys.sort_unstable();

        rank.reset();
        dense.reset();
        for (dept, n) in &keys {
            let row = [Value::text(*dept), Value::integer(*n)];
            rank.consume(&row).unwrap();
            dense.consume(&row).unwrap();
        }
        let ranks = rank.finish().as_pivoted().unwrap().to_vec();
        let dense_ranks = dense.finish().as_pivoted().unwrap().to_vec();

        let mut groups = 0;
        for i in 0..keys.len() {
            let group_start = i == 0 || keys[i] != keys[i - 1];
            if group_start {
                groups += 1;
                assert_eq!(ranks[i], i as i64 + 1, "keys {keys:?}");
            } else {
                assert_eq!(ranks[i], ranks[i - 1], "keys {keys:?}");
                assert_eq!(dense_ranks[i], dense_ranks[i - 1], "keys {keys:?}");
            }
            assert_eq!(dense_ranks[i], groups, "keys {keys:?}");
        }
    }
}

#[test]
fn test_dense_rank_invariants() {
    let mut rng = StdRng::seed_from_u64(SEED ^ 1);
    let mut dense = bind("DENSE_RANK");
    for _ in 0..ROUNDS {
        let keys = sorted_keys(&mut rng);
        let ranks = run_keys(dense.as_mut(), &keys);

        let mut distinct = keys.clone();
        distinct.dedup();
        let mut seen = ranks.clone();
        seen.dedup();
        let expected: Vec<i64> = (1..=distinct.len() as i64).collect();
        assert_eq!(seen, expected, "keys {keys:?}");
    }
}

#[test]
fn test_rank_and_dense_rank_agree_on_distinct_keys() {
    let mut rng = StdRng::seed_from_u64(SEED ^ 2);
    let mut rank = bind("RANK");
    let mut dense = bind("DENSE_RANK");
    for _ in 0..ROUNDS {
        let mut keys = sorted_keys(&mut rng);
        keys.dedup();
        assert_eq!(
            run_keys(rank.as_mut(), &keys),
            run_keys(dense.as_mut(), &keys)
        );
    }
}

#[test]
fn test_last_value_matches_reference() {
    let mut rng = StdRng::seed_from_u64(SEED ^ 3);
    let mut f = global_registry()
        .resolve(
            "LAST_VALUE",
            &[TypeDescriptor::integer(), TypeDescriptor::boolean()],
        )
        .unwrap();

    for _ in 0..ROUNDS {
        let len = rng.random_range(0..32);
        let values: Vec<Value> = (0..len)
            .map(|_| {
                if rng.random_bool(0.4) {
                    Value::null_unknown()
                } else {
                    Value::integer(rng.random_range(-100..100))
                }
            })
            .collect();
        let skip_nulls = rng.random_bool(0.5);

        f.reset();
        for v in &values {
            f.consume(&[v.clone(), Value::boolean(skip_nulls)]).unwrap();
        }
        let output = f.finish();
        let got = output.as_partition_value().unwrap();

        let expected = if skip_nulls {
            values.iter().rev().find(|v| !v.is_null())
        } else {
            values.last()
        };
        match expected {
            Some(v) if !v.is_null() => assert_eq!(got, v),
            _ => assert!(got.is_null(), "values {values:?}, got {got:?}"),
        }
    }
}
