#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::similar_names
)]
use std::{collections::HashMap, hint::black_box};

use criterion::{Criterion, criterion_group, criterion_main};
use hashmaps::{ChainingHashMap, OpenAddressingHashMap, StringHashMap, positional_hash};
use proptest::{
    collection::vec,
    prelude::{Strategy, any},
    strategy::ValueTree,
    test_runner::TestRunner,
};

const ITEMS_AMOUNT: usize = 1000;
const SAMPLE_SIZE: usize = 10;
const INITIAL_CAPACITY: usize = 53;

fn fill<M: StringHashMap<String>>(map: &mut M, items: &[(String, String)]) {
    for (key, value) in items {
        map.put(key.as_str(), value.clone());
    }
}

fn lookup<M: StringHashMap<String>>(map: &M, items: &[(String, String)]) {
    for (key, _) in items {
        black_box(map.get(key));
    }
}

fn hash_map_benches(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let items =
        vec(any::<(String, String)>(), ITEMS_AMOUNT).new_tree(&mut runner).unwrap().current();

    let mut group = c.benchmark_group("Hash map comparison benchmark");
    group.sample_size(SAMPLE_SIZE);

    group.bench_function("open addressing put", |b| {
        b.iter(|| {
            let mut map = OpenAddressingHashMap::new(INITIAL_CAPACITY, positional_hash);
            fill(&mut map, &items);
            map
        });
    });
    group.bench_function("chaining put", |b| {
        b.iter(|| {
            let mut map = ChainingHashMap::new(INITIAL_CAPACITY, positional_hash);
            fill(&mut map, &items);
            map
        });
    });
    group.bench_function("rust std insert", |b| {
        b.iter(|| {
            let mut map = HashMap::new();
            for (key, value) in items.clone() {
                map.insert(key, value);
            }
            map
        });
    });

    let mut open = OpenAddressingHashMap::new(INITIAL_CAPACITY, positional_hash);
    fill(&mut open, &items);
    let mut chained = ChainingHashMap::new(INITIAL_CAPACITY, positional_hash);
    fill(&mut chained, &items);
    chained.resize_table(ITEMS_AMOUNT);
    let std_map: HashMap<String, String> = items.iter().cloned().collect();

    group.bench_function("open addressing get", |b| b.iter(|| lookup(&open, &items)));
    group.bench_function("chaining get", |b| b.iter(|| lookup(&chained, &items)));
    group.bench_function("rust std get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                black_box(std_map.get(key));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, hash_map_benches);

criterion_main!(benches);
