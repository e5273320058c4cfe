//! Benchmarks comparing the three probe strategies
//!
//! Measures insertion, hit/miss lookup and erase/re-insert cycles for:
//! - LinearTable
//! - QuadraticTable
//! - DoubleHashTable
//! - std::HashMap (baseline comparison)

use criterion::{
    black_box, criterion_group, criterion_main, measurement::WallTime, BenchmarkGroup,
    BenchmarkId, Criterion, Throughput,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::time::Duration;

use openprobe::benchmark::{generator, table_capacity, KeyPattern, KeyValue};
use openprobe::{OpenAddressingTable, ProbeStrategy, DoubleHashing, LinearProbing, QuadraticProbing};

// =============================================================================
// BENCHMARK CONFIGURATION
// =============================================================================

const SIZES: &[usize] = &[1_000, 10_000];
const LOAD_FACTORS: &[f64] = &[0.5, 0.9];
const SEED: u64 = 0x5EED;

fn workload(pattern: KeyPattern, size: usize) -> (Vec<KeyValue>, Vec<i64>) {
    let mut rng = StdRng::seed_from_u64(SEED);
    let key_upper = (size * 20) as i64;
    let key_values = generator::generate(pattern, &mut rng, size, key_upper).unwrap();
    let existing = key_values.iter().map(|(k, _)| *k).collect();
    let misses = generator::generate_miss_keys(&mut rng, size, &existing, key_upper).unwrap();
    (key_values, misses)
}

/// Fixed table holding `key_values`, plus the number of keys it rejected
fn filled<P: ProbeStrategy>(
    capacity: usize,
    key_values: &[KeyValue],
) -> (OpenAddressingTable<i64, i64, P>, usize) {
    let mut table = OpenAddressingTable::<i64, i64, P>::fixed(capacity);
    let rejected = key_values
        .iter()
        .filter(|&&(k, v)| table.insert(k, v).is_err())
        .count();
    (table, rejected)
}

/// Prepares a table and reports keys that did not fit, so results at high
/// load factors are read against the actual contents
fn prepared<P: ProbeStrategy>(
    name: &str,
    capacity: usize,
    key_values: &[KeyValue],
) -> OpenAddressingTable<i64, i64, P> {
    let (table, rejected) = filled::<P>(capacity, key_values);
    if rejected > 0 {
        println!(
            "{}: {} of {} keys rejected at capacity {}",
            name,
            rejected,
            key_values.len(),
            capacity
        );
    }
    table
}

fn bench_insert_kind<P: ProbeStrategy>(
    group: &mut BenchmarkGroup<'_, WallTime>,
    name: &str,
    capacity: usize,
    key_values: &[KeyValue],
) {
    prepared::<P>(name, capacity, key_values);
    group.bench_with_input(BenchmarkId::new(name, capacity), key_values, |b, kv| {
        b.iter(|| black_box(filled::<P>(capacity, kv)));
    });
}

// =============================================================================
// INSERTION BENCHMARKS
// =============================================================================

fn bench_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("insertion");
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    for &size in SIZES {
        let (key_values, _) = workload(KeyPattern::Random, size);
        group.throughput(Throughput::Elements(size as u64));

        for &lf in LOAD_FACTORS {
            let capacity = table_capacity(size, lf);
            bench_insert_kind::<LinearProbing>(&mut group, "Linear", capacity, &key_values);
            bench_insert_kind::<QuadraticProbing>(&mut group, "Quadratic", capacity, &key_values);
            bench_insert_kind::<DoubleHashing>(&mut group, "Double", capacity, &key_values);
        }

        group.bench_with_input(BenchmarkId::new("std::HashMap", size), &key_values, |b, kv| {
            b.iter(|| {
                let mut map = HashMap::with_capacity(kv.len());
                for &(k, v) in kv {
                    map.insert(black_box(k), black_box(v));
                }
                black_box(map)
            });
        });
    }
    group.finish();
}

// =============================================================================
// LOOKUP BENCHMARKS
// =============================================================================

fn bench_lookup_kind<P: ProbeStrategy>(
    group: &mut BenchmarkGroup<'_, WallTime>,
    name: &str,
    capacity: usize,
    key_values: &[KeyValue],
    misses: &[i64],
) {
    let table = prepared::<P>(name, capacity, key_values);
    group.bench_function(BenchmarkId::new(format!("{}/hit", name), capacity), |b| {
        b.iter(|| {
            for (k, _) in key_values {
                black_box(table.get(k));
            }
        });
    });
    group.bench_function(BenchmarkId::new(format!("{}/miss", name), capacity), |b| {
        b.iter(|| {
            for k in misses {
                black_box(table.get(k));
            }
        });
    });
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    for pattern in KeyPattern::ALL {
        let size = SIZES[0];
        let (key_values, misses) = workload(pattern, size);
        group.throughput(Throughput::Elements(size as u64));

        for &lf in LOAD_FACTORS {
            let capacity = table_capacity(size, lf);
            let label = |kind: &str| format!("{}/{}", pattern.label().to_lowercase(), kind);
            bench_lookup_kind::<LinearProbing>(&mut group, &label("Linear"), capacity, &key_values, &misses);
            bench_lookup_kind::<QuadraticProbing>(&mut group, &label("Quadratic"), capacity, &key_values, &misses);
            bench_lookup_kind::<DoubleHashing>(&mut group, &label("Double"), capacity, &key_values, &misses);
        }
    }
    group.finish();
}

// =============================================================================
// TOMBSTONE BENCHMARKS
// =============================================================================

fn bench_churn_kind<P: ProbeStrategy>(
    group: &mut BenchmarkGroup<'_, WallTime>,
    name: &str,
    capacity: usize,
    key_values: &[KeyValue],
) {
    let template = prepared::<P>(name, capacity, key_values);
    group.bench_function(BenchmarkId::new(name, capacity), |b| {
        b.iter_batched(
            || template.clone(),
            |mut table| {
                for (k, _) in key_values.iter().step_by(2) {
                    table.erase(k);
                }
                let rejected = key_values
                    .iter()
                    .step_by(2)
                    .filter(|&&(k, v)| table.insert(k, v.wrapping_add(1)).is_err())
                    .count();
                black_box((table, rejected))
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

fn bench_erase_reinsert(c: &mut Criterion) {
    let mut group = c.benchmark_group("erase_reinsert");
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let size = SIZES[0];
    let (key_values, _) = workload(KeyPattern::Clustered, size);
    for &lf in LOAD_FACTORS {
        let capacity = table_capacity(size, lf);
        bench_churn_kind::<LinearProbing>(&mut group, "Linear", capacity, &key_values);
        bench_churn_kind::<QuadraticProbing>(&mut group, "Quadratic", capacity, &key_values);
        bench_churn_kind::<DoubleHashing>(&mut group, "Double", capacity, &key_values);
    }
    group.finish();
}

criterion_group!(benches, bench_insertion, bench_lookup, bench_erase_reinsert);
criterion_main!(benches);
