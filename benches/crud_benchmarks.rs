use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use sorted_list_diff::{NaturalOrder, Notification, Rules, SortedList};
use std::hint::black_box;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn filled(keys: &[i64]) -> SortedList<i64, NaturalOrder, Vec<Notification>> {
    let mut list = SortedList::new(NaturalOrder, Vec::new());
    list.add_all(keys.iter().copied()).unwrap();
    list.observer_mut().clear();
    list
}

// ─── Insert Benchmarks ──────────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for (name, keys) in [
        ("ordered", ordered_keys(N)),
        ("reverse", reverse_ordered_keys(N)),
        ("random", random_keys(N)),
    ] {
        group.bench_function(BenchmarkId::new(format!("unbatched/{name}"), N), |b| {
            b.iter(|| {
                let mut list = SortedList::new(NaturalOrder, Vec::new());
                for &k in &keys {
                    list.insert(k).unwrap();
                }
                list
            });
        });

        group.bench_function(BenchmarkId::new(format!("batched/{name}"), N), |b| {
            b.iter(|| {
                let mut list = SortedList::new(NaturalOrder, Vec::new());
                {
                    let mut batch = list.batch();
                    for &k in &keys {
                        batch.insert(k).unwrap();
                    }
                }
                list
            });
        });

        group.bench_function(BenchmarkId::new(format!("Vec/{name}"), N), |b| {
            b.iter(|| {
                let mut vec: Vec<i64> = Vec::new();
                for &k in &keys {
                    let position = vec.partition_point(|e| *e <= k);
                    vec.insert(position, k);
                }
                vec
            });
        });
    }

    group.finish();
}

// ─── Merge Benchmarks ───────────────────────────────────────────────────────

fn bench_add_all(c: &mut Criterion) {
    let existing: Vec<i64> = ordered_keys(N).into_iter().map(|k| k * 2).collect();
    let interleaved: Vec<i64> = existing.iter().map(|k| k + 1).collect();
    let appended: Vec<i64> = existing.iter().map(|k| k + 2 * N as i64).collect();

    let mut group = c.benchmark_group("add_all");

    for (name, incoming) in [("interleaved", &interleaved), ("appended", &appended)] {
        group.bench_function(BenchmarkId::new(name, N), |b| {
            b.iter_batched(
                || filled(&existing),
                |mut list| {
                    list.add_all(incoming.iter().copied()).unwrap();
                    list
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// ─── Upsert Benchmarks ──────────────────────────────────────────────────────

fn bench_replace_all(c: &mut Criterion) {
    let rules = Rules::new(
        |a: &(i64, u32), b: &(i64, u32)| a.0.cmp(&b.0),
        |a: &(i64, u32), b: &(i64, u32)| a.0 == b.0,
        |old: &(i64, u32), new: &(i64, u32)| old.1 == new.1,
    );
    let keys = random_keys(N);
    let existing: Vec<(i64, u32)> = keys.iter().map(|&k| (k, 0)).collect();
    // Every other item gets new content, and a tenth of the updates are new items.
    let incoming: Vec<(i64, u32)> = keys
        .iter()
        .enumerate()
        .map(|(i, &k)| if i % 10 == 0 { (k + 1, 1) } else { (k, (i % 2) as u32) })
        .collect();

    let mut group = c.benchmark_group("replace_all");

    group.bench_function(BenchmarkId::new("upsert", N), |b| {
        b.iter_batched(
            || {
                let mut list = SortedList::new(&rules, Vec::<Notification>::new());
                list.add_all(existing.iter().copied()).unwrap();
                list
            },
            |mut list| {
                list.edit().replace_all(incoming.iter().copied()).commit().unwrap();
                list
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Lookup Benchmarks ──────────────────────────────────────────────────────

fn bench_index_of(c: &mut Criterion) {
    let keys = random_keys(N);
    let list = filled(&keys);

    let mut group = c.benchmark_group("index_of");

    group.bench_function(BenchmarkId::new("random", N), |b| {
        b.iter(|| {
            for k in &keys {
                black_box(list.index_of(k));
            }
        });
    });

    group.finish();
}

// ─── Remove Benchmarks ──────────────────────────────────────────────────────

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");

    for (name, keys) in [
        ("ordered", ordered_keys(N)),
        ("reverse", reverse_ordered_keys(N)),
        ("random", random_keys(N)),
    ] {
        group.bench_function(BenchmarkId::new(format!("unbatched/{name}"), N), |b| {
            b.iter_batched(
                || filled(&keys),
                |mut list| {
                    for k in &keys {
                        list.remove(k);
                    }
                    list
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(BenchmarkId::new(format!("batched/{name}"), N), |b| {
            b.iter_batched(
                || filled(&keys),
                |mut list| {
                    list.edit().remove_each(keys.iter().copied()).commit().unwrap();
                    list
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(insert_benches, bench_insert, bench_add_all);

criterion_group!(upsert_benches, bench_replace_all, bench_index_of);

criterion_group!(remove_benches, bench_remove);

criterion_main!(insert_benches, upsert_benches, remove_benches);
