use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use dispatchpool::{run_dedicated_threads, DispatchMode, FnTask, TaskRef, ThreadPoolBuilder};

/// A CPU-bound task: compute the sum of a range.
fn cpu_task() -> u64 {
    (0..10u64).sum()
}

fn prepare_tasks(n: usize) -> Vec<TaskRef> {
    (0..n)
        .map(|_| {
            FnTask::new(|| {
                let _ = cpu_task();
            }) as TaskRef
        })
        .collect()
}

fn benchmark_dispatch_modes(c: &mut Criterion) {
    let num_workers = 4;
    let num_tasks = 10_000;

    let mut group = c.benchmark_group("dispatch");
    group.sample_size(10);

    for (mode, label) in [
        (DispatchMode::RoundRobin, "round_robin_10k_tasks"),
        (DispatchMode::Random, "random_10k_tasks"),
        (DispatchMode::Greedy, "greedy_10k_tasks"),
        (DispatchMode::SampledGreedy, "sampled_greedy_10k_tasks"),
    ] {
        group.bench_function(label, |b| {
            b.iter_batched(
                || {
                    // Prepare a fresh pool and tasks each iteration
                    let pool = ThreadPoolBuilder::new()
                        .num_workers(num_workers)
                        .dispatch_mode(mode)
                        .build()
                        .unwrap();
                    let tasks = prepare_tasks(num_tasks);
                    (pool, tasks)
                },
                |(pool, tasks)| {
                    pool.start();
                    for task in tasks {
                        pool.execute(task);
                    }
                    pool.wait();
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

fn benchmark_pool_vs_dedicated_threads(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_vs_dedicated");
    group.sample_size(10);

    let num_tasks = 1_000;

    group.bench_function("pool_1k_tasks", |b| {
        b.iter_batched(
            || {
                let pool = ThreadPoolBuilder::new()
                    .num_workers(4)
                    .dispatch_mode(DispatchMode::Greedy)
                    .build()
                    .unwrap();
                let tasks = prepare_tasks(num_tasks);
                (pool, tasks)
            },
            |(pool, tasks)| {
                pool.start();
                for task in tasks {
                    pool.execute(task);
                }
                pool.wait();
            },
            BatchSize::LargeInput,
        )
    });

    group.bench_function("dedicated_threads_1k_tasks", |b| {
        b.iter_batched(
            || prepare_tasks(num_tasks),
            run_dedicated_threads,
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_dispatch_modes,
    benchmark_pool_vs_dedicated_threads
);
criterion_main!(benches);
