//! Generates a batch of random arrays sequentially and then through the
//! pool, comparing wall-clock time. The mean of the generated values should
//! land near `amplitude / 2` either way.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use dispatchpool::{DispatchMode, Task, ThreadPoolBuilder};
use rand::Rng;

struct ArrayGenerator {
    len: usize,
    amplitude: i32,
    result: Mutex<Vec<i32>>,
    generated: AtomicBool,
}

impl ArrayGenerator {
    fn new(len: usize, amplitude: i32) -> Arc<Self> {
        Arc::new(Self {
            len,
            amplitude: amplitude.max(1),
            result: Mutex::new(Vec::new()),
            generated: AtomicBool::new(false),
        })
    }

    fn take_result(&self) -> Vec<i32> {
        std::mem::take(&mut self.result.lock().unwrap())
    }
}

impl Task for ArrayGenerator {
    fn execute(&self) {
        let mut rng = rand::thread_rng();
        let mut out = Vec::with_capacity(self.len);
        for _ in 0..self.len {
            out.push(rng.gen_range(1..=self.amplitude));
        }
        *self.result.lock().unwrap() = out;
        self.generated.store(true, Ordering::Release);
    }

    fn is_done(&self) -> bool {
        self.generated.load(Ordering::Acquire)
    }
}

fn mean(arrays: &[Vec<i32>]) -> f64 {
    let total: i64 = arrays
        .iter()
        .flat_map(|a| a.iter())
        .map(|&v| v as i64)
        .sum();
    let count: usize = arrays.iter().map(Vec::len).sum();
    total as f64 / count as f64
}

fn main() {
    env_logger::init();

    let num_arrays = 60;
    let array_len = 10_000;
    let amplitude = 1_000;

    // Sequential baseline.
    let started = Instant::now();
    let mut seq_arrays = Vec::with_capacity(num_arrays);
    let mut rng = rand::thread_rng();
    for _ in 0..num_arrays {
        let arr: Vec<i32> = (0..array_len).map(|_| rng.gen_range(1..=amplitude)).collect();
        seq_arrays.push(arr);
    }
    println!(
        "amplitude 1..{}, mean: {:.3}",
        amplitude,
        mean(&seq_arrays)
    );
    println!("sequential code executed in {:.3?}", started.elapsed());

    // Same workload through the pool.
    let started = Instant::now();
    let pool = ThreadPoolBuilder::new()
        .num_workers(2)
        .dispatch_mode(DispatchMode::RoundRobin)
        .build()
        .expect("worker count is positive");
    pool.start();

    let generators: Vec<_> = (0..num_arrays)
        .map(|_| ArrayGenerator::new(array_len, amplitude))
        .collect();
    for generator in &generators {
        pool.execute(generator.clone());
    }
    pool.wait();

    let pool_arrays: Vec<_> = generators.iter().map(|g| g.take_result()).collect();
    println!(
        "amplitude 1..{}, mean: {:.3}",
        amplitude,
        mean(&pool_arrays)
    );
    println!("thread pool executed in {:.3?}", started.elapsed());
}
