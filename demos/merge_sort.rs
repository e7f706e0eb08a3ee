//! Bottom-up merge sort where each pass's segment merges run as pool
//! tasks. Compares one worker against two, and both against the standard
//! library sort.
//!
//! Each merge task reads a shared snapshot of the previous pass and writes
//! its merged segment into task-local storage; the driver stitches the
//! segments together after `wait()`. Segments never overlap, so every pass
//! is embarrassingly parallel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use dispatchpool::{DispatchMode, Task, ThreadPool};
use rand::Rng;

struct MergeSegments {
    src: Arc<Vec<i32>>,
    left: usize,
    mid: usize,
    right: usize,
    merged: Mutex<Vec<i32>>,
    done: AtomicBool,
}

impl MergeSegments {
    fn new(src: Arc<Vec<i32>>, left: usize, mid: usize, right: usize) -> Arc<Self> {
        Arc::new(Self {
            src,
            left,
            mid,
            right,
            merged: Mutex::new(Vec::new()),
            done: AtomicBool::new(false),
        })
    }
}

impl Task for MergeSegments {
    fn execute(&self) {
        let src = &self.src;
        let mut out = Vec::with_capacity(self.right - self.left);
        let (mut i, mut j) = (self.left, self.mid);

        while i < self.mid && j < self.right {
            if src[i] < src[j] {
                out.push(src[i]);
                i += 1;
            } else {
                out.push(src[j]);
                j += 1;
            }
        }
        out.extend_from_slice(&src[i..self.mid]);
        out.extend_from_slice(&src[j..self.right]);

        *self.merged.lock().unwrap() = out;
        self.done.store(true, Ordering::Release);
    }

    fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }
}

fn merge_sort(data: Vec<i32>, pool: &ThreadPool) -> Vec<i32> {
    let size = data.len();
    let mut src = Arc::new(data);

    pool.start();
    let mut block = 2;
    while block < size * 2 {
        // Suspend while batching submissions so no worker wakes up for a
        // half-built pass.
        pool.suspend();
        let mut tasks = Vec::with_capacity(size / block + 1);
        let mut left = 0;
        while left < size {
            let mid = (left + block / 2).min(size);
            let right = (left + block).min(size);
            let task = MergeSegments::new(Arc::clone(&src), left, mid, right);
            tasks.push(task.clone());
            pool.execute(task);
            left += block;
        }
        pool.start();
        pool.wait();

        let mut next = Vec::with_capacity(size);
        for task in &tasks {
            next.append(&mut task.merged.lock().unwrap());
        }
        src = Arc::new(next);
        block *= 2;
    }

    Arc::try_unwrap(src).unwrap_or_else(|arc| (*arc).clone())
}

fn main() {
    env_logger::init();

    let size = 1_000_000;
    let mut rng = rand::thread_rng();
    let data: Vec<i32> = (0..size).map(|_| rng.gen_range(1..=(size as i32 / 3))).collect();

    let started = Instant::now();
    let mut std_result = data.clone();
    std_result.sort();
    println!("std sort executed in {:.3?}", started.elapsed());

    for workers in [1, 2] {
        let started = Instant::now();
        let pool = ThreadPool::new(workers, DispatchMode::RoundRobin)
            .expect("worker count is positive");
        let result = merge_sort(data.clone(), &pool);
        println!(
            "merge sort with {} worker(s) executed in {:.3?}",
            workers,
            started.elapsed()
        );
        println!(
            "{}",
            if result == std_result {
                "TEST PASSED"
            } else {
                "TEST FAILED"
            }
        );
    }
}
