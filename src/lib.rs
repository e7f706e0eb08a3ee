//! # dispatchpool
//!
//! `dispatchpool` is a fixed-size worker-thread pool. Each worker owns a
//! private FIFO queue and a dedicated OS thread; submitted tasks are routed
//! to one worker by a pluggable dispatch strategy and executed there in
//! strict per-worker FIFO order.
//!
//! ## Features
//! - Fixed worker set, created eagerly and never resized.
//! - Four dispatch strategies: round-robin, uniform random, least-loaded,
//!   and sampled least-loaded (power-of-d-choices).
//! - Coarse lifecycle controls: start, suspend, wait-for-drain, and
//!   interrupt (drop queued tasks).
//! - Caller-owned tasks: the pool holds shared handles and never takes
//!   exclusive ownership of your work.
//! - Metrics collection for monitoring pool activity.
//!
//! Cross-worker ordering, priority scheduling, and per-task cancellation
//! are deliberately out of scope.
//!
//! ## Usage
//!
//! ### Basic usage
//! ```rust
//! use dispatchpool::{DispatchMode, FnTask, Task, ThreadPoolBuilder};
//!
//! let pool = ThreadPoolBuilder::new()
//!     .num_workers(4)
//!     .dispatch_mode(DispatchMode::RoundRobin)
//!     .build()
//!     .unwrap();
//!
//! // Workers are born suspended; nothing runs until start().
//! pool.start();
//!
//! let task = FnTask::new(|| println!("hello from the pool"));
//! pool.execute(task.clone());
//!
//! // Block until every queue is empty and no task is in flight.
//! pool.wait();
//! assert!(task.is_done());
//! ```
//!
//! ### Suspending while batching submissions
//! ```rust
//! use dispatchpool::{DispatchMode, FnTask, Task, ThreadPoolBuilder};
//!
//! let pool = ThreadPoolBuilder::new()
//!     .num_workers(2)
//!     .dispatch_mode(DispatchMode::Greedy)
//!     .build()
//!     .unwrap();
//!
//! // Queue a batch without waking any worker, then release it at once.
//! let tasks: Vec<_> = (0..8).map(|_| FnTask::new(|| {})).collect();
//! for task in &tasks {
//!     pool.execute(task.clone());
//! }
//! pool.start();
//! pool.wait();
//! assert!(tasks.iter().all(|t| t.is_done()));
//! ```
//!
//! ### Dropping queued work
//! ```rust
//! use dispatchpool::{DispatchMode, FnTask, Task, ThreadPoolBuilder};
//!
//! let pool = ThreadPoolBuilder::new()
//!     .num_workers(2)
//!     .dispatch_mode(DispatchMode::Random)
//!     .build()
//!     .unwrap();
//!
//! let task = FnTask::new(|| {});
//! pool.execute(task.clone());
//!
//! // interrupt() clears every queue and leaves workers suspended.
//! pool.interrupt();
//! pool.start();
//! pool.wait();
//! assert!(!task.is_done());
//! ```
//!
//! ### Collecting metrics
//! ```rust
//! use dispatchpool::metrics::{AtomicMetricsCollector, ThreadPoolMetrics};
//! use dispatchpool::{FnTask, ThreadPoolBuilder};
//! use std::sync::atomic::Ordering;
//! use std::sync::Arc;
//!
//! let metrics = Arc::new(ThreadPoolMetrics::new());
//! let collector = Arc::new(AtomicMetricsCollector::new(metrics.clone()));
//!
//! let pool = ThreadPoolBuilder::new()
//!     .num_workers(4)
//!     .with_metrics_collector(collector)
//!     .build()
//!     .unwrap();
//! pool.start();
//!
//! for _ in 0..5 {
//!     pool.execute(FnTask::new(|| {}));
//! }
//! pool.wait();
//!
//! assert_eq!(metrics.completed_tasks.load(Ordering::SeqCst), 5);
//! ```
//!
//! ## Caveats
//!
//! The pool performs no error handling around a task's `execute`: a panic
//! unwinds through the worker's run loop and permanently kills that worker
//! thread, stranding any tasks still queued on it (and [`ThreadPool::wait`]
//! will then never return). Catch panics inside your task if you need the
//! worker to survive.
//!
//! Dropping a [`ThreadPool`] cancels its workers and joins their threads;
//! it does not drain. Call [`ThreadPool::wait`] first if queued tasks must
//! finish.

mod errors;
pub mod metrics;
pub mod pool;

mod macros;

pub use errors::PoolError;
pub use pool::dispatch::DispatchMode;
pub use pool::task::{FnTask, Task, TaskRef};
pub use pool::{ThreadPool, ThreadPoolBuilder};

#[doc(hidden)]
pub use log as __log;

/// Runs tasks on dedicated threads, one thread per task, and waits for all
/// of them. A baseline for benchmarking the pool against unpooled
/// threading.
#[cfg(any(debug_assertions, test, feature = "bench"))]
pub fn run_dedicated_threads(tasks: Vec<TaskRef>) {
    let handles: Vec<_> = tasks
        .into_iter()
        .map(|task| std::thread::spawn(move || task.execute()))
        .collect();

    for handle in handles {
        let _ = handle.join();
    }
}
