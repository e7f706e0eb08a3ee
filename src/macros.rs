//! Convenience macros for building pools and logging metrics.

/// Creates a thread pool, panicking on an invalid worker count.
///
/// # Examples
/// ```rust
/// use dispatchpool::{create_thread_pool, DispatchMode};
///
/// let pool = create_thread_pool!(workers: 4);
/// assert_eq!(pool.size(), 4);
///
/// let pool = create_thread_pool!(workers: 2, mode: DispatchMode::Greedy);
/// assert_eq!(pool.mode(), "Greedy");
/// ```
#[macro_export]
macro_rules! create_thread_pool {
    (workers: $n:expr) => {
        $crate::ThreadPoolBuilder::new()
            .num_workers($n)
            .build()
            .expect("invalid worker count")
    };
    (workers: $n:expr, mode: $mode:expr) => {
        $crate::ThreadPoolBuilder::new()
            .num_workers($n)
            .dispatch_mode($mode)
            .build()
            .expect("invalid worker count")
    };
}

/// Logs the current pool metrics through the `log` facade.
///
/// # Example
/// ```rust
/// use dispatchpool::metrics::{AtomicMetricsCollector, ThreadPoolMetrics};
/// use dispatchpool::{log_metrics, ThreadPoolBuilder};
/// use std::sync::Arc;
///
/// let metrics = Arc::new(ThreadPoolMetrics::new());
/// let collector = Arc::new(AtomicMetricsCollector::new(metrics.clone()));
/// let pool = ThreadPoolBuilder::new()
///     .with_metrics_collector(collector)
///     .build()
///     .unwrap();
///
/// log_metrics!(metrics);
/// ```
#[macro_export]
macro_rules! log_metrics {
    ($metrics:expr) => {
        $crate::__log::info!(
            "queued: {}, running: {}, completed: {}, discarded: {}, active threads: {}",
            $metrics
                .queued_tasks
                .load(std::sync::atomic::Ordering::SeqCst),
            $metrics
                .running_tasks
                .load(std::sync::atomic::Ordering::SeqCst),
            $metrics
                .completed_tasks
                .load(std::sync::atomic::Ordering::SeqCst),
            $metrics
                .discarded_tasks
                .load(std::sync::atomic::Ordering::SeqCst),
            $metrics
                .active_threads
                .load(std::sync::atomic::Ordering::SeqCst)
        );
    };
}
