//! Metrics collection for the thread pool.
//!
//! This module defines the `MetricsCollector` trait for collecting metrics
//! about the pool's activity, plus a default implementation backed by
//! atomic counters.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Hooks for tracking key events in the thread pool.
///
/// An implementation is shared between the submitting threads and every
/// worker thread, so all methods take `&self` and must be thread safe.
pub trait MetricsCollector: Send + Sync {
    /// Called when a task is submitted through the pool.
    fn on_task_submitted(&self);
    /// Called when a worker dequeues a task and starts executing it.
    fn on_task_started(&self);
    /// Called when a task finishes executing.
    fn on_task_completed(&self);
    /// Called when a submission is silently dropped because its worker was
    /// already canceled.
    fn on_task_dropped(&self);
    /// Called when `interrupt` clears `count` queued tasks at once.
    fn on_tasks_interrupted(&self, count: usize);
    /// Called when a worker thread starts.
    fn on_worker_started(&self);
    /// Called when a worker thread stops.
    fn on_worker_stopped(&self);
}

/// Pool activity counters, updated atomically.
pub struct ThreadPoolMetrics {
    /// Tasks currently queued across all workers.
    pub queued_tasks: AtomicUsize,
    /// Tasks currently being executed.
    pub running_tasks: AtomicUsize,
    /// Total tasks that have completed execution.
    pub completed_tasks: AtomicUsize,
    /// Total submissions dropped (canceled worker) or cleared by
    /// `interrupt`.
    pub discarded_tasks: AtomicUsize,
    /// Worker threads currently alive.
    pub active_threads: AtomicUsize,
}

impl ThreadPoolMetrics {
    pub fn new() -> Self {
        Self {
            queued_tasks: AtomicUsize::new(0),
            running_tasks: AtomicUsize::new(0),
            completed_tasks: AtomicUsize::new(0),
            discarded_tasks: AtomicUsize::new(0),
            active_threads: AtomicUsize::new(0),
        }
    }
}

impl Default for ThreadPoolMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Default [`MetricsCollector`] writing to a shared [`ThreadPoolMetrics`].
pub struct AtomicMetricsCollector {
    pub metrics: Arc<ThreadPoolMetrics>,
}

impl AtomicMetricsCollector {
    pub fn new(metrics: Arc<ThreadPoolMetrics>) -> Self {
        Self { metrics }
    }
}

impl MetricsCollector for AtomicMetricsCollector {
    fn on_task_submitted(&self) {
        self.metrics.queued_tasks.fetch_add(1, Ordering::SeqCst);
    }

    fn on_task_started(&self) {
        self.metrics.queued_tasks.fetch_sub(1, Ordering::SeqCst);
        self.metrics.running_tasks.fetch_add(1, Ordering::SeqCst);
    }

    fn on_task_completed(&self) {
        self.metrics.running_tasks.fetch_sub(1, Ordering::SeqCst);
        self.metrics.completed_tasks.fetch_add(1, Ordering::SeqCst);
    }

    fn on_task_dropped(&self) {
        self.metrics.queued_tasks.fetch_sub(1, Ordering::SeqCst);
        self.metrics.discarded_tasks.fetch_add(1, Ordering::SeqCst);
    }

    fn on_tasks_interrupted(&self, count: usize) {
        self.metrics.queued_tasks.fetch_sub(count, Ordering::SeqCst);
        self.metrics.discarded_tasks.fetch_add(count, Ordering::SeqCst);
    }

    fn on_worker_started(&self) {
        self.metrics.active_threads.fetch_add(1, Ordering::SeqCst);
    }

    fn on_worker_stopped(&self) {
        self.metrics.active_threads.fetch_sub(1, Ordering::SeqCst);
    }
}
