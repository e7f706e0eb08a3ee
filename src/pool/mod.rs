pub mod dispatch;
pub mod task;
mod worker;

use std::sync::Arc;

use log::debug;

use crate::errors::PoolError;
use crate::metrics::MetricsCollector;

use dispatch::{DispatchMode, Dispatcher};
use task::TaskRef;
use worker::Worker;

/// A fixed-size pool of workers, each owning a private FIFO queue, with a
/// pluggable strategy for routing submitted tasks.
///
/// Workers are created eagerly at construction and are suspended until
/// [`start`](ThreadPool::start). The worker set never resizes. Execution
/// order is strict FIFO within each worker's queue; there is no ordering
/// guarantee across workers.
pub struct ThreadPool {
    workers: Vec<Worker>,
    dispatcher: Dispatcher,
    metrics_collector: Option<Arc<dyn MetricsCollector>>,
}

impl ThreadPool {
    /// Shorthand for the builder with an explicit worker count and
    /// dispatch mode.
    pub fn new(num_workers: usize, mode: DispatchMode) -> Result<Self, PoolError> {
        ThreadPoolBuilder::new()
            .num_workers(num_workers)
            .dispatch_mode(mode)
            .build()
    }

    /// Routes `task` to exactly one worker, chosen by the dispatch
    /// strategy, and enqueues it there.
    ///
    /// A task is never re-dispatched after this single selection. If the
    /// chosen worker was already canceled (a teardown race), the task is
    /// silently dropped rather than reported.
    pub fn execute(&self, task: TaskRef) {
        let index = self
            .dispatcher
            .select(self.workers.len(), |i| self.workers[i].len());
        if let Some(c) = &self.metrics_collector {
            c.on_task_submitted();
        }
        // A strategy result outside [0, n) is an internal invariant
        // violation; indexing panics rather than clamping.
        self.workers[index].submit(task);
    }

    /// Permits task execution on every worker, in index order. Also cancels
    /// a prior [`suspend`](ThreadPool::suspend) or
    /// [`interrupt`](ThreadPool::interrupt).
    pub fn start(&self) {
        debug!("pool: starting {} workers", self.workers.len());
        for worker in &self.workers {
            worker.start();
        }
    }

    /// Withholds further dequeues on every worker. Tasks already executing
    /// run to completion.
    pub fn suspend(&self) {
        debug!("pool: suspending {} workers", self.workers.len());
        for worker in &self.workers {
            worker.suspend();
        }
    }

    /// Drops every queued-but-not-started task. Tasks already executing are
    /// unaffected.
    ///
    /// Workers are suspended first so that none of them dequeues while
    /// queues are being cleared, and they stay suspended afterwards: call
    /// [`start`](ThreadPool::start) to resume execution.
    pub fn interrupt(&self) {
        debug!("pool: interrupting {} workers", self.workers.len());
        for worker in &self.workers {
            worker.suspend();
        }
        for worker in &self.workers {
            worker.interrupt();
        }
    }

    /// Blocks until every worker is drained (empty queue, no task in
    /// flight), checking workers in index order.
    ///
    /// Each worker's drain is observed as one consistent snapshot, but
    /// there is no atomicity across workers: returning means each worker
    /// was drained as of its own check, not that the whole pool was empty
    /// at one global instant. The guarantee covers tasks submitted strictly
    /// before this call. Never returns if a worker's thread was killed by a
    /// panicking task while work remained queued on it.
    pub fn wait(&self) {
        for worker in &self.workers {
            worker.wait();
        }
    }

    /// The fixed worker count.
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Name of the dispatch mode this pool routes with.
    pub fn mode(&self) -> &'static str {
        self.dispatcher.mode_name()
    }

    /// Advisory snapshot of each worker's queue depth, read one worker at
    /// a time.
    pub fn queue_depths(&self) -> Vec<usize> {
        self.workers.iter().map(Worker::len).collect()
    }
}

/// Dropping the pool cancels every worker and joins its thread. Queued
/// tasks are discarded, not drained: call [`ThreadPool::wait`] first if
/// completion is required.
impl Drop for ThreadPool {
    fn drop(&mut self) {
        debug!("pool: shutting down {} workers", self.workers.len());
        for worker in &self.workers {
            worker.cancel();
        }
        for worker in &mut self.workers {
            worker.join();
        }
    }
}

/// Builder for [`ThreadPool`].
///
/// ```rust
/// use dispatchpool::{DispatchMode, ThreadPoolBuilder};
///
/// let pool = ThreadPoolBuilder::new()
///     .num_workers(4)
///     .dispatch_mode(DispatchMode::Greedy)
///     .build()
///     .unwrap();
/// assert_eq!(pool.size(), 4);
/// assert_eq!(pool.mode(), "Greedy");
/// ```
pub struct ThreadPoolBuilder {
    num_workers: usize,
    mode: DispatchMode,
    metrics_collector: Option<Arc<dyn MetricsCollector>>,
}

impl ThreadPoolBuilder {
    pub fn new() -> Self {
        Self {
            num_workers: 4,
            mode: DispatchMode::RoundRobin,
            metrics_collector: None,
        }
    }

    /// Sets the fixed worker count. Must be at least 1.
    pub fn num_workers(mut self, n: usize) -> Self {
        self.num_workers = n;
        self
    }

    pub fn dispatch_mode(mut self, mode: DispatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_metrics_collector(mut self, collector: Arc<dyn MetricsCollector>) -> Self {
        self.metrics_collector = Some(collector);
        self
    }

    /// Spawns the workers (suspended) and assembles the pool.
    pub fn build(self) -> Result<ThreadPool, PoolError> {
        if self.num_workers == 0 {
            return Err(PoolError::InvalidWorkerCount);
        }
        let workers = (0..self.num_workers)
            .map(|id| Worker::spawn(id, self.metrics_collector.clone()))
            .collect();
        debug!(
            "pool: built with {} workers, {:?} dispatch",
            self.num_workers, self.mode
        );
        Ok(ThreadPool {
            workers,
            dispatcher: Dispatcher::new(self.mode),
            metrics_collector: self.metrics_collector,
        })
    }
}

impl Default for ThreadPoolBuilder {
    fn default() -> Self {
        Self::new()
    }
}
