//! Worker logic for the thread pool.
//!
//! One `Worker` is one OS thread plus one mutex-guarded FIFO of task
//! handles. The run loop blocks on a condvar instead of polling: it is
//! woken by `submit`, `start`, and `cancel`, and a second condvar releases
//! `wait` callers whenever the worker becomes drained (empty queue, no task
//! in flight).

use std::collections::VecDeque;
use std::sync::Arc;
use std::thread;

use log::{debug, trace};
use parking_lot::{Condvar, Mutex};

use crate::metrics::MetricsCollector;

use super::task::TaskRef;

struct State {
    queue: VecDeque<TaskRef>,
    /// Workers are born suspended; `start` clears this.
    suspended: bool,
    /// Terminal. Once set, submissions are dropped and the run loop exits.
    canceled: bool,
    /// True while a dequeued task is executing. At most one task is in
    /// flight on a worker at any instant.
    working: bool,
}

struct Shared {
    id: usize,
    state: Mutex<State>,
    /// Wakes the run loop: notified on submit, start, and cancel.
    wake: Condvar,
    /// Wakes `wait` callers: notified when the worker drains.
    idle: Condvar,
    collector: Option<Arc<dyn MetricsCollector>>,
}

pub struct Worker {
    shared: Arc<Shared>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Worker {
    /// Spawns the worker thread. The worker starts suspended and dequeues
    /// nothing until [`start`](Worker::start) is called.
    pub fn spawn(id: usize, collector: Option<Arc<dyn MetricsCollector>>) -> Self {
        let shared = Arc::new(Shared {
            id,
            state: Mutex::new(State {
                queue: VecDeque::new(),
                suspended: true,
                canceled: false,
                working: false,
            }),
            wake: Condvar::new(),
            idle: Condvar::new(),
            collector,
        });
        let thread = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || run(shared))
        };
        Self {
            shared,
            thread: Some(thread),
        }
    }

    /// Enqueues a task at the tail of this worker's FIFO.
    ///
    /// Silently drops the task if the worker has been canceled; this is the
    /// teardown race the pool deliberately does not report.
    pub fn submit(&self, task: TaskRef) {
        let mut state = self.shared.state.lock();
        if state.canceled {
            trace!("worker {}: dropped submission after cancel", self.shared.id);
            if let Some(c) = &self.shared.collector {
                c.on_task_dropped();
            }
            return;
        }
        state.queue.push_back(task);
        self.shared.wake.notify_one();
    }

    /// Removes every queued task. A task already executing is unaffected
    /// and runs to completion.
    pub fn interrupt(&self) {
        let mut state = self.shared.state.lock();
        let cleared = state.queue.len();
        if cleared > 0 {
            state.queue.clear();
            trace!("worker {}: interrupted, {} tasks cleared", self.shared.id, cleared);
            if let Some(c) = &self.shared.collector {
                c.on_tasks_interrupted(cleared);
            }
        }
        if !state.working {
            self.shared.idle.notify_all();
        }
    }

    /// Blocks the calling thread until the queue is empty and no task is
    /// executing, observed as one snapshot under the queue lock.
    ///
    /// The guarantee covers tasks submitted strictly before the call;
    /// concurrent submitters can extend the wait. A suspended worker with a
    /// non-empty queue never drains, so callers must `start` the worker for
    /// this to return. Likewise, if a task panics (killing the run loop) or
    /// the worker was canceled with tasks still queued, the drain condition
    /// can never be reached and this blocks forever.
    pub fn wait(&self) {
        let mut state = self.shared.state.lock();
        while !state.queue.is_empty() || state.working {
            self.shared.idle.wait(&mut state);
        }
    }

    /// Permits dequeuing. Cancels a prior [`suspend`](Worker::suspend).
    pub fn start(&self) {
        let mut state = self.shared.state.lock();
        state.suspended = false;
        self.shared.wake.notify_all();
    }

    /// Withholds further dequeues. A task already executing runs to
    /// completion.
    pub fn suspend(&self) {
        self.shared.state.lock().suspended = true;
    }

    /// Current queue depth, taken under the queue lock. Advisory: it may
    /// change the moment the lock is released.
    pub fn len(&self) -> usize {
        self.shared.state.lock().queue.len()
    }

    /// Marks the worker canceled. Irreversible; the run loop exits on its
    /// next wakeup and all later submissions are dropped.
    pub fn cancel(&self) {
        let mut state = self.shared.state.lock();
        state.canceled = true;
        self.shared.wake.notify_all();
    }

    /// Blocks until the run loop has exited. Idempotent.
    pub fn join(&mut self) {
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.cancel();
        self.join();
    }
}

/// Worker thread main loop.
fn run(shared: Arc<Shared>) {
    debug!("worker {} started", shared.id);
    if let Some(c) = &shared.collector {
        c.on_worker_started();
    }

    let mut state = shared.state.lock();
    loop {
        if state.canceled {
            break;
        }
        if state.suspended || state.queue.is_empty() {
            shared.wake.wait(&mut state);
            continue;
        }
        if let Some(task) = state.queue.pop_front() {
            state.working = true;
            drop(state);

            if let Some(c) = &shared.collector {
                c.on_task_started();
            }
            // Runs unlocked and unguarded: a panic here unwinds through the
            // loop and permanently stops this worker.
            task.execute();
            if let Some(c) = &shared.collector {
                c.on_task_completed();
            }

            state = shared.state.lock();
            state.working = false;
            if state.queue.is_empty() {
                shared.idle.notify_all();
            }
        }
    }
    drop(state);

    debug!("worker {} exiting", shared.id);
    if let Some(c) = &shared.collector {
        c.on_worker_stopped();
    }
}
