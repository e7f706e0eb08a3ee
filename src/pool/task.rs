//! Task abstraction for the thread pool.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A unit of work that can be submitted to the pool.
///
/// The pool never takes exclusive ownership of a task: submission clones an
/// [`Arc`] handle and the caller keeps theirs, so a task can be inspected
/// (or reused for bookkeeping) after it has run. The pool invokes
/// [`execute`](Task::execute) exactly once per accepted submission, on
/// exactly one worker thread. Submitting the same task instance twice runs
/// it twice.
///
/// A panic escaping `execute` is not caught: it unwinds through the worker's
/// run loop and permanently kills that worker's thread, stranding any tasks
/// still queued on it. Callers that cannot tolerate this must catch panics
/// inside their own `execute` implementation.
pub trait Task: Send + Sync {
    /// Performs the unit of work. Runs to completion on whichever worker
    /// thread dequeued it; must not assume any particular thread identity.
    /// Never invoked concurrently with itself for a single submission.
    fn execute(&self);

    /// Non-blocking completion query.
    ///
    /// This is a weak, best-effort signal: the framework establishes no
    /// ordering between `execute` returning and another thread observing
    /// `true` here. Implementations that need a handshake must provide
    /// their own synchronization.
    fn is_done(&self) -> bool;
}

/// Shared handle to a task, as held by the pool's queues.
pub type TaskRef = Arc<dyn Task>;

/// Closure-backed [`Task`] with an atomic completion flag.
///
/// ```rust
/// use dispatchpool::{FnTask, Task};
///
/// let task = FnTask::new(|| println!("hello"));
/// assert!(!task.is_done());
/// ```
pub struct FnTask<F: Fn() + Send + Sync> {
    f: F,
    done: AtomicBool,
}

impl<F: Fn() + Send + Sync> FnTask<F> {
    pub fn new(f: F) -> Arc<Self> {
        Arc::new(Self {
            f,
            done: AtomicBool::new(false),
        })
    }
}

impl<F: Fn() + Send + Sync> Task for FnTask<F> {
    fn execute(&self) {
        (self.f)();
        self.done.store(true, Ordering::Release);
    }

    fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }
}
