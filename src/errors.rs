//! Error types for the thread pool.

/// Errors surfaced when constructing a pool.
///
/// Runtime submission never errors by design: a task routed to a canceled
/// worker is silently dropped (teardown race), and a panic inside a task is
/// not caught by the pool.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    /// The pool requires at least one worker.
    #[error("worker count must be at least 1")]
    InvalidWorkerCount,
}
