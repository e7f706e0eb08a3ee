//! Dispatch strategies for routing submitted tasks to workers.
//!
//! A strategy maps the current per-worker queue depths (plus a little
//! strategy-local state) to the index of the worker that receives the next
//! task. Depths are read one worker at a time, so every depth-based choice
//! is advisory: concurrent submissions can change a queue between the read
//! and the enqueue.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;

/// How the pool picks a worker for each submitted task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Cycle through workers in order `1, 2, .., n-1, 0, 1, ..`. Strict
    /// cyclic coverage, no awareness of load.
    RoundRobin,
    /// One index drawn uniformly from `[0, n)` per submission, no memory
    /// between calls.
    Random,
    /// Scan every worker's queue depth and pick the least loaded; the
    /// earliest worker with an empty queue wins ties immediately.
    Greedy,
    /// Power-of-d-choices: sample `max(n / 3, 2)` candidates uniformly
    /// (with replacement) and pick the least loaded among them. Approximates
    /// [`Greedy`](DispatchMode::Greedy) without scanning large pools.
    SampledGreedy,
}

/// Holds the chosen mode plus the round-robin cursor. `select` is safe to
/// call from any number of submitting threads.
pub(crate) struct Dispatcher {
    mode: DispatchMode,
    cursor: AtomicUsize,
}

impl Dispatcher {
    pub fn new(mode: DispatchMode) -> Self {
        Self {
            mode,
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn mode_name(&self) -> &'static str {
        match self.mode {
            DispatchMode::RoundRobin => "RoundRobin",
            DispatchMode::Random => "Random",
            DispatchMode::Greedy => "Greedy",
            DispatchMode::SampledGreedy => "SampledGreedy",
        }
    }

    /// Picks the worker index in `[0, n)` that receives the next task.
    /// `depth` reads one worker's current queue depth.
    pub fn select<F>(&self, n: usize, depth: F) -> usize
    where
        F: Fn(usize) -> usize,
    {
        match self.mode {
            DispatchMode::RoundRobin => self.round_robin(n),
            DispatchMode::Random => random(n),
            DispatchMode::Greedy => greedy(n, &depth),
            DispatchMode::SampledGreedy => sampled_greedy(n, &depth),
        }
    }

    /// Pre-increments, so the first call on a fresh dispatcher yields
    /// `1 % n`.
    fn round_robin(&self, n: usize) -> usize {
        (self.cursor.fetch_add(1, Ordering::Relaxed) + 1) % n
    }
}

fn random(n: usize) -> usize {
    rand::thread_rng().gen_range(0..n)
}

fn greedy<F>(n: usize, depth: &F) -> usize
where
    F: Fn(usize) -> usize,
{
    let mut best = 0;
    let mut best_depth = depth(0);
    for i in 1..n {
        if best_depth == 0 {
            return best;
        }
        let d = depth(i);
        if d < best_depth {
            best = i;
            best_depth = d;
        }
    }
    best
}

/// Least-loaded over a random sample. Returns the sampled worker's real
/// index; an empty queue ends the sampling early.
fn sampled_greedy<F>(n: usize, depth: &F) -> usize
where
    F: Fn(usize) -> usize,
{
    if n == 1 {
        return 0;
    }
    let samples = (n / 3).max(2);
    let mut rng = rand::thread_rng();

    let mut best = rng.gen_range(0..n);
    let mut best_depth = depth(best);
    for _ in 1..samples {
        if best_depth == 0 {
            return best;
        }
        let candidate = rng.gen_range(0..n);
        let d = depth(candidate);
        if d < best_depth {
            best = candidate;
            best_depth = d;
        }
    }
    best
}
