use dispatchpool::{DispatchMode, FnTask, PoolError, Task, ThreadPool, ThreadPoolBuilder};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[test]
fn test_basic_pool() {
    let pool = ThreadPool::new(2, DispatchMode::RoundRobin).unwrap();
    pool.start();

    let task = FnTask::new(|| {});
    pool.execute(task.clone());
    pool.wait();
    assert!(task.is_done());
}

#[test]
fn test_zero_workers_rejected() {
    let result = ThreadPoolBuilder::new().num_workers(0).build();
    assert!(matches!(result, Err(PoolError::InvalidWorkerCount)));
}

#[test]
fn test_exactly_once_execution() {
    let pool = ThreadPoolBuilder::new()
        .num_workers(4)
        .dispatch_mode(DispatchMode::SampledGreedy)
        .build()
        .unwrap();
    pool.start();

    let runs = Arc::new(AtomicUsize::new(0));
    let tasks: Vec<_> = (0..200)
        .map(|_| {
            let runs = Arc::clone(&runs);
            FnTask::new(move || {
                runs.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();
    for task in &tasks {
        pool.execute(task.clone());
    }
    pool.wait();

    assert_eq!(runs.load(Ordering::SeqCst), 200);
    assert!(tasks.iter().all(|t| t.is_done()));
}

#[test]
fn test_single_worker_is_plain_fifo() {
    let pool = ThreadPool::new(1, DispatchMode::Greedy).unwrap();
    let order = Arc::new(Mutex::new(Vec::new()));

    // Submit A, B, C while suspended so the queue fills deterministically.
    for label in ["A", "B", "C"] {
        let order = Arc::clone(&order);
        pool.execute(FnTask::new(move || {
            order.lock().unwrap().push(label);
        }));
    }
    pool.start();
    pool.wait();

    assert_eq!(*order.lock().unwrap(), vec!["A", "B", "C"]);
}

#[test]
fn test_round_robin_covers_all_workers() {
    // Workers are suspended until start(), so queue depths expose the
    // assignment: with N=2 the first four submissions land 1, 0, 1, 0.
    let pool = ThreadPool::new(2, DispatchMode::RoundRobin).unwrap();

    pool.execute(FnTask::new(|| {}));
    assert_eq!(pool.queue_depths(), vec![0, 1]);
    pool.execute(FnTask::new(|| {}));
    assert_eq!(pool.queue_depths(), vec![1, 1]);
    pool.execute(FnTask::new(|| {}));
    pool.execute(FnTask::new(|| {}));
    assert_eq!(pool.queue_depths(), vec![2, 2]);

    pool.start();
    pool.wait();
}

#[test]
fn test_greedy_ties_break_to_worker_zero() {
    let pool = ThreadPool::new(3, DispatchMode::Greedy).unwrap();

    // All queues empty: worker 0 wins the tie.
    pool.execute(FnTask::new(|| {}));
    assert_eq!(pool.queue_depths(), vec![1, 0, 0]);

    // Then the earliest empty queue wins.
    pool.execute(FnTask::new(|| {}));
    assert_eq!(pool.queue_depths(), vec![1, 1, 0]);
    pool.execute(FnTask::new(|| {}));
    assert_eq!(pool.queue_depths(), vec![1, 1, 1]);

    pool.start();
    pool.wait();
}

#[test]
fn test_suspend_blocks_dequeue_not_inflight_work() {
    let pool = ThreadPool::new(1, DispatchMode::RoundRobin).unwrap();
    pool.start();

    let slow = FnTask::new(|| thread::sleep(Duration::from_millis(100)));
    let follower = FnTask::new(|| {});
    pool.execute(slow.clone());
    thread::sleep(Duration::from_millis(30));
    pool.suspend();
    pool.execute(follower.clone());

    thread::sleep(Duration::from_millis(150));
    assert!(slow.is_done());
    assert!(!follower.is_done());

    pool.start();
    pool.wait();
    assert!(follower.is_done());
}

#[test]
fn test_interrupt_drops_queued_spares_running() {
    let pool = ThreadPool::new(1, DispatchMode::RoundRobin).unwrap();
    pool.start();

    let slow = FnTask::new(|| thread::sleep(Duration::from_millis(100)));
    let queued = FnTask::new(|| {});
    pool.execute(slow.clone());
    pool.execute(queued.clone());

    // Let the slow task get dequeued, then drop the rest of the queue.
    thread::sleep(Duration::from_millis(30));
    pool.interrupt();
    pool.start();
    pool.wait();

    assert!(slow.is_done());
    assert!(!queued.is_done());
}

#[test]
fn test_interrupt_before_start_drops_everything() {
    let pool = ThreadPool::new(4, DispatchMode::RoundRobin).unwrap();

    let tasks: Vec<_> = (0..12).map(|_| FnTask::new(|| {})).collect();
    for task in &tasks {
        pool.execute(task.clone());
    }
    pool.interrupt();
    assert_eq!(pool.queue_depths(), vec![0, 0, 0, 0]);

    pool.start();
    pool.wait();
    assert!(tasks.iter().all(|t| !t.is_done()));
}

#[test]
fn test_wait_postcondition() {
    let pool = ThreadPoolBuilder::new()
        .num_workers(3)
        .dispatch_mode(DispatchMode::Random)
        .build()
        .unwrap();
    pool.start();

    for _ in 0..50 {
        pool.execute(FnTask::new(|| thread::sleep(Duration::from_millis(1))));
    }
    pool.wait();
    assert_eq!(pool.queue_depths(), vec![0, 0, 0]);
}

#[test]
fn test_drop_without_wait_discards_queued_tasks() {
    let task = FnTask::new(|| {});
    {
        // Never started: the queued task is discarded on drop.
        let pool = ThreadPool::new(2, DispatchMode::RoundRobin).unwrap();
        pool.execute(task.clone());
    }
    assert!(!task.is_done());
}

#[test]
fn test_panicking_task_strands_its_worker() {
    // A panic kills the worker thread; queued tasks on it never run, but
    // dropping the pool still returns because join() observes the dead
    // thread. Deliberately no wait() here: it would block forever.
    let pool = ThreadPool::new(1, DispatchMode::RoundRobin).unwrap();

    let stranded = FnTask::new(|| {});
    pool.execute(FnTask::new(|| panic!("task failure")));
    pool.execute(stranded.clone());
    pool.start();

    thread::sleep(Duration::from_millis(100));
    assert!(!stranded.is_done());
    assert_eq!(pool.queue_depths(), vec![1]);
}

#[test]
fn test_tasks_remain_caller_owned() {
    let pool = ThreadPool::new(2, DispatchMode::Greedy).unwrap();
    pool.start();

    let counter = Arc::new(AtomicUsize::new(0));
    let task = {
        let counter = Arc::clone(&counter);
        FnTask::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    };

    // The caller's handle stays valid after execution; resubmitting the
    // same instance runs it again.
    pool.execute(task.clone());
    pool.wait();
    assert!(task.is_done());
    pool.execute(task.clone());
    pool.wait();
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn test_metrics_track_interrupted_tasks() {
    use dispatchpool::metrics::{AtomicMetricsCollector, ThreadPoolMetrics};

    let metrics = Arc::new(ThreadPoolMetrics::new());
    let collector = Arc::new(AtomicMetricsCollector::new(metrics.clone()));
    let pool = ThreadPoolBuilder::new()
        .num_workers(2)
        .with_metrics_collector(collector)
        .build()
        .unwrap();

    for _ in 0..4 {
        pool.execute(FnTask::new(|| {}));
    }
    assert_eq!(metrics.queued_tasks.load(Ordering::SeqCst), 4);

    pool.interrupt();
    assert_eq!(metrics.queued_tasks.load(Ordering::SeqCst), 0);
    assert_eq!(metrics.discarded_tasks.load(Ordering::SeqCst), 4);

    pool.start();
    pool.wait();
    assert_eq!(metrics.completed_tasks.load(Ordering::SeqCst), 0);
}

#[test]
fn test_mode_names() {
    for (mode, name) in [
        (DispatchMode::RoundRobin, "RoundRobin"),
        (DispatchMode::Random, "Random"),
        (DispatchMode::Greedy, "Greedy"),
        (DispatchMode::SampledGreedy, "SampledGreedy"),
    ] {
        let pool = ThreadPool::new(2, mode).unwrap();
        assert_eq!(pool.mode(), name);
        assert_eq!(pool.size(), 2);
    }
}
