use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use dispatchpool::metrics::{AtomicMetricsCollector, ThreadPoolMetrics};
use dispatchpool::{log_metrics, DispatchMode, FnTask, ThreadPoolBuilder};

fn main() {
    env_logger::init();

    let metrics = Arc::new(ThreadPoolMetrics::new());
    let collector = Arc::new(AtomicMetricsCollector::new(metrics.clone()));

    let pool = ThreadPoolBuilder::new()
        .num_workers(4)
        .dispatch_mode(DispatchMode::Greedy)
        .with_metrics_collector(collector)
        .build()
        .expect("worker count is positive");
    pool.start();

    for i in 0..20u64 {
        pool.execute(FnTask::new(move || {
            std::thread::sleep(Duration::from_millis(5 * (i % 4)));
        }));
    }

    // Snapshot while work is in flight, then after the drain.
    log_metrics!(metrics);
    pool.wait();
    log_metrics!(metrics);

    println!(
        "completed {} tasks on {} workers ({} dispatch)",
        metrics.completed_tasks.load(Ordering::SeqCst),
        pool.size(),
        pool.mode()
    );
}
