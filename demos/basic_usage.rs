use dispatchpool::{DispatchMode, FnTask, Task, ThreadPoolBuilder};

fn main() {
    env_logger::init();

    let pool = ThreadPoolBuilder::new()
        .num_workers(4)
        .dispatch_mode(DispatchMode::RoundRobin)
        .build()
        .expect("worker count is positive");
    pool.start();

    let tasks: Vec<_> = (0..8)
        .map(|i| FnTask::new(move || println!("task {} executed", i)))
        .collect();
    for task in &tasks {
        pool.execute(task.clone());
    }

    pool.wait();
    println!(
        "all done: {}",
        tasks.iter().all(|t| t.is_done())
    );
}
