//! Fork-join execution of independent jobs.
//!
//! Both the index builder and the Apriori join hand a batch of jobs to a
//! [`Scheduler`] and block until every job in the batch has finished. Jobs
//! never wait on each other and never submit further work.

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::config::resolve_parallelism;
use crate::error::Result;

/// One unit of work. It may borrow from the caller for the duration of the batch.
pub type Job<'a> = Box<dyn FnOnce() + Send + 'a>;

pub trait Scheduler: Send + Sync {
    /// Number of jobs that can run at once.
    fn parallelism(&self) -> usize;

    /// Runs every job and returns once all of them have completed.
    ///
    /// A panicking job is re-raised on the calling thread after the batch drains.
    fn run_batch<'a>(&self, jobs: Vec<Job<'a>>);
}

/// Fixed-size pool of worker threads, owned by whoever constructs it.
pub struct WorkerPool {
    pool: ThreadPool,
    threads: usize,
}

impl WorkerPool {
    /// Creates a pool with `threads` workers; 0 selects hardware concurrency.
    pub fn new(threads: usize) -> Result<Self> {
        let threads = resolve_parallelism(threads);
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("freqmine-worker-{i}"))
            .build()?;
        tracing::debug!(threads, "worker pool started");
        Ok(Self { pool, threads })
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool").field("threads", &self.threads).finish()
    }
}

impl Scheduler for WorkerPool {
    fn parallelism(&self) -> usize {
        self.threads
    }

    fn run_batch<'a>(&self, jobs: Vec<Job<'a>>) {
        if jobs.is_empty() {
            return;
        }
        self.pool.scope(|scope| {
            for job in jobs {
                scope.spawn(move |_| job());
            }
        });
    }
}

/// Runs every job on the calling thread, in submission order.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineScheduler;

impl Scheduler for InlineScheduler {
    fn parallelism(&self) -> usize {
        1
    }

    fn run_batch<'a>(&self, jobs: Vec<Job<'a>>) {
        for job in jobs {
            job();
        }
    }
}
