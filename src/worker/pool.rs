//! Worker pool management.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, select, Receiver};
use tracing::{debug, warn};

use crate::crypto::KeyGenerator;
use crate::matcher::Pattern;

use super::cpu::{CpuWorker, WorkerContext, WorkerStats, LOG_INTERVAL};
use super::CancellationSignal;

/// Result of a successful vanity search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The classic address ("r...")
    pub address: String,
    /// The family seed that recreates the address ("sEd...")
    pub seed: String,
    /// The public key (upper-case hex, "ED" prefix)
    pub public_key: String,
    /// The ID of the worker that found this result
    pub worker_id: usize,
}

/// What the search is looking for.
#[derive(Debug, Clone)]
pub struct SearchTarget {
    /// The address pattern
    pub pattern: Pattern,
    /// How many matches to collect (at least 1)
    pub wanted: usize,
}

impl SearchTarget {
    /// Creates a new target; a `wanted` of zero is raised to one.
    pub fn new(pattern: Pattern, wanted: usize) -> Self {
        Self {
            pattern,
            wanted: wanted.max(1),
        }
    }
}

/// Final statistics of a search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSummary {
    /// Results drained by the pool
    pub found: usize,
    /// Matches produced by workers, drained or not
    pub matches: u64,
    /// Keypairs generated and checked
    pub attempts: u64,
    /// Wall-clock time since the pool was created
    pub elapsed: Duration,
    /// True if the search stopped before `wanted` results were drained
    pub interrupted: bool,
}

/// How often `collect` checks for dead workers while no result arrives.
const LIVENESS_CHECK: Duration = Duration::from_millis(100);

/// One step of the drain loop.
enum Drained {
    Result(SearchResult),
    Idle,
    Stopped,
}

/// Manages a pool of workers for parallel vanity search.
pub struct WorkerPool {
    /// Number of concurrently live workers
    num_workers: usize,
    /// Number of matches to collect
    wanted: usize,
    /// Handed to each spawned worker; dropped once no more are needed
    context: Option<WorkerContext>,
    /// Worker thread handles still to be joined
    handles: Vec<JoinHandle<()>>,
    /// Channel receiver for results
    result_rx: Receiver<SearchResult>,
    /// Shared stop signal
    cancel: CancellationSignal,
    /// Shared statistics
    stats: Arc<WorkerStats>,
    /// ID handed to the next spawned worker
    next_id: usize,
    /// Results drained so far
    found: usize,
}

impl WorkerPool {
    /// Creates a new worker pool with the specified number of workers.
    pub fn new(num_workers: usize, target: SearchTarget, generator: Arc<dyn KeyGenerator>) -> Self {
        Self::with_log_interval(num_workers, target, generator, LOG_INTERVAL)
    }

    /// Creates a new worker pool that logs progress every `log_interval` attempts.
    pub fn with_log_interval(
        num_workers: usize,
        target: SearchTarget,
        generator: Arc<dyn KeyGenerator>,
        log_interval: u64,
    ) -> Self {
        let num_workers = num_workers.max(1);
        // Live workers plus undrained results never exceed num_workers
        let (result_tx, result_rx) = bounded(num_workers);
        let cancel = CancellationSignal::new();
        let stats = Arc::new(WorkerStats::new());

        let mut pool = Self {
            num_workers,
            wanted: target.wanted,
            context: Some(WorkerContext {
                pattern: target.pattern,
                wanted: target.wanted,
                generator,
                result_tx,
                cancel: cancel.clone(),
                stats: stats.clone(),
                log_interval: log_interval.max(1),
            }),
            handles: Vec::with_capacity(num_workers),
            result_rx,
            cancel,
            stats,
            next_id: 0,
            found: 0,
        };

        for _ in 0..num_workers {
            if let Err(err) = pool.spawn_worker() {
                warn!(error = %err, "failed to spawn worker thread");
            }
        }
        pool
    }

    /// Spawns one worker thread sharing the pool's channel, signal and stats.
    fn spawn_worker(&mut self) -> io::Result<()> {
        let Some(ctx) = self.context.clone() else {
            return Ok(());
        };
        let id = self.next_id;
        self.next_id += 1;

        let worker = CpuWorker::new(id, ctx);
        let handle = thread::Builder::new()
            .name(format!("vanity-worker-{}", id))
            .spawn(move || worker.run())?;
        self.handles.push(handle);
        Ok(())
    }

    /// Joins every worker thread that has already exited.
    fn reap_finished(&mut self) {
        let (finished, live): (Vec<_>, Vec<_>) =
            self.handles.drain(..).partition(|handle| handle.is_finished());
        self.handles = live;

        for handle in finished {
            if handle.join().is_err() {
                warn!("worker thread panicked");
            }
        }
    }

    /// Drains results until `wanted` have been collected, then cancels the workers.
    ///
    /// `on_result` is called with the 1-based result index for every drained
    /// result. Returns early, without reaching `wanted`, if the pool is
    /// cancelled from outside (e.g. Ctrl-C) or every worker has exited.
    pub fn collect<F>(&mut self, mut on_result: F) -> usize
    where
        F: FnMut(usize, &SearchResult),
    {
        while self.found < self.wanted {
            if self.cancel.is_cancelled() {
                break;
            }

            let next = select! {
                recv(self.result_rx) -> msg => msg.map_or(Drained::Stopped, Drained::Result),
                recv(self.cancel.listener()) -> _ => Drained::Stopped,
                default(LIVENESS_CHECK) => Drained::Idle,
            };

            match next {
                Drained::Result(result) => {
                    self.found += 1;
                    on_result(self.found, &result);

                    if self.found < self.wanted {
                        // The finder exited; keep the pool at full strength
                        self.reap_finished();
                        if let Err(err) = self.spawn_worker() {
                            warn!(error = %err, "failed to spawn replacement worker");
                        }
                    }
                }
                Drained::Idle => {
                    self.reap_finished();
                    // Exited workers may still have left a result behind
                    if self.handles.is_empty() && self.result_rx.is_empty() {
                        warn!(found = self.found, wanted = self.wanted, "every worker has exited");
                        break;
                    }
                }
                Drained::Stopped => break,
            }
        }

        if self.found >= self.wanted {
            debug!(found = self.found, "target reached, cancelling workers");
        }
        self.stop();
        self.found
    }

    /// Signals all workers to stop.
    pub fn stop(&mut self) {
        self.cancel.cancel();
        self.context = None;
    }

    /// Waits for all workers to complete and returns the final statistics.
    pub fn join(mut self) -> SearchSummary {
        self.stop();
        self.join_workers();
        SearchSummary {
            found: self.found,
            matches: self.stats.total_found(),
            attempts: self.stats.total_attempts(),
            elapsed: self.stats.elapsed(),
            interrupted: self.found < self.wanted,
        }
    }

    fn join_workers(&mut self) {
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }

    /// Returns the number of workers.
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Returns the total attempts across all workers.
    pub fn total_attempts(&self) -> u64 {
        self.stats.total_attempts()
    }

    /// Returns a handle to the stop signal for external use (e.g., signal handlers).
    pub fn cancellation(&self) -> CancellationSignal {
        self.cancel.clone()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.stop();
        // Wait for workers to finish if they haven't been joined
        self.join_workers();
    }
}
