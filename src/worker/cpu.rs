//! CPU-based worker for vanity address search.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{select, Sender};
use tracing::{debug, info, trace};

use crate::crypto::KeyGenerator;
use crate::matcher::Pattern;

use super::{CancellationSignal, SearchResult};

/// Attempt counts at which a progress line is emitted.
pub const LOG_INTERVAL: u64 = 100_000;

/// Counters shared by every worker of one search.
#[derive(Debug)]
pub struct WorkerStats {
    /// Keypairs generated and checked
    pub attempts: AtomicU64,
    /// Matches found (including ones the pool never drains)
    pub found: AtomicU64,
    /// When the search started
    start_time: Instant,
}

impl WorkerStats {
    /// Creates new worker stats, starting the clock.
    pub fn new() -> Self {
        Self {
            attempts: AtomicU64::new(0),
            found: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Returns the total attempts.
    pub fn total_attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Returns the total matches found.
    pub fn total_found(&self) -> u64 {
        self.found.load(Ordering::Relaxed)
    }

    /// Returns the time since the stats were created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for WorkerStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a worker shares with its pool and siblings.
#[derive(Clone)]
pub struct WorkerContext {
    /// The pattern to match against
    pub pattern: Pattern,
    /// Number of matches the search wants, for progress lines
    pub wanted: usize,
    /// Source of keypairs
    pub generator: Arc<dyn KeyGenerator>,
    /// Channel to send the result
    pub result_tx: Sender<SearchResult>,
    /// Shared stop signal
    pub cancel: CancellationSignal,
    /// Shared statistics
    pub stats: Arc<WorkerStats>,
    /// Progress line cadence, in attempts
    pub log_interval: u64,
}

/// A CPU worker that generates keypairs until one matches.
pub struct CpuWorker {
    /// Worker ID
    id: usize,
    /// Shared search state
    ctx: WorkerContext,
}

impl CpuWorker {
    /// Creates a new CPU worker.
    pub fn new(id: usize, ctx: WorkerContext) -> Self {
        Self { id, ctx }
    }

    /// Runs the worker loop.
    ///
    /// Generates keypairs and tests them against the pattern until:
    /// - A match is found (sends the result, then exits)
    /// - The cancellation signal is raised
    pub fn run(&self) {
        debug!(worker = self.id, "worker started");

        loop {
            if self.ctx.cancel.is_cancelled() {
                debug!(worker = self.id, "worker cancelled");
                return;
            }

            let keypair = match self.ctx.generator.generate() {
                Ok(keypair) => keypair,
                Err(err) => {
                    trace!(worker = self.id, error = %err, "generation failed, retrying");
                    continue;
                }
            };

            let attempts = self.ctx.stats.attempts.fetch_add(1, Ordering::Relaxed) + 1;
            if attempts % self.ctx.log_interval.max(1) == 0 {
                self.log_progress(attempts);
            }

            if !self.ctx.pattern.matches(keypair.address()).is_match() {
                continue;
            }

            self.ctx.stats.found.fetch_add(1, Ordering::Relaxed);
            let public_key = keypair.public_key_hex();
            let (address, seed) = keypair.into_parts();
            let result = SearchResult {
                address,
                seed,
                public_key,
                worker_id: self.id,
            };

            // A full queue must not outlive cancellation
            select! {
                send(self.ctx.result_tx, result) -> sent => {
                    if sent.is_err() {
                        debug!(worker = self.id, "result channel closed, match dropped");
                    }
                }
                recv(self.ctx.cancel.listener()) -> _ => {
                    debug!(worker = self.id, "cancelled while queue full, match dropped");
                }
            }
            debug!(worker = self.id, "worker finished");
            return;
        }
    }

    fn log_progress(&self, attempts: u64) {
        let found = self.ctx.stats.total_found();
        let elapsed = Duration::from_secs(self.ctx.stats.elapsed().as_secs());
        info!(
            attempts,
            found,
            wanted = self.ctx.wanted,
            elapsed = ?elapsed,
            "Checked {} keypairs in {:?}. Found {} / {}",
            attempts,
            elapsed,
            found,
            self.ctx.wanted
        );
    }
}
