//! Raw generation throughput benchmark.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::crypto::KeyGenerator;

use super::CancellationSignal;

/// Shared counters of one benchmark run.
#[derive(Debug, Default)]
struct BenchCounters {
    /// Slots handed out, never past the target
    claimed: AtomicU64,
    /// Keypairs actually generated
    generated: AtomicU64,
}

impl BenchCounters {
    /// Claims one slot if the target has not been reached yet.
    fn claim(&self, target: u64) -> bool {
        self.claimed
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| {
                (n < target).then_some(n + 1)
            })
            .is_ok()
    }
}

/// Outcome of a benchmark run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkReport {
    /// Keypairs generated
    pub generated: u64,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
    /// True if the run was cancelled before reaching the target
    pub interrupted: bool,
}

impl BenchmarkReport {
    /// Keypairs per second.
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.generated as f64 / secs
        } else {
            0.0
        }
    }
}

/// Generates `target` keypairs across `num_workers` threads and times it.
pub struct Benchmark {
    num_workers: usize,
    target: u64,
    generator: Arc<dyn KeyGenerator>,
    cancel: CancellationSignal,
}

impl Benchmark {
    /// Creates a benchmark that generates `target` keypairs on `num_workers` threads.
    pub fn new(num_workers: usize, target: u64, generator: Arc<dyn KeyGenerator>) -> Self {
        Self {
            num_workers: num_workers.max(1),
            target,
            generator,
            cancel: CancellationSignal::new(),
        }
    }

    /// Returns a handle to the stop signal for external use (e.g., signal handlers).
    pub fn cancellation(&self) -> CancellationSignal {
        self.cancel.clone()
    }

    /// Runs the benchmark to completion (or cancellation).
    pub fn run(&self) -> BenchmarkReport {
        let counters = Arc::new(BenchCounters::default());
        let start = Instant::now();

        let handles: Vec<JoinHandle<()>> = (0..self.num_workers)
            .filter_map(|id| {
                let counters = counters.clone();
                let generator = self.generator.clone();
                let cancel = self.cancel.clone();
                let target = self.target;

                thread::Builder::new()
                    .name(format!("bench-worker-{}", id))
                    .spawn(move || bench_loop(id, target, &*generator, &cancel, &counters))
                    .map_err(|err| warn!(worker = id, error = %err, "failed to spawn worker thread"))
                    .ok()
            })
            .collect();

        for handle in handles {
            let _ = handle.join();
        }

        let generated = counters.generated.load(Ordering::Relaxed);
        BenchmarkReport {
            generated,
            elapsed: start.elapsed(),
            interrupted: generated < self.target,
        }
    }
}

fn bench_loop(
    id: usize,
    target: u64,
    generator: &dyn KeyGenerator,
    cancel: &CancellationSignal,
    counters: &BenchCounters,
) {
    debug!(worker = id, "bench worker started");

    while !cancel.is_cancelled() && counters.claim(target) {
        // A claimed slot is retried until it produces a keypair
        loop {
            if cancel.is_cancelled() {
                return;
            }
            match generator.generate() {
                Ok(_) => break,
                Err(err) => trace!(worker = id, error = %err, "generation failed, retrying"),
            }
        }
        counters.generated.fetch_add(1, Ordering::Relaxed);
    }

    debug!(worker = id, "bench worker finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{KeyGenError, Keypair};

    struct Fixed;

    impl KeyGenerator for Fixed {
        fn generate(&self) -> Result<Keypair, KeyGenError> {
            Ok(Keypair::from_parts("r", "sEd"))
        }
    }

    #[test]
    fn test_claim_stops_at_target() {
        let counters = BenchCounters::default();
        assert!(counters.claim(2));
        assert!(counters.claim(2));
        assert!(!counters.claim(2));
        assert_eq!(counters.claimed.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_exact_count() {
        let report = Benchmark::new(4, 10_000, Arc::new(Fixed)).run();
        assert_eq!(report.generated, 10_000);
        assert!(!report.interrupted);
    }

    #[test]
    fn test_zero_target() {
        let report = Benchmark::new(2, 0, Arc::new(Fixed)).run();
        assert_eq!(report.generated, 0);
        assert_eq!(report.throughput(), 0.0);
    }

    #[test]
    fn test_cancelled_before_start() {
        let bench = Benchmark::new(2, 1_000, Arc::new(Fixed));
        bench.cancellation().cancel();
        let report = bench.run();
        assert_eq!(report.generated, 0);
        assert!(report.interrupted);
    }
}
