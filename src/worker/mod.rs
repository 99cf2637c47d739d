//! Worker pool for parallel vanity address search.
//!
//! This module provides:
//! - Multi-threaded CPU workers sharing atomic counters
//! - A broadcast cancellation signal
//! - Result draining and worker replenishment
//! - A generation-only throughput benchmark

mod bench;
mod cancel;
mod cpu;
mod pool;

pub use bench::{Benchmark, BenchmarkReport};
pub use cancel::CancellationSignal;
pub use cpu::{CpuWorker, WorkerContext, WorkerStats, LOG_INTERVAL};
pub use pool::{SearchResult, SearchSummary, SearchTarget, WorkerPool};
