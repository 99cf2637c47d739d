//! # xrpl_vanity
//!
//! High-performance XRP Ledger vanity address generator.
//!
//! ## Architecture
//!
//! - `crypto`: Ed25519 key generation and XRPL address/seed encoding
//! - `matcher`: Prefix/suffix pattern matching
//! - `worker`: Parallel search, cancellation and the throughput benchmark
//! - `config`: Command-line configuration
//! - `format`: Console formatting helpers

pub mod config;
pub mod crypto;
pub mod format;
pub mod matcher;
pub mod worker;

pub use config::{BenchConfig, ConfigError, SearchConfig};
pub use crypto::{Ed25519Generator, KeyGenError, KeyGenerator, Keypair};
pub use matcher::{MatchResult, Pattern};
pub use worker::{
    Benchmark, BenchmarkReport, CancellationSignal, SearchResult, SearchSummary, SearchTarget,
    WorkerPool,
};

/// Installs the `tracing` subscriber used by the binaries.
///
/// Defaults to `info`; override with `RUST_LOG`.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
