//! XRP Ledger wallet generation benchmark
//!
//! Usage:
//!   xrpl_vanity_bench                          # 1,000,000 wallets on every core
//!   xrpl_vanity_bench --wallets 50000 --threads 2

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use xrpl_vanity::format::format_number;
use xrpl_vanity::{BenchConfig, Benchmark, Ed25519Generator};

fn main() -> Result<()> {
    xrpl_vanity::init_logging();

    let config = BenchConfig::parse();

    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    }

    println!(
        "Benchmarking wallet generation with {} attempts using {} threads...",
        config.wallet_count(),
        config.worker_count()
    );

    let bench = Benchmark::new(
        config.worker_count(),
        config.wallet_count(),
        Arc::new(Ed25519Generator),
    );

    let cancel = bench.cancellation();
    ctrlc::set_handler(move || cancel.cancel()).context("Error setting Ctrl-C handler")?;

    let report = bench.run();

    if report.interrupted {
        println!("Stopped by user.");
    }
    println!(
        "Generated {} wallets in {:.2} seconds",
        report.generated,
        report.elapsed.as_secs_f64()
    );
    println!(
        "Speed: {:.2} wallets/sec ({}/s)",
        report.throughput(),
        format_number(report.throughput() as u64)
    );

    Ok(())
}
