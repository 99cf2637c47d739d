//! XRP Ledger Vanity Address Generator CLI
//!
//! Usage:
//!   xrpl_vanity --starts-with rLOL               # Address starting with "rLOL" (any case)
//!   xrpl_vanity --ends-with xyz --count 3        # Three addresses ending with "xyz"
//!   xrpl_vanity --starts-with rAB --is-case-sensitive --threads 8

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;

use xrpl_vanity::format::{format_elapsed, format_number};
use xrpl_vanity::{Ed25519Generator, SearchConfig, SearchResult, WorkerPool};

fn main() -> Result<()> {
    xrpl_vanity::init_logging();

    let config = SearchConfig::parse();

    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    }

    let target = config.target();
    let pattern = &target.pattern;

    if !pattern.has_reachable_lead() {
        warn!(prefix = %config.starts_with, "every classic address starts with 'r'; this prefix can never match");
    }
    let unreachable = pattern.unreachable_chars();
    if !unreachable.is_empty() {
        warn!(chars = ?unreachable, "pattern contains characters that never appear in an address");
    }

    println!("XRP Ledger Vanity Address Generator");
    println!("===================================");
    println!("Pattern:        {}", pattern);
    println!("Case-sensitive: {}", pattern.is_case_sensitive());
    println!("Difficulty:     {}", pattern.difficulty_description());
    println!("Workers:        {}", config.worker_count());
    println!("Target:         {} wallet(s)", target.wanted);
    println!();

    let wanted = target.wanted;
    let mut pool = WorkerPool::new(config.worker_count(), target, Arc::new(Ed25519Generator));

    let cancel = pool.cancellation();
    ctrlc::set_handler(move || cancel.cancel()).context("Error setting Ctrl-C handler")?;

    println!("Searching... (Press Ctrl+C to stop)\n");

    let found = pool.collect(print_result);

    if found >= wanted {
        println!("\nTarget reached! Found {} wallet(s).", found);
    } else {
        println!("\nStopped by user after {} of {} wallet(s).", found, wanted);
    }

    let summary = pool.join();

    println!("\n--- Final Statistics ---");
    println!("Total attempts: {}", summary.attempts);
    println!("Elapsed time:   {}", format_elapsed(summary.elapsed));
    let secs = summary.elapsed.as_secs_f64();
    if secs > 0.0 {
        println!(
            "Average speed:  {}/s",
            format_number((summary.attempts as f64 / secs) as u64)
        );
    }

    Ok(())
}

fn print_result(index: usize, result: &SearchResult) {
    println!("=== Wallet #{} ===", index);
    println!("Address:    {}", result.address);
    println!("Seed:       {}", result.seed);
    println!("Public Key: {}", result.public_key);
    println!("Worker:     {}", result.worker_id);
    println!();
}
