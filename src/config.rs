//! Runtime configuration for the search and benchmark binaries.

use clap::{ArgAction, Parser};

use crate::matcher::Pattern;
use crate::worker::SearchTarget;

/// Upper bound on worker threads.
pub const MAX_THREADS: usize = 1000;

/// XRP Ledger Vanity Address Generator
#[derive(Parser, Debug, Clone)]
#[command(name = "xrpl_vanity", author, version, about, long_about = None)]
pub struct SearchConfig {
    /// Prefix to search for (e.g. "rLOL")
    #[arg(long, default_value = "")]
    pub starts_with: String,

    /// Suffix to search for (e.g. "xyz")
    #[arg(long, default_value = "")]
    pub ends_with: String,

    /// Number of matching wallets to find
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub count: i64,

    /// Number of worker threads (default: number of CPU cores, max 1000)
    #[arg(long, allow_negative_numbers = true)]
    pub threads: Option<i64>,

    /// Match prefix/suffix with exact case
    #[arg(
        long,
        default_value_t = false,
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub is_case_sensitive: bool,
}

impl SearchConfig {
    /// Returns the number of workers, defaulting to CPU count
    pub fn worker_count(&self) -> usize {
        resolve_threads(self.threads)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starts_with.is_empty() && self.ends_with.is_empty() {
            return Err(ConfigError::MissingPattern);
        }

        if self.count < 1 {
            return Err(ConfigError::InvalidCount(self.count));
        }

        Ok(())
    }

    /// Returns the pattern, normalized for the chosen case rule
    pub fn pattern(&self) -> Pattern {
        Pattern::new(
            self.starts_with.as_str(),
            self.ends_with.as_str(),
            self.is_case_sensitive,
        )
    }

    /// Returns the search target. Only meaningful after `validate`.
    pub fn target(&self) -> SearchTarget {
        SearchTarget::new(self.pattern(), saturating_count(self.count))
    }
}

/// XRP Ledger wallet generation benchmark
#[derive(Parser, Debug, Clone)]
#[command(name = "xrpl_vanity_bench", author, version, about, long_about = None)]
pub struct BenchConfig {
    /// Number of wallets to generate for the speed test
    #[arg(long, default_value_t = 1_000_000, allow_negative_numbers = true)]
    pub wallets: i64,

    /// Number of worker threads (default: number of CPU cores, max 1000)
    #[arg(long, allow_negative_numbers = true)]
    pub threads: Option<i64>,
}

impl BenchConfig {
    /// Returns the number of workers, defaulting to CPU count
    pub fn worker_count(&self) -> usize {
        resolve_threads(self.threads)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wallets < 1 {
            return Err(ConfigError::InvalidWallets(self.wallets));
        }
        Ok(())
    }

    /// Returns the number of wallets to generate. Only meaningful after `validate`.
    pub fn wallet_count(&self) -> u64 {
        u64::try_from(self.wallets).unwrap_or(0)
    }
}

/// Resolves a requested thread count: non-positive or missing means CPU
/// count, anything above [`MAX_THREADS`] is clamped.
pub fn resolve_threads(requested: Option<i64>) -> usize {
    match requested {
        Some(n) if n >= 1 => usize::try_from(n).map_or(MAX_THREADS, |n| n.min(MAX_THREADS)),
        _ => num_cpus::get().clamp(1, MAX_THREADS),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("You must provide at least one of --starts-with or --ends-with")]
    MissingPattern,
    #[error("Count must be at least 1 (got {0})")]
    InvalidCount(i64),
    #[error("Wallets must be at least 1 (got {0})")]
    InvalidWallets(i64),
}

/// Converts a validated count, saturating where `usize` is narrower than `i64`.
fn saturating_count(count: i64) -> usize {
    if count < 1 {
        return 1;
    }
    usize::try_from(count).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_config(prefix: &str, suffix: &str) -> SearchConfig {
        SearchConfig {
            starts_with: prefix.into(),
            ends_with: suffix.into(),
            count: 1,
            threads: None,
            is_case_sensitive: false,
        }
    }

    #[test]
    fn test_valid_pattern() {
        assert!(make_test_config("rAB", "").validate().is_ok());
        assert!(make_test_config("", "xyz").validate().is_ok());
    }

    #[test]
    fn test_missing_pattern() {
        let config = make_test_config("", "");
        assert!(matches!(config.validate(), Err(ConfigError::MissingPattern)));
    }

    #[test]
    fn test_invalid_count() {
        for count in [0, -3] {
            let mut config = make_test_config("r", "");
            config.count = count;
            assert!(matches!(config.validate(), Err(ConfigError::InvalidCount(c)) if c == count));
        }
    }

    #[test]
    fn test_count_conversion_saturates() {
        assert_eq!(saturating_count(0), 1);
        assert_eq!(saturating_count(-1), 1);
        assert_eq!(saturating_count(5), 5);
        assert_eq!(saturating_count(i64::MAX), usize::try_from(i64::MAX).unwrap_or(usize::MAX));

        let mut config = make_test_config("r", "");
        config.count = i64::MAX;
        assert!(config.target().wanted > 1);
    }

    #[test]
    fn test_thread_clamping() {
        let cpus = num_cpus::get().clamp(1, MAX_THREADS);
        assert_eq!(resolve_threads(None), cpus);
        assert_eq!(resolve_threads(Some(0)), cpus);
        assert_eq!(resolve_threads(Some(-5)), cpus);
        assert_eq!(resolve_threads(Some(1)), 1);
        assert_eq!(resolve_threads(Some(1000)), 1000);
        assert_eq!(resolve_threads(Some(1001)), 1000);
        assert_eq!(resolve_threads(Some(i64::MAX)), 1000);
    }

    #[test]
    fn test_parse_search_flags() {
        let config = SearchConfig::try_parse_from([
            "xrpl_vanity",
            "--starts-with",
            "rAB",
            "--count",
            "3",
            "--threads",
            "4",
            "--is-case-sensitive",
        ])
        .unwrap();

        assert_eq!(config.starts_with, "rAB");
        assert_eq!(config.ends_with, "");
        assert_eq!(config.count, 3);
        assert_eq!(config.worker_count(), 4);
        assert!(config.is_case_sensitive);
        assert_eq!(config.target().wanted, 3);
        assert_eq!(config.target().pattern.prefix(), "rAB");
    }

    #[test]
    fn test_parse_defaults() {
        let config = SearchConfig::try_parse_from(["xrpl_vanity", "--ends-with", "XYZ"]).unwrap();
        assert_eq!(config.count, 1);
        assert!(!config.is_case_sensitive);
        assert_eq!(config.pattern().suffix(), "xyz");
    }

    #[test]
    fn test_parse_explicit_bool_and_negatives() {
        let config = SearchConfig::try_parse_from([
            "xrpl_vanity",
            "--starts-with",
            "r",
            "--is-case-sensitive",
            "false",
            "--threads",
            "-1",
            "--count",
            "-2",
        ])
        .unwrap();

        assert!(!config.is_case_sensitive);
        assert_eq!(config.threads, Some(-1));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bench_config() {
        let config = BenchConfig::try_parse_from(["xrpl_vanity_bench"]).unwrap();
        assert_eq!(config.wallet_count(), 1_000_000);
        assert!(config.validate().is_ok());

        let config = BenchConfig::try_parse_from(["xrpl_vanity_bench", "--wallets", "0"]).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidWallets(0))));
    }
}
