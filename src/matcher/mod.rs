//! Pattern matching for XRPL classic addresses.
//!
//! A pattern is a required prefix, a required suffix, or both, compared
//! verbatim or case-insensitively.

mod pattern;

pub use pattern::{MatchResult, Pattern};
