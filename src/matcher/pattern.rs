//! Pattern matching implementation.

use std::fmt;

use crate::crypto::ALPHABET;

/// Every classic address begins with this character.
const ADDRESS_LEAD: char = 'r';

/// Result of a pattern match operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// Full match found
    Match,
    /// No match
    NoMatch,
}

impl MatchResult {
    #[inline]
    pub fn is_match(self) -> bool {
        matches!(self, MatchResult::Match)
    }
}

/// A prefix/suffix pattern, normalized once for repeated matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// Required prefix (lower-cased unless case sensitive)
    prefix: String,
    /// Required suffix (lower-cased unless case sensitive)
    suffix: String,
    /// Whether matching is case sensitive
    case_sensitive: bool,
}

impl Pattern {
    /// Creates a new pattern. Empty prefix or suffix means "don't care".
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>, case_sensitive: bool) -> Self {
        let normalize = |s: String| if case_sensitive { s } else { s.to_lowercase() };

        Self {
            prefix: normalize(prefix.into()),
            suffix: normalize(suffix.into()),
            case_sensitive,
        }
    }

    /// Returns the normalized prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the normalized suffix.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Returns true if letters must match exactly.
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Returns true if neither a prefix nor a suffix is required.
    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty() && self.suffix.is_empty()
    }

    /// Matches an address against this pattern.
    #[inline]
    pub fn matches(&self, address: &str) -> MatchResult {
        let matched = if self.case_sensitive {
            address.starts_with(&self.prefix) && address.ends_with(&self.suffix)
        } else if address.is_ascii() {
            // Classic addresses are ASCII: fold in place without allocating
            starts_with_ignore_case(address, &self.prefix)
                && ends_with_ignore_case(address, &self.suffix)
        } else {
            let lowered = address.to_lowercase();
            lowered.starts_with(&self.prefix) && lowered.ends_with(&self.suffix)
        };

        if matched {
            MatchResult::Match
        } else {
            MatchResult::NoMatch
        }
    }

    /// Characters of the pattern that never appear in a classic address.
    pub fn unreachable_chars(&self) -> Vec<char> {
        let mut chars: Vec<char> = self
            .prefix
            .chars()
            .chain(self.suffix.chars())
            .filter(|&c| self.variants(c) == 0)
            .collect();
        chars.sort_unstable();
        chars.dedup();
        chars
    }

    /// Returns false if the prefix cannot start a classic address.
    pub fn has_reachable_lead(&self) -> bool {
        match self.prefix.chars().next() {
            Some(c) => self.char_matches(ADDRESS_LEAD, c),
            None => true,
        }
    }

    /// Returns the estimated difficulty (expected attempts to find a match).
    ///
    /// Each position is treated as uniform over the 58-character alphabet.
    /// A leading `r` in the prefix costs nothing since every address has it.
    pub fn estimated_difficulty(&self) -> f64 {
        if !self.has_reachable_lead() {
            return f64::INFINITY;
        }

        let skip = usize::from(!self.prefix.is_empty());
        self.prefix
            .chars()
            .skip(skip)
            .chain(self.suffix.chars())
            .map(|c| match self.variants(c) {
                0 => f64::INFINITY,
                n => ALPHABET.len() as f64 / n as f64,
            })
            .product()
    }

    /// Returns a human-readable difficulty estimate.
    pub fn difficulty_description(&self) -> String {
        let diff = self.estimated_difficulty();
        if !diff.is_finite() {
            "Impossible (pattern cannot occur in an address)".into()
        } else if diff <= 1_000.0 {
            "Very Easy (< 1 second)".into()
        } else if diff <= 100_000.0 {
            "Easy (seconds)".into()
        } else if diff <= 10_000_000.0 {
            "Medium (minutes)".into()
        } else if diff <= 1_000_000_000.0 {
            "Hard (hours)".into()
        } else {
            "Very Hard (days or more)".into()
        }
    }

    /// Number of alphabet characters that `c` matches under this pattern's case rule.
    fn variants(&self, c: char) -> usize {
        ALPHABET.chars().filter(|&a| self.char_matches(a, c)).count()
    }

    fn char_matches(&self, address_char: char, pattern_char: char) -> bool {
        if self.case_sensitive {
            address_char == pattern_char
        } else {
            address_char.to_ascii_lowercase() == pattern_char
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.prefix.is_empty(), self.suffix.is_empty()) {
            (false, false) => write!(f, "{}...{}", self.prefix, self.suffix),
            (false, true) => write!(f, "{}...", self.prefix),
            (true, false) => write!(f, "...{}", self.suffix),
            (true, true) => write!(f, "..."),
        }
    }
}

#[inline]
fn starts_with_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.len() >= needle.len()
        && haystack.as_bytes()[..needle.len()].eq_ignore_ascii_case(needle.as_bytes())
}

#[inline]
fn ends_with_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.len() >= needle.len()
        && haystack.as_bytes()[haystack.len() - needle.len()..].eq_ignore_ascii_case(needle.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";

    #[test]
    fn test_prefix_match() {
        let pattern = Pattern::new("rHb9", "", true);
        assert!(pattern.matches(ADDR).is_match());
    }

    #[test]
    fn test_prefix_no_match() {
        let pattern = Pattern::new("rHB9", "", true);
        assert!(!pattern.matches(ADDR).is_match());
    }

    #[test]
    fn test_case_insensitive_prefix() {
        let pattern = Pattern::new("RHB9", "", false);
        assert_eq!(pattern.prefix(), "rhb9");
        assert!(pattern.matches(ADDR).is_match());
    }

    #[test]
    fn test_suffix_match() {
        assert!(Pattern::new("", "tyTh", true).matches(ADDR).is_match());
        assert!(!Pattern::new("", "TYTH", true).matches(ADDR).is_match());
        assert!(Pattern::new("", "TYTH", false).matches(ADDR).is_match());
    }

    #[test]
    fn test_prefix_and_suffix() {
        assert!(Pattern::new("rhb", "th", false).matches(ADDR).is_match());
        assert!(!Pattern::new("rhb", "xx", false).matches(ADDR).is_match());
        assert!(!Pattern::new("rxx", "th", false).matches(ADDR).is_match());
    }

    #[test]
    fn test_empty_pattern_matches_everything() {
        let pattern = Pattern::new("", "", false);
        assert!(pattern.is_empty());
        assert!(pattern.matches(ADDR).is_match());
        assert!(pattern.matches("").is_match());
    }

    #[test]
    fn test_pattern_longer_than_address() {
        let pattern = Pattern::new("rabcdef", "", false);
        assert!(!pattern.matches("rab").is_match());
        let pattern = Pattern::new("", "abcdef", false);
        assert!(!pattern.matches("def").is_match());
    }

    #[test]
    fn test_non_ascii_address() {
        let pattern = Pattern::new("ÄB", "", false);
        assert!(pattern.matches("äbc").is_match());
    }

    #[test]
    fn test_unreachable_chars() {
        // '0', 'O', 'I' and 'l' are not in the alphabet
        let pattern = Pattern::new("r0O", "Il", true);
        assert_eq!(pattern.unreachable_chars(), vec!['0', 'I', 'O', 'l']);

        // 'l' is reachable case-insensitively through 'L'
        let pattern = Pattern::new("rl", "", false);
        assert!(pattern.unreachable_chars().is_empty());
    }

    #[test]
    fn test_reachable_lead() {
        assert!(Pattern::new("rab", "", true).has_reachable_lead());
        assert!(Pattern::new("Rab", "", false).has_reachable_lead());
        assert!(!Pattern::new("Rab", "", true).has_reachable_lead());
        assert!(!Pattern::new("ab", "", false).has_reachable_lead());
        assert!(Pattern::new("", "ab", false).has_reachable_lead());
    }

    #[test]
    fn test_difficulty() {
        // Leading 'r' is free; 'z' appears once in the alphabet
        let pattern = Pattern::new("rz", "", true);
        assert_eq!(pattern.estimated_difficulty(), 58.0);

        // 'b' and 'B' both exist, so case-insensitive halves the cost
        let pattern = Pattern::new("", "b", false);
        assert_eq!(pattern.estimated_difficulty(), 29.0);

        let pattern = Pattern::new("ab", "", false);
        assert!(pattern.estimated_difficulty().is_infinite());
        assert!(pattern.difficulty_description().starts_with("Impossible"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Pattern::new("rAB", "", true).to_string(), "rAB...");
        assert_eq!(Pattern::new("", "xyz", true).to_string(), "...xyz");
        assert_eq!(Pattern::new("rA", "z", true).to_string(), "rA...z");
    }
}
