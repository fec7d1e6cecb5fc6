//! Normalized stock ticker symbols

use serde::{Deserialize, Serialize};
use std::fmt;

/// A stock symbol in canonical form: trimmed and upper-cased.
///
/// Construction goes through [`Ticker::parse`], so a `Ticker` value is
/// normalized by the time it exists. Normalizing an already-normalized
/// symbol is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    /// Parse a raw user-supplied symbol into canonical form.
    ///
    /// Returns `None` when the input is empty after trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_uppercase()))
    }

    /// The canonical symbol string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters in the canonical symbol
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Whether the symbol is empty (never true for a parsed ticker)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The prefix of the first `n` characters, used by the scripted
    /// typing animation.
    pub fn prefix(&self, n: usize) -> String {
        self.0.chars().take(n).collect()
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes() {
        let ticker = Ticker::parse("  aapl ").unwrap();
        assert_eq!(ticker.as_str(), "AAPL");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(Ticker::parse("").is_none());
        assert!(Ticker::parse("   ").is_none());
        assert!(Ticker::parse("\t\n").is_none());
    }

    #[test]
    fn test_normalization_idempotent() {
        for raw in ["tsla", " Msft ", "BRK.B", "aApL"] {
            let once = Ticker::parse(raw).unwrap();
            let twice = Ticker::parse(once.as_str()).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_equality_after_normalization() {
        let a = Ticker::parse("aapl").unwrap();
        let b = Ticker::parse("AAPL ").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_prefixes() {
        let ticker = Ticker::parse("aapl").unwrap();
        let prefixes: Vec<String> = (1..=ticker.len()).map(|i| ticker.prefix(i)).collect();
        assert_eq!(prefixes, vec!["A", "AA", "AAP", "AAPL"]);
    }

    #[test]
    fn test_serde_transparent() {
        let ticker = Ticker::parse("TSLA").unwrap();
        let json = serde_json::to_string(&ticker).unwrap();
        assert_eq!(json, "\"TSLA\"");

        let back: Ticker = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ticker);
    }
}
