// Core data structures for the rebang aggregator

use serde::{Deserialize, Serialize};

/// One normalized trending item
///
/// Every source adapter maps its own response schema into this shape.
/// Items are created complete and never mutated downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotItem {
    /// 1-based rank within the item's own source, assigned after any
    /// source-specific skip/filter
    pub rank: u32,

    /// Topic title, guaranteed non-empty by the adapters
    pub title: String,

    /// Popularity score; units vary by source, never negative
    pub hot: i64,

    /// Canonical source label (e.g. "微博"), fixed per adapter and
    /// independent of the configured endpoint name
    pub source: String,
}

impl HotItem {
    /// Human-readable popularity, e.g. `123.4万` or `56.7千`
    pub fn formatted_hot(&self) -> String {
        format_hot(self.hot)
    }
}

/// Format a popularity score for display
///
/// Thresholds are strict: exactly 10,000 and exactly 1,000,000 render as
/// plain integers. The decimal point is always `.`, independent of locale.
pub fn format_hot(hot: i64) -> String {
    if hot > 1_000_000 {
        format!("{:.1}万", hot as f64 / 10_000.0)
    } else if hot > 10_000 {
        format!("{:.1}千", hot as f64 / 1_000.0)
    } else {
        hot.to_string()
    }
}

/// Lenient numeric parse used for popularity fields
///
/// Sources deliver scores as numbers, numeric strings, or comma-grouped
/// strings ("1,234,567"). Anything unparsable becomes 0, and negative
/// values are clamped to 0. A bad score never fails the item.
pub fn parse_lenient(raw: &str) -> i64 {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<i64>().unwrap_or(0).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hot_plain() {
        assert_eq!(format_hot(0), "0");
        assert_eq!(format_hot(500), "500");
        assert_eq!(format_hot(9_999), "9999");
    }

    #[test]
    fn test_format_hot_thresholds_are_strict() {
        // Boundary values stay on the unsuffixed branch
        assert_eq!(format_hot(10_000), "10000");
        assert_eq!(format_hot(10_001), "10.0千");
        assert_eq!(format_hot(1_000_000), "1000.0千");
        assert_eq!(format_hot(1_000_001), "100.0万");
    }

    #[test]
    fn test_format_hot_scaling() {
        assert_eq!(format_hot(500_000), "500.0千");
        assert_eq!(format_hot(2_000_000), "200.0万");
        assert_eq!(format_hot(12_345_678), "1234.6万");
    }

    #[test]
    fn test_formatted_hot_on_item() {
        let item = HotItem {
            rank: 1,
            title: "foo".to_string(),
            hot: 2_000_000,
            source: "微博".to_string(),
        };
        assert_eq!(item.formatted_hot(), "200.0万");
    }

    #[test]
    fn test_parse_lenient_plain_and_grouped() {
        assert_eq!(parse_lenient("12345"), 12_345);
        assert_eq!(parse_lenient("1,234,567"), 1_234_567);
        assert_eq!(parse_lenient("  42  "), 42);
    }

    #[test]
    fn test_parse_lenient_defaults_to_zero() {
        assert_eq!(parse_lenient(""), 0);
        assert_eq!(parse_lenient("n/a"), 0);
        assert_eq!(parse_lenient("12.5"), 0);
        assert_eq!(parse_lenient("-100"), 0);
    }
}
