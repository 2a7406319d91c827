//! Centralized filename parsing for the `NN Name` convention.
//!
//! Photography files carry an optional leading integer prefix separated by
//! whitespace (`10 Beach.jpg`, `2 Forest.jpg`). The prefix controls ordering
//! within a folder; the remainder of the stem feeds metadata extraction.
//! Graphics files usually have no prefix and sort lexicographically.
//!
//! ## Ordering
//!
//! [`sort_key`] builds the sibling comparator used by the scanner:
//! - prefixed entries sort by prefix value, ascending (`2` before `10`)
//! - unprefixed entries sort after every prefixed one
//! - ties fall back to the full name, lexicographically

/// Result of splitting a file stem on its numeric prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Leading integer prefix if present (e.g. `10` from `10 Beach`).
    pub number: Option<u32>,
    /// Stem with the prefix and separating whitespace stripped.
    /// For unprefixed stems, this is the full input.
    pub rest: String,
}

/// Split a file stem on the `NN Name` convention.
///
/// - `"10 Beach"` → number=Some(10), rest="Beach"
/// - `"3 Model-Jane Doe, Paris"` → number=Some(3), rest="Model-Jane Doe, Paris"
/// - `"7"` → number=Some(7), rest=""
/// - `"Apple"` → number=None, rest="Apple"
/// - `"4K Wallpaper"` → number=None, rest="4K Wallpaper" (digits not followed
///   by whitespace are part of the name, not a prefix)
pub fn split_numeric_prefix(stem: &str) -> ParsedName {
    let digits: String = stem.chars().take_while(|c| c.is_ascii_digit()).collect();
    if !digits.is_empty() {
        let remainder = &stem[digits.len()..];
        let is_prefix = remainder.is_empty() || remainder.starts_with(char::is_whitespace);
        if is_prefix && let Ok(number) = digits.parse::<u32>() {
            return ParsedName {
                number: Some(number),
                rest: remainder.trim_start().to_string(),
            };
        }
    }
    ParsedName {
        number: None,
        rest: stem.to_string(),
    }
}

/// Sibling sort key for numeric-prefix ordering.
///
/// Unprefixed names get `u32::MAX`, placing them after every prefixed entry;
/// the name component breaks ties lexicographically.
pub fn sort_key(name: &str) -> (u32, String) {
    let stem = name.rsplit_once('.').map(|(s, _)| s).unwrap_or(name);
    let parsed = split_numeric_prefix(stem);
    (parsed.number.unwrap_or(u32::MAX), name.to_string())
}
