//! String helpers shared by the built-in rules and the CLI.

use chrono::DateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_categories::UnicodeCategories;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// Reverses a string by Unicode scalar value.
pub fn reverse_string(s: &str) -> String {
    s.chars().rev().collect()
}

/// Number of whitespace-separated words.
pub fn count_words(s: &str) -> usize {
    s.split_whitespace().count()
}

/// Case-insensitive palindrome check that ignores whitespace and punctuation.
///
/// Punctuation is the Unicode `P*` category, so `«` and `¿` are skipped while
/// symbols such as `$` or `+` still count.
pub fn is_palindrome(s: &str) -> bool {
    let cleaned: Vec<char> = s
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_punctuation())
        .flat_map(char::to_lowercase)
        .collect();

    cleaned.iter().eq(cleaned.iter().rev())
}

/// Upper-cases the first letter of every word, leaving the rest untouched.
///
/// A word starts after any character that is not alphanumeric or `_`, so
/// `"mary-jane o'neil"` becomes `"Mary-Jane O'Neil"`.
pub fn capitalize_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }

    out
}

/// Basic structural email check (`local@domain.tld`).
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// True when the input is an RFC 3339 timestamp, e.g. `2024-01-15T10:30:00Z`.
pub fn is_valid_timestamp(timestamp: &str) -> bool {
    DateTime::parse_from_rfc3339(timestamp).is_ok()
}
