//! Email-shaped mention extraction.
//!
//! Only the shape of an address is checked, never its deliverability.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

/// Pattern for one email-shaped token inside free text.
pub const MENTION_PATTERN: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";

lazy_static! {
    static ref MENTION_RE: Regex = Regex::new(MENTION_PATTERN).expect("static mention pattern");
    static ref EMAIL_RE: Regex =
        Regex::new(&format!("^{MENTION_PATTERN}$")).expect("static email pattern");
}

/// All email-shaped tokens in `text`, in order of appearance, duplicates kept.
pub fn extract_mentions(text: &str) -> Vec<String> {
    MENTION_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Mentioned addresses with duplicates removed, first occurrence wins.
pub fn distinct_mentions(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    extract_mentions(text)
        .into_iter()
        .filter(|email| seen.insert(email.clone()))
        .collect()
}

/// True when the whole of `candidate` is a single email-shaped token.
pub fn is_email_shaped(candidate: &str) -> bool {
    EMAIL_RE.is_match(candidate)
}
