use crate::config::{DISALLOWED_KEYWORDS, MAX_QUERY_LENGTH};
use once_cell::sync::Lazy;
use regex::Regex;

// `;` followed by more statement text. A bare trailing `;` is fine.
static CHAINED_STATEMENTS: Lazy<Regex> = Lazy::new(|| Regex::new(r";\s*\w").unwrap());

/// Gate for user-submitted SQL: accepts only a single read-only SELECT.
///
/// The denylist is a raw substring scan over the lowercased query, so it
/// over-rejects (a column literally named `update_count` fails the gate).
/// Callers rely on that behavior; do not swap in a tokenizer. This must be
/// re-run on every query-accepting operation — never trust a string that was
/// validated earlier in the request's life.
pub fn validate_query(query: &str) -> bool {
    if query.chars().count() > MAX_QUERY_LENGTH {
        return false;
    }

    let lowered = query.to_lowercase();
    if !lowered.trim().starts_with("select") {
        return false;
    }

    if DISALLOWED_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return false;
    }

    !CHAINED_STATEMENTS.is_match(&lowered)
}
