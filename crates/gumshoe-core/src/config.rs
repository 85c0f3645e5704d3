use std::time::Duration;

/// Longest query, in characters, the validator will accept.
pub const MAX_QUERY_LENGTH: usize = 1000;

/// Advisory wall-clock budget for a single query. Checked only after the
/// query has completed; there is no cancellation or pre-emption.
pub const MAX_EXECUTION_TIME: Duration = Duration::from_secs(2);

/// Keywords rejected as raw substrings anywhere in a lowercased query.
/// Intentionally a substring scan, not a tokenizer: identifiers that happen
/// to contain one of these (e.g. a column named `update_count`) are rejected
/// as well.
pub const DISALLOWED_KEYWORDS: [&str; 10] = [
    "insert",
    "update",
    "delete",
    "drop",
    "alter",
    "create",
    "attach",
    "detach",
    "pragma",
    "transaction",
];
