use crate::errors::CaseError;
use crate::executor;
use crate::storage::CaseDb;
use serde_json::Value;

pub const MSG_CORRECT: &str = "Correct! Clue unlocked.";
pub const MSG_WRONG_RESULT: &str = "Incorrect result. Try again.";
pub const MSG_WRONG_QUERY: &str = "Incorrect query. Try again.";
pub const MSG_NO_CRITERIA: &str = "No validation criteria set for this clue.";

/// Outcome of checking a player's query against a clue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClueOutcome {
    Correct,
    IncorrectResult,
    IncorrectQuery,
    /// Neither an expected query nor an expected result is stored; the clue
    /// cannot be machine-checked. Callers must treat this as unresolvable,
    /// not as a wrong answer.
    NoCriteria,
    /// The engine rejected the query, or the stored expected result is
    /// malformed. Reported in-band, mirroring the executor.
    Failed { error: String },
}

impl ClueOutcome {
    pub fn success(&self) -> bool {
        matches!(self, ClueOutcome::Correct)
    }

    pub fn message(&self) -> &str {
        match self {
            ClueOutcome::Correct => MSG_CORRECT,
            ClueOutcome::IncorrectResult => MSG_WRONG_RESULT,
            ClueOutcome::IncorrectQuery => MSG_WRONG_QUERY,
            ClueOutcome::NoCriteria => MSG_NO_CRITERIA,
            ClueOutcome::Failed { error } => error,
        }
    }
}

/// Checks a player's query against the clue's stored criteria.
///
/// The caller must have run the query through `validate::validate_query`
/// already; this function executes whatever it is handed, directly against
/// the engine and without a time limit. A non-empty expected result takes
/// precedence over an expected query; with neither the clue is unresolvable.
pub fn check_clue(db: &CaseDb, clue_index: i64, query: &str) -> Result<ClueOutcome, CaseError> {
    let criteria = db.clue_criteria(clue_index)?;

    let user_rows = match executor::run_query(db.conn(), query) {
        Ok((_, rows)) => rows,
        Err(e) => {
            return Ok(ClueOutcome::Failed {
                error: e.to_string(),
            })
        }
    };

    if let Some(stored) = criteria
        .expected_result
        .as_deref()
        .filter(|s| !s.trim().is_empty())
    {
        // Explicit deserialization step: the column holds JSON rows as text.
        let expected: Vec<Vec<Value>> = match serde_json::from_str(stored) {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(
                    case_id = db.case_id(),
                    clue_index,
                    error = %e,
                    "stored expected_result is not valid JSON"
                );
                return Ok(ClueOutcome::Failed {
                    error: format!("stored expected result is malformed: {e}"),
                });
            }
        };
        return Ok(if user_rows == expected {
            ClueOutcome::Correct
        } else {
            ClueOutcome::IncorrectResult
        });
    }

    if let Some(expected_query) = criteria
        .expected_query
        .as_deref()
        .filter(|s| !s.trim().is_empty())
    {
        let matches = query.trim().to_lowercase() == expected_query.trim().to_lowercase();
        return Ok(if matches {
            ClueOutcome::Correct
        } else {
            ClueOutcome::IncorrectQuery
        });
    }

    Ok(ClueOutcome::NoCriteria)
}
