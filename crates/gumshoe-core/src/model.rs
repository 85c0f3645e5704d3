use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// One column of a puzzle table, name plus declared SQLite type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub decl_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSchema {
    pub table_name: String,
    pub columns: Vec<ColumnInfo>,
}

/// Case summary as exposed to players: the single metadata row of the case
/// file plus its derived schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseInfo {
    pub case_id: String,
    pub title: String,
    pub description: String,
    pub starting_clue: String,
    pub difficulty: String,
    pub required_concept: String,
    pub schema_info: Vec<TableSchema>,
}

/// Player-visible clue. The stored validation criteria never leave the
/// server; see [`ClueCriteria`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clue {
    pub clue_index: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Stored answer for a clue. At most one of the two fields is authoritative:
/// a non-empty `expected_result` (JSON rows, parsed on read) wins over
/// `expected_query`; with neither set the clue cannot be machine-checked.
#[derive(Debug, Clone)]
pub struct ClueCriteria {
    pub expected_query: Option<String>,
    pub expected_result: Option<String>,
}

/// Request body for the query-accepting endpoints. Ephemeral, never stored.
#[derive(Debug, Clone, Deserialize)]
pub struct QuerySubmission {
    pub query: String,
    pub case_id: String,
}

/// Successful execution: rows exactly as the engine returned them, column
/// names (empty when the statement produced no result set), and wall-clock
/// elapsed time.
#[derive(Debug, Clone)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub elapsed: Duration,
}

/// Outcome of running one validated query. Engine errors and the advisory
/// time limit both surface as `Failed`, never as a transport error.
#[derive(Debug, Clone)]
pub enum Execution {
    Completed(ResultSet),
    Failed { error: String },
}
