use crate::model::{Execution, ResultSet};
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Runs an already-validated query against an open case connection.
///
/// The time limit is advisory: the query always runs to completion and the
/// elapsed time is checked afterwards. A slow query still consumes its full
/// cost before being reported as failed.
pub fn execute(conn: &Connection, query: &str, time_limit: Duration) -> Execution {
    let started = Instant::now();
    match run_query(conn, query) {
        Ok((columns, rows)) => {
            let elapsed = started.elapsed();
            if elapsed > time_limit {
                tracing::warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    limit_ms = time_limit.as_millis() as u64,
                    "query exceeded time limit"
                );
                return Execution::Failed {
                    error: "Query took too long to execute".to_string(),
                };
            }
            Execution::Completed(ResultSet {
                columns,
                rows,
                elapsed,
            })
        }
        Err(e) => Execution::Failed {
            error: e.to_string(),
        },
    }
}

/// Prepares and fully drains a query, returning column names and rows as
/// JSON scalars. Engine errors propagate; `execute` and the clue checker
/// decide how to surface them.
pub fn run_query(
    conn: &Connection,
    query: &str,
) -> rusqlite::Result<(Vec<String>, Vec<Vec<Value>>)> {
    let mut stmt = conn.prepare(query)?;
    let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
    let column_count = stmt.column_count();

    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(column_count);
        for i in 0..column_count {
            values.push(json_value(row.get_ref(i)?));
        }
        out.push(values);
    }
    Ok((columns, out))
}

fn json_value(v: ValueRef<'_>) -> Value {
    match v {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        // NaN/Infinity have no JSON representation
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::String(hex::encode(b)),
    }
}
