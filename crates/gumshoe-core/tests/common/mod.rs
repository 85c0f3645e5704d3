#![allow(dead_code)]

use rusqlite::{params, Connection};
use std::path::Path;

/// Writes a small but complete case file: metadata row, puzzle tables and
/// clues covering every kind of validation criteria.
pub fn write_case(path: &Path) -> anyhow::Result<()> {
    let conn = Connection::open(path)?;
    conn.execute_batch(
        "CREATE TABLE case_metadata (
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            starting_clue TEXT NOT NULL,
            difficulty TEXT NOT NULL,
            required_concept TEXT NOT NULL
        );
        CREATE TABLE clues (
            clue_index INTEGER PRIMARY KEY,
            text TEXT NOT NULL,
            hint TEXT,
            expected_query TEXT,
            expected_result TEXT
        );
        CREATE TABLE suspects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            alibi TEXT
        );",
    )?;
    conn.execute(
        "INSERT INTO case_metadata VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            "The Vanishing Ledger",
            "Someone cooked the books at Blackwood & Sons.",
            "Start with the suspects table.",
            "easy",
            "SELECT basics"
        ],
    )?;
    conn.execute(
        "INSERT INTO suspects (name, alibi) VALUES ('Ada', 'at the opera'), ('Basil', NULL)",
        [],
    )?;
    conn.execute(
        "INSERT INTO clues (clue_index, text, hint, expected_query, expected_result) VALUES
            (1, 'How many suspects are there?', 'COUNT is your friend.', NULL, '[[2]]'),
            (2, 'Name everyone on the list.', NULL, 'SELECT name FROM suspects', NULL),
            (3, 'A dead end.', NULL, NULL, NULL),
            (4, 'The smudged page.', NULL, NULL, 'not-json')",
        [],
    )?;
    Ok(())
}

/// Writes a case file that has puzzle tables but no metadata row; listings
/// must skip it silently.
pub fn write_case_without_metadata(path: &Path) -> anyhow::Result<()> {
    let conn = Connection::open(path)?;
    conn.execute_batch(
        "CREATE TABLE case_metadata (
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            starting_clue TEXT NOT NULL,
            difficulty TEXT NOT NULL,
            required_concept TEXT NOT NULL
        );
        CREATE TABLE witnesses (id INTEGER PRIMARY KEY, name TEXT);",
    )?;
    Ok(())
}
