mod common;

use gumshoe_core::clues::{self, ClueOutcome};
use gumshoe_core::errors::CaseError;
use gumshoe_core::storage::{CaseDb, CaseStore};
use tempfile::tempdir;

fn open_case(dir: &std::path::Path) -> CaseDb {
    common::write_case(&dir.join("ledger.db")).unwrap();
    CaseStore::new(dir).open("ledger").unwrap()
}

// Clue 1 stores expected_result '[[2]]'; clue 2 stores
// expected_query 'SELECT name FROM suspects'; clue 3 stores neither;
// clue 4 stores malformed JSON.

#[test]
fn expected_result_exact_match() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let db = open_case(dir.path());

    let outcome = clues::check_clue(&db, 1, "select count(*) from suspects")?;
    assert_eq!(outcome, ClueOutcome::Correct);
    assert!(outcome.success());
    assert_eq!(outcome.message(), clues::MSG_CORRECT);
    Ok(())
}

#[test]
fn expected_result_rejects_wrong_value_and_wrong_shape() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let db = open_case(dir.path());

    // wrong value: [[1]] vs [[2]]
    assert_eq!(
        clues::check_clue(&db, 1, "select 1")?,
        ClueOutcome::IncorrectResult
    );
    // wrong shape: [[2, 1]] vs [[2]]
    assert_eq!(
        clues::check_clue(&db, 1, "select count(*), 1 from suspects")?,
        ClueOutcome::IncorrectResult
    );
    Ok(())
}

#[test]
fn expected_query_ignores_case_and_outer_whitespace() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let db = open_case(dir.path());

    assert_eq!(
        clues::check_clue(&db, 2, "select NAME from SUSPECTS")?,
        ClueOutcome::Correct
    );
    assert_eq!(
        clues::check_clue(&db, 2, "  SELECT name FROM suspects  ")?,
        ClueOutcome::Correct
    );
    assert_eq!(
        clues::check_clue(&db, 2, "select alibi from suspects")?,
        ClueOutcome::IncorrectQuery
    );
    Ok(())
}

#[test]
fn missing_criteria_is_unresolvable_not_wrong() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let db = open_case(dir.path());

    let outcome = clues::check_clue(&db, 3, "select 1")?;
    assert_eq!(outcome, ClueOutcome::NoCriteria);
    assert!(!outcome.success());
    assert_ne!(outcome.message(), clues::MSG_WRONG_RESULT);
    assert_ne!(outcome.message(), clues::MSG_WRONG_QUERY);
    Ok(())
}

#[test]
fn malformed_stored_result_is_a_structured_failure() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let db = open_case(dir.path());

    match clues::check_clue(&db, 4, "select 1")? {
        ClueOutcome::Failed { error } => {
            assert!(error.contains("malformed"), "got: {error}")
        }
        other => panic!("expected a structured failure, got {other:?}"),
    }
    Ok(())
}

#[test]
fn engine_errors_during_check_are_in_band() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let db = open_case(dir.path());

    match clues::check_clue(&db, 1, "select * from no_such_table")? {
        ClueOutcome::Failed { error } => {
            assert!(error.contains("no such table"), "got: {error}")
        }
        other => panic!("expected a structured failure, got {other:?}"),
    }
    Ok(())
}

#[test]
fn unknown_clue_index_is_not_found() {
    let dir = tempdir().unwrap();
    let db = open_case(dir.path());

    assert!(matches!(
        clues::check_clue(&db, 99, "select 1"),
        Err(CaseError::ClueNotFound { clue_index: 99 })
    ));
}
