use crate::errors::CaseError;
use crate::model::{CaseInfo, Clue, ClueCriteria, ColumnInfo, TableSchema};
use anyhow::Context;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use std::path::{Path, PathBuf};

/// File extension of the per-case SQLite files under the cases directory.
pub const CASE_FILE_EXT: &str = "db";

/// Resolves case ids to per-case SQLite files under a fixed directory.
/// Holds no connections itself; every request opens its own [`CaseDb`].
pub struct CaseStore {
    cases_dir: PathBuf,
}

impl CaseStore {
    pub fn new(cases_dir: impl Into<PathBuf>) -> Self {
        Self {
            cases_dir: cases_dir.into(),
        }
    }

    pub fn cases_dir(&self) -> &Path {
        &self.cases_dir
    }

    /// Maps a case id to its on-disk file. Ids that could escape the cases
    /// directory never resolve; they report the same NotFound as a missing
    /// file.
    fn case_path(&self, case_id: &str) -> Result<PathBuf, CaseError> {
        if case_id.is_empty() || case_id.contains(['/', '\\']) || case_id.contains("..") {
            return Err(CaseError::CaseNotFound {
                case_id: case_id.to_string(),
            });
        }
        let path = self.cases_dir.join(format!("{case_id}.{CASE_FILE_EXT}"));
        if !path.exists() {
            return Err(CaseError::CaseNotFound {
                case_id: case_id.to_string(),
            });
        }
        Ok(path)
    }

    /// Opens a read-only handle for one request. Dropping the returned
    /// `CaseDb` releases the connection, on every exit path.
    pub fn open(&self, case_id: &str) -> Result<CaseDb, CaseError> {
        let path = self.case_path(case_id)?;
        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(CaseDb {
            case_id: case_id.to_string(),
            conn,
        })
    }

    /// Enumerates every case file in the directory. A file whose metadata
    /// row is missing or unreadable is skipped with a warning; it never
    /// fails the whole listing.
    pub fn list_cases(&self) -> anyhow::Result<Vec<CaseInfo>> {
        let entries = std::fs::read_dir(&self.cases_dir).with_context(|| {
            format!(
                "failed to read cases directory {}",
                self.cases_dir.display()
            )
        })?;

        let mut cases = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(CASE_FILE_EXT) {
                continue;
            }
            let Some(case_id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let db = match self.open(case_id) {
                Ok(db) => db,
                Err(e) => {
                    tracing::warn!(case_id, error = %e, "skipping unreadable case file");
                    continue;
                }
            };
            match db.info() {
                Ok(Some(info)) => cases.push(info),
                Ok(None) => {
                    tracing::warn!(case_id, "case file has no metadata row; skipping");
                }
                Err(e) => {
                    tracing::warn!(case_id, error = %e, "failed to read case metadata; skipping");
                }
            }
        }

        // read_dir order is platform-dependent
        cases.sort_by(|a, b| a.case_id.cmp(&b.case_id));
        Ok(cases)
    }
}

/// One request's read-only connection to a single case file.
pub struct CaseDb {
    case_id: String,
    conn: Connection,
}

impl CaseDb {
    pub fn case_id(&self) -> &str {
        &self.case_id
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Reads the single `case_metadata` row plus the derived schema.
    /// `None` when the metadata table or row is absent.
    pub fn info(&self) -> Result<Option<CaseInfo>, CaseError> {
        let has_metadata: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='case_metadata'",
            [],
            |r| r.get(0),
        )?;
        if has_metadata == 0 {
            return Ok(None);
        }

        let row = self
            .conn
            .query_row(
                "SELECT title, description, starting_clue, difficulty, required_concept
                 FROM case_metadata",
                [],
                |r| {
                    Ok((
                        r.get::<_, String>(0)?,
                        r.get::<_, String>(1)?,
                        r.get::<_, String>(2)?,
                        r.get::<_, String>(3)?,
                        r.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        let Some((title, description, starting_clue, difficulty, required_concept)) = row else {
            return Ok(None);
        };

        Ok(Some(CaseInfo {
            case_id: self.case_id.clone(),
            title,
            description,
            starting_clue,
            difficulty,
            required_concept,
            schema_info: self.schema()?,
        }))
    }

    /// Table names from `sqlite_master` (minus the internal
    /// `sqlite_sequence`) with per-table column name/declared-type pairs.
    pub fn schema(&self) -> Result<Vec<TableSchema>, CaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")?;
        let names = stmt
            .query_map([], |r| r.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut schema = Vec::new();
        for table_name in names {
            if table_name == "sqlite_sequence" {
                continue;
            }
            let mut cols = self
                .conn
                .prepare(&format!("PRAGMA table_info({table_name})"))?;
            let columns = cols
                .query_map([], |r| {
                    Ok(ColumnInfo {
                        name: r.get(1)?,
                        decl_type: r.get(2)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            schema.push(TableSchema {
                table_name,
                columns,
            });
        }
        Ok(schema)
    }

    /// All clues for the case, ascending by index.
    pub fn clues(&self) -> Result<Vec<Clue>, CaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT clue_index, text, hint FROM clues ORDER BY clue_index ASC")?;
        let clues = stmt
            .query_map([], |r| {
                Ok(Clue {
                    clue_index: r.get(0)?,
                    text: r.get(1)?,
                    hint: r.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(clues)
    }

    pub fn clue(&self, clue_index: i64) -> Result<Clue, CaseError> {
        self.conn
            .query_row(
                "SELECT clue_index, text, hint FROM clues WHERE clue_index = ?1",
                params![clue_index],
                |r| {
                    Ok(Clue {
                        clue_index: r.get(0)?,
                        text: r.get(1)?,
                        hint: r.get(2)?,
                    })
                },
            )
            .optional()?
            .ok_or(CaseError::ClueNotFound { clue_index })
    }

    /// The stored validation criteria for a clue; never exposed to players.
    pub fn clue_criteria(&self, clue_index: i64) -> Result<ClueCriteria, CaseError> {
        self.conn
            .query_row(
                "SELECT expected_query, expected_result FROM clues WHERE clue_index = ?1",
                params![clue_index],
                |r| {
                    Ok(ClueCriteria {
                        expected_query: r.get(0)?,
                        expected_result: r.get(1)?,
                    })
                },
            )
            .optional()?
            .ok_or(CaseError::ClueNotFound { clue_index })
    }
}
