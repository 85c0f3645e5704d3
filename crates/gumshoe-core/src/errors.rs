use thiserror::Error;

/// Failure taxonomy for the case pipeline. The transport maps `QueryRejected`
/// to 400 and the lookup variants to 404; engine errors raised while running
/// a user query are recovered into `{success: false, error}` bodies at the
/// call site and never reach a handler as `Err`.
#[derive(Debug, Error)]
pub enum CaseError {
    #[error("Invalid or unsafe SQL query")]
    QueryRejected,

    #[error("Case not found")]
    CaseNotFound { case_id: String },

    #[error("Case metadata not found")]
    MetadataMissing { case_id: String },

    #[error("Clue not found")]
    ClueNotFound { clue_index: i64 },

    #[error(transparent)]
    Engine(#[from] rusqlite::Error),
}
