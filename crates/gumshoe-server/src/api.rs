use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use gumshoe_core::clues::{self, ClueOutcome};
use gumshoe_core::errors::CaseError;
use gumshoe_core::executor;
use gumshoe_core::model::{Execution, QuerySubmission};
use gumshoe_core::storage::CaseStore;
use gumshoe_core::validate::validate_query;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CaseStore>,
    pub time_limit: Duration,
}

pub fn create_router(state: AppState) -> Router {
    // The frontend is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/execute", post(execute))
        .route("/cases", get(list_cases))
        .route("/case/{case_id}", get(case_info))
        .route("/case/{case_id}/clues", get(case_clues))
        .route("/case/{case_id}/clue/{clue_index}", get(case_clue))
        .route("/case/{case_id}/clue/{clue_index}/hint", get(clue_hint))
        .route(
            "/case/{case_id}/clue/{clue_index}/validate",
            post(validate_clue),
        )
        .with_state(state)
        .layer(cors)
}

pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<CaseError> for ApiError {
    fn from(e: CaseError) -> Self {
        let status = match &e {
            CaseError::QueryRejected => StatusCode::BAD_REQUEST,
            CaseError::CaseNotFound { .. }
            | CaseError::MetadataMissing { .. }
            | CaseError::ClueNotFound { .. } => StatusCode::NOT_FOUND,
            CaseError::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %e, "unexpected engine error outside a user query");
        }
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        tracing::error!(error = %e, "internal error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn execute(
    State(state): State<AppState>,
    Json(submission): Json<QuerySubmission>,
) -> Result<Json<Value>, ApiError> {
    if !validate_query(&submission.query) {
        return Err(CaseError::QueryRejected.into());
    }
    let db = state.store.open(&submission.case_id)?;

    let body = match executor::execute(db.conn(), &submission.query, state.time_limit) {
        Execution::Completed(rs) => {
            tracing::debug!(
                case_id = db.case_id(),
                rows = rs.rows.len(),
                elapsed_ms = rs.elapsed.as_millis() as u64,
                "query completed"
            );
            json!({
                "success": true,
                "results": rs.rows,
                "columns": rs.columns,
                "execution_time": rs.elapsed.as_secs_f64(),
            })
        }
        Execution::Failed { error } => json!({ "success": false, "error": error }),
    };
    Ok(Json(body))
}

async fn list_cases(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let cases = state.store.list_cases()?;
    Ok(Json(json!({ "cases": cases })))
}

async fn case_info(
    State(state): State<AppState>,
    Path(case_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let db = state.store.open(&case_id)?;
    let info = db.info()?.ok_or(CaseError::MetadataMissing { case_id })?;
    Ok(Json(json!({ "case": info })))
}

async fn case_clues(
    State(state): State<AppState>,
    Path(case_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let db = state.store.open(&case_id)?;
    let clues = db.clues()?;
    Ok(Json(json!({ "clues": clues })))
}

async fn case_clue(
    State(state): State<AppState>,
    Path((case_id, clue_index)): Path<(String, i64)>,
) -> Result<Json<Value>, ApiError> {
    let db = state.store.open(&case_id)?;
    let clue = db.clue(clue_index)?;
    Ok(Json(json!({ "clue": clue })))
}

async fn clue_hint(
    State(state): State<AppState>,
    Path((case_id, clue_index)): Path<(String, i64)>,
) -> Result<Json<Value>, ApiError> {
    let db = state.store.open(&case_id)?;
    let clue = db.clue(clue_index)?;
    Ok(Json(json!({ "hint": clue.hint })))
}

async fn validate_clue(
    State(state): State<AppState>,
    Path((case_id, clue_index)): Path<(String, i64)>,
    Json(submission): Json<QuerySubmission>,
) -> Result<Json<Value>, ApiError> {
    // Same gate as /execute; never trust a previously-validated string.
    if !validate_query(&submission.query) {
        return Err(CaseError::QueryRejected.into());
    }
    let db = state.store.open(&case_id)?;
    let outcome = clues::check_clue(&db, clue_index, &submission.query)?;

    let body = match &outcome {
        ClueOutcome::Failed { error } => json!({ "success": false, "error": error }),
        _ => json!({ "success": outcome.success(), "message": outcome.message() }),
    };
    Ok(Json(body))
}
