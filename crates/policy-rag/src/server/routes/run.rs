//! Pipeline run endpoint

use axum::{extract::State, Json};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{RunRequest, RunResponse};

/// POST /api/run - answer questions about a single document.
///
/// The body carries a document locator and a list of questions; the
/// response carries one answer per question, in the same order. Any stage
/// failure aborts the whole run and surfaces as a single error.
pub async fn run_pipeline(
    State(state): State<AppState>,
    Json(request): Json<RunRequest>,
) -> Result<Json<RunResponse>> {
    if request.documents.trim().is_empty() {
        return Err(Error::InvalidRequest(
            "missing 'documents' locator".to_string(),
        ));
    }
    if request.questions.is_empty() {
        return Err(Error::InvalidRequest(
            "missing 'questions' list".to_string(),
        ));
    }

    let start = Instant::now();
    tracing::info!(
        "pipeline run: {} questions against {}",
        request.questions.len(),
        request.documents
    );

    let answers = state
        .pipeline()
        .run(&request.documents, request.questions)
        .await?;

    tracing::info!(
        "pipeline completed in {}ms with {} answers",
        start.elapsed().as_millis(),
        answers.len()
    );

    Ok(Json(RunResponse { answers }))
}
