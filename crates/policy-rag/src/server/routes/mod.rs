//! API routes for the question-answering server

pub mod run;

use axum::{
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/run", post(run::run_pipeline))
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "policy-rag",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Retrieval-augmented question answering over a single policy document",
        "endpoints": {
            "POST /api/run": "Answer questions about a document locator",
            "GET /api/info": "This document"
        },
        "formats": ["pdf", "docx", "txt", "eml"]
    }))
}
