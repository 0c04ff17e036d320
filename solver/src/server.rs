//! Axum HTTP server: stateless endpoints for an upload front end.
//!
//! Clients post the two-column ticket rows as JSON; every request normalizes
//! its own ticket set, so no state is shared between handlers.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/preview` | Ticket counts, skipped rows and the first rows |
//! | POST | `/lowest_payouts` | Full search: the 10 lowest-payout combinations |

use axum::{http::StatusCode, routing::get, routing::post, Json, Router};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};

use crate::constants::DEFAULT_PREVIEW_ROWS;
use crate::report::{preview, to_records};
use crate::search::{run_search, LogProgress, SearchMode};
use crate::tickets::{normalize_rows, RawRow};

pub fn create_router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health_check))
        .route("/preview", post(handle_preview))
        .route("/lowest_payouts", post(handle_lowest_payouts))
        .layer(cors)
}

// ── Request types ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct PreviewRequest {
    rows: Vec<RawRow>,
    #[serde(default)]
    limit: Option<usize>,
}

#[derive(Deserialize)]
struct SearchRequest {
    rows: Vec<RawRow>,
    #[serde(default)]
    parallel: bool,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn error_response(status: StatusCode, msg: &str) -> ApiError {
    (status, Json(serde_json::json!({ "error": msg })))
}

// ── Handlers ────────────────────────────────────────────────────────

async fn handle_health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "OK" }))
}

async fn handle_preview(Json(req): Json<PreviewRequest>) -> Json<serde_json::Value> {
    let normalized = normalize_rows(&req.rows);
    let p = preview(
        &req.rows,
        &normalized,
        req.limit.unwrap_or(DEFAULT_PREVIEW_ROWS),
    );
    Json(serde_json::json!(p))
}

async fn handle_lowest_payouts(
    Json(req): Json<SearchRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let normalized = normalize_rows(&req.rows);
    let mode = if req.parallel {
        SearchMode::Parallel
    } else {
        SearchMode::Sequential
    };
    let tickets = normalized.tickets.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        run_search(&tickets, mode, &mut LogProgress::default())
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "search task failed");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, "search task failed")
    })?;

    Ok(Json(serde_json::json!({
        "total_tickets": normalized.tickets.len(),
        "unrecognized": normalized.unrecognized_count(),
        "dropped_missing": normalized.dropped_missing,
        "skipped": normalized.skipped,
        "elapsed_ms": outcome.elapsed.as_millis() as u64,
        "results": to_records(&outcome.results),
    })))
}
