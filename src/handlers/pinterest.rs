use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    ingest::{self, samples, IngestOutcome},
    models::{FallbackResponse, SearchResponse},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct PinSearchParams {
    pub query: Option<String>,
    /// Kept as text so a malformed value falls back to the default page size.
    pub limit: Option<String>,
}

/// GET /api/pinterest/search?query=<q>&limit=<n>
///
/// Live results are upserted and returned with `success: true`. If Pinterest
/// is unreachable or not configured the response is still 200, with
/// `success: false` and sample pins.
pub async fn search_pins(
    State(state): State<AppState>,
    Query(params): Query<PinSearchParams>,
) -> AppResult<Response> {
    let query = params
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::Validation("Query parameter is required".into()))?;

    let limit = ingest::parse_limit(params.limit.as_deref());

    let response = match ingest::ingest(state.pins.as_ref(), state.store.clone(), query, limit)
        .await
    {
        IngestOutcome::Ingested { count, pins } => Json(SearchResponse {
            success: true,
            count,
            images: pins,
        })
        .into_response(),
        IngestOutcome::Fallback { reason } => Json(FallbackResponse {
            success: false,
            message: samples::fallback_message(&reason).to_string(),
            images: samples::sample_pins(Utc::now()),
        })
        .into_response(),
    };

    Ok(response)
}
