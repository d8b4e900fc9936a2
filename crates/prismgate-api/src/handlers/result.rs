//! Result retrieval handler
//!
//! The render step after the submit redirect fetches the stored result here.
//! The page may be refreshed or re-posted, so retrieval is idempotent for the
//! entry's lifetime and served identically for GET, HEAD, and POST.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use prismgate_core::models::UploadResult;
use prismgate_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Retrieve the result of a submitted batch
#[utoipa::path(
    get,
    path = "/api/v0/results/{token}",
    tag = "uploads",
    params(
        ("token" = String, Path, description = "Result token returned by the submit endpoint")
    ),
    responses(
        (status = 200, description = "Stored orchestration result", body = UploadResult),
        (status = 404, description = "Unknown or expired result token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_result"))]
pub async fn get_result(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let result = state
        .results
        .get(&token)
        .await
        .ok_or_else(|| AppError::NotFound("Unknown or expired result token".to_string()))?;

    Ok(Json(result))
}
