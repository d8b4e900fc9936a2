//! Batch submit handler
//!
//! Accepts a multipart form with repeated `files` parts plus optional `sort`
//! and `album` fields. All validation runs before the first upstream call;
//! an invalid batch produces no network traffic and no stored state.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use prismgate_core::models::{BatchFile, SortOrder, UploadAccepted};
use prismgate_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::orchestrator::UploadOrchestrator;
use crate::state::AppState;
use crate::validation::{sanitize_filename, validate_batch};

#[derive(Debug, Default)]
struct SubmitForm {
    files: Vec<BatchFile>,
    sort: Option<String>,
    album: Option<String>,
}

/// Read the submit form fields. Unknown fields are skipped.
async fn read_submit_form(mut multipart: Multipart) -> Result<SubmitForm, AppError> {
    let mut form = SubmitForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "files" => {
                let filename = field.file_name().map(|s| s.to_string()).unwrap_or_default();
                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read file data: {}", e))
                })?;
                form.files.push(BatchFile::new(filename, data));
            }
            "sort" => {
                form.sort = Some(field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read sort field: {}", e))
                })?);
            }
            "album" => {
                form.album = Some(field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read album field: {}", e))
                })?);
            }
            other => {
                tracing::debug!(field = %other, "Skipping unknown multipart field");
            }
        }
    }

    Ok(form)
}

/// Submit a batch of image files
///
/// Uploads the batch to the photo service, correlates the created records,
/// resolves the album share link when an album is given, and answers with a
/// result token for the follow-up retrieve request.
#[utoipa::path(
    post,
    path = "/api/v0/uploads",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Batch accepted and orchestrated", body = UploadAccepted),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 413, description = "Payload too large", body = ErrorResponse),
        (status = 502, description = "Photo service failure", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "submit_batch"))]
pub async fn submit_batch(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = read_submit_form(multipart).await?;

    // Reject bad input before anything leaves the process.
    let sort = form
        .sort
        .as_deref()
        .unwrap_or("none")
        .parse::<SortOrder>()?;
    validate_batch(&form.files, state.config.upload_max_bytes())?;

    let files = form
        .files
        .into_iter()
        .map(|f| Ok(BatchFile::new(sanitize_filename(&f.name)?, f.data)))
        .collect::<Result<Vec<_>, AppError>>()?;

    let album = form
        .album
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty());

    let orchestrator = UploadOrchestrator::new(&state);
    let result_token = orchestrator.run(files, sort, album).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadAccepted { result_token }),
    ))
}
