//! Validation utilities for the upload handler
//!
//! All checks here run before any upstream call is made; a batch that fails
//! validation produces no network traffic and no stored state.

use prismgate_core::models::BatchFile;
use prismgate_core::AppError;

/// Validate a submitted batch: non-empty, every file named, total size within
/// the configured ceiling.
pub fn validate_batch(files: &[BatchFile], max_total_bytes: usize) -> Result<(), AppError> {
    if files.is_empty() {
        return Err(AppError::InvalidInput(
            "No files provided; send at least one 'files' part".to_string(),
        ));
    }

    for file in files {
        if file.name.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Every uploaded file must carry a non-empty filename".to_string(),
            ));
        }
    }

    let total: usize = files.iter().map(|f| f.data.len()).sum();
    if total > max_total_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "Total upload size exceeds maximum allowed size of {} MB",
            max_total_bytes / 1024 / 1024
        )));
    }

    Ok(())
}

/// Sanitize a filename to its final path component, bounded length, safe
/// characters only. The name travels to the photo service and into logs.
pub fn sanitize_filename(filename: &str) -> Result<String, AppError> {
    const MAX_FILENAME_LENGTH: usize = 255;

    let path = std::path::Path::new(filename);
    let filename_only = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);

    if filename_only.contains("..") {
        return Err(AppError::InvalidInput(
            "Filename contains invalid path traversal".to_string(),
        ));
    }

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Filename must contain at least one valid character".to_string(),
        ));
    }

    Ok(sanitized)
}
