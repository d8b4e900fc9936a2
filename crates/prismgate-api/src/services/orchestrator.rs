//! Upload orchestration
//!
//! Drives one batch end to end: sort → per-file upload under one batch token
//! → finalize → correlate records → resolve album and share link → store the
//! result behind a fresh token. Each step's output feeds the next, so the run
//! is sequential; independent requests run concurrently.

use std::sync::Arc;

use prismgate_core::models::{BatchFile, SortOrder, UploadResult};
use prismgate_core::{token, urls, AppError};

use crate::error::upstream_error;
use crate::services::albums::resolve_album;
use crate::services::correlation::CorrelationRun;
use crate::state::AppState;

pub struct UploadOrchestrator {
    state: Arc<AppState>,
}

impl UploadOrchestrator {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Run one orchestration and return the result token.
    ///
    /// The batch is validated before this is called; nothing here touches the
    /// network until the sort directive and correlation plan have been built.
    pub async fn run(
        &self,
        mut files: Vec<BatchFile>,
        sort: SortOrder,
        album: Option<String>,
    ) -> Result<String, AppError> {
        sort.apply(&mut files);

        let run = self.state.strategy.begin(&files)?;
        let batch_token = token::batch_token();

        tracing::info!(
            batch_token = %batch_token,
            file_count = files.len(),
            strategy = self.state.strategy.name(),
            album = ?album,
            "Starting upload batch"
        );

        let session = &self.state.session;
        let client = &self.state.client;

        for file in &files {
            client
                .upload_file(
                    &session.account_id,
                    &batch_token,
                    &file.name,
                    file.data.clone(),
                )
                .await
                .map_err(upstream_error)?;
            tracing::debug!(batch_token = %batch_token, filename = %file.name, "File acknowledged");
        }

        let mut finalize_albums: Vec<String> = run.finalize_albums().to_vec();
        if let Some(name) = &album {
            finalize_albums.push(name.clone());
        }
        client
            .finalize_batch(&session.account_id, &batch_token, &finalize_albums)
            .await
            .map_err(upstream_error)?;

        // The staging album (if any) exists from here on; it must be deleted
        // on every exit path below, including correlation or album failures.
        let outcome = self
            .correlate_and_resolve(run.as_ref(), &files, album.as_deref())
            .await;

        if run.needs_cleanup() {
            if let Err(cleanup_err) = run.cleanup(client).await {
                tracing::error!(
                    error = %cleanup_err,
                    staging_album = ?run.finalize_albums().first(),
                    batch_token = %batch_token,
                    "Failed to delete staging album, manual reconciliation required"
                );
            }
        }

        let result = outcome?;
        let result_token = token::result_token();
        self.state.results.put(result_token.clone(), result).await;

        tracing::info!(
            batch_token = %batch_token,
            result_token = %result_token,
            "Upload batch complete"
        );
        Ok(result_token)
    }

    async fn correlate_and_resolve(
        &self,
        run: &dyn CorrelationRun,
        files: &[BatchFile],
        album: Option<&str>,
    ) -> Result<UploadResult, AppError> {
        let records = run.resolve(&self.state.client, files).await?;
        if records.len() != files.len() {
            return Err(AppError::UpstreamContract(format!(
                "correlation produced {} records for {} uploaded files",
                records.len(),
                files.len()
            )));
        }

        let config = &self.state.config;
        let base_url = self.state.client.base_url();
        let photo_urls = records
            .iter()
            .map(|record| {
                urls::viewer_url(
                    base_url,
                    &record.hash,
                    &self.state.session.preview_token,
                    config.preview_size(),
                )
            })
            .collect();

        let album_url = match album {
            Some(name) => Some(
                resolve_album(&self.state.client, name, config.create_link_if_absent())
                    .await?
                    .url,
            ),
            None => None,
        };

        Ok(UploadResult {
            photo_urls,
            album_url,
        })
    }
}
