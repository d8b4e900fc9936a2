//! Correlation strategies
//!
//! The photo service accepts uploads without returning created-record
//! identifiers, so the gateway must re-discover which server-side records
//! belong to a just-uploaded batch. Two interchangeable strategies exist:
//!
//! - **Content hash**: digest every file before upload, then query records by
//!   hash and re-project into input order.
//! - **Staging album**: file every upload into a uniquely named ephemeral
//!   album, list that album, then delete it. Deletion is guaranteed on every
//!   exit path once the finalize call has created the album.
//!
//! Both strategies return records in the batch's input order and fail hard on
//! any count mismatch.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use prismgate_client::{Photo, PrismClient};
use prismgate_core::models::{BatchFile, PhotoRecord};
use prismgate_core::{hash, token, AppError};

use crate::error::upstream_error;

/// Strategy selected at configuration time; builds one run per batch.
pub trait CorrelationStrategy: Send + Sync {
    /// Build the per-batch run state. No network calls; validation failures
    /// here abort the request before anything is uploaded.
    fn begin(&self, files: &[BatchFile]) -> Result<Box<dyn CorrelationRun>, AppError>;

    /// Strategy name for logging.
    fn name(&self) -> &'static str;
}

/// Per-batch correlation state.
#[async_trait]
pub trait CorrelationRun: Send + Sync {
    /// Album names the finalize call must include for this batch.
    fn finalize_albums(&self) -> &[String];

    /// Whether `cleanup` must run once the finalize call has completed.
    fn needs_cleanup(&self) -> bool {
        false
    }

    /// Determine the server-assigned records for exactly this batch's files,
    /// in input order. Length always equals `files.len()` on success.
    async fn resolve(
        &self,
        client: &PrismClient,
        files: &[BatchFile],
    ) -> Result<Vec<PhotoRecord>, AppError>;

    /// Tear down ephemeral resources. Safe to call on any exit path after
    /// finalize; an absent staging album is not an error.
    async fn cleanup(&self, _client: &PrismClient) -> Result<(), AppError> {
        Ok(())
    }
}

// ----- Content hash strategy -----

pub struct HashStrategy;

struct HashRun {
    /// Content hashes in input order.
    hashes: Vec<String>,
    no_albums: Vec<String>,
}

impl CorrelationStrategy for HashStrategy {
    fn begin(&self, files: &[BatchFile]) -> Result<Box<dyn CorrelationRun>, AppError> {
        let hashes: Vec<String> = files.iter().map(|f| hash::content_hash(&f.data)).collect();

        // Two identical files would collapse into one server-side record and
        // make the hash->file projection ambiguous.
        let mut seen = HashSet::new();
        for (file, file_hash) in files.iter().zip(&hashes) {
            if !seen.insert(file_hash.as_str()) {
                return Err(AppError::InvalidInput(format!(
                    "Batch contains two files with identical content ('{}'); \
                     duplicate content is not supported in one batch",
                    file.name
                )));
            }
        }

        Ok(Box::new(HashRun {
            hashes,
            no_albums: Vec::new(),
        }))
    }

    fn name(&self) -> &'static str {
        "hash"
    }
}

#[async_trait]
impl CorrelationRun for HashRun {
    fn finalize_albums(&self) -> &[String] {
        &self.no_albums
    }

    async fn resolve(
        &self,
        client: &PrismClient,
        files: &[BatchFile],
    ) -> Result<Vec<PhotoRecord>, AppError> {
        // count has one slot of headroom so surplus matches are detectable.
        let photos = client
            .photos_by_hash(&self.hashes, self.hashes.len() + 1)
            .await
            .map_err(upstream_error)?;

        project_by_hash(&self.hashes, &photos, files.len())
    }
}

// ----- Staging album strategy -----

pub struct StagingStrategy;

struct StagingRun {
    albums: Vec<String>,
}

impl StagingRun {
    fn album_name(&self) -> &str {
        &self.albums[0]
    }
}

impl CorrelationStrategy for StagingStrategy {
    fn begin(&self, files: &[BatchFile]) -> Result<Box<dyn CorrelationRun>, AppError> {
        // Records are re-projected into input order by filename, so names
        // must be unique within the batch.
        let mut seen = HashSet::new();
        for file in files {
            if !seen.insert(file.name.as_str()) {
                return Err(AppError::InvalidInput(format!(
                    "Batch contains two files named '{}'; duplicate filenames \
                     are not supported in one batch",
                    file.name
                )));
            }
        }

        Ok(Box::new(StagingRun {
            albums: vec![token::staging_album_name()],
        }))
    }

    fn name(&self) -> &'static str {
        "staging"
    }
}

#[async_trait]
impl CorrelationRun for StagingRun {
    fn finalize_albums(&self) -> &[String] {
        &self.albums
    }

    fn needs_cleanup(&self) -> bool {
        true
    }

    async fn resolve(
        &self,
        client: &PrismClient,
        files: &[BatchFile],
    ) -> Result<Vec<PhotoRecord>, AppError> {
        let albums = client
            .find_albums(self.album_name(), 2)
            .await
            .map_err(upstream_error)?;
        if albums.len() != 1 {
            return Err(AppError::UpstreamContract(format!(
                "staging album lookup for '{}' matched {} albums, expected exactly one",
                self.album_name(),
                albums.len()
            )));
        }

        let photos = client
            .photos_in_album(&albums[0].uid, files.len() + 1)
            .await
            .map_err(upstream_error)?;

        project_by_name(files, &photos)
    }

    async fn cleanup(&self, client: &PrismClient) -> Result<(), AppError> {
        let albums = client
            .find_albums(self.album_name(), 2)
            .await
            .map_err(upstream_error)?;
        match albums.len() {
            0 => {
                tracing::debug!(
                    staging_album = %self.album_name(),
                    "Staging album already absent, nothing to delete"
                );
                Ok(())
            }
            1 => client
                .delete_album(&albums[0].uid)
                .await
                .map_err(upstream_error),
            n => Err(AppError::UpstreamContract(format!(
                "staging album lookup for '{}' matched {} albums during cleanup",
                self.album_name(),
                n
            ))),
        }
    }
}

// ----- Order re-projection -----

/// Re-project hash-indexed records into the batch's input order.
fn project_by_hash(
    hashes: &[String],
    photos: &[Photo],
    file_count: usize,
) -> Result<Vec<PhotoRecord>, AppError> {
    if photos.len() != file_count {
        return Err(AppError::UpstreamContract(format!(
            "hash lookup matched {} records for {} uploaded files",
            photos.len(),
            file_count
        )));
    }

    let by_hash: HashMap<&str, &Photo> = photos.iter().map(|p| (p.hash.as_str(), p)).collect();

    hashes
        .iter()
        .map(|file_hash| {
            by_hash
                .get(file_hash.as_str())
                .map(|p| PhotoRecord {
                    uid: p.uid.clone(),
                    hash: p.hash.clone(),
                })
                .ok_or_else(|| {
                    AppError::UpstreamContract(format!(
                        "no record found for uploaded content hash {}",
                        file_hash
                    ))
                })
        })
        .collect()
}

/// Re-project staging-album records into the batch's input order by upload
/// filename. The service's listing order is not guaranteed to match upload
/// order, so the hash strategy's ordering guarantee is replicated here.
fn project_by_name(files: &[BatchFile], photos: &[Photo]) -> Result<Vec<PhotoRecord>, AppError> {
    if photos.len() != files.len() {
        return Err(AppError::UpstreamContract(format!(
            "staging album holds {} records for {} uploaded files",
            photos.len(),
            files.len()
        )));
    }

    let by_name: HashMap<&str, &Photo> = photos.iter().map(|p| (p.upload_name(), p)).collect();

    files
        .iter()
        .map(|file| {
            by_name
                .get(file.name.as_str())
                .map(|p| PhotoRecord {
                    uid: p.uid.clone(),
                    hash: p.hash.clone(),
                })
                .ok_or_else(|| {
                    AppError::UpstreamContract(format!(
                        "no record found for uploaded file '{}'",
                        file.name
                    ))
                })
        })
        .collect()
}
