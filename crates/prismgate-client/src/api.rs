//! Domain methods and wire types for the photo service API.
//!
//! Field names follow the upstream JSON (PascalCase / `UID`); explicit serde
//! renames keep the Rust side idiomatic. Only the operations the gateway
//! consumes are implemented; this is not a general-purpose client library.

use bytes::Bytes;
use serde::Deserialize;

use crate::{api_prefix, ClientError, ClientResult, PrismClient};
use prismgate_core::models::Session;

/// `GET /session` response. Only the fields the gateway caches.
#[derive(Debug, Deserialize)]
pub struct SessionResponse {
    pub user: SessionUser,
    pub config: SessionConfig,
}

#[derive(Debug, Deserialize)]
pub struct SessionUser {
    #[serde(rename = "UID")]
    pub uid: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionConfig {
    #[serde(rename = "previewToken")]
    pub preview_token: String,
}

/// A photo record as returned by `GET /photos`.
#[derive(Debug, Clone, Deserialize)]
pub struct Photo {
    #[serde(rename = "UID")]
    pub uid: String,
    #[serde(rename = "Hash")]
    pub hash: String,
    #[serde(rename = "FileName", default)]
    pub file_name: String,
    #[serde(rename = "OriginalName", default)]
    pub original_name: String,
}

impl Photo {
    /// Upload-time filename: the service keeps the original name when known
    /// and falls back to the stored filename otherwise.
    pub fn upload_name(&self) -> &str {
        if self.original_name.is_empty() {
            &self.file_name
        } else {
            &self.original_name
        }
    }
}

/// An album as returned by `GET /albums`.
#[derive(Debug, Clone, Deserialize)]
pub struct Album {
    #[serde(rename = "UID")]
    pub uid: String,
    #[serde(rename = "Title", default)]
    pub title: String,
}

/// A share link as returned by `GET /albums/{uid}/links`.
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumLink {
    #[serde(rename = "Token")]
    pub token: String,
    #[serde(rename = "Slug")]
    pub slug: String,
    /// Seconds until expiry; 0 means the link never expires.
    #[serde(rename = "Expires", default)]
    pub expires: i64,
}

impl AlbumLink {
    pub fn is_permanent(&self) -> bool {
        self.expires == 0
    }
}

#[derive(Debug, Deserialize)]
struct UploadAck {
    message: String,
}

#[derive(Debug, serde::Serialize)]
struct FinalizeRequest<'a> {
    albums: &'a [String],
}

impl PrismClient {
    /// Fetch the session identity: account UID and the preview token needed
    /// to build viewer URLs. Called once at startup.
    pub async fn session(&self) -> ClientResult<Session> {
        let response: SessionResponse = self.get(&format!("{}/session", api_prefix()), &[]).await?;

        if response.user.uid.is_empty() || response.config.preview_token.is_empty() {
            return Err(ClientError::Contract(
                "session response is missing user UID or preview token".to_string(),
            ));
        }

        Ok(Session {
            account_id: response.user.uid,
            preview_token: response.config.preview_token,
        })
    }

    /// Upload a single file under the batch token.
    ///
    /// The service acknowledges with a human-readable message; anything other
    /// than exactly one accepted file is a contract violation, not a
    /// retryable condition.
    pub async fn upload_file(
        &self,
        user_uid: &str,
        batch_token: &str,
        filename: &str,
        data: Bytes,
    ) -> ClientResult<()> {
        let form = reqwest::multipart::Form::new().part(
            "files",
            reqwest::multipart::Part::bytes(data.to_vec()).file_name(filename.to_string()),
        );

        let ack: UploadAck = self
            .post_multipart(
                &format!("{}/users/{}/upload/{}", api_prefix(), user_uid, batch_token),
                form,
            )
            .await?;

        // TODO: switch to a structured count field if the upstream API grows one.
        if !ack.message.trim().starts_with("1 file") {
            return Err(ClientError::Contract(format!(
                "expected acknowledgment for exactly one file, got '{}'",
                ack.message
            )));
        }

        Ok(())
    }

    /// Finalize the batch, filing every uploaded record into the named
    /// albums. An empty list finalizes without album membership.
    pub async fn finalize_batch(
        &self,
        user_uid: &str,
        batch_token: &str,
        albums: &[String],
    ) -> ClientResult<()> {
        self.put_unit(
            &format!("{}/users/{}/upload/{}", api_prefix(), user_uid, batch_token),
            &FinalizeRequest { albums },
        )
        .await
    }

    /// Photos whose content hash is in `hashes`.
    pub async fn photos_by_hash(&self, hashes: &[String], count: usize) -> ClientResult<Vec<Photo>> {
        let query = vec![
            ("count", count.to_string()),
            ("q", format!("hash:{}", hashes.join("|"))),
        ];
        self.get(&format!("{}/photos", api_prefix()), &query).await
    }

    /// Photos filed under the given album.
    pub async fn photos_in_album(&self, album_uid: &str, count: usize) -> ClientResult<Vec<Photo>> {
        let query = vec![("count", count.to_string()), ("s", album_uid.to_string())];
        self.get(&format!("{}/photos", api_prefix()), &query).await
    }

    /// Albums matching the given name query.
    pub async fn find_albums(&self, name: &str, count: usize) -> ClientResult<Vec<Album>> {
        let query = vec![("count", count.to_string()), ("q", name.to_string())];
        self.get(&format!("{}/albums", api_prefix()), &query).await
    }

    /// Share links for an album.
    pub async fn album_links(&self, album_uid: &str) -> ClientResult<Vec<AlbumLink>> {
        self.get(&format!("{}/albums/{}/links", api_prefix(), album_uid), &[])
            .await
    }

    /// Create a share link for an album. Only reachable when the
    /// create-link-if-absent toggle is enabled.
    pub async fn create_album_link(&self, album_uid: &str) -> ClientResult<AlbumLink> {
        self.post_json(
            &format!("{}/albums/{}/links", api_prefix(), album_uid),
            &serde_json::json!({}),
        )
        .await
    }

    /// Delete an album. Used for staging album teardown.
    pub async fn delete_album(&self, album_uid: &str) -> ClientResult<()> {
        self.delete(&format!("{}/albums/{}", api_prefix(), album_uid))
            .await
    }
}
