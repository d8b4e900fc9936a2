//! HTTP client for the upstream photo service.
//!
//! Provides a minimal client with bearer auth, generic GET/PUT/multipart/DELETE
//! helpers, and domain methods for the operations the gateway consumes
//! (session, upload, finalize, photo/album lookups, link listing, album
//! deletion). The orchestration engine uses this client directly.

pub mod api;
pub mod error;

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub use error::{ClientError, ClientResult};

/// API version prefix (e.g. "/api/v1"). Set PHOTOPRISM_API_VERSION to match
/// the upstream server.
pub fn api_prefix() -> String {
    let version = std::env::var("PHOTOPRISM_API_VERSION").unwrap_or_else(|_| "v1".to_string());
    format!("/api/{}", version)
}

/// HTTP client for the photo service with bearer auth.
#[derive(Clone, Debug)]
pub struct PrismClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl PrismClient {
    pub fn new(base_url: String, access_token: String, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header("Authorization", format!("Bearer {}", self.access_token))
    }

    /// Read the response body as text for error reporting; never fails.
    async fn error_body(response: reqwest::Response) -> String {
        response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string())
    }

    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: Self::error_body(response).await,
            });
        }
        Ok(response)
    }

    async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// GET request with optional query parameters. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let url = self.build_url(path);
        let mut request = self.client.get(&url);
        request = self.apply_auth(request);

        if !query.is_empty() {
            request = request.query(query);
        }

        let response = Self::check_status(request.send().await?).await?;
        Self::decode_json(response).await
    }

    /// PUT JSON body, discarding the response body. Some upstream endpoints
    /// answer with an empty or variable body on success.
    pub async fn put_unit<B: serde::Serialize>(&self, path: &str, body: &B) -> ClientResult<()> {
        let url = self.build_url(path);
        let request = self.client.put(&url).json(body);
        let request = self.apply_auth(request);

        Self::check_status(request.send().await?).await?;
        Ok(())
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.build_url(path);
        let request = self.client.post(&url).json(body);
        let request = self.apply_auth(request);

        let response = Self::check_status(request.send().await?).await?;
        Self::decode_json(response).await
    }

    /// POST multipart form and deserialize response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> ClientResult<T> {
        let url = self.build_url(path);
        let request = self.client.post(&url).multipart(form);
        let request = self.apply_auth(request);

        let response = Self::check_status(request.send().await?).await?;
        Self::decode_json(response).await
    }

    /// DELETE request. Returns Ok(()) on success.
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let url = self.build_url(path);
        let request = self.client.delete(&url);
        let request = self.apply_auth(request);

        Self::check_status(request.send().await?).await?;
        Ok(())
    }
}

// Re-export wire types for convenience.
pub use api::{Album, AlbumLink, Photo, SessionResponse};
