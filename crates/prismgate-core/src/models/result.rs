use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A server-assigned photo record recovered by correlation.
///
/// `uid` identifies the record inside the photo service; `hash` is the
/// content address used to build viewer URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    pub uid: String,
    pub hash: String,
}

/// Final output of one successful orchestration run, owned by the result
/// store and keyed by result token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResult {
    /// Viewer URLs, one per uploaded file, in the requested sort order.
    pub photo_urls: Vec<String>,
    /// Share or internal URL for the target album; absent when no album
    /// was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_url: Option<String>,
}

/// Response to a successful batch submission (redirect-after-post pattern).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadAccepted {
    /// Token to retrieve the orchestration result in a follow-up request.
    pub result_token: String,
}
