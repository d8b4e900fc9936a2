use serde::{Deserialize, Serialize};

/// Cached upstream identity, fetched once at startup.
///
/// `preview_token` must stay valid for building viewer URLs for the whole
/// process lifetime; the photo service guarantees this for an authenticated
/// session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub account_id: String,
    pub preview_token: String,
}
