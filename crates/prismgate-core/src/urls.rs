//! Viewer and share URL building
//!
//! URL shapes exposed by the photo service. Building them is a pure function
//! of the upstream base URL and the record/link identifiers, so the gateway
//! never has to fetch a URL it can derive.

/// Preview/viewer URL for a single photo record.
///
/// Shape: `{base}/t/{hash}/{preview_token}/fit_{size}`
pub fn viewer_url(base_url: &str, hash: &str, preview_token: &str, size: u32) -> String {
    format!(
        "{}/t/{}/{}/fit_{}",
        base_url.trim_end_matches('/'),
        hash,
        preview_token,
        size
    )
}

/// Private, session-scoped album URL. Used when an album has no public link.
///
/// Shape: `{base}/library/albums/{uid}/view`
pub fn internal_album_url(base_url: &str, album_uid: &str) -> String {
    format!(
        "{}/library/albums/{}/view",
        base_url.trim_end_matches('/'),
        album_uid
    )
}

/// Public share URL for an album link.
///
/// Shape: `{base}/s/{token}/{slug}`
pub fn share_url(base_url: &str, link_token: &str, slug: &str) -> String {
    format!(
        "{}/s/{}/{}",
        base_url.trim_end_matches('/'),
        link_token,
        slug
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewer_url_shape() {
        assert_eq!(
            viewer_url("http://photos.local", "abc123", "pvt", 2048),
            "http://photos.local/t/abc123/pvt/fit_2048"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        assert_eq!(
            internal_album_url("http://photos.local/", "aqxyz"),
            "http://photos.local/library/albums/aqxyz/view"
        );
        assert_eq!(
            share_url("http://photos.local/", "T1", "trip"),
            "http://photos.local/s/T1/trip"
        );
    }
}
