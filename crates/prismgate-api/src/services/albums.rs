//! Album and share-link resolution
//!
//! Finds the target album by name (exactly one match required), picks its
//! first non-expiring share link, and falls back to the private internal
//! viewer URL when no such link exists. Creating a link on demand sits behind
//! the `CREATE_LINK_IF_ABSENT` toggle, off by default.

use prismgate_client::PrismClient;
use prismgate_core::{urls, AppError};

use crate::error::upstream_error;

/// A resolved target album: its upstream UID and the URL handed to callers.
#[derive(Debug, Clone)]
pub struct ResolvedAlbum {
    pub uid: String,
    pub url: String,
}

pub async fn resolve_album(
    client: &PrismClient,
    name: &str,
    create_link_if_absent: bool,
) -> Result<ResolvedAlbum, AppError> {
    let albums = client.find_albums(name, 2).await.map_err(upstream_error)?;
    if albums.len() != 1 {
        return Err(AppError::UpstreamContract(format!(
            "album lookup for '{}' matched {} albums, expected exactly one",
            name,
            albums.len()
        )));
    }
    let album = &albums[0];

    let links = client
        .album_links(&album.uid)
        .await
        .map_err(upstream_error)?;

    if let Some(link) = links.iter().find(|l| l.is_permanent()) {
        return Ok(ResolvedAlbum {
            uid: album.uid.clone(),
            url: urls::share_url(client.base_url(), &link.token, &link.slug),
        });
    }

    if create_link_if_absent {
        let link = client
            .create_album_link(&album.uid)
            .await
            .map_err(upstream_error)?;
        tracing::info!(album_uid = %album.uid, "Created share link for album without one");
        return Ok(ResolvedAlbum {
            uid: album.uid.clone(),
            url: urls::share_url(client.base_url(), &link.token, &link.slug),
        });
    }

    tracing::debug!(
        album_uid = %album.uid,
        "Album has no non-expiring share link, falling back to internal URL"
    );
    Ok(ResolvedAlbum {
        uid: album.uid.clone(),
        url: urls::internal_album_url(client.base_url(), &album.uid),
    })
}
