//! In-process stub of the photo service.
//!
//! Serves the subset of the upstream API the gateway consumes, bound to an
//! ephemeral port. Behavior knobs (acknowledgment text, album creation at
//! finalize, dropped records) let tests exercise the gateway's contract
//! checks and cleanup guarantees.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use prismgate_core::hash::content_hash;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub struct MockPhoto {
    pub uid: String,
    pub hash: String,
    pub file_name: String,
    pub original_name: String,
    pub album_uids: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct MockAlbum {
    pub uid: String,
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct MockLink {
    pub token: String,
    pub slug: String,
    pub expires: i64,
}

pub struct PrismState {
    pub request_count: usize,
    pub photos: Vec<MockPhoto>,
    pub albums: Vec<MockAlbum>,
    pub links: HashMap<String, Vec<MockLink>>,
    pub pending: HashMap<String, Vec<MockPhoto>>,
    pub deleted_albums: Vec<MockAlbum>,
    pub upload_ack_message: String,
    pub create_albums_on_finalize: bool,
    pub drop_on_finalize: usize,
    next_id: usize,
}

impl Default for PrismState {
    fn default() -> Self {
        Self {
            request_count: 0,
            photos: Vec::new(),
            albums: Vec::new(),
            links: HashMap::new(),
            pending: HashMap::new(),
            deleted_albums: Vec::new(),
            upload_ack_message: "1 file uploaded".to_string(),
            create_albums_on_finalize: true,
            drop_on_finalize: 0,
            next_id: 100,
        }
    }
}

impl PrismState {
    fn next_uid(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}{}", prefix, self.next_id)
    }

    fn find_or_create_album(&mut self, title: &str) -> String {
        if let Some(album) = self.albums.iter().find(|a| a.title == title) {
            return album.uid.clone();
        }
        let uid = self.next_uid("aq");
        self.albums.push(MockAlbum {
            uid: uid.clone(),
            title: title.to_string(),
        });
        uid
    }
}

type Shared = Arc<Mutex<PrismState>>;

/// Handle to the running stub.
pub struct MockPrism {
    pub base_url: String,
    pub state: Shared,
}

impl MockPrism {
    pub async fn add_album(&self, uid: &str, title: &str) {
        self.state.lock().await.albums.push(MockAlbum {
            uid: uid.to_string(),
            title: title.to_string(),
        });
    }

    pub async fn add_link(&self, album_uid: &str, token: &str, slug: &str, expires: i64) {
        self.state
            .lock()
            .await
            .links
            .entry(album_uid.to_string())
            .or_default()
            .push(MockLink {
                token: token.to_string(),
                slug: slug.to_string(),
                expires,
            });
    }

    pub async fn set_ack_message(&self, message: &str) {
        self.state.lock().await.upload_ack_message = message.to_string();
    }

    pub async fn set_create_albums_on_finalize(&self, enabled: bool) {
        self.state.lock().await.create_albums_on_finalize = enabled;
    }

    pub async fn set_drop_on_finalize(&self, count: usize) {
        self.state.lock().await.drop_on_finalize = count;
    }

    pub async fn request_count(&self) -> usize {
        self.state.lock().await.request_count
    }

    pub async fn album_titles(&self) -> Vec<String> {
        self.state
            .lock()
            .await
            .albums
            .iter()
            .map(|a| a.title.clone())
            .collect()
    }

    pub async fn deleted_album_titles(&self) -> Vec<String> {
        self.state
            .lock()
            .await
            .deleted_albums
            .iter()
            .map(|a| a.title.clone())
            .collect()
    }

    pub async fn photo_count(&self) -> usize {
        self.state.lock().await.photos.len()
    }
}

/// Spawn the stub on an ephemeral port.
pub async fn spawn_mock_prism() -> MockPrism {
    let state: Shared = Arc::new(Mutex::new(PrismState::default()));

    let router = Router::new()
        .route("/api/v1/session", get(session))
        .route(
            "/api/v1/users/{uid}/upload/{token}",
            post(upload_file).put(finalize),
        )
        .route("/api/v1/photos", get(photos))
        .route("/api/v1/albums", get(albums))
        .route(
            "/api/v1/albums/{uid}/links",
            get(album_links).post(create_album_link),
        )
        .route("/api/v1/albums/{uid}", delete(delete_album))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock listener");
    let addr = listener.local_addr().expect("mock addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve mock");
    });

    MockPrism {
        base_url: format!("http://{}", addr),
        state,
    }
}

async fn session(State(state): State<Shared>) -> Json<serde_json::Value> {
    state.lock().await.request_count += 1;
    Json(serde_json::json!({
        "user": { "UID": "u-test" },
        "config": { "previewToken": "pvt" }
    }))
}

async fn upload_file(
    State(state): State<Shared>,
    Path((_uid, token)): Path<(String, String)>,
    mut multipart: Multipart,
) -> Json<serde_json::Value> {
    let mut guard = state.lock().await;
    guard.request_count += 1;

    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        if field.name() != Some("files") {
            continue;
        }
        let original_name = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.expect("field bytes");
        let uid = guard.next_uid("pq");
        let photo = MockPhoto {
            uid,
            hash: content_hash(&data),
            file_name: format!("2024/01/{}", original_name),
            original_name,
            album_uids: Vec::new(),
        };
        guard.pending.entry(token.clone()).or_default().push(photo);
    }

    let message = guard.upload_ack_message.clone();
    Json(serde_json::json!({ "message": message }))
}

#[derive(serde::Deserialize)]
struct FinalizeBody {
    albums: Vec<String>,
}

async fn finalize(
    State(state): State<Shared>,
    Path((_uid, token)): Path<(String, String)>,
    Json(body): Json<FinalizeBody>,
) -> Json<serde_json::Value> {
    let mut guard = state.lock().await;
    guard.request_count += 1;

    let mut batch = guard.pending.remove(&token).unwrap_or_default();
    for _ in 0..guard.drop_on_finalize {
        batch.pop();
    }

    let mut album_uids = Vec::new();
    for name in &body.albums {
        if guard.create_albums_on_finalize {
            album_uids.push(guard.find_or_create_album(name));
        } else if let Some(album) = guard.albums.iter().find(|a| &a.title == name) {
            album_uids.push(album.uid.clone());
        }
    }

    for mut photo in batch {
        photo.album_uids = album_uids.clone();
        guard.photos.push(photo);
    }

    Json(serde_json::json!({}))
}

fn photo_json(photo: &MockPhoto) -> serde_json::Value {
    serde_json::json!({
        "UID": photo.uid,
        "Hash": photo.hash,
        "FileName": photo.file_name,
        "OriginalName": photo.original_name,
    })
}

async fn photos(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<serde_json::Value> {
    let mut guard = state.lock().await;
    guard.request_count += 1;

    let count: usize = params
        .get("count")
        .and_then(|c| c.parse().ok())
        .unwrap_or(usize::MAX);

    let mut matched: Vec<&MockPhoto> = if let Some(q) = params.get("q") {
        let hashes: Vec<&str> = q
            .strip_prefix("hash:")
            .map(|h| h.split('|').collect())
            .unwrap_or_default();
        guard
            .photos
            .iter()
            .filter(|p| hashes.contains(&p.hash.as_str()))
            .collect()
    } else if let Some(album_uid) = params.get("s") {
        guard
            .photos
            .iter()
            .filter(|p| p.album_uids.iter().any(|a| a == album_uid))
            .collect()
    } else {
        guard.photos.iter().collect()
    };

    // The real service makes no ordering promise; answer newest-first so
    // tests prove the gateway re-projects into input order.
    matched.reverse();
    matched.truncate(count);

    Json(serde_json::Value::Array(
        matched.iter().map(|p| photo_json(p)).collect(),
    ))
}

async fn albums(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<serde_json::Value> {
    let mut guard = state.lock().await;
    guard.request_count += 1;

    let count: usize = params
        .get("count")
        .and_then(|c| c.parse().ok())
        .unwrap_or(usize::MAX);
    let query = params.get("q").cloned().unwrap_or_default();

    let matched: Vec<serde_json::Value> = guard
        .albums
        .iter()
        .filter(|a| a.title == query)
        .take(count)
        .map(|a| serde_json::json!({ "UID": a.uid, "Title": a.title }))
        .collect();

    Json(serde_json::Value::Array(matched))
}

async fn album_links(
    State(state): State<Shared>,
    Path(uid): Path<String>,
) -> Json<serde_json::Value> {
    let mut guard = state.lock().await;
    guard.request_count += 1;

    let links: Vec<serde_json::Value> = guard
        .links
        .get(&uid)
        .map(|links| {
            links
                .iter()
                .map(|l| {
                    serde_json::json!({
                        "Token": l.token,
                        "Slug": l.slug,
                        "Expires": l.expires,
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    Json(serde_json::Value::Array(links))
}

async fn create_album_link(
    State(state): State<Shared>,
    Path(uid): Path<String>,
) -> Json<serde_json::Value> {
    let mut guard = state.lock().await;
    guard.request_count += 1;

    let slug = guard
        .albums
        .iter()
        .find(|a| a.uid == uid)
        .map(|a| a.title.to_lowercase())
        .unwrap_or_else(|| "album".to_string());
    let link = MockLink {
        token: format!("TNEW-{}", uid),
        slug: slug.clone(),
        expires: 0,
    };
    guard
        .links
        .entry(uid.clone())
        .or_default()
        .push(link.clone());

    Json(serde_json::json!({
        "Token": link.token,
        "Slug": link.slug,
        "Expires": link.expires,
    }))
}

async fn delete_album(State(state): State<Shared>, Path(uid): Path<String>) -> Json<serde_json::Value> {
    let mut guard = state.lock().await;
    guard.request_count += 1;

    if let Some(pos) = guard.albums.iter().position(|a| a.uid == uid) {
        let album = guard.albums.remove(pos);
        guard.deleted_albums.push(album);
    }
    for photo in &mut guard.photos {
        photo.album_uids.retain(|a| a != &uid);
    }

    Json(serde_json::json!({}))
}
