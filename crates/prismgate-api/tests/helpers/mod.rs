//! Test helpers: build AppState and router against an in-process photo
//! service stub.
//!
//! Run from workspace root: `cargo test -p prismgate-api`.

pub mod fixtures;
pub mod prism;

use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use prismgate_api::services::result_store::ResultStore;
use prismgate_api::setup::routes;
use prismgate_api::setup::services::build_strategy;
use prismgate_api::state::AppState;
use prismgate_client::PrismClient;
use prismgate_core::{BaseConfig, Config, CorrelationMode, GatewayConfig};

use prism::{spawn_mock_prism, MockPrism};

/// Test application: server, stub upstream, and shared state.
pub struct TestApp {
    pub server: TestServer,
    pub prism: MockPrism,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

fn test_config(base_url: &str, mode: CorrelationMode, create_link_if_absent: bool) -> Config {
    Config(Box::new(GatewayConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
        },
        photoprism_url: base_url.to_string(),
        photoprism_token: "test-token".to_string(),
        upstream_timeout_secs: 5,
        upload_max_bytes: 1024 * 1024,
        correlation_mode: mode,
        create_link_if_absent,
        preview_size: 2048,
        result_ttl_secs: 600,
        result_max_entries: 64,
        result_sweep_interval_secs: 60,
    }))
}

/// Setup a test app with the given correlation strategy.
pub async fn setup_test_app(mode: CorrelationMode) -> TestApp {
    setup_test_app_with(mode, false).await
}

pub async fn setup_test_app_with(mode: CorrelationMode, create_link_if_absent: bool) -> TestApp {
    let prism = spawn_mock_prism().await;
    let config = test_config(&prism.base_url, mode, create_link_if_absent);

    let client = PrismClient::new(
        prism.base_url.clone(),
        "test-token".to_string(),
        Duration::from_secs(5),
    )
    .expect("client");
    let session = client.session().await.expect("mock session");

    let state = Arc::new(AppState {
        is_production: false,
        client,
        session,
        strategy: build_strategy(mode),
        results: ResultStore::new(
            Duration::from_secs(config.result_ttl_secs()),
            config.result_max_entries(),
        ),
        config: config.clone(),
    });

    let router = routes::setup_routes(&config, state.clone()).expect("routes");
    let server = TestServer::new(router).expect("test server");

    TestApp {
        server,
        prism,
        state,
    }
}

/// Expected viewer URL for the given file content, using the stub's preview
/// token and the test config's render size.
pub fn expected_viewer_url(base_url: &str, content: &[u8]) -> String {
    prismgate_core::urls::viewer_url(
        base_url,
        &prismgate_core::hash::content_hash(content),
        "pvt",
        2048,
    )
}
