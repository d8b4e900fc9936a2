//! Application state.
//!
//! Shared across requests: configuration, the upstream client, the cached
//! session identity (read-only after startup), the configured correlation
//! strategy, and the result store. Everything else is per-request.

use std::sync::Arc;

use prismgate_client::PrismClient;
use prismgate_core::models::Session;
use prismgate_core::Config;

use crate::services::correlation::CorrelationStrategy;
use crate::services::result_store::ResultStore;

/// Main application state, injected into handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub config: Config,
    pub client: PrismClient,
    /// Upstream identity, fetched once at startup. Immutable afterwards.
    pub session: Session,
    pub strategy: Arc<dyn CorrelationStrategy>,
    pub results: ResultStore,
    pub is_production: bool,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
