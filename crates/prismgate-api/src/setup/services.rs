//! Service construction: upstream client, startup session, correlation
//! strategy, and the result store.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use prismgate_client::PrismClient;
use prismgate_core::{Config, CorrelationMode};

use crate::services::correlation::{CorrelationStrategy, HashStrategy, StagingStrategy};
use crate::services::result_store::ResultStore;
use crate::state::AppState;

/// Build the correlation strategy for the configured mode.
pub fn build_strategy(mode: CorrelationMode) -> Arc<dyn CorrelationStrategy> {
    match mode {
        CorrelationMode::ContentHash => Arc::new(HashStrategy),
        CorrelationMode::StagingAlbum => Arc::new(StagingStrategy),
    }
}

/// Initialize all services and assemble the application state.
///
/// Authenticates once against the photo service; the session identity is
/// cached for the process lifetime. No retry - an unreachable identity
/// endpoint is a startup failure.
pub async fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let client = PrismClient::new(
        config.photoprism_url().to_string(),
        config.photoprism_token().to_string(),
        Duration::from_secs(config.upstream_timeout_secs()),
    )
    .context("Failed to create upstream client")?;

    let session = client
        .session()
        .await
        .context("Failed to authenticate against the photo service")?;
    tracing::info!(
        account_id = %session.account_id,
        upstream = %client.base_url(),
        "Authenticated against photo service"
    );

    let strategy = build_strategy(config.correlation_mode());
    tracing::info!(strategy = strategy.name(), "Correlation strategy selected");

    let results = ResultStore::new(
        Duration::from_secs(config.result_ttl_secs()),
        config.result_max_entries(),
    );
    results.spawn_sweeper(Duration::from_secs(config.result_sweep_interval_secs()));

    Ok(Arc::new(AppState {
        is_production: config.is_production(),
        config: config.clone(),
        client,
        session,
        strategy,
        results,
    }))
}
