//! Startup configuration validation.

use anyhow::{Context, Result};
use prismgate_core::Config;

/// Validate the loaded configuration before any service is constructed.
pub fn validate_config(config: &Config) -> Result<()> {
    config
        .validate()
        .context("Invalid gateway configuration")?;

    if config.is_production() && config.create_link_if_absent() {
        tracing::warn!(
            "CREATE_LINK_IF_ABSENT is enabled in production; share links will be \
             created for albums that have none"
        );
    }

    Ok(())
}
