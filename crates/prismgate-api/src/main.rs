mod api_doc;
mod constants;
mod error;
mod handlers;
mod services;
mod setup;
mod state;
mod telemetry;
mod validation;

use prismgate_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (telemetry, upstream session, routes)
    let (_state, router) = crate::setup::initialize_app(config.clone()).await?;

    // Start the server
    crate::setup::server::start_server(&config, router).await?;

    Ok(())
}
