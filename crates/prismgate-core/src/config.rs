//! Configuration module
//!
//! Env-var driven configuration for the gateway: server settings, the upstream
//! photo service connection, correlation strategy selection, and result cache
//! lifetime/capacity.

use std::env;
use std::str::FromStr;

// Common constants
const UPSTREAM_TIMEOUT_SECS: u64 = 60;
const UPLOAD_MAX_MB: usize = 256;
const RESULT_TTL_SECS: u64 = 600;
const RESULT_MAX_ENTRIES: usize = 1024;
const RESULT_SWEEP_INTERVAL_SECS: u64 = 60;
const PREVIEW_SIZE: u32 = 2048;

/// Correlation strategy selected at configuration time.
///
/// `ContentHash` re-discovers uploaded records by querying the photo service
/// for the files' content hashes. `StagingAlbum` files every upload into an
/// ephemeral album, lists it, and deletes it afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CorrelationMode {
    ContentHash,
    StagingAlbum,
}

impl FromStr for CorrelationMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hash" => Ok(CorrelationMode::ContentHash),
            "staging" => Ok(CorrelationMode::StagingAlbum),
            other => Err(anyhow::anyhow!(
                "Invalid correlation strategy '{}'. Must be 'hash' or 'staging'",
                other
            )),
        }
    }
}

/// Base configuration shared by any front-facing service
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
}

/// Gateway configuration
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub base: BaseConfig,
    // Upstream photo service
    pub photoprism_url: String,
    pub photoprism_token: String,
    pub upstream_timeout_secs: u64,
    // Upload limits
    pub upload_max_bytes: usize,
    // Orchestration behavior
    pub correlation_mode: CorrelationMode,
    /// Create a public share link when an album has no non-expiring one.
    /// Disabled by default pending an upstream fix.
    pub create_link_if_absent: bool,
    pub preview_size: u32,
    // Result cache lifetime and capacity
    pub result_ttl_secs: u64,
    pub result_max_entries: usize,
    pub result_sweep_interval_secs: u64,
}

/// Application configuration (gateway).
#[derive(Clone, Debug)]
pub struct Config(pub Box<GatewayConfig>);

impl Config {
    fn as_gateway(&self) -> &GatewayConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.as_gateway().base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = GatewayConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_gateway().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.as_gateway().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_gateway().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_gateway().base.environment
    }

    pub fn photoprism_url(&self) -> &str {
        &self.as_gateway().photoprism_url
    }

    pub fn photoprism_token(&self) -> &str {
        &self.as_gateway().photoprism_token
    }

    pub fn upstream_timeout_secs(&self) -> u64 {
        self.as_gateway().upstream_timeout_secs
    }

    pub fn upload_max_bytes(&self) -> usize {
        self.as_gateway().upload_max_bytes
    }

    pub fn correlation_mode(&self) -> CorrelationMode {
        self.as_gateway().correlation_mode
    }

    pub fn create_link_if_absent(&self) -> bool {
        self.as_gateway().create_link_if_absent
    }

    pub fn preview_size(&self) -> u32 {
        self.as_gateway().preview_size
    }

    pub fn result_ttl_secs(&self) -> u64 {
        self.as_gateway().result_ttl_secs
    }

    pub fn result_max_entries(&self) -> usize {
        self.as_gateway().result_max_entries
    }

    pub fn result_sweep_interval_secs(&self) -> u64 {
        self.as_gateway().result_sweep_interval_secs
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
        };

        let photoprism_url = env::var("PHOTOPRISM_URL")
            .map_err(|_| anyhow::anyhow!("PHOTOPRISM_URL must be set to the photo service URL"))?
            .trim_end_matches('/')
            .to_string();

        let photoprism_token = env::var("PHOTOPRISM_TOKEN")
            .map_err(|_| anyhow::anyhow!("PHOTOPRISM_TOKEN must be set for upstream auth"))?;

        let correlation_mode = env::var("CORRELATION_STRATEGY")
            .unwrap_or_else(|_| "hash".to_string())
            .parse::<CorrelationMode>()?;

        let upload_max_mb = env::var("UPLOAD_MAX_MB")
            .unwrap_or_else(|_| UPLOAD_MAX_MB.to_string())
            .parse::<usize>()
            .unwrap_or(UPLOAD_MAX_MB);

        Ok(GatewayConfig {
            base,
            photoprism_url,
            photoprism_token,
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| UPSTREAM_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(UPSTREAM_TIMEOUT_SECS),
            upload_max_bytes: upload_max_mb * 1024 * 1024,
            correlation_mode,
            create_link_if_absent: env::var("CREATE_LINK_IF_ABSENT")
                .unwrap_or_else(|_| "false".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(false),
            preview_size: env::var("PREVIEW_SIZE")
                .unwrap_or_else(|_| PREVIEW_SIZE.to_string())
                .parse()
                .unwrap_or(PREVIEW_SIZE),
            result_ttl_secs: env::var("RESULT_TTL_SECS")
                .unwrap_or_else(|_| RESULT_TTL_SECS.to_string())
                .parse()
                .unwrap_or(RESULT_TTL_SECS),
            result_max_entries: env::var("RESULT_MAX_ENTRIES")
                .unwrap_or_else(|_| RESULT_MAX_ENTRIES.to_string())
                .parse()
                .unwrap_or(RESULT_MAX_ENTRIES),
            result_sweep_interval_secs: env::var("RESULT_SWEEP_INTERVAL_SECS")
                .unwrap_or_else(|_| RESULT_SWEEP_INTERVAL_SECS.to_string())
                .parse()
                .unwrap_or(RESULT_SWEEP_INTERVAL_SECS),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.photoprism_url.is_empty() {
            return Err(anyhow::anyhow!("PHOTOPRISM_URL must not be empty"));
        }
        if !self.photoprism_url.starts_with("http://") && !self.photoprism_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "PHOTOPRISM_URL must start with http:// or https://"
            ));
        }
        if self.photoprism_token.is_empty() {
            return Err(anyhow::anyhow!("PHOTOPRISM_TOKEN must not be empty"));
        }
        if self.upload_max_bytes == 0 {
            return Err(anyhow::anyhow!("UPLOAD_MAX_MB must be greater than zero"));
        }
        if self.result_ttl_secs == 0 {
            return Err(anyhow::anyhow!("RESULT_TTL_SECS must be greater than zero"));
        }
        if self.result_max_entries == 0 {
            return Err(anyhow::anyhow!(
                "RESULT_MAX_ENTRIES must be greater than zero"
            ));
        }
        Ok(())
    }
}
