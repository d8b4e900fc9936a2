//! Prismgate Core Library
//!
//! This crate provides the domain models, error types, configuration, token
//! generation, and URL building shared by the Prismgate gateway components.

pub mod config;
pub mod error;
pub mod hash;
pub mod models;
pub mod token;
pub mod urls;

// Re-export commonly used types
pub use config::{BaseConfig, Config, CorrelationMode, GatewayConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use token::generate_token;
