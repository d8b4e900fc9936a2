//! API constants
//!
//! Inbound route versioning. The upstream photo service has its own prefix,
//! configured in the client crate.

#![allow(dead_code)]

/// API base path prefix (version-independent)
pub const API_BASE: &str = "/api";

/// Versioned prefix for all inbound routes.
pub const API_PREFIX: &str = "/api/v0";
