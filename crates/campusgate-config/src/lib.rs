//! # Campusgate Config
//!
//! Configuration types for Campusgate.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`access`]: Route guard bypass segments and permission fetch timeout
//! - [`jwt`]: JWT authentication configuration
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: Listener address
//!
//! # Example
//!
//! ```ignore
//! use campusgate_config::{AccessConfig, CorsConfig, JwtConfig, ServerConfig};
//!
//! // Load all configs from environment
//! let access_config = AccessConfig::from_env();
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod access;
pub mod cors;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use access::AccessConfig;
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

/// Splits a comma-separated list, trimming entries and dropping empty ones.
pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
