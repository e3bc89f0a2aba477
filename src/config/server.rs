//! HTTP server settings loaded from environment variables.
//!
//! Values come from the process environment (optionally populated from `.env`)
//! and fall back to local development defaults.

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";
const DEFAULT_SEED_CONFIG: &str = "config.toml";

/// Address the HTTP listener binds to, from `BIND_ADDRESS`.
#[must_use]
pub fn get_bind_address() -> String {
    std::env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string())
}

/// Path of the seed data file, from `SEED_CONFIG`.
#[must_use]
pub fn get_seed_config_path() -> String {
    std::env::var("SEED_CONFIG").unwrap_or_else(|_| DEFAULT_SEED_CONFIG.to_string())
}
