//! Application settings loading from config.toml.
//!
//! Settings cover the pieces of the runtime environment that are not the
//! database: currently the receipt-parsing service endpoint. Values from
//! `config.toml` can be overridden per-deployment via environment variables
//! (loaded from `.env` by [`load`]).

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Application settings parsed from config.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Base URL of the receipt/label parsing service
    pub parser_endpoint: String,
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from the default location (./config.toml), applying
/// environment overrides.
///
/// `.env` is loaded first (non-fatal if absent); a `PARSER_ENDPOINT`
/// environment variable takes precedence over the file value.
pub fn load() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let mut settings = load_settings("config.toml")?;
    if let Ok(endpoint) = std::env::var("PARSER_ENDPOINT") {
        settings.parser_endpoint = endpoint;
    }
    Ok(settings)
}
