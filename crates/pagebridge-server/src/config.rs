//! Process configuration from environment variables.

use std::env;

use thiserror::Error;

use crate::constants::DEFAULT_PORT;

/// Configuration read once at startup.
///
/// `api_key` is optional: the process starts without one and answers every
/// request with a misconfiguration error until it is set.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Notion integration bearer token.
    pub notion_token: String,
    /// Shared secret callers must present in the key header.
    pub api_key: Option<String>,
    /// HTTP port. `--port` on the command line wins over this.
    pub port: u16,
    /// Notion base URL override for tests and staging.
    pub notion_base_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("NOTION_TOKEN not set")]
    MissingNotionToken,
    #[error("PORT is not a valid port number: {0}")]
    InvalidPort(String),
}

impl ServerConfig {
    /// Read configuration from the environment. `.env` loading happens in
    /// `main` before this runs. Empty values count as unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let notion_token = env::var("NOTION_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingNotionToken)?;
        let api_key = env::var("API_KEY").ok().filter(|k| !k.is_empty());
        let port = parse_port(env::var("PORT").ok())?;
        let notion_base_url = env::var("NOTION_BASE_URL").ok().filter(|u| !u.is_empty());
        Ok(Self {
            notion_token,
            api_key,
            port,
            notion_base_url,
        })
    }
}

/// Unset and empty both fall back to the default port; anything else must
/// parse as a port number.
fn parse_port(raw: Option<String>) -> Result<u16, ConfigError> {
    match raw.filter(|p| !p.is_empty()) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw)),
        None => Ok(DEFAULT_PORT),
    }
}

// ============================================================================
// Tests
// ============================================================================
