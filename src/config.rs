//! Application configuration loaded from environment variables.
//!
//! The Blizzard credentials are optional: when any of them is missing or
//! still holds a placeholder value, the service runs against fixture data.

use std::env;
use std::time::Duration;

/// Credentials and endpoints for the Blizzard APIs.
#[derive(Debug, Clone)]
pub struct BlizzardConfig {
    /// OAuth client ID (public)
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Game-data API base URL, e.g. `https://us.api.blizzard.com`
    pub api_base_url: String,
    /// OAuth base URL, e.g. `https://oauth.battle.net`
    pub oauth_url: String,
}

impl BlizzardConfig {
    /// Client-credential exchange endpoint.
    pub fn token_url(&self) -> String {
        format!("{}/token", self.oauth_url.trim_end_matches('/'))
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Live API settings; `None` selects mock mode.
    pub blizzard: Option<BlizzardConfig>,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Timeout for each upstream request
    pub request_timeout: Duration,
    /// Simulated latency for fixture responses
    pub mock_latency: Duration,
}

impl Config {
    /// Default config for testing only (mock mode, no latency).
    pub fn test_default() -> Self {
        Self {
            blizzard: None,
            frontend_url: "http://localhost:3000".to_string(),
            port: 8080,
            request_timeout: Duration::from_secs(10),
            mock_latency: Duration::ZERO,
        }
    }

    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            blizzard: blizzard_from_env(),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: parse_var("PORT", 8080)?,
            request_timeout: Duration::from_secs(parse_var("REQUEST_TIMEOUT_SECS", 10)?),
            mock_latency: Duration::from_millis(parse_var("MOCK_LATENCY_MS", 500)?),
        })
    }

    pub fn is_mock_mode(&self) -> bool {
        self.blizzard.is_none()
    }
}

fn blizzard_from_env() -> Option<BlizzardConfig> {
    let client_id = credential_var("BLIZZARD_CLIENT_ID")?;
    let client_secret = credential_var("BLIZZARD_CLIENT_SECRET")?;
    let api_base_url = credential_var("BLIZZARD_API_BASE_URL")?;
    let oauth_url = credential_var("BLIZZARD_OAUTH_URL")?;

    Some(BlizzardConfig {
        client_id,
        client_secret,
        api_base_url: api_base_url.trim_end_matches('/').to_string(),
        oauth_url,
    })
}

/// Read a credential, treating unset and placeholder values alike.
fn credential_var(name: &'static str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !is_placeholder(&value) => Some(value.trim().to_string()),
        _ => {
            tracing::warn!(var = name, "Missing or placeholder credential");
            None
        }
    }
}

/// Values shipped in `.env.example` files, or left blank.
pub fn is_placeholder(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    value.is_empty() || value.starts_with("your_") || value.contains("placeholder")
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_detection() {
        assert!(is_placeholder(""));
        assert!(is_placeholder("   "));
        assert!(is_placeholder("your_client_id_here"));
        assert!(is_placeholder("YOUR_CLIENT_SECRET"));
        assert!(is_placeholder("placeholder"));
        assert!(!is_placeholder("3f2a9c71e8d44b5f"));
        assert!(!is_placeholder("https://us.api.blizzard.com"));
    }

    #[test]
    fn test_token_url() {
        let config = BlizzardConfig {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            api_base_url: "https://us.api.blizzard.com".to_string(),
            oauth_url: "https://oauth.battle.net/".to_string(),
        };
        assert_eq!(config.token_url(), "https://oauth.battle.net/token");
    }

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("BLIZZARD_CLIENT_ID", "test_id");
        env::set_var("BLIZZARD_CLIENT_SECRET", "test_secret");
        env::set_var("BLIZZARD_API_BASE_URL", "https://us.api.blizzard.com/");
        env::set_var("BLIZZARD_OAUTH_URL", "https://oauth.battle.net");

        let config = Config::from_env().expect("Config should load");
        let blizzard = config.blizzard.expect("credentials should be present");

        assert_eq!(blizzard.client_id, "test_id");
        assert_eq!(blizzard.api_base_url, "https://us.api.blizzard.com");
        assert_eq!(config.port, 8080);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }
}
