use std::time::Duration;

use entourage_replicate::api::DEFAULT_API_URL;
use entourage_replicate::pipeline::{
    PipelineConfig, RemovalRetryConfig, DEFAULT_FLUX_VERSION, DEFAULT_REMBG_VERSION,
};
use entourage_replicate::polling::PollConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `300`). Generation plus
    /// background removal routinely takes tens of seconds.
    pub request_timeout_secs: u64,
    /// Image generation settings.
    pub generation: GenerationConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `300`                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let generation = GenerationConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            generation,
        }
    }
}

/// Replicate connection and model settings.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// API token. Generation endpoints are disabled when absent.
    pub api_token: Option<String>,
    pub api_url: String,
    pub flux_version: String,
    pub rembg_version: String,
    pub poll_interval_ms: u64,
    pub max_poll_attempts: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let poll = PollConfig::default();
        Self {
            api_token: None,
            api_url: DEFAULT_API_URL.to_string(),
            flux_version: DEFAULT_FLUX_VERSION.to_string(),
            rembg_version: DEFAULT_REMBG_VERSION.to_string(),
            poll_interval_ms: poll.interval.as_millis() as u64,
            max_poll_attempts: poll.max_attempts,
        }
    }
}

impl GenerationConfig {
    /// Load generation settings from environment variables.
    ///
    /// | Env Var               | Default                     |
    /// |-----------------------|-----------------------------|
    /// | `REPLICATE_API_TOKEN` | unset (generation disabled) |
    /// | `REPLICATE_API_URL`   | `https://api.replicate.com` |
    /// | `FLUX_VERSION`        | pinned image model version  |
    /// | `REMBG_VERSION`       | pinned removal model version|
    /// | `POLL_INTERVAL_MS`    | `2000`                      |
    /// | `MAX_POLL_ATTEMPTS`   | `150`                       |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_token = std::env::var("REPLICATE_API_TOKEN")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let poll_interval_ms: u64 = std::env::var("POLL_INTERVAL_MS")
            .map(|v| v.parse().expect("POLL_INTERVAL_MS must be a valid u64"))
            .unwrap_or(defaults.poll_interval_ms);

        let max_poll_attempts: u32 = std::env::var("MAX_POLL_ATTEMPTS")
            .map(|v| v.parse().expect("MAX_POLL_ATTEMPTS must be a valid u32"))
            .unwrap_or(defaults.max_poll_attempts);

        Self {
            api_token,
            api_url: std::env::var("REPLICATE_API_URL").unwrap_or(defaults.api_url),
            flux_version: std::env::var("FLUX_VERSION").unwrap_or(defaults.flux_version),
            rembg_version: std::env::var("REMBG_VERSION").unwrap_or(defaults.rembg_version),
            poll_interval_ms,
            max_poll_attempts,
        }
    }

    /// Pipeline settings derived from this configuration.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            flux_version: self.flux_version.clone(),
            rembg_version: self.rembg_version.clone(),
            poll: PollConfig {
                interval: Duration::from_millis(self.poll_interval_ms),
                max_attempts: self.max_poll_attempts,
            },
            removal: RemovalRetryConfig::default(),
        }
    }
}
