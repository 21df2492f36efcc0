// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Values are read once at startup and passed down explicitly; nothing
//! below `main` looks at the environment.

use std::env;
use std::path::PathBuf;

/// Env file read by the scheduled job, checked before `.env`.
pub const VARS_ENV_FILE: &str = "vars.env";

const DEFAULT_CALLBACK_URL: &str = "http://localhost:3000/fitbit";
const DEFAULT_FITBIT_API_URL: &str = "https://api.fitbit.com";
const DEFAULT_REFRESH_TOKEN_FILE: &str = "refreshToken.txt";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub fitbit: FitbitConfig,
    pub influx: InfluxConfig,
}

/// Fitbit OAuth client settings.
#[derive(Debug, Clone)]
pub struct FitbitConfig {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Redirect URI registered with the Fitbit application
    pub callback_url: String,
    /// One-time authorization code, only used when no refresh token is stored
    pub authorization_code: Option<String>,
    /// Base URL of the Fitbit Web API
    pub api_url: String,
    /// Where the current refresh token lives
    pub refresh_token_file: PathBuf,
}

/// InfluxDB v2 connection settings.
#[derive(Debug, Clone)]
pub struct InfluxConfig {
    pub url: String,
    pub token: String,
    /// Organization name
    pub org: String,
    pub bucket: String,
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            fitbit: FitbitConfig {
                client_id: "test_client_id".to_string(),
                client_secret: "test_secret".to_string(),
                callback_url: DEFAULT_CALLBACK_URL.to_string(),
                authorization_code: Some("test_code".to_string()),
                api_url: DEFAULT_FITBIT_API_URL.to_string(),
                refresh_token_file: PathBuf::from(DEFAULT_REFRESH_TOKEN_FILE),
            },
            influx: InfluxConfig {
                url: "http://localhost:8086".to_string(),
                token: "test_influx_token".to_string(),
                org: "test-org".to_string(),
                bucket: "test-bucket".to_string(),
            },
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `vars.env` and `.env` are loaded first if present; variables already
    /// set in the process environment win.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::from_filename(VARS_ENV_FILE).ok();
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Unset and empty values are treated the same.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let optional = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| optional(name).ok_or(ConfigError::Missing(name));

        Ok(Self {
            fitbit: FitbitConfig {
                client_id: required("FITBIT_CLIENT_ID")?,
                client_secret: required("FITBIT_CLIENT_SECRET")?.trim().to_string(),
                callback_url: optional("FITBIT_CALLBACK_URL")
                    .unwrap_or_else(|| DEFAULT_CALLBACK_URL.to_string()),
                authorization_code: optional("FITBIT_REFRESH_CODE"),
                api_url: optional("FITBIT_API_URL")
                    .unwrap_or_else(|| DEFAULT_FITBIT_API_URL.to_string()),
                refresh_token_file: optional("FITBIT_REFRESH_TOKEN_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_REFRESH_TOKEN_FILE)),
            },
            influx: InfluxConfig {
                url: required("INFLUXDB_URL")?,
                token: required("INFLUXDB_TOKEN")?.trim().to_string(),
                org: required("INFLUXDB_USER")?,
                bucket: required("INFLUXDB_BUCKET")?,
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
