// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local use.

use crate::language::LanguageCode;
use chrono::Duration;
use std::env;

/// Production GraphQL endpoint.
pub const DEFAULT_API_URL: &str = "https://graphql.app-api.prod.aws.mybirdbuddy.com/graphql";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Account email (optional; may be supplied at login time instead)
    pub email: Option<String>,
    /// Account password
    pub password: Option<String>,
    /// GraphQL endpoint
    pub api_url: String,
    /// Language for localized responses
    pub language: LanguageCode,
    /// Per-request HTTP timeout in seconds
    pub http_timeout_secs: u64,
    /// Fallback access token lifetime when the token has no readable expiry
    pub token_ttl_secs: i64,
    /// Margin subtracted from an expiry read from the token itself
    pub refresh_margin_secs: i64,
    /// Wait between feeder re-reads while a setting change is applied
    pub poll_interval_ms: u64,
}

impl Default for Config {
    /// Production endpoint, no credentials.
    fn default() -> Self {
        Self {
            email: None,
            password: None,
            api_url: DEFAULT_API_URL.to_string(),
            language: LanguageCode::default(),
            http_timeout_secs: 30,
            token_ttl_secs: 3600,
            refresh_margin_secs: 5 * 60,
            poll_interval_ms: 1000,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let email = non_empty_var("BIRDBUDDY_EMAIL");
        let password = non_empty_var("BIRDBUDDY_PASSWORD");
        match (&email, &password) {
            (Some(_), None) => return Err(ConfigError::Missing("BIRDBUDDY_PASSWORD")),
            (None, Some(_)) => return Err(ConfigError::Missing("BIRDBUDDY_EMAIL")),
            _ => {}
        }

        let language = match non_empty_var("BIRDBUDDY_LANGUAGE") {
            Some(tag) => LanguageCode::parse(&tag)
                .map_err(|e| ConfigError::Invalid("BIRDBUDDY_LANGUAGE", e.to_string()))?,
            None => LanguageCode::default(),
        };

        Ok(Self {
            email,
            password,
            api_url: env::var("BIRDBUDDY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            language,
            http_timeout_secs: parse_var("BIRDBUDDY_HTTP_TIMEOUT_SECS", 30)?,
            token_ttl_secs: parse_var("BIRDBUDDY_TOKEN_TTL_SECS", 3600)?,
            refresh_margin_secs: parse_var("BIRDBUDDY_REFRESH_MARGIN_SECS", 5 * 60)?,
            poll_interval_ms: parse_var("BIRDBUDDY_POLL_INTERVAL_MS", 1000)?,
        })
    }

    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.poll_interval_ms)
    }

    /// Token lifetime knobs handed to the session.
    pub fn session_policy(&self) -> SessionPolicy {
        SessionPolicy {
            token_ttl: Duration::seconds(self.token_ttl_secs),
            refresh_margin: Duration::seconds(self.refresh_margin_secs),
        }
    }
}

/// How the session derives an access token's expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Lifetime assumed for tokens without a readable `exp` claim
    pub token_ttl: Duration,
    /// Subtracted from a token's own `exp` so refresh happens early
    pub refresh_margin: Duration,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Config::default().session_policy()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match non_empty_var(name) {
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::Invalid(name, format!("cannot parse {raw:?}"))),
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
