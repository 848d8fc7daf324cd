// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for the Bird Buddy client.
//!
//! Three families surface to callers: [`AuthError`] when the service will not
//! hand out tokens, [`TransportError`] when a request could not be completed
//! or decoded, and [`ValidationError`] for bad input caught before any
//! request is made.

/// Service error code sent when the bearer token is no longer accepted.
pub const AUTH_TOKEN_EXPIRED_CODE: &str = "AUTH_TOKEN_EXPIRED_ERROR";

/// Sent when a firmware update is requested while one is already running.
pub const FIRMWARE_UPDATE_IN_PROGRESS_CODE: &str = "FEEDER_FIRMWARE_UPGRADE_ALREADY_IN_PROGRESS";

/// Input rejected locally, before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Language code must not be empty")]
    EmptyLanguageCode,

    #[error("Invalid language code {tag:?}: {reason}")]
    InvalidLanguageCode { tag: String, reason: String },

    #[error("{field} cannot be set to {value}")]
    UnsupportedValue { field: &'static str, value: String },
}

/// A GraphQL request that could not be completed or understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Empty response")]
    NoResponse,

    #[error(
        "GraphQL error {}: {message}{}",
        .code.as_deref().unwrap_or("<none>"),
        more_errors(.others)
    )]
    Graphql {
        code: Option<String>,
        message: String,
        /// Messages of any further errors in the same response.
        others: Vec<String>,
    },
}

fn more_errors(others: &[String]) -> String {
    if others.is_empty() {
        String::new()
    } else {
        format!(" (also: {})", others.join("; "))
    }
}

impl TransportError {
    /// Service error code, for GraphQL errors that carry one.
    pub fn graphql_code(&self) -> Option<&str> {
        match self {
            TransportError::Graphql { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// True when the service rejected the bearer token as expired.
    pub fn is_token_expired(&self) -> bool {
        self.graphql_code() == Some(AUTH_TOKEN_EXPIRED_CODE)
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return TransportError::Timeout;
        }
        if err.is_decode() {
            return TransportError::Decode(err.to_string());
        }
        TransportError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Decode(err.to_string())
    }
}

/// The session could not obtain a usable access token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Authentication rejected: {0}")]
    Rejected(String),

    #[error("Account uses single sign-on; only email/password login is supported")]
    SsoOnly,

    #[error("No credentials available to log in")]
    NoCredentials,

    #[error("Authentication exchange failed: {0}")]
    Transport(#[source] TransportError),
}

/// Top-level error returned by the client facade.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Auth(AuthError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<AuthError> for Error {
    fn from(err: AuthError) -> Self {
        match err {
            // The exchange never got an answer; callers decide on retries.
            AuthError::Transport(e) => Error::Transport(e),
            other => Error::Auth(other),
        }
    }
}

impl Error {
    /// True when the caller should prompt for fresh credentials.
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth(_))
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;
