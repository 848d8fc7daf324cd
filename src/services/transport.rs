// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GraphQL transport: one request in, the `data` object out.
//!
//! Handles:
//! - Bearer auth and `Accept-Language` headers
//! - HTTP status and GraphQL `errors` mapping to [`TransportError`]
//! - Redacted request logging for the auth mutations

use crate::config::Config;
use crate::error::TransportError;
use crate::language::LanguageCode;
use crate::queries::Operation;
use async_trait::async_trait;
use reqwest::header::ACCEPT_LANGUAGE;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::time::Duration;

const REDACTED: &str = "**REDACTED**";

/// A single GraphQL request.
#[derive(Clone)]
pub struct GraphqlRequest {
    pub operation: Operation,
    pub variables: Map<String, Value>,
    pub auth_token: Option<String>,
    pub language: Option<LanguageCode>,
}

impl GraphqlRequest {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            variables: Map::new(),
            auth_token: None,
            language: None,
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: Value) -> Self {
        self.variables.insert(name.into(), value);
        self
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_language(mut self, language: LanguageCode) -> Self {
        self.language = Some(language);
        self
    }

    /// Request body as posted to the endpoint.
    pub fn body(&self) -> Value {
        serde_json::json!({
            "operationName": self.operation.name,
            "query": self.operation.document.trim(),
            "variables": self.variables,
        })
    }
}

impl fmt::Debug for GraphqlRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variables: &dyn fmt::Debug = if self.operation.sensitive {
            &REDACTED
        } else {
            &self.variables
        };
        f.debug_struct("GraphqlRequest")
            .field("operation", &self.operation.name)
            .field("variables", variables)
            .field("auth_token", &self.auth_token.as_ref().map(|_| REDACTED))
            .field("language", &self.language)
            .finish()
    }
}

/// Executes GraphQL requests against the service.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a request and return the unwrapped `data` object.
    async fn execute(&self, request: GraphqlRequest) -> Result<Value, TransportError>;
}

/// Decode a `data` object into a typed record.
pub fn decode<T: DeserializeOwned>(data: Value) -> Result<T, TransportError> {
    serde_json::from_value(data).map_err(|e| TransportError::Decode(e.to_string()))
}

/// GraphQL-over-HTTP transport.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        Self::new(
            config.api_url.clone(),
            Duration::from_secs(config.http_timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: GraphqlRequest) -> Result<Value, TransportError> {
        tracing::debug!(request = ?request, "> GraphQL");

        let mut builder = self.http.post(&self.endpoint).json(&request.body());
        if let Some(token) = &request.auth_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(language) = &request.language {
            builder = builder.header(ACCEPT_LANGUAGE, language.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // Error bodies often still carry GraphQL errors worth surfacing.
            if let Ok(body) = serde_json::from_str::<Value>(&text) {
                if let Some(err) = graphql_error(&body) {
                    return Err(err);
                }
            }
            tracing::warn!(status = %status, operation = request.operation.name, "GraphQL HTTP error");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let body: Value = serde_json::from_str(&text)?;
        let data = unwrap_response(body)?;

        if request.operation.sensitive {
            tracing::trace!(operation = request.operation.name, response = REDACTED, "< GraphQL");
        } else {
            tracing::trace!(operation = request.operation.name, response = %data, "< GraphQL");
        }
        Ok(data)
    }
}

#[derive(Debug, Deserialize)]
struct WireError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    extensions: Option<WireExtensions>,
}

#[derive(Debug, Deserialize)]
struct WireExtensions {
    #[serde(default)]
    code: Option<String>,
}

fn wire_error(value: &Value) -> WireError {
    serde_json::from_value(value.clone()).unwrap_or_else(|_| WireError {
        message: value.to_string(),
        extensions: None,
    })
}

/// The first error decides the code; the rest are kept as messages.
fn graphql_error(body: &Value) -> Option<TransportError> {
    let errors = body.get("errors")?.as_array()?;
    let (first, rest) = errors.split_first()?;
    let first = wire_error(first);
    let others: Vec<String> = rest.iter().map(|e| wire_error(e).message).collect();
    if !others.is_empty() {
        tracing::debug!(count = errors.len(), others = ?others, "GraphQL response carried several errors");
    }
    Some(TransportError::Graphql {
        code: first.extensions.and_then(|ext| ext.code),
        message: first.message,
        others,
    })
}

/// Check a GraphQL response envelope and return its `data` object.
pub fn unwrap_response(body: Value) -> Result<Value, TransportError> {
    if !body.is_object() {
        return Err(TransportError::NoResponse);
    }
    if let Some(err) = graphql_error(&body) {
        return Err(err);
    }
    match body {
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(data @ Value::Object(_)) => Ok(data),
            Some(Value::Null) | None => Err(TransportError::NoResponse),
            Some(other) => Err(TransportError::Decode(format!(
                "expected data object, got {other}"
            ))),
        },
        _ => Err(TransportError::NoResponse),
    }
}
