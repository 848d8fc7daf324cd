// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Payloads of the sign-in and token refresh mutations.

use super::User;
use serde::Deserialize;

/// Data of the `emailSignIn` mutation.
#[derive(Debug, Clone, Deserialize)]
pub struct SignInData {
    #[serde(rename = "authEmailSignIn")]
    pub result: SignInResult,
}

/// The sign-in mutation answers with either tokens or a problem report.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "__typename")]
pub enum SignInResult {
    Auth(AuthPayload),
    Problem(ProblemPayload),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub me: Option<AuthMe>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthMe {
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProblemPayload {
    #[serde(default)]
    pub items: Vec<ProblemItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProblemItem {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
}

impl ProblemPayload {
    /// The account exists but signs in through a third-party provider.
    pub fn is_sso_only(&self) -> bool {
        self.items.iter().any(|item| {
            item.kind
                .as_deref()
                .is_some_and(|kind| kind.contains("SSO") || kind.contains("SOCIAL"))
        })
    }

    /// `field: kind` pairs joined for error messages.
    pub fn summary(&self) -> String {
        if self.items.is_empty() {
            return "sign-in problem".to_string();
        }
        self.items
            .iter()
            .map(|item| {
                format!(
                    "{}: {}",
                    item.field.as_deref().unwrap_or("?"),
                    item.kind.as_deref().unwrap_or("?")
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Data of the `authRefreshToken` mutation.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshData {
    #[serde(rename = "authRefreshToken")]
    pub tokens: RefreshPayload,
}

/// Refresh tokens rotate; a missing refresh token keeps the old one.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshPayload {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}
