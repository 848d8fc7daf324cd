// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Logged-in account profile.

use serde::{Deserialize, Serialize};

/// Account profile returned alongside the login tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User UUID
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// How the account signs in (e.g. "EMAIL")
    #[serde(default)]
    pub sign_in_type: Option<String>,
}
