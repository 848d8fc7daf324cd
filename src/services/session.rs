// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication state for one client.
//!
//! The session holds the account credentials and the current token pair,
//! and knows how to:
//! - Exchange email/password for tokens
//! - Refresh an expired access token with the refresh token
//! - Fall back to a full login when the refresh token is missing or rejected
//!
//! Tokens are only overwritten after an exchange succeeds, so a failed or
//! cancelled exchange leaves the previous tokens in place.

use crate::config::SessionPolicy;
use crate::error::{AuthError, TransportError, ValidationError};
use crate::models::auth::{RefreshData, SignInData, SignInResult};
use crate::models::User;
use crate::queries;
use crate::services::transport::{decode, GraphqlRequest, Transport};
use crate::time_utils::from_unix_seconds;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode as decode_jwt, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::json;
use std::fmt;
use validator::Validate;

/// Email/password pair, checked before any network call.
#[derive(Clone, PartialEq, Eq, Validate)]
pub struct Credentials {
    #[validate(custom(function = "not_blank"))]
    email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    password: String,
}

impl Credentials {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let credentials = Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        };
        credentials
            .validate()
            .map_err(|e| ValidationError::InvalidCredentials(e.to_string()))?;
        Ok(credentials)
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"**REDACTED**")
            .finish()
    }
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut err = validator::ValidationError::new("blank");
        err.message = Some("email must not be empty".into());
        return Err(err);
    }
    Ok(())
}

/// Where the session stands at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No tokens were ever obtained.
    Unauthenticated,
    /// Access token present and not yet expired.
    Authenticated,
    /// Tokens present but the access token needs a refresh.
    Expired,
    /// The last refresh and re-login both failed.
    Invalid,
}

#[derive(Debug, Deserialize)]
struct ExpiryClaims {
    exp: i64,
}

/// Read the `exp` claim of a JWT access token without verifying it.
///
/// Returns `None` for opaque (non-JWT) tokens.
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.set_required_spec_claims(&["exp"]);

    let data =
        decode_jwt::<ExpiryClaims>(token, &DecodingKey::from_secret(&[]), &validation).ok()?;
    from_unix_seconds(data.claims.exp)
}

/// Token state machine for one account.
pub struct Session {
    policy: SessionPolicy,
    credentials: Option<Credentials>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    /// Set whenever `access_token` is set.
    expires_at: Option<DateTime<Utc>>,
    user: Option<User>,
    invalid: bool,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("credentials", &self.credentials)
            .field("has_access_token", &self.access_token.is_some())
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("expires_at", &self.expires_at)
            .field("invalid", &self.invalid)
            .finish()
    }
}

impl Session {
    /// Create an empty session.
    pub fn new(policy: SessionPolicy) -> Self {
        Self {
            policy,
            credentials: None,
            access_token: None,
            refresh_token: None,
            expires_at: None,
            user: None,
            invalid: false,
        }
    }

    /// Retain credentials for the first login and later fallbacks.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Resume from previously saved tokens.
    ///
    /// The access token's expiry is read from its claims when possible;
    /// otherwise it is treated as expired so the first use refreshes it.
    pub fn with_tokens(
        mut self,
        refresh_token: impl Into<String>,
        access_token: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        self.refresh_token = Some(refresh_token.into());
        if let Some(access) = access_token {
            self.expires_at = Some(token_expiry(&access).map_or(now, |exp| self.margin(exp, now)));
            self.access_token = Some(access);
        }
        self
    }

    pub fn state(&self, now: DateTime<Utc>) -> SessionState {
        if self.invalid {
            SessionState::Invalid
        } else if self.access_token.is_none() && self.refresh_token.is_none() {
            SessionState::Unauthenticated
        } else if self.is_expired(now) {
            SessionState::Expired
        } else {
            SessionState::Authenticated
        }
    }

    /// True when the access token must be renewed before use at `now`.
    ///
    /// A session that never obtained an expiry is always expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match (&self.access_token, self.expires_at) {
            (Some(_), Some(expires_at)) => now >= expires_at,
            _ => true,
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Profile returned by the last successful login.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Forget tokens, credentials and profile.
    pub fn logout(&mut self) {
        self.credentials = None;
        self.access_token = None;
        self.refresh_token = None;
        self.expires_at = None;
        self.user = None;
        self.invalid = false;
        tracing::info!("Session cleared");
    }

    /// Drop the access token if it is still `token`.
    ///
    /// Used when the service rejects a token before its computed expiry.
    /// Returns false when another caller already replaced it.
    pub fn invalidate_access_token(&mut self, token: &str) -> bool {
        if self.access_token.as_deref() != Some(token) {
            return false;
        }
        self.access_token = None;
        self.expires_at = None;
        true
    }

    /// Exchange credentials for a fresh token pair.
    ///
    /// On success the credentials are retained for later re-login.
    pub async fn login<T: Transport + ?Sized>(
        &mut self,
        transport: &T,
        credentials: Credentials,
        now: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        tracing::debug!(email = %credentials.email, "Logging in");

        let request = GraphqlRequest::new(queries::SIGN_IN).with_variable(
            "emailSignInInput",
            json!({
                "email": &credentials.email,
                "password": &credentials.password,
            }),
        );

        let result = match transport.execute(request).await {
            Ok(data) => decode::<SignInData>(data).map_err(AuthError::Transport)?.result,
            Err(e) => {
                tracing::warn!(error = %e, "Login failed");
                return Err(exchange_error(e));
            }
        };

        let auth = match result {
            SignInResult::Auth(auth) => auth,
            SignInResult::Problem(problem) if problem.is_sso_only() => {
                tracing::warn!("Account requires single sign-on");
                return Err(AuthError::SsoOnly);
            }
            SignInResult::Problem(problem) => {
                let summary = problem.summary();
                tracing::warn!(problem = %summary, "Login rejected");
                return Err(AuthError::Rejected(summary));
            }
        };

        self.expires_at = Some(self.expiry_for(&auth.access_token, now));
        self.access_token = Some(auth.access_token);
        self.refresh_token = Some(auth.refresh_token);
        self.user = auth.me.and_then(|me| me.user);
        self.credentials = Some(credentials);
        self.invalid = false;

        tracing::info!(expires_at = ?self.expires_at, "Logged in");
        Ok(())
    }

    /// Renew the access token if it is expired at `now`.
    ///
    /// Tries the refresh token first, then a full login with the retained
    /// credentials. Does nothing when the token is still valid.
    pub async fn refresh<T: Transport + ?Sized>(
        &mut self,
        transport: &T,
        now: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        if !self.is_expired(now) {
            return Ok(());
        }

        let mut refresh_error = None;
        if let Some(refresh_token) = self.refresh_token.clone() {
            match self.exchange_refresh_token(transport, &refresh_token, now).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(error = %e, "Token refresh failed, falling back to login");
                    refresh_error = Some(e);
                }
            }
        }

        let Some(credentials) = self.credentials.clone() else {
            let err = refresh_error.unwrap_or(AuthError::NoCredentials);
            self.mark_failed(&err);
            return Err(err);
        };

        let result = self.login(transport, credentials, now).await;
        if let Err(e) = &result {
            self.mark_failed(e);
        }
        result
    }

    /// An exchange that never got an answer leaves the state as it was;
    /// only a definite rejection makes the session invalid.
    fn mark_failed(&mut self, err: &AuthError) {
        if !matches!(err, AuthError::Transport(_)) {
            self.invalid = true;
        }
    }

    /// Log in if never authenticated, otherwise refresh when expired.
    pub async fn ensure_valid<T: Transport + ?Sized>(
        &mut self,
        transport: &T,
        now: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        if self.access_token.is_none() && self.refresh_token.is_none() {
            tracing::debug!("Login required");
            let credentials = self.credentials.clone().ok_or(AuthError::NoCredentials)?;
            return self.login(transport, credentials, now).await;
        }
        self.refresh(transport, now).await
    }

    async fn exchange_refresh_token<T: Transport + ?Sized>(
        &mut self,
        transport: &T,
        refresh_token: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        tracing::debug!("Access token needs to be refreshed");

        let request = GraphqlRequest::new(queries::REFRESH_AUTH_TOKEN)
            .with_variable("refreshTokenInput", json!({ "token": refresh_token }));

        let data = transport.execute(request).await.map_err(exchange_error)?;
        let tokens = decode::<RefreshData>(data)
            .map_err(AuthError::Transport)?
            .tokens;

        let access_token = tokens.access_token.ok_or_else(|| {
            AuthError::Rejected("refresh response carried no access token".to_string())
        })?;

        self.expires_at = Some(self.expiry_for(&access_token, now));
        self.access_token = Some(access_token);
        if let Some(rotated) = tokens.refresh_token {
            self.refresh_token = Some(rotated);
        }
        self.invalid = false;

        tracing::info!(expires_at = ?self.expires_at, "Access token refreshed");
        Ok(())
    }

    fn expiry_for(&self, access_token: &str, now: DateTime<Utc>) -> DateTime<Utc> {
        match token_expiry(access_token) {
            Some(exp) => self.margin(exp, now),
            None => now + self.policy.token_ttl,
        }
    }

    /// Pull an expiry forward by the refresh margin, but not into the past.
    fn margin(&self, exp: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
        let early = exp - self.policy.refresh_margin;
        if early > now {
            early
        } else {
            exp
        }
    }
}

/// GraphQL errors on the auth mutations are rejections; anything else means
/// the exchange never completed.
fn exchange_error(err: TransportError) -> AuthError {
    match err {
        TransportError::Graphql { message, .. } => AuthError::Rejected(message),
        other => AuthError::Transport(other),
    }
}
