// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Bird Buddy: client for the Bird Buddy smart feeder GraphQL API
//!
//! This crate logs in to a Bird Buddy account, keeps the access token fresh
//! on demand, and fetches the account's feeders and bird collections as
//! typed records.

pub mod client;
pub mod config;
pub mod error;
pub mod language;
pub mod models;
pub mod queries;
pub mod services;
pub mod time_utils;

pub use client::BirdBuddy;
pub use config::Config;
pub use error::{AuthError, Error, Result, TransportError, ValidationError};
pub use language::LanguageCode;
pub use services::{Credentials, HttpTransport, Session, SessionState, Transport};
