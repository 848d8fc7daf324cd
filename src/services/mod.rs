// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - session and transport layer.

pub mod session;
pub mod transport;

pub use session::{token_expiry, Credentials, Session, SessionState};
pub use transport::{decode, GraphqlRequest, HttpTransport, Transport};
