// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use birdbuddy::error::{
    AuthError, Error, TransportError, ValidationError, AUTH_TOKEN_EXPIRED_CODE,
};

#[test]
fn test_is_token_expired_matches() {
    let err = TransportError::Graphql {
        code: Some(AUTH_TOKEN_EXPIRED_CODE.to_string()),
        message: "Token expired".to_string(),
        others: Vec::new(),
    };
    assert!(err.is_token_expired());
}

#[test]
fn test_is_token_expired_no_match() {
    let err = TransportError::Graphql {
        code: Some("FORBIDDEN".to_string()),
        message: "Token expired".to_string(),
        others: Vec::new(),
    };
    assert!(!err.is_token_expired());

    let err = TransportError::Graphql {
        code: None,
        message: AUTH_TOKEN_EXPIRED_CODE.to_string(),
        others: Vec::new(),
    };
    assert!(!err.is_token_expired());

    let err = TransportError::Status {
        status: 401,
        body: AUTH_TOKEN_EXPIRED_CODE.to_string(),
    };
    assert!(!err.is_token_expired());
}

#[test]
fn test_exchange_transport_failure_surfaces_as_transport() {
    let err: Error = AuthError::Transport(TransportError::Timeout).into();
    assert_eq!(err, Error::Transport(TransportError::Timeout));
    assert!(!err.is_auth());

    let err: Error = AuthError::SsoOnly.into();
    assert_eq!(err, Error::Auth(AuthError::SsoOnly));
    assert!(err.is_auth());
}

#[test]
fn test_error_messages() {
    assert_eq!(
        Error::from(ValidationError::EmptyField("collection_id")).to_string(),
        "collection_id must not be empty"
    );
    assert_eq!(
        TransportError::Graphql {
            code: None,
            message: "boom".to_string(),
            others: Vec::new(),
        }
        .to_string(),
        "GraphQL error <none>: boom"
    );
    assert_eq!(
        TransportError::Graphql {
            code: Some("NOT_FOUND".to_string()),
            message: "boom".to_string(),
            others: vec!["bang".to_string(), "crash".to_string()],
        }
        .to_string(),
        "GraphQL error NOT_FOUND: boom (also: bang; crash)"
    );
    assert_eq!(
        Error::from(AuthError::Rejected("password: INVALID".to_string())).to_string(),
        "Authentication rejected: password: INVALID"
    );
    assert_eq!(
        TransportError::Status {
            status: 503,
            body: "unavailable".to_string()
        }
        .to_string(),
        "HTTP 503: unavailable"
    );
}
