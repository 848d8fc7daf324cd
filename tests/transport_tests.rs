// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

mod common;

use birdbuddy::config::Config;
use birdbuddy::error::{Error, TransportError};
use birdbuddy::queries;
use birdbuddy::services::{GraphqlRequest, HttpTransport, Transport};
use birdbuddy::{BirdBuddy, LanguageCode};
use common::*;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn transport_for(server: &MockServer) -> HttpTransport {
    HttpTransport::new(format!("{}/graphql", server.uri()), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_request_headers_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "Bearer access-1"))
        .and(header("accept-language", "de"))
        .and(body_partial_json(json!({
            "operationName": "meFeeders",
            "variables": {}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(feeders_data_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server).await;
    let request = GraphqlRequest::new(queries::FEEDERS)
        .with_auth_token("access-1")
        .with_language(LanguageCode::parse("de").unwrap());

    let data = transport.execute(request).await.unwrap();

    assert_eq!(data["me"]["feeders"][0]["id"], "f-1");
    let received = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert!(body["query"].as_str().unwrap().contains("query meFeeders"));
}

#[tokio::test]
async fn test_no_auth_header_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": sign_in_data("access-1", "refresh-1") })),
        )
        .mount(&server)
        .await;

    let transport = transport_for(&server).await;
    transport
        .execute(GraphqlRequest::new(queries::SIGN_IN))
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    assert!(!received[0].headers.contains_key("authorization"));
    assert!(!received[0].headers.contains_key("accept-language"));
}

#[tokio::test]
async fn test_http_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .await
        .execute(GraphqlRequest::new(queries::FEEDERS))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        TransportError::Status {
            status: 502,
            body: "Bad Gateway".to_string()
        }
    );
}

#[tokio::test]
async fn test_graphql_error_in_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": [{
                "message": "Token expired",
                "extensions": { "code": "AUTH_TOKEN_EXPIRED_ERROR" }
            }]
        })))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .await
        .execute(GraphqlRequest::new(queries::FEEDERS))
        .await
        .unwrap_err();

    assert!(err.is_token_expired());
}

#[tokio::test]
async fn test_graphql_error_with_ok_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "Collection not found" }]
        })))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .await
        .execute(GraphqlRequest::new(queries::COLLECTION_MEDIA))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        TransportError::Graphql {
            code: None,
            message: "Collection not found".to_string(),
            others: Vec::new(),
        }
    );
}

#[tokio::test]
async fn test_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .await
        .execute(GraphqlRequest::new(queries::FEEDERS))
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Decode(_)));
}

#[tokio::test]
async fn test_request_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(feeders_data_envelope())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let transport =
        HttpTransport::new(format!("{}/graphql", server.uri()), Duration::from_millis(100))
            .unwrap();
    let err = transport
        .execute(GraphqlRequest::new(queries::FEEDERS))
        .await
        .unwrap_err();

    assert_eq!(err, TransportError::Timeout);
}

#[tokio::test]
async fn test_unreachable_endpoint() {
    let transport =
        HttpTransport::new("http://127.0.0.1:9/graphql", Duration::from_secs(2)).unwrap();

    let err = transport
        .execute(GraphqlRequest::new(queries::FEEDERS))
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Http(_) | TransportError::Timeout));
}

#[tokio::test]
async fn test_client_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "operationName": "emailSignIn" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": sign_in_data("access-1", "refresh-1") })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "operationName": "meFeeders" })))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feeders_data_envelope()))
        .expect(2)
        .mount(&server)
        .await;

    let config = Config {
        api_url: format!("{}/graphql", server.uri()),
        ..test_config()
    };
    let client = BirdBuddy::from_config(&config).unwrap();

    let feeders = client.refresh_feeders().await.unwrap();
    assert_eq!(feeders.len(), 3);
    client.refresh_feeders().await.unwrap();

    let received = server.received_requests().await.unwrap();
    let sign_in: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(sign_in["variables"]["emailSignInInput"]["email"], EMAIL);
}

#[tokio::test]
async fn test_client_over_http_rejected_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "Wrong email or password" }]
        })))
        .mount(&server)
        .await;

    let config = Config {
        api_url: format!("{}/graphql", server.uri()),
        ..test_config()
    };
    let client = BirdBuddy::from_config(&config).unwrap();

    let err = client.refresh_feeders().await.unwrap_err();
    assert!(err.is_auth());
    assert!(!matches!(err, Error::Transport(_)));
}

fn feeders_data_envelope() -> Value {
    json!({ "data": feeders_data() })
}
