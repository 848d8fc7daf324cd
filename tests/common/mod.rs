// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use birdbuddy::config::Config;
use birdbuddy::error::{TransportError, AUTH_TOKEN_EXPIRED_CODE};
use birdbuddy::services::{GraphqlRequest, Transport};
use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

pub const EMAIL: &str = "user@email.com";
pub const PASSWORD: &str = "Pa$$w0rd";

pub type Reply = Result<Value, TransportError>;

/// Scripted in-memory transport.
///
/// Replies are looked up by operation name: queued replies first, then the
/// standing reply for that operation.
#[derive(Default)]
pub struct MockTransport {
    state: Mutex<MockState>,
    delay: Option<Duration>,
}

#[derive(Default)]
struct MockState {
    queued: HashMap<&'static str, VecDeque<Reply>>,
    standing: HashMap<&'static str, Reply>,
    requests: Vec<GraphqlRequest>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every reply, to widen race windows.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Reply once to the next request for `operation`.
    pub fn push(&self, operation: &'static str, reply: Reply) {
        self.state
            .lock()
            .unwrap()
            .queued
            .entry(operation)
            .or_default()
            .push_back(reply);
    }

    /// Reply to every request for `operation` once the queue is empty.
    pub fn always(&self, operation: &'static str, reply: Reply) {
        self.state.lock().unwrap().standing.insert(operation, reply);
    }

    pub fn requests(&self) -> Vec<GraphqlRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_for(&self, operation: &str) -> Vec<GraphqlRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.operation.name == operation)
            .collect()
    }

    pub fn calls(&self, operation: &str) -> usize {
        self.requests_for(operation).len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: GraphqlRequest) -> Result<Value, TransportError> {
        let name = request.operation.name;
        let reply = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(request);
            match state.queued.get_mut(name).and_then(VecDeque::pop_front) {
                Some(reply) => reply,
                None => state
                    .standing
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| Err(TransportError::Http(format!("no reply for {name}")))),
            }
        };
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        reply
    }
}

/// Config carrying the test account.
#[allow(dead_code)]
pub fn test_config() -> Config {
    Config {
        email: Some(EMAIL.to_string()),
        password: Some(PASSWORD.to_string()),
        poll_interval_ms: 1,
        ..Config::default()
    }
}

/// JWT signed with a throwaway key whose `exp` claim is `exp`.
#[allow(dead_code)]
pub fn jwt_expiring_at(exp: DateTime<Utc>) -> String {
    encode(
        &Header::default(),
        &json!({ "sub": "u-1", "exp": exp.timestamp() }),
        &EncodingKey::from_secret(b"test-secret"),
    )
    .expect("Failed to encode test token")
}

#[allow(dead_code)]
pub fn sign_in_data(access_token: &str, refresh_token: &str) -> Value {
    json!({
        "authEmailSignIn": {
            "__typename": "Auth",
            "accessToken": access_token,
            "refreshToken": refresh_token,
            "me": {
                "__typename": "Me",
                "user": {
                    "__typename": "User",
                    "id": "u-1",
                    "name": "Robin",
                    "email": EMAIL,
                    "avatarUrl": null,
                    "signInType": "EMAIL"
                }
            }
        }
    })
}

#[allow(dead_code)]
pub fn problem_data(field: &str, kind: &str) -> Value {
    json!({
        "authEmailSignIn": {
            "__typename": "Problem",
            "items": [{ "__typename": "ProblemItem", "field": field, "kind": kind }]
        }
    })
}

#[allow(dead_code)]
pub fn refresh_data(access_token: &str, refresh_token: Option<&str>) -> Value {
    json!({
        "authRefreshToken": {
            "__typename": "AuthTokens",
            "accessToken": access_token,
            "refreshToken": refresh_token
        }
    })
}

#[allow(dead_code)]
pub fn token_expired() -> TransportError {
    TransportError::Graphql {
        code: Some(AUTH_TOKEN_EXPIRED_CODE.to_string()),
        message: "Token expired".to_string(),
        others: Vec::new(),
    }
}

#[allow(dead_code)]
pub fn feeders_data() -> Value {
    json!({
        "me": {
            "__typename": "Me",
            "feeders": [
                {
                    "__typename": "FeederForOwner",
                    "id": "f-1",
                    "name": "Backyard",
                    "battery": { "charging": true, "percentage": 87, "state": "HIGH", "__typename": "FeederBattery" },
                    "food": { "state": "LOW", "__typename": "FeederFood" },
                    "signal": { "state": "MEDIUM", "value": -61, "__typename": "FeederSignal" },
                    "state": "READY_TO_STREAM",
                    "temperature": { "value": 18, "__typename": "FeederTemperature" },
                    "serialNumber": "BB-0001",
                    "firmwareVersion": "1.2.0",
                    "availableFirmwareVersion": "1.3.0",
                    "offGrid": false,
                    "audioEnabled": true,
                    "powerProfile": "STANDARD_MODE"
                },
                {
                    "__typename": "FeederForMember",
                    "id": "f-2",
                    "name": null,
                    "battery": null,
                    "food": { "state": "HIGH", "__typename": "FeederFood" },
                    "signal": null,
                    "state": "OFFLINE",
                    "temperature": null,
                    "locationCity": "Wien",
                    "locationCountry": "AT",
                    "ownerName": "Alex"
                },
                {
                    "__typename": "FeederForMemberPending",
                    "id": "f-3",
                    "name": "Invited"
                }
            ]
        }
    })
}

#[allow(dead_code)]
pub fn bird_collection(id: &str, species: &str, thumbnail_expires: i64) -> Value {
    json!({
        "__typename": "CollectionBird",
        "id": id,
        "visitsAllTime": 4,
        "visitLastTime": "2026-04-30T08:15:00.000Z",
        "species": { "__typename": "SpeciesBird", "id": format!("s-{id}"), "name": species },
        "coverCollectionMedia": {
            "__typename": "CollectionMedia",
            "feederName": "Backyard",
            "media": {
                "__typename": "MediaImage",
                "id": format!("m-{id}"),
                "createdAt": "2026-04-30T08:15:00.000Z",
                "thumbnailUrl": format!("https://media.example.com/{id}.jpg?Expires={thumbnail_expires}"),
                "contentUrl": format!("https://media.example.com/{id}-full.jpg?Expires={thumbnail_expires}")
            }
        }
    })
}

#[allow(dead_code)]
pub fn collections_data(collections: Vec<Value>) -> Value {
    json!({ "me": { "__typename": "Me", "collections": collections } })
}

#[allow(dead_code)]
pub fn mystery_visitor(id: &str) -> Value {
    json!({
        "__typename": "CollectionMysteryVisitor",
        "id": id,
        "visitsAllTime": 1,
        "visitLastTime": "2026-04-29T06:00:00.000Z",
        "coverCollectionMedia": null
    })
}

/// Unix timestamp one day from now, for signed URLs that are still valid.
#[allow(dead_code)]
pub fn tomorrow() -> i64 {
    (Utc::now() + chrono::Duration::days(1)).timestamp()
}

#[allow(dead_code)]
pub fn feed_node(typename: &str, id: &str, created_at: &str) -> Value {
    json!({ "__typename": typename, "id": id, "createdAt": created_at })
}

#[allow(dead_code)]
pub fn feed_data(nodes: Vec<Value>, end_cursor: Option<&str>) -> Value {
    let edges: Vec<Value> = nodes
        .into_iter()
        .map(|node| {
            json!({
                "__typename": "FeedEdge",
                "cursor": format!("cursor-{}", node["id"].as_str().unwrap_or_default()),
                "node": node
            })
        })
        .collect();
    json!({
        "me": {
            "__typename": "Me",
            "feed": {
                "__typename": "FeedConnection",
                "edges": edges,
                "pageInfo": {
                    "__typename": "PageInfo",
                    "hasNextPage": end_cursor.is_some(),
                    "endCursor": end_cursor
                }
            }
        }
    })
}

/// Report token (plain JSON) ranking candidates for match token `m-2`.
#[allow(dead_code)]
pub fn report_token(tag: &str) -> String {
    json!({
        "tag": tag,
        "reportItems": [{
            "matchToken": "m-2",
            "items": [
                { "confidence": 72, "speciesCode": "sp-crow", "type": "BIRD" },
                { "confidence": 12, "speciesCode": "sp-jay", "type": "BIRD" }
            ]
        }]
    })
    .to_string()
}

/// One unlocked species plus one sighting the service could not decide on.
#[allow(dead_code)]
pub fn sighting_report(token: &str) -> Value {
    json!({
        "__typename": "SightingReport",
        "reportToken": token,
        "sightings": [
            {
                "__typename": "SightingRecognizedBirdUnlocked",
                "id": "s-1",
                "matchTokens": ["m-1"],
                "species": { "__typename": "SpeciesBird", "id": "sp-wren", "name": "Carolina Wren" }
            },
            {
                "__typename": "SightingCantDecideWhichBird",
                "id": "s-2",
                "matchTokens": ["m-2"],
                "suggestions": []
            }
        ]
    })
}

#[allow(dead_code)]
pub fn postcard_sighting_data(token: &str) -> Value {
    json!({
        "sightingCreateFromPostcard": {
            "__typename": "SightingCreateFromPostcardResult",
            "feeder": { "__typename": "FeederForOwner", "id": "f-1", "name": "Backyard" },
            "medias": [
                { "__typename": "MediaImage", "id": "img-1" },
                { "__typename": "MediaImage", "id": "img-2" }
            ],
            "videoMedia": { "__typename": "MediaVideo", "id": "vid-1" },
            "sightingReport": sighting_report(token)
        }
    })
}

#[allow(dead_code)]
pub fn success_data(field: &str, success: bool) -> Value {
    json!({ field: { "__typename": "Result", "success": success } })
}

/// Reply to a toggle or power-profile mutation.
#[allow(dead_code)]
pub fn setting_change(mutation: &str, typename: &str, setting: &str, value: Value) -> Value {
    json!({ mutation: { "__typename": typename, "feeder": { setting: value } } })
}

/// `feeders_data` with one field of the owner feeder replaced.
#[allow(dead_code)]
pub fn feeders_data_with(field: &str, value: Value) -> Value {
    let mut data = feeders_data();
    data["me"]["feeders"][0][field] = value;
    data
}

#[allow(dead_code)]
pub fn firmware_status(mutation: &str, status: Value) -> Value {
    json!({ mutation: status })
}
