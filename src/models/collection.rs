// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Species collections and their media.

use crate::time_utils::from_unix_seconds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `__typename` of collections that belong to an identified species.
pub const BIRD_COLLECTION_TYPENAME: &str = "CollectionBird";

/// A bird species, with its name localized in the client's language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    /// Species id or code
    pub id: String,
    pub name: String,
}

/// Image or video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// One captured image or video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: String,
    #[serde(rename = "__typename", default)]
    pub typename: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Signed thumbnail URL; carries its own `Expires` parameter
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub content_url: Option<String>,
}

impl Media {
    pub fn kind(&self) -> MediaKind {
        match self.typename.as_deref() {
            Some("MediaVideo") => MediaKind::Video,
            _ => MediaKind::Image,
        }
    }

    pub fn is_video(&self) -> bool {
        self.kind() == MediaKind::Video
    }

    /// Whether the signed thumbnail URL has expired at `now`.
    ///
    /// `None` when the URL is missing or carries no expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> Option<bool> {
        let url = reqwest::Url::parse(self.thumbnail_url.as_deref()?).ok()?;
        let expires = url
            .query_pairs()
            .find(|(key, _)| key == "Expires")
            .and_then(|(_, value)| value.parse::<i64>().ok())
            .and_then(from_unix_seconds)?;
        Some(expires < now)
    }
}

/// The cover shown for a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionMedia {
    /// Feeder that captured the cover
    #[serde(default)]
    pub feeder_name: Option<String>,
    pub media: Media,
}

/// Sightings of one species, keyed by collection id in the client cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collection {
    pub id: String,
    pub species: Species,
    pub visits_all_time: u64,
    pub visit_last_time: Option<DateTime<Utc>>,
    pub cover: Option<CollectionMedia>,
}

impl Collection {
    pub fn bird_name(&self) -> &str {
        &self.species.name
    }

    /// Cover media has a signed URL that is already expired.
    pub fn is_cover_expired(&self, now: DateTime<Utc>) -> bool {
        self.cover
            .as_ref()
            .and_then(|cover| cover.media.is_expired(now))
            .unwrap_or(false)
    }
}

/// Raw `me.collections` entry; mystery visitors carry no species.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionNode {
    #[serde(rename = "__typename", default)]
    pub typename: Option<String>,
    pub id: String,
    #[serde(default)]
    pub species: Option<Species>,
    #[serde(default)]
    pub visits_all_time: Option<u64>,
    #[serde(default)]
    pub visit_last_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cover_collection_media: Option<CollectionMedia>,
}

impl CollectionNode {
    /// Convert a bird collection; other collection kinds yield `None`.
    pub fn into_bird_collection(self) -> Option<Collection> {
        if self.typename.as_deref() != Some(BIRD_COLLECTION_TYPENAME) {
            return None;
        }
        Some(Collection {
            id: self.id,
            species: self.species?,
            visits_all_time: self.visits_all_time.unwrap_or(0),
            visit_last_time: self.visit_last_time,
            cover: self.cover_collection_media,
        })
    }
}
