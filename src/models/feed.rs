// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The account's activity feed (`me.feed`).

use super::collection::{Media, Species};
use super::null_as_default;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of feed item, from its `__typename`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FeedNodeType {
    #[serde(rename = "FeedGlobalImportantItem")]
    GlobalImportant,
    #[serde(rename = "FeedGlobalRegularItem")]
    GlobalRegular,
    #[serde(rename = "FeedItemFeederInvitationConfirmed")]
    InvitationConfirmed,
    #[serde(rename = "FeedItemFeederInvitationDeclined")]
    InvitationDeclined,
    #[serde(rename = "FeedItemFeederMemberDeleted")]
    MemberDeleted,
    #[serde(rename = "FeedItemMediaLiked")]
    MediaLiked,
    #[serde(rename = "FeedItemMysteryVisitorNotRecognized")]
    MysteryVisitorNotRecognized,
    #[serde(rename = "FeedItemMysteryVisitorResolved")]
    MysteryVisitorResolved,
    /// A new capture waiting to be turned into a sighting
    #[serde(rename = "FeedItemNewPostcard")]
    NewPostcard,
    #[serde(rename = "FeedItemSpeciesSighting")]
    SpeciesSighting,
    #[serde(rename = "FeedItemSpeciesUnlocked")]
    SpeciesUnlocked,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Collection referenced by a sighting or like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedCollection {
    pub id: String,
    #[serde(default)]
    pub species: Option<Species>,
}

/// One feed item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedNode {
    pub id: String,
    #[serde(rename = "__typename", default, deserialize_with = "null_as_default")]
    pub node_type: FeedNodeType,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub media: Option<Media>,
    #[serde(default)]
    pub collection: Option<FeedCollection>,
    #[serde(default)]
    pub feeder_name: Option<String>,
    #[serde(default)]
    pub number_of_likes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEdge {
    #[serde(default)]
    pub cursor: Option<String>,
    pub node: FeedNode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_next_page: bool,
    /// Cursor for the next, older, page
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// One page of the feed, newest items first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feed {
    #[serde(default, deserialize_with = "null_as_default")]
    pub edges: Vec<FeedEdge>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub page_info: PageInfo,
}

impl Feed {
    pub fn nodes(&self) -> impl Iterator<Item = &FeedNode> {
        self.edges.iter().map(|edge| &edge.node)
    }

    /// Newest item by `created_at`, whatever its position in the page.
    pub fn newest(&self) -> Option<&FeedNode> {
        self.nodes().max_by_key(|node| node.created_at)
    }

    pub fn end_cursor(&self) -> Option<&str> {
        self.page_info.end_cursor.as_deref()
    }

    /// Items of any of `types` (all types when empty) created strictly after
    /// `newer_than`.
    pub fn filter(
        &self,
        types: &[FeedNodeType],
        newer_than: Option<DateTime<Utc>>,
    ) -> Vec<FeedNode> {
        self.nodes()
            .filter(|node| types.is_empty() || types.contains(&node.node_type))
            .filter(|node| newer_than.map_or(true, |since| node.created_at > since))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn feed() -> Feed {
        serde_json::from_value(json!({
            "__typename": "FeedConnection",
            "edges": [
                {
                    "cursor": "c-2",
                    "node": {
                        "__typename": "FeedItemNewPostcard",
                        "id": "p-2",
                        "createdAt": "2026-05-01T09:30:00.000Z"
                    }
                },
                {
                    "cursor": "c-3",
                    "node": {
                        "__typename": "FeedItemSpeciesSighting",
                        "id": "s-1",
                        "createdAt": "2026-05-01T10:00:00.000Z",
                        "collection": {
                            "__typename": "CollectionBird",
                            "id": "col-1",
                            "species": { "__typename": "SpeciesBird", "id": "sp-1", "name": "Robin" }
                        },
                        "media": { "__typename": "MediaImage", "id": "m-1" }
                    }
                },
                {
                    "cursor": "c-1",
                    "node": {
                        "__typename": "FeedItemSomethingNew",
                        "id": "x-1",
                        "createdAt": "2026-04-30T12:00:00.000Z"
                    }
                }
            ],
            "pageInfo": { "hasNextPage": true, "endCursor": "c-1" }
        }))
        .unwrap()
    }

    #[test]
    fn test_decode_feed() {
        let feed = feed();
        assert_eq!(feed.edges.len(), 3);
        assert_eq!(feed.end_cursor(), Some("c-1"));
        assert!(feed.page_info.has_next_page);

        let sighting = &feed.edges[1].node;
        assert_eq!(sighting.node_type, FeedNodeType::SpeciesSighting);
        let species = sighting.collection.as_ref().unwrap().species.as_ref().unwrap();
        assert_eq!(species.name, "Robin");
        assert_eq!(feed.edges[2].node.node_type, FeedNodeType::Unknown);
    }

    #[test]
    fn test_newest_is_by_timestamp() {
        assert_eq!(feed().newest().unwrap().id, "s-1");
        assert!(Feed::default().newest().is_none());
    }

    #[test]
    fn test_filter() {
        let feed = feed();
        let postcards = feed.filter(&[FeedNodeType::NewPostcard], None);
        assert_eq!(postcards.len(), 1);
        assert_eq!(postcards[0].id, "p-2");

        let since = Utc.with_ymd_and_hms(2026, 5, 1, 9, 30, 0).unwrap();
        let fresh = feed.filter(&[], Some(since));
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].id, "s-1");

        assert_eq!(feed.filter(&[], None).len(), 3);
    }

    #[test]
    fn test_null_connection_fields() {
        let feed: Feed = serde_json::from_value(json!({ "edges": null, "pageInfo": null })).unwrap();
        assert!(feed.edges.is_empty());
        assert_eq!(feed.end_cursor(), None);
    }
}
