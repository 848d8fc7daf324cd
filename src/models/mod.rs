// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed records decoded from GraphQL responses.

pub mod auth;
pub mod collection;
pub mod feed;
pub mod feeder;
pub mod feeder_control;
pub mod sighting;
pub mod user;

pub use collection::{Collection, CollectionMedia, Media, MediaKind, Species};
pub use feed::{Feed, FeedEdge, FeedNode, FeedNodeType, PageInfo};
pub use feeder::{
    Battery, Feeder, FeederRole, FeederState, Food, MetricState, PowerProfile, Signal,
    Temperature, DEFAULT_FEEDER_NAME,
};
pub use feeder_control::{FeederOptions, FeederSettings, FirmwareUpdateStatus, SettingChange};
pub use sighting::{
    FinishOptions, FinishStep, PostcardSighting, Sighting, SightingFinishStrategy,
    SightingReport, SightingType,
};
pub use user::User;

use serde::{Deserialize, Deserializer};

/// GraphQL sends `null` for unset fields; treat it like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
