// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Feeder device snapshot as returned by the `me.feeders` query.

use super::null_as_default;
use serde::{Deserialize, Deserializer, Serialize};

/// Name the app shows for a feeder that was never renamed.
pub const DEFAULT_FEEDER_NAME: &str = "Bird Buddy";

/// Coarse level reported for battery, food and signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricState {
    Low,
    Medium,
    High,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Operating state of a feeder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeederState {
    DeepSleep,
    FactoryReset,
    FirmwareUpdate,
    Offline,
    OffGrid,
    Online,
    OutOfFeeder,
    PendingFactoryReset,
    PendingRemoval,
    ReadyToStream,
    Streaming,
    TakingPostcards,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Capture frequency profile (owner accounts only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PowerProfile {
    #[serde(rename = "FRENZY_MODE")]
    Frenzy,
    #[serde(rename = "POWER_SAVER_MODE")]
    PowerSaver,
    #[serde(rename = "STANDARD_MODE")]
    Standard,
    #[default]
    #[serde(other, rename = "UNKNOWN")]
    Unknown,
}

/// How the logged-in account relates to a feeder, from its `__typename`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeederRole {
    Owner,
    Member,
    MemberPending,
    Public,
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battery {
    #[serde(default, deserialize_with = "null_as_default")]
    pub charging: bool,
    /// Remaining charge, 0-100
    #[serde(default, deserialize_with = "null_as_default")]
    pub percentage: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: MetricState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: MetricState,
}

/// Wifi signal metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: MetricState,
    /// RSSI in dBm; -1 when the feeder did not report one
    #[serde(default = "unknown_rssi", deserialize_with = "rssi_or_unknown")]
    pub value: i32,
}

impl Default for Signal {
    fn default() -> Self {
        Self {
            state: MetricState::Unknown,
            value: unknown_rssi(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Temperature {
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: i32,
}

/// One Bird Buddy device.
///
/// Owner-only fields are `None` for member and pending feeders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feeder {
    /// Feeder UUID
    pub id: String,
    /// Name as set in the app
    #[serde(default = "default_name", deserialize_with = "name_or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub battery: Battery,
    #[serde(default, deserialize_with = "null_as_default")]
    pub food: Food,
    #[serde(default, deserialize_with = "null_as_default")]
    pub signal: Signal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: FeederState,
    #[serde(default, deserialize_with = "null_as_default")]
    pub temperature: Temperature,

    #[serde(rename = "__typename", default)]
    pub typename: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub firmware_version: Option<String>,
    #[serde(default)]
    pub available_firmware_version: Option<String>,
    #[serde(default)]
    pub off_grid: Option<bool>,
    #[serde(default)]
    pub audio_enabled: Option<bool>,
    #[serde(default)]
    pub power_profile: Option<PowerProfile>,
    #[serde(default)]
    pub location_city: Option<String>,
    #[serde(default)]
    pub location_country: Option<String>,
    /// Account that first paired the feeder (member view)
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub low_battery_notification: Option<bool>,
    #[serde(default)]
    pub low_food_notification: Option<bool>,
}

impl Feeder {
    pub fn role(&self) -> FeederRole {
        match self.typename.as_deref() {
            Some("FeederForOwner") => FeederRole::Owner,
            Some("FeederForMember") => FeederRole::Member,
            Some("FeederForMemberPending") => FeederRole::MemberPending,
            Some("FeederForPublic") => FeederRole::Public,
            _ => FeederRole::Unknown,
        }
    }

    pub fn is_owner(&self) -> bool {
        self.role() == FeederRole::Owner
    }

    /// Waiting for the owner to approve access.
    pub fn is_pending(&self) -> bool {
        self.role() == FeederRole::MemberPending
    }

    pub fn is_public(&self) -> bool {
        self.role() == FeederRole::Public
    }

    /// True when the owner view reports a newer firmware than installed.
    pub fn firmware_update_available(&self) -> bool {
        match (&self.firmware_version, &self.available_firmware_version) {
            (Some(current), Some(available)) => current != available,
            _ => false,
        }
    }
}

fn default_name() -> String {
    DEFAULT_FEEDER_NAME.to_string()
}

fn unknown_rssi() -> i32 {
    -1
}

fn name_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_name))
}

fn rssi_or_unknown<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i32>::deserialize(deserializer)?.unwrap_or_else(unknown_rssi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_owner_feeder() {
        let feeder: Feeder = serde_json::from_value(json!({
            "__typename": "FeederForOwner",
            "id": "0e7e3a5c-8d1e-4f0b-9a51-0d3c5e0c2b11",
            "name": "Backyard",
            "battery": { "charging": true, "percentage": 87, "state": "HIGH" },
            "food": { "state": "LOW" },
            "signal": { "state": "MEDIUM", "value": -61 },
            "state": "READY_TO_STREAM",
            "temperature": { "value": 21 },
            "serialNumber": "BB-1234",
            "firmwareVersion": "1.0.0",
            "availableFirmwareVersion": "1.1.0",
            "powerProfile": "POWER_SAVER_MODE",
            "offGrid": false
        }))
        .unwrap();

        assert_eq!(feeder.name, "Backyard");
        assert!(feeder.battery.charging);
        assert_eq!(feeder.battery.percentage, 87);
        assert_eq!(feeder.battery.state, MetricState::High);
        assert_eq!(feeder.food.state, MetricState::Low);
        assert_eq!(feeder.signal.value, -61);
        assert_eq!(feeder.state, FeederState::ReadyToStream);
        assert_eq!(feeder.temperature.value, 21);
        assert_eq!(feeder.power_profile, Some(PowerProfile::PowerSaver));
        assert!(feeder.is_owner());
        assert!(feeder.firmware_update_available());
    }

    #[test]
    fn test_decode_pending_feeder_defaults() {
        let feeder: Feeder = serde_json::from_value(json!({
            "__typename": "FeederForMemberPending",
            "id": "a3f4c7d2-1b1e-4c55-8f3e-6f2d3f0e9d77",
            "name": null,
            "food": null,
            "signal": { "state": null, "value": null }
        }))
        .unwrap();

        assert_eq!(feeder.name, DEFAULT_FEEDER_NAME);
        assert_eq!(feeder.battery.percentage, 0);
        assert!(!feeder.battery.charging);
        assert_eq!(feeder.food.state, MetricState::Unknown);
        assert_eq!(feeder.signal.value, -1);
        assert_eq!(feeder.signal.state, MetricState::Unknown);
        assert_eq!(feeder.state, FeederState::Unknown);
        assert!(feeder.is_pending());
        assert!(!feeder.firmware_update_available());
    }

    #[test]
    fn test_unrecognized_enum_values() {
        let feeder: Feeder = serde_json::from_value(json!({
            "id": "f1",
            "state": "HIBERNATING",
            "battery": { "state": "CRITICAL" },
            "powerProfile": "TURBO_MODE"
        }))
        .unwrap();

        assert_eq!(feeder.state, FeederState::Unknown);
        assert_eq!(feeder.battery.state, MetricState::Unknown);
        assert_eq!(feeder.power_profile, Some(PowerProfile::Unknown));
        assert_eq!(feeder.role(), FeederRole::Unknown);
    }

    #[test]
    fn test_missing_id_is_an_error() {
        let result = serde_json::from_value::<Feeder>(json!({ "name": "No id" }));
        assert!(result.is_err());
    }
}
