// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Inputs and results of the owner-only feeder mutations.

use super::feeder::{FeederState, PowerProfile};
use serde::{Deserialize, Serialize};

/// Settings accepted by `feederUpdate`. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeederOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_battery_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_food_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub off_grid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offline_mode: Option<bool>,
}

impl FeederOptions {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Setting values echoed back by a toggle or power-profile mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeederSettings {
    #[serde(default)]
    pub off_grid: Option<bool>,
    #[serde(default)]
    pub audio_enabled: Option<bool>,
    #[serde(default)]
    pub power_profile: Option<PowerProfile>,
}

/// Result of a setting mutation; the feeder may apply it later.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SettingChange {
    #[serde(rename = "__typename", default)]
    pub typename: Option<String>,
    #[serde(default)]
    pub feeder: Option<FeederSettings>,
}

impl SettingChange {
    pub fn is_in_progress(&self) -> bool {
        self.typename
            .as_deref()
            .is_some_and(|name| name.ends_with("InProgressResult"))
    }

    pub fn settings(&self) -> FeederSettings {
        self.feeder.clone().unwrap_or_default()
    }
}

/// Feeder fields returned with a firmware update status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmwareFeeder {
    #[serde(default)]
    pub firmware_version: Option<String>,
    #[serde(default)]
    pub available_firmware_version: Option<String>,
    #[serde(default)]
    pub state: Option<FeederState>,
}

/// Status of a firmware update, from its `__typename`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "__typename")]
pub enum FirmwareUpdateStatus {
    #[serde(rename = "FeederFirmwareUpdateFailedResult")]
    Failed {
        #[serde(rename = "failedReason", default)]
        failed_reason: Option<String>,
    },
    #[serde(rename = "FeederFirmwareUpdateProgressResult")]
    Progress {
        /// Percent installed; absent when no update is running
        #[serde(default)]
        progress: Option<f64>,
        #[serde(default)]
        feeder: Option<FirmwareFeeder>,
    },
    #[serde(rename = "FeederFirmwareUpdateSucceededResult")]
    Succeeded {
        #[serde(default)]
        feeder: Option<FirmwareFeeder>,
    },
    #[serde(other)]
    Unknown,
}

impl FirmwareUpdateStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, FirmwareUpdateStatus::Succeeded { .. })
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            FirmwareUpdateStatus::Progress {
                progress: Some(_),
                ..
            }
        )
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FirmwareUpdateStatus::Failed { .. })
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            FirmwareUpdateStatus::Failed { failed_reason } => failed_reason.as_deref(),
            _ => None,
        }
    }

    pub fn progress(&self) -> Option<f64> {
        match self {
            FirmwareUpdateStatus::Progress { progress, .. } => *progress,
            _ => None,
        }
    }

    /// Installed firmware after a successful update.
    pub fn installed(&self) -> Option<&FirmwareFeeder> {
        match self {
            FirmwareUpdateStatus::Succeeded { feeder } => feeder.as_ref(),
            _ => None,
        }
    }
}
