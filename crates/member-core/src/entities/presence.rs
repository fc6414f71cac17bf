//! Presence types - online status and the member's main activity

use serde::{Deserialize, Serialize};

use crate::events::ActivityPayload;

/// Member online status as last reported by a presence update
///
/// Serialized by its numeric code; the wire text goes through `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
#[repr(i32)]
pub enum PresenceStatus {
    /// No presence update has supplied a status yet
    #[default]
    NotSet = 0,
    Online = 1,
    Idle = 2,
    DoNotDisturb = 3,
    Invisible = 4,
    Offline = 5,
}

impl PresenceStatus {
    /// Wire text for this status (`""` for [`PresenceStatus::NotSet`])
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotSet => "",
            Self::Online => "online",
            Self::Idle => "idle",
            Self::DoNotDisturb => "dnd",
            Self::Invisible => "invisible",
            Self::Offline => "offline",
        }
    }

    /// Numeric code of the status
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Check if this status should be shown as online to others
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Online | Self::Idle | Self::DoNotDisturb)
    }
}

impl std::fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PresenceStatus {
    type Err = PresenceStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(Self::Online),
            "idle" => Ok(Self::Idle),
            "dnd" => Ok(Self::DoNotDisturb),
            "invisible" => Ok(Self::Invisible),
            "offline" => Ok(Self::Offline),
            _ => Err(PresenceStatusParseError(s.to_string())),
        }
    }
}

impl From<PresenceStatus> for i32 {
    fn from(status: PresenceStatus) -> Self {
        status.code()
    }
}

impl TryFrom<i32> for PresenceStatus {
    type Error = PresenceStatusParseError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::NotSet),
            1 => Ok(Self::Online),
            2 => Ok(Self::Idle),
            3 => Ok(Self::DoNotDisturb),
            4 => Ok(Self::Invisible),
            5 => Ok(Self::Offline),
            other => Err(PresenceStatusParseError(other.to_string())),
        }
    }
}

/// Error when the status text (or code) is not one of the known values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown presence status: {0:?}")]
pub struct PresenceStatusParseError(pub String);

/// Activity kind as carried in the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum ActivityType {
    #[default]
    Playing,
    Streaming,
    Listening,
    Watching,
    Custom,
    Competing,
    /// A kind this crate does not know about, preserved as-is
    Unknown(i32),
}

impl From<i32> for ActivityType {
    fn from(value: i32) -> Self {
        match value {
            0 => Self::Playing,
            1 => Self::Streaming,
            2 => Self::Listening,
            3 => Self::Watching,
            4 => Self::Custom,
            5 => Self::Competing,
            other => Self::Unknown(other),
        }
    }
}

impl From<ActivityType> for i32 {
    fn from(kind: ActivityType) -> Self {
        match kind {
            ActivityType::Playing => 0,
            ActivityType::Streaming => 1,
            ActivityType::Listening => 2,
            ActivityType::Watching => 3,
            ActivityType::Custom => 4,
            ActivityType::Competing => 5,
            ActivityType::Unknown(other) => other,
        }
    }
}

/// The single activity kept on a member record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LightActivity {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub details: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
}

impl From<&ActivityPayload> for LightActivity {
    fn from(activity: &ActivityPayload) -> Self {
        Self {
            name: activity.name.clone(),
            url: activity.url.clone(),
            details: activity.details.clone(),
            state: activity.state.clone(),
            kind: activity.kind,
        }
    }
}

impl From<&LightActivity> for ActivityPayload {
    fn from(activity: &LightActivity) -> Self {
        Self {
            name: activity.name.clone(),
            url: activity.url.clone(),
            details: activity.details.clone(),
            state: activity.state.clone(),
            kind: activity.kind,
        }
    }
}

/// Pick the activity shown for a member.
///
/// The first activity wins unless a streaming activity appears; every
/// streaming activity re-takes the slot, so the last one is chosen.
pub fn main_activity(activities: &[ActivityPayload]) -> Option<&ActivityPayload> {
    activities
        .iter()
        .enumerate()
        .filter(|(i, activity)| *i == 0 || activity.kind == ActivityType::Streaming)
        .map(|(_, activity)| activity)
        .last()
}
