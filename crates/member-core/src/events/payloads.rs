//! Event payload definitions
//!
//! Wire shapes of the two update streams a member record is built from.
//! Text fields that the protocol may omit or send as `null` deserialize to
//! the empty string, which the merge operations read as "unchanged".

use serde::{Deserialize, Deserializer, Serialize};

use crate::entities::ActivityType;
use crate::value_objects::Snowflake;

/// Treat `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// === User Payloads ===

/// Full user object as carried by membership updates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub id: Snowflake,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    /// Decimal text, e.g. `"0042"`
    #[serde(default, deserialize_with = "null_as_default")]
    pub discriminator: String,
    /// Avatar wire text; empty when the user has no custom avatar
    #[serde(default, deserialize_with = "null_as_default")]
    pub avatar: String,
    #[serde(default)]
    pub bot: bool,
}

impl UserPayload {
    #[must_use]
    pub fn new(id: Snowflake, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            discriminator: String::new(),
            avatar: String::new(),
            bot: false,
        }
    }

    #[must_use]
    pub fn with_discriminator(mut self, discriminator: impl Into<String>) -> Self {
        self.discriminator = discriminator.into();
        self
    }

    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }

    #[must_use]
    pub fn with_bot(mut self, bot: bool) -> Self {
        self.bot = bot;
        self
    }
}

/// Partial user object as carried by presence updates
///
/// Every field but `id` may be empty, meaning "unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialUserPayload {
    pub id: Snowflake,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub discriminator: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub avatar: String,
}

impl PartialUserPayload {
    #[must_use]
    pub fn new(id: Snowflake) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

// === Member Payloads ===

/// Membership update (GUILD_MEMBER_ADD / GUILD_MEMBER_UPDATE / member chunks)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberPayload {
    pub user: UserPayload,
    /// Nickname; empty when none is set
    #[serde(default, deserialize_with = "null_as_default")]
    pub nick: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<Snowflake>,
    /// ISO-8601 join time; some update kinds omit it
    #[serde(default, deserialize_with = "null_as_default")]
    pub joined_at: String,
}

impl MemberPayload {
    #[must_use]
    pub fn new(user: UserPayload) -> Self {
        Self {
            user,
            nick: String::new(),
            roles: Vec::new(),
            joined_at: String::new(),
        }
    }

    #[must_use]
    pub fn with_nick(mut self, nick: impl Into<String>) -> Self {
        self.nick = nick.into();
        self
    }

    #[must_use]
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Snowflake>) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_joined_at(mut self, joined_at: impl Into<String>) -> Self {
        self.joined_at = joined_at.into();
        self
    }
}

// === Presence Payloads ===

/// One entry of a presence's activity list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityPayload {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub details: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(rename = "type", default)]
    pub kind: ActivityType,
}

impl ActivityPayload {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ActivityType) -> Self {
        Self {
            name: name.into(),
            url: String::new(),
            details: String::new(),
            state: String::new(),
            kind,
        }
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }
}

/// PRESENCE_UPDATE event payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresencePayload {
    pub user: PartialUserPayload,
    /// One of `online`, `idle`, `dnd`, `invisible`, `offline`, or empty
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub activities: Vec<ActivityPayload>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nick: String,
}

impl PresencePayload {
    #[must_use]
    pub fn new(user: PartialUserPayload) -> Self {
        Self {
            user,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    #[must_use]
    pub fn with_activity(mut self, activity: ActivityPayload) -> Self {
        self.activities.push(activity);
        self
    }

    #[must_use]
    pub fn with_nick(mut self, nick: impl Into<String>) -> Self {
        self.nick = nick.into();
        self
    }
}
