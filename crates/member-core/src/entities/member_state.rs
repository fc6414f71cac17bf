//! Member state entity - the reconciled record of one guild member
//!
//! A record is fed by two partial streams. Membership updates carry roles,
//! nickname and join time; presence updates carry status, activities and
//! fallback profile fields. Each stream marks its provenance flag the first
//! time it is applied, and those flags decide which stream owns a contested
//! field (currently only the nickname).

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::presence::{main_activity, LightActivity, PresenceStatus};
use crate::error::DomainError;
use crate::events::{
    ActivityPayload, MemberPayload, PartialUserPayload, PresencePayload, UserPayload,
};
use crate::value_objects::{AvatarHash, Discriminator, Snowflake};

/// Reconciled state of a guild member
///
/// `Clone` is shallow with respect to `roles`: the copy shares the role
/// storage, which is immutable. Replacing the roles always swaps the whole
/// `Arc`, so a copy handed to a reader never observes a change.
///
/// The serde form is the record as stored by its owner, provenance flags
/// included. The avatar is written as wire text, which carries the animated
/// marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberState {
    id: Snowflake,

    /// Join time; `None` until a membership update that carries one
    pub joined_at: Option<DateTime<Utc>>,

    /// Nickname, possibly empty. Only trustworthy once `is_member_set()`.
    #[serde(rename = "nick")]
    pub nickname: String,

    /// Role IDs, replaced as a whole on every membership update
    pub roles: Arc<[Snowflake]>,

    pub presence_status: PresenceStatus,
    #[serde(rename = "presence_game")]
    pub presence_activity: Option<LightActivity>,

    pub username: String,
    pub avatar: AvatarHash,
    pub discriminator: Discriminator,

    bot: bool,
    member_set: bool,
    presence_set: bool,
}

impl MemberState {
    /// Create an empty record that neither stream has populated yet
    pub fn new(id: Snowflake, bot: bool) -> Self {
        Self {
            id,
            joined_at: None,
            nickname: String::new(),
            roles: Arc::from([]),
            presence_status: PresenceStatus::NotSet,
            presence_activity: None,
            username: String::new(),
            avatar: AvatarHash::NONE,
            discriminator: Discriminator::default(),
            bot,
            member_set: false,
            presence_set: false,
        }
    }

    /// Build a record from its first membership update
    pub fn from_member(member: &MemberPayload) -> Self {
        let mut state = Self::new(member.user.id, member.user.bot);
        state.update_member(member);
        state
    }

    /// Build a record from a presence update when no membership data exists yet
    pub fn from_presence(presence: &PresencePayload) -> Self {
        let mut state = Self::new(presence.user.id, false);
        state.update_presence(presence);
        state
    }

    /// Apply a membership update to a slot, creating the record if the slot is empty.
    ///
    /// An occupied slot must hold the record of the payload's user; otherwise
    /// nothing is merged and [`DomainError::MemberMismatch`] is returned.
    pub fn apply_member<'a>(
        slot: &'a mut Option<Self>,
        member: &MemberPayload,
    ) -> Result<&'a mut Self, DomainError> {
        if let Some(state) = slot.as_ref() {
            state.check_id(member.user.id)?;
        }
        let state = slot.get_or_insert_with(|| Self::new(member.user.id, member.user.bot));
        state.update_member(member);
        Ok(state)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> Snowflake {
        self.id
    }

    /// The ID formatted as a string
    pub fn str_id(&self) -> String {
        self.id.to_string()
    }

    #[inline]
    pub fn is_bot(&self) -> bool {
        self.bot
    }

    /// Whether a membership update has been applied at least once
    #[inline]
    pub fn is_member_set(&self) -> bool {
        self.member_set
    }

    /// Whether a presence update has been applied at least once
    #[inline]
    pub fn is_presence_set(&self) -> bool {
        self.presence_set
    }

    /// Nickname as confirmed by membership data
    pub fn member_nickname(&self) -> Option<&str> {
        self.member_set.then_some(self.nickname.as_str())
    }

    /// Status and main activity, once a presence update has supplied them
    pub fn presence(&self) -> Option<(PresenceStatus, Option<&LightActivity>)> {
        self.presence_set
            .then(|| (self.presence_status, self.presence_activity.as_ref()))
    }

    /// Get display name (nickname if set, otherwise username)
    pub fn display_name(&self) -> &str {
        if self.nickname.is_empty() {
            &self.username
        } else {
            &self.nickname
        }
    }

    /// Get the full tag: username#discriminator
    pub fn tag(&self) -> String {
        format!("{}#{}", self.username, self.discriminator)
    }

    /// Get avatar URL or default avatar URL
    pub fn avatar_url(&self) -> String {
        if self.avatar.is_set() {
            let ext = if self.avatar.is_animated() { "gif" } else { "png" };
            format!("/avatars/{}/{}.{ext}", self.id, self.avatar)
        } else {
            format!(
                "/embed/avatars/{}.png",
                self.discriminator.get().rem_euclid(5)
            )
        }
    }

    /// Check if member has a specific role
    #[inline]
    pub fn has_role(&self, role_id: Snowflake) -> bool {
        self.roles.contains(&role_id)
    }

    /// Get number of roles
    #[inline]
    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    // =========================================================================
    // Merge operations
    // =========================================================================

    /// Apply a membership update.
    ///
    /// Membership is authoritative for everything it carries, so all fields
    /// are overwritten, except the join time which is left alone when the
    /// payload omits it or sends something unparseable.
    #[instrument(level = "trace", skip_all, fields(member_id = %self.id))]
    pub fn update_member(&mut self, member: &MemberPayload) {
        if !member.joined_at.is_empty() {
            match parse_timestamp(&member.joined_at) {
                Some(joined_at) => self.joined_at = Some(joined_at),
                None => tracing::debug!(
                    member_id = %self.id,
                    joined_at = %member.joined_at,
                    "Unparseable join timestamp, keeping previous value"
                ),
            }
        }

        self.roles = Arc::from(member.roles.as_slice());
        self.nickname.clone_from(&member.nick);

        self.username.clone_from(&member.user.username);
        self.avatar = AvatarHash::decode(&member.user.avatar);
        self.discriminator = Discriminator::parse_lenient(&member.user.discriminator);

        self.member_set = true;
    }

    /// Apply a presence update.
    ///
    /// Empty text fields mean "unchanged". The nickname is only taken while no
    /// membership update has been seen.
    #[instrument(level = "trace", skip_all, fields(member_id = %self.id))]
    pub fn update_presence(&mut self, presence: &PresencePayload) {
        self.presence_set = true;

        self.presence_activity = main_activity(&presence.activities).map(LightActivity::from);

        if !self.member_set {
            self.nickname.clone_from(&presence.nick);
        }

        let user = &presence.user;
        if !user.username.is_empty() {
            self.username.clone_from(&user.username);
        }

        if !user.discriminator.is_empty() {
            self.discriminator = Discriminator::parse_lenient(&user.discriminator);
        }

        if !user.avatar.is_empty() {
            self.avatar = AvatarHash::decode(&user.avatar);
        }

        if !presence.status.is_empty() {
            match presence.status.parse::<PresenceStatus>() {
                Ok(status) => self.presence_status = status,
                Err(err) => tracing::debug!(
                    member_id = %self.id,
                    error = %err,
                    "Ignoring presence status"
                ),
            }
        }
    }

    /// [`update_member`](Self::update_member), refusing payloads for another member
    pub fn try_update_member(&mut self, member: &MemberPayload) -> Result<(), DomainError> {
        self.check_id(member.user.id)?;
        self.update_member(member);
        Ok(())
    }

    /// [`update_presence`](Self::update_presence), refusing payloads for another member
    pub fn try_update_presence(&mut self, presence: &PresencePayload) -> Result<(), DomainError> {
        self.check_id(presence.user.id)?;
        self.update_presence(presence);
        Ok(())
    }

    fn check_id(&self, found: Snowflake) -> Result<(), DomainError> {
        if found == self.id {
            Ok(())
        } else {
            Err(DomainError::MemberMismatch {
                expected: self.id,
                found,
            })
        }
    }

    // =========================================================================
    // Snapshot / export
    // =========================================================================

    /// Read-safe copy of the record.
    ///
    /// Scalars are copied; `roles` points at the same storage as the
    /// original. The copy can be sent to another thread while the original
    /// keeps receiving updates.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Re-emit the record as a membership payload
    pub fn to_wire_member(&self) -> MemberPayload {
        MemberPayload {
            user: self.to_wire_user(),
            nick: self.nickname.clone(),
            roles: self.roles.to_vec(),
            joined_at: self
                .joined_at
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
                .unwrap_or_default(),
        }
    }

    /// Re-emit the user portion of the record
    pub fn to_wire_user(&self) -> UserPayload {
        UserPayload {
            id: self.id,
            username: self.username.clone(),
            discriminator: self.discriminator.format(),
            avatar: self.avatar.encode(),
            bot: self.bot,
        }
    }

    /// Re-emit the record as a presence payload
    pub fn to_wire_presence(&self) -> PresencePayload {
        PresencePayload {
            user: PartialUserPayload {
                id: self.id,
                username: self.username.clone(),
                discriminator: self.discriminator.format(),
                avatar: self.avatar.encode(),
            },
            status: self.presence_status.as_str().to_string(),
            activities: self
                .presence_activity
                .iter()
                .map(ActivityPayload::from)
                .collect(),
            nick: self.nickname.clone(),
        }
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
