//! Member merge scenarios
//!
//! Drives a record through interleaved membership and presence events
//! decoded from gateway-shaped JSON.
//!
//! Run with: cargo test -p integration-tests --test merge_scenarios

use anyhow::Result;
use chrono::{TimeZone, Utc};
use integration_tests::{fixtures::*, TestGuild};
use member_core::{ActivityType, DomainError, MemberState, PresenceStatus, Snowflake};
use serde_json::json;
use std::sync::Arc;
use std::thread;

// ============================================================================
// Nickname precedence
// ============================================================================

#[test]
fn test_nickname_precedence_across_streams() -> Result<()> {
    let mut guild = TestGuild::new();
    let id = unique_id();
    let sf = Snowflake::new(id);

    let mut presence = presence_json(id, "online");
    presence["nick"] = json!("Foo");
    assert_eq!(guild.presence_update(presence)?.nickname, "Foo");
    assert!(guild.get(sf)?.member_nickname().is_none());

    let state = guild.member_update(member_json(id, Some("Bar"), &[], None))?;
    assert_eq!(state.nickname, "Bar");
    assert_eq!(state.member_nickname(), Some("Bar"));

    let mut presence = presence_json(id, "idle");
    presence["nick"] = json!("Baz");
    let state = guild.presence_update(presence)?;
    assert_eq!(state.nickname, "Bar");
    assert_eq!(state.presence_status, PresenceStatus::Idle);
    Ok(())
}

#[test]
fn test_null_nick_clears_membership_nickname() -> Result<()> {
    let mut guild = TestGuild::new();
    let id = unique_id();

    guild.member_update(member_json(id, Some("Nick"), &[], None))?;
    let state = guild.member_update(member_json(id, None, &[], None))?;
    assert_eq!(state.nickname, "");
    assert_eq!(state.display_name(), format!("user{id}"));
    Ok(())
}

// ============================================================================
// Roles and join time
// ============================================================================

#[test]
fn test_roles_are_replaced() -> Result<()> {
    let mut guild = TestGuild::new();
    let id = unique_id();

    guild.member_update(member_json(id, None, &[1, 2, 3], None))?;
    let state = guild.member_update(member_json(id, None, &[5], None))?;
    assert_eq!(&state.roles[..], &[Snowflake::new(5)]);
    Ok(())
}

#[test]
fn test_join_time_survives_update_without_it() -> Result<()> {
    let mut guild = TestGuild::new();
    let id = unique_id();

    guild.member_update(member_json(id, None, &[], Some("2021-03-04T05:06:07+00:00")))?;
    let state = guild.member_update(member_json(id, None, &[9], None))?;

    let expected = Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).single();
    assert_eq!(state.joined_at, expected);
    assert_eq!(state.to_wire_member().joined_at, "2021-03-04T05:06:07Z");
    Ok(())
}

#[test]
fn test_bot_flag_survives_json_updates() -> Result<()> {
    let mut guild = TestGuild::new();
    let id = unique_id();

    let mut member = member_json(id, None, &[], None);
    member["user"]["bot"] = json!(true);
    assert!(guild.member_update(member)?.is_bot());

    let state = guild.member_update(member_json(id, Some("Later"), &[], None))?;
    assert!(state.is_bot());
    assert_eq!(state.nickname, "Later");
    Ok(())
}

#[test]
fn test_record_round_trips_through_storage_json() -> Result<()> {
    let mut guild = TestGuild::new();
    let id = unique_id();
    let sf = Snowflake::new(id);

    guild.member_update(member_json(id, Some("Nick"), &[3], Some("2020-01-01T00:00:00Z")))?;
    let mut presence = presence_json(id, "idle");
    presence["activities"] = json!([activity_json("Chess", 0)]);
    guild.presence_update(presence)?;

    let stored = serde_json::to_string(guild.get(sf)?)?;
    let restored: MemberState = serde_json::from_str(&stored)?;
    assert_eq!(&restored, guild.get(sf)?);
    assert_eq!(restored.member_nickname(), Some("Nick"));
    assert!(restored.is_presence_set());
    Ok(())
}

// ============================================================================
// Presence
// ============================================================================

#[test]
fn test_main_activity_from_json() -> Result<()> {
    let mut guild = TestGuild::new();
    let id = unique_id();
    guild.member_update(member_json(id, None, &[], None))?;

    let mut presence = presence_json(id, "online");
    presence["activities"] = json!([
        activity_json("A", 0),
        activity_json("B", 1),
        activity_json("C", 0),
    ]);
    let state = guild.presence_update(presence)?;
    let activity = state.presence_activity.as_ref().map(|a| (a.name.as_str(), a.kind));
    assert_eq!(activity, Some(("B", ActivityType::Streaming)));

    let mut presence = presence_json(id, "online");
    presence["activities"] = json!([activity_json("A", 0), activity_json("C", 0)]);
    let state = guild.presence_update(presence)?;
    assert_eq!(state.presence_activity.as_ref().map(|a| a.name.as_str()), Some("A"));

    let state = guild.presence_update(presence_json(id, "online"))?;
    assert!(state.presence_activity.is_none());
    Ok(())
}

#[test]
fn test_presence_profile_fields_only_when_present() -> Result<()> {
    let mut guild = TestGuild::new();
    let id = unique_id();
    guild.member_update(member_json(id, None, &[], None))?;

    let state = guild.presence_update(presence_json(id, ""))?;
    assert_eq!(state.username, format!("user{id}"));
    assert_eq!(state.discriminator.format(), "0042");
    assert_eq!(state.avatar.encode(), AVATAR);
    assert_eq!(state.presence_status, PresenceStatus::NotSet);

    let mut presence = presence_json(id, "dnd");
    presence["user"] = json!({
        "id": id.to_string(),
        "username": "renamed",
        "discriminator": "7",
        "avatar": format!("a_{AVATAR}"),
    });
    let state = guild.presence_update(presence)?;
    assert_eq!(state.username, "renamed");
    assert_eq!(state.tag(), "renamed#0007");
    assert!(state.avatar.is_animated());
    assert_eq!(state.presence_status, PresenceStatus::DoNotDisturb);
    Ok(())
}

#[test]
fn test_presence_for_unknown_member_when_required() {
    let mut guild = TestGuild::new();
    guild.require_member_first = true;
    let id = unique_id();

    let err = guild.presence_update(presence_json(id, "online")).unwrap_err();
    let err = err.downcast_ref::<DomainError>().unwrap();
    assert!(err.is_not_found());
    assert!(guild.is_empty());
}

// ============================================================================
// Degraded fields
// ============================================================================

#[test]
fn test_malformed_fields_do_not_abort_update() -> Result<()> {
    let mut guild = TestGuild::new();
    let id = unique_id();

    let mut member = member_json(id, Some("Kept"), &[1], Some("not a time"));
    member["user"]["discriminator"] = json!("x1");
    member["user"]["avatar"] = json!("nothex");

    let state = guild.member_update(member)?;
    assert!(state.is_member_set());
    assert_eq!(state.nickname, "Kept");
    assert_eq!(state.discriminator.get(), 0);
    assert!(!state.avatar.is_set());
    assert!(state.joined_at.is_none());
    assert_eq!(state.role_count(), 1);

    let state = guild.presence_update(presence_json(id, "sleeping"))?;
    assert_eq!(state.presence_status, PresenceStatus::NotSet);
    assert!(state.is_presence_set());
    Ok(())
}

// ============================================================================
// Snapshot / export
// ============================================================================

#[test]
fn test_snapshot_readable_from_another_thread() -> Result<()> {
    let mut guild = TestGuild::new();
    let id = unique_id();
    let sf = Snowflake::new(id);

    guild.member_update(member_json(id, Some("Before"), &[1, 2], None))?;
    let snapshot = guild.snapshot(sf)?;
    assert!(Arc::ptr_eq(&snapshot.roles, &guild.get(sf)?.roles));

    let reader = thread::spawn(move || (snapshot.nickname.clone(), snapshot.roles.to_vec()));

    guild.member_update(member_json(id, Some("After"), &[3], None))?;

    let (nickname, roles) = reader
        .join()
        .map_err(|_| anyhow::anyhow!("reader thread panicked"))?;
    assert_eq!(nickname, "Before");
    assert_eq!(roles, vec![Snowflake::new(1), Snowflake::new(2)]);
    assert_eq!(guild.get(sf)?.nickname, "After");
    Ok(())
}

#[test]
fn test_wire_export_round_trips_through_json() -> Result<()> {
    let mut guild = TestGuild::new();
    let id = unique_id();
    let sf = Snowflake::new(id);

    guild.member_update(member_json(id, Some("Nick"), &[10, 11], Some("2020-01-01T00:00:00Z")))?;
    let exported = serde_json::to_value(guild.get(sf)?.to_wire_member())?;
    assert_eq!(exported["user"]["discriminator"], "0042");
    assert_eq!(exported["user"]["id"], id.to_string());
    assert_eq!(exported["roles"], json!(["10", "11"]));

    let mut other = TestGuild::new();
    let rebuilt = other.member_update(exported)?;
    let original = guild.get(sf)?;
    assert_eq!(rebuilt.nickname, original.nickname);
    assert_eq!(rebuilt.roles, original.roles);
    assert_eq!(rebuilt.joined_at, original.joined_at);
    assert_eq!(rebuilt.avatar, original.avatar);
    assert_eq!(other.len(), 1);
    Ok(())
}
