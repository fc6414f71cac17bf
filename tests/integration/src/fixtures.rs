//! Test fixtures and data generators
//!
//! Gateway-shaped JSON for the two update streams.

use serde_json::{json, Value};
use std::sync::atomic::{AtomicI64, Ordering};

/// Counter for unique member IDs
static COUNTER: AtomicI64 = AtomicI64::new(1);

/// Avatar hash used by fixtures
pub const AVATAR: &str = "a1b2c3d4e5f60718293a4b5c6d7e8f90";

/// Get a unique member ID for test data
pub fn unique_id() -> i64 {
    80_351_110_224_678_912 + COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Membership update JSON
pub fn member_json(id: i64, nick: Option<&str>, roles: &[i64], joined_at: Option<&str>) -> Value {
    let roles: Vec<String> = roles.iter().map(ToString::to_string).collect();
    json!({
        "user": {
            "id": id.to_string(),
            "username": format!("user{id}"),
            "discriminator": "0042",
            "avatar": AVATAR,
            "bot": false
        },
        "nick": nick,
        "roles": roles,
        "joined_at": joined_at,
    })
}

/// Presence update JSON carrying only the user ID and status
pub fn presence_json(id: i64, status: &str) -> Value {
    json!({
        "user": { "id": id.to_string() },
        "status": status,
        "activities": [],
    })
}

/// Activity JSON entry
pub fn activity_json(name: &str, kind: i32) -> Value {
    json!({ "name": name, "type": kind })
}
