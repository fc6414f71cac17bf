//! # member-core
//!
//! Domain layer for guild member state: the reconciled member record, the
//! value objects it is built from, and the wire payloads of the membership
//! and presence streams that feed it.
//!
//! Nothing here performs I/O or locking. The owner of a record decides when
//! updates are applied and serializes access to it.

pub mod entities;
pub mod error;
pub mod events;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    main_activity, ActivityType, LightActivity, MemberState, PresenceStatus,
    PresenceStatusParseError,
};
pub use error::DomainError;
pub use events::{
    ActivityPayload, MemberPayload, PartialUserPayload, PresencePayload, UserPayload,
};
pub use value_objects::{
    AvatarHash, Discriminator, Snowflake, SnowflakeParseError, AVATAR_HASH_LEN,
};
