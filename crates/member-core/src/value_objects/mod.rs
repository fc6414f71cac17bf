//! Value objects - immutable types that represent domain concepts

mod avatar;
mod discriminator;
mod snowflake;

pub use avatar::{AvatarHash, AVATAR_HASH_LEN};
pub use discriminator::Discriminator;
pub use snowflake::{Snowflake, SnowflakeParseError};
