//! Domain entities - the member record and its presence types

mod member_state;
mod presence;

pub use member_state::MemberState;
pub use presence::{
    main_activity, ActivityType, LightActivity, PresenceStatus, PresenceStatusParseError,
};
