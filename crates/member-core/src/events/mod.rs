//! Update events - the wire shapes consumed and re-emitted by member records

mod payloads;

pub use payloads::{
    ActivityPayload, MemberPayload, PartialUserPayload, PresencePayload, UserPayload,
};
