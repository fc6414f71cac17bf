//! Domain errors - structural failures surfaced to the owning container
//!
//! Malformed field text never produces one of these; fields degrade instead.

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Member not found: {0}")]
    MemberNotFound(Snowflake),

    #[error("Update for member {found} applied to record {expected}")]
    MemberMismatch {
        expected: Snowflake,
        found: Snowflake,
    },
}

impl DomainError {
    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",
            Self::MemberMismatch { .. } => "MEMBER_MISMATCH",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MemberNotFound(_))
    }
}
