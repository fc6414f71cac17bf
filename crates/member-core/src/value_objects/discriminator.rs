//! Discriminator - the 4-digit tag of the legacy `username#0000` scheme

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric user discriminator, expected in `0..=9999`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Discriminator(i32);

impl Discriminator {
    /// Number of digits in the padded form
    pub const WIDTH: usize = 4;

    #[inline]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Parse decimal text, falling back to `0` on anything unparseable.
    ///
    /// Signed input counts as unparseable, so a parsed value is never negative.
    pub fn parse_lenient(text: &str) -> Self {
        match text.parse::<u16>() {
            Ok(value) => Self(i32::from(value)),
            Err(_) => {
                if !text.is_empty() {
                    tracing::trace!(discriminator = text, "Unparseable discriminator, using 0");
                }
                Self(0)
            }
        }
    }

    /// Zero-padded text form. Values wider than four digits are not truncated.
    pub fn format(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Discriminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.0, width = Self::WIDTH)
    }
}

impl From<i32> for Discriminator {
    fn from(value: i32) -> Self {
        Self(value)
    }
}
