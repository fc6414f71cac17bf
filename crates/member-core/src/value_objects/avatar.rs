//! Avatar hash - compact binary form of a user's avatar identifier
//!
//! On the wire an avatar is 32 lowercase hex characters, prefixed with `a_`
//! when the avatar is animated. In memory it is kept as 16 raw bytes plus the
//! animated flag. The all-zero hash means "no custom avatar".

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Marker prefix for animated avatars
const ANIMATED_PREFIX: &str = "a_";

/// Length of the binary hash in bytes
pub const AVATAR_HASH_LEN: usize = 16;

/// Avatar hash bytes together with the animated flag
///
/// The two halves are only ever produced together by [`AvatarHash::decode`]
/// or [`AvatarHash::new`]; there are no setters for either one alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AvatarHash {
    bytes: [u8; AVATAR_HASH_LEN],
    animated: bool,
}

impl AvatarHash {
    /// The "no custom avatar" sentinel
    pub const NONE: Self = Self {
        bytes: [0; AVATAR_HASH_LEN],
        animated: false,
    };

    #[inline]
    pub const fn new(bytes: [u8; AVATAR_HASH_LEN], animated: bool) -> Self {
        Self { bytes, animated }
    }

    /// Decode the wire form.
    ///
    /// Never fails. Hex is decoded pair by pair; decoding stops at the first
    /// malformed pair and the remaining bytes stay zero. Anything past the
    /// first 32 hex characters is ignored.
    pub fn decode(text: &str) -> Self {
        let (hex_part, animated) = match text.strip_prefix(ANIMATED_PREFIX) {
            Some(rest) => (rest, true),
            None => (text, false),
        };

        let mut bytes = [0u8; AVATAR_HASH_LEN];
        let pairs = hex_part.as_bytes().chunks_exact(2);
        let complete = hex_part.len() >= AVATAR_HASH_LEN * 2;

        for (dst, pair) in bytes.iter_mut().zip(pairs) {
            if hex::decode_to_slice(pair, std::slice::from_mut(dst)).is_err() {
                tracing::trace!(avatar = text, "Malformed avatar hex, keeping partial hash");
                return Self { bytes, animated };
            }
        }

        if !complete && !hex_part.is_empty() {
            tracing::trace!(avatar = text, "Short avatar hex, zero-filling remainder");
        }

        Self { bytes, animated }
    }

    /// Encode to the wire form. The sentinel encodes to `""` whatever its flag.
    pub fn encode(&self) -> String {
        if !self.is_set() {
            return String::new();
        }

        let hex = hex::encode(self.bytes);
        if self.animated {
            format!("{ANIMATED_PREFIX}{hex}")
        } else {
            hex
        }
    }

    /// Whether this is a real avatar rather than the sentinel
    #[inline]
    pub fn is_set(&self) -> bool {
        self.bytes != [0; AVATAR_HASH_LEN]
    }

    #[inline]
    pub const fn is_animated(&self) -> bool {
        self.animated
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; AVATAR_HASH_LEN] {
        &self.bytes
    }
}

impl fmt::Display for AvatarHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl Serialize for AvatarHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for AvatarHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = Option::<String>::deserialize(deserializer)?;
        Ok(text.map_or(Self::NONE, |t| Self::decode(&t)))
    }
}
