use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ParseIdError;

/// Parse the canonical textual form of a UUID: lowercase, hyphenated,
/// 36 characters.
///
/// [`Uuid::try_parse`] also accepts uppercase, braced, simple and URN
/// forms. Identifiers are compared by their rendered text, so any spelling
/// that does not render back to itself is a different token.
pub fn parse_canonical(s: &str) -> Result<Uuid, ParseIdError> {
    let uuid = Uuid::try_parse(s)?;

    let mut buf = Uuid::encode_buffer();
    let rendered: &str = uuid.hyphenated().encode_lower(&mut buf);
    if rendered != s {
        return Err(ParseIdError::NotCanonical);
    }

    Ok(uuid)
}

macro_rules! canonical_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random (v4) identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn parse(s: &str) -> Result<Self, ParseIdError> {
                parse_canonical(s).map(Self)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }
    };
}

canonical_id!(
    /// Anonymous visitor identity, carried in the identity cookie.
    IdentityId
);

canonical_id!(
    /// Project identifier, used as a path segment.
    ProjectId
);

canonical_id!(
    /// Task identifier, used as a path segment.
    TaskId
);
