//! Typed identifiers for ledger records.
//!
//! Identifiers are opaque strings. Records hydrated from caller data keep the
//! caller's ids verbatim (`b1`, `m4`, `i2`); ids minted by the ledger are
//! `<prefix>-<uuid v4>` so they never collide after deletions.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use uuid::Uuid;

macro_rules! ledger_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix used for ledger-minted identifiers.
            pub const PREFIX: &'static str = $prefix;

            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Mint a fresh, collision-resistant identifier.
            pub fn generate() -> Self {
                Self(format!("{}-{}", Self::PREFIX, Uuid::new_v4().simple()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the identifier is empty or whitespace only.
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

ledger_id!(
    /// Identifies a [`Book`](crate::Book).
    BookId,
    "b"
);
ledger_id!(
    /// Identifies a [`Member`](crate::Member).
    MemberId,
    "m"
);
ledger_id!(
    /// Identifies an [`Issue`](crate::Issue) (one loan).
    IssueId,
    "i"
);
