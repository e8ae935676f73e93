//! Stable identifiers for fields and roles.
//!
//! Ids are generated from a per-template counter as `<prefix>-<n>`. When a
//! template is loaded from disk the counter resumes past the highest
//! numeric suffix seen, so freshly generated ids never collide.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! sequential_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            /// Id for position `n` of the sequence, e.g. `field-3`.
            pub fn numbered(n: u64) -> Self {
                Self(format!("{}-{}", Self::PREFIX, n))
            }

            /// Numeric suffix, if this id was produced by [`numbered`](Self::numbered).
            pub fn sequence(&self) -> Option<u64> {
                self.0
                    .strip_prefix(Self::PREFIX)?
                    .strip_prefix('-')?
                    .parse()
                    .ok()
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }
    };
}

sequential_id!(
    /// Identifier of a placed field, unique within its template.
    FieldId,
    "field"
);

sequential_id!(
    /// Identifier of a signer role, unique within its template.
    RoleId,
    "role"
);

/// Next free sequence number after every id in `ids`, or `None` when the
/// highest id already sits at `u64::MAX`.
pub fn next_sequence<'a, I, T>(ids: I, sequence: fn(&T) -> Option<u64>) -> Option<u64>
where
    I: IntoIterator<Item = &'a T>,
    T: 'a,
{
    match ids.into_iter().filter_map(sequence).max() {
        Some(n) => n.checked_add(1),
        None => Some(1),
    }
}
