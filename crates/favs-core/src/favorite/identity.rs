//! Identity that partitions favorites.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of every durable favorites key.
pub const STORAGE_KEY_PREFIX: &str = "favorites_";

/// Partition used by an authenticated session that carries no user id.
pub const ANONYMOUS_PARTITION: &str = "anonymous";

/// The owner of a favorites collection.
///
/// Each identity maps to exactly one durable key; collections are never
/// merged across identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Identity {
    /// An authenticated user.
    User(String),
    /// An authenticated session without a usable user id.
    Anonymous,
}

impl Identity {
    /// Builds an identity from an optional user id, falling back to the
    /// anonymous partition when the id is missing or blank.
    pub fn from_user_id(user_id: Option<&str>) -> Self {
        match user_id.map(str::trim) {
            Some(id) if !id.is_empty() => Identity::User(id.to_string()),
            _ => Identity::Anonymous,
        }
    }

    /// The partition name (`<userId>` or `anonymous`).
    pub fn partition(&self) -> &str {
        match self {
            Identity::User(id) => id,
            Identity::Anonymous => ANONYMOUS_PARTITION,
        }
    }

    /// The durable key of this identity's collection, e.g. `favorites_u42`.
    pub fn storage_key(&self) -> String {
        format!("{}{}", STORAGE_KEY_PREFIX, self.partition())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.partition())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys() {
        assert_eq!(
            Identity::User("u42".to_string()).storage_key(),
            "favorites_u42"
        );
        assert_eq!(Identity::Anonymous.storage_key(), "favorites_anonymous");
    }

    #[test]
    fn test_from_user_id_falls_back_to_anonymous() {
        assert_eq!(Identity::from_user_id(None), Identity::Anonymous);
        assert_eq!(Identity::from_user_id(Some("  ")), Identity::Anonymous);
        assert_eq!(
            Identity::from_user_id(Some("alice")),
            Identity::User("alice".to_string())
        );
    }
}
