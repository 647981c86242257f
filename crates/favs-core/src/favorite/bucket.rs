//! The four typed sub-collections of a favorites collection.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// One of the four typed buckets of a [`FavoriteCollection`](super::FavoriteCollection).
///
/// Serialized and parsed with the lowercase plural names the persisted blob
/// uses (`"sessions"`, `"products"`, `"professionals"`, `"events"`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Bucket {
    Sessions,
    Products,
    Professionals,
    Events,
}

impl Bucket {
    /// All buckets in their canonical order.
    pub fn all() -> impl Iterator<Item = Bucket> {
        Bucket::iter()
    }

    /// Singular noun used in user-facing messages.
    pub fn singular(&self) -> &'static str {
        match self {
            Bucket::Sessions => "session",
            Bucket::Products => "product",
            Bucket::Professionals => "professional",
            Bucket::Events => "event",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_bucket_names() {
        assert_eq!(Bucket::from_str("products").unwrap(), Bucket::Products);
        assert_eq!(Bucket::from_str("Events").unwrap(), Bucket::Events);
        assert!(Bucket::from_str("messages").is_err());
    }

    #[test]
    fn test_display_matches_serde_name() {
        for bucket in Bucket::all() {
            let json = serde_json::to_string(&bucket).unwrap();
            assert_eq!(json, format!("\"{}\"", bucket));
        }
    }

    #[test]
    fn test_canonical_order() {
        let order: Vec<Bucket> = Bucket::all().collect();
        assert_eq!(
            order,
            vec![
                Bucket::Sessions,
                Bucket::Products,
                Bucket::Professionals,
                Bucket::Events
            ]
        );
    }
}
