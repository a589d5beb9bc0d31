//! Product snapshot and catalog payload types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Ean, Vote};

/// The raw catalog record for a product.
///
/// The catalog payload is owned by the backend and has no fixed schema; it
/// is carried as an opaque string-to-string mapping and only ever read
/// through the accessors below. Fields the data layer does not understand
/// are preserved untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogRecord(BTreeMap<String, String>);

impl CatalogRecord {
    /// Look up a catalog field by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether the record carries any fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields in the record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over all `(key, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<BTreeMap<String, String>> for CatalogRecord {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self(fields)
    }
}

impl FromIterator<(String, String)> for CatalogRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The last known state of a product, as seen by this client.
///
/// This is the unit of caching: one `Product` snapshot per [`Ean`].
/// `up_votes`/`down_votes` are aggregate counts across all users; `vote` is
/// the current user's own vote (`None` = no vote). Counters are unsigned,
/// so they can never go negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// The barcode this snapshot belongs to.
    pub ean: Ean,
    /// The catalog record, if the product is known to the catalog.
    #[serde(default)]
    pub product: Option<CatalogRecord>,
    /// Total upvotes across all users.
    #[serde(default)]
    pub up_votes: u64,
    /// Total downvotes across all users.
    #[serde(default)]
    pub down_votes: u64,
    /// The current user's vote, if any.
    #[serde(default)]
    pub vote: Option<Vote>,
}

impl Product {
    /// A snapshot for a product the catalog knows nothing about.
    #[must_use]
    pub const fn unknown(ean: Ean) -> Self {
        Self {
            ean,
            product: None,
            up_votes: 0,
            down_votes: 0,
            vote: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ean() -> Ean {
        Ean::parse("4008400404127").unwrap()
    }

    #[test]
    fn test_wire_format_camel_case() {
        let product = Product {
            ean: ean(),
            product: None,
            up_votes: 5,
            down_votes: 2,
            vote: Some(Vote::Up),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["ean"], "4008400404127");
        assert_eq!(json["upVotes"], 5);
        assert_eq!(json["downVotes"], 2);
        assert_eq!(json["vote"], true);
    }

    #[test]
    fn test_missing_fields_default() {
        let product: Product =
            serde_json::from_str(r#"{"ean": "96385074"}"#).unwrap();
        assert_eq!(product.up_votes, 0);
        assert_eq!(product.down_votes, 0);
        assert_eq!(product.vote, None);
        assert!(product.product.is_none());
    }

    #[test]
    fn test_null_vote_is_no_vote() {
        let product: Product = serde_json::from_str(
            r#"{"ean": "96385074", "upVotes": 1, "downVotes": 0, "vote": null}"#,
        )
        .unwrap();
        assert_eq!(product.vote, None);
    }

    #[test]
    fn test_catalog_record_is_opaque() {
        let product: Product = serde_json::from_str(
            r#"{"ean": "96385074", "product": {"name": "Oat Drink", "brand": "Acme"}}"#,
        )
        .unwrap();

        let record = product.product.unwrap();
        assert_eq!(record.get("name"), Some("Oat Drink"));
        assert_eq!(record.get("brand"), Some("Acme"));
        assert_eq!(record.get("unknown"), None);
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_unknown_product() {
        let product = Product::unknown(ean());
        assert!(product.product.is_none());
        assert_eq!(product.up_votes, 0);
        assert_eq!(product.vote, None);
    }
}
