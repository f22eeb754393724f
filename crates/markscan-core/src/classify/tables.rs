//! Classification tables.
//!
//! Immutable rule data: raw token → canonical identity, identity → category
//! table, and per-category layer code → outcome label.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::layer::LayerCode;

/// Layer code → outcome label for one category.
///
/// A code missing from the table does not classify anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTable(BTreeMap<LayerCode, String>);

impl CategoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, code: &str, outcome: &str) -> Self {
        self.0.insert(LayerCode::new(code), outcome.to_string());
        self
    }

    pub fn outcome(&self, code: &LayerCode) -> Option<&str> {
        self.0.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for CategoryTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(code, outcome)| (LayerCode::new(code), outcome.to_string()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationTables {
    /// Category used by identities without an explicit entry.
    pub default_category: String,
    /// Raw base token → canonical identity. Unmapped tokens are their own identity.
    #[serde(default)]
    pub identities: BTreeMap<String, String>,
    pub categories: BTreeMap<String, CategoryTable>,
    /// Canonical identity → category name.
    #[serde(default)]
    pub identity_categories: BTreeMap<String, String>,
}

impl ClassificationTables {
    /// Tables with a single empty default category.
    pub fn new(default_category: &str) -> Self {
        let mut categories = BTreeMap::new();
        categories.insert(default_category.to_string(), CategoryTable::new());
        Self {
            default_category: default_category.to_string(),
            identities: BTreeMap::new(),
            categories,
            identity_categories: BTreeMap::new(),
        }
    }

    pub fn with_identity(mut self, token: &str, identity: &str) -> Self {
        self.identities
            .insert(token.to_string(), identity.to_string());
        self
    }

    pub fn with_category(mut self, name: &str, table: CategoryTable) -> Self {
        self.categories.insert(name.to_string(), table);
        self
    }

    pub fn with_identity_category(mut self, identity: &str, category: &str) -> Self {
        self.identity_categories
            .insert(identity.to_string(), category.to_string());
        self
    }

    pub fn canonical_identity<'a>(&'a self, token: &'a str) -> &'a str {
        self.identities
            .get(token)
            .map(String::as_str)
            .unwrap_or(token)
    }

    pub fn category_name<'a>(&'a self, identity: &str) -> &'a str {
        self.identity_categories
            .get(identity)
            .map(String::as_str)
            .unwrap_or(&self.default_category)
    }

    /// The category name and table that classify `identity`.
    pub fn table_for<'a>(&'a self, identity: &str) -> Option<(&'a str, &'a CategoryTable)> {
        let name = self.category_name(identity);
        self.categories.get(name).map(|table| (name, table))
    }

    /// Every canonical identity the tables know about.
    pub fn known_identities(&self) -> BTreeSet<&str> {
        self.identities
            .values()
            .chain(self.identity_categories.keys())
            .map(String::as_str)
            .collect()
    }
}
