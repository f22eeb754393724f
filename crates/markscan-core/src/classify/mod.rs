//! Marker detection and classification.

mod layer;
mod scanner;
mod tables;

use std::collections::HashSet;

use serde::Serialize;
use strum::{Display, IntoStaticStr};

pub use layer::{LayerCode, LayerToken, LayerTokens};
pub use scanner::{MarkerScanner, base_token, read_token};
pub use tables::{CategoryTable, ClassificationTables};

/// Which detection pass produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DetectionSource {
    /// Generic marker followed by an identity token
    Marker,
    /// Marker bound to a fixed identity
    Singleton,
}

/// A classified event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedEvent {
    pub identity: String,
    pub outcome: String,
    pub layer: LayerCode,
    pub source: DetectionSource,
}

/// Canonical identities already classified, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct SeenSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the identity was already present.
    pub fn insert(&mut self, identity: &str) -> bool {
        if self.members.contains(identity) {
            return false;
        }
        self.members.insert(identity.to_string());
        self.order.push(identity.to_string());
        true
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.members.contains(identity)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}
