use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::{CategoryTable, ClassificationTables};
use crate::error::{Error, Result};

/// A marker bound to one canonical identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingletonMarker {
    pub marker: String,
    pub identity: String,
}

/// Everything the scanner needs to know about what to look for.
///
/// Built once at startup and shared by reference for the lifetime of every
/// session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanProfile {
    pub name: String,
    /// Generic marker prefix, followed in memory by an identity token.
    pub marker: String,
    /// Literal preceding the digits of a layer code.
    pub layer_prefix: String,
    #[serde(default)]
    pub singletons: Vec<SingletonMarker>,
    pub tables: ClassificationTables,
}

impl ScanProfile {
    /// Avalonian temple highlights profile.
    pub fn builtin() -> Self {
        let tables = ClassificationTables::new("default")
            .with_identity("Arch-Mage", "Dancing")
            .with_identity("Knight-Captain", "KC")
            .with_identity("High-Priest", "FreeBoss")
            .with_identity("Basilisk-Rider", "Basi")
            .with_identity("Construct", "Construct")
            .with_identity("Grail_Sanctum", "Final")
            .with_category(
                "default",
                CategoryTable::new()
                    .with("Layer_08", "2GOLDS")
                    .with("Layer_09", "1GOLD")
                    .with("Layer_10", "1PURPLE")
                    .with("Layer_11", "2PURPLE"),
            )
            .with_category(
                "Construct",
                CategoryTable::new()
                    .with("Layer_06", "2GOLDS")
                    .with("Layer_07", "1GOLD")
                    .with("Layer_08", "1PURPLE")
                    .with("Layer_09", "2PURPLE"),
            )
            .with_category(
                "Legendary_Boss",
                CategoryTable::new()
                    .with("Layer_02", "2GOLDS")
                    .with("Layer_04", "1GOLD")
                    .with("Layer_05", "2PURPLE"),
            )
            .with_identity_category("Construct", "Construct")
            .with_identity_category("Final", "Legendary_Boss");

        Self {
            name: "ava-temple".to_string(),
            marker: "AVA_TEMPLE_HIGHLIGHT_UNCOMMON_STRAIGHT_".to_string(),
            layer_prefix: "Layer_".to_string(),
            singletons: vec![
                SingletonMarker {
                    marker: "AVA_TEMPLE_HIGHLIGHT_UNCOMMON_STRAIGHT_Construct_01".to_string(),
                    identity: "Construct".to_string(),
                },
                SingletonMarker {
                    marker: "AVA_TEMPLE_HIGHLIGHT_LEGENDARY_BOSS_Grail_Sanctum_01".to_string(),
                    identity: "Final".to_string(),
                },
            ],
            tables,
        }
    }

    /// Load and validate a JSON profile.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let profile: Self = serde_json::from_str(content)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<()> {
        if self.marker.is_empty() {
            return Err(Error::InvalidProfile("marker must not be empty".to_string()));
        }
        if self.layer_prefix.is_empty() {
            return Err(Error::InvalidProfile(
                "layer prefix must not be empty".to_string(),
            ));
        }

        let tables = &self.tables;
        if !tables.categories.contains_key(&tables.default_category) {
            return Err(Error::InvalidProfile(format!(
                "default category '{}' has no table",
                tables.default_category
            )));
        }
        for (identity, category) in &tables.identity_categories {
            if !tables.categories.contains_key(category) {
                return Err(Error::InvalidProfile(format!(
                    "identity '{}' refers to unknown category '{}'",
                    identity, category
                )));
            }
        }
        for singleton in &self.singletons {
            if singleton.marker.is_empty() || singleton.identity.is_empty() {
                return Err(Error::InvalidProfile(
                    "singleton markers need a marker and an identity".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Number of distinct canonical identities a session can classify.
    ///
    /// A session is complete once this many identities have been seen.
    pub fn target_count(&self) -> usize {
        let mut identities = self.tables.known_identities();
        identities.extend(self.singletons.iter().map(|s| s.identity.as_str()));
        identities.len()
    }
}

impl Default for ScanProfile {
    fn default() -> Self {
        Self::builtin()
    }
}
