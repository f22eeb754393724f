//! Loading scan profiles from disk.

use std::io::Write;

use markscan_core::{Error, ScanProfile};
use tempfile::NamedTempFile;

fn write_profile(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_builtin_roundtrip() {
    let json = serde_json::to_string_pretty(&ScanProfile::builtin()).unwrap();
    let file = write_profile(&json);

    let profile = ScanProfile::load(file.path()).unwrap();
    assert_eq!(profile, ScanProfile::builtin());
}

#[test]
fn test_load_custom_profile() {
    let file = write_profile(
        r#"{
            "name": "custom",
            "marker": "EVT_",
            "layer_prefix": "Tier",
            "singletons": [{"marker": "EVT_BOSS_FINAL", "identity": "Final"}],
            "tables": {
                "default_category": "common",
                "identities": {"wolf": "Wolf", "direwolf": "Wolf"},
                "categories": {
                    "common": {"Tier1": "low", "Tier2": "high"},
                    "boss": {"Tier9": "legendary"}
                },
                "identity_categories": {"Final": "boss"}
            }
        }"#,
    );

    let profile = ScanProfile::load(file.path()).unwrap();
    assert_eq!(profile.name, "custom");
    assert_eq!(profile.target_count(), 2);
    assert_eq!(profile.tables.canonical_identity("direwolf"), "Wolf");
}

#[test]
fn test_load_rejects_dangling_category() {
    let file = write_profile(
        r#"{
            "name": "broken",
            "marker": "EVT_",
            "layer_prefix": "Tier",
            "tables": {
                "default_category": "common",
                "categories": {"common": {"Tier1": "low"}},
                "identity_categories": {"Final": "boss"}
            }
        }"#,
    );

    assert!(matches!(
        ScanProfile::load(file.path()),
        Err(Error::InvalidProfile(_))
    ));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = ScanProfile::load(dir.path().join("missing.json"));
    assert!(matches!(result, Err(Error::Io(_))));
}
