//! Chunk-boundary behavior of the marker scanner.
//!
//! A marker and its layer code are planted at every possible split point
//! relative to a chunk boundary.

use markscan_core::classify::{CategoryTable, ClassificationTables, MarkerScanner, SeenSet};
use markscan_core::process::MockMemoryBuilder;
use markscan_core::{ScanConfig, ScanProfile, ScanSession};
use proptest::prelude::*;

const RECORD: &[u8] = b"MARKERFoo_001 Layer_01";
const MARKER_LEN: usize = 6;

fn profile() -> ScanProfile {
    ScanProfile {
        name: "boundary".to_string(),
        marker: "MARKER".to_string(),
        layer_prefix: "Layer_".to_string(),
        singletons: Vec::new(),
        tables: ClassificationTables::new("default")
            .with_identity("Foo", "Bar")
            .with_category("default", CategoryTable::new().with("Layer_01", "Gold")),
    }
}

fn feed_split(overlap: usize, split: usize) -> usize {
    let profile = profile();
    let mut scanner = MarkerScanner::new(&profile, overlap);
    let mut seen = SeenSet::new();

    let mut first = b"....".to_vec();
    first.extend_from_slice(&RECORD[..split]);
    let mut second = RECORD[split..].to_vec();
    second.extend_from_slice(b"....");

    scanner.feed(&first, &mut seen).len() + scanner.feed(&second, &mut seen).len()
}

#[test]
fn test_every_split_point_detected_with_overlap() {
    for split in 0..=RECORD.len() {
        assert_eq!(feed_split(RECORD.len(), split), 1, "split at {}", split);
    }
}

#[test]
fn test_split_inside_marker_missed_without_overlap() {
    for split in 1..MARKER_LEN {
        assert_eq!(feed_split(0, split), 0, "split at {}", split);
    }
}

proptest! {
    #[test]
    fn record_found_across_chunk_boundary(
        chunk_size in 4usize..64,
        offset in 0usize..256,
        extra_overlap in 0usize..32,
    ) {
        let mut memory = vec![b'.'; 320];
        memory[offset..offset + RECORD.len()].copy_from_slice(RECORD);
        let reader = MockMemoryBuilder::new().segment(0x1000, &memory).build();
        let profile = profile();
        let config = ScanConfig {
            chunk_size,
            overlap: RECORD.len() + extra_overlap,
        };

        let report = ScanSession::new(&reader, reader.regions(), &profile, &config)
            .unwrap()
            .run(|_| {});

        prop_assert_eq!(report.events.len(), 1);
        prop_assert_eq!(report.events[0].identity.as_str(), "Bar");
        prop_assert!(report.complete);
    }

    #[test]
    fn identity_never_emitted_twice(copies in 1usize..6, chunk_size in 8usize..48) {
        let memory: Vec<u8> = std::iter::repeat_n(RECORD, copies)
            .flat_map(|r| r.iter().copied().chain(*b"...."))
            .collect();
        let reader = MockMemoryBuilder::new().segment(0x1000, &memory).build();
        let mut profile = profile();
        // A second identity that never appears keeps the session running
        profile.tables = profile.tables.with_identity("Never", "Missing");
        let config = ScanConfig {
            chunk_size,
            overlap: 64,
        };

        let report = ScanSession::new(&reader, reader.regions(), &profile, &config)
            .unwrap()
            .run(|_| {});

        prop_assert_eq!(report.events.len(), 1);
        prop_assert!(!report.complete);
    }
}
