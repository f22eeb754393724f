//! Marker scanner.
//!
//! Buffers are scanned with the trailing `overlap` bytes of the previous
//! assembled buffer prepended, so a marker and its layer code split across a
//! chunk boundary are still seen together. Re-scanning that window is
//! harmless: identities already in the seen set are filtered before any
//! layer lookup.

use tracing::debug;

use super::layer::{LayerCode, LayerTokens};
use super::{DetectedEvent, DetectionSource, SeenSet};
use crate::config::ScanProfile;
use crate::process::pattern::{find_first_pattern, find_pattern};

/// Greedy run of ASCII alphanumerics, `_` and `-` at the start of `bytes`.
pub fn read_token(bytes: &[u8]) -> &str {
    let len = bytes
        .iter()
        .take_while(|&&b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
        .count();
    // The accepted bytes are ASCII
    std::str::from_utf8(&bytes[..len]).unwrap_or_default()
}

/// Raw token truncated at its first underscore.
pub fn base_token(raw: &str) -> &str {
    raw.split_once('_').map_or(raw, |(base, _)| base)
}

pub struct MarkerScanner<'p> {
    profile: &'p ScanProfile,
    overlap: usize,
    tail: Vec<u8>,
    unresolved: usize,
}

impl<'p> MarkerScanner<'p> {
    pub fn new(profile: &'p ScanProfile, overlap: usize) -> Self {
        Self {
            profile,
            overlap,
            tail: Vec::new(),
            unresolved: 0,
        }
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Bytes that will be prepended to the next buffer.
    pub fn tail(&self) -> &[u8] {
        &self.tail
    }

    /// Markers seen so far that had no valid layer code after them.
    pub fn unresolved_count(&self) -> usize {
        self.unresolved
    }

    /// Forget the stitch window, e.g. after a read gap.
    pub fn reset_tail(&mut self) {
        self.tail.clear();
    }

    /// Scan one buffer and return the events it newly classifies.
    ///
    /// Every returned identity has been added to `seen`.
    pub fn feed(&mut self, buffer: &[u8], seen: &mut SeenSet) -> Vec<DetectedEvent> {
        let mut data = std::mem::take(&mut self.tail);
        let carried = data.len();
        data.extend_from_slice(buffer);

        let mut events = Vec::new();
        self.scan_markers(&data, carried, seen, &mut events);
        self.scan_singletons(&data, carried, seen, &mut events);

        let keep = data.len().min(self.overlap);
        data.drain(..data.len() - keep);
        self.tail = data;

        events
    }

    fn scan_markers(
        &mut self,
        data: &[u8],
        carried: usize,
        seen: &mut SeenSet,
        events: &mut Vec<DetectedEvent>,
    ) {
        let profile = self.profile;
        let marker = profile.marker.as_bytes();

        for pos in find_pattern(data, marker) {
            let raw = read_token(&data[pos + marker.len()..]);
            let identity = profile.tables.canonical_identity(base_token(raw));
            if identity.is_empty() || seen.contains(identity) {
                continue;
            }

            match self.classify(data, pos, identity) {
                Some((layer, outcome)) => {
                    seen.insert(identity);
                    events.push(DetectedEvent {
                        identity: identity.to_string(),
                        outcome,
                        layer,
                        source: DetectionSource::Marker,
                    });
                }
                None if pos + marker.len() > carried => {
                    self.unresolved += 1;
                    debug!("Found marker for {} (no valid layer nearby)", identity);
                }
                None => {}
            }
        }
    }

    fn scan_singletons(
        &mut self,
        data: &[u8],
        carried: usize,
        seen: &mut SeenSet,
        events: &mut Vec<DetectedEvent>,
    ) {
        let profile = self.profile;

        for singleton in &profile.singletons {
            if seen.contains(&singleton.identity) {
                continue;
            }
            let marker = singleton.marker.as_bytes();
            let Some(pos) = find_first_pattern(data, marker) else {
                continue;
            };

            match self.classify(data, pos, &singleton.identity) {
                Some((layer, outcome)) => {
                    seen.insert(&singleton.identity);
                    events.push(DetectedEvent {
                        identity: singleton.identity.clone(),
                        outcome,
                        layer,
                        source: DetectionSource::Singleton,
                    });
                }
                None if pos + marker.len() > carried => {
                    self.unresolved += 1;
                    debug!("Found {} marker but no valid layer", singleton.identity);
                }
                None => {}
            }
        }
    }

    /// First layer code at or after `from` that the identity's table knows.
    fn classify(&self, data: &[u8], from: usize, identity: &str) -> Option<(LayerCode, String)> {
        let Some((category, table)) = self.profile.tables.table_for(identity) else {
            debug!("No category table for {}", identity);
            return None;
        };

        for token in LayerTokens::new(data, self.profile.layer_prefix.as_bytes(), from) {
            if let Some(outcome) = table.outcome(&token.code) {
                return Some((token.code, outcome.to_string()));
            }
            debug!(
                "Found layer candidate: {} (not valid for table {})",
                token.code, category
            );
        }
        None
    }
}
