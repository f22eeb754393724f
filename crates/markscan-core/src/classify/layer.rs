//! Layer-code tokenizer.
//!
//! A layer code is the layer prefix immediately followed by a run of ASCII
//! digits, e.g. `Layer_08`. Tokenizing is kept apart from table lookup so the
//! byte scanning can be tested on its own.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::process::pattern::find_pattern_from;

/// A layer code such as `Layer_08`, prefix included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerCode(String);

impl LayerCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayerCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LayerCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// A layer code and the buffer offset of its prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerToken {
    pub offset: usize,
    pub code: LayerCode,
}

/// Left-to-right iterator over the layer codes in a buffer.
///
/// Prefix occurrences not followed by at least one digit are skipped.
pub struct LayerTokens<'a> {
    data: &'a [u8],
    prefix: &'a [u8],
    pos: usize,
}

impl<'a> LayerTokens<'a> {
    /// Tokenize `data` starting at byte offset `from`.
    pub fn new(data: &'a [u8], prefix: &'a [u8], from: usize) -> Self {
        Self {
            data,
            prefix,
            pos: from,
        }
    }
}

impl Iterator for LayerTokens<'_> {
    type Item = LayerToken;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let offset = find_pattern_from(self.data, self.prefix, self.pos)?;
            let digits_start = offset + self.prefix.len();
            let digits = self.data[digits_start..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count();
            self.pos = digits_start + digits;

            if digits > 0 {
                let code = String::from_utf8_lossy(&self.data[offset..self.pos]).into_owned();
                return Some(LayerToken {
                    offset,
                    code: LayerCode(code),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(data: &[u8], from: usize) -> Vec<String> {
        LayerTokens::new(data, b"Layer_", from)
            .map(|t| t.code.to_string())
            .collect()
    }

    #[test]
    fn test_tokens_in_order() {
        let data = b"xx Layer_08 yy Layer_1 zz Layer_123";
        assert_eq!(codes(data, 0), vec!["Layer_08", "Layer_1", "Layer_123"]);
    }

    #[test]
    fn test_tokens_record_offsets() {
        let tokens: Vec<_> = LayerTokens::new(b"abLayer_7", b"Layer_", 0).collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].offset, 2);
        assert_eq!(tokens[0].code, LayerCode::new("Layer_7"));
    }

    #[test]
    fn test_prefix_without_digits_is_skipped() {
        let data = b"Layer_ Layer_x Layer_05";
        assert_eq!(codes(data, 0), vec!["Layer_05"]);
    }

    #[test]
    fn test_digit_run_stops_at_non_digit() {
        assert_eq!(codes(b"Layer_09abc", 0), vec!["Layer_09"]);
    }

    #[test]
    fn test_start_offset_excludes_earlier_codes() {
        let data = b"Layer_01 Layer_02";
        assert_eq!(codes(data, 1), vec!["Layer_02"]);
    }

    #[test]
    fn test_prefix_at_end_of_buffer() {
        assert!(codes(b"abc Layer_", 0).is_empty());
    }

    #[test]
    fn test_start_past_end() {
        assert!(codes(b"Layer_01", 64).is_empty());
    }

    #[test]
    fn test_empty_prefix_yields_nothing() {
        let tokens: Vec<_> = LayerTokens::new(b"Layer_01", b"", 0).collect();
        assert!(tokens.is_empty());
    }
}
