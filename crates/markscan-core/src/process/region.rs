//! Memory region snapshot of a target process.
//!
//! Regions come from the `/proc/<pid>/maps` listing. Only rows with a valid
//! hexadecimal `start-end` pair and a readable permission flag survive; every
//! other row is dropped without complaint.

use std::fmt;
use std::fs;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Permission flags of a mapping, parsed from the `rwxp` column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Permissions {
    pub read: bool,
    pub write: bool,
    pub execute: bool,
    pub shared: bool,
}

impl Permissions {
    pub fn parse(flags: &str) -> Self {
        let flags = flags.as_bytes();
        Self {
            read: flags.first() == Some(&b'r'),
            write: flags.get(1) == Some(&b'w'),
            execute: flags.get(2) == Some(&b'x'),
            shared: flags.get(3) == Some(&b's'),
        }
    }

    pub fn readable() -> Self {
        Self {
            read: true,
            ..Self::default()
        }
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |set: bool, c: char| if set { c } else { '-' };
        write!(
            f,
            "{}{}{}{}",
            flag(self.read, 'r'),
            flag(self.write, 'w'),
            flag(self.execute, 'x'),
            if self.shared { 's' } else { 'p' }
        )
    }
}

/// A contiguous mapped range `[start, end)` of a target process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryRegion {
    pub start: u64,
    pub end: u64,
    pub permissions: Permissions,
}

impl MemoryRegion {
    pub fn new(start: u64, end: u64, permissions: Permissions) -> Result<Self> {
        if start >= end {
            return Err(Error::InvalidRegion { start, end });
        }
        Ok(Self {
            start,
            end,
            permissions,
        })
    }

    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// Always false: a region cannot be constructed empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, address: u64) -> bool {
        (self.start..self.end).contains(&address)
    }
}

impl fmt::Display for MemoryRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}-{:x} {}", self.start, self.end, self.permissions)
    }
}

/// Parse a maps listing into the readable regions it describes, in order.
pub fn parse_maps(content: &str) -> Vec<MemoryRegion> {
    content
        .lines()
        .filter_map(parse_maps_line)
        .filter(|region| region.permissions.read)
        .collect()
}

fn parse_maps_line(line: &str) -> Option<MemoryRegion> {
    let mut fields = line.split_whitespace();
    let range = fields.next()?;
    let flags = fields.next()?;

    let (start, end) = range.split_once('-')?;
    let start = u64::from_str_radix(start, 16).ok()?;
    let end = u64::from_str_radix(end, 16).ok()?;

    MemoryRegion::new(start, end, Permissions::parse(flags)).ok()
}

/// Snapshot the readable regions of `pid`.
///
/// The listing is read once; later changes in the target are not observed.
pub fn enumerate_regions(pid: u32) -> Result<Vec<MemoryRegion>> {
    let path = format!("/proc/{}/maps", pid);
    let content = fs::read_to_string(&path)
        .map_err(|e| Error::target_unavailable(pid, format!("failed to read {}: {}", path, e)))?;

    let regions = parse_maps(&content);
    debug!("PID {}: {} readable regions", pid, regions.len());
    Ok(regions)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_MAPS: &str = "\
55d0c0a00000-55d0c0a21000 r--p 00000000 08:01 1048602    /usr/bin/target
55d0c0a21000-55d0c0a90000 r-xp 00021000 08:01 1048602    /usr/bin/target
55d0c0a90000-55d0c0a91000 ---p 00000000 00:00 0
7f1e2c000000-7f1e2c021000 rw-p 00000000 00:00 0
7ffd4b3f1000-7ffd4b412000 rw-s 00000000 00:00 0          [stack]
";

    #[test]
    fn test_parse_maps_keeps_readable_rows() {
        let regions = parse_maps(SAMPLE_MAPS);

        assert_eq!(regions.len(), 4);
        assert_eq!(regions[0].start, 0x55d0c0a00000);
        assert_eq!(regions[0].end, 0x55d0c0a21000);
        assert!(regions[1].permissions.execute);
        assert!(regions[2].permissions.write);
        assert!(regions[3].permissions.shared);
    }

    #[test]
    fn test_parse_maps_preserves_order() {
        let regions = parse_maps(SAMPLE_MAPS);
        assert!(regions.windows(2).all(|w| w[0].start < w[1].start));
    }

    #[test]
    fn test_parse_maps_ignores_malformed_rows() {
        let content = "\
garbage
1000-zz00 r--p 0 0:0 0
2000 r--p
3000-4000
5000-5000 r--p 0 0:0 0
7000-6000 r--p 0 0:0 0
8000-9000 r--p 0 0:0 0
";
        let regions = parse_maps(content);

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].start, 0x8000);
        assert_eq!(regions[0].end, 0x9000);
    }

    #[test]
    fn test_parse_maps_empty() {
        assert!(parse_maps("").is_empty());
    }

    #[test]
    fn test_region_rejects_inverted_bounds() {
        let result = MemoryRegion::new(0x2000, 0x1000, Permissions::readable());
        assert!(matches!(
            result,
            Err(Error::InvalidRegion {
                start: 0x2000,
                end: 0x1000
            })
        ));
        assert!(MemoryRegion::new(0x1000, 0x1000, Permissions::readable()).is_err());
    }

    #[test]
    fn test_region_len_and_contains() {
        let region = MemoryRegion::new(0x1000, 0x1800, Permissions::readable()).unwrap();
        assert_eq!(region.len(), 0x800);
        assert!(region.contains(0x1000));
        assert!(region.contains(0x17FF));
        assert!(!region.contains(0x1800));
    }

    #[test]
    fn test_permissions_display_roundtrip() {
        for flags in ["r--p", "r-xp", "rw-s", "---p"] {
            assert_eq!(Permissions::parse(flags).to_string(), flags);
        }
    }

    #[test]
    fn test_enumerate_regions_missing_process() {
        // PID 0 never has a /proc entry
        let result = enumerate_regions(0);
        assert!(matches!(result, Err(Error::TargetUnavailable { pid: 0, .. })));
    }
}
