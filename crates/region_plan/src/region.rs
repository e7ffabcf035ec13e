//! Region descriptors and the ordered table partition map.
//!
//! A table is partitioned into contiguous, non-overlapping key ranges. Each
//! range is half-open `[start_key, end_key)` over raw row-key bytes, with an
//! empty key meaning "unbounded" on that side. The partition map is fetched
//! once per logical scan and held immutable afterwards.

use std::cmp::Ordering;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// One contiguous key-range partition of a table and the node hosting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionDescriptor {
    /// Inclusive start key; empty means unbounded below.
    #[serde(default)]
    pub start_key: Vec<u8>,
    /// Exclusive end key; empty means unbounded above.
    #[serde(default)]
    pub end_key: Vec<u8>,
    /// Identity of the node currently hosting this region.
    pub host: String,
}

impl RegionDescriptor {
    /// Checks whether `key` falls inside this region's `[start, end)` range.
    pub fn contains_row(&self, key: &[u8]) -> bool {
        key_in_range(key, &self.start_key, &self.end_key)
    }
}

/// Checks whether `key` is within `[start, end)` where empty bounds are open.
pub fn key_in_range(key: &[u8], start: &[u8], end: &[u8]) -> bool {
    let in_start = start.is_empty() || key >= start;
    let in_end = end.is_empty() || key < end;
    in_start && in_end
}

/// Orders region start keys with the empty (unbounded) key sorting first.
fn cmp_start_keys(left: &[u8], right: &[u8]) -> Ordering {
    match (left.is_empty(), right.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => left.cmp(right),
    }
}

/// Ordered, validated set of a table's regions.
///
/// Regions are sorted by start key and checked for contiguity: each region's
/// end key must equal the next region's start key. The map is immutable once
/// built; clones of the owning scan node share it read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionMap {
    regions: Vec<RegionDescriptor>,
}

impl PartitionMap {
    /// Builds a partition map from an unordered catalog answer.
    ///
    /// Fails when two regions overlap or leave a gap; a corrupt region set
    /// must not silently produce wrong sub-scans.
    pub fn from_regions(mut regions: Vec<RegionDescriptor>) -> Result<Self> {
        regions.sort_by(|left, right| cmp_start_keys(&left.start_key, &right.start_key));

        for pair in regions.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.end_key.is_empty() {
                return Err(anyhow!(
                    "region starting at {} is unbounded above but is not the last region",
                    hex::encode(&prev.start_key)
                ));
            }
            if prev.end_key != next.start_key {
                return Err(anyhow!(
                    "regions are not contiguous: range ending at {} is followed by range starting at {}",
                    hex::encode(&prev.end_key),
                    hex::encode(&next.start_key)
                ));
            }
        }

        Ok(Self { regions })
    }

    /// Regions in ascending start-key order.
    pub fn regions(&self) -> &[RegionDescriptor] {
        &self.regions
    }

    /// Number of regions in the map.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the map holds no regions at all.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(start: &[u8], end: &[u8], host: &str) -> RegionDescriptor {
        RegionDescriptor {
            start_key: start.to_vec(),
            end_key: end.to_vec(),
            host: host.to_string(),
        }
    }

    #[test]
    fn key_in_range_treats_empty_bounds_as_open() {
        assert!(key_in_range(b"a", b"", b""));
        assert!(key_in_range(b"a", b"", b"m"));
        assert!(!key_in_range(b"m", b"", b"m"));
        assert!(key_in_range(b"m", b"m", b""));
        assert!(!key_in_range(b"l", b"m", b""));
    }

    #[test]
    fn from_regions_sorts_by_start_key() {
        let map = PartitionMap::from_regions(vec![
            region(b"t", b"", "h3"),
            region(b"", b"m", "h1"),
            region(b"m", b"t", "h2"),
        ])
        .unwrap();
        let hosts: Vec<_> = map.regions().iter().map(|r| r.host.as_str()).collect();
        assert_eq!(hosts, ["h1", "h2", "h3"]);
    }

    #[test]
    fn from_regions_rejects_gap() {
        let err = PartitionMap::from_regions(vec![
            region(b"", b"m", "h1"),
            region(b"n", b"", "h2"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("not contiguous"));
    }

    #[test]
    fn from_regions_rejects_overlap() {
        let err = PartitionMap::from_regions(vec![
            region(b"", b"m", "h1"),
            region(b"k", b"", "h2"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("not contiguous"));
    }

    #[test]
    fn from_regions_rejects_unbounded_middle_region() {
        let err = PartitionMap::from_regions(vec![
            region(b"", b"", "h1"),
            region(b"m", b"", "h2"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("unbounded above"));
    }

    #[test]
    fn from_regions_accepts_empty_map() {
        assert!(PartitionMap::from_regions(Vec::new()).unwrap().is_empty());
    }
}
