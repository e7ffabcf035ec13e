//! Region scan splitter: intersects a requested row range with the ordered
//! partition map and clips each intersecting region's bounds.
//!
//! The result is a minimal, ordered, non-overlapping cover of the requested
//! range. Regions are never reordered or merged; one slice maps to one
//! region.

use tracing::warn;

use crate::region::{PartitionMap, RegionDescriptor};
use crate::scan::ScanRange;

/// One region selected by the splitter with its clipped effective bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSlice {
    /// The owning region.
    pub region: RegionDescriptor,
    /// Effective inclusive start: max of requested start and region start.
    pub start_key: Vec<u8>,
    /// Effective exclusive stop: min of requested stop and region end.
    pub stop_key: Vec<u8>,
}

/// Computes the ordered list of region slices covering `range`.
///
/// Iterates regions in ascending key order: leading regions are skipped until
/// one contains the requested start key (or immediately, when the start is
/// unbounded), and iteration stops at the first region containing the
/// requested stop key. A stop key landing exactly on a region's start key
/// belongs to that region under the half-open `[start, end)` convention; the
/// loop still terminates there, but the degenerate empty slice it would
/// produce is dropped rather than handed to the executor.
pub fn split(partition: &PartitionMap, range: &ScanRange) -> Vec<RegionSlice> {
    if partition.is_empty() {
        warn!("splitting over an empty partition map yields no regions");
        return Vec::new();
    }

    let mut slices = Vec::new();
    let mut found_start = range.start_key.is_empty();
    for region in partition.regions() {
        if !found_start {
            if !region.contains_row(&range.start_key) {
                continue;
            }
            found_start = true;
        }

        let start_key = if !range.start_key.is_empty() && region.contains_row(&range.start_key) {
            range.start_key.clone()
        } else {
            region.start_key.clone()
        };
        let stops_here = !range.stop_key.is_empty() && region.contains_row(&range.stop_key);
        let stop_key = if stops_here {
            range.stop_key.clone()
        } else {
            region.end_key.clone()
        };

        // A bounded [k, k) slice reads nothing; skip it instead of producing
        // a no-op sub-scan.
        let degenerate = !stop_key.is_empty() && start_key == stop_key;
        if !degenerate {
            slices.push(RegionSlice {
                region: region.clone(),
                start_key,
                stop_key,
            });
        }
        if stops_here {
            break;
        }
    }

    slices
}
