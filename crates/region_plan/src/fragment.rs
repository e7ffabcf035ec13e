//! Ordered sub-scan to execution-fragment assignment.
//!
//! Fragment *i* is bound 1:1 to sub-scan *i*. No load balancing happens here;
//! reshuffling work across nodes is the execution scheduler's job.

use crate::error::{PlanError, Result};
use crate::scan::SubScanSpec;

/// Index-addressable mapping from fragment id to sub-scan specification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentMapping {
    sub_scans: Vec<SubScanSpec>,
}

impl FragmentMapping {
    /// Assigns fragments by direct index correspondence with the ordered
    /// sub-scan list.
    pub fn assign(sub_scans: Vec<SubScanSpec>) -> Self {
        Self { sub_scans }
    }

    /// Returns the sub-scan bound to `fragment`.
    ///
    /// An out-of-bounds index is a planner/executor protocol violation and
    /// fails with [`PlanError::IndexMismatch`].
    pub fn get(&self, fragment: usize) -> Result<&SubScanSpec> {
        self.sub_scans.get(fragment).ok_or(PlanError::IndexMismatch {
            requested: fragment,
            fragments: self.sub_scans.len(),
        })
    }

    /// Number of planned fragments.
    pub fn len(&self) -> usize {
        self.sub_scans.len()
    }

    /// Whether no fragments were planned.
    pub fn is_empty(&self) -> bool {
        self.sub_scans.is_empty()
    }

    /// Sub-scans in fragment order.
    pub fn iter(&self) -> impl Iterator<Item = &SubScanSpec> {
        self.sub_scans.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::Projection;

    fn sub_scan(host: &str) -> SubScanSpec {
        SubScanSpec {
            table: "orders".to_string(),
            host: host.to_string(),
            start_key: Vec::new(),
            stop_key: Vec::new(),
            filter: None,
            projection: Projection::All,
        }
    }

    #[test]
    fn assignment_preserves_order_and_length() {
        let scans = vec![sub_scan("h1"), sub_scan("h2"), sub_scan("h3")];
        let mapping = FragmentMapping::assign(scans.clone());
        assert_eq!(mapping.len(), 3);
        for (i, expected) in scans.iter().enumerate() {
            assert_eq!(mapping.get(i).unwrap(), expected);
        }
    }

    #[test]
    fn empty_assignment_is_valid() {
        let mapping = FragmentMapping::assign(Vec::new());
        assert!(mapping.is_empty());
        assert!(matches!(
            mapping.get(0),
            Err(PlanError::IndexMismatch {
                requested: 0,
                fragments: 0,
            })
        ));
    }

    #[test]
    fn out_of_bounds_fragment_is_a_protocol_violation() {
        let mapping = FragmentMapping::assign(vec![sub_scan("h1")]);
        let err = mapping.get(5).unwrap_err();
        assert!(matches!(
            err,
            PlanError::IndexMismatch {
                requested: 5,
                fragments: 1,
            }
        ));
    }
}
