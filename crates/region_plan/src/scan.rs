//! Scan request and sub-scan specification types.
//!
//! A logical scan request carries optional row-key bounds, an opaque
//! serialized filter, and a column projection. The splitter turns the request
//! into per-region [`SubScanSpec`]s whose bounds are clipped to both the
//! request and the owning region.

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::region::RegionDescriptor;

/// Reserved column name addressing the row key itself; always projectable.
pub const ROW_KEY_COLUMN: &str = "row_key";

/// Requested row-key bounds: inclusive start, exclusive stop.
///
/// Empty keys mean "unbounded" in that direction, matching the region
/// convention. Immutable once constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRange {
    /// Inclusive start key; empty means scan from the first row.
    #[serde(default)]
    pub start_key: Vec<u8>,
    /// Exclusive stop key; empty means scan through the last row.
    #[serde(default)]
    pub stop_key: Vec<u8>,
}

impl ScanRange {
    /// Builds a range from explicit bounds.
    pub fn new(start_key: impl Into<Vec<u8>>, stop_key: impl Into<Vec<u8>>) -> Self {
        Self {
            start_key: start_key.into(),
            stop_key: stop_key.into(),
        }
    }

    /// Range covering the whole table.
    pub fn unbounded() -> Self {
        Self::default()
    }
}

/// Columns requested by the logical scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// All columns; the true column count is unknown without reading data.
    All,
    /// An explicit ordered column list.
    Columns(Vec<String>),
}

impl Projection {
    /// Number of projected columns, `None` for the all-columns sentinel or
    /// an empty explicit list (both mean "width unknown" to the estimator).
    pub fn column_count(&self) -> Option<usize> {
        match self {
            Self::All => None,
            Self::Columns(columns) if columns.is_empty() => None,
            Self::Columns(columns) => Some(columns.len()),
        }
    }
}

/// Discriminator distinguishing this raw/binary table-scan variant from
/// sibling table-format variants sharing the same storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanKind {
    /// Scan over a raw binary (row-key/byte-value) table.
    BinaryTable,
}

/// One logical scan request against a named table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    /// Logical table name.
    pub table: String,
    /// Requested row-key bounds.
    #[serde(default)]
    pub range: ScanRange,
    /// Opaque serialized predicate, passed through unexamined.
    #[serde(default)]
    pub filter: Option<Vec<u8>>,
    /// Requested column projection.
    pub projection: Projection,
}

/// One scan unit bound to exactly one region, with effective bounds clipped
/// to both the request and the region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScanSpec {
    /// Table the sub-scan reads.
    pub table: String,
    /// Node hosting the owning region.
    pub host: String,
    /// Effective inclusive start key.
    #[serde(default)]
    pub start_key: Vec<u8>,
    /// Effective exclusive stop key.
    #[serde(default)]
    pub stop_key: Vec<u8>,
    /// Opaque serialized predicate carried through from the request.
    #[serde(default)]
    pub filter: Option<Vec<u8>>,
    /// Column projection carried through from the request.
    pub projection: Projection,
}

impl SubScanSpec {
    /// Builds a sub-scan spec for one region with pre-clipped bounds.
    ///
    /// Pure; the only failure mode is input validation: a bounded effective
    /// start past the bounded effective stop is rejected with
    /// [`PlanError::InvalidRange`].
    pub fn build(
        table: &str,
        region: &RegionDescriptor,
        host_override: Option<&str>,
        start_key: Vec<u8>,
        stop_key: Vec<u8>,
        filter: Option<&[u8]>,
        projection: &Projection,
    ) -> Result<Self> {
        if !start_key.is_empty() && !stop_key.is_empty() && start_key > stop_key {
            return Err(PlanError::InvalidRange {
                start: start_key,
                stop: stop_key,
            });
        }
        Ok(Self {
            table: table.to_string(),
            host: host_override.unwrap_or(&region.host).to_string(),
            start_key,
            stop_key,
            filter: filter.map(<[u8]>::to_vec),
            projection: projection.clone(),
        })
    }
}

/// Executable handoff unit for one fragment, tagged with the scan kind the
/// execution runtime uses to pick the right reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutableSubScan {
    /// Table-format variant of this sub-scan.
    pub kind: ScanKind,
    /// The clipped per-region scan unit.
    pub sub_scan: SubScanSpec,
}
