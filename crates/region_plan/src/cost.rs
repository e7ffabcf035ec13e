//! Heuristic scan costing under uncertain statistics.
//!
//! The estimator only knows the table-wide row count; everything else is a
//! fixed heuristic. Estimates are never exact: a true row count would require
//! a full scan.

use crate::metadata::TableStatistics;
use crate::scan::Projection;

/// Tunable heuristic constants used by [`estimate`].
#[derive(Debug, Clone, Copy)]
pub struct CostWeights {
    /// Assumed fraction of rows surviving a filter when no filter-cardinality
    /// statistics exist.
    pub filter_selectivity: f64,
    /// Assumed average byte width of one column value.
    pub avg_column_width_bytes: u64,
    /// Column count assumed for the all-columns sentinel. A wide sparse
    /// table's full-row width is not knowable without reading data, so this
    /// deliberately overshoots the typical schema.
    pub all_columns_fallback: usize,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            filter_selectivity: 0.5,
            avg_column_width_bytes: 10,
            all_columns_fallback: 100,
        }
    }
}

/// Scan-wide cardinality and size estimate consumed by plan costing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanEstimate {
    /// Estimated number of rows the scan produces.
    pub row_count: u64,
    /// Always `false`: the row count is heuristic, never exact.
    pub exact: bool,
    /// Number of distinct estimate endpoints; a single table-wide figure.
    pub endpoints: u64,
    /// Estimated total bytes: rows x column width x effective column count.
    pub total_bytes: u64,
}

/// Produces the scan-wide estimate for the given statistics snapshot.
pub fn estimate(
    stats: &TableStatistics,
    has_filter: bool,
    projection: &Projection,
    weights: &CostWeights,
) -> ScanEstimate {
    let selectivity = if has_filter {
        weights.filter_selectivity
    } else {
        1.0
    };
    let row_count = (stats.row_count as f64 * selectivity) as u64;
    let columns = projection
        .column_count()
        .unwrap_or(weights.all_columns_fallback) as u64;

    ScanEstimate {
        row_count,
        exact: false,
        endpoints: 1,
        total_bytes: row_count * weights.avg_column_width_bytes * columns,
    }
}
