//! Typed error surface for scan planning.
//!
//! All kinds are fatal to the plan being constructed and propagate unchanged
//! to the caller; retry policy belongs to the metadata-service client, never
//! to this crate.

use thiserror::Error;

/// Errors raised while planning a region-partitioned table scan.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Partition map, statistics, or schema could not be fetched, or the
    /// catalog answered with an unusable region set.
    #[error("metadata unavailable for table {table}")]
    MetadataUnavailable {
        /// Table whose metadata fetch failed.
        table: String,
        /// Underlying collaborator failure.
        #[source]
        source: anyhow::Error,
    },

    /// Effective start exceeds effective stop after clipping. The splitter
    /// invariants make this unreachable from planned slices; hitting it
    /// indicates a caller constructed bounds by hand.
    #[error(
        "invalid effective scan range: start {} exceeds stop {}",
        hex::encode(.start),
        hex::encode(.stop)
    )]
    InvalidRange {
        /// Effective start key of the rejected range.
        start: Vec<u8>,
        /// Effective stop key of the rejected range.
        stop: Vec<u8>,
    },

    /// A fragment index past the planned fragment list was requested. This is
    /// a planner/executor protocol violation, not a runtime condition.
    #[error("fragment index {requested} out of bounds for {fragments} planned fragments")]
    IndexMismatch {
        /// Fragment index the executor asked for.
        requested: usize,
        /// Number of fragments the plan produced.
        fragments: usize,
    },

    /// A projected column names a column family the table does not have.
    /// Raised only when projection validation is enabled.
    #[error("column family '{column}' does not exist in table {table}")]
    UnsupportedProjection {
        /// Table whose schema was checked.
        table: String,
        /// Offending projected column.
        column: String,
    },
}

impl PlanError {
    /// Wraps a collaborator failure for `table` as `MetadataUnavailable`.
    pub fn metadata_unavailable(table: impl Into<String>, source: anyhow::Error) -> Self {
        Self::MetadataUnavailable {
            table: table.into(),
            source,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PlanError>;
