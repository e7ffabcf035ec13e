//! Metadata-service client seam and fetch-once retrieval helpers.
//!
//! The catalog/cluster-metadata service is an external collaborator. This
//! module defines the client trait the planner consumes plus the wrappers
//! that turn collaborator failures into [`PlanError::MetadataUnavailable`].
//! Nothing here retries; a fetch either terminally succeeds or terminally
//! fails, and timeout policy lives inside the client implementation.

use anyhow::anyhow;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlanError, Result};
use crate::region::{PartitionMap, RegionDescriptor};

/// Aggregate table statistics, refreshed once per logical scan construction.
///
/// A point-in-time snapshot; it is not kept consistent with concurrent table
/// mutation and the estimator never treats it as exact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStatistics {
    /// Estimated total row count for the whole table.
    #[serde(default)]
    pub row_count: u64,
}

/// Column-family descriptor info, used only by the opt-in projection check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Known column families of the table.
    #[serde(default)]
    pub column_families: Vec<String>,
}

/// Client for the catalog/cluster-metadata service.
///
/// Implementations own connection lifecycle, auth, and timeouts; they must
/// surface failures as terminal errors.
#[async_trait]
pub trait MetadataClient: Send + Sync {
    /// Lists all region descriptors of `table`, in any order.
    async fn list_regions(&self, table: &str) -> anyhow::Result<Vec<RegionDescriptor>>;

    /// Returns the current aggregate statistics snapshot for `table`.
    async fn table_statistics(&self, table: &str) -> anyhow::Result<TableStatistics>;

    /// Returns column-family descriptor info for `table`.
    async fn table_schema(&self, table: &str) -> anyhow::Result<TableSchema>;
}

/// Fetches and validates the full partition map of `table`.
///
/// An empty region list is treated the same as an unreachable service: there
/// is nothing to plan against, so the scan construction must fail.
pub async fn fetch_partition_map(
    client: &dyn MetadataClient,
    table: &str,
) -> Result<PartitionMap> {
    let regions = client
        .list_regions(table)
        .await
        .map_err(|err| PlanError::metadata_unavailable(table, err))?;
    if regions.is_empty() {
        return Err(PlanError::metadata_unavailable(
            table,
            anyhow!("catalog returned no regions"),
        ));
    }

    let map = PartitionMap::from_regions(regions)
        .map_err(|err| PlanError::metadata_unavailable(table, err))?;
    debug!(table, regions = map.len(), "fetched region locations");
    Ok(map)
}

/// Fetches the table-statistics snapshot for `table`.
pub async fn fetch_statistics(
    client: &dyn MetadataClient,
    table: &str,
) -> Result<TableStatistics> {
    let stats = client
        .table_statistics(table)
        .await
        .map_err(|err| PlanError::metadata_unavailable(table, err))?;
    debug!(table, row_count = stats.row_count, "fetched table statistics");
    Ok(stats)
}

/// Fetches column-family descriptor info for `table`.
pub async fn fetch_schema(client: &dyn MetadataClient, table: &str) -> Result<TableSchema> {
    client
        .table_schema(table)
        .await
        .map_err(|err| PlanError::metadata_unavailable(table, err))
}
