//! The logical scan node for a binary range-partitioned table.
//!
//! A [`BinaryTableScan`] is built once per query plan: it fetches the
//! partition map and statistics snapshot, then answers splitting, costing,
//! and per-fragment handoff questions from that immutable snapshot. Cloning
//! the node for a different column projection shares the snapshot read-only
//! and copies only the request-specific fields.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cost::{estimate, CostWeights, ScanEstimate};
use crate::error::{PlanError, Result};
use crate::fragment::FragmentMapping;
use crate::metadata::{
    fetch_partition_map, fetch_schema, fetch_statistics, MetadataClient, TableSchema,
    TableStatistics,
};
use crate::region::PartitionMap;
use crate::scan::{ExecutableSubScan, Projection, ScanKind, ScanRequest, SubScanSpec};
use crate::split::{split, RegionSlice};
use crate::validate::validate_projection;

/// Named storage-backend configuration carried inside serialized plans.
///
/// Deliberately connection-free: a deserialized plan re-resolves the live
/// metadata client through a [`StorageRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Registry name of the storage backend.
    pub name: String,
}

/// Resolves storage configurations to live metadata clients on the node that
/// deserialized a plan.
pub trait StorageRegistry: Send + Sync {
    /// Returns a metadata client for `storage`.
    fn resolve(&self, storage: &StorageConfig) -> anyhow::Result<Arc<dyn MetadataClient>>;
}

/// Plan-construction switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanOptions {
    /// Enables the column-family existence check against the table schema.
    /// Off by default; see [`crate::validate`].
    pub validate_projection: bool,
}

/// Serializable wire form of a [`BinaryTableScan`], with a stable scan-kind
/// discriminator distinguishing it from sibling scan variants in a plan tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanPlanView {
    /// Type discriminator; always [`ScanKind::BinaryTable`] for this node.
    pub scan_kind: ScanKind,
    /// Storage backend to re-resolve on deserialization.
    pub storage: StorageConfig,
    /// The logical scan request (table, bounds, filter, projection).
    pub request: ScanRequest,
    /// Whether projection validation was enabled when the plan was built.
    #[serde(default)]
    pub validate_projection: bool,
}

/// Logical scan node over a binary range-partitioned table.
///
/// Immutable after construction: the partition map and statistics are
/// point-in-time snapshots shared read-only across projection clones.
#[derive(Debug, Clone)]
pub struct BinaryTableScan {
    storage: StorageConfig,
    request: ScanRequest,
    options: PlanOptions,
    partition: Arc<PartitionMap>,
    statistics: Arc<TableStatistics>,
    schema: Option<Arc<TableSchema>>,
    weights: CostWeights,
}

impl BinaryTableScan {
    /// Plans a scan: fetches the partition map and statistics once, then
    /// validates the projection when the opt-in check is enabled.
    ///
    /// The client borrow is scoped to this call; no connection state is
    /// retained by the node on either the success or the error path.
    pub async fn plan(
        client: &dyn MetadataClient,
        storage: StorageConfig,
        request: ScanRequest,
        options: PlanOptions,
    ) -> Result<Self> {
        debug!(table = %request.table, "getting region locations");
        let partition = fetch_partition_map(client, &request.table).await?;
        let statistics = fetch_statistics(client, &request.table).await?;
        // Schema is only consulted by the opt-in projection check; skip the
        // fetch entirely when the check is off.
        let schema = if options.validate_projection {
            Some(Arc::new(fetch_schema(client, &request.table).await?))
        } else {
            None
        };

        let node = Self {
            storage,
            request,
            options,
            partition: Arc::new(partition),
            statistics: Arc::new(statistics),
            schema,
            weights: CostWeights::default(),
        };
        node.verify_columns()?;
        Ok(node)
    }

    /// Replaces the default heuristic cost weights.
    pub fn with_cost_weights(mut self, weights: CostWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Derives a new node with a different column projection.
    ///
    /// Shares the already-fetched partition map, statistics, and schema
    /// snapshots read-only; only the projection is replaced. The projection
    /// check re-runs because the new columns have not been validated.
    pub fn with_projection(&self, projection: Projection) -> Result<Self> {
        let mut node = self.clone();
        node.request.projection = projection;
        node.verify_columns()?;
        Ok(node)
    }

    /// Runs the opt-in column-family check against the fetched schema.
    fn verify_columns(&self) -> Result<()> {
        if !self.options.validate_projection {
            return Ok(());
        }
        let Some(schema) = self.schema.as_deref() else {
            return Ok(());
        };
        validate_projection(&self.request.table, schema, &self.request.projection)
    }

    /// Regions intersecting the requested range, with clipped bounds.
    pub fn region_slices(&self) -> Vec<RegionSlice> {
        split(&self.partition, &self.request.range)
    }

    /// Builds the ordered fragment mapping, one fragment per region slice.
    pub fn fragments(&self) -> Result<FragmentMapping> {
        let mut sub_scans = Vec::new();
        for slice in self.region_slices() {
            sub_scans.push(SubScanSpec::build(
                &self.request.table,
                &slice.region,
                None,
                slice.start_key,
                slice.stop_key,
                self.request.filter.as_deref(),
                &self.request.projection,
            )?);
        }
        Ok(FragmentMapping::assign(sub_scans))
    }

    /// Returns the executable sub-scan bound to `fragment` for the execution
    /// handoff, tagged with this node's scan kind.
    pub fn specific_scan(&self, fragment: usize) -> Result<ExecutableSubScan> {
        let fragments = self.fragments()?;
        let sub_scan = fragments.get(fragment)?.clone();
        Ok(ExecutableSubScan {
            kind: ScanKind::BinaryTable,
            sub_scan,
        })
    }

    /// Scan-wide cost estimate from the statistics snapshot.
    pub fn estimate(&self) -> ScanEstimate {
        estimate(
            &self.statistics,
            self.request.filter.is_some(),
            &self.request.projection,
            &self.weights,
        )
    }

    /// Serializable plan form of this node.
    pub fn to_plan(&self) -> ScanPlanView {
        ScanPlanView {
            scan_kind: ScanKind::BinaryTable,
            storage: self.storage.clone(),
            request: self.request.clone(),
            validate_projection: self.options.validate_projection,
        }
    }

    /// Reconstructs a node from its serialized plan form.
    ///
    /// The storage backend is re-resolved through `registry` and the
    /// partition map and statistics are fetched fresh: a plan shipped across
    /// nodes never carries live connections or stale snapshots.
    pub async fn from_plan(view: ScanPlanView, registry: &dyn StorageRegistry) -> Result<Self> {
        let client = registry
            .resolve(&view.storage)
            .map_err(|err| PlanError::metadata_unavailable(&view.request.table, err))?;
        Self::plan(
            client.as_ref(),
            view.storage,
            view.request,
            PlanOptions {
                validate_projection: view.validate_projection,
            },
        )
        .await
    }

    /// The logical scan request this node was planned for.
    pub fn request(&self) -> &ScanRequest {
        &self.request
    }

    /// The immutable partition-map snapshot.
    pub fn partition(&self) -> &Arc<PartitionMap> {
        &self.partition
    }

    /// The immutable statistics snapshot.
    pub fn statistics(&self) -> &Arc<TableStatistics> {
        &self.statistics
    }
}
