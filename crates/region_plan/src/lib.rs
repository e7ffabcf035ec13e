//! Scan planning for key-range-partitioned tables.
//!
//! Given a row-key-sorted table partitioned into contiguous key-range regions
//! and a logical scan request (optional bounds, opaque filter, column
//! projection), this crate computes:
//! - the minimal ordered set of regions intersecting the requested range,
//! - a clipped sub-scan specification per region,
//! - a 1:1 fragment assignment for the execution runtime,
//! - a heuristic row/byte cost estimate for plan costing.
//!
//! It never executes a scan or reads table data; the metadata service,
//! execution runtime, and storage backend are external collaborators reached
//! only through the seams in [`metadata`] and [`group_scan`].

pub mod cost;
pub mod error;
pub mod fragment;
pub mod group_scan;
pub mod metadata;
pub mod region;
pub mod scan;
pub mod split;
pub mod validate;

pub use cost::{CostWeights, ScanEstimate};
pub use error::{PlanError, Result};
pub use fragment::FragmentMapping;
pub use group_scan::{BinaryTableScan, PlanOptions, ScanPlanView, StorageConfig, StorageRegistry};
pub use metadata::{MetadataClient, TableSchema, TableStatistics};
pub use region::{PartitionMap, RegionDescriptor};
pub use scan::{
    ExecutableSubScan, Projection, ScanKind, ScanRange, ScanRequest, SubScanSpec, ROW_KEY_COLUMN,
};
pub use split::RegionSlice;
