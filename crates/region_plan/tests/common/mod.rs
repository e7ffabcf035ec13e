//! Shared in-memory metadata fixtures for planning tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use region_plan::{
    MetadataClient, RegionDescriptor, StorageConfig, StorageRegistry, TableSchema, TableStatistics,
};

/// Static catalog answering metadata calls from fixed in-memory state.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    pub regions: Vec<RegionDescriptor>,
    pub row_count: u64,
    pub column_families: Vec<String>,
    /// When `true`, every call fails as if the service were unreachable.
    pub unreachable: bool,
}

#[async_trait]
impl MetadataClient for StaticCatalog {
    async fn list_regions(&self, table: &str) -> Result<Vec<RegionDescriptor>> {
        if self.unreachable {
            return Err(anyhow!("connection refused listing regions of {table}"));
        }
        Ok(self.regions.clone())
    }

    async fn table_statistics(&self, table: &str) -> Result<TableStatistics> {
        if self.unreachable {
            return Err(anyhow!("connection refused fetching stats of {table}"));
        }
        Ok(TableStatistics {
            row_count: self.row_count,
        })
    }

    async fn table_schema(&self, table: &str) -> Result<TableSchema> {
        if self.unreachable {
            return Err(anyhow!("connection refused fetching schema of {table}"));
        }
        Ok(TableSchema {
            column_families: self.column_families.clone(),
        })
    }
}

/// Registry resolving storage names to static catalogs.
#[derive(Default)]
pub struct StaticRegistry {
    catalogs: BTreeMap<String, Arc<StaticCatalog>>,
}

impl StaticRegistry {
    pub fn with_catalog(mut self, name: &str, catalog: StaticCatalog) -> Self {
        self.catalogs.insert(name.to_string(), Arc::new(catalog));
        self
    }
}

impl StorageRegistry for StaticRegistry {
    fn resolve(&self, storage: &StorageConfig) -> Result<Arc<dyn MetadataClient>> {
        self.catalogs
            .get(&storage.name)
            .cloned()
            .map(|catalog| catalog as Arc<dyn MetadataClient>)
            .ok_or_else(|| anyhow!("unknown storage backend: {}", storage.name))
    }
}

pub fn region(start: &[u8], end: &[u8], host: &str) -> RegionDescriptor {
    RegionDescriptor {
        start_key: start.to_vec(),
        end_key: end.to_vec(),
        host: host.to_string(),
    }
}

/// Catalog with regions A(-, "m") on h1, B("m", "t") on h2, C("t", -) on h3
/// and a million-row statistics snapshot.
pub fn three_region_catalog() -> StaticCatalog {
    StaticCatalog {
        regions: vec![
            region(b"", b"m", "h1"),
            region(b"m", b"t", "h2"),
            region(b"t", b"", "h3"),
        ],
        row_count: 1_000_000,
        column_families: vec!["cf1".to_string(), "cf2".to_string()],
        unreachable: false,
    }
}
