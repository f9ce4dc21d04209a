//! Routing context consumed during rendering.
//!
//! Everything here is supplied fresh by the caller on every render
//! call and read-only from the engine's perspective. The template
//! never caches any of it, which is what makes one template reusable
//! across all physical targets of a statement.

use indexmap::IndexMap;

/// Logical to actual table names for one physical target.
/// Entries may be missing for tables outside the sharding scope.
pub type TableMap = IndexMap<String, String>;

/// The physical destination of one rewritten statement: a data source
/// and the actual tables routed onto it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetUnit {
    data_source: String,
    tables: Vec<String>,
}

impl TargetUnit {
    pub fn new(data_source: impl Into<String>) -> Self {
        Self {
            data_source: data_source.into(),
            tables: vec![],
        }
    }

    pub fn add_table(&mut self, table: impl Into<String>) {
        self.tables.push(table.into());
    }

    pub fn data_source(&self) -> &str {
        &self.data_source
    }

    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    /// Is the `(data source, actual table)` pair part of this target's
    /// routed set?
    pub fn has_route(&self, data_source: &str, table: &str) -> bool {
        self.data_source == data_source && self.tables.iter().any(|routed| routed == table)
    }
}

/// Owner lookup for actual tables.
pub trait Catalog {
    /// Data source the actual table lives on.
    fn data_source_for_table(&self, actual_table: &str) -> Option<&str>;
}

/// Physical schema metadata per data source.
pub trait DataSourceMetadata {
    fn schema_name(&self, data_source: &str) -> Option<&str>;
}

/// Read/write replica topology for unsharded clusters. Replication is
/// schema-uniform, so schema resolution only ever needs the primary.
pub trait ReplicaTopology {
    fn primary_data_source(&self) -> &str;
}
