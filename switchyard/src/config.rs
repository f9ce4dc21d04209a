//! Cluster topology configuration.
//!
//! A concrete, TOML-loadable implementation of the routing-context
//! lookups the rewrite engine renders against: which data source owns
//! which actual tables, what schema each data source exposes, and
//! which data source is the primary.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::rewrite::{Catalog, DataSourceMetadata, ReplicaTopology};

#[derive(Debug, Error)]
pub enum Error {
    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("topology has no data sources")]
    Empty,
}

/// Role of a data source in a replicated cluster.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Primary,
    Replica,
}

/// One physical data source.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct DataSource {
    /// Name routing refers to this data source by.
    pub name: String,
    /// Physical schema exposed by this data source.
    pub schema: String,
    #[serde(default)]
    pub role: Role,
    /// Actual tables hosted here.
    #[serde(default)]
    pub tables: Vec<String>,
}

/// Physical cluster topology.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct Topology {
    #[serde(default)]
    pub data_sources: Vec<DataSource>,
}

impl Topology {
    /// Load and sanity-check a topology from TOML.
    pub fn from_toml(toml: &str) -> Result<Self, Error> {
        let topology: Topology = toml::from_str(toml)?;

        if topology.data_sources.is_empty() {
            return Err(Error::Empty);
        }

        if !topology
            .data_sources
            .iter()
            .any(|ds| ds.role == Role::Primary)
        {
            warn!("no primary data source configured, using the first one");
        }

        for window in topology.names_sorted().windows(2) {
            if window[0] == window[1] {
                warn!("duplicate data source \"{}\"", window[0]);
            }
        }

        Ok(topology)
    }

    pub fn data_source(&self, name: &str) -> Option<&DataSource> {
        self.data_sources.iter().find(|ds| ds.name == name)
    }

    fn names_sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .data_sources
            .iter()
            .map(|ds| ds.name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}

impl Catalog for Topology {
    fn data_source_for_table(&self, actual_table: &str) -> Option<&str> {
        self.data_sources
            .iter()
            .find(|ds| ds.tables.iter().any(|table| table == actual_table))
            .map(|ds| ds.name.as_str())
    }
}

impl DataSourceMetadata for Topology {
    fn schema_name(&self, data_source: &str) -> Option<&str> {
        self.data_source(data_source).map(|ds| ds.schema.as_str())
    }
}

impl ReplicaTopology for Topology {
    fn primary_data_source(&self) -> &str {
        self.data_sources
            .iter()
            .find(|ds| ds.role == Role::Primary)
            .or(self.data_sources.first())
            .map(|ds| ds.name.as_str())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const TOPOLOGY: &str = r#"
        [[data_sources]]
        name = "ds0"
        schema = "db0"
        role = "primary"
        tables = ["orders_0", "orders_2"]

        [[data_sources]]
        name = "ds1"
        schema = "db1"
        role = "replica"
        tables = ["orders_1", "orders_3"]
    "#;

    #[test]
    fn test_from_toml() {
        let topology = Topology::from_toml(TOPOLOGY).unwrap();
        assert_eq!(topology.data_sources.len(), 2);
        assert_eq!(topology.data_source("ds1").unwrap().schema, "db1");
        assert!(topology.data_source("ds2").is_none());
    }

    #[test]
    fn test_empty_topology() {
        assert!(matches!(Topology::from_toml("").unwrap_err(), Error::Empty));
    }

    #[test]
    fn test_catalog() {
        let topology = Topology::from_toml(TOPOLOGY).unwrap();
        assert_eq!(topology.data_source_for_table("orders_2"), Some("ds0"));
        assert_eq!(topology.data_source_for_table("orders_3"), Some("ds1"));
        assert_eq!(topology.data_source_for_table("orders_9"), None);
    }

    #[test]
    fn test_metadata() {
        let topology = Topology::from_toml(TOPOLOGY).unwrap();
        assert_eq!(topology.schema_name("ds0"), Some("db0"));
        assert_eq!(topology.schema_name("ds9"), None);
    }

    #[test]
    fn test_primary() {
        let topology = Topology::from_toml(TOPOLOGY).unwrap();
        assert_eq!(topology.primary_data_source(), "ds0");

        // Roles default to primary when omitted.
        let topology = Topology::from_toml(
            r#"
            [[data_sources]]
            name = "only"
            schema = "db"
            "#,
        )
        .unwrap();
        assert_eq!(topology.primary_data_source(), "only");
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result = Topology::from_toml(
            r#"
            [[data_sources]]
            name = "ds0"
            schema = "db0"
            port = 5432
            "#,
        );
        assert!(matches!(result, Err(Error::Toml(_))));
    }
}
