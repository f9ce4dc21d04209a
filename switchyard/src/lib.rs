//! Logical-to-physical SQL rewriting for sharded databases.
//!
//! A parsed statement becomes an immutable [`SqlTemplate`]: literal
//! runs interleaved with typed rewrite points. The template is built
//! once and rendered once per physical target, producing the SQL text
//! and positional parameters that target executes. Multi-row inserts
//! are partitioned during rendering, so each target receives only the
//! rows routed to it.

pub mod config;
pub mod rewrite;
pub mod util;

pub use config::Topology;
pub use rewrite::{
    compose, Catalog, DataNode, DataSourceMetadata, Error, InsertRow, Placeholder, QuoteStyle,
    ReplicaTopology, RewriteEngine, RewriteOutput, RewriteToken, SqlTemplate, TableMap,
    TargetUnit, TemplateBuilder, Value,
};
