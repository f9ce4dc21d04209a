//! Template-based statement rewriting.
//!
//! The parser walks a statement once and builds a [`SqlTemplate`]
//! through [`TemplateBuilder`] (or [`compose`], from token spans).
//! [`RewriteEngine`] then renders the template once per physical
//! target, resolving each [`Placeholder`] against the routing context
//! supplied for that call.

pub mod context;
pub mod engine;
pub mod error;
pub mod placeholder;
pub mod quote;
pub mod row;
pub mod template;
pub mod token;
pub mod value;

pub use context::{Catalog, DataSourceMetadata, ReplicaTopology, TableMap, TargetUnit};
pub use engine::{RewriteEngine, RewriteOutput};
pub use error::Error;
pub use placeholder::Placeholder;
pub use quote::QuoteStyle;
pub use row::{DataNode, InsertRow};
pub use template::{compose, Segment, SqlTemplate, TemplateBuilder};
pub use token::RewriteToken;
pub use value::Value;
