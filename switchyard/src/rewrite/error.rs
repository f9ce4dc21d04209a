//! Rewrite errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("no actual table mapped for logical table \"{0}\"")]
    UnresolvedTable(String),

    #[error("no data source owns table \"{0}\"")]
    UnresolvedDataSource(String),

    #[error("no schema configured for data source \"{0}\"")]
    UnresolvedSchema(String),

    #[error("insert placeholder has no rows")]
    EmptyInsert,

    #[error("no insert rows routed to data source \"{0}\"")]
    NoRowsRouted(String),

    #[error("schema placeholder requires routing metadata")]
    SchemaResolutionUnavailable,

    #[error("rewrite token {start}..={stop} out of bounds")]
    TokenOutOfBounds { start: usize, stop: usize },

    #[error("rewrite token at {0} overlaps the previous span")]
    TokenOverlap(usize),
}
