//! Typed rewrite points.

use super::quote::QuoteStyle;
use super::row::InsertRow;

/// A rewrite point inside a template. The variant set is closed: the
/// engine matches exhaustively, so a new variant does not compile
/// until every rendering mode handles it.
#[derive(Debug, Clone, PartialEq)]
pub enum Placeholder {
    /// Logical table name, replaced with its actual name when mapped.
    Table { table: String, quote: QuoteStyle },

    /// Schema of the data source owning a logical table.
    Schema { table: String },

    /// Logical index name, suffixed with the actual table name to keep
    /// index names unique when shards are colocated.
    Index {
        index: String,
        table: String,
        quote: QuoteStyle,
    },

    /// `(columns) VALUES (...), (...)` tail of a multi-row insert.
    InsertValues {
        columns: Vec<String>,
        rows: Vec<InsertRow>,
    },

    /// `SET column = value, ...` tail of an insert.
    InsertSet {
        columns: Vec<String>,
        rows: Vec<InsertRow>,
    },
}

impl Placeholder {
    pub fn table(table: impl Into<String>, quote: QuoteStyle) -> Self {
        Self::Table {
            table: table.into(),
            quote,
        }
    }

    pub fn schema(table: impl Into<String>) -> Self {
        Self::Schema {
            table: table.into(),
        }
    }

    pub fn index(index: impl Into<String>, table: impl Into<String>, quote: QuoteStyle) -> Self {
        Self::Index {
            index: index.into(),
            table: table.into(),
            quote,
        }
    }

    pub fn insert_values(columns: Vec<String>, rows: Vec<InsertRow>) -> Self {
        Self::InsertValues { columns, rows }
    }

    pub fn insert_set(columns: Vec<String>, rows: Vec<InsertRow>) -> Self {
        Self::InsertSet { columns, rows }
    }

    /// Logical table this placeholder resolves through, if any.
    pub fn logical_table(&self) -> Option<&str> {
        match self {
            Self::Table { table, .. } | Self::Schema { table } | Self::Index { table, .. } => {
                Some(table)
            }
            Self::InsertValues { .. } | Self::InsertSet { .. } => None,
        }
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, Self::InsertValues { .. } | Self::InsertSet { .. })
    }
}
