//! Insert rows and their physical destinations.

use super::context::TargetUnit;
use super::value::Value;

/// One `(data source, actual table)` destination of an insert row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataNode {
    data_source: String,
    table: String,
}

impl DataNode {
    pub fn new(data_source: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            data_source: data_source.into(),
            table: table.into(),
        }
    }

    pub fn data_source(&self) -> &str {
        &self.data_source
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

/// One logical row of an INSERT statement: its rendered values, its
/// flattened positional parameters, and the data nodes it is destined
/// for. An empty node set means the row is not bound to a specific
/// target and renders everywhere.
///
/// Rows are created once when the statement is prepared and never
/// mutated, only filtered per render call.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertRow {
    values: Vec<Value>,
    parameters: Vec<Value>,
    data_nodes: Vec<DataNode>,
}

impl InsertRow {
    pub fn new(values: Vec<Value>, parameters: Vec<Value>) -> Self {
        Self {
            values,
            parameters,
            data_nodes: vec![],
        }
    }

    /// Bind the row to its physical destinations.
    pub fn with_data_nodes(mut self, data_nodes: Vec<DataNode>) -> Self {
        self.data_nodes = data_nodes;
        self
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn parameters(&self) -> &[Value] {
        &self.parameters
    }

    pub fn data_nodes(&self) -> &[DataNode] {
        &self.data_nodes
    }

    /// Does this row belong on `target`? Unbound rows go everywhere.
    pub fn routed_to(&self, target: &TargetUnit) -> bool {
        self.data_nodes.is_empty()
            || self
                .data_nodes
                .iter()
                .any(|node| target.has_route(node.data_source(), node.table()))
    }

    /// `(v, v, ...)` tuple for a VALUES list.
    pub fn values_sql(&self) -> String {
        format!(
            "({})",
            self.values
                .iter()
                .map(|value| value.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }

    /// `col = v, col = v` list for a SET clause.
    pub fn set_sql(&self, columns: &[String]) -> String {
        columns
            .iter()
            .zip(self.values.iter())
            .map(|(column, value)| format!("{} = {}", column, value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
