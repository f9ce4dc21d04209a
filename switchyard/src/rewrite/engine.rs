//! Placeholder resolution.

use tracing::trace;

use super::context::{Catalog, DataSourceMetadata, ReplicaTopology, TableMap, TargetUnit};
use super::error::Error;
use super::placeholder::Placeholder;
use super::quote::QuoteStyle;
use super::row::InsertRow;
use super::template::{Segment, SqlTemplate};
use super::value::Value;

/// Rewritten statement for one physical target: the SQL text and the
/// positional parameters bound to it, in marker order.
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteOutput {
    sql: String,
    parameters: Vec<Value>,
}

impl RewriteOutput {
    pub fn new(sql: String, parameters: Vec<Value>) -> Self {
        Self { sql, parameters }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn parameters(&self) -> &[Value] {
        &self.parameters
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.parameters)
    }
}

/// Renders a template once per physical target.
///
/// Holds nothing besides the borrowed template and the statement's
/// base parameters. Every render call reads the template and the
/// routing context passed in, allocates its own output buffers, and
/// leaves no state behind: N targets mean N independent calls, in any
/// order, concurrently if the caller likes.
#[derive(Debug, Clone, Copy)]
pub struct RewriteEngine<'a> {
    template: &'a SqlTemplate,
    parameters: &'a [Value],
}

impl<'a> RewriteEngine<'a> {
    pub fn new(template: &'a SqlTemplate, parameters: &'a [Value]) -> Self {
        Self {
            template,
            parameters,
        }
    }

    /// Sharded mode: resolve every placeholder against the target's
    /// table map, the catalog and the data source metadata.
    pub fn render(
        &self,
        target: &TargetUnit,
        tables: &TableMap,
        catalog: &impl Catalog,
        metadata: &impl DataSourceMetadata,
    ) -> Result<RewriteOutput, Error> {
        let mut sql = String::new();
        let mut insert_parameters = vec![];
        let mut insert_rendered = false;

        for segment in self.template.segments() {
            match segment {
                Segment::Literal(text) => sql.push_str(text),
                Segment::Placeholder(placeholder) => match placeholder {
                    Placeholder::Table { table, quote } => {
                        // Unmapped tables are outside the sharding
                        // scope and pass through unchanged.
                        let name = tables.get(table.as_str()).map(String::as_str).unwrap_or(table);
                        sql.push_str(&quote.wrap(name));
                    }

                    Placeholder::Schema { table } => {
                        let actual = tables
                            .get(table.as_str())
                            .ok_or_else(|| Error::UnresolvedTable(table.clone()))?;
                        sql.push_str(resolve_schema(actual, catalog, metadata)?);
                    }

                    Placeholder::Index {
                        index,
                        table,
                        quote,
                    } => {
                        let actual = tables.get(table.as_str()).map(String::as_str);
                        sql.push_str(&index_sql(index, actual, *quote));
                    }

                    Placeholder::InsertValues { columns, rows } => {
                        append_insert_values(
                            columns,
                            rows,
                            Some(target),
                            &mut sql,
                            &mut insert_parameters,
                        )?;
                        insert_rendered = true;
                    }

                    Placeholder::InsertSet { columns, rows } => {
                        append_insert_set(
                            columns,
                            rows,
                            Some(target),
                            &mut sql,
                            &mut insert_parameters,
                        )?;
                        insert_rendered = true;
                    }
                },
            }
        }

        trace!("statement rewritten for \"{}\"", target.data_source());

        Ok(RewriteOutput::new(
            sql,
            self.reconcile(insert_rendered, insert_parameters),
        ))
    }

    /// Replica mode: the statement runs unsharded against one logical
    /// node, so only Schema placeholders resolve, always against the
    /// primary. Everything else renders its original text and the base
    /// parameters apply as-is, so only text is returned.
    pub fn render_primary(
        &self,
        topology: &impl ReplicaTopology,
        metadata: &impl DataSourceMetadata,
    ) -> Result<String, Error> {
        let mut sql = String::new();

        for segment in self.template.segments() {
            match segment {
                Segment::Literal(text) => sql.push_str(text),
                Segment::Placeholder(placeholder) => match placeholder {
                    Placeholder::Schema { .. } => {
                        let primary = topology.primary_data_source();
                        let schema = metadata
                            .schema_name(primary)
                            .ok_or_else(|| Error::UnresolvedSchema(primary.to_owned()))?;
                        sql.push_str(schema);
                    }

                    Placeholder::Table { table, quote } => sql.push_str(&quote.wrap(table)),

                    Placeholder::Index { index, quote, .. } => {
                        sql.push_str(&index_sql(index, None, *quote))
                    }

                    Placeholder::InsertValues { columns, rows } => {
                        append_insert_values(columns, rows, None, &mut sql, &mut vec![])?;
                    }

                    Placeholder::InsertSet { columns, rows } => {
                        append_insert_set(columns, rows, None, &mut sql, &mut vec![])?;
                    }
                },
            }
        }

        Ok(sql)
    }

    /// Unrouted mode: no table-level rewrite applies, only insert
    /// placeholders resolve and every row is included. Used for
    /// statements that need row splitting machinery without table
    /// mapping, e.g. broadcast tables.
    pub fn render_unrouted(&self) -> Result<RewriteOutput, Error> {
        let mut sql = String::new();
        let mut insert_parameters = vec![];
        let mut insert_rendered = false;

        for segment in self.template.segments() {
            match segment {
                Segment::Literal(text) => sql.push_str(text),
                Segment::Placeholder(placeholder) => match placeholder {
                    Placeholder::Table { table, quote } => sql.push_str(&quote.wrap(table)),

                    // No catalog or metadata to resolve against.
                    Placeholder::Schema { .. } => return Err(Error::SchemaResolutionUnavailable),

                    Placeholder::Index { index, quote, .. } => {
                        sql.push_str(&index_sql(index, None, *quote))
                    }

                    Placeholder::InsertValues { columns, rows } => {
                        append_insert_values(columns, rows, None, &mut sql, &mut insert_parameters)?;
                        insert_rendered = true;
                    }

                    Placeholder::InsertSet { columns, rows } => {
                        append_insert_set(columns, rows, None, &mut sql, &mut insert_parameters)?;
                        insert_rendered = true;
                    }
                },
            }
        }

        Ok(RewriteOutput::new(
            sql,
            self.reconcile(insert_rendered, insert_parameters),
        ))
    }

    /// Insert rows are self-describing: once any insert placeholder
    /// renders, its flattened row parameters replace the base list
    /// entirely, never merge with it.
    fn reconcile(&self, insert_rendered: bool, insert_parameters: Vec<Value>) -> Vec<Value> {
        if insert_rendered {
            insert_parameters
        } else {
            self.parameters.to_vec()
        }
    }
}

fn resolve_schema<'a>(
    actual_table: &str,
    catalog: &'a impl Catalog,
    metadata: &'a impl DataSourceMetadata,
) -> Result<&'a str, Error> {
    let data_source = catalog
        .data_source_for_table(actual_table)
        .ok_or_else(|| Error::UnresolvedDataSource(actual_table.to_owned()))?;

    metadata
        .schema_name(data_source)
        .ok_or_else(|| Error::UnresolvedSchema(data_source.to_owned()))
}

/// Index names are suffixed with the actual table name so they stay
/// unique when multiple shards of a table share a physical namespace.
fn index_sql(index: &str, actual_table: Option<&str>, quote: QuoteStyle) -> String {
    match actual_table {
        Some(table) => quote.wrap(&format!("{}_{}", index, table)),
        None => quote.wrap(index),
    }
}

fn included_rows<'a>(
    rows: &'a [InsertRow],
    target: Option<&TargetUnit>,
) -> Result<Vec<&'a InsertRow>, Error> {
    if rows.is_empty() {
        return Err(Error::EmptyInsert);
    }

    let included: Vec<&InsertRow> = rows
        .iter()
        .filter(|row| target.map(|target| row.routed_to(target)).unwrap_or(true))
        .collect();

    if included.is_empty() {
        // The router sent the statement to a target owning none of
        // its rows.
        return Err(Error::NoRowsRouted(
            target.map(TargetUnit::data_source).unwrap_or_default().to_owned(),
        ));
    }

    Ok(included)
}

fn append_insert_values(
    columns: &[String],
    rows: &[InsertRow],
    target: Option<&TargetUnit>,
    sql: &mut String,
    parameters: &mut Vec<Value>,
) -> Result<(), Error> {
    let included = included_rows(rows, target)?;

    sql.push('(');
    sql.push_str(&columns.join(", "));
    sql.push_str(") VALUES ");
    sql.push_str(
        &included
            .iter()
            .map(|row| row.values_sql())
            .collect::<Vec<_>>()
            .join(", "),
    );

    for row in included {
        parameters.extend_from_slice(row.parameters());
    }

    Ok(())
}

fn append_insert_set(
    columns: &[String],
    rows: &[InsertRow],
    target: Option<&TargetUnit>,
    sql: &mut String,
    parameters: &mut Vec<Value>,
) -> Result<(), Error> {
    let included = included_rows(rows, target)?;

    sql.push_str("SET ");
    sql.push_str(
        &included
            .iter()
            .map(|row| row.set_sql(columns))
            .collect::<Vec<_>>()
            .join(", "),
    );

    for row in included {
        parameters.extend_from_slice(row.parameters());
    }

    Ok(())
}
