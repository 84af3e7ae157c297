//! Statement templating: turning call-site row shapes into ready-to-run SQL.
//!
//! A [`StatementTemplate`] is a SQL skeleton with `{columns}` and `{values}`
//! placeholders. The [`StatementBuilder`] renders one statement per
//! named-field row and one statement per batch chunk for positional rows
//! (multi-row `VALUES (..),(..)` form), substituting both placeholders
//! before anything reaches the session.

use crate::batch::slice_batches;
use crate::error::MysqlMiddlewareError;
use crate::literal::{quote_identifier, sql_literal};
use crate::types::{RowSpec, Value};

const COLUMNS_SLOT: &str = "{columns}";
const VALUES_SLOT: &str = "{values}";

/// A SQL skeleton with `{columns}` and `{values}` placeholders.
#[derive(Debug, Clone)]
pub struct StatementTemplate {
    text: String,
}

impl StatementTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    #[must_use]
    pub fn insert(table: &str) -> Self {
        Self::new(format!(
            "INSERT INTO {} {COLUMNS_SLOT} VALUES {VALUES_SLOT};",
            quote_identifier(table)
        ))
    }

    #[must_use]
    pub fn insert_ignore(table: &str) -> Self {
        Self::new(format!(
            "INSERT IGNORE INTO {} {COLUMNS_SLOT} VALUES {VALUES_SLOT};",
            quote_identifier(table)
        ))
    }

    #[must_use]
    pub fn replace(table: &str) -> Self {
        Self::new(format!(
            "REPLACE INTO {} {COLUMNS_SLOT} VALUES {VALUES_SLOT};",
            quote_identifier(table)
        ))
    }

    #[must_use]
    pub fn delete(table: &str) -> Self {
        Self::new(format!(
            "DELETE FROM {} WHERE {COLUMNS_SLOT} = {VALUES_SLOT};",
            quote_identifier(table)
        ))
    }

    #[must_use]
    pub fn select_filtered(table: &str) -> Self {
        Self::new(format!(
            "SELECT * FROM {table} WHERE {COLUMNS_SLOT} = {VALUES_SLOT};"
        ))
    }

    /// Wrap both placeholders in parentheses, producing syntax compatible
    /// with multi-row `VALUES (..),(..)` statements and row-constructor
    /// predicates.
    fn parenthesized(&self) -> Self {
        Self::new(
            self.text
                .replace(COLUMNS_SLOT, "({columns})")
                .replace(VALUES_SLOT, "({values})"),
        )
    }

    fn substitute(&self, columns: &str, values: &str) -> String {
        self.text
            .replace(COLUMNS_SLOT, columns)
            .replace(VALUES_SLOT, values)
    }
}

/// Renders `(template, rows)` into an ordered list of SQL statements.
///
/// `table_columns` is the introspected column list for the target table,
/// ordered by ordinal position; it is consulted only for positional rows,
/// which take a prefix matching their arity.
pub struct StatementBuilder<'a> {
    table_columns: &'a [String],
    batch_size: usize,
}

impl<'a> StatementBuilder<'a> {
    #[must_use]
    pub fn new(table_columns: &'a [String], batch_size: usize) -> Self {
        Self {
            table_columns,
            batch_size,
        }
    }

    /// Build one statement per named-field row and one per chunk of
    /// positional rows. Row order is preserved; consecutive positional rows
    /// form a run that is chunked by the configured batch size.
    ///
    /// # Errors
    ///
    /// Fails when a positional row is wider than the introspected column
    /// list (the zip would silently drop values otherwise).
    pub fn build(
        &self,
        template: &StatementTemplate,
        rows: &[RowSpec],
    ) -> Result<Vec<String>, MysqlMiddlewareError> {
        let template = if needs_parentheses(rows) {
            template.parenthesized()
        } else {
            template.clone()
        };

        let mut statements = Vec::new();
        let mut positional_run: Vec<RowSpec> = Vec::new();

        for row in rows {
            match row {
                RowSpec::Values(_) => positional_run.push(row.clone()),
                RowSpec::Fields(fields) => {
                    self.flush_run(&template, &mut positional_run, &mut statements)?;
                    statements.push(render_fields(&template, fields));
                }
            }
        }
        self.flush_run(&template, &mut positional_run, &mut statements)?;

        Ok(statements)
    }

    fn flush_run(
        &self,
        template: &StatementTemplate,
        run: &mut Vec<RowSpec>,
        statements: &mut Vec<String>,
    ) -> Result<(), MysqlMiddlewareError> {
        if run.is_empty() {
            return Ok(());
        }
        for chunk in slice_batches(std::mem::take(run), self.batch_size) {
            self.render_chunk(template, &chunk, statements)?;
        }
        Ok(())
    }

    /// One multi-row statement per chunk when every row agrees on arity;
    /// otherwise one statement per row, since a combined VALUES list needs a
    /// single column set.
    fn render_chunk(
        &self,
        template: &StatementTemplate,
        chunk: &[RowSpec],
        statements: &mut Vec<String>,
    ) -> Result<(), MysqlMiddlewareError> {
        let Some(first) = chunk.first() else {
            return Ok(());
        };

        let uniform = chunk.iter().all(|row| row.arity() == first.arity());
        if uniform && chunk.len() > 1 {
            let columns = self.column_prefix(first.arity())?;
            let tuples: Vec<String> = chunk
                .iter()
                .filter_map(|row| match row {
                    RowSpec::Values(values) => Some(values_fragment(values)),
                    RowSpec::Fields(_) => None,
                })
                .collect();
            statements.push(template.substitute(&columns_fragment(columns), &tuples.join("),(")));
        } else {
            for row in chunk {
                if let RowSpec::Values(values) = row {
                    let columns = self.column_prefix(values.len())?;
                    statements.push(
                        template.substitute(&columns_fragment(columns), &values_fragment(values)),
                    );
                }
            }
        }
        Ok(())
    }

    fn column_prefix(&self, arity: usize) -> Result<&[String], MysqlMiddlewareError> {
        self.table_columns.get(..arity).ok_or_else(|| {
            MysqlMiddlewareError::Other(format!(
                "positional row has {arity} values but only {} columns are known",
                self.table_columns.len()
            ))
        })
    }
}

/// Parenthesize when the call supplies more than one row of either shape,
/// or a named-field row with more than one field. Only a single-row,
/// single-field call stays unwrapped.
fn needs_parentheses(rows: &[RowSpec]) -> bool {
    rows.len() > 1
        || rows
            .iter()
            .any(|row| matches!(row, RowSpec::Fields(fields) if fields.len() > 1))
}

fn render_fields(template: &StatementTemplate, fields: &[(String, Value)]) -> String {
    let columns: Vec<String> = fields.iter().map(|(name, _)| quote_identifier(name)).collect();
    let values: Vec<String> = fields.iter().map(|(_, value)| sql_literal(value)).collect();
    template.substitute(&columns.join(","), &values.join(","))
}

fn columns_fragment(columns: &[String]) -> String {
    columns
        .iter()
        .map(|name| quote_identifier(name))
        .collect::<Vec<_>>()
        .join(",")
}

fn values_fragment(values: &[Value]) -> String {
    values.iter().map(sql_literal).collect::<Vec<_>>().join(",")
}

/// Substitute a raw template for the `execute` operation.
///
/// Named-field rows fill `{name}` placeholders; positional rows fill bare
/// `{}` placeholders left to right. Every substitution uses the value's SQL
/// literal form. One statement is produced per row; with no rows the
/// template passes through untouched.
#[must_use]
pub fn render_raw_template(template: &str, rows: &[RowSpec]) -> Vec<String> {
    if rows.is_empty() {
        return vec![template.to_string()];
    }
    rows.iter()
        .map(|row| match row {
            RowSpec::Fields(fields) => {
                let mut statement = template.to_string();
                for (name, value) in fields {
                    statement = statement.replace(&format!("{{{name}}}"), &sql_literal(value));
                }
                statement
            }
            RowSpec::Values(values) => {
                let mut statement = template.to_string();
                for value in values {
                    statement = statement.replacen("{}", &sql_literal(value), 1);
                }
                statement
            }
        })
        .collect()
}
