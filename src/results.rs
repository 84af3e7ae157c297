use std::collections::HashMap;
use std::sync::Arc;

use crate::types::Value;

/// A single row from a query result.
///
/// Column names are shared across all rows of a result set; values are
/// reachable both by name (the default mapping-shaped cursor) and by index.
#[derive(Debug, Clone)]
pub struct Row {
    /// The column names for this row (shared across the result set)
    pub column_names: Arc<Vec<String>>,
    /// The values for this row
    pub values: Vec<Value>,
    column_index: Arc<HashMap<String, usize>>,
}

impl Row {
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<Value>) -> Self {
        let column_index = Arc::new(
            column_names
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), i))
                .collect::<HashMap<_, _>>(),
        );
        Self {
            column_names,
            values,
            column_index,
        }
    }

    /// Get a value by column name.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&Value> {
        self.column_index
            .get(column_name)
            .and_then(|&idx| self.values.get(idx))
    }

    /// Get a value by column index.
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
}

/// The rows returned by a query, plus result metadata.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the query
    pub results: Vec<Row>,
    /// The number of rows affected (for DML statements)
    pub rows_affected: u64,
    column_names: Option<Arc<Vec<String>>>,
    column_index: Option<Arc<HashMap<String, usize>>>,
}

impl ResultSet {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            results: Vec::with_capacity(capacity),
            rows_affected: 0,
            column_names: None,
            column_index: None,
        }
    }

    /// Set the column names shared by all rows of this result set.
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_index = Some(Arc::new(
            column_names
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), i))
                .collect::<HashMap<_, _>>(),
        ));
        self.column_names = Some(column_names);
    }

    #[must_use]
    pub fn get_column_names(&self) -> Option<&Arc<Vec<String>>> {
        self.column_names.as_ref()
    }

    /// Add a row holding these values. No-op until column names are set.
    pub fn add_row_values(&mut self, values: Vec<Value>) {
        if let (Some(column_names), Some(column_index)) =
            (&self.column_names, &self.column_index)
        {
            self.results.push(Row {
                column_names: column_names.clone(),
                values,
                column_index: column_index.clone(),
            });
            self.rows_affected += 1;
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// What an execution produced: fetched rows when the last statement was a
/// SELECT, otherwise the affected-row count of the last statement.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    Rows(ResultSet),
    Affected(u64),
}

impl QueryOutcome {
    #[must_use]
    pub fn as_rows(&self) -> Option<&ResultSet> {
        if let QueryOutcome::Rows(rs) = self { Some(rs) } else { None }
    }

    #[must_use]
    pub fn into_rows(self) -> Option<ResultSet> {
        if let QueryOutcome::Rows(rs) = self { Some(rs) } else { None }
    }

    #[must_use]
    pub fn affected(&self) -> Option<u64> {
        if let QueryOutcome::Affected(n) = self { Some(*n) } else { None }
    }
}
