use std::collections::HashMap;
use std::sync::Arc;

use super::row::DbRow;
use crate::types::RowValues;

/// Materialized outcome of one statement.
///
/// For a query, `results` holds the rows in result-set order and
/// `rows_affected` equals the row count. For an execute, `results` is always
/// empty and `rows_affected` is the engine-reported modified-row count.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the query
    pub results: Vec<DbRow>,
    /// The number of rows affected (or returned, for queries)
    pub rows_affected: usize,
    /// Column names shared by all rows, with their lookup cache
    column_names: Option<(Arc<Vec<String>>, Arc<HashMap<String, usize>>)>,
}

impl ResultSet {
    /// Create a result set with preallocated row capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            results: Vec::with_capacity(capacity),
            rows_affected: 0,
            column_names: None,
        }
    }

    /// Set the column names shared by every row of this result set.
    ///
    /// Builds the name-to-index cache once; rows added afterwards reuse it.
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        let cache = Arc::new(
            column_names
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), i))
                .collect::<HashMap<_, _>>(),
        );
        self.column_names = Some((column_names, cache));
    }

    /// Get the column names for this result set, if any rows were described.
    #[must_use]
    pub fn get_column_names(&self) -> Option<&Arc<Vec<String>>> {
        self.column_names.as_ref().map(|(names, _)| names)
    }

    /// Append a row of values; a no-op until column names have been set.
    pub fn add_row_values(&mut self, row_values: Vec<RowValues>) {
        if let Some((column_names, cache)) = &self.column_names {
            self.results.push(DbRow {
                column_names: Arc::clone(column_names),
                values: row_values,
                column_index_cache: Arc::clone(cache),
            });
            self.rows_affected += 1;
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.results.len()
    }

    /// First row of the result set, if any.
    #[must_use]
    pub fn first(&self) -> Option<&DbRow> {
        self.results.first()
    }
}
