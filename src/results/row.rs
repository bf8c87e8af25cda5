use std::collections::HashMap;
use std::sync::Arc;

use crate::types::RowValues;

/// A single row from a query result.
///
/// Column names are shared across all rows of one result set, together with
/// a name-to-index cache so repeated lookups avoid string scans.
#[derive(Debug, Clone)]
pub struct DbRow {
    /// The column names for this row (shared across the whole result set)
    pub column_names: Arc<Vec<String>>,
    /// The values for this row, in column order
    pub values: Vec<RowValues>,
    pub(crate) column_index_cache: Arc<HashMap<String, usize>>,
}

impl DbRow {
    /// Get the index of a column by name.
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        if let Some(&idx) = self.column_index_cache.get(column_name) {
            return Some(idx);
        }
        self.column_names.iter().position(|col| col == column_name)
    }

    /// Get a value by column name, or `None` if the column does not exist.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValues> {
        self.get_column_index(column_name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Get a value by column index, or `None` if out of bounds.
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&RowValues> {
        self.values.get(index)
    }

    /// Text value of the column, `None` when absent or not TEXT.
    #[must_use]
    pub fn get_text(&self, column_name: &str) -> Option<&str> {
        self.get(column_name).and_then(RowValues::as_text)
    }

    /// Integer value of the column, `None` when absent or not INTEGER.
    #[must_use]
    pub fn get_int(&self, column_name: &str) -> Option<i64> {
        self.get(column_name).and_then(RowValues::as_int).copied()
    }

    /// Float value of the column, `None` when absent or not REAL.
    #[must_use]
    pub fn get_float(&self, column_name: &str) -> Option<f64> {
        self.get(column_name).and_then(RowValues::as_float)
    }

    /// Boolean value of the column, `None` when absent or not readable as a
    /// boolean (see [`RowValues::as_bool`] for the integer 0/1 case).
    #[must_use]
    pub fn get_bool(&self, column_name: &str) -> Option<bool> {
        self.get(column_name).and_then(RowValues::as_bool).copied()
    }

    /// The column names of this row, in result-set order.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    #[must_use]
    pub fn has_column(&self, column_name: &str) -> bool {
        self.get_column_index(column_name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> DbRow {
        let names = Arc::new(vec!["id".to_string(), "name".to_string()]);
        let cache = Arc::new(
            names
                .iter()
                .enumerate()
                .map(|(i, n)| (n.clone(), i))
                .collect::<HashMap<_, _>>(),
        );
        DbRow {
            column_names: names,
            values: vec![RowValues::Int(1), RowValues::Text("alice".into())],
            column_index_cache: cache,
        }
    }

    #[test]
    fn lookup_by_name_and_index() {
        let row = sample_row();
        assert_eq!(row.get_int("id"), Some(1));
        assert_eq!(row.get_text("name"), Some("alice"));
        assert_eq!(row.get_by_index(1), Some(&RowValues::Text("alice".into())));
        assert!(row.get("missing").is_none());
        assert!(row.get_by_index(5).is_none());
    }

    #[test]
    fn typed_getters_reject_mismatches() {
        let row = sample_row();
        assert!(row.get_text("id").is_none());
        assert!(row.get_int("name").is_none());
        assert!(row.get_bool("name").is_none());
    }

    #[test]
    fn column_introspection() {
        let row = sample_row();
        assert!(row.has_column("id"));
        assert!(!row.has_column("age"));
        assert_eq!(row.column_names(), ["id", "name"]);
    }
}
