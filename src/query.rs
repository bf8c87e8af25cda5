use std::sync::Arc;

use rusqlite::types::Value;
use rusqlite::{Statement, ToSql};

use crate::error::SqliteDispatchError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Extract a `RowValues` from one column of a `SQLite` row.
///
/// # Errors
///
/// Returns `SqliteDispatchError` if the engine cannot read the column.
pub fn extract_row_value(
    row: &rusqlite::Row,
    idx: usize,
) -> Result<RowValues, SqliteDispatchError> {
    let value: Value = row.get(idx).map_err(SqliteDispatchError::SqliteError)?;
    match value {
        Value::Null => Ok(RowValues::Null),
        Value::Integer(i) => Ok(RowValues::Int(i)),
        Value::Real(f) => Ok(RowValues::Float(f)),
        Value::Text(s) => Ok(RowValues::Text(s)),
        Value::Blob(b) => Ok(RowValues::Blob(b)),
    }
}

/// Run a prepared statement and materialize the full result set.
///
/// Column names are read once from the statement metadata and shared by all
/// rows; every result row is then walked to completion, so the returned
/// `rows_affected` equals the number of materialized rows.
///
/// # Errors
///
/// Returns `SqliteDispatchError` if query execution or row extraction fails.
pub fn build_result_set(
    stmt: &mut Statement,
    params: &[Value],
) -> Result<ResultSet, SqliteDispatchError> {
    let param_refs: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let column_count = column_names.len();

    let mut result_set = ResultSet::with_capacity(10);
    result_set.set_column_names(Arc::new(column_names));

    let mut rows_iter = stmt.query(&param_refs[..])?;
    while let Some(row) = rows_iter.next()? {
        let mut row_values = Vec::with_capacity(column_count);
        for i in 0..column_count {
            row_values.push(extract_row_value(row, i)?);
        }
        result_set.add_row_values(row_values);
    }

    Ok(result_set)
}
