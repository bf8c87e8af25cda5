// Result model - the materialized output of statement execution
//
// - row: a single row with shared column metadata
// - result_set: ordered rows plus the affected-row count

pub mod result_set;
pub mod row;

pub use result_set::ResultSet;
pub use row::DbRow;
