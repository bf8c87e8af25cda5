//! Convenient imports for common functionality.
//!
//! Re-exports the types needed by most callers of the library.

pub use crate::client::{Deferred, SqliteClient};
pub use crate::error::SqliteDispatchError;
pub use crate::results::{DbRow, ResultSet};
pub use crate::types::RowValues;
