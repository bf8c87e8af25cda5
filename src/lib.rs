//! Async client for `SQLite` built on a single dedicated worker thread.
//!
//! The connection object is not safe for concurrent use, so every statement
//! is funneled through one FIFO command channel onto one worker thread.
//! Callers get a [`client::Deferred`] future back immediately and await it
//! whenever they need the result.
//!
//! ```no_run
//! use sqlite_dispatch::prelude::*;
//!
//! # async fn demo() -> Result<(), SqliteDispatchError> {
//! let client = SqliteClient::open("app.db")?;
//!
//! client
//!     .execute(
//!         "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, age INTEGER)",
//!         &[],
//!     )
//!     .await?;
//! client
//!     .execute(
//!         "INSERT INTO users (name, age) VALUES (?, ?)",
//!         &[RowValues::Text("alice".into()), RowValues::Int(30)],
//!     )
//!     .await?;
//!
//! let result = client.query("SELECT name, age FROM users", &[]).await?;
//! for row in &result.results {
//!     println!("{:?} is {:?}", row.get_text("name"), row.get_int("age"));
//! }
//!
//! client.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod params;
pub mod prelude;
pub mod query;
pub mod results;
pub mod types;

mod worker;

pub use client::{Deferred, SqliteClient};
pub use error::SqliteDispatchError;
pub use results::{DbRow, ResultSet};
pub use types::RowValues;
