use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use rusqlite::types::Value;
use rusqlite::{Connection, ToSql};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::error::SqliteDispatchError;
use crate::query::build_result_set;
use crate::results::ResultSet;

pub(crate) type Respond<T> = oneshot::Sender<Result<T, SqliteDispatchError>>;

pub(crate) enum Command {
    Query {
        sql: String,
        params: Vec<Value>,
        respond_to: Respond<ResultSet>,
    },
    Execute {
        sql: String,
        params: Vec<Value>,
        respond_to: Respond<ResultSet>,
    },
    Shutdown {
        respond_to: Option<Respond<()>>,
    },
}

/// Handle to the dedicated worker thread that owns the connection.
///
/// The command channel is the serialization point: statements are executed
/// strictly in send order, one at a time, and only on the worker thread.
pub(crate) struct Worker {
    sender: Sender<Command>,
}

impl Worker {
    /// Move the connection onto a freshly spawned worker thread.
    pub(crate) fn spawn(connection: Connection) -> Result<Self, SqliteDispatchError> {
        let (sender, receiver) = mpsc::channel::<Command>();
        let handle = Handle::try_current().ok();
        thread::Builder::new()
            .name("sqlite-dispatch-worker".to_string())
            .spawn(move || {
                let runtime_guard = handle.as_ref().map(|h| h.enter());
                run_worker(connection, &receiver);
                drop(runtime_guard);
            })
            .map_err(|err| {
                SqliteDispatchError::ConnectionError(format!(
                    "failed to spawn SQLite worker thread: {err}"
                ))
            })?;

        Ok(Self { sender })
    }

    /// Enqueue a command; fails once the worker has shut down.
    pub(crate) fn send(&self, command: Command) -> Result<(), SqliteDispatchError> {
        self.sender
            .send(command)
            .map_err(|_| SqliteDispatchError::ConnectionError("SQLite worker is shut down".into()))
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        let _ = self.sender.send(Command::Shutdown { respond_to: None });
    }
}

fn run_worker(connection: Connection, receiver: &Receiver<Command>) {
    debug!("SQLite worker started");
    while let Ok(command) = receiver.recv() {
        match command {
            Command::Query {
                sql,
                params,
                respond_to,
            } => {
                let outcome = run_query(&connection, &sql, &params);
                if respond_to.send(outcome).is_err() {
                    warn!("query result discarded; caller dropped the handle");
                }
            }
            Command::Execute {
                sql,
                params,
                respond_to,
            } => {
                let outcome = run_execute(&connection, &sql, &params);
                if respond_to.send(outcome).is_err() {
                    warn!("execute result discarded; caller dropped the handle");
                }
            }
            Command::Shutdown { respond_to } => {
                debug!("SQLite worker shutting down");
                let outcome = connection.close().map_err(|(_, err)| {
                    SqliteDispatchError::ConnectionError(format!(
                        "failed to close database: {err}"
                    ))
                });
                if let Some(tx) = respond_to {
                    let _ = tx.send(outcome);
                }
                return;
            }
        }
    }
    // All senders dropped without an explicit shutdown; the connection
    // closes when it goes out of scope here.
    debug!("SQLite worker channel closed, exiting");
}

fn run_query(
    connection: &Connection,
    sql: &str,
    params: &[Value],
) -> Result<ResultSet, SqliteDispatchError> {
    let mut stmt = connection.prepare(sql)?;
    build_result_set(&mut stmt, params)
}

fn run_execute(
    connection: &Connection,
    sql: &str,
    params: &[Value],
) -> Result<ResultSet, SqliteDispatchError> {
    let param_refs: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
    let mut stmt = connection.prepare(sql)?;
    let rows_affected = stmt.execute(&param_refs[..])?;
    let mut result_set = ResultSet::default();
    result_set.rows_affected = rows_affected;
    Ok(result_set)
}
