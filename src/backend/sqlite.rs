//! SQLite backend.
//!
//! Serves the same executor through the SQLite dialect; used for local runs
//! against a file database and by the engine-level tests.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rusqlite::Connection;
use tracing::info;

use crate::backend::{SchemaConnection, SchemaConnector};
use crate::error::{EngineError, InitError, Result};

/// Opens the SQLite database file at a fixed path.
pub struct SqliteConnector {
    path: PathBuf,
}

impl SqliteConnector {
    /// Connector for the database at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl SchemaConnector for SqliteConnector {
    type Conn = SqliteConnection;

    async fn connect(&self) -> Result<SqliteConnection> {
        info!("opening sqlite database at {}", self.path.display());
        let conn = Connection::open(&self.path)
            .map_err(|e| InitError::Connection(engine_error(e)))?;
        // Foreign keys are off by default in SQLite; cascade deletes need them.
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| InitError::Connection(engine_error(e)))?;
        Ok(SqliteConnection { conn })
    }
}

/// One open SQLite database handle.
pub struct SqliteConnection {
    conn: Connection,
}

#[async_trait]
impl SchemaConnection for SqliteConnection {
    async fn execute(&mut self, sql: &str) -> std::result::Result<(), EngineError> {
        self.conn.execute_batch(sql).map_err(engine_error)
    }

    async fn close(self) -> std::result::Result<(), EngineError> {
        self.conn.close().map_err(|(_, e)| engine_error(e))
    }
}

fn engine_error(err: rusqlite::Error) -> EngineError {
    let code = match &err {
        rusqlite::Error::SqliteFailure(e, _) => e.extended_code.to_string(),
        _ => "driver".to_string(),
    };
    EngineError {
        code,
        message: err.to_string(),
    }
}
