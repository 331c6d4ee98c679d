//! Database backends behind the executor's connect/execute/close seam.
//!
//! The executor only sees the traits defined here; the concrete engines live
//! in the submodules. Engine-message draining is an explicit optional
//! capability: a backend whose driver exposes no messages simply returns
//! `None` instead of probing at runtime.

/// SQL Server backend over the TDS protocol
pub mod mssql;
/// SQLite backend
pub mod sqlite;

use async_trait::async_trait;

use crate::error::{EngineError, Result};

/// Opens connections for the executor.
#[async_trait]
pub trait SchemaConnector {
    /// Connection type produced on success.
    type Conn: SchemaConnection;

    /// Open one connection with autocommit semantics.
    async fn connect(&self) -> Result<Self::Conn>;
}

/// A live connection able to run DDL batches.
#[async_trait]
pub trait SchemaConnection: Send {
    /// Execute one DDL batch. Each batch commits on its own.
    async fn execute(&mut self, sql: &str) -> std::result::Result<(), EngineError>;

    /// Engine-message capability; `None` when the driver exposes no messages.
    fn messages(&mut self) -> Option<&mut dyn MessageDrain> {
        None
    }

    /// Release the connection.
    async fn close(self) -> std::result::Result<(), EngineError>;
}

/// Drains informational messages emitted by the engine.
pub trait MessageDrain {
    /// Messages accumulated since the previous drain.
    fn drain(&mut self) -> std::result::Result<Vec<String>, EngineError>;
}
