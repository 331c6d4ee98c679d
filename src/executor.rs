//! Sequential schema executor.
//!
//! Walks the dialect's statement list in order over a single connection,
//! drains engine messages when the backend exposes them, and releases the
//! connection exactly once whether the run completed or failed.

use tracing::{error, info, warn};

use crate::backend::{SchemaConnection, SchemaConnector};
use crate::error::{InitError, Result};
use crate::schema::SchemaDialect;

/// Runs the ordered create-if-absent statements for one dialect.
pub struct SchemaInitializer<D> {
    dialect: D,
}

impl<D: SchemaDialect> SchemaInitializer<D> {
    /// Initializer for `dialect`.
    pub const fn new(dialect: D) -> Self {
        Self { dialect }
    }

    /// Dialect in use, for dry runs and log lines.
    pub const fn dialect(&self) -> &D {
        &self.dialect
    }

    /// Ensure all tables exist, then release the connection.
    ///
    /// The first execution error stops the run; remaining statements are not
    /// attempted. The cleanup step runs on every path out of the statement
    /// loop, and a close failure is warned about without masking the primary
    /// result.
    pub async fn run<C: SchemaConnector>(&self, connector: &C) -> Result<()> {
        let mut conn = connector.connect().await?;

        let result = self.execute_all(&mut conn).await;

        match conn.close().await {
            Ok(()) => info!("connection closed"),
            Err(err) => warn!(%err, "connection close reported an error"),
        }

        result
    }

    async fn execute_all<C: SchemaConnection>(&self, conn: &mut C) -> Result<()> {
        info!(dialect = self.dialect.name(), "checking/creating tables");

        for statement in self.dialect.statements() {
            info!(table = statement.table, "ensuring table exists");
            if let Err(error) = conn.execute(&statement.sql).await {
                error!(table = statement.table, %error, "statement failed");
                return Err(InitError::Execution {
                    table: statement.table,
                    error,
                });
            }
            drain_messages(conn);
        }

        info!("schema check complete");
        Ok(())
    }
}

/// Log engine messages when the backend exposes them. Drain failures are
/// cosmetic: warned about and swallowed.
fn drain_messages<C: SchemaConnection>(conn: &mut C) {
    let Some(drain) = conn.messages() else {
        return;
    };
    match drain.drain() {
        Ok(messages) => {
            for message in messages {
                info!("DB message: {message}");
            }
        }
        Err(err) => warn!(%err, "could not fetch engine messages"),
    }
}
