//! SQL Server backend over the TDS protocol.

use async_trait::async_trait;
use tiberius::{AuthMethod, Client, Config, EncryptionLevel};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::info;

use crate::backend::{SchemaConnection, SchemaConnector};
use crate::config::{ConnectionSettings, CONNECT_TIMEOUT};
use crate::error::{EngineError, InitError, Result};

/// Connects to SQL Server with the settings loaded at startup.
pub struct MssqlConnector {
    settings: ConnectionSettings,
}

impl MssqlConnector {
    /// Build a connector around validated settings.
    #[must_use]
    pub const fn new(settings: ConnectionSettings) -> Self {
        Self { settings }
    }

    fn client_config(&self) -> Result<Config> {
        let (host, port) = self.settings.host_and_port()?;
        let mut config = Config::new();
        config.host(host);
        config.port(port);
        config.database(&self.settings.database);
        config.authentication(AuthMethod::sql_server(
            &self.settings.user,
            &self.settings.password,
        ));
        // Encrypt=yes with TrustServerCertificate=no: encryption is required
        // and certificate validation stays on, so trust_cert() is not called.
        config.encryption(EncryptionLevel::Required);
        config.application_name(env!("CARGO_PKG_NAME"));
        Ok(config)
    }
}

#[async_trait]
impl SchemaConnector for MssqlConnector {
    type Conn = MssqlConnection;

    async fn connect(&self) -> Result<MssqlConnection> {
        info!("connecting with {}", self.settings.summary());

        let config = self.client_config()?;
        let tcp = timeout(CONNECT_TIMEOUT, TcpStream::connect(config.get_addr()))
            .await
            .map_err(|_| timeout_error())?
            .map_err(|e| {
                InitError::Connection(EngineError {
                    code: "io".to_string(),
                    message: e.to_string(),
                })
            })?;
        tcp.set_nodelay(true).map_err(|e| {
            InitError::Connection(EngineError {
                code: "io".to_string(),
                message: e.to_string(),
            })
        })?;

        let client = timeout(CONNECT_TIMEOUT, Client::connect(config, tcp.compat_write()))
            .await
            .map_err(|_| timeout_error())?
            .map_err(|e| InitError::Connection(engine_error(e)))?;

        info!("connection successful");
        Ok(MssqlConnection { client })
    }
}

/// One live TDS session.
pub struct MssqlConnection {
    client: Client<Compat<TcpStream>>,
}

#[async_trait]
impl SchemaConnection for MssqlConnection {
    async fn execute(&mut self, sql: &str) -> std::result::Result<(), EngineError> {
        // The guarded batch goes through simple_query; its result stream must
        // be fully consumed before the connection can be reused.
        let stream = self.client.simple_query(sql).await.map_err(engine_error)?;
        stream.into_results().await.map_err(engine_error)?;
        Ok(())
    }

    // tiberius does not surface PRINT output through its public API, so the
    // message capability stays at the default None.

    async fn close(self) -> std::result::Result<(), EngineError> {
        self.client.close().await.map_err(engine_error)
    }
}

fn timeout_error() -> InitError {
    InitError::Connection(EngineError {
        code: "timeout".to_string(),
        message: format!("no response within {}s", CONNECT_TIMEOUT.as_secs()),
    })
}

fn engine_error(err: tiberius::error::Error) -> EngineError {
    match err {
        tiberius::error::Error::Server(e) => EngineError {
            code: e.code().to_string(),
            message: e.message().to_string(),
        },
        other => EngineError {
            code: "driver".to_string(),
            message: other.to_string(),
        },
    }
}
