//! Connection configuration for the schema initializer.
//!
//! All connection parameters are read once at startup into an explicit
//! [`ConnectionSettings`] value; nothing downstream consults the environment.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::{InitError, Result};

/// Environment variable naming the ODBC driver (optional).
pub const ENV_DRIVER: &str = "ODBC_DRIVER";
/// Environment variable naming the database host, optionally `host,port`.
pub const ENV_SERVER: &str = "DB_SERVER";
/// Environment variable naming the target database.
pub const ENV_DATABASE: &str = "DB_DATABASE";
/// Environment variable naming the authentication principal.
pub const ENV_USER: &str = "DB_USER";
/// Environment variable holding the authentication secret.
pub const ENV_PASSWORD: &str = "DB_PASSWORD";

/// Driver identifier used when `ODBC_DRIVER` is not set.
pub const DEFAULT_DRIVER: &str = "{ODBC Driver 17 for SQL Server}";

/// Port used when `DB_SERVER` does not carry one.
pub const DEFAULT_PORT: u16 = 1433;

/// Timeout applied to the connection attempt.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection descriptor built once at startup and passed into the executor.
#[derive(Clone)]
pub struct ConnectionSettings {
    /// Driver identifier string advertised in the connection summary.
    pub driver: String,
    /// Database host, optionally with an explicit `,port` suffix.
    pub server: String,
    /// Target database name.
    pub database: String,
    /// Authentication principal.
    pub user: String,
    /// Authentication secret. Never logged.
    pub password: String,
}

impl ConnectionSettings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load settings through an arbitrary lookup function.
    ///
    /// Every absent mandatory value is collected so the fatal report names
    /// all of them at once. An empty value counts as absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut required = |name: &'static str| match lookup(name) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(name);
                String::new()
            }
        };

        let server = required(ENV_SERVER);
        let database = required(ENV_DATABASE);
        let user = required(ENV_USER);
        let password = required(ENV_PASSWORD);

        if !missing.is_empty() {
            return Err(InitError::MissingConfig(missing));
        }

        let settings = Self {
            driver: lookup(ENV_DRIVER).unwrap_or_else(|| DEFAULT_DRIVER.to_string()),
            server,
            database,
            user,
            password,
        };

        // Surface a malformed port before any connection is attempted.
        settings.host_and_port()?;

        Ok(settings)
    }

    /// Split `DB_SERVER` into host and port, honoring the ODBC `host,port` form.
    pub fn host_and_port(&self) -> Result<(String, u16)> {
        match self.server.split_once(',') {
            Some((host, port)) => {
                let port = port.trim().parse::<u16>().map_err(|_| {
                    InitError::InvalidConfig(format!("invalid port in {ENV_SERVER}: {port}"))
                })?;
                Ok((host.trim().to_string(), port))
            }
            None => Ok((self.server.trim().to_string(), DEFAULT_PORT)),
        }
    }

    /// Connection summary safe to log: the ODBC-style string with the secret masked.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "DRIVER={};SERVER={};DATABASE={};UID={};PWD=***;Encrypt=yes;TrustServerCertificate=no;Connection Timeout={}",
            self.driver,
            self.server,
            self.database,
            self.user,
            CONNECT_TIMEOUT.as_secs()
        )
    }
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("driver", &self.driver)
            .field("server", &self.server)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}
