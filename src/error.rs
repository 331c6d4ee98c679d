//! Error types for the schema initializer.
//!
//! This module provides custom error types using `thiserror`, one variant per
//! error class: configuration, connection, execution, and everything else.

use std::fmt;

use thiserror::Error;

/// Code/message pair reported by a database engine or its driver.
#[derive(Debug, Clone)]
pub struct EngineError {
    /// Engine or driver error code (e.g. a SQLSTATE or an extended result code).
    pub code: String,
    /// Human-readable message from the engine.
    pub message: String,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Errors that can occur while initializing the database schema.
#[derive(Error, Debug)]
pub enum InitError {
    /// One or more mandatory environment variables are absent.
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingConfig(Vec<&'static str>),

    /// A configuration value is present but unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The engine rejected the connection attempt.
    #[error("connection failed: {0}")]
    Connection(EngineError),

    /// A DDL statement was rejected by the engine.
    #[error("statement for table {table} failed: {error}")]
    Execution {
        /// Table whose guarded statement failed.
        table: &'static str,
        /// Engine-reported code and message.
        error: EngineError,
    },

    /// Anything the other classes do not cover.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl InitError {
    /// Process exit code for this error class.
    ///
    /// Configuration problems exit with 1, matching the documented contract;
    /// connection, execution and unexpected errors exit with 2 so that a
    /// failed run is distinguishable from a missing-configuration abort.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::MissingConfig(_) | Self::InvalidConfig(_) => 1,
            Self::Connection(_) | Self::Execution { .. } | Self::Unexpected(_) => 2,
        }
    }
}

/// Convenience type alias for Result with InitError
pub type Result<T> = std::result::Result<T, InitError>;
