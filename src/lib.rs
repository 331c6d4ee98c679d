//! Medrec Init - Medical-Records Schema Initializer
//!
//! Ensures the Patient, Prescription and PrescribedDrug tables exist in the
//! target database, creating any that are missing and leaving existing ones
//! untouched. Safe to run repeatedly.
//!
//! # Features
//!
//! - Connection settings from the environment (optionally via a `.env` file)
//! - Guarded, ordered DDL honoring the foreign-key dependency chain
//! - SQL Server and SQLite dialects behind one executor
//! - Guaranteed connection release on success and failure

/// Database backends behind the executor's seam
pub mod backend;
/// Connection configuration
pub mod config;
/// Error taxonomy
pub mod error;
/// Sequential schema executor
pub mod executor;
/// Logging setup
pub mod logging;
/// Schema definitions and SQL dialects
pub mod schema;

// Re-export key components for easier access
pub use config::ConnectionSettings;
pub use error::{EngineError, InitError};
pub use executor::SchemaInitializer;
pub use schema::{MssqlDialect, SchemaDialect, SchemaStatement, SqliteDialect};
