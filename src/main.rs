//! Command-line entry point for the schema initializer.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use medrec_init::backend::mssql::MssqlConnector;
use medrec_init::config::ConnectionSettings;
use medrec_init::executor::SchemaInitializer;
use medrec_init::logging::init_logging;
use medrec_init::schema::{MssqlDialect, SchemaDialect};

/// Ensure the Patient, Prescription and PrescribedDrug tables exist.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print the DDL statements without connecting
    #[arg(long)]
    dry_run: bool,

    /// Load environment variables from this file instead of ./.env
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // The .env values must be in place before the log filter and the
    // connection settings read the environment.
    if let Some(path) = &cli.env_file {
        if let Err(err) = dotenvy::from_path(path) {
            eprintln!("FATAL ERROR: could not load {}: {}", path.display(), err);
            return ExitCode::from(1);
        }
    } else {
        dotenvy::dotenv().ok();
    }

    if let Err(err) = init_logging(None) {
        eprintln!("FATAL ERROR: could not initialize logging: {err}");
        return ExitCode::from(2);
    }

    let settings = match ConnectionSettings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            error!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };

    let initializer = SchemaInitializer::new(MssqlDialect);

    if cli.dry_run {
        print_statements(&initializer, &settings);
        return ExitCode::SUCCESS;
    }

    info!(
        server = %settings.server,
        database = %settings.database,
        "initializing medical-records schema"
    );

    let connector = MssqlConnector::new(settings);
    match initializer.run(&connector).await {
        Ok(()) => {
            info!("database schema check/creation complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

/// Write the rendered DDL to stdout, target summary first.
fn print_statements(initializer: &SchemaInitializer<MssqlDialect>, settings: &ConnectionSettings) {
    println!("-- target: {}", settings.summary());
    for statement in initializer.dialect().statements() {
        println!("-- table: {}", statement.table);
        println!("{}", statement.sql);
        println!();
    }
}
