//! Comprehensive unit tests for the configuration loader.
//!
//! Most cases go through `from_lookup` to stay independent of the process
//! environment; the `from_env` round trips share a lock because the
//! environment is process-global.

use std::sync::Mutex;

use medrec_init::config::{
    ConnectionSettings, DEFAULT_DRIVER, DEFAULT_PORT, ENV_DATABASE, ENV_DRIVER, ENV_PASSWORD,
    ENV_SERVER, ENV_USER,
};
use medrec_init::error::InitError;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn full_lookup(name: &str) -> Option<String> {
    match name {
        ENV_SERVER => Some("sql.hospital.test".to_string()),
        ENV_DATABASE => Some("medrec".to_string()),
        ENV_USER => Some("initializer".to_string()),
        ENV_PASSWORD => Some("hunter2".to_string()),
        _ => None,
    }
}

#[test]
fn test_loads_complete_settings() {
    let settings = ConnectionSettings::from_lookup(full_lookup).expect("settings");
    assert_eq!(settings.server, "sql.hospital.test");
    assert_eq!(settings.database, "medrec");
    assert_eq!(settings.user, "initializer");
    assert_eq!(settings.password, "hunter2");
}

#[test]
fn test_driver_defaults_when_unset() {
    let settings = ConnectionSettings::from_lookup(full_lookup).expect("settings");
    assert_eq!(settings.driver, DEFAULT_DRIVER);
    assert!(settings.summary().contains(DEFAULT_DRIVER));
}

#[test]
fn test_each_mandatory_variable_is_enforced() {
    for absent in [ENV_SERVER, ENV_DATABASE, ENV_USER, ENV_PASSWORD] {
        let err = ConnectionSettings::from_lookup(|name| {
            if name == absent {
                None
            } else {
                full_lookup(name)
            }
        })
        .expect_err("must fail");
        match err {
            InitError::MissingConfig(names) => assert_eq!(names, vec![absent]),
            other => panic!("unexpected error for {absent}: {other}"),
        }
    }
}

#[test]
fn test_missing_report_names_every_absent_variable() {
    let err = ConnectionSettings::from_lookup(|_| None).expect_err("must fail");
    let text = err.to_string();
    for name in [ENV_SERVER, ENV_DATABASE, ENV_USER, ENV_PASSWORD] {
        assert!(text.contains(name), "report is missing {name}: {text}");
    }
}

#[test]
fn test_server_port_parsing() {
    let settings = ConnectionSettings::from_lookup(|name| {
        if name == ENV_SERVER {
            Some("sql.hospital.test,1533".to_string())
        } else {
            full_lookup(name)
        }
    })
    .expect("settings");
    assert_eq!(
        settings.host_and_port().expect("host/port"),
        ("sql.hospital.test".to_string(), 1533)
    );

    let plain = ConnectionSettings::from_lookup(full_lookup).expect("settings");
    assert_eq!(
        plain.host_and_port().expect("host/port"),
        ("sql.hospital.test".to_string(), DEFAULT_PORT)
    );
}

#[test]
fn test_summary_pins_fixed_connection_parameters() {
    let settings = ConnectionSettings::from_lookup(full_lookup).expect("settings");
    let summary = settings.summary();
    assert!(summary.contains("Encrypt=yes"));
    assert!(summary.contains("TrustServerCertificate=no"));
    assert!(summary.contains("Connection Timeout=30"));
    assert!(!summary.contains("hunter2"));
}

#[test]
fn test_from_env_uses_default_driver() {
    let _guard = ENV_LOCK.lock().expect("env lock");

    std::env::remove_var(ENV_DRIVER);
    std::env::set_var(ENV_SERVER, "sql.hospital.test");
    std::env::set_var(ENV_DATABASE, "medrec");
    std::env::set_var(ENV_USER, "initializer");
    std::env::set_var(ENV_PASSWORD, "hunter2");

    let settings = ConnectionSettings::from_env().expect("settings");
    assert_eq!(settings.driver, DEFAULT_DRIVER);

    for name in [ENV_SERVER, ENV_DATABASE, ENV_USER, ENV_PASSWORD] {
        std::env::remove_var(name);
    }
}

#[test]
fn test_from_env_reports_missing_variable() {
    let _guard = ENV_LOCK.lock().expect("env lock");

    std::env::set_var(ENV_SERVER, "sql.hospital.test");
    std::env::set_var(ENV_DATABASE, "medrec");
    std::env::set_var(ENV_USER, "initializer");
    std::env::remove_var(ENV_PASSWORD);

    let err = ConnectionSettings::from_env().expect_err("must fail");
    match err {
        InitError::MissingConfig(names) => assert_eq!(names, vec![ENV_PASSWORD]),
        other => panic!("unexpected error: {other}"),
    }

    for name in [ENV_SERVER, ENV_DATABASE, ENV_USER] {
        std::env::remove_var(name);
    }
}
