// ABOUTME: Tests for logging configuration read from the environment
// ABOUTME: Validates format selection, production defaults and the verbose override
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use calisthenics_tracker::logging::{LogFormat, LoggingConfig};
use serial_test::serial;
use std::env;

const VARS: [&str; 5] = ["RUST_LOG", "LOG_FORMAT", "ENVIRONMENT", "SERVICE_NAME", "LOG_INCLUDE_LOCATION"];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    clear_env();
    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("SERVICE_NAME", "test-service");

    let config = LoggingConfig::from_env();
    clear_env();

    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.environment, "production");
    assert_eq!(config.service_name, "test-service");
    assert!(config.include_location);
}

#[test]
#[serial]
fn test_development_defaults() {
    clear_env();
    let config = LoggingConfig::from_env();

    assert_eq!(config.level, "info");
    assert_eq!(config.format, LogFormat::Pretty);
    assert_eq!(config.environment, "development");
    assert_eq!(config.service_name, "calisthenics-tracker");
    assert!(!config.include_location);
}

#[test]
fn test_verbose_raises_level() {
    let config = LoggingConfig::default().verbose();
    assert_eq!(config.level, "debug");
}
