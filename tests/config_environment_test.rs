// ABOUTME: Tests for environment-driven server configuration
// ABOUTME: Covers defaults, overrides, invalid values and database URL parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use calisthenics_tracker::config::{DatabaseUrl, Environment, ServerConfig};
use serial_test::serial;

const VARS: [&str; 8] = [
    "HOST",
    "PORT",
    "ENVIRONMENT",
    "DATABASE_URL",
    "STATIC_DIR",
    "MAX_UPLOAD_MB",
    "FFMPEG_PATH",
    "FFPROBE_PATH",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_environment_parsing() {
    assert_eq!(Environment::from_str_or_default("PROD"), Environment::Production);
    assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
    assert_eq!(Environment::from_str_or_default("anything"), Environment::Development);
    assert!(Environment::Production.is_production());
}

#[test]
fn test_database_url_parsing() {
    let file = DatabaseUrl::parse_url("sqlite:./data/calisthenics.db");
    assert_eq!(file.to_connection_string(), "sqlite:./data/calisthenics.db");
    assert!(!file.is_memory());

    assert!(DatabaseUrl::parse_url("sqlite::memory:").is_memory());
    assert_eq!(
        DatabaseUrl::parse_url("sqlite://tracker.db"),
        DatabaseUrl::SQLite {
            path: PathBuf::from("tracker.db")
        }
    );
    assert_eq!(
        DatabaseUrl::parse_url("plain.db").to_connection_string(),
        "sqlite:plain.db"
    );
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 5000);
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.static_dir, PathBuf::from("./static"));
    assert_eq!(config.max_upload_mb, 500);
    assert_eq!(config.max_upload_bytes(), 500 * 1024 * 1024);
    assert_eq!(config.media.ffmpeg_path, PathBuf::from("ffmpeg"));
    assert_eq!(
        config.database.to_connection_string(),
        "sqlite:./calisthenics.db"
    );
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_env();
    env::set_var("HOST", "127.0.0.1");
    env::set_var("PORT", "8080");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("MAX_UPLOAD_MB", "64");
    env::set_var("FFPROBE_PATH", "/opt/ffmpeg/bin/ffprobe");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.bind_addr(), "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
    assert!(config.environment.is_production());
    assert!(config.database.is_memory());
    assert_eq!(config.max_upload_mb, 64);
    assert_eq!(config.media.ffprobe_path, PathBuf::from("/opt/ffmpeg/bin/ffprobe"));
    assert!(config.summary().contains("127.0.0.1:8080"));
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    clear_env();
    env::set_var("PORT", "not-a-port");
    assert!(ServerConfig::from_env().is_err());

    clear_env();
    env::set_var("MAX_UPLOAD_MB", "0");
    assert!(ServerConfig::from_env().is_err());

    clear_env();
    env::set_var("HOST", "localhost:5000");
    assert!(ServerConfig::from_env().is_err());
    clear_env();
}

#[test]
fn test_static_dir_must_be_a_directory() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let config = ServerConfig {
        static_dir: file.path().to_path_buf(),
        ..ServerConfig::default()
    };
    assert!(config.validate().is_err());

    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig {
        static_dir: dir.path().to_path_buf(),
        ..ServerConfig::default()
    };
    assert!(config.validate().is_ok());
}
