// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Reads bind address, database location, static root, upload limit and media tool paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use calisthenics_core::constants::{database, network};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Environment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// SQLite database file
    SQLite { path: PathBuf },
    /// In-memory SQLite (tests)
    Memory,
}

impl DatabaseUrl {
    /// Parse a `sqlite:` URL or a bare file path
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s
            .strip_prefix("sqlite://")
            .or_else(|| s.strip_prefix("sqlite:"))
            .unwrap_or(s);
        if path_str == ":memory:" || path_str.is_empty() {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str),
            }
        }
    }

    /// Connection string understood by sqlx
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(database::DEFAULT_DATABASE_URL)
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// External media tools used by the video pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaToolConfig {
    /// `ffmpeg` executable
    pub ffmpeg_path: PathBuf,
    /// `ffprobe` executable
    pub ffprobe_path: PathBuf,
}

impl Default for MediaToolConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            ffprobe_path: PathBuf::from("ffprobe"),
        }
    }
}

/// Server configuration loaded from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: IpAddr,
    /// HTTP port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Database location
    pub database: DatabaseUrl,
    /// Root served under `/static`; uploads live below it
    pub static_dir: PathBuf,
    /// Request body limit in megabytes
    pub max_upload_mb: u64,
    /// Media tools
    pub media: MediaToolConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            http_port: network::DEFAULT_HTTP_PORT,
            environment: Environment::default(),
            database: DatabaseUrl::default(),
            static_dir: PathBuf::from("./static"),
            max_upload_mb: network::DEFAULT_MAX_UPLOAD_MB,
            media: MediaToolConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed, or if the
    /// resulting configuration fails validation
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            host: env_var_or("HOST", network::DEFAULT_HOST)
                .parse()
                .context("HOST must be an IP address")?,
            http_port: env_var_or("PORT", &network::DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("PORT must be a valid port number")?,
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            database: DatabaseUrl::parse_url(&env_var_or(
                "DATABASE_URL",
                database::DEFAULT_DATABASE_URL,
            )),
            static_dir: PathBuf::from(env_var_or("STATIC_DIR", "./static")),
            max_upload_mb: env_var_or(
                "MAX_UPLOAD_MB",
                &network::DEFAULT_MAX_UPLOAD_MB.to_string(),
            )
            .parse()
            .context("MAX_UPLOAD_MB must be a whole number")?,
            media: MediaToolConfig {
                ffmpeg_path: PathBuf::from(env_var_or("FFMPEG_PATH", "ffmpeg")),
                ffprobe_path: PathBuf::from(env_var_or("FFPROBE_PATH", "ffprobe")),
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error for a zero upload limit or a static root that exists but is not a directory
    pub fn validate(&self) -> Result<()> {
        if self.max_upload_mb == 0 {
            return Err(anyhow!("MAX_UPLOAD_MB must be greater than zero"));
        }
        if self.static_dir.exists() && !self.static_dir.is_dir() {
            return Err(anyhow!(
                "STATIC_DIR {} is not a directory",
                self.static_dir.display()
            ));
        }
        Ok(())
    }

    /// Socket address to bind
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.http_port)
    }

    /// Request body limit in bytes
    #[must_use]
    pub const fn max_upload_bytes(&self) -> usize {
        (self.max_upload_mb as usize).saturating_mul(1024 * 1024)
    }

    /// Static root
    #[must_use]
    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Calisthenics Tracker Configuration:\n\
             - Bind: {}\n\
             - Environment: {}\n\
             - Database: {}\n\
             - Static Root: {}\n\
             - Upload Limit: {} MB\n\
             - ffmpeg: {}\n\
             - ffprobe: {}",
            self.bind_addr(),
            self.environment,
            self.database,
            self.static_dir.display(),
            self.max_upload_mb,
            self.media.ffmpeg_path.display(),
            self.media.ffprobe_path.display(),
        )
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_parsing() {
        assert_eq!(DatabaseUrl::parse_url("sqlite::memory:"), DatabaseUrl::Memory);
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:./data/app.db"),
            DatabaseUrl::SQLite {
                path: PathBuf::from("./data/app.db")
            }
        );
        assert_eq!(
            DatabaseUrl::parse_url("tracker.db").to_connection_string(),
            "sqlite:tracker.db"
        );
    }

    #[test]
    fn test_environment_fallback() {
        assert_eq!(Environment::from_str_or_default("PROD"), Environment::Production);
        assert_eq!(Environment::from_str_or_default("anything"), Environment::Development);
    }

    #[test]
    fn test_default_upload_limit_bytes() {
        let config = ServerConfig::default();
        assert_eq!(config.max_upload_bytes(), 500 * 1024 * 1024);
        assert_eq!(config.bind_addr().port(), 5000);
    }
}
