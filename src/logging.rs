// ABOUTME: Logging configuration and structured logging setup for the tracker
// ABOUTME: Configures log levels, output format and noise filters for the tracing subscriber
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

//! Structured logging configuration

use std::env;
use std::io;

use anyhow::Result;
use calisthenics_core::constants::service_names;
use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Dependency crates whose chatter is held down regardless of `RUST_LOG`
const NOISY_CRATES: [&str; 5] = [
    "hyper=warn",
    "hyper::proto=warn",
    "sqlx=warn",
    "sqlx::query=warn",
    "tower_http=info",
];

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include span open/close events
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, testing, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` lines for production
    Json,
    /// Multi-line human format for development
    Pretty,
    /// Single-line format
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_spans: false,
            service_name: service_names::CALISTHENICS_TRACKER.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());

        let format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        };

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let is_production = environment == "production";

        Self {
            level,
            format,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| service_names::CALISTHENICS_TRACKER.into()),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment,
        }
    }

    /// Verbose configuration used by `-v` on the command line
    #[must_use]
    pub fn verbose(mut self) -> Self {
        self.level = "debug".into();
        self
    }

    /// Filter with the noisy dependency crates held down
    fn env_filter(&self) -> EnvFilter {
        let base = env::var("RUST_LOG").unwrap_or_else(|_| self.level.clone());
        NOISY_CRATES
            .iter()
            .fold(EnvFilter::new(base), |filter, directive| {
                filter.add_directive(
                    directive
                        .parse()
                        .unwrap_or_else(|_| tracing::Level::WARN.into()),
                )
            })
            .add_directive(
                format!("calisthenics_tracker={}", self.level)
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::INFO.into()),
            )
    }

    /// Initialize the global tracing subscriber
    ///
    /// Exactly one of the optional format layers is present, so the stack
    /// keeps a single concrete type whatever format was chosen.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let json = (self.format == LogFormat::Json).then(|| {
            fmt::layer()
                .json()
                .with_file(self.include_location)
                .with_line_number(self.include_location)
                .with_writer(io::stdout)
                .with_span_events(span_events.clone())
        });
        let pretty = (self.format == LogFormat::Pretty).then(|| {
            fmt::layer()
                .with_file(self.include_location)
                .with_line_number(self.include_location)
                .with_writer(io::stdout)
                .with_span_events(span_events)
        });
        let compact = (self.format == LogFormat::Compact)
            .then(|| fmt::layer().compact().with_target(false).with_writer(io::stdout));

        tracing_subscriber::registry()
            .with(self.env_filter())
            .with(json)
            .with(pretty)
            .with(compact)
            .try_init()?;

        info!(
            service = %self.service_name,
            version = %self.service_version,
            environment = %self.environment,
            level = %self.level,
            format = ?self.format,
            location = self.include_location,
            spans = self.include_spans,
            "Logging configured"
        );
        Ok(())
    }
}
