// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, temporary static roots and a fake video processor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `calisthenics_tracker`

use std::path::Path;
use std::sync::{Arc, Once};

use async_trait::async_trait;
use axum::Router;
use calisthenics_core::errors::{AppError, AppResult};
use calisthenics_core::models::UserProfile;
use calisthenics_tracker::config::{DatabaseUrl, ServerConfig};
use calisthenics_tracker::database::Database;
use calisthenics_tracker::media::VideoProcessor;
use calisthenics_tracker::resources::ServerResources;
use calisthenics_tracker::routes::build_router;
use tempfile::TempDir;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fresh migrated in-memory database
pub async fn create_test_database() -> Database {
    init_test_logging();
    Database::new("sqlite::memory:")
        .await
        .expect("Failed to create test database")
}

/// Database with the single profile already created
pub async fn create_test_database_with_profile() -> (Database, UserProfile) {
    let database = create_test_database().await;
    let (profile, _) = database
        .get_or_create_profile()
        .await
        .expect("Failed to create profile");
    (database, profile)
}

/// Video processor that never launches a process
pub struct FakeVideoProcessor {
    duration: Option<f64>,
}

impl FakeVideoProcessor {
    /// Reports `seconds` for every probe
    pub fn succeeding(seconds: f64) -> Arc<Self> {
        Arc::new(Self {
            duration: Some(seconds),
        })
    }

    /// Fails every probe as if ffprobe were missing
    pub fn failing() -> Arc<Self> {
        Arc::new(Self { duration: None })
    }
}

#[async_trait]
impl VideoProcessor for FakeVideoProcessor {
    async fn probe_duration(&self, _video: &Path) -> AppResult<f64> {
        self.duration
            .ok_or_else(|| AppError::external_tool("ffprobe", "not installed"))
    }

    async fn extract_thumbnail(&self, _video: &Path, thumbnail: &Path) -> AppResult<()> {
        if let Some(parent) = thumbnail.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::internal(e.to_string()))?;
        }
        tokio::fs::write(thumbnail, b"jpeg")
            .await
            .map_err(|e| AppError::internal(e.to_string()))
    }
}

/// A running application wired to an in-memory database and a temporary static root
pub struct TestApp {
    pub resources: Arc<ServerResources>,
    pub static_dir: TempDir,
}

impl TestApp {
    /// Application using a processor that always succeeds
    pub async fn new() -> Self {
        Self::with_processor(FakeVideoProcessor::succeeding(125.0)).await
    }

    pub async fn with_processor(processor: Arc<dyn VideoProcessor>) -> Self {
        let database = create_test_database().await;
        let static_dir = TempDir::new().expect("Failed to create static dir");
        let config = ServerConfig {
            database: DatabaseUrl::Memory,
            static_dir: static_dir.path().to_path_buf(),
            ..ServerConfig::default()
        };
        let resources = Arc::new(ServerResources::with_processor(database, config, processor));
        resources
            .uploads
            .ensure_directories()
            .await
            .expect("Failed to create upload directories");
        Self {
            resources,
            static_dir,
        }
    }

    /// Fully layered router
    pub fn router(&self) -> Router {
        build_router(&self.resources)
    }

    pub fn database(&self) -> &Database {
        &self.resources.database
    }

    /// The profile, created on first use
    pub async fn profile(&self) -> UserProfile {
        self.database()
            .get_or_create_profile()
            .await
            .expect("Failed to load profile")
            .0
    }
}
