// ABOUTME: Centralized resource container shared by every route handler
// ABOUTME: Holds the database, configuration, upload store and video processor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

//! # Server Resources
//!
//! Built once at startup and handed to every router as `Arc<ServerResources>`.
//! Tests swap the video processor for a fake through [`ServerResources::with_processor`].

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::database::Database;
use crate::media::{FfmpegProcessor, UploadStore, VideoProcessor};

/// Shared state for the HTTP layer
#[derive(Clone)]
pub struct ServerResources {
    pub database: Arc<Database>,
    pub config: Arc<ServerConfig>,
    pub uploads: Arc<UploadStore>,
    pub video_processor: Arc<dyn VideoProcessor>,
}

impl ServerResources {
    /// Resources using the ffmpeg tools named in the configuration
    #[must_use]
    pub fn new(database: Database, config: ServerConfig) -> Self {
        let processor = Arc::new(FfmpegProcessor::new(&config.media));
        Self::with_processor(database, config, processor)
    }

    /// Resources with an explicit video processor
    #[must_use]
    pub fn with_processor(
        database: Database,
        config: ServerConfig,
        video_processor: Arc<dyn VideoProcessor>,
    ) -> Self {
        let uploads = Arc::new(UploadStore::new(config.static_dir.clone()));
        Self {
            database: Arc::new(database),
            config: Arc::new(config),
            uploads,
            video_processor,
        }
    }
}
