// ABOUTME: Main library entry point for the calisthenics tracker web application
// ABOUTME: Server-rendered pages for workouts, goals, schedule, health, videos and the tournament
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

#![deny(unsafe_code)]

//! # Calisthenics Tracker
//!
//! A single-user training log served as HTML pages over HTTP, backed by SQLite.
//!
//! ## Features
//!
//! - **Exercise library**: named workouts with sets, reps and rest
//! - **Goals**: target dates, progress and before/after photos
//! - **Planning**: training plans, a weekly schedule with sticky notes and a calendar
//! - **Health**: profile, body measurements with BMI and a CSV export
//! - **Media**: motivation board and a video library with ffmpeg thumbnails
//! - **Tournament**: challenges, experience points, levels, ranks and badges
//!
//! ## Architecture
//!
//! - **Database**: one `sqlx` SQLite pool with a module per domain
//! - **Services**: page data assembly and multi-step operations
//! - **Views**: HTML rendering into a shared layout
//! - **Routes**: thin axum handlers that answer with pages or redirects
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use calisthenics_tracker::config::ServerConfig;
//! use calisthenics_tracker::database::Database;
//! use calisthenics_tracker::resources::ServerResources;
//! use calisthenics_tracker::server::TrackerServer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let database = Database::new(&config.database.to_connection_string()).await?;
//!     let resources = Arc::new(ServerResources::new(database, config));
//!     TrackerServer::new(resources).run().await
//! }
//! ```

/// Environment configuration for the server and tools
pub mod config;

/// SQLite persistence, one module per domain
pub mod database;

/// Page error type rendering failures as HTML
pub mod errors;

/// One-shot notices carried across redirects
pub mod flash;

/// Form and multipart submission helpers
pub mod forms;

/// Tracing subscriber setup
pub mod logging;

/// Upload storage and video processing
pub mod media;

/// Shared state handed to every router
pub mod resources;

/// HTTP route handlers organized by domain
pub mod routes;

/// Server lifecycle and graceful shutdown
pub mod server;

/// Page data assembly and multi-step operations
pub mod services;

/// HTML rendering
pub mod views;
