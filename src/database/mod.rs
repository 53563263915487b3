// ABOUTME: SQLite persistence for every tracker domain
// ABOUTME: Owns the connection pool and runs idempotent per-domain schema migrations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

//! # Database Management
//!
//! A single [`Database`] handle wraps the sqlx pool. Each domain adds its own
//! `impl Database` block in a sibling module together with the `CREATE TABLE IF
//! NOT EXISTS` statements it owns, so migrations can run on every start.

mod calendar;
mod goals;
mod health;
mod motivation;
mod plans;
mod schedule;
mod tournament;
mod videos;
mod workouts;

pub use tournament::{CompletionRecord, UnlockedMilestone};

use std::str::FromStr;

use calisthenics_core::constants::database::DEFAULT_POOL_SIZE;
use calisthenics_core::errors::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Database manager for all tracker tables
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database at `database_url` and migrate it
    ///
    /// In-memory URLs get a single long-lived connection so every query sees
    /// the same database.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed, the connection fails or a
    /// migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid database URL {database_url}: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let in_memory = database_url.contains(":memory:");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(DEFAULT_POOL_SIZE)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open {database_url}: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        info!(database = %database_url, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        // Profile first: goals, motivation and videos reference it
        self.migrate_health().await?;
        self.migrate_workouts().await?;
        self.migrate_calendar().await?;
        self.migrate_schedule().await?;
        self.migrate_plans().await?;
        self.migrate_goals().await?;
        self.migrate_motivation().await?;
        self.migrate_videos().await?;
        self.migrate_tournament().await?;
        debug!("Database migrations complete");
        Ok(())
    }

    /// Cheap connectivity probe for the readiness endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
