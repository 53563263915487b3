// ABOUTME: Database operations for calendar events
// ABOUTME: Range queries back the monthly overview and the upcoming list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use calisthenics_core::errors::{AppError, AppResult};
use calisthenics_core::models::{Event, EventInput, SessionStatus};
use chrono::NaiveDateTime;
use sqlx::{sqlite::SqliteRow, Row};

use super::Database;

const EVENT_COLUMNS: &str = "id, title, category, start_time, status";

impl Database {
    pub(super) async fn migrate_calendar(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                category TEXT NOT NULL,
                start_time TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'scheduled' CHECK (status IN ('scheduled', 'completed'))
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_events_start_time ON events(start_time)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Every event, earliest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_events(&self) -> AppResult<Vec<Event>> {
        let rows = sqlx::query(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY start_time ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list events: {e}")))?;

        rows.iter().map(row_to_event).collect()
    }

    /// Events starting in `[start, end)`, earliest first, optionally with one status
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_events_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        status: Option<SessionStatus>,
    ) -> AppResult<Vec<Event>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {EVENT_COLUMNS} FROM events
            WHERE start_time >= $1 AND start_time < $2 AND ($3 IS NULL OR status = $3)
            ORDER BY start_time ASC, id ASC
            "
        ))
        .bind(start)
        .bind(end)
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list events: {e}")))?;

        rows.iter().map(row_to_event).collect()
    }

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_event(&self, id: i64) -> AppResult<Option<Event>> {
        let row = sqlx::query(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get event: {e}")))?;

        row.as_ref().map(row_to_event).transpose()
    }

    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_event(&self, input: &EventInput) -> AppResult<i64> {
        let result = sqlx::query(
            "INSERT INTO events (title, category, start_time, status) VALUES ($1, $2, $3, $4)",
        )
        .bind(&input.title)
        .bind(&input.category)
        .bind(input.start_time)
        .bind(input.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create event: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// Update title, category and start time; the status is left alone
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_event(&self, id: i64, input: &EventInput) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE events SET title = $1, category = $2, start_time = $3 WHERE id = $4")
                .bind(&input.title)
                .bind(&input.category)
                .bind(input.start_time)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to update event: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn set_event_status(&self, id: i64, status: SessionStatus) -> AppResult<bool> {
        let result = sqlx::query("UPDATE events SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update event: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_event(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete event: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Whether an event with this title already starts at this time
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn event_exists(&self, title: &str, start_time: NaiveDateTime) -> AppResult<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE title = $1 AND start_time = $2")
                .bind(title)
                .bind(start_time)
                .fetch_one(&self.pool)
                .await?;
        Ok(count > 0)
    }
}

fn row_to_event(row: &SqliteRow) -> AppResult<Event> {
    let status: String = row.try_get("status")?;
    Ok(Event {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        category: row.try_get("category")?,
        start_time: row.try_get("start_time")?,
        status: SessionStatus::parse(&status)?,
    })
}
