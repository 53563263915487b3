// ABOUTME: Database operations for weekly schedule slots and sticky notes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use calisthenics_core::errors::{AppError, AppResult};
use calisthenics_core::models::{
    parse_weekday, weekday_name, ScheduleItem, ScheduleItemInput, SessionStatus, StickyNote,
    StickyNoteInput,
};
use sqlx::{sqlite::SqliteRow, Row};

use super::Database;

impl Database {
    pub(super) async fn migrate_schedule(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS schedule_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                details TEXT,
                day_of_week TEXT NOT NULL,
                time TEXT NOT NULL,
                category TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'scheduled' CHECK (status IN ('scheduled', 'completed'))
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS sticky_notes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                color TEXT NOT NULL DEFAULT 'yellow'
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ========================================================================
    // Schedule items
    // ========================================================================

    /// All slots ordered by time of day
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_schedule_items(&self) -> AppResult<Vec<ScheduleItem>> {
        let rows = sqlx::query(
            "SELECT id, title, details, day_of_week, time, category, status FROM schedule_items ORDER BY time, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list schedule items: {e}")))?;

        rows.iter().map(row_to_schedule_item).collect()
    }

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_schedule_item(&self, id: i64) -> AppResult<Option<ScheduleItem>> {
        let row = sqlx::query(
            "SELECT id, title, details, day_of_week, time, category, status FROM schedule_items WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get schedule item: {e}")))?;

        row.as_ref().map(row_to_schedule_item).transpose()
    }

    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_schedule_item(&self, input: &ScheduleItemInput) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO schedule_items (title, details, day_of_week, time, category)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(&input.title)
        .bind(input.details.as_deref())
        .bind(weekday_name(input.day_of_week))
        .bind(input.time)
        .bind(&input.category)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create schedule item: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_schedule_item(&self, id: i64, input: &ScheduleItemInput) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE schedule_items
            SET title = $1, details = $2, day_of_week = $3, time = $4, category = $5
            WHERE id = $6
            ",
        )
        .bind(&input.title)
        .bind(input.details.as_deref())
        .bind(weekday_name(input.day_of_week))
        .bind(input.time)
        .bind(&input.category)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update schedule item: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn set_schedule_item_status(&self, id: i64, status: SessionStatus) -> AppResult<bool> {
        let result = sqlx::query("UPDATE schedule_items SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update schedule item: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_schedule_item(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM schedule_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete schedule item: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    // ========================================================================
    // Sticky notes
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_sticky_notes(&self) -> AppResult<Vec<StickyNote>> {
        let rows = sqlx::query("SELECT id, title, content, color FROM sticky_notes ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list sticky notes: {e}")))?;

        rows.iter().map(row_to_sticky_note).collect()
    }

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_sticky_note(&self, id: i64) -> AppResult<Option<StickyNote>> {
        let row = sqlx::query("SELECT id, title, content, color FROM sticky_notes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get sticky note: {e}")))?;

        row.as_ref().map(row_to_sticky_note).transpose()
    }

    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_sticky_note(&self, input: &StickyNoteInput) -> AppResult<i64> {
        let result = sqlx::query("INSERT INTO sticky_notes (title, content, color) VALUES ($1, $2, $3)")
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.color)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create sticky note: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_sticky_note(&self, id: i64, input: &StickyNoteInput) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE sticky_notes SET title = $1, content = $2, color = $3 WHERE id = $4")
                .bind(&input.title)
                .bind(&input.content)
                .bind(&input.color)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to update sticky note: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_sticky_note(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM sticky_notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete sticky note: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_schedule_item(row: &SqliteRow) -> AppResult<ScheduleItem> {
    let day: String = row.try_get("day_of_week")?;
    let status: String = row.try_get("status")?;
    Ok(ScheduleItem {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        details: row.try_get("details")?,
        day_of_week: parse_weekday(&day)?,
        time: row.try_get("time")?,
        category: row.try_get("category")?,
        status: SessionStatus::parse(&status)?,
    })
}

fn row_to_sticky_note(row: &SqliteRow) -> AppResult<StickyNote> {
    Ok(StickyNote {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        color: row.try_get("color")?,
    })
}
