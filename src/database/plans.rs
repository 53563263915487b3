// ABOUTME: Database operations for training plans spanning a date range
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use calisthenics_core::errors::{AppError, AppResult};
use calisthenics_core::models::{PlanInput, PlanStatus, TrainingPlan};
use sqlx::{sqlite::SqliteRow, Row};

use super::Database;

impl Database {
    pub(super) async fn migrate_plans(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS training_plans (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'upcoming' CHECK (status IN ('upcoming', 'pending', 'completed'))
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All plans ordered by start date
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_plans(&self) -> AppResult<Vec<TrainingPlan>> {
        let rows = sqlx::query(
            "SELECT id, title, description, start_date, end_date, status FROM training_plans ORDER BY start_date, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list training plans: {e}")))?;

        rows.iter().map(row_to_plan).collect()
    }

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_plan(&self, id: i64) -> AppResult<Option<TrainingPlan>> {
        let row = sqlx::query(
            "SELECT id, title, description, start_date, end_date, status FROM training_plans WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get training plan: {e}")))?;

        row.as_ref().map(row_to_plan).transpose()
    }

    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_plan(&self, input: &PlanInput, status: PlanStatus) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO training_plans (title, description, start_date, end_date, status)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create training plan: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_plan(
        &self,
        id: i64,
        input: &PlanInput,
        status: PlanStatus,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE training_plans
            SET title = $1, description = $2, start_date = $3, end_date = $4, status = $5
            WHERE id = $6
            ",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(status.as_str())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update training plan: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_plan(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM training_plans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete training plan: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_plan(row: &SqliteRow) -> AppResult<TrainingPlan> {
    let status: String = row.try_get("status")?;
    Ok(TrainingPlan {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        status: PlanStatus::parse(&status)?,
    })
}
