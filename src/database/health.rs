// ABOUTME: Database operations for the user profile, health records and health plan items
// ABOUTME: The profile row also stores tournament level and experience points
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use calisthenics_core::constants::leveling::STARTING_LEVEL;
use calisthenics_core::errors::{AppError, AppResult};
use calisthenics_core::models::{
    HealthPlanItem, HealthRecord, HealthRecordInput, PlanItemStatus, ProfileUpdate, UserProfile,
};
use chrono::NaiveDate;
use sqlx::{sqlite::SqliteRow, Row};

use super::Database;

impl Database {
    /// Create profile, health record and health plan tables
    pub(super) async fn migrate_health(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_profile (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                height REAL,
                age INTEGER,
                gender TEXT,
                level INTEGER NOT NULL DEFAULT 1,
                experience_points INTEGER NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS health_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                weight REAL,
                body_fat REAL,
                notes TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_health_records_date ON health_records(date)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS health_plan_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'completed'))
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ========================================================================
    // Profile
    // ========================================================================

    /// The profile, which is the first profile row
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_profile(&self) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query(
            "SELECT id, height, age, gender, level, experience_points FROM user_profile ORDER BY id LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load profile: {e}")))?;

        row.map(|r| row_to_profile(&r)).transpose()
    }

    /// Insert a level 1 profile with no XP
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_default_profile(&self) -> AppResult<UserProfile> {
        let id = sqlx::query(
            "INSERT INTO user_profile (level, experience_points) VALUES ($1, 0)",
        )
        .bind(STARTING_LEVEL)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(UserProfile {
            id,
            ..UserProfile::empty()
        })
    }

    /// The profile, creating a default one when none exists
    ///
    /// The flag is `true` when the profile was just created.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn get_or_create_profile(&self) -> AppResult<(UserProfile, bool)> {
        match self.get_profile().await? {
            Some(profile) => Ok((profile, false)),
            None => Ok((self.create_default_profile().await?, true)),
        }
    }

    /// Overwrite height, age and gender, creating the profile if absent
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn upsert_profile(&self, update: &ProfileUpdate) -> AppResult<UserProfile> {
        let (profile, _) = self.get_or_create_profile().await?;
        sqlx::query("UPDATE user_profile SET height = $1, age = $2, gender = $3 WHERE id = $4")
            .bind(update.height)
            .bind(update.age)
            .bind(update.gender.as_deref())
            .bind(profile.id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update profile: {e}")))?;

        Ok(UserProfile {
            height: update.height,
            age: update.age,
            gender: update.gender.clone(),
            ..profile
        })
    }

    // ========================================================================
    // Health records
    // ========================================================================

    /// All records, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_health_records(&self) -> AppResult<Vec<HealthRecord>> {
        let rows = sqlx::query(
            "SELECT id, date, weight, body_fat, notes FROM health_records ORDER BY date DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list health records: {e}")))?;

        rows.iter().map(row_to_health_record).collect()
    }

    /// Records dated on or after `since`, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_health_records_since(&self, since: NaiveDate) -> AppResult<Vec<HealthRecord>> {
        let rows = sqlx::query(
            "SELECT id, date, weight, body_fat, notes FROM health_records WHERE date >= $1 ORDER BY date ASC, id ASC",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list health records: {e}")))?;

        rows.iter().map(row_to_health_record).collect()
    }

    /// Records dated in `[start, end)`, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_health_records_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<HealthRecord>> {
        let rows = sqlx::query(
            "SELECT id, date, weight, body_fat, notes FROM health_records WHERE date >= $1 AND date < $2 ORDER BY date ASC, id ASC",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list health records: {e}")))?;

        rows.iter().map(row_to_health_record).collect()
    }

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_health_record(&self, id: i64) -> AppResult<Option<HealthRecord>> {
        let row = sqlx::query("SELECT id, date, weight, body_fat, notes FROM health_records WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get health record: {e}")))?;

        row.as_ref().map(row_to_health_record).transpose()
    }

    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_health_record(&self, input: &HealthRecordInput) -> AppResult<i64> {
        let result = sqlx::query(
            "INSERT INTO health_records (date, weight, body_fat, notes) VALUES ($1, $2, $3, $4)",
        )
        .bind(input.date)
        .bind(input.weight)
        .bind(input.body_fat)
        .bind(input.notes.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create health record: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// Returns `false` when no record has this id
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_health_record(&self, id: i64, input: &HealthRecordInput) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE health_records SET date = $1, weight = $2, body_fat = $3, notes = $4 WHERE id = $5",
        )
        .bind(input.date)
        .bind(input.weight)
        .bind(input.body_fat)
        .bind(input.notes.as_deref())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update health record: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns `false` when no record has this id
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_health_record(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM health_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete health record: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    // ========================================================================
    // Health plan items
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_health_plan_items(&self) -> AppResult<Vec<HealthPlanItem>> {
        let rows = sqlx::query("SELECT id, title, description, status FROM health_plan_items ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list health plan items: {e}")))?;

        rows.iter().map(row_to_plan_item).collect()
    }

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_health_plan_item(&self, id: i64) -> AppResult<Option<HealthPlanItem>> {
        let row = sqlx::query("SELECT id, title, description, status FROM health_plan_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get health plan item: {e}")))?;

        row.as_ref().map(row_to_plan_item).transpose()
    }

    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_health_plan_item(
        &self,
        title: &str,
        description: Option<&str>,
    ) -> AppResult<i64> {
        let result = sqlx::query("INSERT INTO health_plan_items (title, description) VALUES ($1, $2)")
            .bind(title)
            .bind(description)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create health plan item: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_health_plan_item(
        &self,
        id: i64,
        title: &str,
        description: Option<&str>,
    ) -> AppResult<bool> {
        let result = sqlx::query("UPDATE health_plan_items SET title = $1, description = $2 WHERE id = $3")
            .bind(title)
            .bind(description)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update health plan item: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn set_health_plan_item_status(
        &self,
        id: i64,
        status: PlanItemStatus,
    ) -> AppResult<bool> {
        let result = sqlx::query("UPDATE health_plan_items SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update health plan item: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_health_plan_item(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM health_plan_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete health plan item: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

pub(super) fn row_to_profile(row: &SqliteRow) -> AppResult<UserProfile> {
    Ok(UserProfile {
        id: row.try_get("id")?,
        height: row.try_get("height")?,
        age: row.try_get("age")?,
        gender: row.try_get("gender")?,
        level: row.try_get("level")?,
        experience_points: row.try_get("experience_points")?,
    })
}

fn row_to_health_record(row: &SqliteRow) -> AppResult<HealthRecord> {
    Ok(HealthRecord {
        id: row.try_get("id")?,
        date: row.try_get("date")?,
        weight: row.try_get("weight")?,
        body_fat: row.try_get("body_fat")?,
        notes: row.try_get("notes")?,
    })
}

fn row_to_plan_item(row: &SqliteRow) -> AppResult<HealthPlanItem> {
    let status: String = row.try_get("status")?;
    Ok(HealthPlanItem {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        status: PlanItemStatus::parse(&status)?,
    })
}
