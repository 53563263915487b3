// ABOUTME: Database operations for goals and their attached progress media
// ABOUTME: Media rows cascade with their goal; gallery roles are unique per profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use calisthenics_core::errors::{AppError, AppResult};
use calisthenics_core::models::{
    GalleryRole, Goal, GoalMedia, GoalStatus, MediaType, NewGoal, NewGoalMedia,
};
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};

use super::Database;

const GOAL_COLUMNS: &str = "id, title, description, status, target_date, completed_date, \
     current_progress, target_progress, progress_unit, notes, user_id";

const MEDIA_COLUMNS: &str =
    "m.id, m.goal_id, m.file_path, m.media_type, m.upload_date, m.is_before_photo, m.is_after_photo";

impl Database {
    pub(super) async fn migrate_goals(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS goals (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'in_progress', 'completed')),
                target_date TEXT NOT NULL,
                completed_date TEXT,
                current_progress INTEGER NOT NULL DEFAULT 0,
                target_progress INTEGER NOT NULL DEFAULT 100,
                progress_unit TEXT,
                notes TEXT,
                user_id INTEGER REFERENCES user_profile(id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS goal_media (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                goal_id INTEGER NOT NULL REFERENCES goals(id) ON DELETE CASCADE,
                file_path TEXT NOT NULL,
                media_type TEXT NOT NULL CHECK (media_type IN ('image', 'video')),
                upload_date TEXT NOT NULL,
                is_before_photo BOOLEAN NOT NULL DEFAULT 0,
                is_after_photo BOOLEAN NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_goals_user ON goals(user_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_goal_media_goal ON goal_media(goal_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // ========================================================================
    // Goals
    // ========================================================================

    /// The profile's goals, nearest target date first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_goals(&self, user_id: i64) -> AppResult<Vec<Goal>> {
        let rows = sqlx::query(&format!(
            "SELECT {GOAL_COLUMNS} FROM goals WHERE user_id = $1 ORDER BY target_date ASC, id ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list goals: {e}")))?;

        rows.iter().map(row_to_goal).collect()
    }

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_goal(&self, id: i64) -> AppResult<Option<Goal>> {
        let row = sqlx::query(&format!("SELECT {GOAL_COLUMNS} FROM goals WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get goal: {e}")))?;

        row.as_ref().map(row_to_goal).transpose()
    }

    /// Insert a pending goal together with its uploaded media in one transaction
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is written in that case
    pub async fn create_goal_with_media(
        &self,
        goal: &NewGoal,
        media: &[NewGoalMedia],
    ) -> AppResult<i64> {
        let mut tx = self.pool.begin().await?;

        let goal_id = sqlx::query(
            r"
            INSERT INTO goals (title, description, status, target_date, notes, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&goal.title)
        .bind(goal.description.as_deref())
        .bind(GoalStatus::Pending.as_str())
        .bind(goal.target_date)
        .bind(goal.notes.as_deref())
        .bind(goal.user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create goal: {e}")))?
        .last_insert_rowid();

        let now = Utc::now();
        for item in media {
            sqlx::query(
                "INSERT INTO goal_media (goal_id, file_path, media_type, upload_date) VALUES ($1, $2, $3, $4)",
            )
            .bind(goal_id)
            .bind(&item.file_path)
            .bind(item.media_type.as_str())
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to attach goal media: {e}")))?;
        }

        tx.commit().await?;
        Ok(goal_id)
    }

    /// Persist status, progress and completion timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_goal_progress(
        &self,
        id: i64,
        status: GoalStatus,
        current_progress: i64,
        completed_date: Option<DateTime<Utc>>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE goals SET status = $1, current_progress = $2, completed_date = $3 WHERE id = $4",
        )
        .bind(status.as_str())
        .bind(current_progress)
        .bind(completed_date)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update goal: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a goal; its media rows cascade
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_goal(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM goals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete goal: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    // ========================================================================
    // Goal media
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_goal_media(&self, goal_id: i64) -> AppResult<Vec<GoalMedia>> {
        let rows = sqlx::query(&format!(
            "SELECT {MEDIA_COLUMNS} FROM goal_media m WHERE m.goal_id = $1 ORDER BY m.id"
        ))
        .bind(goal_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list goal media: {e}")))?;

        rows.iter().map(row_to_goal_media).collect()
    }

    /// All media attached to the profile's goals
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_goal_media_for_user(&self, user_id: i64) -> AppResult<Vec<GoalMedia>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {MEDIA_COLUMNS} FROM goal_media m
            JOIN goals g ON g.id = m.goal_id
            WHERE g.user_id = $1
            ORDER BY m.id
            "
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list goal media: {e}")))?;

        rows.iter().map(row_to_goal_media).collect()
    }

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_goal_media(&self, id: i64) -> AppResult<Option<(GoalMedia, i64)>> {
        let row = sqlx::query(&format!(
            r"
            SELECT {MEDIA_COLUMNS}, g.user_id AS owner_id FROM goal_media m
            JOIN goals g ON g.id = m.goal_id
            WHERE m.id = $1
            "
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get goal media: {e}")))?;

        row.map(|r| {
            let owner: Option<i64> = r.try_get("owner_id")?;
            Ok((row_to_goal_media(&r)?, owner.unwrap_or_default()))
        })
        .transpose()
    }

    /// First media item of the profile holding the given gallery role
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn gallery_photo(&self, user_id: i64, role: GalleryRole) -> AppResult<Option<GoalMedia>> {
        let flag = match role {
            GalleryRole::Before => "m.is_before_photo",
            GalleryRole::After => "m.is_after_photo",
            GalleryRole::None => return Ok(None),
        };
        let row = sqlx::query(&format!(
            r"
            SELECT {MEDIA_COLUMNS} FROM goal_media m
            JOIN goals g ON g.id = m.goal_id
            WHERE g.user_id = $1 AND {flag} = 1
            ORDER BY m.id
            LIMIT 1
            "
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load gallery photo: {e}")))?;

        row.as_ref().map(row_to_goal_media).transpose()
    }

    /// Give `media_id` the gallery role, taking it away from every other item of the profile
    ///
    /// # Errors
    ///
    /// Returns an error if an update fails
    pub async fn set_gallery_role(
        &self,
        media_id: i64,
        user_id: i64,
        role: GalleryRole,
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let clear = match role {
            GalleryRole::Before => Some("is_before_photo"),
            GalleryRole::After => Some("is_after_photo"),
            GalleryRole::None => None,
        };

        if let Some(column) = clear {
            sqlx::query(&format!(
                r"
                UPDATE goal_media SET {column} = 0
                WHERE goal_id IN (SELECT id FROM goals WHERE user_id = $1)
                "
            ))
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear gallery role: {e}")))?;
        }

        let (before, after) = match role {
            GalleryRole::Before => (true, false),
            GalleryRole::After => (false, true),
            GalleryRole::None => (false, false),
        };
        sqlx::query("UPDATE goal_media SET is_before_photo = $1, is_after_photo = $2 WHERE id = $3")
            .bind(before)
            .bind(after)
            .bind(media_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to set gallery role: {e}")))?;

        tx.commit().await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_goals(&self, user_id: i64) -> AppResult<(i64, i64)> {
        let row = sqlx::query(
            r"
            SELECT COUNT(*) AS total,
                   COALESCE(SUM(CASE WHEN status = 'completed' THEN 1 ELSE 0 END), 0) AS completed
            FROM goals WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((row.try_get("total")?, row.try_get("completed")?))
    }
}

fn row_to_goal(row: &SqliteRow) -> AppResult<Goal> {
    let status: String = row.try_get("status")?;
    let user_id: Option<i64> = row.try_get("user_id")?;
    Ok(Goal {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        status: GoalStatus::parse(&status)?,
        target_date: row.try_get("target_date")?,
        completed_date: row.try_get("completed_date")?,
        current_progress: row.try_get("current_progress")?,
        target_progress: row.try_get("target_progress")?,
        progress_unit: row.try_get("progress_unit")?,
        notes: row.try_get("notes")?,
        user_id: user_id.unwrap_or_default(),
    })
}

fn row_to_goal_media(row: &SqliteRow) -> AppResult<GoalMedia> {
    let media_type: String = row.try_get("media_type")?;
    Ok(GoalMedia {
        id: row.try_get("id")?,
        goal_id: row.try_get("goal_id")?,
        file_path: row.try_get("file_path")?,
        media_type: MediaType::parse(&media_type)?,
        upload_date: row.try_get("upload_date")?,
        is_before_photo: row.try_get("is_before_photo")?,
        is_after_photo: row.try_get("is_after_photo")?,
    })
}
