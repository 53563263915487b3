// ABOUTME: Database operations for uploaded training videos
// ABOUTME: Stores probe metadata and keeps view and like counters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use calisthenics_core::errors::{AppError, AppResult};
use calisthenics_core::models::{CategoryFilter, NewVideo, Video};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row};

use super::Database;

const VIDEO_COLUMNS: &str = "id, title, description, category, file_path, thumbnail_path, \
     duration, size_mb, upload_date, views, likes, user_id";

impl Database {
    pub(super) async fn migrate_videos(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS videos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                category TEXT NOT NULL,
                file_path TEXT NOT NULL,
                thumbnail_path TEXT,
                duration TEXT,
                size_mb REAL,
                upload_date TEXT NOT NULL,
                views INTEGER NOT NULL DEFAULT 0,
                likes INTEGER NOT NULL DEFAULT 0,
                user_id INTEGER NOT NULL REFERENCES user_profile(id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// The profile's videos, newest upload first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_videos(&self, user_id: i64, filter: &CategoryFilter) -> AppResult<Vec<Video>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {VIDEO_COLUMNS} FROM videos
            WHERE user_id = $1 AND ($2 IS NULL OR category = $2)
            ORDER BY upload_date DESC, id DESC
            "
        ))
        .bind(user_id)
        .bind(filter.category())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list videos: {e}")))?;

        rows.iter().map(row_to_video).collect()
    }

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn video_categories(&self, user_id: i64) -> AppResult<Vec<String>> {
        let categories = sqlx::query_scalar(
            "SELECT DISTINCT category FROM videos WHERE user_id = $1 ORDER BY category",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list video categories: {e}")))?;

        Ok(categories)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_video(&self, id: i64) -> AppResult<Option<Video>> {
        let row = sqlx::query(&format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get video: {e}")))?;

        row.as_ref().map(row_to_video).transpose()
    }

    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_video(&self, video: &NewVideo) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO videos
                (title, description, category, file_path, thumbnail_path, duration, size_mb, upload_date, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(&video.title)
        .bind(video.description.as_deref())
        .bind(&video.category)
        .bind(&video.file_path)
        .bind(video.thumbnail_path.as_deref())
        .bind(video.duration.as_deref())
        .bind(video.size_mb)
        .bind(Utc::now())
        .bind(video.user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create video: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// Bump the view counter
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn record_video_view(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("UPDATE videos SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to record video view: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Bump the like counter, returning the new total
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the video does not exist
    pub async fn like_video(&self, id: i64) -> AppResult<i64> {
        let likes: Option<i64> =
            sqlx::query_scalar("UPDATE videos SET likes = likes + 1 WHERE id = $1 RETURNING likes")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to like video: {e}")))?;

        likes.ok_or_else(|| AppError::not_found("Video"))
    }

    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_video(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete video: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn video_exists(&self, title: &str) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM videos WHERE title = $1")
            .bind(title)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_videos(&self, user_id: i64) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM videos WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn row_to_video(row: &SqliteRow) -> AppResult<Video> {
    Ok(Video {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        category: row.try_get("category")?,
        file_path: row.try_get("file_path")?,
        thumbnail_path: row.try_get("thumbnail_path")?,
        duration: row.try_get("duration")?,
        size_mb: row.try_get("size_mb")?,
        upload_date: row.try_get("upload_date")?,
        views: row.try_get("views")?,
        likes: row.try_get("likes")?,
        user_id: row.try_get("user_id")?,
    })
}
