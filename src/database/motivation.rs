// ABOUTME: Database operations for the motivation board
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use calisthenics_core::errors::{AppError, AppResult};
use calisthenics_core::models::{CategoryFilter, MotivationItem, NewMotivationItem};
use sqlx::{sqlite::SqliteRow, Row};

use super::Database;

const MOTIVATION_COLUMNS: &str =
    "id, title, description, category, author, source_url, cover_image_path, is_favorite, user_id";

impl Database {
    pub(super) async fn migrate_motivation(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS motivation_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                category TEXT NOT NULL,
                author TEXT,
                source_url TEXT,
                cover_image_path TEXT,
                is_favorite BOOLEAN NOT NULL DEFAULT 0,
                user_id INTEGER NOT NULL REFERENCES user_profile(id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// The profile's items, favourites first and newest after that
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_motivation_items(
        &self,
        user_id: i64,
        filter: &CategoryFilter,
    ) -> AppResult<Vec<MotivationItem>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {MOTIVATION_COLUMNS} FROM motivation_items
            WHERE user_id = $1 AND ($2 IS NULL OR category = $2)
            ORDER BY is_favorite DESC, id DESC
            "
        ))
        .bind(user_id)
        .bind(filter.category())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list motivation items: {e}")))?;

        rows.iter().map(row_to_motivation_item).collect()
    }

    /// Distinct categories used by the profile, alphabetically
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn motivation_categories(&self, user_id: i64) -> AppResult<Vec<String>> {
        let categories = sqlx::query_scalar(
            "SELECT DISTINCT category FROM motivation_items WHERE user_id = $1 ORDER BY category",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list motivation categories: {e}")))?;

        Ok(categories)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_motivation_item(&self, id: i64) -> AppResult<Option<MotivationItem>> {
        let row = sqlx::query(&format!(
            "SELECT {MOTIVATION_COLUMNS} FROM motivation_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get motivation item: {e}")))?;

        row.as_ref().map(row_to_motivation_item).transpose()
    }

    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_motivation_item(&self, item: &NewMotivationItem) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO motivation_items
                (title, description, category, author, source_url, cover_image_path, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(&item.title)
        .bind(item.description.as_deref())
        .bind(&item.category)
        .bind(item.author.as_deref())
        .bind(item.source_url.as_deref())
        .bind(item.cover_image_path.as_deref())
        .bind(item.user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create motivation item: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// Flip the favourite flag, returning the new value
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the item does not exist
    pub async fn toggle_motivation_favorite(&self, id: i64) -> AppResult<bool> {
        let favorite: Option<bool> = sqlx::query_scalar(
            "UPDATE motivation_items SET is_favorite = NOT is_favorite WHERE id = $1 RETURNING is_favorite",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to toggle favourite: {e}")))?;

        favorite.ok_or_else(|| AppError::not_found("Motivation item"))
    }

    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_motivation_item(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM motivation_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete motivation item: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn motivation_item_exists(&self, title: &str) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM motivation_items WHERE title = $1")
            .bind(title)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_motivation_items(&self, user_id: i64) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM motivation_items WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}

fn row_to_motivation_item(row: &SqliteRow) -> AppResult<MotivationItem> {
    Ok(MotivationItem {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        category: row.try_get("category")?,
        author: row.try_get("author")?,
        source_url: row.try_get("source_url")?,
        cover_image_path: row.try_get("cover_image_path")?,
        is_favorite: row.try_get("is_favorite")?,
        user_id: row.try_get("user_id")?,
    })
}
