// ABOUTME: Database operations for the workout exercise catalog
// ABOUTME: Exercise names are unique; duplicates surface as ResourceAlreadyExists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use calisthenics_core::errors::{AppError, AppResult, ErrorCode};
use calisthenics_core::models::{NewWorkout, Workout};
use sqlx::{sqlite::SqliteRow, Row};

use super::Database;

impl Database {
    pub(super) async fn migrate_workouts(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                difficulty TEXT NOT NULL,
                sets INTEGER NOT NULL,
                reps TEXT NOT NULL,
                rest TEXT NOT NULL,
                instructions TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All exercises in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_workouts(&self) -> AppResult<Vec<Workout>> {
        let rows = sqlx::query(
            "SELECT id, name, difficulty, sets, reps, rest, instructions FROM workouts ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workouts: {e}")))?;

        rows.iter().map(row_to_workout).collect()
    }

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn workout_name_exists(&self, name: &str) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workouts WHERE name = $1")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    /// Insert an exercise
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` when the name is taken, or a database error
    pub async fn create_workout(&self, workout: &NewWorkout) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO workouts (name, difficulty, sets, reps, rest, instructions)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&workout.name)
        .bind(&workout.difficulty)
        .bind(workout.sets)
        .bind(&workout.reps)
        .bind(&workout.rest)
        .bind(&workout.instructions)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)
        .map_err(|e| {
            if e.code == ErrorCode::ResourceAlreadyExists {
                AppError::new(
                    ErrorCode::ResourceAlreadyExists,
                    format!("Workout \"{}\" already exists.", workout.name),
                )
            } else {
                e
            }
        })?;

        Ok(result.last_insert_rowid())
    }

    /// Returns `false` when no exercise has this id
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_workout(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete workout: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_workouts(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workouts")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn row_to_workout(row: &SqliteRow) -> AppResult<Workout> {
    Ok(Workout {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        difficulty: row.try_get("difficulty")?,
        sets: row.try_get("sets")?,
        reps: row.try_get("reps")?,
        rest: row.try_get("rest")?,
        instructions: row.try_get("instructions")?,
    })
}
