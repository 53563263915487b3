// ABOUTME: Exercise library route handlers: list, add and delete workouts
// ABOUTME: Names are unique; every field is required and sets must be a whole number
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Form, Router};
use calisthenics_core::errors::{AppError, AppResult, ErrorCode};
use calisthenics_core::models::NewWorkout;
use tracing::info;

use super::reject;
use crate::database::Database;
use crate::errors::{PageError, PageResult};
use crate::flash::{Flash, Flashes};
use crate::forms::FormData;
use crate::resources::ServerResources;
use crate::views;

const REQUIRED: &str = "All fields are required.";

/// Exercise library routes
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create the workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/workouts", get(Self::handle_list))
            .route("/workouts/add", post(Self::handle_add))
            .route("/workouts/delete/:id", post(Self::handle_delete))
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        flashes: Flashes,
    ) -> PageResult {
        let workouts = resources.database.list_workouts().await?;
        let html = views::workouts::page(&workouts, flashes.messages());
        Ok(flashes.render(StatusCode::OK, html))
    }

    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Form(form): Form<HashMap<String, String>>,
    ) -> PageResult {
        let form = FormData::from(form);
        match Self::add_workout(&resources.database, &form).await {
            Ok(name) => {
                info!(workout = %name, "Workout added");
                flashes.push(Flash::success("Workout added successfully!"));
            }
            Err(e) => reject(&mut flashes, e)?,
        }
        Ok(flashes.redirect("/workouts"))
    }

    async fn add_workout(db: &Database, form: &FormData) -> AppResult<String> {
        let workout = NewWorkout {
            name: form.required("name", REQUIRED)?,
            difficulty: form.required("difficulty", REQUIRED)?,
            sets: form
                .parse::<i64>("sets", "Sets")?
                .ok_or_else(|| AppError::new(ErrorCode::MissingRequiredField, REQUIRED))?,
            reps: form.required("reps", REQUIRED)?,
            rest: form.required("rest", REQUIRED)?,
            instructions: form.required("instructions", REQUIRED)?,
        };

        if db.workout_name_exists(&workout.name).await? {
            return Err(AppError::new(
                ErrorCode::ResourceAlreadyExists,
                format!("Workout \"{}\" already exists.", workout.name),
            ));
        }
        db.create_workout(&workout).await?;
        Ok(workout.name)
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        if !resources.database.delete_workout(id).await? {
            return Err(PageError::not_found("Workout"));
        }
        flashes.push(Flash::success("Workout deleted successfully."));
        Ok(flashes.redirect("/workouts"))
    }
}
