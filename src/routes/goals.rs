// ABOUTME: Goal route handlers: overview, creation with media uploads, progress and gallery roles
// ABOUTME: Every goal route works on the single profile and needs it to exist
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Form, Router};
use calisthenics_core::errors::{AppError, AppResult, ErrorCode};
use calisthenics_core::models::{GalleryRole, Goal, GoalStatus, NewGoal};
use chrono::Utc;
use tracing::info;

use super::reject;
use crate::errors::{PageError, PageResult};
use crate::flash::{Flash, Flashes};
use crate::forms::{FormData, MultipartForm};
use crate::resources::ServerResources;
use crate::services::goals::{self, GoalUpdate};
use crate::views;

const REQUIRED: &str = "Goal Title and Target Date are required.";

/// Goal tracking routes
pub struct GoalRoutes;

impl GoalRoutes {
    /// Create the goal routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/goals", get(Self::handle_list))
            .route("/goals/add", post(Self::handle_add))
            .route("/goals/delete/:id", post(Self::handle_delete))
            .route("/goals/toggle_status/:id", post(Self::handle_toggle_status))
            .route("/goals/progress/:id", post(Self::handle_progress))
            .route("/goals/media/:id/mark", post(Self::handle_mark_media))
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        flashes: Flashes,
    ) -> PageResult {
        let Some(profile) = resources.database.get_profile().await? else {
            return Ok(flashes.redirect("/"));
        };
        let overview = goals::load_overview(&resources.database, profile.id).await?;
        let html = views::goals::page(&overview, flashes.messages());
        Ok(flashes.render(StatusCode::OK, html))
    }

    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        multipart: Multipart,
    ) -> PageResult {
        let upload = MultipartForm::read(multipart, &resources.uploads).await?;
        let Some(profile) = resources.database.get_profile().await? else {
            flashes.push(Flash::danger("User profile not found."));
            return Ok(flashes.redirect("/goals"));
        };

        let goal = match Self::goal_input(&upload.fields, profile.id) {
            Ok(goal) => goal,
            Err(e) => {
                reject(&mut flashes, e)?;
                return Ok(flashes.redirect("/goals"));
            }
        };

        let files: Vec<_> = upload.files_named("media_files[]").collect();
        goals::create_goal(&resources.database, &resources.uploads, &goal, &files).await?;
        flashes.push(Flash::success("New goal created successfully!"));
        Ok(flashes.redirect("/goals"))
    }

    fn goal_input(form: &FormData, user_id: i64) -> AppResult<NewGoal> {
        let title = form.required("title", REQUIRED)?;
        let target_date = form
            .date("target_date")?
            .ok_or_else(|| AppError::new(ErrorCode::MissingRequiredField, REQUIRED))?;
        Ok(NewGoal {
            title,
            description: form.optional("description"),
            target_date,
            notes: form.optional("notes"),
            user_id,
        })
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        if !goals::delete_goal(&resources.database, &resources.uploads, id).await? {
            return Err(PageError::not_found("Goal"));
        }
        info!(goal_id = id, "Goal deleted");
        flashes.push(Flash::success("Goal deleted successfully."));
        Ok(flashes.redirect("/goals"))
    }

    async fn handle_toggle_status(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        let goal = Self::find_goal(&resources, id).await?;
        let update = goals::toggle_status(&goal, Utc::now());
        goals::apply_update(&resources.database, id, update).await?;
        flashes.push(Self::status_notice(&goal, update));
        Ok(flashes.redirect("/goals"))
    }

    async fn handle_progress(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
        Form(form): Form<HashMap<String, String>>,
    ) -> PageResult {
        let goal = Self::find_goal(&resources, id).await?;
        let form = FormData::from(form);
        let value = match form.parse::<i64>("current_progress", "Progress") {
            Ok(Some(value)) => value,
            Ok(None) => {
                flashes.push(Flash::danger("Progress value is required."));
                return Ok(flashes.redirect("/goals"));
            }
            Err(e) => {
                reject(&mut flashes, e)?;
                return Ok(flashes.redirect("/goals"));
            }
        };

        let update = goals::record_progress(&goal, value, Utc::now());
        goals::apply_update(&resources.database, id, update).await?;
        if update.status == GoalStatus::Completed && !goal.is_completed() {
            flashes.push(Self::status_notice(&goal, update));
        } else {
            flashes.push(Flash::success(format!(
                "Progress for \"{}\" updated.",
                goal.title
            )));
        }
        Ok(flashes.redirect("/goals"))
    }

    async fn handle_mark_media(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
        Form(form): Form<HashMap<String, String>>,
    ) -> PageResult {
        let form = FormData::from(form);
        let Some(profile) = resources.database.get_profile().await? else {
            flashes.push(Flash::danger("User profile not found."));
            return Ok(flashes.redirect("/goals"));
        };
        let Some((_, owner)) = resources.database.get_goal_media(id).await? else {
            return Err(PageError::not_found("Goal media"));
        };
        if owner != profile.id {
            return Err(AppError::permission_denied("This media belongs to another profile.").into());
        }

        match GalleryRole::parse(form.text("role").unwrap_or("none")) {
            Ok(role) => {
                resources
                    .database
                    .set_gallery_role(id, profile.id, role)
                    .await?;
                flashes.push(Flash::success("Gallery updated."));
            }
            Err(e) => reject(&mut flashes, e)?,
        }
        Ok(flashes.redirect("/goals"))
    }

    async fn find_goal(resources: &ServerResources, id: i64) -> Result<Goal, PageError> {
        resources
            .database
            .get_goal(id)
            .await?
            .ok_or_else(|| PageError::not_found("Goal"))
    }

    fn status_notice(goal: &Goal, update: GoalUpdate) -> Flash {
        if update.status == GoalStatus::Completed {
            Flash::success(format!("Congratulations on completing \"{}\"!", goal.title))
        } else {
            Flash::info(format!("Goal \"{}\" marked as in-progress.", goal.title))
        }
    }
}
