// ABOUTME: Calendar route handlers: month overview, add, edit, complete and delete events
// ABOUTME: Failed edits return to the edit form instead of the calendar
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
use calisthenics_core::models::{EventInput, SessionStatus};
use chrono::Utc;
use tracing::info;

use super::reject;
use crate::errors::{PageError, PageResult};
use crate::flash::{Flash, Flashes};
use crate::forms::FormData;
use crate::resources::ServerResources;
use crate::services::calendar;
use crate::views;

const REQUIRED: &str = "All fields are required.";

/// Calendar event routes
pub struct CalendarRoutes;

impl CalendarRoutes {
    /// Create the calendar routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/calendar", get(Self::handle_overview))
            .route("/calendar/add", post(Self::handle_add))
            .route(
                "/calendar/edit/:id",
                get(Self::handle_edit_form).post(Self::handle_edit),
            )
            .route("/calendar/delete/:id", post(Self::handle_delete))
            .route("/calendar/complete/:id", post(Self::handle_complete))
            .with_state(resources)
    }

    async fn handle_overview(
        State(resources): State<Arc<ServerResources>>,
        flashes: Flashes,
    ) -> PageResult {
        let overview = calendar::load_overview(&resources.database, Utc::now().date_naive()).await?;
        let html = views::calendar::page(&overview, flashes.messages());
        Ok(flashes.render(StatusCode::OK, html))
    }

    fn event_input(form: &FormData, status: SessionStatus) -> AppResult<EventInput> {
        let title = form.required("title", REQUIRED)?;
        let category = form.required("category", REQUIRED)?;
        let start_time = form
            .datetime("start_time")?
            .ok_or_else(|| AppError::new(ErrorCode::MissingRequiredField, REQUIRED))?;
        Ok(EventInput {
            title,
            category,
            start_time,
            status,
        })
    }

    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Form(form): Form<HashMap<String, String>>,
    ) -> PageResult {
        match Self::event_input(&FormData::from(form), SessionStatus::Scheduled) {
            Ok(input) => {
                let id = resources.database.create_event(&input).await?;
                info!(event_id = id, title = %input.title, "Calendar event added");
                flashes.push(Flash::success("Plan added successfully!"));
            }
            Err(e) => reject(&mut flashes, e)?,
        }
        Ok(flashes.redirect("/calendar"))
    }

    async fn handle_edit_form(
        State(resources): State<Arc<ServerResources>>,
        flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        let event = resources
            .database
            .get_event(id)
            .await?
            .ok_or_else(|| PageError::not_found("Event"))?;
        let html = views::calendar::edit_page(&event, flashes.messages());
        Ok(flashes.render(StatusCode::OK, html))
    }

    async fn handle_edit(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
        Form(form): Form<HashMap<String, String>>,
    ) -> PageResult {
        let event = resources
            .database
            .get_event(id)
            .await?
            .ok_or_else(|| PageError::not_found("Event"))?;

        match Self::event_input(&FormData::from(form), event.status) {
            Ok(input) => {
                resources.database.update_event(id, &input).await?;
                flashes.push(Flash::success("Plan updated successfully!"));
                Ok(flashes.redirect("/calendar"))
            }
            Err(e) => {
                reject(&mut flashes, e)?;
                Ok(flashes.redirect(&format!("/calendar/edit/{id}")))
            }
        }
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        if !resources.database.delete_event(id).await? {
            return Err(PageError::not_found("Event"));
        }
        flashes.push(Flash::success("Plan deleted successfully."));
        Ok(flashes.redirect("/calendar"))
    }

    async fn handle_complete(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        let event = resources
            .database
            .get_event(id)
            .await?
            .ok_or_else(|| PageError::not_found("Event"))?;
        resources
            .database
            .set_event_status(id, SessionStatus::Completed)
            .await?;
        flashes.push(Flash::success(format!(
            "Workout \"{}\" marked as complete!",
            event.title
        )));
        Ok(flashes.redirect("/calendar"))
    }
}
