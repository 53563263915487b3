// ABOUTME: Weekly schedule and sticky note route handlers
// ABOUTME: Slots are grouped by weekday; notes are free-form cards on the same page
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
use calisthenics_core::models::{parse_weekday, ScheduleItemInput, SessionStatus, StickyNoteInput};
use chrono::{Datelike, Utc};

use super::reject;
use crate::errors::{PageError, PageResult};
use crate::flash::{Flash, Flashes};
use crate::forms::FormData;
use crate::resources::ServerResources;
use crate::services::schedule::WeekOverview;
use crate::views;

const ITEM_REQUIRED: &str = "Required fields are missing.";
const NOTE_REQUIRED: &str = "All note fields are required.";

/// Weekly schedule and sticky note routes
pub struct ScheduleRoutes;

impl ScheduleRoutes {
    /// Create the schedule and note routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/schedule", get(Self::handle_overview))
            .route("/schedule/add", post(Self::handle_add_item))
            .route(
                "/schedule/edit/:id",
                get(Self::handle_edit_item_form).post(Self::handle_edit_item),
            )
            .route("/schedule/delete/:id", post(Self::handle_delete_item))
            .route("/schedule/complete/:id", post(Self::handle_complete_item))
            .route("/notes/add", post(Self::handle_add_note))
            .route(
                "/notes/edit/:id",
                get(Self::handle_edit_note_form).post(Self::handle_edit_note),
            )
            .route("/notes/delete/:id", post(Self::handle_delete_note))
            .with_state(resources)
    }

    async fn handle_overview(
        State(resources): State<Arc<ServerResources>>,
        flashes: Flashes,
    ) -> PageResult {
        let items = resources.database.list_schedule_items().await?;
        let notes = resources.database.list_sticky_notes().await?;
        let overview = WeekOverview::build(items, notes, Utc::now().weekday());
        let html = views::schedule::page(&overview, flashes.messages());
        Ok(flashes.render(StatusCode::OK, html))
    }

    fn item_input(form: &FormData) -> AppResult<ScheduleItemInput> {
        let title = form.required("title", ITEM_REQUIRED)?;
        let day = form.required("day_of_week", ITEM_REQUIRED)?;
        let time = form
            .time("time")?
            .ok_or_else(|| AppError::new(ErrorCode::MissingRequiredField, ITEM_REQUIRED))?;
        let category = form.required("category", ITEM_REQUIRED)?;
        Ok(ScheduleItemInput {
            title,
            details: form.optional("details"),
            day_of_week: parse_weekday(&day)?,
            time,
            category,
        })
    }

    fn note_input(form: &FormData) -> AppResult<StickyNoteInput> {
        Ok(StickyNoteInput {
            title: form.required("title", NOTE_REQUIRED)?,
            content: form.required("content", NOTE_REQUIRED)?,
            color: form.required("color", NOTE_REQUIRED)?,
        })
    }

    async fn handle_add_item(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Form(form): Form<HashMap<String, String>>,
    ) -> PageResult {
        match Self::item_input(&FormData::from(form)) {
            Ok(input) => {
                resources.database.create_schedule_item(&input).await?;
                flashes.push(Flash::success("Schedule item added successfully!"));
            }
            Err(e) => reject(&mut flashes, e)?,
        }
        Ok(flashes.redirect("/schedule"))
    }

    async fn handle_edit_item_form(
        State(resources): State<Arc<ServerResources>>,
        flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        let item = resources
            .database
            .get_schedule_item(id)
            .await?
            .ok_or_else(|| PageError::not_found("Schedule item"))?;
        let html = views::schedule::edit_item_page(&item, flashes.messages());
        Ok(flashes.render(StatusCode::OK, html))
    }

    async fn handle_edit_item(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
        Form(form): Form<HashMap<String, String>>,
    ) -> PageResult {
        match Self::item_input(&FormData::from(form)) {
            Ok(input) => {
                if !resources.database.update_schedule_item(id, &input).await? {
                    return Err(PageError::not_found("Schedule item"));
                }
                flashes.push(Flash::success("Schedule item updated successfully!"));
                Ok(flashes.redirect("/schedule"))
            }
            Err(e) => {
                reject(&mut flashes, e)?;
                Ok(flashes.redirect(&format!("/schedule/edit/{id}")))
            }
        }
    }

    async fn handle_delete_item(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        if !resources.database.delete_schedule_item(id).await? {
            return Err(PageError::not_found("Schedule item"));
        }
        flashes.push(Flash::success("Schedule item deleted successfully!"));
        Ok(flashes.redirect("/schedule"))
    }

    async fn handle_complete_item(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        let item = resources
            .database
            .get_schedule_item(id)
            .await?
            .ok_or_else(|| PageError::not_found("Schedule item"))?;
        resources
            .database
            .set_schedule_item_status(id, SessionStatus::Completed)
            .await?;
        flashes.push(Flash::success(format!("\"{}\" marked as complete!", item.title)));
        Ok(flashes.redirect("/schedule"))
    }

    async fn handle_add_note(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Form(form): Form<HashMap<String, String>>,
    ) -> PageResult {
        match Self::note_input(&FormData::from(form)) {
            Ok(input) => {
                resources.database.create_sticky_note(&input).await?;
                flashes.push(Flash::success("Sticky note added successfully!"));
            }
            Err(e) => reject(&mut flashes, e)?,
        }
        Ok(flashes.redirect("/schedule"))
    }

    async fn handle_edit_note_form(
        State(resources): State<Arc<ServerResources>>,
        flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        let note = resources
            .database
            .get_sticky_note(id)
            .await?
            .ok_or_else(|| PageError::not_found("Sticky note"))?;
        let html = views::schedule::edit_note_page(&note, flashes.messages());
        Ok(flashes.render(StatusCode::OK, html))
    }

    async fn handle_edit_note(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
        Form(form): Form<HashMap<String, String>>,
    ) -> PageResult {
        match Self::note_input(&FormData::from(form)) {
            Ok(input) => {
                if !resources.database.update_sticky_note(id, &input).await? {
                    return Err(PageError::not_found("Sticky note"));
                }
                flashes.push(Flash::success("Sticky note updated successfully!"));
                Ok(flashes.redirect("/schedule"))
            }
            Err(e) => {
                reject(&mut flashes, e)?;
                Ok(flashes.redirect(&format!("/notes/edit/{id}")))
            }
        }
    }

    async fn handle_delete_note(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        if !resources.database.delete_sticky_note(id).await? {
            return Err(PageError::not_found("Sticky note"));
        }
        flashes.push(Flash::success("Sticky note deleted successfully!"));
        Ok(flashes.redirect("/schedule"))
    }
}
