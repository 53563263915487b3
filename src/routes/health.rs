// ABOUTME: Health route handlers: profile, body measurements, health plan items and export
// ABOUTME: The export answers with a dated text/csv attachment of the profile and records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

//! Health routes
//!
//! The health page combines the profile form, the measurement log with its
//! chart and month view, and a checklist of health plan items.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Form, Router};
use calisthenics_core::errors::{AppError, AppResult, ErrorCode};
use calisthenics_core::models::{HealthRecordInput, ProfileUpdate};
use chrono::Utc;
use tracing::info;

use super::reject;
use crate::errors::{PageError, PageResult};
use crate::flash::{Flash, Flashes};
use crate::forms::FormData;
use crate::resources::ServerResources;
use crate::services::health;
use crate::views;

const RECORD_REQUIRED: &str = "Date and Weight are required fields.";

/// Health routes
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_overview))
            .route("/profile/update", post(Self::handle_update_profile))
            .route("/health/add", post(Self::handle_add_record))
            .route(
                "/health/edit/:id",
                get(Self::handle_edit_record_form).post(Self::handle_edit_record),
            )
            .route("/health/delete/:id", post(Self::handle_delete_record))
            .route("/health/export", get(Self::handle_export))
            .route("/health-plan/add", post(Self::handle_add_plan_item))
            .route("/health-plan/toggle/:id", post(Self::handle_toggle_plan_item))
            .route("/health-plan/delete/:id", post(Self::handle_delete_plan_item))
            .route(
                "/health-plan/edit/:id",
                get(Self::handle_edit_plan_item_form).post(Self::handle_edit_plan_item),
            )
            .with_state(resources)
    }

    async fn handle_overview(
        State(resources): State<Arc<ServerResources>>,
        flashes: Flashes,
    ) -> PageResult {
        let overview = health::load_overview(&resources.database, Utc::now().date_naive()).await?;
        let html = views::health::page(&overview, flashes.messages());
        Ok(flashes.render(StatusCode::OK, html))
    }

    // ------------------------------------------------------------------------
    // Profile
    // ------------------------------------------------------------------------

    fn profile_update(form: &FormData) -> AppResult<ProfileUpdate> {
        Ok(ProfileUpdate {
            height: form.parse::<f64>("height", "Height")?,
            age: form.parse::<i64>("age", "Age")?,
            gender: form.optional("gender"),
        })
    }

    async fn handle_update_profile(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Form(form): Form<HashMap<String, String>>,
    ) -> PageResult {
        match Self::profile_update(&FormData::from(form)) {
            Ok(update) => {
                let profile = resources.database.upsert_profile(&update).await?;
                info!(profile_id = profile.id, "Profile updated");
                flashes.push(Flash::success("Profile updated successfully!"));
            }
            Err(e) => reject(&mut flashes, e)?,
        }
        Ok(flashes.redirect("/health"))
    }

    // ------------------------------------------------------------------------
    // Records
    // ------------------------------------------------------------------------

    fn record_input(form: &FormData) -> AppResult<HealthRecordInput> {
        let date = form
            .date("date")?
            .ok_or_else(|| AppError::new(ErrorCode::MissingRequiredField, RECORD_REQUIRED))?;
        // Zero or non-finite weights count as not entered
        let weight = form
            .parse::<f64>("weight", "Weight")?
            .filter(|w| w.is_finite() && *w > 0.0)
            .ok_or_else(|| AppError::new(ErrorCode::MissingRequiredField, RECORD_REQUIRED))?;
        Ok(HealthRecordInput {
            date,
            weight,
            body_fat: form.parse::<f64>("body_fat", "Body fat")?,
            notes: form.optional("notes"),
        })
    }

    async fn handle_add_record(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Form(form): Form<HashMap<String, String>>,
    ) -> PageResult {
        match Self::record_input(&FormData::from(form)) {
            Ok(input) => {
                resources.database.create_health_record(&input).await?;
                flashes.push(Flash::success("Health record added successfully!"));
            }
            Err(e) => reject(&mut flashes, e)?,
        }
        Ok(flashes.redirect("/health"))
    }

    async fn handle_edit_record_form(
        State(resources): State<Arc<ServerResources>>,
        flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        let record = resources
            .database
            .get_health_record(id)
            .await?
            .ok_or_else(|| PageError::not_found("Health record"))?;
        let html = views::health::edit_record_page(&record, flashes.messages());
        Ok(flashes.render(StatusCode::OK, html))
    }

    async fn handle_edit_record(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
        Form(form): Form<HashMap<String, String>>,
    ) -> PageResult {
        match Self::record_input(&FormData::from(form)) {
            Ok(input) => {
                if !resources.database.update_health_record(id, &input).await? {
                    return Err(PageError::not_found("Health record"));
                }
                flashes.push(Flash::success("Health record updated successfully!"));
                Ok(flashes.redirect("/health"))
            }
            Err(e) => {
                reject(&mut flashes, e)?;
                Ok(flashes.redirect(&format!("/health/edit/{id}")))
            }
        }
    }

    async fn handle_delete_record(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        if !resources.database.delete_health_record(id).await? {
            return Err(PageError::not_found("Health record"));
        }
        flashes.push(Flash::success("Health record deleted."));
        Ok(flashes.redirect("/health"))
    }

    async fn handle_export(State(resources): State<Arc<ServerResources>>) -> PageResult {
        let profile = resources.database.get_profile().await?;
        let records = resources.database.list_health_records().await?;
        let body = health::render_export(profile.as_ref(), &records);
        let disposition = format!(
            "attachment; filename={}",
            health::export_file_name(Utc::now().date_naive())
        );
        Ok((
            [
                (CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
                (CONTENT_DISPOSITION, disposition),
            ],
            body,
        )
            .into_response())
    }

    // ------------------------------------------------------------------------
    // Health plan items
    // ------------------------------------------------------------------------

    async fn handle_add_plan_item(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Form(form): Form<HashMap<String, String>>,
    ) -> PageResult {
        let form = FormData::from(form);
        // A blank title is ignored without a notice
        if let Some(title) = form.text("title") {
            resources
                .database
                .create_health_plan_item(title, form.text("description"))
                .await?;
            flashes.push(Flash::success("Health plan item added."));
        }
        Ok(flashes.redirect("/health"))
    }

    async fn handle_toggle_plan_item(
        State(resources): State<Arc<ServerResources>>,
        flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        let item = resources
            .database
            .get_health_plan_item(id)
            .await?
            .ok_or_else(|| PageError::not_found("Health plan item"))?;
        resources
            .database
            .set_health_plan_item_status(id, item.status.toggled())
            .await?;
        Ok(flashes.redirect("/health"))
    }

    async fn handle_delete_plan_item(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        if !resources.database.delete_health_plan_item(id).await? {
            return Err(PageError::not_found("Health plan item"));
        }
        flashes.push(Flash::success("Health plan item deleted."));
        Ok(flashes.redirect("/health"))
    }

    async fn handle_edit_plan_item_form(
        State(resources): State<Arc<ServerResources>>,
        flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        let item = resources
            .database
            .get_health_plan_item(id)
            .await?
            .ok_or_else(|| PageError::not_found("Health plan item"))?;
        let html = views::health::edit_plan_item_page(&item, flashes.messages());
        Ok(flashes.render(StatusCode::OK, html))
    }

    async fn handle_edit_plan_item(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
        Form(form): Form<HashMap<String, String>>,
    ) -> PageResult {
        let form = FormData::from(form);
        let Some(title) = form.text("title") else {
            flashes.push(Flash::danger("Title is required."));
            return Ok(flashes.redirect(&format!("/health-plan/edit/{id}")));
        };
        if !resources
            .database
            .update_health_plan_item(id, title, form.text("description"))
            .await?
        {
            return Err(PageError::not_found("Health plan item"));
        }
        flashes.push(Flash::success("Health plan item updated."));
        Ok(flashes.redirect("/health"))
    }
}
