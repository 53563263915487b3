// ABOUTME: Training plan route handlers: overview, add, edit and delete
// ABOUTME: New plans start upcoming or pending depending on the start date
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
use calisthenics_core::models::{PlanInput, PlanStatus};
use chrono::Utc;
use tracing::info;

use super::reject;
use crate::errors::{PageError, PageResult};
use crate::flash::{Flash, Flashes};
use crate::forms::FormData;
use crate::resources::ServerResources;
use crate::services::plans::PlanOverview;
use crate::views;

const REQUIRED: &str = "All fields are required.";

/// Training plan routes
pub struct PlanRoutes;

impl PlanRoutes {
    /// Create the training plan routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/plan", get(Self::handle_overview))
            .route("/plans/add", post(Self::handle_add))
            .route(
                "/plans/edit/:id",
                get(Self::handle_edit_form).post(Self::handle_edit),
            )
            .route("/plans/delete/:id", post(Self::handle_delete))
            .with_state(resources)
    }

    async fn handle_overview(
        State(resources): State<Arc<ServerResources>>,
        flashes: Flashes,
    ) -> PageResult {
        let plans = resources.database.list_plans().await?;
        let overview = PlanOverview::build(plans, Utc::now().date_naive());
        let html = views::plans::page(&overview, flashes.messages());
        Ok(flashes.render(StatusCode::OK, html))
    }

    fn plan_input(form: &FormData) -> AppResult<PlanInput> {
        let title = form.required("title", REQUIRED)?;
        let description = form.required("description", REQUIRED)?;
        let start_date = form
            .date("start_date")?
            .ok_or_else(|| AppError::new(ErrorCode::MissingRequiredField, REQUIRED))?;
        let end_date = form
            .date("end_date")?
            .ok_or_else(|| AppError::new(ErrorCode::MissingRequiredField, REQUIRED))?;
        PlanInput::new(title, description, start_date, end_date)
    }

    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Form(form): Form<HashMap<String, String>>,
    ) -> PageResult {
        let form = FormData::from(form);
        match Self::plan_input(&form) {
            Ok(input) => {
                let status = PlanStatus::initial(input.start_date, Utc::now().date_naive());
                let id = resources.database.create_plan(&input, status).await?;
                info!(plan_id = id, status = status.as_str(), "Training plan added");
                flashes.push(Flash::success("New training plan added successfully!"));
            }
            Err(e) => reject(&mut flashes, e)?,
        }
        Ok(flashes.redirect("/plan"))
    }

    async fn handle_edit_form(
        State(resources): State<Arc<ServerResources>>,
        flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        let plan = resources
            .database
            .get_plan(id)
            .await?
            .ok_or_else(|| PageError::not_found("Training plan"))?;
        let html = views::plans::edit_page(&plan, flashes.messages());
        Ok(flashes.render(StatusCode::OK, html))
    }

    async fn handle_edit(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
        Form(form): Form<HashMap<String, String>>,
    ) -> PageResult {
        let plan = resources
            .database
            .get_plan(id)
            .await?
            .ok_or_else(|| PageError::not_found("Training plan"))?;
        let form = FormData::from(form);

        let update = Self::plan_input(&form).and_then(|input| {
            let status = form
                .text("status")
                .map_or(Ok(plan.status), PlanStatus::parse)?;
            Ok((input, status))
        });
        match update {
            Ok((input, status)) => {
                resources.database.update_plan(id, &input, status).await?;
                flashes.push(Flash::success("Training plan updated successfully!"));
                Ok(flashes.redirect("/plan"))
            }
            Err(e) => {
                reject(&mut flashes, e)?;
                Ok(flashes.redirect(&format!("/plans/edit/{id}")))
            }
        }
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        if !resources.database.delete_plan(id).await? {
            return Err(PageError::not_found("Training plan"));
        }
        flashes.push(Flash::success("Training plan deleted successfully."));
        Ok(flashes.redirect("/plan"))
    }
}
