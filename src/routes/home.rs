// ABOUTME: Landing page and dashboard route handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

use crate::errors::PageResult;
use crate::flash::Flashes;
use crate::resources::ServerResources;
use crate::services::dashboard;
use crate::views;

/// Landing and dashboard routes
pub struct HomeRoutes;

impl HomeRoutes {
    /// Create the landing and dashboard routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_index))
            .route("/dashboard", get(Self::handle_dashboard))
            .with_state(resources)
    }

    async fn handle_index(flashes: Flashes) -> PageResult {
        let html = views::home::index(flashes.messages());
        Ok(flashes.render(StatusCode::OK, html))
    }

    async fn handle_dashboard(
        State(resources): State<Arc<ServerResources>>,
        flashes: Flashes,
    ) -> PageResult {
        let summary = dashboard::load_summary(&resources.database).await?;
        let html = views::home::dashboard(&summary, flashes.messages());
        Ok(flashes.render(StatusCode::OK, html))
    }
}
