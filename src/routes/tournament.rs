// ABOUTME: Tournament route handlers: challenge board, start/complete and custom challenges
// ABOUTME: Custom challenges can only be edited or deleted by the profile that created them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Form, Router};
use calisthenics_core::errors::{AppError, ErrorCode};
use calisthenics_core::models::UserProfile;
use tracing::info;

use super::reject;
use crate::errors::{PageError, PageResult};
use crate::flash::{Flash, Flashes};
use crate::forms::FormData;
use crate::resources::ServerResources;
use crate::services::tournament;
use crate::views;

const EDIT_DENIED: &str = "You do not have permission to edit this challenge.";
const DELETE_DENIED: &str = "You do not have permission to delete this challenge.";

/// Challenge tournament routes
pub struct TournamentRoutes;

impl TournamentRoutes {
    /// Create the tournament routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/tournament", get(Self::handle_board))
            .route("/challenges/start/:id", post(Self::handle_start))
            .route("/challenges/complete/:id", post(Self::handle_complete))
            .route("/challenges/create", post(Self::handle_create))
            .route(
                "/challenges/edit/:id",
                get(Self::handle_edit_form).post(Self::handle_edit),
            )
            .route("/challenges/delete/:id", post(Self::handle_delete))
            .with_state(resources)
    }

    async fn handle_board(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
    ) -> PageResult {
        let (profile, notices) = tournament::prepare_profile(&resources.database).await?;
        for notice in notices {
            flashes.push(notice);
        }
        let board = tournament::load_board(&resources.database, profile).await?;
        let html = views::tournament::page(&board, flashes.messages());
        Ok(flashes.render(StatusCode::OK, html))
    }

    /// The profile; when it is missing the explaining notice is queued
    async fn require_profile(
        resources: &ServerResources,
        flashes: &mut Flashes,
    ) -> Result<Option<UserProfile>, PageError> {
        let profile = resources.database.get_profile().await?;
        if profile.is_none() {
            flashes.push(Flash::danger("User profile not found."));
        }
        Ok(profile)
    }

    async fn handle_start(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        let Some(profile) = Self::require_profile(&resources, &mut flashes).await? else {
            return Ok(flashes.redirect("/tournament"));
        };
        match tournament::start_challenge(&resources.database, &profile, id).await {
            Ok(notice) => flashes.push(notice),
            Err(e) => reject(&mut flashes, e)?,
        }
        Ok(flashes.redirect("/tournament"))
    }

    async fn handle_complete(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        let Some(profile) = Self::require_profile(&resources, &mut flashes).await? else {
            return Ok(flashes.redirect("/tournament"));
        };
        match tournament::complete_challenge(&resources.database, &profile, id).await {
            Ok(notices) => {
                for notice in notices {
                    flashes.push(notice);
                }
            }
            Err(e) if e.code == ErrorCode::InvalidState => {
                flashes.push(Flash::warning("This challenge is not currently active."));
            }
            Err(e) => reject(&mut flashes, e)?,
        }
        Ok(flashes.redirect("/tournament"))
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Form(form): Form<HashMap<String, String>>,
    ) -> PageResult {
        let Some(profile) = Self::require_profile(&resources, &mut flashes).await? else {
            return Ok(flashes.redirect("/tournament"));
        };
        match tournament::challenge_input(&FormData::from(form)) {
            Ok(input) => {
                let id = resources
                    .database
                    .create_user_challenge(profile.id, &input)
                    .await?;
                info!(challenge_id = id, title = %input.title, "Custom challenge created");
                flashes.push(Flash::success("Your custom challenge has been created!"));
            }
            Err(e) => reject(&mut flashes, e)?,
        }
        Ok(flashes.redirect("/tournament"))
    }

    async fn handle_edit_form(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        let Some(profile) = Self::require_profile(&resources, &mut flashes).await? else {
            return Ok(flashes.redirect("/tournament"));
        };
        match tournament::owned_challenge(&resources.database, &profile, id, EDIT_DENIED).await {
            Ok(challenge) => {
                let html = views::tournament::edit_page(&challenge, flashes.messages());
                Ok(flashes.render(StatusCode::OK, html))
            }
            Err(e) => Self::denied(flashes, e),
        }
    }

    async fn handle_edit(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
        Form(form): Form<HashMap<String, String>>,
    ) -> PageResult {
        let Some(profile) = Self::require_profile(&resources, &mut flashes).await? else {
            return Ok(flashes.redirect("/tournament"));
        };
        if let Err(e) =
            tournament::owned_challenge(&resources.database, &profile, id, EDIT_DENIED).await
        {
            return Self::denied(flashes, e);
        }

        match tournament::challenge_input(&FormData::from(form)) {
            Ok(input) => {
                resources.database.update_challenge(id, &input).await?;
                flashes.push(Flash::success("Your challenge has been updated."));
                Ok(flashes.redirect("/tournament"))
            }
            Err(e) => {
                reject(&mut flashes, e)?;
                Ok(flashes.redirect(&format!("/challenges/edit/{id}")))
            }
        }
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        let Some(profile) = Self::require_profile(&resources, &mut flashes).await? else {
            return Ok(flashes.redirect("/tournament"));
        };
        if let Err(e) =
            tournament::owned_challenge(&resources.database, &profile, id, DELETE_DENIED).await
        {
            return Self::denied(flashes, e);
        }

        resources.database.delete_challenge(id).await?;
        info!(challenge_id = id, "Custom challenge deleted");
        flashes.push(Flash::success("Your custom challenge has been deleted."));
        Ok(flashes.redirect("/tournament"))
    }

    /// Ownership failures go back to the board; a missing challenge is a 404
    fn denied(mut flashes: Flashes, error: AppError) -> PageResult {
        reject(&mut flashes, error)?;
        Ok(flashes.redirect("/tournament"))
    }
}
