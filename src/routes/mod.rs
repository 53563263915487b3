// ABOUTME: Route module organization for the tracker's page and status endpoints
// ABOUTME: Assembles every domain router with static files, body limits and request tracing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

//! Route module for the calisthenics tracker
//!
//! Each domain module holds its route table and thin handlers that read the
//! submission, call into [`crate::services`] or the database and answer with a
//! rendered page or a `303` redirect carrying flash notices.

/// Calendar event routes
pub mod calendar;
/// Goal tracking routes with media uploads
pub mod goals;
/// Health profile, records, plan items and export
pub mod health;
/// Landing page and dashboard
pub mod home;
/// Motivation board routes
pub mod motivation;
/// Training plan routes
pub mod plans;
/// Weekly schedule and sticky note routes
pub mod schedule;
/// Liveness and readiness probes
pub mod status;
/// Challenge tournament routes
pub mod tournament;
/// Video library and upload pipeline
pub mod videos;
/// Exercise library routes
pub mod workouts;

pub use calendar::CalendarRoutes;
pub use goals::GoalRoutes;
pub use health::HealthRoutes;
pub use home::HomeRoutes;
pub use motivation::MotivationRoutes;
pub use plans::PlanRoutes;
pub use schedule::ScheduleRoutes;
pub use status::StatusRoutes;
pub use tournament::TournamentRoutes;
pub use videos::VideoRoutes;
pub use workouts::WorkoutRoutes;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use calisthenics_core::errors::{AppError, ErrorCode};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::errors::PageError;
use crate::flash::{Flash, Flashes};
use crate::resources::ServerResources;

/// Build the complete application router
pub fn build_router(resources: &Arc<ServerResources>) -> Router {
    let static_dir = resources.config.static_dir();
    let body_limit = resources.config.max_upload_bytes();

    Router::new()
        .merge(HomeRoutes::routes(Arc::clone(resources)))
        .merge(WorkoutRoutes::routes(Arc::clone(resources)))
        .merge(GoalRoutes::routes(Arc::clone(resources)))
        .merge(PlanRoutes::routes(Arc::clone(resources)))
        .merge(ScheduleRoutes::routes(Arc::clone(resources)))
        .merge(CalendarRoutes::routes(Arc::clone(resources)))
        .merge(HealthRoutes::routes(Arc::clone(resources)))
        .merge(TournamentRoutes::routes(Arc::clone(resources)))
        .merge(MotivationRoutes::routes(Arc::clone(resources)))
        .merge(VideoRoutes::routes(Arc::clone(resources)))
        .merge(StatusRoutes::routes(Arc::clone(resources)))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Notice shown for an error the user can correct by resubmitting
///
/// Returns `None` for missing records and server-side failures, which render
/// as error pages instead.
#[must_use]
pub fn rejection_notice(error: &AppError) -> Option<Flash> {
    match error.code {
        ErrorCode::InvalidInput
        | ErrorCode::MissingRequiredField
        | ErrorCode::InvalidFormat
        | ErrorCode::ValueOutOfRange
        | ErrorCode::PayloadTooLarge
        | ErrorCode::PermissionDenied
        | ErrorCode::ResourceAlreadyExists => Some(Flash::danger(error.message.clone())),
        ErrorCode::InvalidState => Some(Flash::warning(error.message.clone())),
        ErrorCode::ResourceNotFound
        | ErrorCode::ExternalToolFailed
        | ErrorCode::ConfigError
        | ErrorCode::ConfigInvalid
        | ErrorCode::InternalError
        | ErrorCode::DatabaseError
        | ErrorCode::StorageError
        | ErrorCode::SerializationError => None,
    }
}

/// Queue the notice for a user-correctable error, or hand the error back as a page
///
/// # Errors
///
/// Returns the error unchanged when it has no user-facing notice
pub fn reject(flashes: &mut Flashes, error: AppError) -> Result<(), PageError> {
    match rejection_notice(&error) {
        Some(notice) => {
            flashes.push(notice);
            Ok(())
        }
        None => Err(PageError(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flash::FlashCategory;

    #[test]
    fn test_validation_errors_become_danger_notices() {
        let notice = rejection_notice(&AppError::new(
            ErrorCode::MissingRequiredField,
            "All fields are required.",
        ))
        .expect("notice");
        assert_eq!(notice.category, FlashCategory::Danger);
        assert_eq!(notice.message, "All fields are required.");
    }

    #[test]
    fn test_state_conflicts_become_warnings() {
        let notice = rejection_notice(&AppError::invalid_state("Challenge is still locked."))
            .expect("notice");
        assert_eq!(notice.category, FlashCategory::Warning);
    }

    #[test]
    fn test_server_failures_propagate() {
        let mut flashes = Flashes::default();
        assert!(reject(&mut flashes, AppError::database("locked")).is_err());
        assert!(reject(&mut flashes, AppError::not_found("Workout")).is_err());
        assert!(flashes.is_empty());
    }
}
