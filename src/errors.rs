// ABOUTME: Web-facing error type that renders failures as HTML pages
// ABOUTME: Re-exports the shared AppError and maps it onto status-coded error pages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

//! # Error handling for page routes
//!
//! Domain and database code returns [`AppError`]. Browser-facing handlers
//! return [`PageError`], which keeps the error code's HTTP status but answers
//! with the HTML error page instead of a JSON body.

pub use calisthenics_core::errors::{AppError, AppResult, ErrorCode, ErrorResponse};

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::{error, warn};

use crate::views;

/// Result alias for page handlers
pub type PageResult<T = Response> = Result<T, PageError>;

/// An [`AppError`] rendered as an HTML page
#[derive(Debug)]
pub struct PageError(pub AppError);

impl PageError {
    /// 404 page for a missing record
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self(AppError::not_found(resource))
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<AppError> for PageError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = ?self.0.code, error = %self.0, "Request failed");
        } else {
            warn!(code = ?self.0.code, error = %self.0, "Request rejected");
        }
        // Internal details stay in the log
        let message = if status.is_server_error() {
            self.0.code.description().to_owned()
        } else {
            self.0.message.clone()
        };
        (status, Html(views::error::render(status, &message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_keeps_status() {
        let response = PageError::not_found("Workout").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = PageError(AppError::database("disk I/O error at /var/db"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
