// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Page summaries, state transitions and the upload pipelines live here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

//! Domain service layer
//!
//! Route handlers parse the request, call into a service and turn the result
//! into a page or a redirect. Services take the [`Database`](crate::database::Database)
//! and, where files are involved, the [`UploadStore`](crate::media::UploadStore),
//! so they can be exercised without an HTTP stack.

/// Monthly calendar grid, month statistics and upcoming events
pub mod calendar;

/// Cross-section counts for the dashboard
pub mod dashboard;

/// Goal overview, status toggling, progress and media handling
pub mod goals;

/// Health overview, chart data and CSV export
pub mod health;

/// Motivation board listing, cover images and favourites
pub mod motivation;

/// Training plan per-day map and statistics
pub mod plans;

/// Weekly schedule grouping and statistics
pub mod schedule;

/// Tournament board, challenge lifecycle and completion notices
pub mod tournament;

/// Video library and the upload pipeline
pub mod videos;
