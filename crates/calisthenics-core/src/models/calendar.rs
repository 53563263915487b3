// ABOUTME: Calendar event model with scheduled/completed session status
// ABOUTME: Session status is shared with weekly schedule slots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Status of a calendar event or schedule slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Scheduled,
    Completed,
}

impl SessionStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        *self == Self::Completed
    }

    /// Parse from the stored or submitted text
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a known status
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            other => Err(AppError::invalid_input(format!("Unknown status: {other}"))),
        }
    }
}

/// A calendar event at a fixed local date and time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub start_time: NaiveDateTime,
    pub status: SessionStatus,
}

impl Event {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }
}

/// Validated event form input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventInput {
    pub title: String,
    pub category: String,
    pub start_time: NaiveDateTime,
    pub status: SessionStatus,
}
