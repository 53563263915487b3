// ABOUTME: Goal and goal media models with progress tracking
// ABOUTME: Goal lifecycle status plus before/after gallery roles for attached media
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Goal lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl GoalStatus {
    /// Database / display representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Parse from the stored text
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a known status
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(AppError::invalid_input(format!("Unknown goal status: {other}"))),
        }
    }
}

/// A fitness goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: GoalStatus,
    pub target_date: NaiveDate,
    pub completed_date: Option<DateTime<Utc>>,
    pub current_progress: i64,
    pub target_progress: i64,
    pub progress_unit: Option<String>,
    pub notes: Option<String>,
    pub user_id: i64,
}

impl Goal {
    /// Progress towards the target as a whole percentage, capped at 100
    #[must_use]
    pub fn progress_percentage(&self) -> i64 {
        if self.target_progress <= 0 {
            return 0;
        }
        let pct = crate::stats::completion_percentage(self.current_progress, self.target_progress);
        pct.clamp(0, 100)
    }

    /// Whether the goal has been completed
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == GoalStatus::Completed
    }
}

/// Fields for a new goal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGoal {
    pub title: String,
    pub description: Option<String>,
    pub target_date: NaiveDate,
    pub notes: Option<String>,
    pub user_id: i64,
}

/// Kind of attached media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    /// Classify an upload by its declared content type
    #[must_use]
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        match content_type {
            Some(ct) if ct.starts_with("image/") => Self::Image,
            _ => Self::Video,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    /// Parse from the stored text
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a known media type
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            other => Err(AppError::invalid_input(format!("Unknown media type: {other}"))),
        }
    }
}

/// Role of a media item in the before/after gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryRole {
    Before,
    After,
    None,
}

impl GalleryRole {
    /// Parse the `role` form field
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not `before`, `after` or `none`
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            "none" => Ok(Self::None),
            other => Err(AppError::invalid_input(format!("Unknown gallery role: {other}"))),
        }
    }
}

/// Media attached to a goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalMedia {
    pub id: i64,
    pub goal_id: i64,
    /// Path relative to the static root
    pub file_path: String,
    pub media_type: MediaType,
    pub upload_date: DateTime<Utc>,
    pub is_before_photo: bool,
    pub is_after_photo: bool,
}

/// An upload saved to disk and waiting to be attached to its goal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGoalMedia {
    /// Path relative to the static root
    pub file_path: String,
    pub media_type: MediaType,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(current: i64, target: i64) -> Goal {
        Goal {
            id: 1,
            title: "Muscle-up".into(),
            description: None,
            status: GoalStatus::InProgress,
            target_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap_or_default(),
            completed_date: None,
            current_progress: current,
            target_progress: target,
            progress_unit: None,
            notes: None,
            user_id: 1,
        }
    }

    #[test]
    fn test_goal_status_round_trip_text() {
        for status in [GoalStatus::Pending, GoalStatus::InProgress, GoalStatus::Completed] {
            assert_eq!(GoalStatus::parse(status.as_str()).ok(), Some(status));
        }
        assert!(GoalStatus::parse("archived").is_err());
    }

    #[test]
    fn test_progress_percentage() {
        assert_eq!(goal(0, 100).progress_percentage(), 0);
        assert_eq!(goal(45, 100).progress_percentage(), 45);
        assert_eq!(goal(150, 100).progress_percentage(), 100);
        assert_eq!(goal(5, 0).progress_percentage(), 0);
    }

    #[test]
    fn test_media_type_from_content_type() {
        assert_eq!(MediaType::from_content_type(Some("image/png")), MediaType::Image);
        assert_eq!(MediaType::from_content_type(Some("video/mp4")), MediaType::Video);
        assert_eq!(MediaType::from_content_type(None), MediaType::Video);
    }
}
