// ABOUTME: Health profile, body measurement records and health plan checklist
// ABOUTME: The profile also carries level and experience points for the tournament
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::leveling::STARTING_LEVEL;
use crate::errors::{AppError, AppResult};

/// The single user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    /// Height in centimetres
    pub height: Option<f64>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub level: i64,
    pub experience_points: i64,
}

impl UserProfile {
    /// Placeholder shown when no profile row exists yet
    #[must_use]
    pub fn empty() -> Self {
        Self {
            id: 0,
            height: None,
            age: None,
            gender: None,
            level: STARTING_LEVEL,
            experience_points: 0,
        }
    }
}

/// Profile form update
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileUpdate {
    pub height: Option<f64>,
    pub age: Option<i64>,
    pub gender: Option<String>,
}

/// A dated body measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    pub id: i64,
    pub date: NaiveDate,
    /// Kilograms
    pub weight: Option<f64>,
    /// Percent
    pub body_fat: Option<f64>,
    pub notes: Option<String>,
}

/// Validated health record form input
#[derive(Debug, Clone, PartialEq)]
pub struct HealthRecordInput {
    pub date: NaiveDate,
    pub weight: f64,
    pub body_fat: Option<f64>,
    pub notes: Option<String>,
}

/// Checklist item status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanItemStatus {
    #[default]
    Pending,
    Completed,
}

impl PlanItemStatus {
    /// The opposite status
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
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
            "completed" => Ok(Self::Completed),
            other => Err(AppError::invalid_input(format!("Unknown plan item status: {other}"))),
        }
    }
}

/// A health plan checklist item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthPlanItem {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: PlanItemStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_item_toggle() {
        assert_eq!(PlanItemStatus::Pending.toggled(), PlanItemStatus::Completed);
        assert_eq!(PlanItemStatus::Completed.toggled(), PlanItemStatus::Pending);
    }

    #[test]
    fn test_empty_profile_starts_at_level_one() {
        let profile = UserProfile::empty();
        assert_eq!(profile.level, 1);
        assert_eq!(profile.experience_points, 0);
        assert!(profile.height.is_none());
    }
}
