// ABOUTME: Training plan model spanning an inclusive date range
// ABOUTME: Plan status derivation from the start date and day iteration helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::plans::MAX_PLAN_DAYS;
use crate::errors::{AppError, AppResult};

/// Training plan status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Upcoming,
    Pending,
    Completed,
}

impl PlanStatus {
    /// Status of a freshly created plan: upcoming if it starts after today
    #[must_use]
    pub fn initial(start_date: NaiveDate, today: NaiveDate) -> Self {
        if start_date > today {
            Self::Upcoming
        } else {
            Self::Pending
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    /// Parse from the stored or submitted text
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a known status
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "upcoming" => Ok(Self::Upcoming),
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            other => Err(AppError::invalid_input(format!("Unknown plan status: {other}"))),
        }
    }
}

/// A training plan covering `start_date..=end_date`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPlan {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: PlanStatus,
}

impl TrainingPlan {
    /// Every day the plan covers, inclusive of both ends
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days_within(self.start_date, self.end_date)
    }

    /// Covered days that also fall inside `from..=to`
    pub fn days_within(&self, from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> + '_ {
        let last = self.end_date.min(to);
        self.start_date
            .max(from)
            .iter_days()
            .take_while(move |day| *day <= last)
    }

    /// Whether the plan covers the given day
    #[must_use]
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }
}

/// Validated plan form input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanInput {
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl PlanInput {
    /// Build a plan input, rejecting ranges that end before they start or
    /// span more than a year
    ///
    /// # Errors
    ///
    /// Returns an error when `end_date` precedes `start_date` or the plan is too long
    pub fn new(
        title: String,
        description: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<Self> {
        if end_date < start_date {
            return Err(AppError::invalid_input(
                "End date must be on or after the start date.",
            ));
        }
        if (end_date - start_date).num_days() >= MAX_PLAN_DAYS {
            return Err(AppError::invalid_input(format!(
                "A training plan can span at most {MAX_PLAN_DAYS} days."
            )));
        }
        Ok(Self {
            title,
            description,
            start_date,
            end_date,
        })
    }
}
