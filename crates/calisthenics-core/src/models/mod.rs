// ABOUTME: Domain models for workouts, goals, plans, schedule, health, media and tournament
// ABOUTME: Row types, lifecycle status enums and form input types shared across the workspace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

//! Core data models.
//!
//! Status columns are stored as lowercase text; each status enum exposes
//! `as_str` for writing and `parse` for reading back.

mod calendar;
mod goal;
mod health;
mod motivation;
mod plan;
mod schedule;
mod tournament;
mod video;
mod workout;

pub use calendar::{Event, EventInput, SessionStatus};
pub use goal::{GalleryRole, Goal, GoalMedia, GoalStatus, MediaType, NewGoal, NewGoalMedia};
pub use health::{
    HealthPlanItem, HealthRecord, HealthRecordInput, PlanItemStatus, ProfileUpdate, UserProfile,
};
pub use motivation::{is_web_url, validate_source_url, MotivationItem, NewMotivationItem};
pub use plan::{PlanInput, PlanStatus, TrainingPlan};
pub use schedule::{
    parse_weekday, weekday_name, ScheduleItem, ScheduleItemInput, StickyNote, StickyNoteInput,
    DAYS_OF_WEEK,
};
pub use tournament::{
    Badge, Challenge, ChallengeInput, ChallengeStatus, EarnedBadge, NewBadge, UserChallenge,
};
pub use video::{NewVideo, Video};
pub use workout::{NewWorkout, Workout};

/// Category filter used by the motivation and video galleries
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No filtering
    #[default]
    All,
    /// Only items in this category
    Only(String),
}

impl CategoryFilter {
    /// Build from the `category` query parameter; missing, empty and `all` mean no filter
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            None | Some("" | "all") => Self::All,
            Some(category) => Self::Only(category.to_owned()),
        }
    }

    /// Value echoed back to the filter bar
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Only(category) => category,
        }
    }

    /// Category to filter on, if any
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(category) => Some(category),
        }
    }
}
