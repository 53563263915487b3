// ABOUTME: Weekly schedule slots and sticky notes
// ABOUTME: Weekday naming helpers used to group slots Monday through Sunday
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use super::calendar::SessionStatus;
use crate::errors::{AppError, AppResult};

/// Days in display order
pub const DAYS_OF_WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English day name as stored in `day_of_week`
#[must_use]
pub const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parse a full English day name
///
/// # Errors
///
/// Returns an error if the name is not one of Monday..Sunday
pub fn parse_weekday(name: &str) -> AppResult<Weekday> {
    DAYS_OF_WEEK
        .into_iter()
        .find(|day| weekday_name(*day) == name)
        .ok_or_else(|| AppError::invalid_input(format!("Unknown day of week: {name}")))
}

/// A recurring weekly slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub id: i64,
    pub title: String,
    pub details: Option<String>,
    pub day_of_week: Weekday,
    pub time: NaiveTime,
    /// Free text; `workout` and `rest` are counted on the schedule page
    pub category: String,
    pub status: SessionStatus,
}

/// Validated schedule slot form input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleItemInput {
    pub title: String,
    pub details: Option<String>,
    pub day_of_week: Weekday,
    pub time: NaiveTime,
    pub category: String,
}

/// A sticky note pinned to the schedule page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickyNote {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub color: String,
}

/// Sticky note form input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StickyNoteInput {
    pub title: String,
    pub content: String,
    pub color: String,
}
