// ABOUTME: Weekly schedule overview grouping slots by weekday with session statistics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use calisthenics_core::models::{ScheduleItem, SessionStatus, StickyNote, DAYS_OF_WEEK};
use calisthenics_core::stats::completion_percentage;
use chrono::Weekday;

/// Category counted as a workout session
pub const WORKOUT_CATEGORY: &str = "workout";
/// Category counted as a rest session
pub const REST_CATEGORY: &str = "rest";

/// Everything the schedule page shows
#[derive(Debug, Clone)]
pub struct WeekOverview {
    /// Monday through Sunday, each with its slots in time order
    pub days: Vec<(Weekday, Vec<ScheduleItem>)>,
    pub sticky_notes: Vec<StickyNote>,
    pub total: i64,
    pub completed: i64,
    pub workouts: i64,
    pub rest: i64,
    pub completion_percentage: i64,
    pub current_day: Weekday,
}

impl WeekOverview {
    /// Build from slots already ordered by time
    #[must_use]
    pub fn build(items: Vec<ScheduleItem>, sticky_notes: Vec<StickyNote>, current_day: Weekday) -> Self {
        let total = items.len() as i64;
        let completed = items
            .iter()
            .filter(|i| i.status == SessionStatus::Completed)
            .count() as i64;
        let workouts = items.iter().filter(|i| i.category == WORKOUT_CATEGORY).count() as i64;
        let rest = items.iter().filter(|i| i.category == REST_CATEGORY).count() as i64;

        let mut days: Vec<(Weekday, Vec<ScheduleItem>)> =
            DAYS_OF_WEEK.iter().map(|d| (*d, Vec::new())).collect();
        for item in items {
            if let Some((_, slots)) = days.iter_mut().find(|(d, _)| *d == item.day_of_week) {
                slots.push(item);
            }
        }

        Self {
            days,
            sticky_notes,
            total,
            completed,
            workouts,
            rest,
            completion_percentage: completion_percentage(completed, total),
            current_day,
        }
    }
}
