// ABOUTME: Calendar overview: events keyed by date plus current-month session statistics
// ABOUTME: Upcoming list covers scheduled events from today over the next few days
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::collections::BTreeMap;

use calisthenics_core::constants::formats::EVENT_TIME;
use calisthenics_core::constants::windows::UPCOMING_EVENT_DAYS;
use calisthenics_core::errors::{AppError, AppResult};
use calisthenics_core::models::{Event, SessionStatus};
use calisthenics_core::stats::completion_percentage;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::schedule::{REST_CATEGORY, WORKOUT_CATEGORY};
use crate::database::Database;

/// Event as placed on the month grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEntry {
    pub id: i64,
    #[serde(rename = "type")]
    pub category: String,
    pub name: String,
    /// `hh:mm AM`
    pub time: String,
    pub status: SessionStatus,
}

impl From<&Event> for CalendarEntry {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            category: event.category.clone(),
            name: event.title.clone(),
            time: event.start_time.format(EVENT_TIME).to_string(),
            status: event.status,
        }
    }
}

/// Session counts for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthStats {
    pub workouts: i64,
    pub completed_workouts: i64,
    pub planned_workouts: i64,
    pub rest_days: i64,
    pub completion_percentage: i64,
}

impl MonthStats {
    /// Statistics over the events of one month
    #[must_use]
    pub fn from_events(events: &[Event]) -> Self {
        let workouts: Vec<&Event> = events
            .iter()
            .filter(|e| e.category == WORKOUT_CATEGORY)
            .collect();
        let total = workouts.len() as i64;
        let completed = workouts.iter().filter(|e| e.is_completed()).count() as i64;
        let rest_days = events
            .iter()
            .filter(|e| e.category == REST_CATEGORY)
            .count() as i64;
        Self {
            workouts: total,
            completed_workouts: completed,
            planned_workouts: total - completed,
            rest_days,
            completion_percentage: completion_percentage(completed, total),
        }
    }
}

/// Everything the calendar page shows
#[derive(Debug, Clone)]
pub struct CalendarOverview {
    pub events_by_date: BTreeMap<NaiveDate, Vec<CalendarEntry>>,
    pub month: MonthStats,
    pub upcoming: Vec<Event>,
}

/// Group events by the date they start on
#[must_use]
pub fn group_by_date(events: &[Event]) -> BTreeMap<NaiveDate, Vec<CalendarEntry>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<CalendarEntry>> = BTreeMap::new();
    for event in events {
        grouped
            .entry(event.start_time.date())
            .or_default()
            .push(CalendarEntry::from(event));
    }
    grouped
}

/// First instant of the month containing `day` and of the month after it
///
/// # Errors
///
/// Returns an error only for dates at the far end of chrono's range
pub fn month_bounds(day: NaiveDate) -> AppResult<(NaiveDateTime, NaiveDateTime)> {
    let first = day
        .with_day(1)
        .ok_or_else(|| AppError::internal("month has no first day"))?;
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    }
    .ok_or_else(|| AppError::internal("date out of range"))?;
    Ok((first.and_time(chrono::NaiveTime::MIN), next.and_time(chrono::NaiveTime::MIN)))
}

/// Load the calendar page data for `today` (UTC)
///
/// # Errors
///
/// Returns an error if a query fails
pub async fn load_overview(db: &Database, today: NaiveDate) -> AppResult<CalendarOverview> {
    let all = db.list_events().await?;
    let (month_start, month_end) = month_bounds(today)?;
    let this_month = db.list_events_between(month_start, month_end, None).await?;

    let upcoming_start = today.and_time(chrono::NaiveTime::MIN);
    let upcoming_end = upcoming_start + Duration::days(UPCOMING_EVENT_DAYS);
    let upcoming = db
        .list_events_between(upcoming_start, upcoming_end, Some(SessionStatus::Scheduled))
        .await?;

    Ok(CalendarOverview {
        events_by_date: group_by_date(&all),
        month: MonthStats::from_events(&this_month),
        upcoming,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: i64, at: &str, category: &str, status: SessionStatus) -> Event {
        Event {
            id,
            title: format!("Event {id}"),
            category: category.to_owned(),
            start_time: NaiveDateTime::parse_from_str(at, "%Y-%m-%dT%H:%M").expect("datetime"),
            status,
        }
    }

    #[test]
    fn test_month_stats() {
        let events = vec![
            event(1, "2025-06-02T07:00", "workout", SessionStatus::Completed),
            event(2, "2025-06-03T07:00", "workout", SessionStatus::Scheduled),
            event(3, "2025-06-04T07:00", "workout", SessionStatus::Completed),
            event(4, "2025-06-05T07:00", "rest", SessionStatus::Scheduled),
        ];
        let stats = MonthStats::from_events(&events);
        assert_eq!(stats.workouts, 3);
        assert_eq!(stats.completed_workouts, 2);
        assert_eq!(stats.planned_workouts, 1);
        assert_eq!(stats.rest_days, 1);
        assert_eq!(stats.completion_percentage, 67);
    }

    #[test]
    fn test_same_day_events_are_kept() {
        let events = vec![
            event(1, "2025-06-02T07:00", "workout", SessionStatus::Scheduled),
            event(2, "2025-06-02T18:30", "rest", SessionStatus::Scheduled),
        ];
        let grouped = group_by_date(&events);
        let day = NaiveDate::from_ymd_opt(2025, 6, 2).expect("date");
        assert_eq!(grouped[&day].len(), 2);
        assert_eq!(grouped[&day][1].time, "06:30 PM");
    }

    #[test]
    fn test_month_bounds_wraps_year() {
        let (start, end) = month_bounds(NaiveDate::from_ymd_opt(2025, 12, 15).expect("date"))
            .expect("bounds");
        assert_eq!(start.to_string(), "2025-12-01 00:00:00");
        assert_eq!(end.to_string(), "2026-01-01 00:00:00");
    }
}
