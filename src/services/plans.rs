// ABOUTME: Training plan overview: per-day coverage map and completion statistics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::collections::BTreeMap;

use calisthenics_core::constants::plans::DAY_MAP_RADIUS_DAYS;
use calisthenics_core::models::{PlanStatus, TrainingPlan};
use calisthenics_core::stats::completion_percentage;
use chrono::{Days, NaiveDate};
use serde::Serialize;

/// One plan as shown on a calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanDay {
    pub id: i64,
    pub title: String,
    pub status: PlanStatus,
    pub description: Option<String>,
}

/// Everything the plan page shows
#[derive(Debug, Clone)]
pub struct PlanOverview {
    pub plans: Vec<TrainingPlan>,
    /// Days near today covered by at least one plan, with the plans covering it
    pub plans_by_day: BTreeMap<NaiveDate, Vec<PlanDay>>,
    pub total: i64,
    pub completed: i64,
    pub pending: i64,
    pub completion_percentage: i64,
    pub today: NaiveDate,
}

impl PlanOverview {
    /// Build from plans already ordered by start date
    #[must_use]
    pub fn build(plans: Vec<TrainingPlan>, today: NaiveDate) -> Self {
        let radius = Days::new(DAY_MAP_RADIUS_DAYS.unsigned_abs());
        let from = today.checked_sub_days(radius).unwrap_or(NaiveDate::MIN);
        let to = today.checked_add_days(radius).unwrap_or(NaiveDate::MAX);

        let mut plans_by_day: BTreeMap<NaiveDate, Vec<PlanDay>> = BTreeMap::new();
        for plan in &plans {
            for day in plan.days_within(from, to) {
                plans_by_day.entry(day).or_default().push(PlanDay {
                    id: plan.id,
                    title: plan.title.clone(),
                    status: plan.status,
                    description: plan.description.clone(),
                });
            }
        }

        let total = plans.len() as i64;
        let completed = plans
            .iter()
            .filter(|p| p.status == PlanStatus::Completed)
            .count() as i64;

        Self {
            plans,
            plans_by_day,
            total,
            completed,
            pending: total - completed,
            completion_percentage: completion_percentage(completed, total),
            today,
        }
    }
}
