// ABOUTME: Dashboard summary across every section of the tracker
// ABOUTME: Counts plus the profile's level and rank when a profile exists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use calisthenics_core::errors::AppResult;
use calisthenics_core::leveling::{LevelProgress, Rank};
use calisthenics_core::models::{ChallengeStatus, PlanStatus, SessionStatus};
use calisthenics_core::stats::completion_percentage;

use crate::database::Database;

/// Level and rank of the profile
#[derive(Debug, Clone)]
pub struct ProfileSummary {
    pub progress: LevelProgress,
    pub rank: Rank,
    pub challenges_completed: i64,
    pub badges_earned: i64,
    pub goals_total: i64,
    pub goals_completed: i64,
    pub motivation_items: i64,
    pub videos: i64,
}

/// Counts shown on the dashboard
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub workouts: i64,
    pub plans_total: i64,
    pub plans_completed: i64,
    pub schedule_total: i64,
    pub schedule_completed: i64,
    pub schedule_percentage: i64,
    pub events_scheduled: i64,
    pub health_records: i64,
    pub latest_weight: Option<f64>,
    /// Absent until a profile has been created
    pub profile: Option<ProfileSummary>,
}

/// Gather the dashboard summary
///
/// # Errors
///
/// Returns an error if a query fails
pub async fn load_summary(db: &Database) -> AppResult<DashboardSummary> {
    let workouts = db.count_workouts().await?;

    let plans = db.list_plans().await?;
    let plans_completed = plans
        .iter()
        .filter(|p| p.status == PlanStatus::Completed)
        .count() as i64;

    let schedule = db.list_schedule_items().await?;
    let schedule_completed = schedule
        .iter()
        .filter(|i| i.status == SessionStatus::Completed)
        .count() as i64;

    let events_scheduled = db
        .list_events()
        .await?
        .iter()
        .filter(|e| e.status == SessionStatus::Scheduled)
        .count() as i64;

    let records = db.list_health_records().await?;
    let latest_weight = records.first().and_then(|r| r.weight);

    let profile = match db.get_profile().await? {
        Some(profile) => {
            let (goals_total, goals_completed) = db.count_goals(profile.id).await?;
            Some(ProfileSummary {
                progress: LevelProgress::compute(profile.level, profile.experience_points),
                rank: Rank::for_level(profile.level),
                challenges_completed: db
                    .count_user_challenges(profile.id, ChallengeStatus::Completed)
                    .await?,
                badges_earned: db.count_earned_badges(profile.id).await?,
                goals_total,
                goals_completed,
                motivation_items: db.count_motivation_items(profile.id).await?,
                videos: db.count_videos(profile.id).await?,
            })
        }
        None => None,
    };

    Ok(DashboardSummary {
        workouts,
        plans_total: plans.len() as i64,
        plans_completed,
        schedule_total: schedule.len() as i64,
        schedule_completed,
        schedule_percentage: completion_percentage(schedule_completed, schedule.len() as i64),
        events_scheduled,
        health_records: records.len() as i64,
        latest_weight,
        profile,
    })
}
