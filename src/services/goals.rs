// ABOUTME: Goal overview, status toggling and progress recording
// ABOUTME: Creates goals with their uploaded media and removes media files on delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::collections::HashMap;

use calisthenics_core::constants::uploads::GOALS_DIR;
use calisthenics_core::errors::AppResult;
use calisthenics_core::models::{
    GalleryRole, Goal, GoalMedia, GoalStatus, MediaType, NewGoal, NewGoalMedia,
};
use calisthenics_core::stats::completion_percentage;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::database::Database;
use crate::forms::UploadedFile;
use crate::media::UploadStore;

/// Everything the goals page shows
#[derive(Debug, Clone)]
pub struct GoalOverview {
    /// Nearest target date first
    pub goals: Vec<Goal>,
    pub media_by_goal: HashMap<i64, Vec<GoalMedia>>,
    pub total: i64,
    pub completed: i64,
    pub completion_percentage: i64,
    pub before_photo: Option<GoalMedia>,
    pub after_photo: Option<GoalMedia>,
}

/// Load the goals page data for the profile
///
/// # Errors
///
/// Returns an error if a query fails
pub async fn load_overview(db: &Database, user_id: i64) -> AppResult<GoalOverview> {
    let goals = db.list_goals(user_id).await?;
    let mut media_by_goal: HashMap<i64, Vec<GoalMedia>> = HashMap::new();
    for media in db.list_goal_media_for_user(user_id).await? {
        media_by_goal.entry(media.goal_id).or_default().push(media);
    }

    let total = goals.len() as i64;
    let completed = goals.iter().filter(|g| g.is_completed()).count() as i64;

    Ok(GoalOverview {
        goals,
        media_by_goal,
        total,
        completed,
        completion_percentage: completion_percentage(completed, total),
        before_photo: db.gallery_photo(user_id, GalleryRole::Before).await?,
        after_photo: db.gallery_photo(user_id, GalleryRole::After).await?,
    })
}

/// New persisted state of a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalUpdate {
    pub status: GoalStatus,
    pub current_progress: i64,
    pub completed_date: Option<DateTime<Utc>>,
}

/// Completed goals reopen as in progress; anything else completes at full progress
#[must_use]
pub fn toggle_status(goal: &Goal, now: DateTime<Utc>) -> GoalUpdate {
    if goal.is_completed() {
        GoalUpdate {
            status: GoalStatus::InProgress,
            current_progress: goal.current_progress,
            completed_date: None,
        }
    } else {
        GoalUpdate {
            status: GoalStatus::Completed,
            current_progress: goal.target_progress,
            completed_date: Some(now),
        }
    }
}

/// Record progress clamped to `0..=target`; reaching the target completes the goal
#[must_use]
pub fn record_progress(goal: &Goal, value: i64, now: DateTime<Utc>) -> GoalUpdate {
    let target = goal.target_progress.max(0);
    let current_progress = value.clamp(0, target);
    if current_progress >= target {
        GoalUpdate {
            status: GoalStatus::Completed,
            current_progress,
            completed_date: goal.completed_date.or(Some(now)),
        }
    } else {
        GoalUpdate {
            status: GoalStatus::InProgress,
            current_progress,
            completed_date: None,
        }
    }
}

/// Persist a goal update
///
/// # Errors
///
/// Returns an error if the update fails
pub async fn apply_update(db: &Database, goal_id: i64, update: GoalUpdate) -> AppResult<bool> {
    db.update_goal_progress(
        goal_id,
        update.status,
        update.current_progress,
        update.completed_date,
    )
    .await
}

/// Store the selected uploads and insert the goal with its media
///
/// Files written before a failed insert are removed again.
///
/// # Errors
///
/// Returns an error if a file cannot be written or the insert fails
pub async fn create_goal(
    db: &Database,
    store: &UploadStore,
    goal: &NewGoal,
    uploads: &[&UploadedFile],
) -> AppResult<i64> {
    let mut media = Vec::with_capacity(uploads.len());
    for upload in uploads {
        let stored = match upload.persist(store, GOALS_DIR).await {
            Ok(stored) => stored,
            Err(e) => {
                remove_files(store, &media).await;
                return Err(e);
            }
        };
        media.push(NewGoalMedia {
            file_path: stored.relative_path,
            media_type: MediaType::from_content_type(upload.content_type.as_deref()),
        });
    }

    match db.create_goal_with_media(goal, &media).await {
        Ok(id) => {
            info!(goal_id = id, media = media.len(), "Goal created");
            Ok(id)
        }
        Err(e) => {
            remove_files(store, &media).await;
            Err(e)
        }
    }
}

async fn remove_files(store: &UploadStore, media: &[NewGoalMedia]) {
    for item in media {
        store.remove(&item.file_path).await;
    }
}

/// Remove a goal's media files, then the goal and its media rows
///
/// # Errors
///
/// Returns an error if a query fails
pub async fn delete_goal(db: &Database, store: &UploadStore, goal_id: i64) -> AppResult<bool> {
    for media in db.list_goal_media(goal_id).await? {
        store.remove(&media.file_path).await;
    }
    db.delete_goal(goal_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn goal(status: GoalStatus, current: i64) -> Goal {
        Goal {
            id: 1,
            title: "Pistol squat".to_owned(),
            description: None,
            status,
            target_date: NaiveDate::from_ymd_opt(2025, 9, 1).expect("date"),
            completed_date: None,
            current_progress: current,
            target_progress: 100,
            progress_unit: None,
            notes: None,
            user_id: 1,
        }
    }

    #[test]
    fn test_toggle_completes_at_full_progress() {
        let now = Utc::now();
        let update = toggle_status(&goal(GoalStatus::Pending, 20), now);
        assert_eq!(update.status, GoalStatus::Completed);
        assert_eq!(update.current_progress, 100);
        assert_eq!(update.completed_date, Some(now));
    }

    #[test]
    fn test_toggle_reopens_completed_goal() {
        let update = toggle_status(&goal(GoalStatus::Completed, 100), Utc::now());
        assert_eq!(update.status, GoalStatus::InProgress);
        assert_eq!(update.current_progress, 100);
        assert!(update.completed_date.is_none());
    }

    #[test]
    fn test_progress_is_clamped() {
        let now = Utc::now();
        let partial = record_progress(&goal(GoalStatus::Pending, 0), 40, now);
        assert_eq!(partial.status, GoalStatus::InProgress);
        assert_eq!(partial.current_progress, 40);

        let over = record_progress(&goal(GoalStatus::InProgress, 40), 250, now);
        assert_eq!(over.status, GoalStatus::Completed);
        assert_eq!(over.current_progress, 100);

        let negative = record_progress(&goal(GoalStatus::InProgress, 40), -5, now);
        assert_eq!(negative.current_progress, 0);
    }
}
