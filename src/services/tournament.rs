// ABOUTME: Tournament orchestration: board loading, challenge start and completion notices
// ABOUTME: Turns completion records into the notices shown after a redirect
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use calisthenics_core::errors::{AppError, AppResult, ErrorCode};
use calisthenics_core::leveling::{LevelProgress, Rank};
use calisthenics_core::models::{
    Challenge, ChallengeInput, ChallengeStatus, EarnedBadge, UserChallenge, UserProfile,
};
use chrono::Utc;
use tracing::info;

use crate::database::{CompletionRecord, Database};
use crate::flash::Flash;
use crate::forms::FormData;

/// Everything the tournament page shows
#[derive(Debug, Clone)]
pub struct TournamentBoard {
    pub profile: UserProfile,
    pub progress: LevelProgress,
    pub rank: Rank,
    /// Ordered by level requirement
    pub challenges: Vec<UserChallenge>,
    pub badges: Vec<EarnedBadge>,
    pub completed: i64,
    pub active: i64,
    pub badges_earned: i64,
}

/// Ensure a profile exists and unlock every challenge its level allows
///
/// Returns the profile and the notices describing what changed.
///
/// # Errors
///
/// Returns an error if a query fails
pub async fn prepare_profile(db: &Database) -> AppResult<(UserProfile, Vec<Flash>)> {
    let mut notices = Vec::new();
    let (profile, created) = db.get_or_create_profile().await?;
    if created {
        notices.push(Flash::info("Welcome! Your user profile has been created."));
    }

    let unlocked = db.unlock_eligible_challenges(profile.id, profile.level).await?;
    if unlocked > 0 {
        notices.push(Flash::info("New challenges have been unlocked!"));
    }
    Ok((profile, notices))
}

/// Load the board for a prepared profile
///
/// # Errors
///
/// Returns an error if a query fails
pub async fn load_board(db: &Database, profile: UserProfile) -> AppResult<TournamentBoard> {
    let challenges = db.list_user_challenges(profile.id).await?;
    let badges = db.list_earned_badges(profile.id).await?;
    let completed = challenges
        .iter()
        .filter(|c| c.status == ChallengeStatus::Completed)
        .count() as i64;
    let active = challenges
        .iter()
        .filter(|c| c.status == ChallengeStatus::Active)
        .count() as i64;

    Ok(TournamentBoard {
        progress: LevelProgress::compute(profile.level, profile.experience_points),
        rank: Rank::for_level(profile.level),
        badges_earned: badges.len() as i64,
        profile,
        challenges,
        badges,
        completed,
        active,
    })
}

/// Start one of the profile's challenges
///
/// # Errors
///
/// Returns `ResourceNotFound` when the link is not the profile's,
/// `PermissionDenied` when the level is too low and `InvalidState` when the
/// challenge already started or finished
pub async fn start_challenge(db: &Database, profile: &UserProfile, user_challenge_id: i64) -> AppResult<Flash> {
    let link = db
        .get_user_challenge(user_challenge_id, profile.id)
        .await?
        .ok_or_else(|| AppError::not_found("Challenge"))?;

    link.status
        .start(profile.level, link.challenge.level_requirement)?;
    db.start_user_challenge(link.id, Utc::now()).await?;

    info!(user_challenge_id, challenge = %link.challenge.title, "Challenge started");
    Ok(Flash::success(format!(
        "Challenge '{}' started! Good luck!",
        link.challenge.title
    )))
}

/// Complete one of the profile's challenges
///
/// # Errors
///
/// Returns `ResourceNotFound` when the link is not the profile's and
/// `InvalidState` when it is neither unlocked nor active
pub async fn complete_challenge(
    db: &Database,
    profile: &UserProfile,
    user_challenge_id: i64,
) -> AppResult<Vec<Flash>> {
    let link = db
        .get_user_challenge(user_challenge_id, profile.id)
        .await?
        .ok_or_else(|| AppError::not_found("Challenge"))?;

    let record = db.record_completion(&link, profile).await?;
    Ok(completion_notices(&record))
}

/// A user-created challenge owned by `profile`
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown id and `PermissionDenied` carrying
/// `denied` when the challenge is a system challenge or another profile's
pub async fn owned_challenge(
    db: &Database,
    profile: &UserProfile,
    challenge_id: i64,
    denied: &str,
) -> AppResult<Challenge> {
    let challenge = db
        .get_challenge(challenge_id)
        .await?
        .ok_or_else(|| AppError::not_found("Challenge"))?;
    if !challenge.owned_by(profile.id) {
        return Err(AppError::permission_denied(denied));
    }
    Ok(challenge)
}

/// Read the challenge form fields shared by create and edit
///
/// # Errors
///
/// Returns `MissingRequiredField` when a field is empty and `InvalidFormat` when
/// a number does not parse
pub fn challenge_input(form: &FormData) -> AppResult<ChallengeInput> {
    const REQUIRED: &str = "All fields are required to create a challenge.";
    let title = form.required("title", REQUIRED)?;
    let task_details = form.required("task_details", REQUIRED)?;
    let level_requirement = form
        .parse::<i64>("level_requirement", "Level requirement")?
        .ok_or_else(|| AppError::new(ErrorCode::MissingRequiredField, REQUIRED))?;
    let xp_reward = form
        .parse::<i64>("xp_reward", "XP reward")?
        .ok_or_else(|| AppError::new(ErrorCode::MissingRequiredField, REQUIRED))?;

    Ok(ChallengeInput {
        title,
        task_details,
        level_requirement,
        xp_reward,
        time_limit: form.optional("time_limit"),
    })
}

/// Notices describing a completion, in the order they should be shown
#[must_use]
pub fn completion_notices(record: &CompletionRecord) -> Vec<Flash> {
    let outcome = &record.outcome;
    let mut notices = Vec::new();

    if record.user_created {
        notices.push(Flash::success(format!(
            "Custom challenge '{}' completed! You've been promoted to Level {}!",
            record.challenge_title, outcome.level
        )));
    } else {
        notices.push(Flash::success(format!(
            "Challenge '{}' completed! You earned {} XP!",
            record.challenge_title, outcome.xp_earned
        )));
        if outcome.levels_gained() > 0 {
            notices.push(Flash::info(format!(
                "Congratulations! You've reached Level {}!",
                outcome.level
            )));
        }
    }

    if let Some(badge) = &record.badge {
        notices.push(Flash::success(format!("New Badge Unlocked: {}!", badge.name)));
    }

    for milestone in &record.milestones {
        notices.push(Flash::info(format!(
            "A new Milestone Challenge is available: {}!",
            milestone.title
        )));
    }
    notices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::UnlockedMilestone;
    use crate::flash::FlashCategory;
    use calisthenics_core::leveling::CompletionOutcome;
    use calisthenics_core::models::Badge;

    fn record(user_created: bool, previous_level: i64, level: i64) -> CompletionRecord {
        CompletionRecord {
            challenge_title: "Handstand hold".to_owned(),
            user_created,
            outcome: CompletionOutcome {
                previous_level,
                level,
                experience_points: 1200,
                xp_earned: if user_created { 0 } else { 250 },
            },
            badge: None,
            milestones: Vec::new(),
        }
    }

    #[test]
    fn test_system_completion_without_level_up() {
        let notices = completion_notices(&record(false, 1, 1));
        assert_eq!(notices.len(), 1);
        assert_eq!(
            notices[0].message,
            "Challenge 'Handstand hold' completed! You earned 250 XP!"
        );
    }

    #[test]
    fn test_level_up_badge_and_milestone_notices() {
        let mut rec = record(false, 1, 2);
        rec.badge = Some(Badge {
            id: 1,
            name: "Iron Will".to_owned(),
            description: String::new(),
            icon: "fa-shield-alt".to_owned(),
            color: "#c0c0c0".to_owned(),
            challenges_required: 1,
        });
        rec.milestones.push(UnlockedMilestone {
            challenge_id: 9,
            title: "Level 2 Trial".to_owned(),
        });
        let notices = completion_notices(&rec);
        let messages: Vec<&str> = notices.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Challenge 'Handstand hold' completed! You earned 250 XP!",
                "Congratulations! You've reached Level 2!",
                "New Badge Unlocked: Iron Will!",
                "A new Milestone Challenge is available: Level 2 Trial!",
            ]
        );
        assert_eq!(notices[1].category, FlashCategory::Info);
    }

    #[test]
    fn test_challenge_input_requires_every_field() {
        let form = FormData::from(
            [
                ("title", "Pistol squats"),
                ("task_details", "5 per leg"),
                ("level_requirement", "2"),
                ("xp_reward", ""),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect::<std::collections::HashMap<_, _>>(),
        );
        let err = challenge_input(&form).expect_err("xp missing");
        assert_eq!(err.message, "All fields are required to create a challenge.");
    }

    #[test]
    fn test_custom_completion_promotes() {
        let notices = completion_notices(&record(true, 3, 4));
        assert_eq!(notices.len(), 1);
        assert_eq!(
            notices[0].message,
            "Custom challenge 'Handstand hold' completed! You've been promoted to Level 4!"
        );
    }
}
