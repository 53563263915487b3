// ABOUTME: Integration tests for the tournament: unlocking, starting and completing challenges
// ABOUTME: Checks XP, level-ups, milestone badges and milestone unlocks end to end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use calisthenics_core::errors::ErrorCode;
use calisthenics_core::models::{ChallengeInput, ChallengeStatus, NewBadge};
use calisthenics_tracker::database::Database;
use calisthenics_tracker::flash::FlashCategory;
use calisthenics_tracker::services::tournament;
use common::create_test_database;

fn challenge(title: &str, level: i64, xp: i64) -> ChallengeInput {
    ChallengeInput {
        title: title.to_owned(),
        task_details: format!("{title} task"),
        level_requirement: level,
        xp_reward: xp,
        time_limit: None,
    }
}

async fn link_id(db: &Database, user_id: i64, title: &str) -> i64 {
    db.list_user_challenges(user_id)
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.challenge.title == title)
        .unwrap()
        .id
}

#[tokio::test]
async fn test_prepare_profile_creates_and_unlocks() {
    let db = create_test_database().await;
    let warmup = db
        .create_system_challenge(&challenge("Warm-up", 1, 100), false, None)
        .await
        .unwrap();
    let distant = db
        .create_system_challenge(&challenge("Distant", 25, 1000), true, None)
        .await
        .unwrap();

    let (profile, notices) = tournament::prepare_profile(&db).await.unwrap();
    assert!(notices
        .iter()
        .any(|n| n.message == "Welcome! Your user profile has been created."));

    for id in [warmup, distant] {
        db.ensure_challenge_link(profile.id, id, ChallengeStatus::Locked)
            .await
            .unwrap();
    }
    let (_, notices) = tournament::prepare_profile(&db).await.unwrap();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, "New challenges have been unlocked!");

    let board = tournament::load_board(&db, profile).await.unwrap();
    let status_of = |title: &str| {
        board
            .challenges
            .iter()
            .find(|c| c.challenge.title == title)
            .unwrap()
            .status
    };
    assert_eq!(status_of("Warm-up"), ChallengeStatus::Unlocked);
    assert_eq!(status_of("Distant"), ChallengeStatus::Locked);
}

#[tokio::test]
async fn test_start_requires_level() {
    let db = create_test_database().await;
    let (profile, _) = db.get_or_create_profile().await.unwrap();
    let id = db
        .create_system_challenge(&challenge("Front Lever", 10, 500), false, None)
        .await
        .unwrap();
    db.ensure_challenge_link(profile.id, id, ChallengeStatus::Locked)
        .await
        .unwrap();
    let link = link_id(&db, profile.id, "Front Lever").await;

    let denied = tournament::start_challenge(&db, &profile, link).await.unwrap_err();
    assert_eq!(denied.code, ErrorCode::PermissionDenied);

    let unknown = tournament::start_challenge(&db, &profile, 9999).await.unwrap_err();
    assert_eq!(unknown.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_complete_awards_xp_and_levels_up() {
    let db = create_test_database().await;
    let (profile, _) = db.get_or_create_profile().await.unwrap();
    let id = db
        .create_system_challenge(&challenge("Pull-up Ladder", 1, 1200), false, None)
        .await
        .unwrap();
    db.ensure_challenge_link(profile.id, id, ChallengeStatus::Unlocked)
        .await
        .unwrap();
    let link = link_id(&db, profile.id, "Pull-up Ladder").await;

    let started = tournament::start_challenge(&db, &profile, link).await.unwrap();
    assert_eq!(started.message, "Challenge 'Pull-up Ladder' started! Good luck!");

    let again = tournament::start_challenge(&db, &profile, link).await.unwrap_err();
    assert_eq!(again.code, ErrorCode::InvalidState);

    let notices = tournament::complete_challenge(&db, &profile, link).await.unwrap();
    assert_eq!(notices[0].message, "Challenge 'Pull-up Ladder' completed! You earned 1200 XP!");
    assert_eq!(notices[1].category, FlashCategory::Info);
    assert_eq!(notices[1].message, "Congratulations! You've reached Level 2!");

    let profile = db.get_profile().await.unwrap().unwrap();
    assert_eq!(profile.level, 2);
    assert_eq!(profile.experience_points, 1200);

    let twice = tournament::complete_challenge(&db, &profile, link).await.unwrap_err();
    assert_eq!(twice.code, ErrorCode::InvalidState);
}

#[tokio::test]
async fn test_custom_challenge_promotes_one_level() {
    let db = create_test_database().await;
    let (profile, _) = db.get_or_create_profile().await.unwrap();
    db.create_user_challenge(profile.id, &challenge("My Plank", 1, 50))
        .await
        .unwrap();
    let link = link_id(&db, profile.id, "My Plank").await;

    let notices = tournament::complete_challenge(&db, &profile, link).await.unwrap();
    assert_eq!(
        notices[0].message,
        "Custom challenge 'My Plank' completed! You've been promoted to Level 2!"
    );

    let profile = db.get_profile().await.unwrap().unwrap();
    assert_eq!(profile.level, 2);
    assert_eq!(profile.experience_points, 0);
}

#[tokio::test]
async fn test_milestone_awards_badge_and_unlocks_next() {
    let db = create_test_database().await;
    let (profile, _) = db.get_or_create_profile().await.unwrap();

    let badge = db
        .create_badge(&NewBadge {
            name: "Bronze Challenge".to_owned(),
            description: "Awarded for completing the Level 1 challenge.".to_owned(),
            icon: "fa-award".to_owned(),
            color: "#cd7f32".to_owned(),
            challenges_required: 1,
        })
        .await
        .unwrap();
    let trial = db
        .create_system_challenge(&challenge("The Bronze Trial", 1, 1100), true, Some(badge))
        .await
        .unwrap();
    let next = db
        .create_system_challenge(&challenge("The Silver Gauntlet", 2, 2000), true, None)
        .await
        .unwrap();
    db.ensure_challenge_link(profile.id, trial, ChallengeStatus::Unlocked)
        .await
        .unwrap();
    // Seeded links start locked and must be unlocked in place
    db.ensure_challenge_link(profile.id, next, ChallengeStatus::Locked)
        .await
        .unwrap();

    let link = link_id(&db, profile.id, "The Bronze Trial").await;
    let notices = tournament::complete_challenge(&db, &profile, link).await.unwrap();
    let messages: Vec<_> = notices.iter().map(|n| n.message.as_str()).collect();
    assert!(messages.contains(&"New Badge Unlocked: Bronze Challenge!"));

    let badges = db.list_earned_badges(profile.id).await.unwrap();
    assert_eq!(badges.len(), 1);
    assert_eq!(badges[0].badge.name, "Bronze Challenge");
    assert_eq!(db.count_earned_badges(profile.id).await.unwrap(), 1);

    let gauntlet = db
        .list_user_challenges(profile.id)
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.challenge_id == next)
        .unwrap();
    assert_eq!(gauntlet.status, ChallengeStatus::Unlocked);
    assert_eq!(
        db.count_user_challenges(profile.id, ChallengeStatus::Completed)
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn test_owned_challenge_rejects_system_challenges() {
    let db = create_test_database().await;
    let (profile, _) = db.get_or_create_profile().await.unwrap();
    let system = db
        .create_system_challenge(&challenge("System", 1, 50), false, None)
        .await
        .unwrap();
    let denied = tournament::owned_challenge(&db, &profile, system, "no")
        .await
        .unwrap_err();
    assert_eq!(denied.code, ErrorCode::PermissionDenied);
    assert_eq!(denied.message, "no");
}

#[tokio::test]
async fn test_stale_link_cannot_be_completed_twice() {
    let db = create_test_database().await;
    let (profile, _) = db.get_or_create_profile().await.unwrap();
    let id = db
        .create_system_challenge(&challenge("Dips", 1, 60), false, None)
        .await
        .unwrap();
    db.ensure_challenge_link(profile.id, id, ChallengeStatus::Unlocked)
        .await
        .unwrap();
    let link_id = link_id(&db, profile.id, "Dips").await;
    let stale = db
        .get_user_challenge(link_id, profile.id)
        .await
        .unwrap()
        .unwrap();

    tournament::complete_challenge(&db, &profile, link_id)
        .await
        .unwrap();
    let again = db.record_completion(&stale, &profile).await.unwrap_err();
    assert_eq!(again.code, ErrorCode::InvalidState);

    let profile = db.get_profile().await.unwrap().unwrap();
    assert_eq!(profile.experience_points, 60);
}

#[tokio::test]
async fn test_concurrent_completions_pay_out_once() {
    common::init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("race.db").display());
    let db = Database::new(&url).await.unwrap();
    let (profile, _) = db.get_or_create_profile().await.unwrap();
    let id = db
        .create_system_challenge(&challenge("Handstand Hold", 1, 60), false, None)
        .await
        .unwrap();
    db.ensure_challenge_link(profile.id, id, ChallengeStatus::Active)
        .await
        .unwrap();
    let link = link_id(&db, profile.id, "Handstand Hold").await;

    let (first, second) = tokio::join!(
        tournament::complete_challenge(&db, &profile, link),
        tournament::complete_challenge(&db, &profile, link)
    );
    let succeeded = [first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(succeeded, 1);
    let failure = first.err().or(second.err()).unwrap();
    assert_eq!(failure.code, ErrorCode::InvalidState);

    let profile = db.get_profile().await.unwrap().unwrap();
    assert_eq!(profile.experience_points, 60);
}
