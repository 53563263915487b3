// ABOUTME: Integration tests for the SQLite persistence layer
// ABOUTME: Covers migrations, per-domain CRUD, ordering and transactional goal media
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use calisthenics_core::models::{
    CategoryFilter, EventInput, GalleryRole, GoalStatus, HealthRecordInput, MediaType, NewGoal,
    NewGoalMedia, NewMotivationItem, NewVideo, NewWorkout, PlanInput, PlanItemStatus, PlanStatus,
    ProfileUpdate, ScheduleItemInput, SessionStatus,
};
use chrono::{NaiveDate, NaiveTime, Weekday};
use common::{create_test_database, create_test_database_with_profile};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn push_ups() -> NewWorkout {
    NewWorkout {
        name: "Push-ups".to_owned(),
        difficulty: "Beginner".to_owned(),
        sets: 3,
        reps: "15".to_owned(),
        rest: "2m".to_owned(),
        instructions: "Keep a straight line".to_owned(),
    }
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let db = create_test_database().await;
    db.migrate().await.unwrap();
    db.migrate().await.unwrap();
    db.ping().await.unwrap();
}

#[tokio::test]
async fn test_workout_crud() {
    let db = create_test_database().await;

    let id = db.create_workout(&push_ups()).await.unwrap();
    assert!(db.workout_name_exists("Push-ups").await.unwrap());
    assert!(!db.workout_name_exists("Pull-ups").await.unwrap());
    assert_eq!(db.count_workouts().await.unwrap(), 1);

    let workouts = db.list_workouts().await.unwrap();
    assert_eq!(workouts.len(), 1);
    assert_eq!(workouts[0].name, "Push-ups");
    assert_eq!(workouts[0].sets, 3);

    assert!(db.delete_workout(id).await.unwrap());
    assert!(!db.delete_workout(id).await.unwrap());
    assert!(db.list_workouts().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_workout_names_are_unique() {
    let db = create_test_database().await;
    db.create_workout(&push_ups()).await.unwrap();
    assert!(db.create_workout(&push_ups()).await.is_err());
}

#[tokio::test]
async fn test_profile_is_created_once() {
    let db = create_test_database().await;
    assert!(db.get_profile().await.unwrap().is_none());

    let (first, created) = db.get_or_create_profile().await.unwrap();
    assert!(created);
    assert_eq!(first.level, 1);
    assert_eq!(first.experience_points, 0);

    let (second, created) = db.get_or_create_profile().await.unwrap();
    assert!(!created);
    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn test_upsert_profile_keeps_progress() {
    let db = create_test_database().await;
    let updated = db
        .upsert_profile(&ProfileUpdate {
            height: Some(183.0),
            age: Some(28),
            gender: Some("Male".to_owned()),
        })
        .await
        .unwrap();
    assert_eq!(updated.height, Some(183.0));
    assert_eq!(updated.level, 1);

    let again = db
        .upsert_profile(&ProfileUpdate {
            height: None,
            age: Some(29),
            gender: None,
        })
        .await
        .unwrap();
    assert_eq!(again.id, updated.id);
    assert_eq!(again.age, Some(29));
}

#[tokio::test]
async fn test_health_records_ordering() {
    let db = create_test_database().await;
    for (date, weight) in [(day(2025, 9, 1), 77.0), (day(2025, 11, 1), 75.2), (day(2025, 10, 1), 76.1)] {
        db.create_health_record(&HealthRecordInput {
            date,
            weight,
            body_fat: None,
            notes: None,
        })
        .await
        .unwrap();
    }

    let newest_first: Vec<_> = db
        .list_health_records()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.date)
        .collect();
    assert_eq!(newest_first, vec![day(2025, 11, 1), day(2025, 10, 1), day(2025, 9, 1)]);

    let since: Vec<_> = db
        .list_health_records_since(day(2025, 10, 1))
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.date)
        .collect();
    assert_eq!(since, vec![day(2025, 10, 1), day(2025, 11, 1)]);
}

#[tokio::test]
async fn test_health_plan_item_status() {
    let db = create_test_database().await;
    let id = db
        .create_health_plan_item("Weekly Weight Check", Some("Every Monday"))
        .await
        .unwrap();
    let item = db.get_health_plan_item(id).await.unwrap().unwrap();
    assert_eq!(item.status, PlanItemStatus::Pending);

    db.set_health_plan_item_status(id, PlanItemStatus::Completed)
        .await
        .unwrap();
    let item = db.get_health_plan_item(id).await.unwrap().unwrap();
    assert_eq!(item.status, PlanItemStatus::Completed);
}

#[tokio::test]
async fn test_plan_round_trip_and_update() {
    let db = create_test_database().await;
    let input = PlanInput::new(
        "Upper Body Strength".to_owned(),
        "Push and pull".to_owned(),
        day(2025, 11, 1),
        day(2025, 11, 30),
    )
    .unwrap();
    let id = db.create_plan(&input, PlanStatus::Upcoming).await.unwrap();

    let plan = db.get_plan(id).await.unwrap().unwrap();
    assert_eq!(plan.status, PlanStatus::Upcoming);
    assert_eq!(plan.end_date, day(2025, 11, 30));

    assert!(db.update_plan(id, &input, PlanStatus::Completed).await.unwrap());
    assert_eq!(
        db.get_plan(id).await.unwrap().unwrap().status,
        PlanStatus::Completed
    );
    assert!(db.delete_plan(id).await.unwrap());
    assert!(db.get_plan(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_schedule_item_completion() {
    let db = create_test_database().await;
    let id = db
        .create_schedule_item(&ScheduleItemInput {
            title: "Core Focus".to_owned(),
            details: Some("Planks".to_owned()),
            day_of_week: Weekday::Wed,
            time: NaiveTime::from_hms_opt(18, 45, 0).unwrap(),
            category: "workout".to_owned(),
        })
        .await
        .unwrap();

    let item = db.get_schedule_item(id).await.unwrap().unwrap();
    assert_eq!(item.day_of_week, Weekday::Wed);
    assert_eq!(item.status, SessionStatus::Scheduled);

    db.set_schedule_item_status(id, SessionStatus::Completed)
        .await
        .unwrap();
    assert!(db.get_schedule_item(id).await.unwrap().unwrap().status.is_completed());
}

#[tokio::test]
async fn test_events_between_filters_status() {
    let db = create_test_database().await;
    let at = |d: u32| day(2025, 11, d).and_hms_opt(19, 0, 0).unwrap();
    let input = |title: &str, d: u32| EventInput {
        title: title.to_owned(),
        category: "workout".to_owned(),
        start_time: at(d),
        status: SessionStatus::Scheduled,
    };
    let leg_day = db.create_event(&input("Leg Day", 10)).await.unwrap();
    db.create_event(&input("Core", 12)).await.unwrap();
    db.create_event(&input("December", 30)).await.unwrap();
    db.set_event_status(leg_day, SessionStatus::Completed)
        .await
        .unwrap();

    let november = db.list_events_between(at(1), at(20), None).await.unwrap();
    assert_eq!(november.len(), 2);
    let completed = db
        .list_events_between(at(1), at(20), Some(SessionStatus::Completed))
        .await
        .unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].title, "Leg Day");
    assert!(db.event_exists("Leg Day", at(10)).await.unwrap());
}

#[tokio::test]
async fn test_motivation_favorites_sort_first() {
    let (db, profile) = create_test_database_with_profile().await;
    let item = |title: &str, category: &str| NewMotivationItem {
        title: title.to_owned(),
        description: None,
        category: category.to_owned(),
        author: None,
        source_url: None,
        cover_image_path: None,
        user_id: profile.id,
    };
    let first = db.create_motivation_item(&item("Atomic Habits", "book")).await.unwrap();
    db.create_motivation_item(&item("Rocky IV", "movie")).await.unwrap();

    assert!(db.toggle_motivation_favorite(first).await.unwrap());
    let all = db
        .list_motivation_items(profile.id, &CategoryFilter::All)
        .await
        .unwrap();
    assert_eq!(all[0].title, "Atomic Habits");
    assert!(all[0].is_favorite);

    let movies = db
        .list_motivation_items(profile.id, &CategoryFilter::from_query(Some("movie")))
        .await
        .unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(
        db.motivation_categories(profile.id).await.unwrap(),
        vec!["book".to_owned(), "movie".to_owned()]
    );

    assert!(!db.toggle_motivation_favorite(first).await.unwrap());
}

#[tokio::test]
async fn test_video_views_and_likes() {
    let (db, profile) = create_test_database_with_profile().await;
    let id = db
        .create_video(&NewVideo {
            title: "Pull-up Progression".to_owned(),
            description: None,
            category: "tutorial".to_owned(),
            file_path: "uploads/videos/pull.mp4".to_owned(),
            thumbnail_path: None,
            duration: Some("18:21".to_owned()),
            size_mb: Some(12.5),
            user_id: profile.id,
        })
        .await
        .unwrap();

    assert!(db.record_video_view(id).await.unwrap());
    assert!(db.record_video_view(id).await.unwrap());
    assert_eq!(db.like_video(id).await.unwrap(), 1);
    assert_eq!(db.like_video(id).await.unwrap(), 2);

    let video = db.get_video(id).await.unwrap().unwrap();
    assert_eq!(video.views, 2);
    assert_eq!(video.likes, 2);
    assert!(db.video_exists("Pull-up Progression").await.unwrap());
    assert_eq!(db.count_videos(profile.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_goal_media_gallery_roles_are_exclusive() {
    let (db, profile) = create_test_database_with_profile().await;
    let goal = NewGoal {
        title: "10 Pull-ups".to_owned(),
        description: None,
        target_date: day(2025, 12, 31),
        notes: None,
        user_id: profile.id,
    };
    let media = [
        NewGoalMedia {
            file_path: "uploads/goals/a.jpg".to_owned(),
            media_type: MediaType::Image,
        },
        NewGoalMedia {
            file_path: "uploads/goals/b.jpg".to_owned(),
            media_type: MediaType::Image,
        },
    ];
    let goal_id = db.create_goal_with_media(&goal, &media).await.unwrap();

    let stored = db.get_goal(goal_id).await.unwrap().unwrap();
    assert_eq!(stored.status, GoalStatus::Pending);
    let items = db.list_goal_media(goal_id).await.unwrap();
    assert_eq!(items.len(), 2);

    db.set_gallery_role(items[0].id, profile.id, GalleryRole::Before)
        .await
        .unwrap();
    db.set_gallery_role(items[1].id, profile.id, GalleryRole::Before)
        .await
        .unwrap();

    let before = db
        .gallery_photo(profile.id, GalleryRole::Before)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(before.id, items[1].id);
    assert!(db
        .gallery_photo(profile.id, GalleryRole::After)
        .await
        .unwrap()
        .is_none());

    assert!(db.delete_goal(goal_id).await.unwrap());
    assert!(db.list_goal_media(goal_id).await.unwrap().is_empty());
}
