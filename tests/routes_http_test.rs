// ABOUTME: HTTP integration tests for the page routes through the fully layered router
// ABOUTME: Exercises redirects, flash notices, validation, probes and the health export
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use calisthenics_core::constants::uploads::{GOALS_DIR, MOTIVATION_DIR, SPOOL_DIR};
use calisthenics_core::models::{
    CategoryFilter, ChallengeInput, ChallengeStatus, EventInput, GoalStatus, HealthRecordInput,
    MediaType, NewMotivationItem, PlanItemStatus, SessionStatus,
};
use calisthenics_tracker::flash::FlashCategory;
use calisthenics_tracker::services::calendar;
use chrono::{NaiveDate, NaiveTime};
use common::TestApp;
use helpers::axum_test::AxumTestRequest;

fn files_in(app: &TestApp, dir: &str) -> usize {
    std::fs::read_dir(app.static_dir.path().join(dir))
        .unwrap()
        .count()
}

// ============================================================================
// Probes and pages
// ============================================================================

#[tokio::test]
async fn test_liveness_and_readiness() {
    let app = TestApp::new().await;

    let live = AxumTestRequest::get("/healthz").send(app.router()).await;
    assert_eq!(live.status(), 200);
    let body: serde_json::Value = live.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());

    let ready = AxumTestRequest::get("/readyz").send(app.router()).await;
    assert_eq!(ready.status(), 200);
    let body: serde_json::Value = ready.json();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = TestApp::new().await;
    let response = AxumTestRequest::get("/").send(app.router()).await;
    assert_eq!(response.status(), 200);
    assert!(response.header("x-request-id").is_some());

    let echoed = AxumTestRequest::get("/healthz")
        .header("x-request-id", "abc-123")
        .send(app.router())
        .await;
    assert_eq!(echoed.header("x-request-id"), Some("abc-123"));
}

#[tokio::test]
async fn test_every_page_renders() {
    let app = TestApp::new().await;
    app.profile().await;

    for path in [
        "/",
        "/dashboard",
        "/workouts",
        "/goals",
        "/plan",
        "/schedule",
        "/calendar",
        "/health",
        "/motivation",
        "/videos",
        "/tournament",
    ] {
        let response = AxumTestRequest::get(path).send(app.router()).await;
        assert_eq!(response.status(), 200, "{path}");
        let html = response.text();
        assert!(html.contains("<html"), "{path}");
    }
}

#[tokio::test]
async fn test_unknown_row_is_not_found_page() {
    let app = TestApp::new().await;
    for path in ["/plans/edit/42", "/schedule/edit/42", "/calendar/edit/42", "/health/edit/42"] {
        let response = AxumTestRequest::get(path).send(app.router()).await;
        assert_eq!(response.status(), 404, "{path}");
    }
}

// ============================================================================
// Flash notices
// ============================================================================

#[tokio::test]
async fn test_flash_is_shown_once() {
    let app = TestApp::new().await;

    let added = AxumTestRequest::post("/workouts/add")
        .form(&[
            ("name", "Dips"),
            ("difficulty", "Intermediate"),
            ("sets", "3"),
            ("reps", "10"),
            ("rest", "2m"),
            ("instructions", "Lean forward slightly"),
        ])
        .send(app.router())
        .await
        .assert_redirect("/workouts");
    let cookie = added.flash_cookie().unwrap();

    let page = AxumTestRequest::get("/workouts")
        .flash_cookie(&cookie)
        .send(app.router())
        .await;
    assert_eq!(page.status(), 200);
    let expired = page.header("set-cookie").unwrap().to_owned();
    assert!(expired.contains("Max-Age=0"));
    let html = page.text();
    assert!(html.contains("Workout added successfully!"));
    assert!(html.contains("Dips"));
}

// ============================================================================
// Workouts
// ============================================================================

#[tokio::test]
async fn test_workout_validation() {
    let app = TestApp::new().await;
    let full = [
        ("name", "Pull-ups"),
        ("difficulty", "Intermediate"),
        ("sets", "4"),
        ("reps", "8"),
        ("rest", "3m"),
        ("instructions", "Dead hang to chin over bar"),
    ];

    AxumTestRequest::post("/workouts/add")
        .form(&full)
        .send(app.router())
        .await
        .assert_redirect("/workouts");

    let duplicate = AxumTestRequest::post("/workouts/add")
        .form(&full)
        .send(app.router())
        .await
        .assert_redirect("/workouts");
    let flashes = duplicate.flashes();
    assert_eq!(flashes[0].category, FlashCategory::Danger);
    assert_eq!(flashes[0].message, "Workout \"Pull-ups\" already exists.");

    let missing = AxumTestRequest::post("/workouts/add")
        .form(&[("name", "Squats"), ("difficulty", ""), ("sets", "4")])
        .send(app.router())
        .await;
    assert_eq!(missing.flash_messages(), vec!["All fields are required.".to_owned()]);

    let bad_sets = AxumTestRequest::post("/workouts/add")
        .form(&[
            ("name", "Squats"),
            ("difficulty", "Beginner"),
            ("sets", "many"),
            ("reps", "20"),
            ("rest", "1m"),
            ("instructions", "Sit back"),
        ])
        .send(app.router())
        .await;
    assert_eq!(bad_sets.flashes()[0].category, FlashCategory::Danger);

    assert_eq!(app.database().count_workouts().await.unwrap(), 1);
}

#[tokio::test]
async fn test_workout_delete() {
    let app = TestApp::new().await;
    AxumTestRequest::post("/workouts/add")
        .form(&[
            ("name", "Lunges"),
            ("difficulty", "Intermediate"),
            ("sets", "3"),
            ("reps", "12/Leg"),
            ("rest", "2m"),
            ("instructions", "Step forward"),
        ])
        .send(app.router())
        .await;
    let id = app.database().list_workouts().await.unwrap()[0].id;

    let deleted = AxumTestRequest::post(&format!("/workouts/delete/{id}"))
        .send(app.router())
        .await
        .assert_redirect("/workouts");
    assert_eq!(deleted.flash_messages(), vec!["Workout deleted successfully.".to_owned()]);

    let again = AxumTestRequest::post(&format!("/workouts/delete/{id}"))
        .send(app.router())
        .await;
    assert_eq!(again.status(), 404);
}

// ============================================================================
// Plans, schedule and calendar
// ============================================================================

#[tokio::test]
async fn test_plan_rejects_inverted_dates() {
    let app = TestApp::new().await;

    let response = AxumTestRequest::post("/plans/add")
        .form(&[
            ("title", "Backwards"),
            ("description", "Ends before it starts"),
            ("start_date", "2025-12-10"),
            ("end_date", "2025-12-01"),
        ])
        .send(app.router())
        .await
        .assert_redirect("/plan");
    assert_eq!(
        response.flash_messages(),
        vec!["End date must be on or after the start date.".to_owned()]
    );
    assert!(app.database().list_plans().await.unwrap().is_empty());

    let bad_date = AxumTestRequest::post("/plans/add")
        .form(&[
            ("title", "Typo"),
            ("description", "Bad date"),
            ("start_date", "10/12/2025"),
            ("end_date", "2025-12-20"),
        ])
        .send(app.router())
        .await;
    assert_eq!(
        bad_date.flash_messages(),
        vec!["Invalid date format. Use YYYY-MM-DD.".to_owned()]
    );

    let endless = AxumTestRequest::post("/plans/add")
        .form(&[
            ("title", "Endless"),
            ("description", "Spans millennia"),
            ("start_date", "0001-01-01"),
            ("end_date", "9999-12-31"),
        ])
        .send(app.router())
        .await
        .assert_redirect("/plan");
    assert_eq!(
        endless.flash_messages(),
        vec!["A training plan can span at most 366 days.".to_owned()]
    );
    assert!(app.database().list_plans().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_schedule_add_and_complete() {
    let app = TestApp::new().await;

    AxumTestRequest::post("/schedule/add")
        .form(&[
            ("title", "Core Focus"),
            ("details", "Planks"),
            ("day_of_week", "Wednesday"),
            ("time", "18:45"),
            ("category", "workout"),
        ])
        .send(app.router())
        .await
        .assert_redirect("/schedule");
    let item = app.database().list_schedule_items().await.unwrap().remove(0);

    let completed = AxumTestRequest::post(&format!("/schedule/complete/{}", item.id))
        .send(app.router())
        .await
        .assert_redirect("/schedule");
    assert_eq!(
        completed.flash_messages(),
        vec!["\"Core Focus\" marked as complete!".to_owned()]
    );

    let bad_day = AxumTestRequest::post("/schedule/add")
        .form(&[
            ("title", "Someday"),
            ("day_of_week", "Funday"),
            ("time", "10:00"),
            ("category", "rest"),
        ])
        .send(app.router())
        .await;
    assert_eq!(bad_day.flashes()[0].category, FlashCategory::Danger);
    assert_eq!(app.database().list_schedule_items().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_sticky_note_requires_every_field() {
    let app = TestApp::new().await;
    let response = AxumTestRequest::post("/notes/add")
        .form(&[("title", "Form Check"), ("content", ""), ("color", "yellow")])
        .send(app.router())
        .await
        .assert_redirect("/schedule");
    assert_eq!(
        response.flash_messages(),
        vec!["All note fields are required.".to_owned()]
    );
}

#[tokio::test]
async fn test_calendar_event_lifecycle() {
    let app = TestApp::new().await;
    AxumTestRequest::post("/calendar/add")
        .form(&[
            ("title", "Leg Day"),
            ("category", "workout"),
            ("start_time", "2025-11-10T19:00"),
        ])
        .send(app.router())
        .await
        .assert_redirect("/calendar");
    let event = app.database().list_events().await.unwrap().remove(0);
    assert!(!event.status.is_completed());

    let done = AxumTestRequest::post(&format!("/calendar/complete/{}", event.id))
        .send(app.router())
        .await
        .assert_redirect("/calendar");
    assert_eq!(
        done.flash_messages(),
        vec!["Workout \"Leg Day\" marked as complete!".to_owned()]
    );
    let event = app.database().get_event(event.id).await.unwrap().unwrap();
    assert!(event.status.is_completed());
}

#[tokio::test]
async fn test_upcoming_events_window_excludes_fifth_day() {
    let app = TestApp::new().await;
    let today = NaiveDate::from_ymd_opt(2025, 11, 10).unwrap();
    let at = |d: u32, h: u32, m: u32| {
        NaiveDate::from_ymd_opt(2025, 11, d)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    };
    for (title, start_time) in [
        ("Yesterday", at(9, 23, 59)),
        ("Midnight Today", at(10, 0, 0)),
        ("Last Minute", at(14, 23, 59)),
        ("Fifth Day", at(15, 0, 0)),
    ] {
        app.database()
            .create_event(&EventInput {
                title: title.to_owned(),
                category: "workout".to_owned(),
                start_time,
                status: SessionStatus::Scheduled,
            })
            .await
            .unwrap();
    }

    let overview = calendar::load_overview(app.database(), today).await.unwrap();
    let titles: Vec<_> = overview.upcoming.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Midnight Today", "Last Minute"]);
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_export_is_an_attachment() {
    let app = TestApp::new().await;
    app.database()
        .create_health_record(&HealthRecordInput {
            date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
            weight: 75.2,
            body_fat: None,
            notes: Some("Good \"energy\"".to_owned()),
        })
        .await
        .unwrap();

    let response = AxumTestRequest::get("/health/export").send(app.router()).await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.header("content-type"), Some("text/csv; charset=utf-8"));
    let disposition = response.header("content-disposition").unwrap().to_owned();
    assert!(disposition.starts_with("attachment; filename=health_data_"));
    assert!(disposition.ends_with(".csv"));

    let body = response.text();
    assert!(body.starts_with("CALISTHENICS APP - HEALTH DATA EXPORT"));
    assert!(body.contains("2025-11-01,75.2,N/A,\"Good \"\"energy\"\"\""));
}

#[tokio::test]
async fn test_health_record_requires_weight() {
    let app = TestApp::new().await;
    for weight in ["", "0", "-3.5", "NaN", "inf"] {
        let response = AxumTestRequest::post("/health/add")
            .form(&[("date", "2025-11-01"), ("weight", weight)])
            .send(app.router())
            .await
            .assert_redirect("/health");
        assert_eq!(
            response.flash_messages(),
            vec!["Date and Weight are required fields.".to_owned()],
            "weight {weight:?}"
        );
    }
    assert!(app.database().list_health_records().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_health_plan_toggle_flips_status() {
    let app = TestApp::new().await;
    AxumTestRequest::post("/health-plan/add")
        .form(&[("title", "Track Daily Water Intake"), ("description", "3L")])
        .send(app.router())
        .await
        .assert_redirect("/health");
    let item = app.database().list_health_plan_items().await.unwrap().remove(0);

    let toggled = AxumTestRequest::post(&format!("/health-plan/toggle/{}", item.id))
        .send(app.router())
        .await
        .assert_redirect("/health");
    assert!(toggled.flash_cookie().is_none());
    let item = app
        .database()
        .get_health_plan_item(item.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(item.status, PlanItemStatus::Completed);
}

// ============================================================================
// Goals
// ============================================================================

#[tokio::test]
async fn test_goals_without_profile_go_home() {
    let app = TestApp::new().await;
    AxumTestRequest::get("/goals")
        .send(app.router())
        .await
        .assert_redirect("/");
}

#[tokio::test]
async fn test_goal_progress_completes_goal() {
    let app = TestApp::new().await;
    let profile = app.profile().await;

    let created = AxumTestRequest::post("/goals/add")
        .multipart(
            &[("title", "10 Pull-ups"), ("target_date", "2025-12-31")],
            &[("media_files[]", "before.jpg", b"jpeg bytes")],
        )
        .send(app.router())
        .await
        .assert_redirect("/goals");
    assert_eq!(
        created.flash_messages(),
        vec!["New goal created successfully!".to_owned()]
    );

    let goal = app.database().list_goals(profile.id).await.unwrap().remove(0);
    assert_eq!(app.database().list_goal_media(goal.id).await.unwrap().len(), 1);

    let missing = AxumTestRequest::post(&format!("/goals/progress/{}", goal.id))
        .form(&[("current_progress", "")])
        .send(app.router())
        .await;
    assert_eq!(
        missing.flash_messages(),
        vec!["Progress value is required.".to_owned()]
    );

    AxumTestRequest::post(&format!("/goals/progress/{}", goal.id))
        .form(&[("current_progress", &goal.target_progress.to_string())])
        .send(app.router())
        .await
        .assert_redirect("/goals");
    let goal = app.database().get_goal(goal.id).await.unwrap().unwrap();
    assert_eq!(goal.status, GoalStatus::Completed);
    assert!(goal.completed_date.is_some());
}

#[tokio::test]
async fn test_goal_media_types_and_delete_removes_files() {
    let app = TestApp::new().await;
    let profile = app.profile().await;

    AxumTestRequest::post("/goals/add")
        .multipart(
            &[("title", "Planche"), ("target_date", "2026-06-01")],
            &[
                ("media_files[]", "lean.png", b"png bytes"),
                ("media_files[]", "attempt.mp4", b"mp4 bytes"),
            ],
        )
        .send(app.router())
        .await
        .assert_redirect("/goals");

    let goal = app.database().list_goals(profile.id).await.unwrap().remove(0);
    let media = app.database().list_goal_media(goal.id).await.unwrap();
    assert_eq!(media.len(), 2);
    let type_of = |suffix: &str| {
        media
            .iter()
            .find(|m| m.file_path.ends_with(suffix))
            .unwrap()
            .media_type
    };
    assert_eq!(type_of("_lean.png"), MediaType::Image);
    assert_eq!(type_of("_attempt.mp4"), MediaType::Video);
    for item in &media {
        assert!(item.file_path.starts_with(GOALS_DIR));
        assert!(app.static_dir.path().join(&item.file_path).exists());
    }
    assert_eq!(files_in(&app, SPOOL_DIR), 0);

    AxumTestRequest::post(&format!("/goals/delete/{}", goal.id))
        .send(app.router())
        .await
        .assert_redirect("/goals");
    for item in &media {
        assert!(!app.static_dir.path().join(&item.file_path).exists());
    }
    assert_eq!(files_in(&app, GOALS_DIR), 0);
    assert!(app.database().get_goal(goal.id).await.unwrap().is_none());
}

// ============================================================================
// Motivation
// ============================================================================

#[tokio::test]
async fn test_favorite_returns_to_referring_page() {
    let app = TestApp::new().await;
    let profile = app.profile().await;
    let id = app
        .database()
        .create_motivation_item(&NewMotivationItem {
            title: "Atomic Habits".to_owned(),
            description: None,
            category: "book".to_owned(),
            author: Some("James Clear".to_owned()),
            source_url: None,
            cover_image_path: None,
            user_id: profile.id,
        })
        .await
        .unwrap();

    AxumTestRequest::post(&format!("/motivation/toggle_favorite/{id}"))
        .header("referer", "http://localhost:5000/motivation?category=book")
        .send(app.router())
        .await
        .assert_redirect("/motivation?category=book");

    AxumTestRequest::post(&format!("/motivation/toggle_favorite/{id}"))
        .header("referer", "https://elsewhere.example//phish")
        .send(app.router())
        .await
        .assert_redirect("/motivation");

    let items = app
        .database()
        .list_motivation_items(profile.id, &CategoryFilter::All)
        .await
        .unwrap();
    assert!(!items[0].is_favorite);
}

#[tokio::test]
async fn test_motivation_cover_saved_and_removed() {
    let app = TestApp::new().await;
    let profile = app.profile().await;

    AxumTestRequest::post("/motivation/add")
        .multipart(
            &[("title", "Rocky IV"), ("category", "movie")],
            &[("cover_image", "poster.jpg", b"jpeg bytes")],
        )
        .send(app.router())
        .await
        .assert_redirect("/motivation");

    let item = app
        .database()
        .list_motivation_items(profile.id, &CategoryFilter::All)
        .await
        .unwrap()
        .remove(0);
    let cover = item.cover_image_path.clone().unwrap();
    assert!(cover.starts_with(MOTIVATION_DIR));
    assert!(cover.ends_with("_poster.jpg"));
    assert!(app.static_dir.path().join(&cover).exists());

    AxumTestRequest::post(&format!("/motivation/delete/{}", item.id))
        .send(app.router())
        .await
        .assert_redirect("/motivation");
    assert!(!app.static_dir.path().join(&cover).exists());
    assert_eq!(files_in(&app, MOTIVATION_DIR), 0);
}

#[tokio::test]
async fn test_motivation_rejects_script_links() {
    let app = TestApp::new().await;
    let profile = app.profile().await;

    let rejected = AxumTestRequest::post("/motivation/add")
        .multipart(
            &[
                ("title", "Sneaky"),
                ("category", "quote"),
                ("source_url", "javascript:alert(document.cookie)"),
            ],
            &[],
        )
        .send(app.router())
        .await
        .assert_redirect("/motivation");
    assert_eq!(
        rejected.flash_messages(),
        vec!["Source URL must start with http:// or https://.".to_owned()]
    );
    assert_eq!(
        app.database()
            .list_motivation_items(profile.id, &CategoryFilter::All)
            .await
            .unwrap()
            .len(),
        0
    );

    // Rows written before validation existed still render without the link
    app.database()
        .create_motivation_item(&NewMotivationItem {
            title: "Legacy".to_owned(),
            description: None,
            category: "quote".to_owned(),
            author: None,
            source_url: Some("javascript:alert(1)".to_owned()),
            cover_image_path: None,
            user_id: profile.id,
        })
        .await
        .unwrap();
    let page = AxumTestRequest::get("/motivation").send(app.router()).await;
    assert_eq!(page.status(), 200);
    let body = page.text();
    assert!(body.contains("Legacy"));
    assert!(!body.contains("javascript:"));
}

// ============================================================================
// Tournament
// ============================================================================

#[tokio::test]
async fn test_custom_challenge_over_http() {
    let app = TestApp::new().await;

    let board = AxumTestRequest::get("/tournament").send(app.router()).await;
    assert_eq!(board.status(), 200);
    let profile = app.database().get_profile().await.unwrap().unwrap();

    AxumTestRequest::post("/challenges/create")
        .form(&[
            ("title", "Morning Plank"),
            ("task_details", "Hold a 3-minute plank"),
            ("level_requirement", "1"),
            ("xp_reward", "50"),
        ])
        .send(app.router())
        .await
        .assert_redirect("/tournament");
    let link = app
        .database()
        .list_user_challenges(profile.id)
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.challenge.title == "Morning Plank")
        .unwrap();
    assert_eq!(link.status, ChallengeStatus::Unlocked);

    let completed = AxumTestRequest::post(&format!("/challenges/complete/{}", link.id))
        .send(app.router())
        .await
        .assert_redirect("/tournament");
    assert_eq!(
        completed.flash_messages()[0],
        "Custom challenge 'Morning Plank' completed! You've been promoted to Level 2!"
    );

    let again = AxumTestRequest::post(&format!("/challenges/complete/{}", link.id))
        .send(app.router())
        .await
        .assert_redirect("/tournament");
    let flashes = again.flashes();
    assert_eq!(flashes[0].category, FlashCategory::Warning);
    assert_eq!(flashes[0].message, "This challenge is not currently active.");
}

#[tokio::test]
async fn test_system_challenges_cannot_be_edited() {
    let app = TestApp::new().await;
    AxumTestRequest::get("/tournament").send(app.router()).await;
    let input = ChallengeInput {
        title: "System".to_owned(),
        task_details: "Fixed".to_owned(),
        level_requirement: 1,
        xp_reward: 10,
        time_limit: None,
    };
    let id = app
        .database()
        .create_system_challenge(&input, false, None)
        .await
        .unwrap();

    let response = AxumTestRequest::post(&format!("/challenges/delete/{id}"))
        .send(app.router())
        .await
        .assert_redirect("/tournament");
    assert_eq!(
        response.flash_messages(),
        vec!["You do not have permission to delete this challenge.".to_owned()]
    );
    assert!(app.database().get_challenge(id).await.unwrap().is_some());
}
