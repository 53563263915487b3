// ABOUTME: Demo data seeder for the calisthenics tracker
// ABOUTME: Fills every section with sample rows, skipping anything already present
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

//! Demo data seeder for the calisthenics tracker.
//!
//! Running it twice leaves the database unchanged the second time: each
//! section checks for its own rows before inserting.
//!
//! Usage:
//! ```bash
//! # Seed every section
//! cargo run --bin seed-demo-data
//!
//! # Seed only the tournament badges and challenges
//! cargo run --bin seed-demo-data -- --only tournament
//!
//! # Seed a specific database with debug output
//! cargo run --bin seed-demo-data -- --database-url sqlite:./demo.db -v
//! ```

use anyhow::{Context, Result};
use calisthenics_core::models::{
    ChallengeInput, ChallengeStatus, EventInput, HealthRecordInput, NewBadge, NewMotivationItem,
    NewVideo, NewWorkout, PlanInput, PlanItemStatus, PlanStatus, ProfileUpdate, ScheduleItemInput,
    SessionStatus, StickyNoteInput,
};
use calisthenics_tracker::config::DatabaseUrl;
use calisthenics_tracker::database::Database;
use calisthenics_tracker::logging::LoggingConfig;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use clap::{Parser, ValueEnum};
use std::env;
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    name = "seed-demo-data",
    about = "Calisthenics Tracker Demo Data Seeder",
    long_about = "Populate the database with sample workouts, plans, health data, media and tournament challenges"
)]
struct SeedArgs {
    /// Seed a single section instead of all of them
    #[arg(long, value_enum)]
    only: Option<Section>,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Section {
    Workouts,
    Calendar,
    Health,
    Schedule,
    Plans,
    Motivation,
    Videos,
    Tournament,
}

impl Section {
    const ALL: [Self; 8] = [
        Self::Workouts,
        Self::Calendar,
        Self::Health,
        Self::Schedule,
        Self::Plans,
        Self::Motivation,
        Self::Videos,
        Self::Tournament,
    ];
}

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .with_context(|| format!("invalid date {year}-{month}-{day}"))
}

fn time(hour: u32, minute: u32) -> Result<NaiveTime> {
    NaiveTime::from_hms_opt(hour, minute, 0).with_context(|| format!("invalid time {hour}:{minute}"))
}

fn datetime(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Result<NaiveDateTime> {
    Ok(date(year, month, day)?.and_time(time(hour, minute)?))
}

// ============================================================================
// Workouts
// ============================================================================

const WORKOUTS: [(&str, &str, i64, &str, &str, &str); 6] = [
    (
        "Push-ups",
        "Beginner",
        3,
        "15",
        "2m",
        "- Start in plank position with hands shoulder-width apart\n\
         - Keep your body in a straight line from head to heels\n\
         - Lower your body until your chest nearly touches the floor\n\
         - Push back up to starting position\n\
         - Keep elbows at 45-degree angle to body",
    ),
    (
        "Pull-ups",
        "Intermediate",
        4,
        "8",
        "3m",
        "- Hang from the bar with an overhand grip\n\
         - Pull until your chin clears the bar\n\
         - Lower under control to a dead hang",
    ),
    (
        "Muscle-ups",
        "Advanced",
        3,
        "5",
        "4m",
        "- Start with an explosive pull-up\n\
         - Drive the chest over the bar and turn the wrists\n\
         - Press out to a straight-arm support",
    ),
    (
        "Handstand Push-ups",
        "Advanced",
        3,
        "6",
        "3m",
        "- Kick up to a handstand against the wall\n\
         - Lower until the head lightly touches the floor\n\
         - Press back to locked arms",
    ),
    (
        "Squats",
        "Beginner",
        4,
        "20",
        "1.5m",
        "- Stand with feet shoulder-width apart\n\
         - Sit back until thighs are parallel to the floor\n\
         - Drive up through the heels",
    ),
    (
        "Lunges",
        "Intermediate",
        3,
        "12/Leg",
        "2m",
        "- Step forward and lower the back knee toward the floor\n\
         - Keep the front knee over the ankle\n\
         - Push back to standing and switch legs",
    ),
];

async fn seed_workouts(database: &Database) -> Result<usize> {
    let mut created = 0;
    for (name, difficulty, sets, reps, rest, instructions) in WORKOUTS {
        if database.workout_name_exists(name).await? {
            debug!(name, "Workout already present");
            continue;
        }
        database
            .create_workout(&NewWorkout {
                name: name.to_owned(),
                difficulty: difficulty.to_owned(),
                sets,
                reps: reps.to_owned(),
                rest: rest.to_owned(),
                instructions: instructions.to_owned(),
            })
            .await?;
        created += 1;
    }
    Ok(created)
}

// ============================================================================
// Calendar
// ============================================================================

async fn seed_calendar(database: &Database) -> Result<usize> {
    let events = [
        ("Upper Body Blast", "workout", datetime(2025, 11, 8, 19, 0)?),
        ("Active Rest Day", "rest", datetime(2025, 11, 9, 0, 0)?),
        ("Leg Day", "workout", datetime(2025, 11, 10, 19, 0)?),
        ("Core & Mobility", "workout", datetime(2025, 11, 12, 19, 0)?),
    ];

    let mut created = 0;
    for (title, category, start_time) in events {
        if database.event_exists(title, start_time).await? {
            continue;
        }
        database
            .create_event(&EventInput {
                title: title.to_owned(),
                category: category.to_owned(),
                start_time,
                status: SessionStatus::Scheduled,
            })
            .await?;
        created += 1;
    }
    Ok(created)
}

// ============================================================================
// Health
// ============================================================================

async fn seed_health(database: &Database) -> Result<usize> {
    let mut created = 0;

    let (profile, _) = database.get_or_create_profile().await?;
    if profile.height.is_none() && profile.age.is_none() && profile.gender.is_none() {
        database
            .upsert_profile(&ProfileUpdate {
                height: Some(183.0),
                age: Some(28),
                gender: Some("Male".to_owned()),
            })
            .await?;
        created += 1;
    }

    if database.list_health_records().await?.is_empty() {
        let records = [
            (date(2025, 11, 1)?, 75.2, 14.2, "Good energy, completed full workout"),
            (date(2025, 10, 15)?, 75.8, 14.5, "Slightly tired, reduced intensity"),
            (date(2025, 10, 1)?, 76.1, 14.8, "Excellent performance, PR on pull-ups"),
            (date(2025, 9, 15)?, 76.5, 15.1, "Recovery day, light mobility work"),
            (date(2025, 9, 1)?, 77.0, 15.5, "Started new program, feeling good"),
            (date(2025, 8, 15)?, 77.5, 15.8, "Feeling strong"),
        ];
        for (day, weight, body_fat, notes) in records {
            database
                .create_health_record(&HealthRecordInput {
                    date: day,
                    weight,
                    body_fat: Some(body_fat),
                    notes: Some(notes.to_owned()),
                })
                .await?;
            created += 1;
        }
    }

    if database.list_health_plan_items().await?.is_empty() {
        let items = [
            ("Weekly Weight Check", "Measure weight every Monday morning", PlanItemStatus::Pending),
            ("Body Fat Measurement", "Measure body fat percentage monthly", PlanItemStatus::Pending),
            (
                "Update Health Profile",
                "Review and update basic health information",
                PlanItemStatus::Completed,
            ),
            ("Track Daily Water Intake", "Maintain 3L water intake daily", PlanItemStatus::Pending),
        ];
        for (title, description, status) in items {
            let id = database.create_health_plan_item(title, Some(description)).await?;
            if status != PlanItemStatus::Pending {
                database.set_health_plan_item_status(id, status).await?;
            }
            created += 1;
        }
    }

    Ok(created)
}

// ============================================================================
// Schedule
// ============================================================================

async fn seed_schedule(database: &Database) -> Result<usize> {
    let mut created = 0;

    if database.list_schedule_items().await?.is_empty() {
        let items = [
            ("Upper Body", "Push-ups, Pull-ups, Dips", Weekday::Mon, time(18, 30)?, "workout", SessionStatus::Completed),
            ("Mobility", "Stretching & Recovery", Weekday::Mon, time(20, 0)?, "rest", SessionStatus::Completed),
            ("Leg Day", "Squats, Lunges, Calf Raises", Weekday::Tue, time(19, 0)?, "workout", SessionStatus::Completed),
            ("Core Focus", "Planks, Leg Raises", Weekday::Wed, time(18, 45)?, "workout", SessionStatus::Scheduled),
            ("Skill Work", "Handstand Practice", Weekday::Wed, time(20, 30)?, "planned", SessionStatus::Scheduled),
            ("Active Rest", "Light Walking", Weekday::Thu, time(0, 0)?, "rest", SessionStatus::Scheduled),
            ("Full Body", "Circuit Training", Weekday::Fri, time(19, 15)?, "workout", SessionStatus::Scheduled),
            ("Outdoor Workout", "Park Calisthenics", Weekday::Sat, time(9, 0)?, "workout", SessionStatus::Scheduled),
            ("Recovery", "Foam Rolling", Weekday::Sat, time(15, 0)?, "rest", SessionStatus::Scheduled),
            ("Complete Rest", "Mental Recovery", Weekday::Sun, time(0, 0)?, "rest", SessionStatus::Scheduled),
        ];
        for (title, details, day_of_week, at, category, status) in items {
            let id = database
                .create_schedule_item(&ScheduleItemInput {
                    title: title.to_owned(),
                    details: Some(details.to_owned()),
                    day_of_week,
                    time: at,
                    category: category.to_owned(),
                })
                .await?;
            if status.is_completed() {
                database.set_schedule_item_status(id, status).await?;
            }
            created += 1;
        }
    }

    if database.list_sticky_notes().await?.is_empty() {
        let notes = [
            ("Form Check", "Record push-up form this week", "yellow"),
            ("Progress Goal", "+5 pull-ups by end of month", "orange"),
            ("Rest Priority", "Don't skip Sunday rest day!", "pink"),
            ("Meal Prep", "Prepare post-workout meals", "green"),
        ];
        for (title, content, color) in notes {
            database
                .create_sticky_note(&StickyNoteInput {
                    title: title.to_owned(),
                    content: content.to_owned(),
                    color: color.to_owned(),
                })
                .await?;
            created += 1;
        }
    }

    Ok(created)
}

// ============================================================================
// Training plans
// ============================================================================

async fn seed_plans(database: &Database) -> Result<usize> {
    if !database.list_plans().await?.is_empty() {
        return Ok(0);
    }

    let plans = [
        (
            "Upper Body Strength",
            "Focus on push-ups, pull-ups, and dips progression. Target: 20 push-ups, 10 pull-ups, 8 dips.",
            date(2025, 11, 1)?,
            date(2025, 11, 30)?,
            PlanStatus::Completed,
        ),
        (
            "Core Development",
            "Build core strength with planks, leg raises, and Russian twists. Target: 2-minute plank, 20 leg raises.",
            date(2025, 11, 5)?,
            date(2025, 11, 25)?,
            PlanStatus::Completed,
        ),
        (
            "Skill Progression",
            "Work on handstand balance and muscle-up progression. Daily skill practice for 15 minutes.",
            date(2025, 11, 10)?,
            date(2025, 12, 10)?,
            PlanStatus::Pending,
        ),
        (
            "Flexibility & Mobility",
            "Improve flexibility with daily stretching routine. Focus on shoulders, hips, and hamstrings.",
            date(2025, 11, 15)?,
            date(2025, 12, 15)?,
            PlanStatus::Upcoming,
        ),
        (
            "Endurance Training",
            "Build muscular endurance with high-rep circuits. Target: 50 push-ups in 5 minutes.",
            date(2025, 11, 20)?,
            date(2025, 12, 20)?,
            PlanStatus::Upcoming,
        ),
    ];

    let mut created = 0;
    for (title, description, start, end, status) in plans {
        let input = PlanInput::new(title.to_owned(), description.to_owned(), start, end)?;
        database.create_plan(&input, status).await?;
        created += 1;
    }
    Ok(created)
}

// ============================================================================
// Motivation
// ============================================================================

async fn seed_motivation(database: &Database, user_id: i64) -> Result<usize> {
    let items = [
        (
            "From Zero to Hero",
            "Watch this inspiring transformation story of a complete beginner who mastered advanced calisthenics skills in just 2 years.",
            "video",
            "Jake Williams",
            true,
        ),
        (
            "The Calisthenics Bible",
            "Comprehensive guide to bodyweight training with detailed progressions, nutrition advice, and mindset strategies.",
            "book",
            "Mike Chen",
            true,
        ),
        (
            "Strength Through Struggle",
            "Powerful reminder that every challenging workout is building your future strength and resilience.",
            "quote",
            "Unknown",
            true,
        ),
        (
            "Rocky IV - Siberian Training",
            "Iconic training sequence showing Rocky's raw, natural training in the harsh Siberian wilderness - pure calisthenics inspiration.",
            "movie",
            "Sylvester Stallone",
            false,
        ),
        (
            "The Mind-Muscle Connection",
            "Episode 45: Learn how to develop the mental focus needed to push through plateaus and achieve your fitness goals.",
            "podcast",
            "Fitness Mindset",
            false,
        ),
        (
            "Street Workout World Finals",
            "Watch the world's best calisthenics athletes compete in incredible displays of strength, skill, and creativity.",
            "video",
            "World Championship",
            false,
        ),
        (
            "Atomic Habits",
            "Learn how to build good habits and break bad ones with this groundbreaking guide to behavior change and personal development.",
            "book",
            "James Clear",
            true,
        ),
        (
            "The Power of Discipline",
            "Perfect reminder for those days when you don't feel like training but know you'll regret skipping it tomorrow.",
            "quote",
            "Abraham Lincoln",
            false,
        ),
    ];

    let mut created = 0;
    for (title, description, category, author, favorite) in items {
        if database.motivation_item_exists(title).await? {
            continue;
        }
        let id = database
            .create_motivation_item(&NewMotivationItem {
                title: title.to_owned(),
                description: Some(description.to_owned()),
                category: category.to_owned(),
                author: Some(author.to_owned()),
                source_url: None,
                cover_image_path: None,
                user_id,
            })
            .await?;
        if favorite {
            database.toggle_motivation_favorite(id).await?;
        }
        created += 1;
    }
    Ok(created)
}

// ============================================================================
// Videos
// ============================================================================

async fn seed_videos(database: &Database, user_id: i64) -> Result<usize> {
    let videos = [
        (
            "Complete Push-up Tutorial for Beginners",
            "Learn proper push-up form, common mistakes to avoid, and progression exercises to build strength.",
            "tutorial",
            "12:45",
        ),
        (
            "Full Body Calisthenics Workout - No Equipment",
            "Complete 25-minute full body workout that you can do anywhere with zero equipment. Perfect for beginners!",
            "workout",
            "25:18",
        ),
        (
            "6-Month Calisthenics Transformation",
            "Watch my incredible 6-month journey from beginner to intermediate calisthenics athlete with consistent training.",
            "progress",
            "8:32",
        ),
        (
            "Pull-up Progression: From Zero to 10 Reps",
            "Complete guide to building pull-up strength with negative reps, assisted variations, and proper programming.",
            "tutorial",
            "18:21",
        ),
        (
            "Why I Train - My Calisthenics Journey",
            "The story behind why I started calisthenics and how it changed my life both physically and mentally.",
            "motivation",
            "5:47",
        ),
        (
            "Advanced Calisthenics Flow - Skill Training",
            "Learn advanced calisthenics movements and smooth transitions between skills like muscle-ups, front levers, and handstands.",
            "workout",
            "32:05",
        ),
    ];

    let mut created = 0;
    for (title, description, category, duration) in videos {
        if database.video_exists(title).await? {
            continue;
        }
        // Metadata only; the player falls back to the placeholder file
        database
            .create_video(&NewVideo {
                title: title.to_owned(),
                description: Some(description.to_owned()),
                category: category.to_owned(),
                file_path: "placeholder.mp4".to_owned(),
                thumbnail_path: None,
                duration: Some(duration.to_owned()),
                size_mb: None,
                user_id,
            })
            .await?;
        created += 1;
    }
    Ok(created)
}

// ============================================================================
// Tournament
// ============================================================================

/// Badge name, icon, color, milestone title, level, reward and task
const MILESTONES: [(&str, &str, &str, &str, i64, i64, &str); 7] = [
    ("Bronze Challenge", "fa-award", "#cd7f32", "The Bronze Trial", 25, 1000, "Complete 10 Muscle-ups"),
    ("Silver Challenge", "fa-award", "#c0c0c0", "The Silver Gauntlet", 40, 2000, "Hold a 30-second Front Lever"),
    ("Golden Challenge", "fa-trophy", "#ffd700", "The Golden Standard", 55, 3000, "Perform 5 Freestanding Handstand Push-ups"),
    ("Super Challenge", "fa-star", "#e91e63", "The Super Human Test", 70, 4000, "Hold a 15-second Full Planche"),
    ("Elite Challenge", "fa-shield-alt", "#74b9ff", "The Elite Proving Ground", 85, 5000, "Perform 3 One-Arm Pull-ups (Each Arm)"),
    ("Grand Challenge", "fa-crown", "#e67e22", "The Grand Finale", 100, 10000, "Complete a 10-minute non-stop freestyle routine"),
    ("Grand Master", "fa-chess-king", "#d63031", "Beyond Grand Master", 101, 0, "Surpass Level 100"),
];

async fn seed_tournament(database: &Database, user_id: i64) -> Result<usize> {
    let mut created = 0;

    for (badge_name, icon, color, title, level, xp_reward, task) in MILESTONES {
        let badge_id = match database.find_badge_by_name(badge_name).await? {
            Some(badge) => badge.id,
            None => {
                let description = if level > 100 {
                    "Awarded for surpassing Level 100.".to_owned()
                } else {
                    format!("Awarded for completing the Level {level} challenge.")
                };
                created += 1;
                database
                    .create_badge(&NewBadge {
                        name: badge_name.to_owned(),
                        description,
                        icon: icon.to_owned(),
                        color: color.to_owned(),
                        challenges_required: 1,
                    })
                    .await?
            }
        };

        if database.find_challenge_by_title(title).await?.is_none() {
            let input = ChallengeInput {
                title: title.to_owned(),
                task_details: task.to_owned(),
                level_requirement: level,
                xp_reward,
                time_limit: None,
            };
            database
                .create_system_challenge(&input, true, Some(badge_id))
                .await?;
            created += 1;
        }
    }

    let mut links = 0;
    for challenge_id in database.list_system_challenge_ids().await? {
        if database
            .ensure_challenge_link(user_id, challenge_id, ChallengeStatus::Locked)
            .await?
        {
            links += 1;
        }
    }
    info!("  {} new challenge links", links);

    Ok(created + links)
}

async fn seed_section(database: &Database, section: Section, user_id: i64) -> Result<usize> {
    match section {
        Section::Workouts => seed_workouts(database).await,
        Section::Calendar => seed_calendar(database).await,
        Section::Health => seed_health(database).await,
        Section::Schedule => seed_schedule(database).await,
        Section::Plans => seed_plans(database).await,
        Section::Motivation => seed_motivation(database, user_id).await,
        Section::Videos => seed_videos(database, user_id).await,
        Section::Tournament => seed_tournament(database, user_id).await,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let logging = LoggingConfig::from_env();
    if args.verbose {
        logging.verbose().init()?;
    } else {
        logging.init()?;
    }

    info!("=== Calisthenics Tracker Demo Data Seeder ===");

    let connection = args
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .map_or_else(DatabaseUrl::default, |url| DatabaseUrl::parse_url(&url))
        .to_connection_string();
    info!("Connecting to database: {}", connection);
    let database = Database::new(&connection)
        .await
        .with_context(|| format!("opening {connection}"))?;

    let (profile, created) = database.get_or_create_profile().await?;
    if created {
        info!("Created default profile {}", profile.id);
    }

    let sections = args.only.map_or_else(|| Section::ALL.to_vec(), |section| vec![section]);
    for section in sections {
        let count = seed_section(&database, section, profile.id).await?;
        info!("{:?}: {} rows added", section, count);
    }

    info!("=== Seeding complete ===");
    Ok(())
}
