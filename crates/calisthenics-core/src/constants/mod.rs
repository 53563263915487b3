// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Leveling thresholds, rank tiers, upload folders and network defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

//! Application constants grouped by domain.

/// Network defaults
pub mod network {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 5000;
    /// Default bind address
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    /// Default upload size limit in megabytes
    pub const DEFAULT_MAX_UPLOAD_MB: u64 = 500;
}

/// Database defaults
pub mod database {
    /// Default database location
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:./calisthenics.db";
    /// Pool size for file-backed databases
    pub const DEFAULT_POOL_SIZE: u32 = 5;
}

/// Leveling and XP constants
pub mod leveling {
    /// XP threshold of level 1
    pub const BASE_LEVEL_XP: f64 = 1000.0;
    /// Growth factor applied per level
    pub const LEVEL_GROWTH_FACTOR: f64 = 1.1;
    /// Starting level of a new profile
    pub const STARTING_LEVEL: i64 = 1;
    /// Default XP reward of a challenge
    pub const DEFAULT_XP_REWARD: i64 = 50;
    /// Level at which Silver rank begins
    pub const SILVER_LEVEL: i64 = 10;
    /// Level at which Gold rank begins
    pub const GOLD_LEVEL: i64 = 20;
    /// Level at which Platinum rank begins
    pub const PLATINUM_LEVEL: i64 = 30;
}

/// Upload folders, relative to the static root
pub mod uploads {
    /// Goal progress media
    pub const GOALS_DIR: &str = "uploads/goals";
    /// Motivation cover images
    pub const MOTIVATION_DIR: &str = "uploads/motivation";
    /// Uploaded videos
    pub const VIDEOS_DIR: &str = "uploads/videos";
    /// Generated video thumbnails
    pub const THUMBNAILS_DIR: &str = "uploads/thumbnails";
    /// File parts being received, before they move into a domain directory
    pub const SPOOL_DIR: &str = "uploads/tmp";
    /// URL prefix the static root is served under
    pub const STATIC_URL_PREFIX: &str = "/static";
    /// Fallback name when sanitizing leaves nothing
    pub const FALLBACK_FILE_NAME: &str = "upload";
    /// Offset in seconds of the thumbnail frame
    pub const THUMBNAIL_OFFSET_SECONDS: u32 = 1;
}

/// Training plan limits
pub mod plans {
    /// Longest plan accepted from a form, in days
    pub const MAX_PLAN_DAYS: i64 = 366;
    /// Days either side of today included in the plan page's day map
    pub const DAY_MAP_RADIUS_DAYS: i64 = 400;
}

/// Date and time formats used by forms and pages
pub mod formats {
    /// `<input type="date">`
    pub const FORM_DATE: &str = "%Y-%m-%d";
    /// `<input type="time">`
    pub const FORM_TIME: &str = "%H:%M";
    /// `<input type="datetime-local">`
    pub const FORM_DATETIME: &str = "%Y-%m-%dT%H:%M";
    /// Chart axis label
    pub const CHART_LABEL: &str = "%b %d, %Y";
    /// Event time shown in the calendar
    pub const EVENT_TIME: &str = "%I:%M %p";
}

/// Windows used when summarizing
pub mod windows {
    /// Days of health history plotted on the weight chart
    pub const HEALTH_CHART_DAYS: i64 = 180;
    /// Days ahead shown in the upcoming events list
    pub const UPCOMING_EVENT_DAYS: i64 = 5;
}

/// Cookie names
pub mod cookies {
    /// One-shot flash messages
    pub const FLASH: &str = "flash";
}

/// Service identity used in logs
pub mod service_names {
    /// Main web server
    pub const CALISTHENICS_TRACKER: &str = "calisthenics-tracker";
}
