// ABOUTME: Uploaded training video model with probe metadata and engagement counters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An uploaded video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    /// Path relative to the static root
    pub file_path: String,
    /// Path relative to the static root
    pub thumbnail_path: Option<String>,
    /// "MM:SS" or "HH:MM:SS"
    pub duration: Option<String>,
    pub size_mb: Option<f64>,
    pub upload_date: DateTime<Utc>,
    pub views: i64,
    pub likes: i64,
    pub user_id: i64,
}

/// A processed upload ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewVideo {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub file_path: String,
    pub thumbnail_path: Option<String>,
    pub duration: Option<String>,
    pub size_mb: Option<f64>,
    pub user_id: i64,
}
