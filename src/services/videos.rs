// ABOUTME: Video library service: the upload pipeline, the library listing and file cleanup
// ABOUTME: Probes and thumbnails through the VideoProcessor seam; failures remove partial files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::path::Path;

use calisthenics_core::constants::uploads::{THUMBNAILS_DIR, VIDEOS_DIR};
use calisthenics_core::errors::{AppError, AppResult};
use calisthenics_core::formatting::format_duration;
use calisthenics_core::models::{CategoryFilter, NewVideo, Video};
use calisthenics_core::stats::round_to;
use serde::Serialize;
use tracing::{error, info};

use crate::database::Database;
use crate::forms::UploadedFile;
use crate::media::{static_url, StoredFile, UploadStore, VideoProcessor};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Text fields of an upload
#[derive(Debug, Clone)]
pub struct VideoDetails {
    pub title: String,
    pub category: String,
    pub description: Option<String>,
    pub user_id: i64,
}

/// Everything the video library page shows
#[derive(Debug, Clone)]
pub struct VideoLibrary {
    /// Newest first
    pub videos: Vec<Video>,
    pub categories: Vec<String>,
    pub filter: CategoryFilter,
}

/// Payload of `GET /videos/data/:id`
#[derive(Debug, Clone, Serialize)]
pub struct VideoData {
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
}

impl From<&Video> for VideoData {
    fn from(video: &Video) -> Self {
        Self {
            title: video.title.clone(),
            description: video.description.clone(),
            file_url: static_url(&video.file_path),
        }
    }
}

/// Load the library for a profile
///
/// # Errors
///
/// Returns an error if a query fails
pub async fn load_library(db: &Database, user_id: i64, filter: CategoryFilter) -> AppResult<VideoLibrary> {
    let videos = db.list_videos(user_id, &filter).await?;
    let categories = db.video_categories(user_id).await?;
    Ok(VideoLibrary {
        videos,
        categories,
        filter,
    })
}

/// Size in megabytes rounded to two places
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn size_in_mb(bytes: u64) -> f64 {
    round_to(bytes as f64 / BYTES_PER_MB, 2)
}

/// Relative thumbnail path for a stored video: `uploads/thumbnails/<stem>.jpg`
#[must_use]
pub fn thumbnail_path_for(video_relative_path: &str) -> String {
    let stem = Path::new(video_relative_path)
        .file_stem()
        .map_or_else(|| "thumbnail".into(), |s| s.to_string_lossy());
    format!("{THUMBNAILS_DIR}/{stem}.jpg")
}

/// Whole seconds shown for a probed duration
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_seconds(duration: f64) -> u64 {
    duration.max(0.0) as u64
}

/// Store an uploaded video, probe it, extract a thumbnail and record it
///
/// Any failure after the file is written removes the video and thumbnail
/// files before the error is returned.
///
/// # Errors
///
/// Returns a storage error when the file cannot be written, an external tool
/// error when probing or thumbnailing fails and a database error when the row
/// cannot be inserted
pub async fn upload_video(
    db: &Database,
    store: &UploadStore,
    processor: &dyn VideoProcessor,
    details: &VideoDetails,
    file: &UploadedFile,
) -> AppResult<i64> {
    let stored = file.persist(store, VIDEOS_DIR).await?;
    let thumbnail = thumbnail_path_for(&stored.relative_path);

    match process_and_record(db, store, processor, details, &stored, &thumbnail).await {
        Ok(id) => {
            info!(video_id = id, title = %details.title, path = %stored.relative_path, "Video uploaded");
            Ok(id)
        }
        Err(e) => {
            error!(error = %e, path = %stored.relative_path, "Video processing failed");
            store.remove(&stored.relative_path).await;
            store.remove(&thumbnail).await;
            Err(e)
        }
    }
}

async fn process_and_record(
    db: &Database,
    store: &UploadStore,
    processor: &dyn VideoProcessor,
    details: &VideoDetails,
    stored: &StoredFile,
    thumbnail: &str,
) -> AppResult<i64> {
    let seconds = processor.probe_duration(&stored.absolute_path).await?;
    let thumbnail_absolute = store.resolve(thumbnail)?;
    processor
        .extract_thumbnail(&stored.absolute_path, &thumbnail_absolute)
        .await?;

    db.create_video(&NewVideo {
        title: details.title.clone(),
        description: details.description.clone(),
        category: details.category.clone(),
        file_path: stored.relative_path.clone(),
        thumbnail_path: Some(thumbnail.to_owned()),
        duration: Some(format_duration(whole_seconds(seconds))),
        size_mb: Some(size_in_mb(stored.size_bytes)),
        user_id: details.user_id,
    })
    .await
}

/// Remove a video's files, then its row
///
/// # Errors
///
/// Returns `ResourceNotFound` when the video does not exist
pub async fn delete_video(db: &Database, store: &UploadStore, video_id: i64) -> AppResult<Video> {
    let video = db
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::not_found("Video"))?;

    store.remove(&video.file_path).await;
    if let Some(thumbnail) = &video.thumbnail_path {
        store.remove(thumbnail).await;
    }
    db.delete_video(video_id).await?;
    info!(video_id, "Video deleted");
    Ok(video)
}

/// Player payload for a video; each fetch counts as a view
///
/// # Errors
///
/// Returns `ResourceNotFound` when the video does not exist
pub async fn play_video(db: &Database, video_id: i64) -> AppResult<VideoData> {
    let video = db
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::not_found("Video"))?;
    db.record_video_view(video_id).await?;
    Ok(VideoData::from(&video))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_in_mb_rounds_to_two_places() {
        assert!((size_in_mb(1_048_576) - 1.0).abs() < f64::EPSILON);
        assert!((size_in_mb(5_500_000) - 5.25).abs() < f64::EPSILON);
        assert!(size_in_mb(0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_thumbnail_uses_stored_stem() {
        assert_eq!(
            thumbnail_path_for("uploads/videos/ab12_front_lever.mp4"),
            "uploads/thumbnails/ab12_front_lever.jpg"
        );
    }

    #[test]
    fn test_whole_seconds_truncates() {
        assert_eq!(whole_seconds(65.9), 65);
        assert_eq!(whole_seconds(-1.0), 0);
        assert_eq!(format_duration(whole_seconds(3725.2)), "01:02:05");
    }
}
