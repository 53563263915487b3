// ABOUTME: Video library route handlers: filtered library, upload pipeline, delete, likes
// ABOUTME: Player data is served as JSON and counts as a view
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use calisthenics_core::errors::AppResult;
use calisthenics_core::models::CategoryFilter;

use crate::errors::PageResult;
use crate::flash::{Flash, Flashes};
use crate::forms::MultipartForm;
use crate::resources::ServerResources;
use crate::services::videos::{self, VideoData, VideoDetails};
use crate::views;

const REQUIRED: &str = "Title, Category, and a video file are required.";
const PROCESSING_FAILED: &str = "An error occurred during video processing. Please ensure FFmpeg is installed and the video format is supported.";

/// Video library routes
pub struct VideoRoutes;

impl VideoRoutes {
    /// Create the video routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/videos", get(Self::handle_library))
            .route("/videos/upload", post(Self::handle_upload))
            .route("/videos/delete/:id", post(Self::handle_delete))
            .route("/videos/data/:id", get(Self::handle_data))
            .route("/videos/like/:id", post(Self::handle_like))
            .with_state(resources)
    }

    async fn handle_library(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Query(query): Query<HashMap<String, String>>,
    ) -> PageResult {
        let Some(profile) = resources.database.get_profile().await? else {
            flashes.push(Flash::danger("User profile not found."));
            return Ok(flashes.redirect("/"));
        };
        let filter = CategoryFilter::from_query(query.get("category").map(String::as_str));
        let library = videos::load_library(&resources.database, profile.id, filter).await?;
        let html = views::videos::page(&library, flashes.messages());
        Ok(flashes.render(StatusCode::OK, html))
    }

    async fn handle_upload(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        multipart: Multipart,
    ) -> PageResult {
        let upload = MultipartForm::read(multipart, &resources.uploads).await?;
        let Some(profile) = resources.database.get_profile().await? else {
            flashes.push(Flash::danger("User profile not found."));
            return Ok(flashes.redirect("/videos"));
        };

        let fields = &upload.fields;
        let (Some(title), Some(category), Some(file)) = (
            fields.optional("title"),
            fields.optional("category"),
            upload.file("video_file"),
        ) else {
            flashes.push(Flash::danger(REQUIRED));
            return Ok(flashes.redirect("/videos"));
        };
        if !file.is_selected() {
            flashes.push(Flash::danger("No selected file."));
            return Ok(flashes.redirect("/videos"));
        }

        let details = VideoDetails {
            title,
            category,
            description: fields.optional("description"),
            user_id: profile.id,
        };
        // The pipeline logs the cause and cleans up its files
        match videos::upload_video(
            &resources.database,
            &resources.uploads,
            resources.video_processor.as_ref(),
            &details,
            file,
        )
        .await
        {
            Ok(_) => flashes.push(Flash::success("Video uploaded and processed successfully!")),
            Err(_) => flashes.push(Flash::danger(PROCESSING_FAILED)),
        }
        Ok(flashes.redirect("/videos"))
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        videos::delete_video(&resources.database, &resources.uploads, id).await?;
        flashes.push(Flash::success("Video deleted successfully."));
        Ok(flashes.redirect("/videos"))
    }

    async fn handle_data(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> AppResult<Json<VideoData>> {
        let data = videos::play_video(&resources.database, id).await?;
        Ok(Json(data))
    }

    async fn handle_like(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        let likes = resources.database.like_video(id).await?;
        flashes.push(Flash::success(format!("Thanks! This video now has {likes} likes.")));
        Ok(flashes.redirect("/videos"))
    }
}
