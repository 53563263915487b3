// ABOUTME: Motivation board route handlers: filtered board, add with cover image, delete, favourite
// ABOUTME: Toggling a favourite returns to the page it was clicked on
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::header::REFERER;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use calisthenics_core::errors::AppResult;
use calisthenics_core::models::{validate_source_url, CategoryFilter, NewMotivationItem};

use super::reject;
use crate::errors::PageResult;
use crate::flash::{Flash, Flashes};
use crate::forms::{FormData, MultipartForm};
use crate::resources::ServerResources;
use crate::services::motivation;
use crate::views;

const REQUIRED: &str = "Title and Category are required.";

/// Motivation board routes
pub struct MotivationRoutes;

impl MotivationRoutes {
    /// Create the motivation routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/motivation", get(Self::handle_board))
            .route("/motivation/add", post(Self::handle_add))
            .route("/motivation/delete/:id", post(Self::handle_delete))
            .route(
                "/motivation/toggle_favorite/:id",
                post(Self::handle_toggle_favorite),
            )
            .with_state(resources)
    }

    async fn handle_board(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Query(query): Query<HashMap<String, String>>,
    ) -> PageResult {
        let Some(profile) = resources.database.get_profile().await? else {
            flashes.push(Flash::danger(
                "User profile not found. Please initialize the application.",
            ));
            return Ok(flashes.redirect("/"));
        };
        let filter = CategoryFilter::from_query(query.get("category").map(String::as_str));
        let board = motivation::load_board(&resources.database, profile.id, filter).await?;
        let html = views::motivation::page(&board, flashes.messages());
        Ok(flashes.render(StatusCode::OK, html))
    }

    fn item_input(form: &FormData, user_id: i64) -> AppResult<NewMotivationItem> {
        Ok(NewMotivationItem {
            title: form.required("title", REQUIRED)?,
            description: form.optional("description"),
            category: form.required("category", REQUIRED)?,
            author: form.optional("author"),
            source_url: validate_source_url(form.optional("source_url"))?,
            cover_image_path: None,
            user_id,
        })
    }

    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        multipart: Multipart,
    ) -> PageResult {
        let upload = MultipartForm::read(multipart, &resources.uploads).await?;
        let Some(profile) = resources.database.get_profile().await? else {
            flashes.push(Flash::danger("User profile not found."));
            return Ok(flashes.redirect("/motivation"));
        };

        match Self::item_input(&upload.fields, profile.id) {
            Ok(item) => {
                motivation::add_item(
                    &resources.database,
                    &resources.uploads,
                    item,
                    upload.file("cover_image"),
                )
                .await?;
                flashes.push(Flash::success("New motivational content added!"));
            }
            Err(e) => reject(&mut flashes, e)?,
        }
        Ok(flashes.redirect("/motivation"))
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        Path(id): Path<i64>,
    ) -> PageResult {
        motivation::delete_item(&resources.database, &resources.uploads, id).await?;
        flashes.push(Flash::success("Motivational item deleted."));
        Ok(flashes.redirect("/motivation"))
    }

    async fn handle_toggle_favorite(
        State(resources): State<Arc<ServerResources>>,
        mut flashes: Flashes,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> PageResult {
        let notice = motivation::toggle_favorite(&resources.database, id).await?;
        flashes.push(notice);
        let back = local_referer(&headers).unwrap_or_else(|| "/motivation".to_owned());
        Ok(flashes.redirect(&back))
    }
}

/// Path and query of the `Referer` header, so redirects never leave the site
fn local_referer(headers: &HeaderMap) -> Option<String> {
    let referer = headers.get(REFERER)?.to_str().ok()?;
    let local = match referer.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("/", |at| &rest[at..]),
        None => referer,
    };
    (local.starts_with('/') && !local.starts_with("//")).then(|| local.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn referer(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_str(value).expect("header"));
        headers
    }

    #[test]
    fn test_referer_keeps_path_and_query() {
        assert_eq!(
            local_referer(&referer("http://localhost:5000/motivation?category=quotes")).as_deref(),
            Some("/motivation?category=quotes")
        );
        assert_eq!(local_referer(&referer("/dashboard")).as_deref(), Some("/dashboard"));
    }

    #[test]
    fn test_referer_rejects_other_forms() {
        assert_eq!(local_referer(&referer("//evil.example/x")), None);
        assert_eq!(local_referer(&referer("motivation")), None);
        assert_eq!(local_referer(&HeaderMap::new()), None);
        assert_eq!(local_referer(&referer("https://example.com")).as_deref(), Some("/"));
    }
}
