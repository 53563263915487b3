// ABOUTME: Motivation board service: filtered listing, items with cover images, favourites
// ABOUTME: Cover files live under uploads/motivation and are removed with their item
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use calisthenics_core::constants::uploads::MOTIVATION_DIR;
use calisthenics_core::errors::{AppError, AppResult};
use calisthenics_core::models::{CategoryFilter, MotivationItem, NewMotivationItem};
use tracing::info;

use crate::database::Database;
use crate::flash::Flash;
use crate::forms::UploadedFile;
use crate::media::UploadStore;

/// Everything the motivation page shows
#[derive(Debug, Clone)]
pub struct MotivationBoard {
    /// Favourites first, then newest
    pub items: Vec<MotivationItem>,
    pub categories: Vec<String>,
    pub filter: CategoryFilter,
}

/// Load the board for a profile
///
/// # Errors
///
/// Returns an error if a query fails
pub async fn load_board(db: &Database, user_id: i64, filter: CategoryFilter) -> AppResult<MotivationBoard> {
    let items = db.list_motivation_items(user_id, &filter).await?;
    let categories = db.motivation_categories(user_id).await?;
    Ok(MotivationBoard {
        items,
        categories,
        filter,
    })
}

/// Insert an item, storing its cover image first when one was selected
///
/// # Errors
///
/// Returns a storage error when the cover cannot be written and a database
/// error when the insert fails; the cover file is removed in that case
pub async fn add_item(
    db: &Database,
    store: &UploadStore,
    mut item: NewMotivationItem,
    cover: Option<&UploadedFile>,
) -> AppResult<i64> {
    let stored = match cover.filter(|f| f.is_selected()) {
        Some(file) => Some(file.persist(store, MOTIVATION_DIR).await?),
        None => None,
    };
    item.cover_image_path = stored.as_ref().map(|s| s.relative_path.clone());

    match db.create_motivation_item(&item).await {
        Ok(id) => {
            info!(item_id = id, title = %item.title, "Motivation item added");
            Ok(id)
        }
        Err(e) => {
            if let Some(stored) = stored {
                store.remove(&stored.relative_path).await;
            }
            Err(e)
        }
    }
}

/// Remove an item and its cover image
///
/// # Errors
///
/// Returns `ResourceNotFound` when the item does not exist
pub async fn delete_item(db: &Database, store: &UploadStore, item_id: i64) -> AppResult<()> {
    let item = db
        .get_motivation_item(item_id)
        .await?
        .ok_or_else(|| AppError::not_found("Motivation item"))?;
    if let Some(cover) = &item.cover_image_path {
        store.remove(cover).await;
    }
    db.delete_motivation_item(item_id).await?;
    Ok(())
}

/// Flip the favourite flag and describe the result
///
/// # Errors
///
/// Returns `ResourceNotFound` when the item does not exist
pub async fn toggle_favorite(db: &Database, item_id: i64) -> AppResult<Flash> {
    let item = db
        .get_motivation_item(item_id)
        .await?
        .ok_or_else(|| AppError::not_found("Motivation item"))?;
    let favorite = db.toggle_motivation_favorite(item_id).await?;
    Ok(favorite_notice(&item.title, favorite))
}

fn favorite_notice(title: &str, favorite: bool) -> Flash {
    if favorite {
        Flash::success(format!("\"{title}\" added to favorites."))
    } else {
        Flash::info(format!("\"{title}\" removed from favorites."))
    }
}
