// ABOUTME: Motivation board with category filter, favourites and the multipart add form
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::fmt::Write;

use calisthenics_core::models::MotivationItem;

use super::{attr, escape, layout, opt, post_button, NavPage};
use crate::flash::Flash;
use crate::media::static_url;
use crate::services::motivation::MotivationBoard;

fn filter_bar(board: &MotivationBoard) -> String {
    let active = board.filter.as_str();
    let mut html = String::from(r#"<div class="card">"#);
    for category in std::iter::once("all").chain(board.categories.iter().map(String::as_str)) {
        let class = if category == active {
            "button"
        } else {
            "button secondary"
        };
        let _ = write!(
            html,
            r#"<a class="{class}" href="/motivation?category={}">{}</a> "#,
            attr(&urlencoding::encode(category)),
            escape(category)
        );
    }
    html.push_str("</div>");
    html
}

fn item_card(item: &MotivationItem) -> String {
    let mut html = String::from(r#"<div class="card">"#);
    if let Some(cover) = &item.cover_image_path {
        let _ = write!(
            html,
            r#"<img class="thumb" src="{}" alt="{}">"#,
            attr(&static_url(cover)),
            attr(&item.title)
        );
    }
    let star = if item.is_favorite { "fas fa-star" } else { "far fa-star" };
    let _ = write!(
        html,
        r#"<h3>{} <i class="{star}"></i></h3><span class="badge">{}</span><p>{}</p>"#,
        escape(&item.title),
        escape(&item.category),
        opt(item.description.as_deref()),
    );
    if let Some(author) = &item.author {
        let _ = write!(html, r#"<p class="muted">{}</p>"#, escape(author));
    }
    if let Some(url) = item.web_source_url() {
        let _ = write!(
            html,
            r#"<p><a href="{}" target="_blank" rel="noopener noreferrer">Source</a></p>"#,
            attr(url)
        );
    }
    let favorite_label = if item.is_favorite { "Unfavorite" } else { "Favorite" };
    let _ = write!(
        html,
        "{} {}</div>",
        post_button(
            &format!("/motivation/toggle_favorite/{}", item.id),
            favorite_label,
            "secondary"
        ),
        post_button(&format!("/motivation/delete/{}", item.id), "Delete", "danger"),
    );
    html
}

#[must_use]
pub fn page(board: &MotivationBoard, flashes: &[Flash]) -> String {
    let mut content = String::from("<h1>Motivation</h1>");
    content.push_str(&filter_bar(board));
    content.push_str(r#"<div class="grid">"#);
    for item in &board.items {
        content.push_str(&item_card(item));
    }
    content.push_str("</div>");
    if board.items.is_empty() {
        content.push_str(r#"<p class="muted">Nothing here yet.</p>"#);
    }
    content.push_str(
        r#"<div class="card"><h2>Add inspiration</h2><form method="post" action="/motivation/add" enctype="multipart/form-data">
<label>Title</label><input name="title" required>
<label>Category</label><input name="category" placeholder="Book, Quote, Athlete..." required>
<label>Description</label><textarea name="description" rows="2"></textarea>
<label>Author</label><input name="author">
<label>Source URL</label><input name="source_url" type="url">
<label>Cover image</label><input name="cover_image" type="file" accept="image/*">
<button type="submit">Add</button></form></div>"#,
    );
    layout("Motivation", Some(NavPage::Motivation), flashes, &content)
}
