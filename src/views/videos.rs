// ABOUTME: Video library page with category filter, player data links and the upload form
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::fmt::Write;

use calisthenics_core::formatting::format_decimal;
use calisthenics_core::models::Video;

use super::{attr, escape, layout, opt, post_button, NavPage};
use crate::flash::Flash;
use crate::media::static_url;
use crate::services::videos::VideoLibrary;

fn video_card(video: &Video) -> String {
    let mut html = format!(r#"<div class="card" data-video-url="/videos/data/{}">"#, video.id);
    match &video.thumbnail_path {
        Some(thumb) => {
            let _ = write!(
                html,
                r#"<img class="thumb" src="{}" alt="{}">"#,
                attr(&static_url(thumb)),
                attr(&video.title)
            );
        }
        None => html.push_str(r#"<div class="thumb muted"><i class="fas fa-film"></i></div>"#),
    }
    let _ = write!(
        html,
        r#"<h3>{}</h3><span class="badge">{}</span><p>{}</p><p class="muted">{} · {} · {} views · {} likes · {}</p>"#,
        escape(&video.title),
        escape(&video.category),
        opt(video.description.as_deref()),
        escape(video.duration.as_deref().unwrap_or("--:--")),
        video
            .size_mb
            .map_or_else(|| "? MB".to_owned(), |mb| format!("{} MB", format_decimal(mb))),
        video.views,
        video.likes,
        video.upload_date.format("%Y-%m-%d"),
    );
    let _ = write!(
        html,
        r#"<a class="button" href="{}" target="_blank">Play</a> {} {}</div>"#,
        attr(&static_url(&video.file_path)),
        post_button(&format!("/videos/like/{}", video.id), "Like", "secondary"),
        post_button(&format!("/videos/delete/{}", video.id), "Delete", "danger"),
    );
    html
}

#[must_use]
pub fn page(library: &VideoLibrary, flashes: &[Flash]) -> String {
    let active = library.filter.as_str();
    let mut content = String::from(r#"<h1>Videos</h1><div class="card">"#);
    for category in std::iter::once("all").chain(library.categories.iter().map(String::as_str)) {
        let class = if category == active {
            "button"
        } else {
            "button secondary"
        };
        let _ = write!(
            content,
            r#"<a class="{class}" href="/videos?category={}">{}</a> "#,
            attr(&urlencoding::encode(category)),
            escape(category)
        );
    }
    content.push_str(r#"</div><div class="grid">"#);
    for video in &library.videos {
        content.push_str(&video_card(video));
    }
    content.push_str("</div>");
    if library.videos.is_empty() {
        content.push_str(r#"<p class="muted">No videos uploaded yet.</p>"#);
    }
    content.push_str(
        r#"<div class="card"><h2>Upload video</h2><form method="post" action="/videos/upload" enctype="multipart/form-data">
<label>Title</label><input name="title" required>
<label>Category</label><input name="category" placeholder="Tutorial, Progress..." required>
<label>Description</label><textarea name="description" rows="2"></textarea>
<label>Video file</label><input name="video_file" type="file" accept="video/*" required>
<button type="submit">Upload</button></form></div>"#,
    );
    layout("Videos", Some(NavPage::Videos), flashes, &content)
}
