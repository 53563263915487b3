// ABOUTME: Goals page: progress cards, attached media and the before/after gallery
// ABOUTME: The add form is multipart so media files can be attached on creation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::fmt::Write;

use calisthenics_core::models::{Goal, GoalMedia, MediaType};

use super::{attr, escape, layout, opt, post_button, progress_bar, stat, NavPage};
use crate::flash::Flash;
use crate::media::static_url;
use crate::services::goals::GoalOverview;

const ADD_FORM: &str = r#"<div class="card"><h2>New goal</h2>
<form method="post" action="/goals/add" enctype="multipart/form-data">
<label>Title</label><input name="title" required>
<label>Target date</label><input name="target_date" type="date" required>
<label>Description</label><textarea name="description" rows="2"></textarea>
<label>Notes</label><textarea name="notes" rows="2"></textarea>
<label>Progress photos or videos</label><input name="media_files[]" type="file" accept="image/*,video/*" multiple>
<button type="submit">Create goal</button>
</form></div>"#;

fn media_html(media: &GoalMedia) -> String {
    let url = static_url(&media.file_path);
    match media.media_type {
        MediaType::Image => format!(r#"<img class="thumb" src="{}" alt="Goal media">"#, attr(&url)),
        MediaType::Video => format!(
            r#"<video class="thumb" src="{}" controls preload="metadata"></video>"#,
            attr(&url)
        ),
    }
}

fn mark_form(media: &GoalMedia) -> String {
    format!(
        r#"<form class="inline" method="post" action="/goals/media/{}/mark"><select name="role"><option value="none">No role</option><option value="before"{}>Before</option><option value="after"{}>After</option></select><button type="submit" class="secondary">Set</button></form>"#,
        media.id,
        if media.is_before_photo { " selected" } else { "" },
        if media.is_after_photo { " selected" } else { "" },
    )
}

fn goal_card(goal: &Goal, media: &[GoalMedia]) -> String {
    let unit = goal.progress_unit.as_deref().unwrap_or("%");
    let toggle_label = if goal.is_completed() {
        "Reopen"
    } else {
        "Mark complete"
    };

    let mut html = format!(
        r#"<div class="card"><h3>{} <span class="badge status-{}">{}</span></h3><p>{}</p><p class="muted">Target: {}</p>{}<p>{} / {} {}</p>"#,
        escape(&goal.title),
        goal.status.as_str(),
        goal.status.as_str(),
        opt(goal.description.as_deref()),
        goal.target_date,
        progress_bar(goal.progress_percentage()),
        goal.current_progress,
        goal.target_progress,
        escape(unit),
    );
    if let Some(notes) = &goal.notes {
        let _ = write!(html, r#"<p class="muted">{}</p>"#, escape(notes));
    }
    if let Some(done) = goal.completed_date {
        let _ = write!(html, r#"<p class="muted">Completed {}</p>"#, done.format("%Y-%m-%d"));
    }
    for item in media {
        let _ = write!(html, "<div>{}{}</div>", media_html(item), mark_form(item));
    }
    let _ = write!(
        html,
        r#"<form class="inline" method="post" action="/goals/progress/{}"><input name="current_progress" type="number" min="0" max="{}" value="{}"><button type="submit" class="secondary">Update progress</button></form> {} {}</div>"#,
        goal.id,
        goal.target_progress,
        goal.current_progress,
        post_button(&format!("/goals/toggle_status/{}", goal.id), toggle_label, ""),
        post_button(&format!("/goals/delete/{}", goal.id), "Delete", "danger"),
    );
    html
}

#[must_use]
pub fn page(overview: &GoalOverview, flashes: &[Flash]) -> String {
    let mut content = format!(
        r#"<h1>Goals</h1><div class="stats">{}{}{}</div>"#,
        stat("Total goals", overview.total),
        stat("Completed", overview.completed),
        stat("Completion", format!("{}%", overview.completion_percentage)),
    );

    if overview.before_photo.is_some() || overview.after_photo.is_some() {
        content.push_str(r#"<div class="card"><h2>Transformation</h2><div class="grid">"#);
        for (label, photo) in [
            ("Before", &overview.before_photo),
            ("After", &overview.after_photo),
        ] {
            let inner = photo
                .as_ref()
                .map_or_else(|| r#"<p class="muted">Not chosen yet</p>"#.to_owned(), media_html);
            let _ = write!(content, "<div><h3>{label}</h3>{inner}</div>");
        }
        content.push_str("</div></div>");
    }

    content.push_str(r#"<div class="grid">"#);
    for goal in &overview.goals {
        let media = overview
            .media_by_goal
            .get(&goal.id)
            .map_or(&[][..], Vec::as_slice);
        content.push_str(&goal_card(goal, media));
    }
    content.push_str("</div>");
    if overview.goals.is_empty() {
        content.push_str(r#"<p class="muted">No goals yet. Set your first one below.</p>"#);
    }
    content.push_str(ADD_FORM);

    layout("Goals", Some(NavPage::Goals), flashes, &content)
}
