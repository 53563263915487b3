// ABOUTME: Weekly schedule page with sticky notes, plus the slot and note edit forms
// ABOUTME: Days run Monday to Sunday and the current weekday is highlighted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::fmt::Write;

use calisthenics_core::constants::formats::FORM_TIME;
use calisthenics_core::models::{weekday_name, ScheduleItem, SessionStatus, StickyNote, DAYS_OF_WEEK};

use super::{attr, escape, layout, opt, options, post_button, progress_bar, stat, NavPage};
use crate::flash::Flash;
use crate::services::schedule::WeekOverview;

const CATEGORIES: [&str; 4] = ["workout", "rest", "mobility", "cardio"];
const NOTE_COLORS: [&str; 5] = ["yellow", "blue", "green", "pink", "purple"];

fn day_names() -> Vec<&'static str> {
    DAYS_OF_WEEK.into_iter().map(weekday_name).collect()
}

fn slot_html(item: &ScheduleItem) -> String {
    let mut html = format!(
        r#"<div class="card"><strong>{}</strong> <span class="badge">{}</span> <span class="badge status-{}">{}</span><br><span class="muted">{}</span><p>{}</p>"#,
        escape(&item.title),
        escape(&item.category),
        item.status.as_str(),
        item.status.as_str(),
        item.time.format("%I:%M %p"),
        opt(item.details.as_deref()),
    );
    if item.status != SessionStatus::Completed {
        html.push_str(&post_button(&format!("/schedule/complete/{}", item.id), "Complete", ""));
    }
    let _ = write!(
        html,
        r#" <a class="button secondary" href="/schedule/edit/{}">Edit</a> {}</div>"#,
        item.id,
        post_button(&format!("/schedule/delete/{}", item.id), "Delete", "danger"),
    );
    html
}

fn note_html(note: &StickyNote) -> String {
    format!(
        r#"<div class="note note-{}"><strong>{}</strong><p>{}</p><a class="button secondary" href="/notes/edit/{}">Edit</a> {}</div>"#,
        attr(&note.color),
        escape(&note.title),
        escape(&note.content),
        note.id,
        post_button(&format!("/notes/delete/{}", note.id), "Delete", "danger"),
    )
}

#[must_use]
pub fn page(overview: &WeekOverview, flashes: &[Flash]) -> String {
    let mut content = format!(
        r#"<h1>Weekly Schedule</h1><div class="stats">{}{}{}{}{}</div>{}"#,
        stat("Sessions", overview.total),
        stat("Completed", overview.completed),
        stat("Workouts", overview.workouts),
        stat("Rest", overview.rest),
        stat("Completion", format!("{}%", overview.completion_percentage)),
        progress_bar(overview.completion_percentage),
    );

    content.push_str(r#"<div class="grid">"#);
    for (day, items) in &overview.days {
        let class = if *day == overview.current_day {
            "card today"
        } else {
            "card"
        };
        let _ = write!(content, r#"<div class="{class}"><h3>{}</h3>"#, weekday_name(*day));
        if items.is_empty() {
            content.push_str(r#"<p class="muted">Free day</p>"#);
        }
        for item in items {
            content.push_str(&slot_html(item));
        }
        content.push_str("</div>");
    }
    content.push_str("</div>");

    let days = day_names();
    let _ = write!(
        content,
        r#"<div class="card"><h2>Add session</h2><form method="post" action="/schedule/add">
<label>Title</label><input name="title" required>
<label>Details</label><textarea name="details" rows="2"></textarea>
<label>Day</label><select name="day_of_week">{}</select>
<label>Time</label><input name="time" type="time" required>
<label>Category</label><select name="category">{}</select>
<button type="submit">Add session</button></form></div>"#,
        options(&days, weekday_name(overview.current_day)),
        options(&CATEGORIES, "workout"),
    );

    content.push_str(r#"<h2>Sticky notes</h2><div class="grid">"#);
    for note in &overview.sticky_notes {
        content.push_str(&note_html(note));
    }
    content.push_str("</div>");
    let _ = write!(
        content,
        r#"<div class="card"><h2>Add note</h2><form method="post" action="/notes/add">
<label>Title</label><input name="title" required>
<label>Content</label><textarea name="content" rows="2" required></textarea>
<label>Color</label><select name="color">{}</select>
<button type="submit">Add note</button></form></div>"#,
        options(&NOTE_COLORS, "yellow"),
    );

    layout("Schedule", Some(NavPage::Schedule), flashes, &content)
}

#[must_use]
pub fn edit_item_page(item: &ScheduleItem, flashes: &[Flash]) -> String {
    let days = day_names();
    let content = format!(
        r#"<h1>Edit session</h1><div class="card"><form method="post" action="/schedule/edit/{id}">
<label>Title</label><input name="title" value="{title}" required>
<label>Details</label><textarea name="details" rows="2">{details}</textarea>
<label>Day</label><select name="day_of_week">{days}</select>
<label>Time</label><input name="time" type="time" value="{time}" required>
<label>Category</label><input name="category" value="{category}" required>
<button type="submit">Save</button> <a class="button secondary" href="/schedule">Cancel</a>
</form></div>"#,
        id = item.id,
        title = attr(&item.title),
        details = opt(item.details.as_deref()),
        days = options(&days, weekday_name(item.day_of_week)),
        time = item.time.format(FORM_TIME),
        category = attr(&item.category),
    );
    layout("Edit session", Some(NavPage::Schedule), flashes, &content)
}

#[must_use]
pub fn edit_note_page(note: &StickyNote, flashes: &[Flash]) -> String {
    let content = format!(
        r#"<h1>Edit note</h1><div class="card"><form method="post" action="/notes/edit/{id}">
<label>Title</label><input name="title" value="{title}" required>
<label>Content</label><textarea name="content" rows="3" required>{body}</textarea>
<label>Color</label><select name="color">{colors}</select>
<button type="submit">Save</button> <a class="button secondary" href="/schedule">Cancel</a>
</form></div>"#,
        id = note.id,
        title = attr(&note.title),
        body = escape(&note.content),
        colors = options(&NOTE_COLORS, &note.color),
    );
    layout("Edit note", Some(NavPage::Schedule), flashes, &content)
}
