// ABOUTME: Calendar page with the month grid payload, month stats and upcoming events
// ABOUTME: Also renders the event edit form
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::fmt::Write;

use calisthenics_core::constants::formats::{EVENT_TIME, FORM_DATETIME};
use calisthenics_core::models::Event;

use super::{attr, escape, json_script, layout, options, post_button, progress_bar, stat, NavPage};
use crate::flash::Flash;
use crate::services::calendar::CalendarOverview;

const CATEGORIES: [&str; 4] = ["workout", "rest", "mobility", "cardio"];

#[must_use]
pub fn page(overview: &CalendarOverview, flashes: &[Flash]) -> String {
    let month = &overview.month;
    let mut content = format!(
        r#"<h1>Calendar</h1><div class="stats">{}{}{}{}{}</div>{}"#,
        stat("Workouts this month", month.workouts),
        stat("Completed", month.completed_workouts),
        stat("Planned", month.planned_workouts),
        stat("Rest days", month.rest_days),
        stat("Completion", format!("{}%", month.completion_percentage)),
        progress_bar(month.completion_percentage),
    );

    content.push_str(r#"<div class="card"><h2>Upcoming</h2>"#);
    if overview.upcoming.is_empty() {
        content.push_str(r#"<p class="muted">Nothing scheduled in the next few days.</p>"#);
    }
    for event in &overview.upcoming {
        let _ = write!(
            content,
            r#"<div><strong>{}</strong> <span class="badge">{}</span> <span class="muted">{} {}</span> {}</div>"#,
            escape(&event.title),
            escape(&event.category),
            event.start_time.format("%a %b %-d"),
            event.start_time.format(EVENT_TIME),
            post_button(&format!("/calendar/complete/{}", event.id), "Complete", ""),
        );
    }
    content.push_str("</div>");

    content.push_str(
        r#"<div class="card"><h2>All events</h2><table><thead><tr><th>Date</th><th>Event</th><th>Status</th><th></th></tr></thead><tbody>"#,
    );
    for (date, entries) in &overview.events_by_date {
        for entry in entries {
            let _ = write!(
                content,
                r#"<tr><td>{date} {}</td><td>{} <span class="badge">{}</span></td><td><span class="badge status-{}">{}</span></td><td><a class="button secondary" href="/calendar/edit/{}">Edit</a> {} {}</td></tr>"#,
                escape(&entry.time),
                escape(&entry.name),
                escape(&entry.category),
                entry.status.as_str(),
                entry.status.as_str(),
                entry.id,
                post_button(&format!("/calendar/complete/{}", entry.id), "Complete", ""),
                post_button(&format!("/calendar/delete/{}", entry.id), "Delete", "danger"),
            );
        }
    }
    content.push_str("</tbody></table></div>");
    content.push_str(&json_script("events-data", &overview.events_by_date));

    let _ = write!(
        content,
        r#"<div class="card"><h2>Plan a session</h2><form method="post" action="/calendar/add">
<label>Title</label><input name="title" required>
<label>Category</label><select name="category">{}</select>
<label>Start</label><input name="start_time" type="datetime-local" required>
<button type="submit">Add to calendar</button></form></div>"#,
        options(&CATEGORIES, "workout"),
    );

    layout("Calendar", Some(NavPage::Calendar), flashes, &content)
}

#[must_use]
pub fn edit_page(event: &Event, flashes: &[Flash]) -> String {
    let content = format!(
        r#"<h1>Edit event</h1><div class="card"><form method="post" action="/calendar/edit/{id}">
<label>Title</label><input name="title" value="{title}" required>
<label>Category</label><input name="category" value="{category}" required>
<label>Start</label><input name="start_time" type="datetime-local" value="{start}" required>
<button type="submit">Save</button> <a class="button secondary" href="/calendar">Cancel</a>
</form></div>"#,
        id = event.id,
        title = attr(&event.title),
        category = attr(&event.category),
        start = event.start_time.format(FORM_DATETIME),
    );
    layout("Edit event", Some(NavPage::Calendar), flashes, &content)
}
