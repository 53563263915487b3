// ABOUTME: Training plan page with the per-day coverage map, plus the plan edit form
// ABOUTME: The day map is embedded as JSON for the calendar widget
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::fmt::Write;

use calisthenics_core::models::TrainingPlan;

use super::{attr, escape, json_script, layout, opt, post_button, progress_bar, stat, NavPage};
use crate::flash::Flash;
use crate::services::plans::PlanOverview;

const ADD_FORM: &str = r#"<div class="card"><h2>Add training plan</h2>
<form method="post" action="/plans/add">
<label>Title</label><input name="title" required>
<label>Description</label><textarea name="description" rows="2" required></textarea>
<label>Start date</label><input name="start_date" type="date" required>
<label>End date</label><input name="end_date" type="date" required>
<button type="submit">Add plan</button>
</form></div>"#;

#[must_use]
pub fn page(overview: &PlanOverview, flashes: &[Flash]) -> String {
    let mut content = format!(
        r#"<h1>Training Plan</h1><div class="stats">{}{}{}{}</div>{}"#,
        stat("Total plans", overview.total),
        stat("Completed", overview.completed),
        stat("Pending", overview.pending),
        stat("Completion", format!("{}%", overview.completion_percentage)),
        progress_bar(overview.completion_percentage),
    );

    let today_plans = overview.plans_by_day.get(&overview.today);
    let _ = write!(
        content,
        r#"<div class="card today"><h2>Today, {}</h2>"#,
        overview.today.format("%A %B %-d")
    );
    match today_plans {
        Some(plans) if !plans.is_empty() => {
            content.push_str("<ul>");
            for plan in plans {
                let _ = write!(
                    content,
                    r#"<li>{} <span class="badge status-{}">{}</span></li>"#,
                    escape(&plan.title),
                    plan.status.as_str(),
                    plan.status.as_str()
                );
            }
            content.push_str("</ul>");
        }
        _ => content.push_str(r#"<p class="muted">Nothing planned today.</p>"#),
    }
    content.push_str("</div>");

    content.push_str(
        r#"<div class="card"><table><thead><tr><th>Plan</th><th>Dates</th><th>Status</th><th></th></tr></thead><tbody>"#,
    );
    for plan in &overview.plans {
        let _ = write!(
            content,
            r#"<tr><td><strong>{}</strong><br><span class="muted">{}</span></td><td>{} to {}</td><td><span class="badge status-{}">{}</span></td><td><a class="button secondary" href="/plans/edit/{}">Edit</a> {}</td></tr>"#,
            escape(&plan.title),
            opt(plan.description.as_deref()),
            plan.start_date,
            plan.end_date,
            plan.status.as_str(),
            plan.status.as_str(),
            plan.id,
            post_button(&format!("/plans/delete/{}", plan.id), "Delete", "danger"),
        );
    }
    content.push_str("</tbody></table></div>");
    content.push_str(&json_script("plans-by-day", &overview.plans_by_day));
    content.push_str(ADD_FORM);

    layout("Training Plan", Some(NavPage::Plan), flashes, &content)
}

#[must_use]
pub fn edit_page(plan: &TrainingPlan, flashes: &[Flash]) -> String {
    let content = format!(
        r#"<h1>Edit plan</h1><div class="card"><form method="post" action="/plans/edit/{id}">
<label>Title</label><input name="title" value="{title}" required>
<label>Description</label><textarea name="description" rows="3" required>{description}</textarea>
<label>Start date</label><input name="start_date" type="date" value="{start}" required>
<label>End date</label><input name="end_date" type="date" value="{end}" required>
<label>Status</label><select name="status">{status}</select>
<button type="submit">Save</button> <a class="button secondary" href="/plan">Cancel</a>
</form></div>"#,
        id = plan.id,
        title = attr(&plan.title),
        description = opt(plan.description.as_deref()),
        start = plan.start_date,
        end = plan.end_date,
        status = super::options(&["upcoming", "pending", "completed"], plan.status.as_str()),
    );
    layout("Edit plan", Some(NavPage::Plan), flashes, &content)
}
