// ABOUTME: Health page: profile, BMI, weight chart data, month calendar and health plan
// ABOUTME: Also renders the record and plan item edit forms
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::fmt::Write;

use calisthenics_core::formatting::format_decimal;
use calisthenics_core::models::{HealthPlanItem, HealthRecord, PlanItemStatus};
use serde_json::json;

use super::{attr, escape, json_script, layout, opt, post_button, stat, NavPage};
use crate::flash::Flash;
use crate::services::health::HealthOverview;

fn decimal_or(value: Option<f64>, fallback: &str) -> String {
    value.map_or_else(|| fallback.to_owned(), format_decimal)
}

fn profile_card(overview: &HealthOverview) -> String {
    let profile = &overview.profile;
    format!(
        r#"<div class="card"><h2>Profile</h2><form method="post" action="/profile/update">
<label>Height (cm)</label><input name="height" type="number" step="0.1" value="{}">
<label>Age</label><input name="age" type="number" value="{}">
<label>Gender</label><input name="gender" value="{}">
<button type="submit">Save profile</button></form></div>"#,
        decimal_or(profile.height, ""),
        profile.age.map(|a| a.to_string()).unwrap_or_default(),
        attr(profile.gender.as_deref().unwrap_or_default()),
    )
}

fn records_table(records: &[HealthRecord]) -> String {
    let mut html = String::from(
        r#"<div class="card"><h2>Records</h2><table><thead><tr><th>Date</th><th>Weight</th><th>Body fat</th><th>Notes</th><th></th></tr></thead><tbody>"#,
    );
    for record in records {
        let _ = write!(
            html,
            r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><a class="button secondary" href="/health/edit/{}">Edit</a> {}</td></tr>"#,
            record.date,
            decimal_or(record.weight, "-"),
            decimal_or(record.body_fat, "-"),
            opt(record.notes.as_deref()),
            record.id,
            post_button(&format!("/health/delete/{}", record.id), "Delete", "danger"),
        );
    }
    html.push_str("</tbody></table></div>");
    html
}

fn plan_list(items: &[HealthPlanItem]) -> String {
    let mut html = String::from(r#"<div class="card"><h2>Health plan</h2>"#);
    for item in items {
        let (label, class) = match item.status {
            PlanItemStatus::Completed => ("Undo", "secondary"),
            PlanItemStatus::Pending => ("Done", ""),
        };
        let _ = write!(
            html,
            r#"<div><strong>{}</strong> <span class="badge status-{}">{}</span><br><span class="muted">{}</span><br>{} <a class="button secondary" href="/health-plan/edit/{}">Edit</a> {}</div>"#,
            escape(&item.title),
            item.status.as_str(),
            item.status.as_str(),
            opt(item.description.as_deref()),
            post_button(&format!("/health-plan/toggle/{}", item.id), label, class),
            item.id,
            post_button(&format!("/health-plan/delete/{}", item.id), "Delete", "danger"),
        );
    }
    html.push_str(
        r#"<form method="post" action="/health-plan/add"><label>Title</label><input name="title"><label>Description</label><input name="description"><button type="submit">Add item</button></form></div>"#,
    );
    html
}

#[must_use]
pub fn page(overview: &HealthOverview, flashes: &[Flash]) -> String {
    let latest = overview.latest.as_ref();
    let mut content = format!(
        r#"<h1>Health</h1><p><a class="button secondary" href="/health/export">Export data</a></p><div class="stats">{}{}{}{}</div>"#,
        stat(
            "Weight (kg)",
            decimal_or(latest.and_then(|r| r.weight), "N/A")
        ),
        stat(
            "Body fat (%)",
            decimal_or(latest.and_then(|r| r.body_fat), "N/A")
        ),
        stat("BMI", decimal_or(overview.bmi, "N/A")),
        stat("Days measured this month", overview.month_days.len()),
    );

    content.push_str(&profile_card(overview));
    content.push_str(
        r#"<div class="card"><h2>Add record</h2><form method="post" action="/health/add">
<label>Date</label><input name="date" type="date" required>
<label>Weight (kg)</label><input name="weight" type="number" step="0.1" required>
<label>Body fat (%)</label><input name="body_fat" type="number" step="0.1">
<label>Notes</label><input name="notes">
<button type="submit">Add record</button></form></div>"#,
    );
    content.push_str(&records_table(&overview.records));
    content.push_str(&plan_list(&overview.plan_items));

    content.push_str(&json_script(
        "weight-chart",
        &json!({
            "labels": overview.chart_labels,
            "weights": overview.chart_weights,
        }),
    ));
    content.push_str(&json_script(
        "month-records",
        &json!({
            "measured_days": overview.month_days.keys().collect::<Vec<_>>(),
            "records_by_day": overview.month_days,
            "current_day": overview.current_day,
        }),
    ));

    layout("Health", Some(NavPage::Health), flashes, &content)
}

#[must_use]
pub fn edit_record_page(record: &HealthRecord, flashes: &[Flash]) -> String {
    let content = format!(
        r#"<h1>Edit record</h1><div class="card"><form method="post" action="/health/edit/{id}">
<label>Date</label><input name="date" type="date" value="{date}" required>
<label>Weight (kg)</label><input name="weight" type="number" step="0.1" value="{weight}" required>
<label>Body fat (%)</label><input name="body_fat" type="number" step="0.1" value="{body_fat}">
<label>Notes</label><input name="notes" value="{notes}">
<button type="submit">Save</button> <a class="button secondary" href="/health">Cancel</a>
</form></div>"#,
        id = record.id,
        date = record.date,
        weight = decimal_or(record.weight, ""),
        body_fat = decimal_or(record.body_fat, ""),
        notes = attr(record.notes.as_deref().unwrap_or_default()),
    );
    layout("Edit record", Some(NavPage::Health), flashes, &content)
}

#[must_use]
pub fn edit_plan_item_page(item: &HealthPlanItem, flashes: &[Flash]) -> String {
    let content = format!(
        r#"<h1>Edit plan item</h1><div class="card"><form method="post" action="/health-plan/edit/{id}">
<label>Title</label><input name="title" value="{title}" required>
<label>Description</label><textarea name="description" rows="2">{description}</textarea>
<button type="submit">Save</button> <a class="button secondary" href="/health">Cancel</a>
</form></div>"#,
        id = item.id,
        title = attr(&item.title),
        description = opt(item.description.as_deref()),
    );
    layout("Edit plan item", Some(NavPage::Health), flashes, &content)
}
