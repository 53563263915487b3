// ABOUTME: Landing page and the cross-section dashboard
// ABOUTME: The dashboard shows counts for every section plus level and rank
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::fmt::Write;

use calisthenics_core::formatting::format_decimal;

use super::{escape, layout, progress_bar, stat, NavPage};
use crate::flash::Flash;
use crate::services::dashboard::DashboardSummary;

/// Landing page linking every section
#[must_use]
pub fn index(flashes: &[Flash]) -> String {
    let mut cards = String::new();
    for page in NavPage::ALL.iter().skip(1) {
        let _ = write!(
            cards,
            r#"<a class="card" href="{}"><h3>{}</h3></a>"#,
            page.path(),
            page.label()
        );
    }
    let content = format!(
        r#"<h1>Calisthenics Tracker</h1>
<p class="muted">Track workouts, goals, health and challenges in one place.</p>
<p><a class="button" href="/dashboard">Open dashboard</a></p>
<div class="grid">{cards}</div>"#
    );
    layout("Home", Some(NavPage::Home), flashes, &content)
}

/// Dashboard summarizing every section
#[must_use]
pub fn dashboard(summary: &DashboardSummary, flashes: &[Flash]) -> String {
    let mut content = String::from("<h1>Dashboard</h1>");

    if let Some(profile) = &summary.profile {
        let _ = write!(
            content,
            r#"<div class="card"><h2>Level {} <span class="badge">{}</span></h2>{}<p class="muted">{} / {} XP</p></div>"#,
            profile.progress.level,
            escape(&profile.rank.to_string()),
            progress_bar(profile.progress.percentage),
            profile.progress.experience_points,
            profile.progress.xp_for_next_level
        );
        let _ = write!(
            content,
            r#"<div class="stats">{}{}{}{}{}</div>"#,
            stat("Goals completed", format!("{}/{}", profile.goals_completed, profile.goals_total)),
            stat("Challenges completed", profile.challenges_completed),
            stat("Badges earned", profile.badges_earned),
            stat("Motivation items", profile.motivation_items),
            stat("Videos", profile.videos),
        );
    } else {
        content.push_str(
            r#"<div class="card"><p>No profile yet. Visit the <a href="/tournament">tournament</a> to create one.</p></div>"#,
        );
    }

    let weight = summary
        .latest_weight
        .map_or_else(|| "N/A".to_owned(), |w| format!("{} kg", format_decimal(w)));
    let _ = write!(
        content,
        r#"<div class="stats">{}{}{}{}{}{}</div>"#,
        stat("Workouts", summary.workouts),
        stat(
            "Plans completed",
            format!("{}/{}", summary.plans_completed, summary.plans_total)
        ),
        stat(
            "Weekly sessions done",
            format!("{}%", summary.schedule_percentage)
        ),
        stat("Scheduled events", summary.events_scheduled),
        stat("Health records", summary.health_records),
        stat("Latest weight", weight),
    );

    layout("Dashboard", Some(NavPage::Home), flashes, &content)
}
