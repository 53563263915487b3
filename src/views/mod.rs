// ABOUTME: Server-side HTML rendering for every page of the tracker
// ABOUTME: Pages fill the embedded layout template; all user text is HTML-escaped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

//! # Views
//!
//! Each page module turns a service overview into the inner HTML of a page and
//! hands it to [`layout`], which wraps it in the shared navigation shell and
//! renders pending flash notices. Template placeholders look like `{{NAME}}`
//! and are filled in a single pass, so user text can never inject another
//! placeholder.

pub mod calendar;
pub mod error;
pub mod goals;
pub mod health;
pub mod home;
pub mod motivation;
pub mod plans;
pub mod schedule;
pub mod tournament;
pub mod videos;
pub mod workouts;

use std::borrow::Cow;
use std::fmt::{Display, Write};

use serde::Serialize;

use crate::flash::Flash;

/// Layout template embedded at compile time
const LAYOUT_TEMPLATE: &str = include_str!("../../templates/layout.html");

/// Navigation entries, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPage {
    Home,
    Workouts,
    Goals,
    Plan,
    Schedule,
    Calendar,
    Health,
    Tournament,
    Motivation,
    Videos,
}

impl NavPage {
    pub const ALL: [Self; 10] = [
        Self::Home,
        Self::Workouts,
        Self::Goals,
        Self::Plan,
        Self::Schedule,
        Self::Calendar,
        Self::Health,
        Self::Tournament,
        Self::Motivation,
        Self::Videos,
    ];

    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Workouts => "/workouts",
            Self::Goals => "/goals",
            Self::Plan => "/plan",
            Self::Schedule => "/schedule",
            Self::Calendar => "/calendar",
            Self::Health => "/health",
            Self::Tournament => "/tournament",
            Self::Motivation => "/motivation",
            Self::Videos => "/videos",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Workouts => "Workouts",
            Self::Goals => "Goals",
            Self::Plan => "Training Plan",
            Self::Schedule => "Schedule",
            Self::Calendar => "Calendar",
            Self::Health => "Health",
            Self::Tournament => "Tournament",
            Self::Motivation => "Motivation",
            Self::Videos => "Videos",
        }
    }

    const fn icon(&self) -> &'static str {
        match self {
            Self::Home => "fa-house",
            Self::Workouts => "fa-dumbbell",
            Self::Goals => "fa-bullseye",
            Self::Plan => "fa-clipboard-list",
            Self::Schedule => "fa-clock",
            Self::Calendar => "fa-calendar-days",
            Self::Health => "fa-heart-pulse",
            Self::Tournament => "fa-trophy",
            Self::Motivation => "fa-fire",
            Self::Videos => "fa-video",
        }
    }
}

/// Escape text for element content
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    html_escape::encode_text(text)
}

/// Escape text for a double-quoted attribute value
#[must_use]
pub fn attr(text: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(text)
}

/// Escaped optional text; empty when absent
#[must_use]
pub fn opt(text: Option<&str>) -> Cow<'_, str> {
    text.map_or(Cow::Borrowed(""), escape)
}

/// Fill `{{NAME}}` placeholders in one pass; unknown names are left as they are
#[must_use]
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push_str("{{");
                out.push_str(name);
                out.push_str("}}");
            }
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

fn nav_html(active: Option<NavPage>) -> String {
    let mut html = String::new();
    for page in NavPage::ALL {
        let class = if Some(page) == active {
            "nav-link active"
        } else {
            "nav-link"
        };
        let _ = write!(
            html,
            r#"<a class="{class}" href="{}"><i class="fas {}"></i> {}</a>"#,
            page.path(),
            page.icon(),
            page.label()
        );
    }
    html
}

fn flashes_html(flashes: &[Flash]) -> String {
    let mut html = String::new();
    for flash in flashes {
        let _ = write!(
            html,
            r#"<div class="flash flash-{}" role="alert">{}</div>"#,
            flash.category.as_str(),
            escape(&flash.message)
        );
    }
    html
}

/// Wrap page content in the shared layout
#[must_use]
pub fn layout(title: &str, active: Option<NavPage>, flashes: &[Flash], content: &str) -> String {
    let title = escape(title);
    let nav = nav_html(active);
    let flashes = flashes_html(flashes);
    fill(
        LAYOUT_TEMPLATE,
        &[
            ("TITLE", title.as_ref()),
            ("NAV", nav.as_str()),
            ("FLASHES", flashes.as_str()),
            ("CONTENT", content),
        ],
    )
}

/// A POST form holding a single button
#[must_use]
pub fn post_button(action: &str, label: &str, class: &str) -> String {
    format!(
        r#"<form class="inline" method="post" action="{}"><button type="submit" class="{class}">{}</button></form>"#,
        attr(action),
        escape(label)
    )
}

/// A headline number with its caption
#[must_use]
pub fn stat(label: &str, value: impl Display) -> String {
    format!(
        r#"<div class="stat"><div class="value">{}</div><div class="label">{}</div></div>"#,
        escape(&value.to_string()),
        escape(label)
    )
}

/// A horizontal bar filled to `percentage`
#[must_use]
pub fn progress_bar(percentage: i64) -> String {
    format!(
        r#"<div class="progress"><span style="width: {}%"></span></div>"#,
        percentage.clamp(0, 100)
    )
}

/// `<option>` list with `selected` on the matching value
#[must_use]
pub fn options(values: &[&str], selected: &str) -> String {
    let mut html = String::new();
    for value in values {
        let marker = if *value == selected { " selected" } else { "" };
        let _ = write!(
            html,
            r#"<option value="{}"{marker}>{}</option>"#,
            attr(value),
            escape(value)
        );
    }
    html
}

/// Embed a value as JSON for page scripts
///
/// `</` is escaped so the payload cannot close the script element.
#[must_use]
pub fn json_script(id: &str, value: &impl Serialize) -> String {
    let json = serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_owned())
        .replace("</", "<\\/");
    format!(r#"<script type="application/json" id="{}">{json}</script>"#, attr(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_is_single_pass() {
        let out = fill(
            "<h1>{{A}}</h1>{{B}}{{UNKNOWN}}",
            &[("A", "{{B}}"), ("B", "b")],
        );
        assert_eq!(out, "<h1>{{B}}</h1>b{{UNKNOWN}}");
    }

    #[test]
    fn test_layout_marks_active_page_and_escapes_flashes() {
        let html = layout(
            "Workouts",
            Some(NavPage::Workouts),
            &[Flash::danger("Workout \"<b>\" already exists.")],
            "<p>body</p>",
        );
        assert!(html.contains(r#"<a class="nav-link active" href="/workouts">"#));
        assert!(html.contains(r#"<a class="nav-link" href="/goals">"#));
        assert!(html.contains("flash-danger"));
        assert!(html.contains("&lt;b&gt;"));
        assert!(html.contains("<p>body</p>"));
        assert!(html.contains("<title>Workouts | Calisthenics Tracker</title>"));
    }

    #[test]
    fn test_json_script_cannot_close_element() {
        let html = json_script("data", &vec!["</script><script>alert(1)"]);
        assert!(!html.contains("</script><script>"));
        assert!(html.ends_with("</script>"));
    }

    #[test]
    fn test_progress_bar_clamps() {
        assert!(progress_bar(140).contains("width: 100%"));
        assert!(progress_bar(-3).contains("width: 0%"));
    }
}
