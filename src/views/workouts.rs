// ABOUTME: Workout library page with the add form
// ABOUTME: Lists every workout with its sets, reps, rest and instructions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::fmt::Write;

use calisthenics_core::models::Workout;

use super::{escape, layout, post_button, NavPage};
use crate::flash::Flash;

const ADD_FORM: &str = r#"<div class="card"><h2>Add workout</h2>
<form method="post" action="/workouts/add">
<label>Name</label><input name="name" required>
<label>Difficulty</label><select name="difficulty"><option>Beginner</option><option>Intermediate</option><option>Advanced</option></select>
<label>Sets</label><input name="sets" type="number" min="1" required>
<label>Reps</label><input name="reps" placeholder="12 or 10/Leg" required>
<label>Rest</label><input name="rest" placeholder="60s" required>
<label>Instructions</label><textarea name="instructions" rows="3" required></textarea>
<button type="submit">Add workout</button>
</form></div>"#;

#[must_use]
pub fn page(workouts: &[Workout], flashes: &[Flash]) -> String {
    let mut rows = String::new();
    for w in workouts {
        let _ = write!(
            rows,
            "<tr><td><strong>{}</strong></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&w.name),
            escape(&w.difficulty),
            w.sets,
            escape(&w.reps),
            escape(&w.rest),
            escape(&w.instructions),
            post_button(&format!("/workouts/delete/{}", w.id), "Delete", "danger"),
        );
    }
    if workouts.is_empty() {
        rows.push_str(r#"<tr><td colspan="7" class="muted">No workouts yet.</td></tr>"#);
    }

    let content = format!(
        r#"<h1>Workouts</h1>
<div class="card"><table><thead><tr><th>Name</th><th>Difficulty</th><th>Sets</th><th>Reps</th><th>Rest</th><th>Instructions</th><th></th></tr></thead>
<tbody>{rows}</tbody></table></div>{ADD_FORM}"#
    );
    layout("Workouts", Some(NavPage::Workouts), flashes, &content)
}
