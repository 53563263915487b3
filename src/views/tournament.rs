// ABOUTME: Tournament page: level bar, rank, challenge board, badges and the custom challenge forms
// ABOUTME: Action buttons follow each challenge's status; only custom challenges can be edited
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::fmt::Write;

use calisthenics_core::models::{Challenge, ChallengeStatus, EarnedBadge, UserChallenge};

use super::{attr, escape, layout, post_button, progress_bar, stat, NavPage};
use crate::flash::Flash;
use crate::services::tournament::TournamentBoard;

fn challenge_card(link: &UserChallenge, profile_id: i64) -> String {
    let challenge = &link.challenge;
    let mut html = format!(
        r#"<div class="card"><h3>{} <span class="badge status-{}">{}</span></h3><p>{}</p><p class="muted">Level {} · {}</p>"#,
        escape(&challenge.title),
        link.status.as_str(),
        link.status.as_str(),
        escape(&challenge.task_details),
        challenge.level_requirement,
        if challenge.is_user_created {
            "Promotion on completion".to_owned()
        } else {
            format!("{} XP", challenge.xp_reward)
        },
    );
    if let Some(limit) = &challenge.time_limit {
        let _ = write!(html, r#"<p class="muted">Time limit: {}</p>"#, escape(limit));
    }
    if challenge.is_milestone_challenge {
        html.push_str(r#"<p><span class="badge">Milestone</span></p>"#);
    }
    if let Some(started) = link.started_at {
        let _ = write!(html, r#"<p class="muted">Started {}</p>"#, started.format("%Y-%m-%d %H:%M"));
    }

    match link.status {
        ChallengeStatus::Unlocked => {
            html.push_str(&post_button(&format!("/challenges/start/{}", link.id), "Start", ""));
            html.push(' ');
            html.push_str(&post_button(
                &format!("/challenges/complete/{}", link.id),
                "Complete",
                "secondary",
            ));
        }
        ChallengeStatus::Active => {
            html.push_str(&post_button(
                &format!("/challenges/complete/{}", link.id),
                "Complete",
                "",
            ));
        }
        ChallengeStatus::Locked | ChallengeStatus::Completed => {}
    }
    if challenge.owned_by(profile_id) {
        let _ = write!(
            html,
            r#" <a class="button secondary" href="/challenges/edit/{}">Edit</a> {}"#,
            challenge.id,
            post_button(&format!("/challenges/delete/{}", challenge.id), "Delete", "danger"),
        );
    }
    html.push_str("</div>");
    html
}

fn badge_html(earned: &EarnedBadge) -> String {
    format!(
        r#"<div class="stat"><i class="fas {}" style="color: {}; font-size: 2rem"></i><div class="value">{}</div><div class="label">{}</div><div class="muted">{}</div></div>"#,
        attr(&earned.badge.icon),
        attr(&earned.badge.color),
        escape(&earned.badge.name),
        escape(&earned.badge.description),
        earned.date_earned.format("%Y-%m-%d"),
    )
}

#[must_use]
pub fn page(board: &TournamentBoard, flashes: &[Flash]) -> String {
    let progress = &board.progress;
    let mut content = format!(
        r#"<h1>Tournament</h1><div class="card"><h2>Level {} <span class="badge">{}</span></h2>{}<p class="muted">{} XP · {}% to level {} ({} XP)</p></div>"#,
        progress.level,
        escape(&board.rank.to_string()),
        progress_bar(progress.percentage),
        progress.experience_points,
        progress.percentage,
        progress.level + 1,
        progress.xp_for_next_level,
    );
    let _ = write!(
        content,
        r#"<div class="stats">{}{}{}{}</div>"#,
        stat("Rank", &board.rank),
        stat("Challenges completed", board.completed),
        stat("Active challenges", board.active),
        stat("Badges earned", board.badges_earned),
    );

    content.push_str("<h2>Challenges</h2><div class=\"grid\">");
    for link in &board.challenges {
        content.push_str(&challenge_card(link, board.profile.id));
    }
    content.push_str("</div>");

    content.push_str("<h2>Badges</h2>");
    if board.badges.is_empty() {
        content.push_str(r#"<p class="muted">Complete milestone challenges to earn badges.</p>"#);
    } else {
        content.push_str(r#"<div class="stats">"#);
        for earned in &board.badges {
            content.push_str(&badge_html(earned));
        }
        content.push_str("</div>");
    }

    content.push_str(
        r#"<div class="card"><h2>Create your own challenge</h2><form method="post" action="/challenges/create">
<label>Title</label><input name="title" required>
<label>Task details</label><textarea name="task_details" rows="2" required></textarea>
<label>Level requirement</label><input name="level_requirement" type="number" min="1" value="1" required>
<label>XP reward</label><input name="xp_reward" type="number" min="1" value="50" required>
<label>Time limit</label><input name="time_limit" placeholder="e.g. 7 days">
<button type="submit">Create challenge</button></form></div>"#,
    );

    layout("Tournament", Some(NavPage::Tournament), flashes, &content)
}

#[must_use]
pub fn edit_page(challenge: &Challenge, flashes: &[Flash]) -> String {
    let content = format!(
        r#"<h1>Edit challenge</h1><div class="card"><form method="post" action="/challenges/edit/{id}">
<label>Title</label><input name="title" value="{title}" required>
<label>Task details</label><textarea name="task_details" rows="3" required>{details}</textarea>
<label>Level requirement</label><input name="level_requirement" type="number" min="1" value="{level}" required>
<label>XP reward</label><input name="xp_reward" type="number" min="1" value="{xp}" required>
<label>Time limit</label><input name="time_limit" value="{limit}">
<button type="submit">Save</button> <a class="button secondary" href="/tournament">Cancel</a>
</form></div>"#,
        id = challenge.id,
        title = attr(&challenge.title),
        details = escape(&challenge.task_details),
        level = challenge.level_requirement,
        xp = challenge.xp_reward,
        limit = attr(challenge.time_limit.as_deref().unwrap_or_default()),
    );
    layout("Edit challenge", Some(NavPage::Tournament), flashes, &content)
}
