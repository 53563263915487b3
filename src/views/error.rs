// ABOUTME: Error page shown for rejected and failed requests
// ABOUTME: Renders the status code and a message inside the shared layout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use axum::http::StatusCode;

use super::{escape, layout};

/// Full error page for `status`
#[must_use]
pub fn render(status: StatusCode, message: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    let content = format!(
        r#"<div class="card"><h1>{} {}</h1><p>{}</p><a class="button" href="/">Back to home</a></div>"#,
        status.as_u16(),
        escape(reason),
        escape(message)
    );
    layout(reason, None, &[], &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_page() {
        let html = render(StatusCode::NOT_FOUND, "Workout not found");
        assert!(html.contains("<h1>404 Not Found</h1>"));
        assert!(html.contains("Workout not found"));
    }
}
