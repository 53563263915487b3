// ABOUTME: Motivation board items (quotes, books, stories) with optional cover image
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Whether `url` is an absolute `http` or `https` link
#[must_use]
pub fn is_web_url(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    ["http://", "https://"]
        .iter()
        .any(|scheme| lower.len() > scheme.len() && lower.starts_with(scheme))
}

/// Accept an optional source link only when it is a web URL
///
/// # Errors
///
/// Returns `InvalidInput` for any other scheme
pub fn validate_source_url(url: Option<String>) -> AppResult<Option<String>> {
    match url.map(|u| u.trim().to_owned()).filter(|u| !u.is_empty()) {
        Some(u) if !is_web_url(&u) => Err(AppError::invalid_input(
            "Source URL must start with http:// or https://.",
        )),
        other => Ok(other),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotivationItem {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub author: Option<String>,
    pub source_url: Option<String>,
    /// Path relative to the static root
    pub cover_image_path: Option<String>,
    pub is_favorite: bool,
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMotivationItem {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub author: Option<String>,
    pub source_url: Option<String>,
    pub cover_image_path: Option<String>,
    pub user_id: i64,
}

impl MotivationItem {
    /// The source link, if it is safe to render as a web link
    #[must_use]
    pub fn web_source_url(&self) -> Option<&str> {
        self.source_url.as_deref().filter(|u| is_web_url(u))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_web_urls_are_accepted() {
        assert!(is_web_url("https://example.com/book"));
        assert!(is_web_url("HTTP://example.com"));
        assert!(!is_web_url("javascript:alert(1)"));
        assert!(!is_web_url(" JavaScript:alert(1)"));
        assert!(!is_web_url("data:text/html,hi"));
        assert!(!is_web_url("https://"));
    }

    #[test]
    fn test_validate_source_url() {
        assert_eq!(validate_source_url(None).ok(), Some(None));
        assert_eq!(validate_source_url(Some("  ".into())).ok(), Some(None));
        assert_eq!(
            validate_source_url(Some(" https://a.example ".into())).ok(),
            Some(Some("https://a.example".into()))
        );
        assert!(validate_source_url(Some("javascript:alert(1)".into())).is_err());
    }
}
