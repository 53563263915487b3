// ABOUTME: One-shot flash notices carried across redirects in a cookie
// ABOUTME: Extractor reads pending notices; redirects store them, page renders clear them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

//! # Flash messages
//!
//! A mutation handler pushes notices and answers with a `303 See Other`; the
//! notices travel in the `flash` cookie as base64 encoded JSON pairs
//! `[[category, message], ...]`. The next page render shows them and expires
//! the cookie. Notices already waiting in the cookie are kept when another
//! redirect happens before a page is rendered.

use std::convert::Infallible;
use std::fmt;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, LOCATION, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use calisthenics_core::constants::cookies::FLASH;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Visual category of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Danger,
    Info,
    Warning,
}

impl FlashCategory {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

/// A single notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

impl Flash {
    pub fn new(category: FlashCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Success, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Danger, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Warning, message)
    }
}

impl fmt::Display for Flash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category.as_str(), self.message)
    }
}

/// Encode notices into the cookie value
#[must_use]
pub fn encode(flashes: &[Flash]) -> String {
    let pairs: Vec<(FlashCategory, &str)> = flashes
        .iter()
        .map(|f| (f.category, f.message.as_str()))
        .collect();
    // Serializing a Vec of (enum, &str) cannot fail
    let json = serde_json::to_vec(&pairs).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Decode a cookie value; anything unreadable yields no notices
#[must_use]
pub fn decode(value: &str) -> Vec<Flash> {
    let Ok(bytes) = URL_SAFE_NO_PAD.decode(value.trim()) else {
        debug!("Ignoring undecodable flash cookie");
        return Vec::new();
    };
    serde_json::from_slice::<Vec<(FlashCategory, String)>>(&bytes)
        .map(|pairs| {
            pairs
                .into_iter()
                .map(|(category, message)| Flash { category, message })
                .collect()
        })
        .unwrap_or_default()
}

/// Value of a named cookie in the request headers
#[must_use]
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name).then_some(value)
        })
}

fn set_cookie(flashes: &[Flash]) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{FLASH}={}; Path=/; HttpOnly; SameSite=Lax",
        encode(flashes)
    ))
    .ok()
}

fn expire_cookie() -> HeaderValue {
    HeaderValue::from_static("flash=; Path=/; Max-Age=0")
}

/// Notices pending for this request
///
/// Extracting never fails; a missing or corrupt cookie means no notices.
#[derive(Debug, Clone, Default)]
pub struct Flashes {
    messages: Vec<Flash>,
    from_cookie: bool,
}

impl Flashes {
    /// Pending notices from the request headers
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        cookie_value(headers, FLASH).map_or_else(Self::default, |value| Self {
            messages: decode(value),
            from_cookie: true,
        })
    }

    /// Queue a notice
    pub fn push(&mut self, flash: Flash) {
        self.messages.push(flash);
    }

    #[must_use]
    pub fn messages(&self) -> &[Flash] {
        &self.messages
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// `303 See Other` to `location` carrying every pending notice
    #[must_use]
    pub fn redirect(self, location: &str) -> Response {
        let mut response = StatusCode::SEE_OTHER.into_response();
        let headers = response.headers_mut();
        match HeaderValue::from_str(location) {
            Ok(value) => {
                headers.insert(LOCATION, value);
            }
            Err(_) => {
                headers.insert(LOCATION, HeaderValue::from_static("/"));
            }
        }
        if !self.messages.is_empty() {
            if let Some(cookie) = set_cookie(&self.messages) {
                headers.insert(SET_COOKIE, cookie);
            }
        } else if self.from_cookie {
            headers.insert(SET_COOKIE, expire_cookie());
        }
        response
    }

    /// Answer with a rendered page; the notices are consumed and the cookie expired
    #[must_use]
    pub fn render(self, status: StatusCode, html: String) -> Response {
        let mut response = (status, Html(html)).into_response();
        if self.from_cookie {
            response.headers_mut().insert(SET_COOKIE, expire_cookie());
        }
        response
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Flashes
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value_roundtrip() {
        let flashes = vec![
            Flash::success("Workout added successfully!"),
            Flash::danger("Workout \"Push-up\" already exists."),
        ];
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("theme=dark; flash={}", encode(&flashes)))
                .expect("header"),
        );
        let pending = Flashes::from_headers(&headers);
        assert_eq!(pending.messages(), flashes.as_slice());
    }

    #[test]
    fn test_corrupt_cookie_is_ignored() {
        assert!(decode("%%%").is_empty());
        assert!(decode(&URL_SAFE_NO_PAD.encode("not json")).is_empty());
    }

    #[test]
    fn test_redirect_keeps_existing_notices() {
        let mut flashes = Flashes {
            messages: vec![Flash::info("Welcome!")],
            from_cookie: true,
        };
        flashes.push(Flash::success("Saved"));
        let response = flashes.redirect("/health");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/health");
        let cookie = response.headers()[SET_COOKIE].to_str().expect("ascii");
        let value = cookie
            .strip_prefix("flash=")
            .and_then(|rest| rest.split(';').next())
            .expect("flash value");
        let carried = decode(value);
        assert_eq!(carried.len(), 2);
        assert_eq!(carried[0].message, "Welcome!");
        assert_eq!(carried[1].category, FlashCategory::Success);
    }

    #[test]
    fn test_render_expires_cookie_only_when_present() {
        let fresh = Flashes::default().render(StatusCode::OK, String::new());
        assert!(fresh.headers().get(SET_COOKIE).is_none());

        let pending = Flashes {
            messages: vec![Flash::warning("x")],
            from_cookie: true,
        };
        let response = pending.render(StatusCode::OK, String::new());
        assert_eq!(response.headers()[SET_COOKIE], "flash=; Path=/; Max-Age=0");
    }
}
