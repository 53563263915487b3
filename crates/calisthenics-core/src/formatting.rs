// ABOUTME: Text formatting helpers for durations, file names and decimals
// ABOUTME: Produces the exact strings shown on pages and written to exports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use crate::constants::uploads::FALLBACK_FILE_NAME;

/// Format whole seconds as `MM:SS`, or `HH:MM:SS` once an hour is reached
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

/// Reduce a client-supplied file name to a safe ASCII name
///
/// Path separators and whitespace become `_`, anything outside `[A-Za-z0-9_.-]`
/// is dropped and leading or trailing `.`/`_` are trimmed. May return an empty
/// string; see [`secure_filename_or_default`].
#[must_use]
pub fn secure_filename(name: &str) -> String {
    let spaced: String = name
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    kept.trim_matches(|c| c == '.' || c == '_').to_owned()
}

/// [`secure_filename`] with a fallback for names that sanitize to nothing
#[must_use]
pub fn secure_filename_or_default(name: &str) -> String {
    let cleaned = secure_filename(name);
    if cleaned.is_empty() {
        FALLBACK_FILE_NAME.to_owned()
    } else {
        cleaned
    }
}

/// Format a float the way a person reads it back: integral values keep one decimal
#[must_use]
pub fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(75), "01:15");
        assert_eq!(format_duration(3599), "59:59");
        assert_eq!(format_duration(3661), "01:01:01");
    }

    #[test]
    fn test_secure_filename() {
        assert_eq!(secure_filename("My Video.mp4"), "My_Video.mp4");
        assert_eq!(secure_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(secure_filename("héllo wörld.png"), "hllo_wrld.png");
        assert_eq!(secure_filename("..."), "");
        assert_eq!(secure_filename_or_default("..."), "upload");
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(183.0), "183.0");
        assert_eq!(format_decimal(75.2), "75.2");
        assert_eq!(format_decimal(18.25), "18.25");
    }
}
