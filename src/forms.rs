// ABOUTME: Helpers for reading urlencoded and multipart form submissions
// ABOUTME: Empty values count as missing; file parts are streamed to disk, never buffered whole
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use axum::extract::multipart::Field;
use axum::extract::Multipart;
use calisthenics_core::constants::formats::{FORM_DATE, FORM_DATETIME, FORM_TIME};
use calisthenics_core::errors::{AppError, AppResult, ErrorCode};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::media::{StoredFile, UploadStore};

/// Submitted text fields
#[derive(Debug, Clone, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
}

impl From<HashMap<String, String>> for FormData {
    fn from(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }
}

impl FormData {
    /// Non-empty value of a field
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Owned non-empty value of a field
    #[must_use]
    pub fn optional(&self, name: &str) -> Option<String> {
        self.text(name).map(ToOwned::to_owned)
    }

    /// Whether every named field has a non-empty value
    #[must_use]
    pub fn has_all(&self, names: &[&str]) -> bool {
        names.iter().all(|name| self.text(name).is_some())
    }

    /// Non-empty value or a `MissingRequiredField` error carrying `message`
    ///
    /// # Errors
    ///
    /// Returns an error when the field is absent or empty
    pub fn required(&self, name: &str, message: &str) -> AppResult<String> {
        self.optional(name)
            .ok_or_else(|| AppError::new(ErrorCode::MissingRequiredField, message))
    }

    /// Parse an optional field
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` when a value is present but does not parse
    pub fn parse<T: FromStr>(&self, name: &str, label: &str) -> AppResult<Option<T>> {
        self.text(name)
            .map(|v| {
                v.trim()
                    .parse::<T>()
                    .map_err(|_| AppError::new(ErrorCode::InvalidFormat, format!("{label} must be a number.")))
            })
            .transpose()
    }

    /// Parse an optional `YYYY-MM-DD` field
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` when the value is not a date
    pub fn date(&self, name: &str) -> AppResult<Option<NaiveDate>> {
        self.text(name)
            .map(|v| {
                NaiveDate::parse_from_str(v, FORM_DATE).map_err(|_| {
                    AppError::new(ErrorCode::InvalidFormat, "Invalid date format. Use YYYY-MM-DD.")
                })
            })
            .transpose()
    }

    /// Parse an optional `HH:MM` field
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` when the value is not a time
    pub fn time(&self, name: &str) -> AppResult<Option<NaiveTime>> {
        self.text(name)
            .map(|v| {
                NaiveTime::parse_from_str(v, FORM_TIME).map_err(|_| {
                    AppError::new(ErrorCode::InvalidFormat, "Invalid time format. Use HH:MM.")
                })
            })
            .transpose()
    }

    /// Parse an optional `YYYY-MM-DDTHH:MM` field
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` when the value is not a date and time
    pub fn datetime(&self, name: &str) -> AppResult<Option<NaiveDateTime>> {
        self.text(name)
            .map(|v| {
                NaiveDateTime::parse_from_str(v, FORM_DATETIME).map_err(|_| {
                    AppError::new(ErrorCode::InvalidFormat, "Invalid date and time format.")
                })
            })
            .transpose()
    }
}

/// A file part of a multipart submission, spooled to disk
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field: String,
    /// Client-supplied name; empty when the input was left blank
    pub file_name: String,
    pub content_type: Option<String>,
    /// Received contents; `None` for a blank input
    pub spool_path: Option<PathBuf>,
    pub size_bytes: u64,
}

impl UploadedFile {
    /// Whether the browser actually sent a file for this input
    #[must_use]
    pub fn is_selected(&self) -> bool {
        !self.file_name.is_empty() && self.spool_path.is_some()
    }

    /// Move the received contents into `dir` of the upload store
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` for a blank input and a storage error
    /// when the file cannot be moved
    pub async fn persist(&self, store: &UploadStore, dir: &str) -> AppResult<StoredFile> {
        let spooled = self
            .spool_path
            .as_deref()
            .ok_or_else(|| AppError::new(ErrorCode::MissingRequiredField, "No selected file."))?;
        store.persist(dir, &self.file_name, spooled).await
    }
}

/// A multipart submission with its file parts streamed to the spool directory
///
/// Spooled files that were never persisted are deleted when the form is dropped.
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: FormData,
    pub files: Vec<UploadedFile>,
}

impl MultipartForm {
    /// Read every part; parts with a file name are files, the rest text fields
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the body is not valid multipart data or exceeds
    /// the request body limit, and a storage error when a part cannot be spooled
    pub async fn read(mut multipart: Multipart, store: &UploadStore) -> AppResult<Self> {
        let mut form = Self::default();
        let mut fields = HashMap::new();

        while let Some(mut field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::invalid_input(format!("Malformed upload: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_owned();
            if let Some(file_name) = field.file_name().map(ToOwned::to_owned) {
                let content_type = field.content_type().map(ToOwned::to_owned);
                let (spool_path, size_bytes) = if file_name.is_empty() {
                    (None, 0)
                } else {
                    let path = store.spool_path();
                    let size = spool_field(&mut field, &path).await?;
                    (Some(path), size)
                };
                form.files.push(UploadedFile {
                    field: name,
                    file_name,
                    content_type,
                    spool_path,
                    size_bytes,
                });
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::invalid_input(format!("Malformed form field: {e}")))?;
                fields.insert(name, value);
            }
        }

        form.fields = FormData::from(fields);
        Ok(form)
    }

    /// Selected files submitted under `field`
    pub fn files_named<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a UploadedFile> + 'a {
        self.files
            .iter()
            .filter(move |f| f.field == field && f.is_selected())
    }

    /// First file part submitted under `field`, selected or not
    #[must_use]
    pub fn file(&self, field: &str) -> Option<&UploadedFile> {
        self.files.iter().find(|f| f.field == field)
    }
}

impl Drop for MultipartForm {
    fn drop(&mut self) {
        for path in self.files.iter().filter_map(|f| f.spool_path.as_ref()) {
            match std::fs::remove_file(path) {
                Ok(()) => debug!(path = %path.display(), "Discarded unused upload"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to discard upload"),
            }
        }
    }
}

/// Stream one part into `path` chunk by chunk, returning the bytes written
///
/// A partially written file is removed when the part fails.
async fn spool_field(field: &mut Field<'_>, path: &Path) -> AppResult<u64> {
    match write_chunks(field, path).await {
        Ok(size) => Ok(size),
        Err(e) => {
            if let Err(remove) = tokio::fs::remove_file(path).await {
                debug!(path = %path.display(), error = %remove, "No partial upload to remove");
            }
            Err(e)
        }
    }
}

async fn write_chunks(field: &mut Field<'_>, path: &Path) -> AppResult<u64> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::storage(format!("Failed to create {}: {e}", parent.display())))?;
    }
    let mut file = File::create(path)
        .await
        .map_err(|e| AppError::storage(format!("Failed to create {}: {e}", path.display())))?;

    let mut size = 0u64;
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::invalid_input(format!("Upload failed: {e}")))?
    {
        file.write_all(&chunk)
            .await
            .map_err(|e| AppError::storage(format!("Failed to write {}: {e}", path.display())))?;
        size += chunk.len() as u64;
    }
    file.flush()
        .await
        .map_err(|e| AppError::storage(format!("Failed to write {}: {e}", path.display())))?;
    Ok(size)
}
