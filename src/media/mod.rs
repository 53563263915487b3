// ABOUTME: Upload storage below the static root plus the video processing seam
// ABOUTME: Stored paths are relative to the static root so they double as /static URLs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

//! # Media
//!
//! Uploaded files are written below the static root into one directory per
//! domain (`uploads/goals`, `uploads/motivation`, `uploads/videos`,
//! `uploads/thumbnails`). Every stored name is prefixed with a random hex id so
//! two uploads of `clip.mp4` never collide. Request bodies are streamed into
//! `uploads/tmp` first and renamed into place once the handler accepts them.

pub mod processor;

pub use processor::{FfmpegProcessor, VideoProcessor};

use std::path::{Component, Path, PathBuf};

use calisthenics_core::constants::uploads::{
    GOALS_DIR, MOTIVATION_DIR, SPOOL_DIR, STATIC_URL_PREFIX, THUMBNAILS_DIR, VIDEOS_DIR,
};
use calisthenics_core::errors::{AppError, AppResult};
use calisthenics_core::formatting::secure_filename_or_default;
use tracing::{debug, warn};
use uuid::Uuid;

/// A file written below the static root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Path relative to the static root, `/`-separated
    pub relative_path: String,
    pub absolute_path: PathBuf,
    pub size_bytes: u64,
}

/// Writes and removes uploaded files under the static root
#[derive(Debug, Clone)]
pub struct UploadStore {
    static_root: PathBuf,
}

impl UploadStore {
    #[must_use]
    pub fn new(static_root: impl Into<PathBuf>) -> Self {
        Self {
            static_root: static_root.into(),
        }
    }

    #[must_use]
    pub fn static_root(&self) -> &Path {
        &self.static_root
    }

    /// Create every upload directory
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created
    pub async fn ensure_directories(&self) -> AppResult<()> {
        for dir in [GOALS_DIR, MOTIVATION_DIR, VIDEOS_DIR, THUMBNAILS_DIR, SPOOL_DIR] {
            let path = self.static_root.join(dir);
            tokio::fs::create_dir_all(&path).await.map_err(|e| {
                AppError::storage(format!("Failed to create {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }

    /// Collision-free stored name for a client-supplied file name
    #[must_use]
    pub fn unique_name(original_name: &str) -> String {
        format!(
            "{}_{}",
            Uuid::new_v4().simple(),
            secure_filename_or_default(original_name)
        )
    }

    /// Fresh location for an incoming file part
    #[must_use]
    pub fn spool_path(&self) -> PathBuf {
        self.static_root
            .join(SPOOL_DIR)
            .join(format!("{}.part", Uuid::new_v4().simple()))
    }

    /// Move a spooled file into `dir` under a unique name derived from `original_name`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file cannot be moved or inspected
    pub async fn persist(&self, dir: &str, original_name: &str, spooled: &Path) -> AppResult<StoredFile> {
        let relative_path = format!("{dir}/{}", Self::unique_name(original_name));
        let absolute_path = self.static_root.join(&relative_path);

        tokio::fs::rename(spooled, &absolute_path).await.map_err(|e| {
            AppError::storage(format!("Failed to store {}: {e}", absolute_path.display()))
        })?;
        let size_bytes = tokio::fs::metadata(&absolute_path)
            .await
            .map_err(|e| AppError::storage(format!("Failed to inspect {}: {e}", absolute_path.display())))?
            .len();

        debug!(path = %relative_path, bytes = size_bytes, "Stored upload");
        Ok(StoredFile {
            relative_path,
            absolute_path,
            size_bytes,
        })
    }

    /// Absolute location of a stored relative path
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for absolute paths or paths that climb out of the root
    pub fn resolve(&self, relative_path: &str) -> AppResult<PathBuf> {
        let relative = Path::new(relative_path);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(AppError::invalid_input(format!(
                "Refusing path outside the static root: {relative_path}"
            )));
        }
        Ok(self.static_root.join(relative))
    }

    /// Remove a stored file; a file that is already gone is not an error
    ///
    /// Failures are logged and swallowed so a broken file never blocks deleting its row.
    pub async fn remove(&self, relative_path: &str) {
        let path = match self.resolve(relative_path) {
            Ok(path) => path,
            Err(e) => {
                warn!(error = %e, "Skipping file removal");
                return;
            }
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => debug!(path = %relative_path, "Removed upload"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %relative_path, error = %e, "Failed to remove upload"),
        }
    }
}

/// Public URL of a path relative to the static root
#[must_use]
pub fn static_url(relative_path: &str) -> String {
    format!("{STATIC_URL_PREFIX}/{}", relative_path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_name_keeps_secure_suffix() {
        let name = UploadStore::unique_name("My Photo.JPG");
        let (prefix, rest) = name.split_once('_').expect("separator");
        assert_eq!(prefix.len(), 32);
        assert_eq!(rest, "My_Photo.JPG");
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let store = UploadStore::new("/srv/static");
        assert!(store.resolve("../etc/passwd").is_err());
        assert!(store.resolve("/etc/passwd").is_err());
        assert_eq!(
            store.resolve("uploads/videos/a.mp4").expect("inside root"),
            PathBuf::from("/srv/static/uploads/videos/a.mp4")
        );
    }

    #[test]
    fn test_static_url() {
        assert_eq!(static_url("uploads/goals/x.png"), "/static/uploads/goals/x.png");
    }

    #[tokio::test]
    async fn test_persist_and_remove() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = UploadStore::new(dir.path());
        store.ensure_directories().await.expect("dirs");

        let spooled = store.spool_path();
        assert!(spooled.starts_with(dir.path().join(SPOOL_DIR)));
        tokio::fs::write(&spooled, b"data").await.expect("spool");

        let stored = store
            .persist(VIDEOS_DIR, "clip.mp4", &spooled)
            .await
            .expect("persist");
        assert!(stored.relative_path.starts_with("uploads/videos/"));
        assert!(stored.relative_path.ends_with("_clip.mp4"));
        assert_eq!(stored.size_bytes, 4);
        assert!(stored.absolute_path.exists());
        assert!(!spooled.exists());

        store.remove(&stored.relative_path).await;
        assert!(!stored.absolute_path.exists());
        // Second removal is a no-op
        store.remove(&stored.relative_path).await;
    }
}
