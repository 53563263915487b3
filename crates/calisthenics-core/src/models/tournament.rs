// ABOUTME: Tournament models: challenges, per-user challenge links and badges
// ABOUTME: Challenge status transitions for starting and completing a challenge
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

//! Tournament models.
//!
//! A [`Challenge`] is a task definition; a [`UserChallenge`] links it to the
//! profile and tracks its lifecycle:
//!
//! ```text
//! locked ──unlock──> unlocked ──start──> active
//!    │                   │                 │
//!    └──start────────────┘                 │
//!                        └──complete──> completed <──complete──┘
//! ```
//!
//! `completed` is terminal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Lifecycle of a challenge for the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeStatus {
    Locked,
    Unlocked,
    Active,
    Completed,
}

impl ChallengeStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::Unlocked => "unlocked",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Parse from the stored text
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a known status
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "locked" => Ok(Self::Locked),
            "unlocked" => Ok(Self::Unlocked),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(AppError::invalid_input(format!(
                "Unknown challenge status: {other}"
            ))),
        }
    }

    /// Status after starting, given the profile level and the challenge's requirement
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` when the challenge is already active or completed and
    /// `PermissionDenied` when the level requirement is not met
    pub fn start(self, level: i64, level_requirement: i64) -> AppResult<Self> {
        match self {
            Self::Locked | Self::Unlocked if level >= level_requirement => Ok(Self::Active),
            Self::Locked | Self::Unlocked => Err(AppError::permission_denied(
                "You do not meet the level requirement for this challenge.",
            )),
            Self::Active => Err(AppError::invalid_state("Challenge is already active.")),
            Self::Completed => Err(AppError::invalid_state("Challenge is already completed.")),
        }
    }

    /// Status after completing
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the challenge is unlocked or active
    pub fn complete(self) -> AppResult<Self> {
        match self {
            Self::Unlocked | Self::Active => Ok(Self::Completed),
            Self::Locked => Err(AppError::invalid_state("Challenge is still locked.")),
            Self::Completed => Err(AppError::invalid_state("Challenge is already completed.")),
        }
    }

    /// Whether a locked challenge can be unlocked at this level
    #[must_use]
    pub fn unlockable(self, level: i64, level_requirement: i64) -> bool {
        self == Self::Locked && level_requirement <= level
    }
}

/// A challenge definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: i64,
    pub title: String,
    pub level_requirement: i64,
    pub xp_reward: i64,
    pub task_details: String,
    pub time_limit: Option<String>,
    pub is_user_created: bool,
    /// Creator of a user-created challenge
    pub user_id: Option<i64>,
    pub is_milestone_challenge: bool,
    pub awards_badge_id: Option<i64>,
}

impl Challenge {
    /// Whether the profile may edit or delete this challenge
    #[must_use]
    pub fn owned_by(&self, user_id: i64) -> bool {
        self.is_user_created && self.user_id == Some(user_id)
    }
}

/// Challenge form input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeInput {
    pub title: String,
    pub task_details: String,
    pub level_requirement: i64,
    pub xp_reward: i64,
    pub time_limit: Option<String>,
}

/// A challenge linked to the profile, with its definition joined in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserChallenge {
    pub id: i64,
    pub user_id: i64,
    pub challenge_id: i64,
    pub status: ChallengeStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub challenge: Challenge,
}

/// A badge definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Font Awesome icon class
    pub icon: String,
    /// CSS colour
    pub color: String,
    pub challenges_required: i64,
}

/// Badge definition to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBadge {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub challenges_required: i64,
}

/// A badge awarded to the profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarnedBadge {
    pub id: i64,
    pub user_id: i64,
    pub date_earned: DateTime<Utc>,
    pub badge: Badge,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_requires_level() {
        assert_eq!(ChallengeStatus::Unlocked.start(5, 5).ok(), Some(ChallengeStatus::Active));
        assert_eq!(ChallengeStatus::Locked.start(6, 5).ok(), Some(ChallengeStatus::Active));
        let denied = ChallengeStatus::Unlocked.start(4, 5);
        assert!(matches!(
            denied,
            Err(ref e) if e.code == crate::errors::ErrorCode::PermissionDenied
        ));
        assert!(ChallengeStatus::Active.start(10, 1).is_err());
        assert!(ChallengeStatus::Completed.start(10, 1).is_err());
    }

    #[test]
    fn test_complete_transitions() {
        assert_eq!(ChallengeStatus::Unlocked.complete().ok(), Some(ChallengeStatus::Completed));
        assert_eq!(ChallengeStatus::Active.complete().ok(), Some(ChallengeStatus::Completed));
        assert!(ChallengeStatus::Locked.complete().is_err());
        assert!(ChallengeStatus::Completed.complete().is_err());
    }

    #[test]
    fn test_unlockable() {
        assert!(ChallengeStatus::Locked.unlockable(3, 3));
        assert!(!ChallengeStatus::Locked.unlockable(2, 3));
        assert!(!ChallengeStatus::Active.unlockable(9, 3));
    }

    #[test]
    fn test_owned_by() {
        let challenge = Challenge {
            id: 1,
            title: "Custom".into(),
            level_requirement: 1,
            xp_reward: 50,
            task_details: "Do it".into(),
            time_limit: None,
            is_user_created: true,
            user_id: Some(7),
            is_milestone_challenge: false,
            awards_badge_id: None,
        };
        assert!(challenge.owned_by(7));
        assert!(!challenge.owned_by(8));
    }
}
