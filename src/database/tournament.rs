// ABOUTME: Database operations for challenges, per-profile challenge links and badges
// ABOUTME: Challenge completion applies rewards, badges and milestone unlocks in one transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use calisthenics_core::errors::{AppError, AppResult};
use calisthenics_core::leveling::{apply_completion, CompletionOutcome, Reward};
use calisthenics_core::models::{
    Badge, Challenge, ChallengeInput, ChallengeStatus, EarnedBadge, NewBadge, UserChallenge,
    UserProfile,
};
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use tracing::{debug, info};

use super::Database;

const CHALLENGE_COLUMNS: &str = "c.id AS c_id, c.title, c.level_requirement, c.xp_reward, \
     c.task_details, c.time_limit, c.is_user_created, c.user_id AS c_user_id, \
     c.is_milestone_challenge, c.awards_badge_id";

const BADGE_COLUMNS: &str =
    "b.id AS b_id, b.name, b.description, b.icon, b.color, b.challenges_required";

/// A milestone challenge made available by a completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockedMilestone {
    pub challenge_id: i64,
    pub title: String,
}

/// Everything a challenge completion changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRecord {
    pub challenge_title: String,
    pub user_created: bool,
    pub outcome: CompletionOutcome,
    /// Set when the completion awarded a badge for the first time
    pub badge: Option<Badge>,
    pub milestones: Vec<UnlockedMilestone>,
}

impl Database {
    pub(super) async fn migrate_tournament(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS badges (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                description TEXT NOT NULL,
                icon TEXT NOT NULL DEFAULT 'fa-shield-alt',
                color TEXT NOT NULL DEFAULT '#c0c0c0',
                challenges_required INTEGER NOT NULL DEFAULT 1
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS challenges (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                level_requirement INTEGER NOT NULL DEFAULT 1,
                xp_reward INTEGER NOT NULL DEFAULT 50,
                task_details TEXT NOT NULL,
                time_limit TEXT,
                is_user_created BOOLEAN NOT NULL DEFAULT 0,
                user_id INTEGER REFERENCES user_profile(id),
                is_milestone_challenge BOOLEAN NOT NULL DEFAULT 0,
                awards_badge_id INTEGER REFERENCES badges(id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_challenges (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES user_profile(id),
                challenge_id INTEGER NOT NULL REFERENCES challenges(id),
                status TEXT NOT NULL DEFAULT 'locked' CHECK (status IN ('locked', 'unlocked', 'active', 'completed')),
                started_at TEXT,
                UNIQUE(user_id, challenge_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_badges (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES user_profile(id),
                badge_id INTEGER NOT NULL REFERENCES badges(id),
                date_earned TEXT NOT NULL,
                UNIQUE(user_id, badge_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ========================================================================
    // Badges
    // ========================================================================

    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` when the name is taken, or a database error
    pub async fn create_badge(&self, badge: &NewBadge) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO badges (name, description, icon, color, challenges_required)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(&badge.name)
        .bind(&badge.description)
        .bind(&badge.icon)
        .bind(&badge.color)
        .bind(badge.challenges_required)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn find_badge_by_name(&self, name: &str) -> AppResult<Option<Badge>> {
        let row = sqlx::query(&format!("SELECT {BADGE_COLUMNS} FROM badges b WHERE b.name = $1"))
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get badge: {e}")))?;

        row.as_ref().map(row_to_badge).transpose()
    }

    /// Badges earned by the profile ordered by their challenge requirement
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_earned_badges(&self, user_id: i64) -> AppResult<Vec<EarnedBadge>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT ub.id, ub.user_id, ub.date_earned, {BADGE_COLUMNS}
            FROM user_badges ub
            JOIN badges b ON b.id = ub.badge_id
            WHERE ub.user_id = $1
            ORDER BY b.challenges_required ASC, b.id ASC
            "
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list earned badges: {e}")))?;

        rows.iter()
            .map(|row| {
                Ok(EarnedBadge {
                    id: row.try_get("id")?,
                    user_id: row.try_get("user_id")?,
                    date_earned: row.try_get("date_earned")?,
                    badge: row_to_badge(row)?,
                })
            })
            .collect()
    }

    // ========================================================================
    // Challenges
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_challenge(&self, id: i64) -> AppResult<Option<Challenge>> {
        let row = sqlx::query(&format!("SELECT {CHALLENGE_COLUMNS} FROM challenges c WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get challenge: {e}")))?;

        row.as_ref().map(row_to_challenge).transpose()
    }

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn find_challenge_by_title(&self, title: &str) -> AppResult<Option<Challenge>> {
        let row = sqlx::query(&format!(
            "SELECT {CHALLENGE_COLUMNS} FROM challenges c WHERE c.title = $1 ORDER BY c.id LIMIT 1"
        ))
        .bind(title)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get challenge: {e}")))?;

        row.as_ref().map(row_to_challenge).transpose()
    }

    /// Insert a built-in challenge, optionally a milestone awarding a badge
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_system_challenge(
        &self,
        input: &ChallengeInput,
        is_milestone: bool,
        awards_badge_id: Option<i64>,
    ) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO challenges
                (title, level_requirement, xp_reward, task_details, time_limit,
                 is_user_created, is_milestone_challenge, awards_badge_id)
            VALUES ($1, $2, $3, $4, $5, 0, $6, $7)
            ",
        )
        .bind(&input.title)
        .bind(input.level_requirement)
        .bind(input.xp_reward)
        .bind(&input.task_details)
        .bind(input.time_limit.as_deref())
        .bind(is_milestone)
        .bind(awards_badge_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create challenge: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// Insert a challenge owned by the profile together with an unlocked link to it
    ///
    /// # Errors
    ///
    /// Returns an error if either insert fails; nothing is written in that case
    pub async fn create_user_challenge(&self, user_id: i64, input: &ChallengeInput) -> AppResult<i64> {
        let mut tx = self.pool.begin().await?;

        let challenge_id = sqlx::query(
            r"
            INSERT INTO challenges
                (title, level_requirement, xp_reward, task_details, time_limit, is_user_created, user_id)
            VALUES ($1, $2, $3, $4, $5, 1, $6)
            ",
        )
        .bind(&input.title)
        .bind(input.level_requirement)
        .bind(input.xp_reward)
        .bind(&input.task_details)
        .bind(input.time_limit.as_deref())
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create challenge: {e}")))?
        .last_insert_rowid();

        sqlx::query("INSERT INTO user_challenges (user_id, challenge_id, status) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(challenge_id)
            .bind(ChallengeStatus::Unlocked.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to link challenge: {e}")))?;

        tx.commit().await?;
        Ok(challenge_id)
    }

    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_challenge(&self, id: i64, input: &ChallengeInput) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE challenges
            SET title = $1, task_details = $2, level_requirement = $3, xp_reward = $4, time_limit = $5
            WHERE id = $6
            ",
        )
        .bind(&input.title)
        .bind(&input.task_details)
        .bind(input.level_requirement)
        .bind(input.xp_reward)
        .bind(input.time_limit.as_deref())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update challenge: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a challenge and every profile link to it
    ///
    /// # Errors
    ///
    /// Returns an error if a delete fails; nothing is removed in that case
    pub async fn delete_challenge(&self, id: i64) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM user_challenges WHERE challenge_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to unlink challenge: {e}")))?;

        let result = sqlx::query("DELETE FROM challenges WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete challenge: {e}")))?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Ids of every built-in challenge
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_system_challenge_ids(&self) -> AppResult<Vec<i64>> {
        let ids = sqlx::query_scalar("SELECT id FROM challenges WHERE is_user_created = 0 ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list challenges: {e}")))?;

        Ok(ids)
    }

    // ========================================================================
    // Profile challenge links
    // ========================================================================

    /// Link a challenge to the profile unless a link already exists
    ///
    /// Returns whether a link was inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn ensure_challenge_link(
        &self,
        user_id: i64,
        challenge_id: i64,
        status: ChallengeStatus,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO user_challenges (user_id, challenge_id, status) VALUES ($1, $2, $3)",
        )
        .bind(user_id)
        .bind(challenge_id)
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to link challenge: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Unlock every locked link whose level requirement the profile meets
    ///
    /// Returns the number of links unlocked.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn unlock_eligible_challenges(&self, user_id: i64, level: i64) -> AppResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE user_challenges SET status = 'unlocked'
            WHERE user_id = $1 AND status = 'locked'
              AND challenge_id IN (SELECT id FROM challenges WHERE level_requirement <= $2)
            ",
        )
        .bind(user_id)
        .bind(level)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to unlock challenges: {e}")))?;

        if result.rows_affected() > 0 {
            debug!(user_id, level, unlocked = result.rows_affected(), "Unlocked challenges");
        }
        Ok(result.rows_affected())
    }

    /// The profile's challenges ordered by level requirement
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_user_challenges(&self, user_id: i64) -> AppResult<Vec<UserChallenge>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT uc.id, uc.user_id, uc.challenge_id, uc.status, uc.started_at, {CHALLENGE_COLUMNS}
            FROM user_challenges uc
            JOIN challenges c ON c.id = uc.challenge_id
            WHERE uc.user_id = $1
            ORDER BY c.level_requirement ASC, uc.id ASC
            "
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list user challenges: {e}")))?;

        rows.iter().map(row_to_user_challenge).collect()
    }

    /// A link by id, only when it belongs to the profile
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user_challenge(&self, id: i64, user_id: i64) -> AppResult<Option<UserChallenge>> {
        let row = sqlx::query(&format!(
            r"
            SELECT uc.id, uc.user_id, uc.challenge_id, uc.status, uc.started_at, {CHALLENGE_COLUMNS}
            FROM user_challenges uc
            JOIN challenges c ON c.id = uc.challenge_id
            WHERE uc.id = $1 AND uc.user_id = $2
            "
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user challenge: {e}")))?;

        row.as_ref().map(row_to_user_challenge).transpose()
    }

    /// Mark a link active from `started_at`
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn start_user_challenge(&self, id: i64, started_at: DateTime<Utc>) -> AppResult<bool> {
        let result = sqlx::query("UPDATE user_challenges SET status = $1, started_at = $2 WHERE id = $3")
            .bind(ChallengeStatus::Active.as_str())
            .bind(started_at)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to start challenge: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Complete a challenge for the profile
    ///
    /// Marks the link completed, applies the reward to the profile, awards the
    /// milestone badge if not yet earned and unlocks each milestone challenge
    /// whose level requirement was reached. Either everything is written or
    /// nothing is.
    ///
    /// The status change is the first statement of the transaction, so it takes
    /// the write lock before the profile is read. A concurrent completion of the
    /// same link waits for it and then finds the link already completed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` when the link cannot be completed, or a database error
    pub async fn record_completion(
        &self,
        user_challenge: &UserChallenge,
        profile: &UserProfile,
    ) -> AppResult<CompletionRecord> {
        let status = user_challenge.status.complete()?;
        let challenge = &user_challenge.challenge;
        let reward = if challenge.is_user_created {
            Reward::Promotion
        } else {
            Reward::Experience(challenge.xp_reward)
        };

        let mut tx = self.pool.begin().await?;

        let claimed = sqlx::query(
            "UPDATE user_challenges SET status = $1 WHERE id = $2 AND user_id = $3 AND status IN ($4, $5)",
        )
        .bind(status.as_str())
        .bind(user_challenge.id)
        .bind(profile.id)
        .bind(ChallengeStatus::Unlocked.as_str())
        .bind(ChallengeStatus::Active.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to complete challenge: {e}")))?
        .rows_affected();
        if claimed != 1 {
            return Err(AppError::invalid_state("Challenge is already completed."));
        }

        let current = sqlx::query("SELECT level, experience_points FROM user_profile WHERE id = $1")
            .bind(profile.id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to load profile: {e}")))?
            .ok_or_else(|| AppError::not_found("User profile"))?;
        let outcome = apply_completion(
            current.try_get("level")?,
            current.try_get("experience_points")?,
            reward,
        );

        sqlx::query("UPDATE user_profile SET level = $1, experience_points = $2 WHERE id = $3")
            .bind(outcome.level)
            .bind(outcome.experience_points)
            .bind(profile.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to update profile: {e}")))?;

        let mut badge = None;
        if let (true, Some(badge_id)) = (challenge.is_milestone_challenge, challenge.awards_badge_id) {
            let awarded = sqlx::query(
                "INSERT OR IGNORE INTO user_badges (user_id, badge_id, date_earned) VALUES ($1, $2, $3)",
            )
            .bind(profile.id)
            .bind(badge_id)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to award badge: {e}")))?
            .rows_affected()
                > 0;

            if awarded {
                let row = sqlx::query(&format!("SELECT {BADGE_COLUMNS} FROM badges b WHERE b.id = $1"))
                    .bind(badge_id)
                    .fetch_optional(&mut *tx)
                    .await?;
                badge = row.as_ref().map(row_to_badge).transpose()?;
            }
        }

        let mut milestones = Vec::new();
        if outcome.levels_gained() > 0 {
            let candidates = sqlx::query(
                r"
                SELECT id, title FROM challenges
                WHERE is_milestone_challenge = 1 AND level_requirement > $1 AND level_requirement <= $2
                ORDER BY level_requirement, id
                ",
            )
            .bind(outcome.previous_level)
            .bind(outcome.level)
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to load milestones: {e}")))?;

            for row in &candidates {
                let challenge_id: i64 = row.try_get("id")?;
                // A locked link left by seeding is unlocked in place
                let inserted = sqlx::query(
                    r"
                    INSERT INTO user_challenges (user_id, challenge_id, status) VALUES ($1, $2, $3)
                    ON CONFLICT(user_id, challenge_id) DO UPDATE SET status = excluded.status
                    WHERE user_challenges.status = $4
                    ",
                )
                .bind(profile.id)
                .bind(challenge_id)
                .bind(ChallengeStatus::Unlocked.as_str())
                .bind(ChallengeStatus::Locked.as_str())
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to unlock milestone: {e}")))?
                .rows_affected()
                    > 0;

                if inserted {
                    milestones.push(UnlockedMilestone {
                        challenge_id,
                        title: row.try_get("title")?,
                    });
                }
            }
        }

        tx.commit().await?;

        info!(
            user_challenge_id = user_challenge.id,
            level = outcome.level,
            xp = outcome.experience_points,
            "Challenge completed"
        );

        Ok(CompletionRecord {
            challenge_title: challenge.title.clone(),
            user_created: challenge.is_user_created,
            outcome,
            badge,
            milestones,
        })
    }

    /// Number of the profile's links in `status`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_user_challenges(&self, user_id: i64, status: ChallengeStatus) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM user_challenges WHERE user_id = $1 AND status = $2")
                .bind(user_id)
                .bind(status.as_str())
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_earned_badges(&self, user_id: i64) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_badges WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn row_to_challenge(row: &SqliteRow) -> AppResult<Challenge> {
    Ok(Challenge {
        id: row.try_get("c_id")?,
        title: row.try_get("title")?,
        level_requirement: row.try_get("level_requirement")?,
        xp_reward: row.try_get("xp_reward")?,
        task_details: row.try_get("task_details")?,
        time_limit: row.try_get("time_limit")?,
        is_user_created: row.try_get("is_user_created")?,
        user_id: row.try_get("c_user_id")?,
        is_milestone_challenge: row.try_get("is_milestone_challenge")?,
        awards_badge_id: row.try_get("awards_badge_id")?,
    })
}

fn row_to_user_challenge(row: &SqliteRow) -> AppResult<UserChallenge> {
    let status: String = row.try_get("status")?;
    Ok(UserChallenge {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        challenge_id: row.try_get("challenge_id")?,
        status: ChallengeStatus::parse(&status)?,
        started_at: row.try_get("started_at")?,
        challenge: row_to_challenge(row)?,
    })
}

fn row_to_badge(row: &SqliteRow) -> AppResult<Badge> {
    Ok(Badge {
        id: row.try_get("b_id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        icon: row.try_get("icon")?,
        color: row.try_get("color")?,
        challenges_required: row.try_get("challenges_required")?,
    })
}
