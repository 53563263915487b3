// ABOUTME: Gamification engine: XP thresholds, level progress, rank tiers and rewards
// ABOUTME: Pure functions over a profile's level and experience points
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

//! # Leveling
//!
//! The XP threshold of level `L` is `floor(1000 * 1.1^(L-1))`. Completing a system
//! challenge adds its XP reward and then levels the profile up for as long as the
//! total meets the next threshold. Completing a user-created challenge promotes
//! the profile by exactly one level and grants no XP.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::leveling::{
    BASE_LEVEL_XP, GOLD_LEVEL, LEVEL_GROWTH_FACTOR, PLATINUM_LEVEL, SILVER_LEVEL,
};

/// Total XP threshold of `level`
///
/// Levels below 1 are treated as level 1.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn xp_for_level(level: i64) -> i64 {
    let exponent = i32::try_from(level.max(1) - 1).unwrap_or(i32::MAX);
    (BASE_LEVEL_XP * LEVEL_GROWTH_FACTOR.powi(exponent)).floor() as i64
}

/// Progress of a profile through its current level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: i64,
    pub experience_points: i64,
    /// Threshold of the next level
    pub xp_for_next_level: i64,
    /// Share of the way from this level's threshold to the next, 0..=100
    pub percentage: i64,
}

impl LevelProgress {
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn compute(level: i64, experience_points: i64) -> Self {
        let current = xp_for_level(level);
        let next = xp_for_level(level + 1);
        let needed = next - current;
        let percentage = if needed > 0 {
            let raw = (experience_points - current) as f64 / needed as f64 * 100.0;
            (raw.round_ties_even() as i64).clamp(0, 100)
        } else {
            0
        };
        Self {
            level,
            experience_points,
            xp_for_next_level: next,
            percentage,
        }
    }
}

/// Rank tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Platinum => "Platinum",
        }
    }
}

/// Division inside a tier, III lowest
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Division {
    III,
    II,
    I,
}

impl Division {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::III => "III",
            Self::II => "II",
            Self::I => "I",
        }
    }
}

/// Display rank such as "Gold II"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rank {
    pub tier: Tier,
    pub division: Division,
}

impl Rank {
    #[must_use]
    pub const fn for_level(level: i64) -> Self {
        let tier = if level >= PLATINUM_LEVEL {
            Tier::Platinum
        } else if level >= GOLD_LEVEL {
            Tier::Gold
        } else if level >= SILVER_LEVEL {
            Tier::Silver
        } else {
            Tier::Bronze
        };
        let division = match level.rem_euclid(10) {
            0..=2 => Division::III,
            3..=6 => Division::II,
            _ => Division::I,
        };
        Self { tier, division }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tier.as_str(), self.division.as_str())
    }
}

/// Kind of challenge being completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reward {
    /// A user-created challenge: one level, no XP
    Promotion,
    /// A system challenge worth this much XP
    Experience(i64),
}

/// Result of applying a completion to a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionOutcome {
    pub previous_level: i64,
    pub level: i64,
    pub experience_points: i64,
    pub xp_earned: i64,
}

impl CompletionOutcome {
    #[must_use]
    pub const fn levels_gained(&self) -> i64 {
        self.level - self.previous_level
    }

    /// Every level reached by this completion, in ascending order
    pub fn levels_reached(&self) -> impl Iterator<Item = i64> {
        (self.previous_level + 1)..=self.level
    }
}

/// Apply a challenge reward to a profile's level and XP
#[must_use]
pub fn apply_completion(level: i64, experience_points: i64, reward: Reward) -> CompletionOutcome {
    match reward {
        Reward::Promotion => CompletionOutcome {
            previous_level: level,
            level: level + 1,
            experience_points,
            xp_earned: 0,
        },
        Reward::Experience(xp) => {
            let total = experience_points + xp.max(0);
            let mut new_level = level;
            while total >= xp_for_level(new_level + 1) {
                new_level += 1;
            }
            CompletionOutcome {
                previous_level: level,
                level: new_level,
                experience_points: total,
                xp_earned: xp.max(0),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_thresholds() {
        assert_eq!(xp_for_level(1), 1000);
        assert_eq!(xp_for_level(2), 1100);
        assert_eq!(xp_for_level(3), 1210);
        assert_eq!(xp_for_level(10), 2357);
        assert_eq!(xp_for_level(0), 1000);
    }

    #[test]
    fn test_level_progress_clamped() {
        let fresh = LevelProgress::compute(1, 0);
        assert_eq!(fresh.xp_for_next_level, 1100);
        assert_eq!(fresh.percentage, 0);

        let halfway = LevelProgress::compute(1, 1050);
        assert_eq!(halfway.percentage, 50);

        let overflow = LevelProgress::compute(1, 5000);
        assert_eq!(overflow.percentage, 100);
    }

    #[test]
    fn test_rank_names() {
        assert_eq!(Rank::for_level(1).to_string(), "Bronze III");
        assert_eq!(Rank::for_level(5).to_string(), "Bronze II");
        assert_eq!(Rank::for_level(9).to_string(), "Bronze I");
        assert_eq!(Rank::for_level(10).to_string(), "Silver III");
        assert_eq!(Rank::for_level(24).to_string(), "Gold II");
        assert_eq!(Rank::for_level(37).to_string(), "Platinum I");
    }

    #[test]
    fn test_promotion_grants_no_xp() {
        let outcome = apply_completion(3, 400, Reward::Promotion);
        assert_eq!(outcome.level, 4);
        assert_eq!(outcome.experience_points, 400);
        assert_eq!(outcome.xp_earned, 0);
        assert_eq!(outcome.levels_gained(), 1);
    }

    #[test]
    fn test_experience_without_level_up() {
        let outcome = apply_completion(1, 1000, Reward::Experience(50));
        assert_eq!(outcome.level, 1);
        assert_eq!(outcome.experience_points, 1050);
        assert_eq!(outcome.levels_gained(), 0);
    }

    #[test]
    fn test_experience_levels_up_repeatedly() {
        // 1000 + 250 = 1250 crosses both 1100 (level 2) and 1210 (level 3)
        let outcome = apply_completion(1, 1000, Reward::Experience(250));
        assert_eq!(outcome.level, 3);
        assert_eq!(outcome.levels_reached().collect::<Vec<_>>(), vec![2, 3]);
    }
}
