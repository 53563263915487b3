// ABOUTME: Workout exercise catalog model
// ABOUTME: Exercises with difficulty, sets, reps, rest and instructions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use serde::{Deserialize, Serialize};

/// A catalog exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Row id
    pub id: i64,
    /// Unique exercise name
    pub name: String,
    /// Free-text difficulty (Beginner, Intermediate, Advanced)
    pub difficulty: String,
    /// Number of sets
    pub sets: i64,
    /// Reps as text so "12/Leg" survives
    pub reps: String,
    /// Rest between sets, e.g. "2m"
    pub rest: String,
    /// Coaching instructions
    pub instructions: String,
}

/// Fields for a new exercise
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkout {
    pub name: String,
    pub difficulty: String,
    pub sets: i64,
    pub reps: String,
    pub rest: String,
    pub instructions: String,
}
