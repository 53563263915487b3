// ABOUTME: Core types and gamification math for the calisthenics tracker
// ABOUTME: Foundation crate with error handling, domain models, leveling and formatting helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

#![deny(unsafe_code)]

//! # Calisthenics Core
//!
//! Foundation crate shared by the web server and the seeding tool. Nothing here
//! touches the network or the filesystem.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Row and form types with their lifecycle status enums
//! - **leveling**: XP thresholds, level progress, ranks and challenge rewards
//! - **stats**: Completion percentages and BMI
//! - **formatting**: Durations, safe file names and decimals

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models
pub mod models;

/// Gamification engine
pub mod leveling;

/// Summary arithmetic
pub mod stats;

/// Text formatting helpers
pub mod formatting;
