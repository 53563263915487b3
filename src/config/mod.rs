// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-only configuration for the web server and seeding tool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

//! Configuration module.
//!
//! Configuration comes from environment variables only; the binaries may
//! override individual values from their command line.

/// Environment and server configuration
pub mod environment;

pub use environment::{DatabaseUrl, Environment, MediaToolConfig, ServerConfig};
