// ABOUTME: Web server binary for the calisthenics tracker
// ABOUTME: Loads configuration, opens and migrates the database, then serves the pages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

//! # Calisthenics Tracker Server Binary
//!
//! Configuration comes from the environment (`HOST`, `PORT`, `DATABASE_URL`,
//! `STATIC_DIR`, `MAX_UPLOAD_MB`, `FFMPEG_PATH`, `FFPROBE_PATH`); the flags
//! below override individual values.

use std::sync::Arc;

use anyhow::Result;
use calisthenics_tracker::{
    config::{DatabaseUrl, ServerConfig},
    database::Database,
    logging::LoggingConfig,
    resources::ServerResources,
    server::TrackerServer,
};
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "calisthenics-tracker")]
#[command(about = "Calisthenics Tracker - personal training log served over HTTP")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    port: Option<u16>,

    /// Override the database URL
    #[arg(long)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let logging = LoggingConfig::from_env();
    if args.verbose {
        logging.verbose().init()?;
    } else {
        logging.init()?;
    }

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(url) = args.database_url.as_deref() {
        config.database = DatabaseUrl::parse_url(url);
    }

    info!("Starting Calisthenics Tracker");
    info!("{}", config.summary());

    let database = Database::new(&config.database.to_connection_string()).await?;
    let resources = Arc::new(ServerResources::new(database, config));

    TrackerServer::new(resources).run().await
}
