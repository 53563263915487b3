// ABOUTME: HTTP server lifecycle: prepare upload directories, bind, serve, shut down on signal
// ABOUTME: In-flight requests finish before the process exits on Ctrl+C or SIGTERM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use crate::resources::ServerResources;
use crate::routes;

/// The tracker's HTTP server
pub struct TrackerServer {
    resources: Arc<ServerResources>,
}

impl TrackerServer {
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// The fully layered application router
    #[must_use]
    pub fn router(&self) -> Router {
        routes::build_router(&self.resources)
    }

    /// Serve until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the upload directories cannot be created, the
    /// address cannot be bound or the server fails
    pub async fn run(self) -> Result<()> {
        self.resources
            .uploads
            .ensure_directories()
            .await
            .context("preparing upload directories")?;

        let addr = self.resources.config.bind_addr();
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("binding {addr}"))?;
        info!(%addr, "Calisthenics tracker listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("serving HTTP")?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully");
        },
        () = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        },
    }
}
