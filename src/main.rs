// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava-Latest API Server
//!
//! Serves the most recent Strava activity to a static portfolio page,
//! exchanging a long-lived refresh token for a short-lived access token
//! on every request.

use std::sync::Arc;
use strava_latest::{config::Config, services::StravaService, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env();
    tracing::info!(
        port = config.port,
        policy = ?config.policy,
        per_page = config.per_page,
        "Starting Strava-Latest API"
    );

    // Initialize Strava service (absent credentials are reported per-request)
    let strava_service = config
        .credentials
        .as_ref()
        .map(|creds| StravaService::new(creds, config.policy.clone(), config.per_page));

    // Build shared state
    let state = Arc::new(AppState { strava_service });

    // Build router
    let app = strava_latest::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("strava_latest=debug".parse().expect("valid directive"))
                .add_directive("info".parse().expect("valid directive")),
        )
        .with(format)
        .init();
}
