// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava-Latest: recent-activity proxy for a static portfolio site.
//!
//! This crate fronts the Strava API with a single public endpoint that
//! returns the owner's most recent activity (optionally filtered by type)
//! as a minimal JSON shape with fixed CORS headers.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use services::StravaService;

/// Shared application state.
pub struct AppState {
    /// `None` when Strava credentials are missing from the environment;
    /// the endpoint then reports a config error without any network call.
    pub strava_service: Option<StravaService>,
}
