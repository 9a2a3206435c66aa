// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Credentials are read once at startup and cached in memory for the
//! process lifetime. A missing credential does not abort startup: the
//! server still answers preflight and method checks, and the Strava
//! endpoint reports the configuration failure per-request.

use crate::models::SelectionPolicy;
use std::env;

/// Page size when returning the most recent activity of any type.
/// Index 0 of the listing is the answer, so one record is enough.
pub const UNFILTERED_PAGE_SIZE: u32 = 1;

/// Page size when scanning for the most recent activity of a given type.
///
/// The scan only looks at this many records; a qualifying activity older
/// than the page window is silently missed. Enlarging the page is a
/// capacity tradeoff, not a correctness one.
pub const FILTERED_PAGE_SIZE: u32 = 10;

/// Strava OAuth credentials, all three required before any network call.
#[derive(Debug, Clone)]
pub struct StravaCredentials {
    /// Strava OAuth client ID (public)
    pub client_id: String,
    /// Strava OAuth client secret
    pub client_secret: String,
    /// Long-lived refresh token for the site owner's account
    pub refresh_token: String,
}

impl StravaCredentials {
    /// Build credentials from optional parts, reporting which are missing.
    pub fn from_parts(
        client_id: Option<String>,
        client_secret: Option<String>,
        refresh_token: Option<String>,
    ) -> Result<Self, Vec<&'static str>> {
        let mut missing = Vec::new();
        if client_id.is_none() {
            missing.push("STRAVA_CLIENT_ID");
        }
        if client_secret.is_none() {
            missing.push("STRAVA_CLIENT_SECRET");
        }
        if refresh_token.is_none() {
            missing.push("STRAVA_REFRESH_TOKEN");
        }
        if !missing.is_empty() {
            return Err(missing);
        }

        Ok(Self {
            client_id: client_id.unwrap_or_default(),
            client_secret: client_secret.unwrap_or_default(),
            refresh_token: refresh_token.unwrap_or_default(),
        })
    }

    /// Read credentials from the environment.
    pub fn from_env() -> Result<Self, Vec<&'static str>> {
        Self::from_parts(
            env::var("STRAVA_CLIENT_ID").ok().map(|v| v.trim().to_string()),
            env::var("STRAVA_CLIENT_SECRET")
                .ok()
                .map(|v| v.trim().to_string()),
            env::var("STRAVA_REFRESH_TOKEN")
                .ok()
                .map(|v| v.trim().to_string()),
        )
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Strava credentials, `None` when any of the three env vars is absent
    pub credentials: Option<StravaCredentials>,
    /// Which activity the endpoint returns
    pub policy: SelectionPolicy,
    /// How many recent activities the listing request asks for
    pub per_page: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        let credentials = match StravaCredentials::from_env() {
            Ok(c) => Some(c),
            Err(missing) => {
                tracing::warn!(
                    missing = ?missing,
                    "Strava credentials incomplete; /strava will report a config error"
                );
                None
            }
        };

        let policy = match env::var("STRAVA_ACTIVITY_TYPE") {
            Ok(v) if !v.trim().is_empty() && !v.trim().eq_ignore_ascii_case("any") => {
                SelectionPolicy::Type(v.trim().to_string())
            }
            _ => SelectionPolicy::Latest,
        };

        let per_page = resolve_page_size(env::var("STRAVA_PAGE_SIZE").ok().as_deref(), &policy);

        Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            credentials,
            policy,
            per_page,
        }
    }
}

/// Page size implied by the selection policy when not overridden.
pub fn default_page_size(policy: &SelectionPolicy) -> u32 {
    match policy {
        SelectionPolicy::Latest => UNFILTERED_PAGE_SIZE,
        SelectionPolicy::Type(_) => FILTERED_PAGE_SIZE,
    }
}

/// Resolve the listing page size from an optional override.
///
/// A page size of zero would make the listing return no records and the
/// endpoint answer null forever, so zero and unparsable overrides fall
/// back to the policy default.
pub fn resolve_page_size(raw: Option<&str>, policy: &SelectionPolicy) -> u32 {
    raw.and_then(|v| v.trim().parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or_else(|| default_page_size(policy))
}
