// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client for the latest-activity pipeline.
//!
//! Handles:
//! - Refresh-token exchange for a short-lived access token
//! - Listing recent activities (most-recent-first)
//! - Best-effort detail fetch to recover the map polyline
//!
//! Tokens are fetched fresh on every invocation and never persisted;
//! there is no cache, no retry, and no timeout beyond the platform's.

use crate::config::StravaCredentials;
use crate::error::AppError;
use crate::models::{ActivityMap, ActivitySummary, NormalizedActivity, SelectionPolicy};
use crate::services::route;
use serde::Deserialize;

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
}

impl StravaClient {
    /// Create a new Strava client with OAuth credentials.
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: "https://www.strava.com".to_string(),
            client_id,
            client_secret,
        }
    }

    /// Point the client at a different host (tests use a local fake).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Exchange the long-lived refresh token for a short-lived access token.
    ///
    /// A non-2xx response fails with the upstream body verbatim; it is
    /// never retried and the body is never partially trusted.
    pub async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenResponse, AppError> {
        let url = format!("{}/oauth/token", self.base_url);

        let body = serde_json::json!({
            "client_id": self.client_id,
            "client_secret": self.client_secret,
            "refresh_token": refresh_token,
            "grant_type": "refresh_token",
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::TokenExchange(body));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Token parse error: {}", e)))
    }

    /// List the most recent activities, most-recent-first.
    pub async fn list_activities(
        &self,
        access_token: &str,
        per_page: u32,
    ) -> Result<Vec<ActivitySummary>, AppError> {
        let url = format!("{}/api/v3/athlete/activities", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[("per_page", per_page.to_string())])
            .send()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Activities request failed: {}", e)))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ActivityFetch(body));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Activities parse error: {}", e)))
    }

    /// Get a detailed activity by ID (used to recover the map polyline).
    pub async fn get_activity(
        &self,
        access_token: &str,
        activity_id: u64,
    ) -> Result<ActivityDetail, AppError> {
        let url = format!("{}/api/v3/activities/{}", self.base_url, activity_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Detail request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::Internal(anyhow::anyhow!(
                "Detail fetch returned HTTP {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Detail parse error: {}", e)))
    }
}

/// Token exchange response from Strava.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Detail record; only the fields enrichment needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityDetail {
    pub id: u64,
    pub map: Option<ActivityMap>,
}

// ─────────────────────────────────────────────────────────────────────────────
// StravaService - the latest-activity pipeline
// ─────────────────────────────────────────────────────────────────────────────

/// High-level service that runs the pipeline:
/// token exchange → listing → selection → best-effort enrichment → normalize.
#[derive(Clone)]
pub struct StravaService {
    client: StravaClient,
    refresh_token: String,
    policy: SelectionPolicy,
    per_page: u32,
}

impl StravaService {
    /// Create a new Strava service from process-scoped credentials.
    pub fn new(credentials: &StravaCredentials, policy: SelectionPolicy, per_page: u32) -> Self {
        Self {
            client: StravaClient::new(
                credentials.client_id.clone(),
                credentials.client_secret.clone(),
            ),
            refresh_token: credentials.refresh_token.clone(),
            policy,
            per_page,
        }
    }

    /// Point the underlying client at a different host (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.client = self.client.with_base_url(base_url);
        self
    }

    /// Fetch and normalize the most recent qualifying activity.
    ///
    /// Returns `Ok(None)` when no activity in the page matches the
    /// selection policy; that is a valid answer, not an error.
    pub async fn latest_activity(
        &self,
        decode: bool,
    ) -> Result<Option<NormalizedActivity>, AppError> {
        // 1. Refresh token -> short-lived access token
        let token = self.client.refresh_access_token(&self.refresh_token).await?;

        // 2. Bounded page of recent activities, pick per policy
        let activities = self
            .client
            .list_activities(&token.access_token, self.per_page)
            .await?;

        let Some(selected) = self.policy.select(&activities) else {
            tracing::info!(
                policy = ?self.policy,
                page_len = activities.len(),
                "No qualifying activity in page"
            );
            return Ok(None);
        };

        let mut latest = NormalizedActivity::from_summary(selected).map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "Invalid start_date for activity {}: {}",
                selected.id,
                e
            ))
        })?;

        // 3. Best-effort detail fetch for the map polyline. The summary
        //    listing usually omits it; the detail record is authoritative
        //    when present. Failure here never fails the request.
        match self.client.get_activity(&token.access_token, latest.id).await {
            Ok(detail) => {
                if let Some(map) = detail.map {
                    latest.map = Some(map);
                }
            }
            Err(e) => {
                tracing::debug!(
                    activity_id = latest.id,
                    error = %e,
                    "Detail enrichment failed, returning summary as-is"
                );
            }
        }

        // 4. Optional server-side polyline decode for the frontend map
        if decode {
            latest.route = latest
                .map
                .as_ref()
                .and_then(|m| m.best_polyline())
                .and_then(route::decode_route);
        }

        tracing::info!(
            activity_id = latest.id,
            activity_type = %latest.activity_type,
            "Latest activity selected"
        );
        Ok(Some(latest))
    }
}
