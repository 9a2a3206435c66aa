// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The `/strava` endpoint: latest activity for the portfolio widget.
//!
//! Only GET and OPTIONS are supported. Every terminal state maps to a
//! well-formed JSON body; "no qualifying activity" is a 200 with a null
//! payload, not an error.

use crate::error::{AppError, Result};
use crate::models::NormalizedActivity;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{on, MethodFilter},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Strava routes.
pub fn routes() -> Router<Arc<AppState>> {
    // axum routes HEAD to the GET handler unless a HEAD endpoint is
    // registered explicitly; only GET is supported, so HEAD gets the
    // same 405 as any other unsupported method.
    Router::new().route(
        "/strava",
        on(MethodFilter::GET, latest_activity)
            .on(MethodFilter::HEAD, method_not_allowed)
            .options(preflight)
            .fallback(method_not_allowed),
    )
}

/// Query parameters for the latest-activity endpoint.
#[derive(Deserialize)]
pub struct LatestQuery {
    /// `?decode=true` adds decoded [lat, lng] pairs alongside the polyline.
    decode: Option<String>,
}

/// Response body: the latest qualifying activity, or null.
#[derive(Serialize)]
pub struct LatestResponse {
    pub latest: Option<NormalizedActivity>,
}

/// Get the most recent qualifying activity.
async fn latest_activity(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LatestQuery>,
) -> Result<Json<LatestResponse>> {
    let service = state
        .strava_service
        .as_ref()
        .ok_or(AppError::MissingCredentials)?;

    let decode = matches!(query.decode.as_deref(), Some("true") | Some("1"));
    let latest = service.latest_activity(decode).await?;

    Ok(Json(LatestResponse { latest }))
}

/// CORS preflight: 204 with no body. Headers are added by middleware.
async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Any method other than GET/OPTIONS.
async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({ "error": "Method not allowed" })),
    )
}
