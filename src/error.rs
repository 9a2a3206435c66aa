// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.
//!
//! Every error maps to a well-formed JSON body; the fixed CORS headers
//! are added by middleware on the way out, so even failure paths honor
//! the frontend contract.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing Strava env vars")]
    MissingCredentials,

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Activities fetch failed: {0}")]
    ActivityFetch(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (error, details) = match self {
            AppError::MissingCredentials => ("Missing Strava env vars", None),
            AppError::TokenExchange(body) => ("token exchange failed", Some(body)),
            AppError::ActivityFetch(body) => ("activities fetch failed", Some(body)),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                ("server error", Some(err.to_string()))
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
