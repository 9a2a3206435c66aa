// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CORS and content-type headers middleware.
//!
//! The static frontend calls this service cross-origin, so every
//! response carries the same fixed header set, including error paths
//! and the OPTIONS preflight. A predicate-based CORS layer would skip
//! requests without an Origin header, so the headers are added
//! unconditionally here instead.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};

/// Add the fixed CORS header set to all responses.
pub async fn add_cors_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        "Access-Control-Allow-Origin",
        HeaderValue::from_static("*"),
    );
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("GET, OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type"),
    );
    headers.insert(
        "Content-Type",
        HeaderValue::from_static("application/json"),
    );

    response
}
