// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test helpers: a fake Strava upstream and app construction.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use strava_latest::config::StravaCredentials;
use strava_latest::models::SelectionPolicy;
use strava_latest::routes::create_router;
use strava_latest::services::StravaService;
use strava_latest::AppState;

/// Per-endpoint request counters for the fake upstream.
#[derive(Default)]
pub struct UpstreamCounts {
    pub token: AtomicUsize,
    pub activities: AtomicUsize,
    pub detail: AtomicUsize,
}

/// Canned responses for the fake Strava upstream.
pub struct FakeStrava {
    pub token_status: u16,
    pub token_body: String,
    pub activities_status: u16,
    pub activities_body: String,
    pub detail_status: u16,
    pub detail_body: String,
}

impl Default for FakeStrava {
    fn default() -> Self {
        Self {
            token_status: 200,
            token_body: r#"{"access_token":"t1","expires_at":4102444800}"#.to_string(),
            activities_status: 200,
            activities_body: "[]".to_string(),
            detail_status: 404,
            detail_body: r#"{"message":"Record Not Found"}"#.to_string(),
        }
    }
}

struct FakeState {
    fake: FakeStrava,
    counts: Arc<UpstreamCounts>,
}

fn canned(status: u16, body: &str) -> Response {
    (
        StatusCode::from_u16(status).expect("valid status"),
        [("content-type", "application/json")],
        body.to_string(),
    )
        .into_response()
}

async fn fake_token(State(state): State<Arc<FakeState>>) -> Response {
    state.counts.token.fetch_add(1, Ordering::SeqCst);
    canned(state.fake.token_status, &state.fake.token_body)
}

async fn fake_activities(State(state): State<Arc<FakeState>>) -> Response {
    state.counts.activities.fetch_add(1, Ordering::SeqCst);
    canned(state.fake.activities_status, &state.fake.activities_body)
}

async fn fake_detail(State(state): State<Arc<FakeState>>) -> Response {
    state.counts.detail.fetch_add(1, Ordering::SeqCst);
    canned(state.fake.detail_status, &state.fake.detail_body)
}

/// Serve the fake upstream on an ephemeral port.
/// Returns its base URL and the request counters.
pub async fn spawn_fake_strava(fake: FakeStrava) -> (String, Arc<UpstreamCounts>) {
    let counts = Arc::new(UpstreamCounts::default());
    let state = Arc::new(FakeState {
        fake,
        counts: counts.clone(),
    });

    let router = Router::new()
        .route("/oauth/token", post(fake_token))
        .route("/api/v3/athlete/activities", get(fake_activities))
        .route("/api/v3/activities/{id}", get(fake_detail))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake upstream");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve fake");
    });

    (format!("http://{}", addr), counts)
}

/// Create a test app whose Strava client points at the fake upstream.
#[allow(dead_code)]
pub fn create_test_app(base_url: &str, policy: SelectionPolicy, per_page: u32) -> axum::Router {
    let creds = StravaCredentials {
        client_id: "test_client_id".to_string(),
        client_secret: "test_secret".to_string(),
        refresh_token: "test_refresh_token".to_string(),
    };
    let strava_service =
        Some(StravaService::new(&creds, policy, per_page).with_base_url(base_url));

    create_router(Arc::new(AppState { strava_service }))
}

/// Create a test app with no credentials configured.
#[allow(dead_code)]
pub fn create_unconfigured_app() -> axum::Router {
    create_router(Arc::new(AppState {
        strava_service: None,
    }))
}
