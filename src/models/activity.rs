// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava activity records and the selection policy applied to them.
//!
//! Upstream records are treated as read-only external data: we
//! deserialize only the fields the response shape guarantees and pass
//! the rest through untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary activity as returned by the athlete activities listing,
/// most-recent-first.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivitySummary {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub sport_type: Option<String>,
    /// Distance in meters
    pub distance: f64,
    /// Moving time in seconds
    pub moving_time: u64,
    /// UTC start time (RFC 3339)
    pub start_date: String,
    pub start_date_local: Option<String>,
    pub map: Option<ActivityMap>,
}

/// Activity map data with polylines.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActivityMap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polyline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_polyline: Option<String>,
}

impl ActivityMap {
    /// Get the detailed polyline, falling back to summary if not available.
    pub fn best_polyline(&self) -> Option<&str> {
        self.polyline.as_deref().or(self.summary_polyline.as_deref())
    }
}

/// Which activity the endpoint returns from the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Most recent activity of any type (index 0 of the listing).
    Latest,
    /// Most recent activity whose type matches, scanning in listing order.
    /// No match within the page means "no qualifying activity", not an error.
    Type(String),
}

impl SelectionPolicy {
    /// Select an activity from a most-recent-first page.
    pub fn select<'a>(&self, activities: &'a [ActivitySummary]) -> Option<&'a ActivitySummary> {
        match self {
            SelectionPolicy::Latest => activities.first(),
            SelectionPolicy::Type(wanted) => activities.iter().find(|a| {
                a.activity_type == *wanted || a.sport_type.as_deref() == Some(wanted.as_str())
            }),
        }
    }
}

/// The subset of activity fields the response guarantees to the caller.
///
/// Every emitted object has at minimum a type, distance, moving time,
/// and start timestamp; map and route are present only when upstream
/// provides GPS data.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedActivity {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sport_type: Option<String>,
    pub distance: f64,
    pub moving_time: u64,
    pub start_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date_local: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<ActivityMap>,
    /// Decoded [lat, lng] pairs, populated on request (`?decode=true`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<Vec<[f64; 2]>>,
}

impl NormalizedActivity {
    /// Normalize a summary record, validating its start timestamp.
    pub fn from_summary(summary: &ActivitySummary) -> Result<Self, chrono::ParseError> {
        let start_date = DateTime::parse_from_rfc3339(&summary.start_date)?.with_timezone(&Utc);

        Ok(Self {
            id: summary.id,
            name: summary.name.clone(),
            activity_type: summary.activity_type.clone(),
            sport_type: summary.sport_type.clone(),
            distance: summary.distance,
            moving_time: summary.moving_time,
            start_date,
            start_date_local: summary.start_date_local.clone(),
            map: summary.map.clone(),
            route: None,
        })
    }
}
