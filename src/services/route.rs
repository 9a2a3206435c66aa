// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Decoding of encoded activity polylines into coordinate pairs.
//!
//! Strava encodes GPS tracks in the Google polyline format with a
//! precision of 5 decimal places. The frontend draws the decoded track
//! with Leaflet, which expects [lat, lng] pairs.

/// Strava polylines use 5 decimal places of precision.
const POLYLINE_PRECISION: u32 = 5;

/// Decode an encoded polyline into [lat, lng] pairs.
///
/// Best-effort: a malformed polyline yields `None` rather than an error,
/// since a missing route never fails the request.
pub fn decode_route(encoded: &str) -> Option<Vec<[f64; 2]>> {
    match polyline::decode_polyline(encoded, POLYLINE_PRECISION) {
        Ok(line) => Some(line.coords().map(|c| [c.y, c.x]).collect()),
        Err(e) => {
            tracing::debug!(error = %e, "Failed to decode polyline");
            None
        }
    }
}
