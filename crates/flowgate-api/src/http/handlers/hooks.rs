//! Inbound webhook endpoint.
//!
//! The platform POSTs deliveries here. The handler acknowledges
//! immediately upon receipt -- the response never depends on downstream
//! processing -- and publishes exactly one classified event per delivery
//! to the event bus. It has no failure path: unparsable bodies classify
//! as empty, unrecognized shapes as default.

use std::collections::BTreeMap;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use uuid::Uuid;

use flowgate_core::trigger::classify;
use flowgate_types::event::InboundDelivery;

use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /hooks/wazzup - Receive an inbound webhook delivery.
pub async fn receive_wazzup(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<ApiResponse<serde_json::Value>> {
    let request_id = Uuid::now_v7().to_string();

    let headers: BTreeMap<String, String> = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    // Best-effort parse; a missing or unparsable body classifies as empty.
    let parsed = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(&body).ok()
    };

    let event = classify(InboundDelivery::new(headers, parsed));

    tracing::info!(
        request_id = %request_id,
        event_type = %event.event_type,
        "inbound webhook classified"
    );

    state.event_bus.publish(event);

    Json(ApiResponse::success(
        serde_json::json!({ "received": true }),
        request_id,
    ))
}
