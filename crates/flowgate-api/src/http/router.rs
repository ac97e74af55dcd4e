//! Axum router configuration with middleware.
//!
//! Management routes live under `/api/v1/`; the inbound webhook endpoint
//! and the websocket events endpoint sit at the top level because their
//! paths are part of the external contract (the remote platform POSTs to
//! `/hooks/wazzup`).

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Trigger lifecycle
        .route("/trigger", get(handlers::trigger::status))
        .route("/trigger/activate", post(handlers::trigger::activate))
        .route("/trigger/deactivate", post(handlers::trigger::deactivate))
        // Reply to a websocket peer referenced by a workflow item
        .route("/reply", post(handlers::reply::send_reply));

    Router::new()
        .nest("/api/v1", api_routes)
        // Inbound webhook deliveries from the platform
        .route("/hooks/wazzup", post(handlers::hooks::receive_wazzup))
        // Engine-side event stream + reply channel
        .route("/ws/events", get(handlers::ws::ws_handler))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
