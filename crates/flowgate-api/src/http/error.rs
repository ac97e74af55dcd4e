//! Application error type mapping to HTTP status codes and envelope
//! format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use flowgate_types::error::{ReplyError, SubscriptionError, TriggerConfigError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Remote subscription API failure.
    Subscription(SubscriptionError),
    /// Trigger configuration could not be resolved.
    TriggerConfig(TriggerConfigError),
    /// Websocket reply dispatch failure.
    Reply(ReplyError),
    /// Validation error.
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<SubscriptionError> for AppError {
    fn from(e: SubscriptionError) -> Self {
        AppError::Subscription(e)
    }
}

impl From<TriggerConfigError> for AppError {
    fn from(e: TriggerConfigError) -> Self {
        AppError::TriggerConfig(e)
    }
}

impl From<ReplyError> for AppError {
    fn from(e: ReplyError) -> Self {
        AppError::Reply(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Subscription(e @ SubscriptionError::Transport(_)) => {
                (StatusCode::BAD_GATEWAY, "UPSTREAM_TRANSPORT", e.to_string())
            }
            AppError::Subscription(e @ SubscriptionError::RemoteStatus { .. }) => {
                (StatusCode::BAD_GATEWAY, "UPSTREAM_STATUS", e.to_string())
            }
            AppError::TriggerConfig(e) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Reply(ReplyError::NoListener) => (
                StatusCode::CONFLICT,
                "NO_LISTENER",
                "no websocket listener connection is active".to_string(),
            ),
            AppError::Reply(e @ ReplyError::MissingResource(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Reply(e @ ReplyError::ConnectionGone(_)) => {
                (StatusCode::GONE, "CONNECTION_GONE", e.to_string())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
        };

        let body = json!({
            "data": null,
            "meta": {
                "request_id": "",
                "timestamp": chrono::Utc::now().to_rfc3339(),
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
