//! Reply route: write a message to the websocket peer referenced by a
//! workflow item.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for POST /api/v1/reply.
#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    /// The workflow item carrying the connection id.
    pub item: serde_json::Value,
    /// Item field expected to hold the connection id.
    #[serde(default = "default_resource_field")]
    pub resource_field: String,
    /// Text to write to the socket.
    pub content: String,
}

fn default_resource_field() -> String {
    "ws".to_string()
}

/// POST /api/v1/reply - Dispatch `content` to the peer named by the item.
///
/// Hard errors, per the reply contract: no active listener connection at
/// all, a missing/malformed resource field, or a connection that has
/// since gone away.
pub async fn send_reply(
    State(state): State<AppState>,
    Json(request): Json<ReplyRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let request_id = Uuid::now_v7().to_string();

    let connection_id = state
        .socket_registry
        .reply(&request.item, &request.resource_field, &request.content)
        .await?;

    Ok(Json(ApiResponse::success(
        serde_json::json!({
            "sent": true,
            "connection_id": connection_id.to_string(),
        }),
        request_id,
    )))
}
