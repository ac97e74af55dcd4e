//! Response envelope shared by the API handlers.

use serde::Serialize;

/// Success envelope: `{ data, meta }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, request_id: impl Into<String>) -> Self {
        Self {
            data,
            meta: ResponseMeta {
                request_id: request_id.into(),
                timestamp: chrono::Utc::now().to_rfc3339(),
            },
        }
    }
}
