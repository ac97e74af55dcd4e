//! DirectusClient -- generic record dispatcher for the Directus REST API.
//!
//! Maps the [`RecordOperation`] vocabulary onto per-collection endpoints
//! (`{base}/items/{collection}`) and the multipart file endpoint
//! (`{base}/files`). Plain request building: no state machine, no retry.
//!
//! Responses are unwrapped to their `data` member when present, matching
//! the Directus envelope.

use std::time::Duration;

use reqwest::multipart;
use secrecy::ExposeSecret;
use serde_json::Value;

use flowgate_types::credentials::DirectusCredentials;
use flowgate_types::error::RecordError;
use flowgate_types::record::{FileUpload, RecordOperation};

/// Client for a Directus instance's REST API.
#[derive(Debug, Clone)]
pub struct DirectusClient {
    client: reqwest::Client,
}

impl DirectusClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to create reqwest client");

        Self { client }
    }

    /// Execute one record operation against the instance named by
    /// `credentials`.
    pub async fn execute(
        &self,
        credentials: &DirectusCredentials,
        operation: RecordOperation,
    ) -> Result<Value, RecordError> {
        tracing::debug!(operation = operation.name(), "dispatching record operation");

        match operation {
            RecordOperation::Upload(file) => self.upload(credentials, file).await,
            other => self.items_request(credentials, other).await,
        }
    }

    /// Build and send a collection-records request.
    async fn items_request(
        &self,
        credentials: &DirectusCredentials,
        operation: RecordOperation,
    ) -> Result<Value, RecordError> {
        let base = credentials.base_url();

        let request = match &operation {
            RecordOperation::Create { collection, data } => self
                .client
                .post(format!("{base}/items/{collection}"))
                .json(data),
            RecordOperation::Update {
                collection,
                record_id,
                data,
            } => self
                .client
                .patch(format!("{base}/items/{collection}/{record_id}"))
                .json(data),
            RecordOperation::Delete {
                collection,
                record_id,
            } => self
                .client
                .delete(format!("{base}/items/{collection}/{record_id}")),
            RecordOperation::FindOne {
                collection,
                record_id,
            } => self
                .client
                .get(format!("{base}/items/{collection}/{record_id}")),
            RecordOperation::FindMany {
                collection,
                filter,
                fields,
            } => {
                let mut request = self.client.get(format!("{base}/items/{collection}"));
                if let Some(filter) = filter.as_ref().filter(|f| !is_empty_filter(f)) {
                    let filter_text = filter.to_string();
                    request = request.query(&[("filter", filter_text.as_str())]);
                }
                if let Some(fields) = fields.as_ref().filter(|f| !f.is_empty()) {
                    request = request.query(&[("fields", fields.as_str())]);
                }
                request
            }
            RecordOperation::Upload(_) => unreachable!("upload handled by caller"),
        };

        let response = request
            .bearer_auth(credentials.token().expose_secret())
            .send()
            .await
            .map_err(|e| RecordError::Transport(e.to_string()))?;

        unwrap_envelope(response).await
    }

    /// Upload a file through the multipart endpoint, with its optional
    /// metadata parts.
    async fn upload(
        &self,
        credentials: &DirectusCredentials,
        file: FileUpload,
    ) -> Result<Value, RecordError> {
        let FileUpload {
            file_name,
            content_type,
            data,
            folder,
            title,
            description,
        } = file;

        let part = multipart::Part::bytes(data)
            .file_name(file_name.clone())
            .mime_str(&content_type)
            .map_err(|e| RecordError::UploadPayload(file_name.clone(), e.to_string()))?;

        let mut form = multipart::Form::new().part("file", part);
        if let Some(title) = title {
            form = form.text("title", title);
        }
        if let Some(folder) = folder {
            form = form.text("folder", folder);
        }
        if let Some(description) = description {
            form = form.text("description", description);
        }

        let response = self
            .client
            .post(format!("{}/files", credentials.base_url()))
            .bearer_auth(credentials.token().expose_secret())
            .multipart(form)
            .send()
            .await
            .map_err(|e| RecordError::Transport(e.to_string()))?;

        unwrap_envelope(response).await
    }
}

impl Default for DirectusClient {
    fn default() -> Self {
        Self::new()
    }
}

/// A filter of `{}` (or no object at all) carries no constraint and is
/// omitted from the query string.
fn is_empty_filter(filter: &Value) -> bool {
    matches!(filter, Value::Object(map) if map.is_empty())
}

/// Check the status, then peel the Directus `data` envelope off the
/// response body. Bodyless responses (e.g. 204 from delete) become null.
async fn unwrap_envelope(response: reqwest::Response) -> Result<Value, RecordError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| RecordError::Transport(e.to_string()))?;

    if !status.is_success() {
        return Err(RecordError::RemoteStatus {
            status: status.as_u16(),
            body: text,
        });
    }

    if text.is_empty() {
        return Ok(Value::Null);
    }

    let mut value: Value =
        serde_json::from_str(&text).map_err(|e| RecordError::Decode(e.to_string()))?;

    match value.get_mut("data") {
        Some(data) => Ok(data.take()),
        None => Ok(value),
    }
}
