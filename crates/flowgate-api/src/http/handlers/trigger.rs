//! Trigger lifecycle routes.
//!
//! Activation and deactivation are mutually exclusive: both take the
//! lifecycle mutex for the duration of the remote call. The category
//! selection is re-read from configuration on every activation.

use axum::Json;
use axum::extract::State;
use uuid::Uuid;

use flowgate_types::subscription::EventSelection;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/trigger/activate - Register the webhook subscription.
///
/// A failure leaves the trigger unregistered and surfaces as the
/// response status; nothing is retried here.
pub async fn activate(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let request_id = Uuid::now_v7().to_string();

    let selection = EventSelection::parse(&state.config.trigger.categories)?;
    let callback_url = state.config.trigger.callback_url.clone();
    if callback_url.is_empty() {
        return Err(AppError::Validation(
            "trigger.callback_url is not configured".to_string(),
        ));
    }

    let mut lifecycle = state.lifecycle.lock().await;
    lifecycle
        .activate(&state.credentials, &callback_url, &selection)
        .await?;

    Ok(Json(ApiResponse::success(
        serde_json::json!({ "state": lifecycle.state().as_str() }),
        request_id,
    )))
}

/// POST /api/v1/trigger/deactivate - Clear the webhook subscription.
///
/// The local trigger stops even when the remote call fails; the error is
/// still surfaced so the caller can re-trigger the teardown.
pub async fn deactivate(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let request_id = Uuid::now_v7().to_string();

    let mut lifecycle = state.lifecycle.lock().await;
    lifecycle.deactivate(&state.credentials).await?;

    Ok(Json(ApiResponse::success(
        serde_json::json!({ "state": lifecycle.state().as_str() }),
        request_id,
    )))
}

/// GET /api/v1/trigger - Current lifecycle state.
pub async fn status(State(state): State<AppState>) -> Json<ApiResponse<serde_json::Value>> {
    let request_id = Uuid::now_v7().to_string();
    let lifecycle = state.lifecycle.lock().await;

    Json(ApiResponse::success(
        serde_json::json!({
            "state": lifecycle.state().as_str(),
            "callback_url": state.config.trigger.callback_url,
            "categories": state.config.trigger.categories,
        }),
        request_id,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use flowgate_infra::config::FlowgateConfig;
    use flowgate_types::credentials::WazzupCredentials;

    fn state_for(server: &MockServer, categories: Vec<String>) -> AppState {
        let mut config = FlowgateConfig::default();
        config.wazzup.api_base = server.uri();
        config.trigger.callback_url = "https://example.com/hooks/wazzup".to_string();
        config.trigger.categories = categories;
        AppState::new(config, WazzupCredentials::new("test-key".into()))
    }

    #[tokio::test]
    async fn test_activate_registers_with_translated_flags() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/webhooks"))
            .and(body_json(serde_json::json!({
                "webhooksUri": "https://example.com/hooks/wazzup",
                "subscriptions": {
                    "messagesAndStatuses": true,
                    "contactsAndDealsCreation": false,
                    "phones": true,
                }
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let state = state_for(
            &server,
            vec!["statuses".to_string(), "channels".to_string()],
        );
        let response = activate(State(state.clone())).await.unwrap();
        assert_eq!(response.0.data["state"], "registered");
        assert!(state.lifecycle.lock().await.is_registered());
    }

    #[tokio::test]
    async fn test_activate_with_unknown_category_is_a_validation_error() {
        let server = MockServer::start().await;
        let state = state_for(&server, vec!["emails".to_string()]);

        let result = activate(State(state.clone())).await;
        assert!(matches!(result, Err(AppError::TriggerConfig(_))));
        // No remote call was made.
        assert!(server.received_requests().await.unwrap().is_empty());
        assert!(!state.lifecycle.lock().await.is_registered());
    }

    #[tokio::test]
    async fn test_activate_failure_leaves_trigger_unregistered() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/webhooks"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let state = state_for(&server, vec![]);
        let result = activate(State(state.clone())).await;
        assert!(matches!(result, Err(AppError::Subscription(_))));
        assert!(!state.lifecycle.lock().await.is_registered());
    }

    #[tokio::test]
    async fn test_deactivate_always_sends_cleared_state() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/webhooks"))
            .and(body_json(serde_json::json!({
                "webhooksUri": "",
                "subscriptions": {
                    "messagesAndStatuses": false,
                    "contactsAndDealsCreation": false,
                    "phones": false,
                }
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let state = state_for(&server, vec!["statuses".to_string()]);
        let response = deactivate(State(state)).await.unwrap();
        assert_eq!(response.0.data["state"], "unregistered");
    }

    #[tokio::test]
    async fn test_status_reports_configuration() {
        let server = MockServer::start().await;
        let state = state_for(&server, vec!["channels".to_string()]);

        let response = status(State(state)).await;
        assert_eq!(response.0.data["state"], "unregistered");
        assert_eq!(response.0.data["categories"][0], "channels");
    }
}
