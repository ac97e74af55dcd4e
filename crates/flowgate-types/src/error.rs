use thiserror::Error;

/// Errors resolving a trigger's configured event categories.
///
/// An empty category list is not an error -- bare message events are
/// implicit -- but a name outside the known vocabulary is.
#[derive(Debug, Error)]
pub enum TriggerConfigError {
    #[error("unknown event category: '{0}'")]
    UnknownCategory(String),
}

/// Errors from the remote subscription API.
///
/// Surfaced to the activation/deactivation caller; never retried or
/// recovered locally.
#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("subscription API returned {status}: {body}")]
    RemoteStatus { status: u16, body: String },
}

/// Errors from the Directus record dispatcher.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("directus API returned {status}: {body}")]
    RemoteStatus { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("invalid filter JSON: {0}")]
    InvalidFilter(String),

    #[error("failed to read upload payload '{0}': {1}")]
    UploadPayload(String, String),
}

/// Errors from the websocket reply dispatcher.
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("no websocket listener connection is active")]
    NoListener,

    #[error("item carries no connection id in field '{0}'")]
    MissingResource(String),

    #[error("websocket connection '{0}' is gone")]
    ConnectionGone(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_error_display() {
        let err = SubscriptionError::RemoteStatus {
            status: 401,
            body: "bad token".to_string(),
        };
        assert_eq!(err.to_string(), "subscription API returned 401: bad token");
    }

    #[test]
    fn test_trigger_config_error_display() {
        let err = TriggerConfigError::UnknownCategory("emails".to_string());
        assert_eq!(err.to_string(), "unknown event category: 'emails'");
    }

    #[test]
    fn test_reply_error_display() {
        let err = ReplyError::MissingResource("ws".to_string());
        assert!(err.to_string().contains("'ws'"));
    }
}
