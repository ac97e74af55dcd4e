//! Inbound webhook payload classification.
//!
//! Maps an arbitrary delivery to exactly one [`InboundEventType`] tag.
//! Classification is total: it has no error path. Unrecognized shapes
//! degrade to `Default`, missing or keyless bodies to `Empty`.

use serde_json::Value;

use flowgate_types::event::{ClassifiedEvent, InboundDelivery, InboundEventType};

/// Classify a raw webhook delivery.
///
/// Rules:
/// 1. No body, a non-object body, or an object with no keys -> `Empty`.
/// 2. Otherwise the *first* key of the body object is matched against
///    the recognized tag names; a match yields that tag.
/// 3. No match -> `Default`.
///
/// Only the first key is inspected; later keys are irrelevant even when
/// they match a tag name. The original headers and body are carried into
/// the result unmodified.
pub fn classify(delivery: InboundDelivery) -> ClassifiedEvent {
    let InboundDelivery { headers, body } = delivery;
    let body = body.unwrap_or(Value::Null);

    let event_type = match &body {
        Value::Object(map) => match map.keys().next() {
            Some(first_key) => InboundEventType::from_payload_key(first_key)
                .unwrap_or(InboundEventType::Default),
            None => InboundEventType::Empty,
        },
        _ => InboundEventType::Empty,
    };

    ClassifiedEvent {
        event_type,
        headers,
        body,
    }
}
