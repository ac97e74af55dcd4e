//! Inbound webhook event types.
//!
//! [`InboundEventType`] is the closed set of tags the classifier can
//! assign to a delivery, so consumers can match on it exhaustively.
//! Wire names are fixed by the platform and are deliberately not one
//! uniform case convention (`createContact` vs `contacts_deals`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Canonical tag assigned to an inbound webhook delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InboundEventType {
    /// Test ping sent by the platform when a webhook is registered.
    #[serde(rename = "test")]
    Test,
    #[serde(rename = "createContact")]
    CreateContact,
    /// New inbound message.
    #[serde(rename = "messages")]
    Messages,
    /// Message delivery status change.
    #[serde(rename = "statuses")]
    Statuses,
    #[serde(rename = "contacts_deals")]
    ContactsDeals,
    /// Channel status update.
    #[serde(rename = "channels")]
    Channels,
    /// Payload shape not recognized.
    #[serde(rename = "default")]
    Default,
    /// Delivery carried no body, or a body with no keys.
    #[serde(rename = "empty")]
    Empty,
}

impl InboundEventType {
    /// Match a payload's first key against the recognized tag names.
    ///
    /// `default` is itself a recognized name; `empty` is not -- it is
    /// reserved for the no-body case and a payload keyed `empty`
    /// classifies as unrecognized.
    pub fn from_payload_key(key: &str) -> Option<Self> {
        match key {
            "test" => Some(InboundEventType::Test),
            "createContact" => Some(InboundEventType::CreateContact),
            "messages" => Some(InboundEventType::Messages),
            "statuses" => Some(InboundEventType::Statuses),
            "contacts_deals" => Some(InboundEventType::ContactsDeals),
            "channels" => Some(InboundEventType::Channels),
            "default" => Some(InboundEventType::Default),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InboundEventType::Test => "test",
            InboundEventType::CreateContact => "createContact",
            InboundEventType::Messages => "messages",
            InboundEventType::Statuses => "statuses",
            InboundEventType::ContactsDeals => "contacts_deals",
            InboundEventType::Channels => "channels",
            InboundEventType::Default => "default",
            InboundEventType::Empty => "empty",
        }
    }
}

impl std::fmt::Display for InboundEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw webhook delivery as received on the inbound endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundDelivery {
    /// Request headers, lowercased names.
    pub headers: BTreeMap<String, String>,
    /// Parsed JSON body, if any was sent.
    pub body: Option<serde_json::Value>,
}

impl InboundDelivery {
    pub fn new(headers: BTreeMap<String, String>, body: Option<serde_json::Value>) -> Self {
        Self { headers, body }
    }
}

/// A delivery annotated with its classification.
///
/// Classification annotates, it never transforms: `headers` and `body`
/// are the original delivery's content, unmodified. Constructed once per
/// delivery and handed to the engine; no further mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedEvent {
    pub event_type: InboundEventType,
    pub headers: BTreeMap<String, String>,
    /// Original body; `null` when the delivery carried none.
    pub body: serde_json::Value,
}
