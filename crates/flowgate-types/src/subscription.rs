//! Subscription domain types for the Wazzup webhooks API.
//!
//! A user selects zero or more [`EventCategory`] values; bare message
//! events are implicit and always delivered. The selection is translated
//! into the fixed-shape [`SubscriptionFlags`] record the remote API
//! expects, and sent as part of a [`WebhookSubscription`] -- always the
//! full desired state, never an incremental patch.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TriggerConfigError;

/// An optional category of inbound events the user can subscribe to.
///
/// Bare message events are not listed here: the platform always delivers
/// them once a webhook is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// Message delivery status changes.
    Statuses,
    /// Contact and deal creation events.
    ContactsDeals,
    /// Channel status updates.
    Channels,
}

impl EventCategory {
    /// Canonical string form, matching the configuration vocabulary.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Statuses => "statuses",
            EventCategory::ContactsDeals => "contacts_deals",
            EventCategory::Channels => "channels",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = TriggerConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "statuses" => Ok(EventCategory::Statuses),
            "contacts_deals" => Ok(EventCategory::ContactsDeals),
            "channels" => Ok(EventCategory::Channels),
            other => Err(TriggerConfigError::UnknownCategory(other.to_string())),
        }
    }
}

/// The set of event categories selected for a trigger.
///
/// Order is irrelevant and duplicates collapse. An empty selection is
/// valid: bare message events are always active regardless.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSelection(BTreeSet<EventCategory>);

impl EventSelection {
    /// Empty selection (message events only).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a selection from configured category names.
    ///
    /// Any unrecognized name is an error -- the caller must not guess at
    /// what the user meant.
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self, TriggerConfigError> {
        names
            .iter()
            .map(|n| n.as_ref().parse())
            .collect::<Result<_, _>>()
            .map(Self)
    }

    pub fn insert(&mut self, category: EventCategory) {
        self.0.insert(category);
    }

    pub fn contains(&self, category: EventCategory) -> bool {
        self.0.contains(&category)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate the selected categories in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = EventCategory> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<EventCategory> for EventSelection {
    fn from_iter<I: IntoIterator<Item = EventCategory>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The three independent boolean toggles the remote API exposes for
/// categories of webhook events.
///
/// Invariant: each field is true iff the corresponding category is in
/// the current [`EventSelection`]. Derived per registration cycle via
/// [`SubscriptionFlags::for_selection`], never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionFlags {
    /// Message events plus delivery status changes.
    pub messages_and_statuses: bool,
    /// Contact and deal creation.
    pub contacts_and_deals_creation: bool,
    /// Channel status updates (the API calls this toggle `phones`).
    pub phones: bool,
}

impl SubscriptionFlags {
    /// Translate a category selection into the remote API's flag record.
    ///
    /// Pure and total: no error conditions, no side effects. An empty
    /// selection yields all-false flags.
    pub fn for_selection(selection: &EventSelection) -> Self {
        Self {
            messages_and_statuses: selection.contains(EventCategory::Statuses),
            contacts_and_deals_creation: selection.contains(EventCategory::ContactsDeals),
            phones: selection.contains(EventCategory::Channels),
        }
    }

    /// All toggles off.
    pub fn none() -> Self {
        Self::default()
    }
}

/// The full desired subscription state, as the remote API's state-setting
/// endpoint expects it.
///
/// The endpoint has no patch semantics from this gateway's point of view:
/// every call re-asserts the complete state. Constructed per call and
/// discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookSubscription {
    /// The externally reachable callback URL, or empty when unsubscribing.
    pub webhooks_uri: String,
    pub subscriptions: SubscriptionFlags,
}

impl WebhookSubscription {
    /// Desired state for an active registration.
    pub fn enable(callback_url: impl Into<String>, flags: SubscriptionFlags) -> Self {
        Self {
            webhooks_uri: callback_url.into(),
            subscriptions: flags,
        }
    }

    /// Desired state for a full teardown: empty callback URL, all flags
    /// cleared.
    pub fn disable() -> Self {
        Self {
            webhooks_uri: String::new(),
            subscriptions: SubscriptionFlags::none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_roundtrip() {
        for category in [
            EventCategory::Statuses,
            EventCategory::ContactsDeals,
            EventCategory::Channels,
        ] {
            let parsed: EventCategory = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_category_parse_unknown_fails() {
        let err = "messages".parse::<EventCategory>().unwrap_err();
        assert_eq!(err.to_string(), "unknown event category: 'messages'");
    }

    #[test]
    fn test_selection_collapses_duplicates() {
        let selection = EventSelection::parse(&["statuses", "statuses", "channels"]).unwrap();
        assert_eq!(selection.len(), 2);
        assert!(selection.contains(EventCategory::Statuses));
        assert!(selection.contains(EventCategory::Channels));
    }

    #[test]
    fn test_selection_parse_rejects_unknown_name() {
        assert!(EventSelection::parse(&["statuses", "bogus"]).is_err());
    }

    #[test]
    fn test_flags_mirror_selection_for_all_subsets() {
        let categories = [
            EventCategory::Statuses,
            EventCategory::ContactsDeals,
            EventCategory::Channels,
        ];
        for mask in 0u8..8 {
            let selection: EventSelection = categories
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, c)| *c)
                .collect();
            let flags = SubscriptionFlags::for_selection(&selection);
            assert_eq!(
                flags.messages_and_statuses,
                selection.contains(EventCategory::Statuses)
            );
            assert_eq!(
                flags.contacts_and_deals_creation,
                selection.contains(EventCategory::ContactsDeals)
            );
            assert_eq!(flags.phones, selection.contains(EventCategory::Channels));
        }
    }

    #[test]
    fn test_empty_selection_yields_all_false() {
        let flags = SubscriptionFlags::for_selection(&EventSelection::new());
        assert_eq!(flags, SubscriptionFlags::none());
    }

    #[test]
    fn test_flags_wire_names_are_camel_case() {
        let flags = SubscriptionFlags {
            messages_and_statuses: true,
            contacts_and_deals_creation: false,
            phones: true,
        };
        let json = serde_json::to_value(flags).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "messagesAndStatuses": true,
                "contactsAndDealsCreation": false,
                "phones": true,
            })
        );
    }

    #[test]
    fn test_enable_subscription_wire_shape() {
        let flags = SubscriptionFlags {
            messages_and_statuses: true,
            contacts_and_deals_creation: false,
            phones: true,
        };
        let body = WebhookSubscription::enable("https://example.com/hooks/wazzup", flags);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["webhooksUri"], "https://example.com/hooks/wazzup");
        assert_eq!(json["subscriptions"]["messagesAndStatuses"], true);
        assert_eq!(json["subscriptions"]["phones"], true);
    }

    #[test]
    fn test_disable_subscription_clears_everything() {
        let body = WebhookSubscription::disable();
        assert!(body.webhooks_uri.is_empty());
        assert_eq!(body.subscriptions, SubscriptionFlags::none());
    }
}
