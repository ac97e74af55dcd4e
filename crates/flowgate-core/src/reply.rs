//! Reply dispatch to live websocket peers.
//!
//! The events endpoint registers each websocket connection's outbound
//! sender in a [`SocketRegistry`] and stamps the connection id onto the
//! workflow items it produces. A downstream reply step names the item
//! field holding that id; [`SocketRegistry::reply`] resolves it and
//! writes the content to the socket.
//!
//! This is a lookup-and-dispatch operation: no queueing, no retry. A
//! missing field, a dead connection, and the absence of any listener at
//! all are distinct hard errors.

use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::mpsc;
use uuid::Uuid;

use flowgate_types::error::ReplyError;

/// Thread-safe registry of live outbound websocket handles.
///
/// Uses `DashMap` for concurrent access without locking the whole
/// registry. Entries are inserted on connect and removed on disconnect
/// or on the first failed send.
pub struct SocketRegistry {
    connections: DashMap<Uuid, mpsc::Sender<String>>,
}

impl SocketRegistry {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Register a connection's outbound sender, returning its id.
    pub fn register(&self, sender: mpsc::Sender<String>) -> Uuid {
        let id = Uuid::now_v7();
        self.connections.insert(id, sender);
        tracing::debug!(connection_id = %id, "websocket connection registered");
        id
    }

    /// Remove a connection. Returns true if it was present.
    pub fn unregister(&self, id: Uuid) -> bool {
        let removed = self.connections.remove(&id).is_some();
        if removed {
            tracing::debug!(connection_id = %id, "websocket connection unregistered");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Write `content` to the connection with the given id.
    ///
    /// A dead peer is pruned from the registry on the failed send.
    pub async fn send(&self, id: Uuid, content: String) -> Result<(), ReplyError> {
        // Clone the sender out before awaiting so no map shard stays
        // locked across the await point.
        let sender = self
            .connections
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ReplyError::ConnectionGone(id.to_string()))?;

        if sender.send(content).await.is_err() {
            self.connections.remove(&id);
            return Err(ReplyError::ConnectionGone(id.to_string()));
        }
        Ok(())
    }

    /// Reply to the peer referenced by a workflow item.
    ///
    /// `resource_field` names the item field expected to hold the
    /// connection id stamped by the listener endpoint. Fails when no
    /// listener connection is active at all, when the field is absent or
    /// malformed, or when the referenced connection is gone.
    pub async fn reply(
        &self,
        item: &Value,
        resource_field: &str,
        content: &str,
    ) -> Result<Uuid, ReplyError> {
        if self.is_empty() {
            return Err(ReplyError::NoListener);
        }

        let id = item
            .get(resource_field)
            .and_then(Value::as_str)
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .ok_or_else(|| ReplyError::MissingResource(resource_field.to_string()))?;

        self.send(id, content.to_string()).await?;
        tracing::debug!(connection_id = %id, "reply dispatched");
        Ok(id)
    }
}

impl Default for SocketRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SocketRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocketRegistry")
            .field("connections", &self.connections.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_with(field: &str, id: Uuid) -> Value {
        serde_json::json!({ "eventType": "messages", field: id.to_string() })
    }

    #[tokio::test]
    async fn test_reply_reaches_registered_connection() {
        let registry = SocketRegistry::new();
        let (tx, mut rx) = mpsc::channel(4);
        let id = registry.register(tx);

        let sent_to = registry
            .reply(&item_with("ws", id), "ws", "hello peer")
            .await
            .unwrap();

        assert_eq!(sent_to, id);
        assert_eq!(rx.recv().await.unwrap(), "hello peer");
    }

    #[tokio::test]
    async fn test_reply_without_any_listener_fails() {
        let registry = SocketRegistry::new();
        let item = serde_json::json!({ "ws": Uuid::now_v7().to_string() });

        let err = registry.reply(&item, "ws", "hi").await.unwrap_err();
        assert!(matches!(err, ReplyError::NoListener));
    }

    #[tokio::test]
    async fn test_reply_with_missing_field_fails() {
        let registry = SocketRegistry::new();
        let (tx, _rx) = mpsc::channel(4);
        registry.register(tx);

        let item = serde_json::json!({ "eventType": "messages" });
        let err = registry.reply(&item, "ws", "hi").await.unwrap_err();
        assert!(matches!(err, ReplyError::MissingResource(field) if field == "ws"));
    }

    #[tokio::test]
    async fn test_reply_with_non_uuid_field_fails_as_missing() {
        let registry = SocketRegistry::new();
        let (tx, _rx) = mpsc::channel(4);
        registry.register(tx);

        let item = serde_json::json!({ "ws": "not-a-uuid" });
        let err = registry.reply(&item, "ws", "hi").await.unwrap_err();
        assert!(matches!(err, ReplyError::MissingResource(_)));
    }

    #[tokio::test]
    async fn test_reply_to_unknown_connection_fails() {
        let registry = SocketRegistry::new();
        let (tx, _rx) = mpsc::channel(4);
        registry.register(tx);

        let stranger = Uuid::now_v7();
        let err = registry
            .reply(&item_with("ws", stranger), "ws", "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, ReplyError::ConnectionGone(_)));
    }

    #[tokio::test]
    async fn test_dead_peer_is_pruned_on_send() {
        let registry = SocketRegistry::new();
        let (tx, rx) = mpsc::channel(4);
        let id = registry.register(tx);
        drop(rx);

        let err = registry.send(id, "hi".to_string()).await.unwrap_err();
        assert!(matches!(err, ReplyError::ConnectionGone(_)));
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_unregister_removes_connection() {
        let registry = SocketRegistry::new();
        let (tx, _rx) = mpsc::channel(4);
        let id = registry.register(tx);

        assert_eq!(registry.len(), 1);
        assert!(registry.unregister(id));
        assert!(registry.is_empty());
        assert!(!registry.unregister(id));
    }
}
