//! Application state wiring the gateway together.
//!
//! `AppState` pins the generic [`TriggerLifecycle`] to the concrete
//! Wazzup client and holds the event bus and socket registry shared by
//! all handlers. The lifecycle sits behind a `tokio::sync::Mutex`:
//! activation and deactivation are mutually exclusive by contract, and
//! the mutex is how the hosting layer expresses that.

use std::sync::Arc;

use tokio::sync::Mutex;

use flowgate_core::event::EventBus;
use flowgate_core::reply::SocketRegistry;
use flowgate_core::trigger::TriggerLifecycle;
use flowgate_infra::config::FlowgateConfig;
use flowgate_infra::wazzup::WazzupClient;
use flowgate_types::credentials::WazzupCredentials;

/// The lifecycle pinned to the concrete infra client.
pub type GatewayLifecycle = TriggerLifecycle<WazzupClient>;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub lifecycle: Arc<Mutex<GatewayLifecycle>>,
    pub event_bus: EventBus,
    pub socket_registry: Arc<SocketRegistry>,
    pub config: Arc<FlowgateConfig>,
    pub credentials: Arc<WazzupCredentials>,
}

impl AppState {
    pub fn new(config: FlowgateConfig, credentials: WazzupCredentials) -> Self {
        let client = WazzupClient::new().with_base_url(config.wazzup.api_base.clone());
        Self {
            lifecycle: Arc::new(Mutex::new(TriggerLifecycle::new(client))),
            event_bus: EventBus::new(1024),
            socket_registry: Arc::new(SocketRegistry::new()),
            config: Arc::new(config),
            credentials: Arc::new(credentials),
        }
    }
}
