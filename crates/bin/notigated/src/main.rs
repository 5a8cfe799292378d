//! # notigated — notigate daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Construct the event bus, the in-memory state store, and the webhook
//!   dispatcher
//! - Construct application services, injecting adapters via port traits
//! - Spawn the route tracker as a background task
//! - Build the axum router, bind to a TCP port, and serve
//! - Handle graceful shutdown (ctrl-c)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use notigate_adapter_http_axum::state::AppState;
use notigate_adapter_state_mem::InMemoryStateStore;
use notigate_adapter_webhook::WebhookDispatcher;
use notigate_app::event_bus::InProcessEventBus;
use notigate_app::services::notify_service::NotifyService;
use notigate_app::services::route_tracker::RouteTracker;

mod config;

use config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let mode = config.routing.mode();

    // Event bus
    let event_bus = Arc::new(InProcessEventBus::new(256));

    // Adapters
    let store = Arc::new(InMemoryStateStore::new(Arc::clone(&event_bus)));
    let dispatcher = WebhookDispatcher::new(config.dispatch.webhooks.clone());

    // Services
    let notify_service = Arc::new(NotifyService::new(
        mode.clone(),
        Arc::clone(&store),
        dispatcher,
        Arc::clone(&event_bus),
    ));
    let route_tracker = Arc::new(RouteTracker::new(mode, Arc::clone(&store)));
    let route_rx = route_tracker.subscribe();

    // Background: keep the current-route read model up to date
    let events = event_bus.subscribe();
    tokio::spawn({
        let tracker = Arc::clone(&route_tracker);
        async move { tracker.run(events).await }
    });

    // HTTP
    let state = AppState::new(store, notify_service, route_rx);
    let app = notigate_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!(%bind_addr, "notigated listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install ctrl-c handler");
    }
    tracing::info!("shutting down");
}
