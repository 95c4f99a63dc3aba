//! # wirelessmeshd, the wirelessmesh daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the event store, publishers and device control (adapters)
//! - Construct the location service, injecting adapters via port traits
//! - Build the axum router and serve until SIGTERM/SIGINT
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer. No domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use wirelessmesh_adapter_http_axum::state::AppState;
use wirelessmesh_adapter_lifx::LifxDeviceControl;
use wirelessmesh_adapter_mqtt::MqttPublisher;
use wirelessmesh_adapter_storage_sqlite_sqlx::Database;
use wirelessmesh_app::event_bus::InProcessEventBus;
use wirelessmesh_app::publisher::CompositePublisher;
use wirelessmesh_app::services::location_service::LocationService;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = Database::open(config.database_url())
        .await
        .context("opening database")?;
    let event_store = db.event_store();

    // Publishers
    let event_bus = Arc::new(InProcessEventBus::new(256));
    let mqtt = config.mqtt.enabled.then(|| MqttPublisher::connect(&config.mqtt));
    let publisher = CompositePublisher::new(
        Arc::clone(&event_bus),
        mqtt.as_ref().map(|(publisher, _)| publisher.clone()),
    );

    // Physical devices
    let devices = LifxDeviceControl::new(&config.lifx).context("building LIFX client")?;

    // Service
    let location_service = Arc::new(LocationService::new(event_store, publisher, devices));

    // HTTP
    let state = AppState::new(location_service, event_bus);
    let app = wirelessmesh_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!(%bind_addr, "wirelessmeshd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    if let Some((publisher, handle)) = mqtt {
        if let Err(err) = publisher.disconnect().await {
            tracing::warn!(%err, "failed to disconnect MQTT client");
        }
        handle.abort();
    }
    db.close().await;

    tracing::info!("wirelessmeshd stopped");
    Ok(())
}

/// Resolve on Ctrl+C (SIGINT) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
