//! Shared application state for axum handlers.

use std::sync::Arc;

use wirelessmesh_app::event_bus::InProcessEventBus;
use wirelessmesh_app::ports::{DeviceControlPort, EventStore, PublishPort};
use wirelessmesh_app::services::location_service::LocationService;

/// Application state shared across all axum handlers.
///
/// Generic over the event store, publisher and device-control types to
/// avoid dynamic dispatch. `Clone` is implemented manually so the
/// underlying types themselves do not need to be `Clone`; only the `Arc`
/// wrappers are cloned.
pub struct AppState<S, P, D> {
    /// Command runtime for location aggregates.
    pub location_service: Arc<LocationService<S, P, D>>,
    /// Bus the SSE feed subscribes to.
    pub event_bus: Arc<InProcessEventBus>,
}

impl<S, P, D> Clone for AppState<S, P, D> {
    fn clone(&self) -> Self {
        Self {
            location_service: Arc::clone(&self.location_service),
            event_bus: Arc::clone(&self.event_bus),
        }
    }
}

impl<S, P, D> AppState<S, P, D>
where
    S: EventStore + Send + Sync + 'static,
    P: PublishPort + Send + Sync + 'static,
    D: DeviceControlPort + Send + Sync + 'static,
{
    /// Create a new application state.
    ///
    /// `event_bus` should be one of the publishers behind `location_service`,
    /// otherwise the SSE feed stays silent.
    pub fn new(
        location_service: Arc<LocationService<S, P, D>>,
        event_bus: Arc<InProcessEventBus>,
    ) -> Self {
        Self {
            location_service,
            event_bus,
        }
    }
}
