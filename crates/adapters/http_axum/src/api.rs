//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod locations;
pub mod sse;
pub mod view;

use axum::Router;
use axum::routing::{get, post, put};

use wirelessmesh_app::ports::{DeviceControlPort, EventStore, PublishPort};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S, P, D>() -> Router<AppState<S, P, D>>
where
    S: EventStore + Send + Sync + 'static,
    P: PublishPort + Send + Sync + 'static,
    D: DeviceControlPort + Send + Sync + 'static,
{
    Router::new()
        .route("/locations", post(locations::add::<S, P, D>))
        .route(
            "/locations/{id}",
            get(locations::get::<S, P, D>).delete(locations::remove::<S, P, D>),
        )
        .route("/locations/{id}/events", get(locations::history::<S, P, D>))
        .route(
            "/locations/{id}/devices",
            post(locations::activate_device::<S, P, D>),
        )
        .route(
            "/locations/{id}/devices/{device_id}/room",
            put(locations::assign_room::<S, P, D>),
        )
        .route(
            "/locations/{id}/devices/{device_id}/nightlight",
            post(locations::toggle_nightlight::<S, P, D>),
        )
        .route("/events/stream", get(sse::stream::<S, P, D>))
}
