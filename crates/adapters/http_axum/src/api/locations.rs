//! JSON REST handlers for locations and their devices.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use wirelessmesh_app::ports::{DeviceControlPort, EventStore, PublishPort};
use wirelessmesh_domain::id::LocationId;
use wirelessmesh_domain::location::{Device, Location};

use crate::api::view::EventView;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for adding a location.
#[derive(Deserialize)]
pub struct AddLocationRequest {
    pub location_id: String,
    pub access_token: String,
}

/// Request body for activating a device.
#[derive(Deserialize)]
pub struct ActivateDeviceRequest {
    pub device_id: String,
}

/// Request body for assigning a room.
#[derive(Deserialize)]
pub struct AssignRoomRequest {
    pub room: String,
}

/// Public view of a location. The access token is never exposed.
#[derive(Serialize)]
pub struct LocationView {
    pub location_id: LocationId,
    pub devices: Vec<Device>,
}

impl From<Location> for LocationView {
    fn from(location: Location) -> Self {
        Self {
            location_id: location.id().clone(),
            devices: location.devices().to_vec(),
        }
    }
}

/// Possible responses from a command endpoint.
pub enum CommandResponse {
    Created(Json<EventView>),
    Ok(Json<EventView>),
}

impl IntoResponse for CommandResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<LocationView>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the history endpoint.
pub enum HistoryResponse {
    Ok(Json<Vec<EventView>>),
}

impl IntoResponse for HistoryResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/locations`
pub async fn add<S, P, D>(
    State(state): State<AppState<S, P, D>>,
    Json(req): Json<AddLocationRequest>,
) -> Result<CommandResponse, ApiError>
where
    S: EventStore + Send + Sync + 'static,
    P: PublishPort + Send + Sync + 'static,
    D: DeviceControlPort + Send + Sync + 'static,
{
    let recorded = state
        .location_service
        .add_location(&req.location_id, &req.access_token)
        .await?;
    Ok(CommandResponse::Created(Json(recorded.into())))
}

/// `GET /api/locations/:id`
pub async fn get<S, P, D>(
    State(state): State<AppState<S, P, D>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    S: EventStore + Send + Sync + 'static,
    P: PublishPort + Send + Sync + 'static,
    D: DeviceControlPort + Send + Sync + 'static,
{
    let location = state.location_service.get_location(&id).await?;
    Ok(GetResponse::Ok(Json(location.into())))
}

/// `DELETE /api/locations/:id`
pub async fn remove<S, P, D>(
    State(state): State<AppState<S, P, D>>,
    Path(id): Path<String>,
) -> Result<CommandResponse, ApiError>
where
    S: EventStore + Send + Sync + 'static,
    P: PublishPort + Send + Sync + 'static,
    D: DeviceControlPort + Send + Sync + 'static,
{
    let recorded = state.location_service.remove_location(&id).await?;
    Ok(CommandResponse::Ok(Json(recorded.into())))
}

/// `GET /api/locations/:id/events`
pub async fn history<S, P, D>(
    State(state): State<AppState<S, P, D>>,
    Path(id): Path<String>,
) -> Result<HistoryResponse, ApiError>
where
    S: EventStore + Send + Sync + 'static,
    P: PublishPort + Send + Sync + 'static,
    D: DeviceControlPort + Send + Sync + 'static,
{
    let events = state.location_service.location_history(&id).await?;
    Ok(HistoryResponse::Ok(Json(
        events.into_iter().map(EventView::from).collect(),
    )))
}

/// `POST /api/locations/:id/devices`
pub async fn activate_device<S, P, D>(
    State(state): State<AppState<S, P, D>>,
    Path(id): Path<String>,
    Json(req): Json<ActivateDeviceRequest>,
) -> Result<CommandResponse, ApiError>
where
    S: EventStore + Send + Sync + 'static,
    P: PublishPort + Send + Sync + 'static,
    D: DeviceControlPort + Send + Sync + 'static,
{
    let recorded = state
        .location_service
        .activate_device(&id, &req.device_id)
        .await?;
    Ok(CommandResponse::Created(Json(recorded.into())))
}

/// `PUT /api/locations/:id/devices/:device_id/room`
pub async fn assign_room<S, P, D>(
    State(state): State<AppState<S, P, D>>,
    Path((id, device_id)): Path<(String, String)>,
    Json(req): Json<AssignRoomRequest>,
) -> Result<CommandResponse, ApiError>
where
    S: EventStore + Send + Sync + 'static,
    P: PublishPort + Send + Sync + 'static,
    D: DeviceControlPort + Send + Sync + 'static,
{
    let recorded = state
        .location_service
        .assign_room(&id, &device_id, &req.room)
        .await?;
    Ok(CommandResponse::Ok(Json(recorded.into())))
}

/// `POST /api/locations/:id/devices/:device_id/nightlight`
pub async fn toggle_nightlight<S, P, D>(
    State(state): State<AppState<S, P, D>>,
    Path((id, device_id)): Path<(String, String)>,
) -> Result<CommandResponse, ApiError>
where
    S: EventStore + Send + Sync + 'static,
    P: PublishPort + Send + Sync + 'static,
    D: DeviceControlPort + Send + Sync + 'static,
{
    let recorded = state
        .location_service
        .toggle_nightlight(&id, &device_id)
        .await?;
    Ok(CommandResponse::Ok(Json(recorded.into())))
}
