//! Server-Sent Events (SSE) stream for real-time updates.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use wirelessmesh_app::ports::{DeviceControlPort, EventStore, PublishPort};
use wirelessmesh_domain::event::LocationEvent;

use crate::api::view::PublicEvent;
use crate::state::AppState;

/// `GET /api/events/stream`: SSE stream of published location events.
///
/// Subscribes to the event bus and sends each payload as an SSE frame named
/// after the event type, with the JSON event (access token removed) as
/// `data:`. The stream continues until the client disconnects or the bus
/// is closed.
pub async fn stream<S, P, D>(
    State(state): State<AppState<S, P, D>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>
where
    S: EventStore + Send + Sync + 'static,
    P: PublishPort + Send + Sync + 'static,
    D: DeviceControlPort + Send + Sync + 'static,
{
    let receiver = state.event_bus.subscribe();
    let events = BroadcastStream::new(receiver).filter_map(|result| match result {
        Ok(payload) => to_sse(&payload).map(Ok),
        Err(BroadcastStreamRecvError::Lagged(n)) => {
            tracing::warn!(skipped = n, "SSE subscriber lagged, some events were dropped");
            None
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

fn to_sse(payload: &[u8]) -> Option<Event> {
    let event = match LocationEvent::from_bytes(payload) {
        Ok(event) => event,
        Err(err) => {
            tracing::warn!(%err, "dropping undecodable payload from SSE stream");
            return None;
        }
    };
    let name = event.event_type();
    match serde_json::to_string(&PublicEvent::from(event)) {
        Ok(data) => Some(Event::default().event(name).data(data)),
        Err(err) => {
            tracing::warn!(%err, "dropping unserializable event from SSE stream");
            None
        }
    }
}
