//! Event application: `evolve(state, event) -> state`.
//!
//! Used identically for replaying the log and for applying a freshly
//! recorded event. Total and deterministic: every event is accepted, and an
//! event addressing a missing location or device leaves the state as is.

use crate::event::LocationEvent;
use crate::location::Location;

/// Apply one event to the aggregate state.
#[must_use]
pub fn evolve(state: Option<Location>, event: &LocationEvent) -> Option<Location> {
    match event {
        LocationEvent::LocationAdded {
            location_id,
            access_token,
        } => Some(Location::new(location_id.clone(), access_token.clone())),
        LocationEvent::LocationRemoved { .. } => None,
        LocationEvent::DeviceActivated { device_id, .. } => state.map(|mut location| {
            location.activate_device(device_id);
            location
        }),
        LocationEvent::RoomAssigned {
            device_id, room, ..
        } => state.map(|mut location| {
            if let Some(device) = location.device_mut(device_id) {
                device.room.clone_from(room);
            }
            location
        }),
        LocationEvent::NightlightToggled {
            device_id,
            nightlight_on,
            ..
        } => state.map(|mut location| {
            if let Some(device) = location.device_mut(device_id) {
                device.nightlight_on = *nightlight_on;
            }
            location
        }),
    }
}

/// Rebuild the state from an ordered event history, starting from nothing.
#[must_use]
pub fn replay<'a, I>(events: I) -> Option<Location>
where
    I: IntoIterator<Item = &'a LocationEvent>,
{
    events.into_iter().fold(None, evolve)
}
