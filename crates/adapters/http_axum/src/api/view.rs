//! Outward-facing event representations.
//!
//! Mirrors the stored event shape, minus the location's access token.

use serde::Serialize;

use wirelessmesh_domain::event::{LocationEvent, RecordedEvent, Timestamp};
use wirelessmesh_domain::id::{EventId, LocationId};

/// A [`LocationEvent`] as shown to API and SSE clients.
#[derive(Debug, Serialize)]
pub enum PublicEvent {
    LocationAdded {
        location_id: LocationId,
    },
    LocationRemoved {
        location_id: LocationId,
    },
    DeviceActivated {
        location_id: LocationId,
        device_id: String,
    },
    RoomAssigned {
        location_id: LocationId,
        device_id: String,
        room: String,
    },
    NightlightToggled {
        location_id: LocationId,
        device_id: String,
        nightlight_on: bool,
    },
}

impl From<LocationEvent> for PublicEvent {
    fn from(event: LocationEvent) -> Self {
        match event {
            LocationEvent::LocationAdded { location_id, .. } => Self::LocationAdded { location_id },
            LocationEvent::LocationRemoved { location_id } => Self::LocationRemoved { location_id },
            LocationEvent::DeviceActivated {
                location_id,
                device_id,
            } => Self::DeviceActivated {
                location_id,
                device_id,
            },
            LocationEvent::RoomAssigned {
                location_id,
                device_id,
                room,
            } => Self::RoomAssigned {
                location_id,
                device_id,
                room,
            },
            LocationEvent::NightlightToggled {
                location_id,
                device_id,
                nightlight_on,
            } => Self::NightlightToggled {
                location_id,
                device_id,
                nightlight_on,
            },
        }
    }
}

/// A [`RecordedEvent`] as shown to API clients.
#[derive(Debug, Serialize)]
pub struct EventView {
    pub id: EventId,
    pub location_id: LocationId,
    pub sequence: u64,
    pub recorded_at: Timestamp,
    pub event: PublicEvent,
}

impl From<RecordedEvent> for EventView {
    fn from(recorded: RecordedEvent) -> Self {
        Self {
            id: recorded.id,
            location_id: recorded.location_id,
            sequence: recorded.sequence,
            recorded_at: recorded.recorded_at,
            event: recorded.event.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_drop_access_token_from_location_added() {
        let event = LocationEvent::LocationAdded {
            location_id: "customerId1".parse().unwrap(),
            access_token: "secretToken".parse().unwrap(),
        };

        let json = serde_json::to_value(PublicEvent::from(event)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"LocationAdded": {"location_id": "customerId1"}})
        );
    }

    #[test]
    fn should_keep_shape_of_other_events() {
        let event = LocationEvent::NightlightToggled {
            location_id: "customerId1".parse().unwrap(),
            device_id: "deviceId1".to_string(),
            nightlight_on: true,
        };

        let public = serde_json::to_vec(&PublicEvent::from(event.clone())).unwrap();

        assert_eq!(public, event.to_bytes().unwrap());
    }
}
