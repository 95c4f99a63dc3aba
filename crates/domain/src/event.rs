//! Event: an immutable fact about a location, already decided.
//!
//! Events are the unit of persistence and replay. They are versionless and
//! serialize to a stable byte form (UTF-8 JSON of the externally tagged
//! enum), which is both what the event store keeps and what the publisher
//! sends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{AccessToken, EventId, LocationId};

/// UTC timestamp recorded alongside persisted events.
pub type Timestamp = DateTime<Utc>;

/// Everything that can happen to a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationEvent {
    LocationAdded {
        location_id: LocationId,
        access_token: AccessToken,
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
    /// Carries the resulting value so replay never recomputes it.
    NightlightToggled {
        location_id: LocationId,
        device_id: String,
        nightlight_on: bool,
    },
}

impl LocationEvent {
    /// The aggregate this event belongs to.
    #[must_use]
    pub fn location_id(&self) -> &LocationId {
        match self {
            Self::LocationAdded { location_id, .. }
            | Self::LocationRemoved { location_id }
            | Self::DeviceActivated { location_id, .. }
            | Self::RoomAssigned { location_id, .. }
            | Self::NightlightToggled { location_id, .. } => location_id,
        }
    }

    /// Variant name, as stored in the `event_type` column.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::LocationAdded { .. } => "LocationAdded",
            Self::LocationRemoved { .. } => "LocationRemoved",
            Self::DeviceActivated { .. } => "DeviceActivated",
            Self::RoomAssigned { .. } => "RoomAssigned",
            Self::NightlightToggled { .. } => "NightlightToggled",
        }
    }

    /// Encode to the stable byte form.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; the event types contain only strings
    /// and booleans, so this does not fail in practice.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decode from the stable byte form.
    ///
    /// # Errors
    ///
    /// Returns an error when the payload is not a well-formed event or
    /// carries an invalid location id or access token.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// A [`LocationEvent`] as persisted by the event store.
///
/// `sequence` starts at 1 and has no gaps within one location's stream.
/// The envelope is never consulted when applying the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedEvent {
    pub id: EventId,
    pub location_id: LocationId,
    pub sequence: u64,
    pub recorded_at: Timestamp,
    pub event: LocationEvent,
}
