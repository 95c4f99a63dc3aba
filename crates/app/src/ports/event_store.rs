//! Event store port: the durable, per-location event log.

use std::future::Future;

use wirelessmesh_domain::error::MeshError;
use wirelessmesh_domain::event::{LocationEvent, RecordedEvent};
use wirelessmesh_domain::id::LocationId;

/// Append-only storage of [`LocationEvent`]s, one stream per location.
pub trait EventStore {
    /// Append `event` to the stream of `location_id`.
    ///
    /// `expected_sequence` is the sequence of the last event the caller has
    /// seen (0 for an empty stream); the new event gets `expected_sequence + 1`.
    /// Returns [`MeshError::Conflict`] when the stream has moved on.
    fn append(
        &self,
        location_id: &LocationId,
        expected_sequence: u64,
        event: LocationEvent,
    ) -> impl Future<Output = Result<RecordedEvent, MeshError>> + Send;

    /// Load the full stream of `location_id`, ordered by sequence.
    fn load(
        &self,
        location_id: &LocationId,
    ) -> impl Future<Output = Result<Vec<RecordedEvent>, MeshError>> + Send;
}

impl<T: EventStore + Send + Sync> EventStore for std::sync::Arc<T> {
    fn append(
        &self,
        location_id: &LocationId,
        expected_sequence: u64,
        event: LocationEvent,
    ) -> impl Future<Output = Result<RecordedEvent, MeshError>> + Send {
        (**self).append(location_id, expected_sequence, event)
    }

    fn load(
        &self,
        location_id: &LocationId,
    ) -> impl Future<Output = Result<Vec<RecordedEvent>, MeshError>> + Send {
        (**self).load(location_id)
    }
}
