//! Location service: hosts one aggregate instance per location id.
//!
//! Every command for a location runs under that location's lock:
//! decide → append to the event store → evolve → dispatch side effects.
//! Commands for different locations run concurrently. An instance replays
//! its stream from the store the first time it is used.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use wirelessmesh_domain::command::LocationCommand;
use wirelessmesh_domain::decide::{decide, get_location};
use wirelessmesh_domain::error::{MeshError, NotFoundError};
use wirelessmesh_domain::event::RecordedEvent;
use wirelessmesh_domain::evolve::evolve;
use wirelessmesh_domain::id::LocationId;
use wirelessmesh_domain::location::Location;

use crate::dispatcher::SideEffectDispatcher;
use crate::ports::{DeviceControlPort, EventStore, PublishPort};

/// In-memory state of one location, as of `version`.
#[derive(Default)]
struct Aggregate {
    loaded: bool,
    version: u64,
    state: Option<Location>,
}

/// Application service running commands against location aggregates.
pub struct LocationService<S, P, D> {
    store: S,
    dispatcher: SideEffectDispatcher<P, D>,
    aggregates: Mutex<HashMap<LocationId, Arc<Mutex<Aggregate>>>>,
}

impl<S, P, D> LocationService<S, P, D>
where
    S: EventStore + Send + Sync,
    P: PublishPort + Send + Sync,
    D: DeviceControlPort + Send + Sync,
{
    /// Create a new service persisting to `store`, publishing through
    /// `publisher` and driving physical devices through `devices`.
    pub fn new(store: S, publisher: P, devices: D) -> Self {
        Self {
            store,
            dispatcher: SideEffectDispatcher::new(publisher, devices),
            aggregates: Mutex::new(HashMap::new()),
        }
    }

    /// Run one command to completion.
    ///
    /// On success the event is recorded, applied and its side effects have
    /// run (their failures are only logged).
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::Rejected`] when the aggregate refuses the
    /// command (nothing is recorded and no side effect runs),
    /// [`MeshError::Conflict`] when another writer moved the stream, or a
    /// storage error propagated from the event store.
    #[tracing::instrument(
        skip_all,
        fields(location_id = command.location_id(), command = command.name())
    )]
    pub async fn execute(&self, command: LocationCommand) -> Result<RecordedEvent, MeshError> {
        let Ok(location_id) = command.location_id().parse::<LocationId>() else {
            // no aggregate can carry a malformed id, let decide say why
            decide(None, &command)?;
            return Err(NotFoundError::Location.into());
        };

        let handle = self.instance(&location_id).await;
        let result = self.run(&location_id, &handle, &command).await;
        self.release(&location_id, handle).await;
        result
    }

    /// Register a new location.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn add_location(
        &self,
        location_id: &str,
        access_token: &str,
    ) -> Result<RecordedEvent, MeshError> {
        self.execute(LocationCommand::AddLocation {
            location_id: location_id.to_string(),
            access_token: access_token.to_string(),
        })
        .await
    }

    /// Remove a location.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn remove_location(&self, location_id: &str) -> Result<RecordedEvent, MeshError> {
        self.execute(LocationCommand::RemoveLocation {
            location_id: location_id.to_string(),
        })
        .await
    }

    /// Activate a device at a location.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn activate_device(
        &self,
        location_id: &str,
        device_id: &str,
    ) -> Result<RecordedEvent, MeshError> {
        self.execute(LocationCommand::ActivateDevice {
            location_id: location_id.to_string(),
            device_id: device_id.to_string(),
        })
        .await
    }

    /// Assign a device to a room.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn assign_room(
        &self,
        location_id: &str,
        device_id: &str,
        room: &str,
    ) -> Result<RecordedEvent, MeshError> {
        self.execute(LocationCommand::AssignRoom {
            location_id: location_id.to_string(),
            device_id: device_id.to_string(),
            room: room.to_string(),
        })
        .await
    }

    /// Flip a device's nightlight and drive the physical device.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn toggle_nightlight(
        &self,
        location_id: &str,
        device_id: &str,
    ) -> Result<RecordedEvent, MeshError> {
        self.execute(LocationCommand::ToggleNightlight {
            location_id: location_id.to_string(),
            device_id: device_id.to_string(),
        })
        .await
    }

    /// Current state of a location.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError::Location`] when the location does not exist,
    /// or a storage error if its stream cannot be loaded.
    #[tracing::instrument(skip(self))]
    pub async fn get_location(&self, location_id: &str) -> Result<Location, MeshError> {
        let Ok(id) = location_id.parse::<LocationId>() else {
            return Err(NotFoundError::Location.into());
        };

        let handle = self.instance(&id).await;
        let result: Result<Location, MeshError> = async {
            let mut aggregate = handle.lock().await;
            self.hydrate(&id, &mut aggregate).await?;
            Ok(get_location(aggregate.state.as_ref(), location_id)?.clone())
        }
        .await;
        self.release(&id, handle).await;
        result
    }

    /// Every recorded event of a location, oldest first, including events
    /// from before a removal.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError::Location`] when the stream is empty, or a
    /// storage error from the event store.
    #[tracing::instrument(skip(self))]
    pub async fn location_history(&self, location_id: &str) -> Result<Vec<RecordedEvent>, MeshError> {
        let Ok(id) = location_id.parse::<LocationId>() else {
            return Err(NotFoundError::Location.into());
        };

        let history = self.store.load(&id).await?;
        if history.is_empty() {
            return Err(NotFoundError::Location.into());
        }
        Ok(history)
    }

    async fn run(
        &self,
        location_id: &LocationId,
        handle: &Mutex<Aggregate>,
        command: &LocationCommand,
    ) -> Result<RecordedEvent, MeshError> {
        let mut aggregate = handle.lock().await;
        self.hydrate(location_id, &mut aggregate).await?;

        let event = decide(aggregate.state.as_ref(), command).inspect_err(|rejection| {
            tracing::info!(%rejection, "command rejected");
        })?;

        let recorded = match self
            .store
            .append(location_id, aggregate.version, event)
            .await
        {
            Ok(recorded) => recorded,
            Err(err) => {
                // reload from the log before the next command
                aggregate.loaded = false;
                return Err(err);
            }
        };

        aggregate.state = evolve(aggregate.state.take(), &recorded.event);
        aggregate.version = recorded.sequence;
        tracing::debug!(sequence = recorded.sequence, "event recorded");

        self.dispatcher
            .dispatch(&recorded.event, aggregate.state.as_ref())
            .await;

        Ok(recorded)
    }

    async fn instance(&self, location_id: &LocationId) -> Arc<Mutex<Aggregate>> {
        let mut aggregates = self.aggregates.lock().await;
        Arc::clone(aggregates.entry(location_id.clone()).or_default())
    }

    /// Drop the instance of a location with no recorded events once nobody
    /// else holds it, so reads and rejections of unknown ids leave nothing
    /// behind.
    async fn release(&self, location_id: &LocationId, handle: Arc<Mutex<Aggregate>>) {
        let mut aggregates = self.aggregates.lock().await;
        // the map and this handle
        if Arc::strong_count(&handle) > 2 {
            return;
        }
        let unused = handle
            .try_lock()
            .is_ok_and(|aggregate| aggregate.version == 0);
        if unused {
            aggregates.remove(location_id);
        }
    }

    async fn hydrate(
        &self,
        location_id: &LocationId,
        aggregate: &mut Aggregate,
    ) -> Result<(), MeshError> {
        if aggregate.loaded {
            return Ok(());
        }

        let history = self.store.load(location_id).await?;
        let mut state = None;
        let mut version = 0;
        for recorded in &history {
            state = evolve(state, &recorded.event);
            version = recorded.sequence;
        }
        tracing::debug!(%location_id, events = history.len(), "replayed location");

        *aggregate = Aggregate {
            loaded: true,
            version,
            state,
        };
        Ok(())
    }
}
