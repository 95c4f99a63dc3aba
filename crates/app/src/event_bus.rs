//! In-process event bus backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use wirelessmesh_domain::error::MeshError;

use crate::ports::PublishPort;

/// In-process publisher using a tokio [`broadcast`] channel of encoded events.
///
/// Publishing succeeds even when there are no active subscribers
/// (the payload is simply dropped).
pub struct InProcessEventBus {
    sender: broadcast::Sender<Vec<u8>>,
}

impl InProcessEventBus {
    /// Create a new event bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to payloads on this bus.
    ///
    /// Returns a receiver that will get all payloads published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Vec<u8>> {
        self.sender.subscribe()
    }
}

impl PublishPort for InProcessEventBus {
    fn publish(&self, payload: Vec<u8>) -> impl Future<Output = Result<(), MeshError>> + Send {
        // send only fails when nobody listens
        let _ = self.sender.send(payload);
        async { Ok(()) }
    }
}
