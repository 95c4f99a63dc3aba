//! Publish port: outbound delivery of recorded events.

use std::future::Future;

use wirelessmesh_domain::error::MeshError;

/// Publishes the encoded bytes of a recorded event to the outside world.
///
/// Delivery is best-effort: the caller logs a failure and moves on, the
/// event is already recorded.
pub trait PublishPort {
    /// Publish one encoded event.
    fn publish(&self, payload: Vec<u8>) -> impl Future<Output = Result<(), MeshError>> + Send;
}

impl<T: PublishPort + Send + Sync> PublishPort for std::sync::Arc<T> {
    fn publish(&self, payload: Vec<u8>) -> impl Future<Output = Result<(), MeshError>> + Send {
        (**self).publish(payload)
    }
}

/// An absent publisher accepts everything.
impl<T: PublishPort + Send + Sync> PublishPort for Option<T> {
    fn publish(&self, payload: Vec<u8>) -> impl Future<Output = Result<(), MeshError>> + Send {
        async move {
            match self {
                Some(inner) => inner.publish(payload).await,
                None => Ok(()),
            }
        }
    }
}
