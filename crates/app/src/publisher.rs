//! Publisher fan-out.

use std::future::Future;

use wirelessmesh_domain::error::MeshError;

use crate::ports::PublishPort;

/// Publishes every payload to two publishers in turn.
///
/// The second publisher is attempted even when the first one fails; the
/// first failure is the one reported.
pub struct CompositePublisher<A, B> {
    first: A,
    second: B,
}

impl<A, B> CompositePublisher<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> PublishPort for CompositePublisher<A, B>
where
    A: PublishPort + Send + Sync,
    B: PublishPort + Send + Sync,
{
    fn publish(&self, payload: Vec<u8>) -> impl Future<Output = Result<(), MeshError>> + Send {
        async move {
            let first = self.first.publish(payload.clone()).await;
            let second = self.second.publish(payload).await;
            first.and(second)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder {
        payloads: Mutex<Vec<Vec<u8>>>,
        fail: bool,
    }

    impl PublishPort for Recorder {
        async fn publish(&self, payload: Vec<u8>) -> Result<(), MeshError> {
            self.payloads.lock().unwrap().push(payload);
            if self.fail {
                return Err(MeshError::Integration("broker down".into()));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn should_publish_to_both() {
        let a = Arc::new(Recorder::default());
        let b = Arc::new(Recorder::default());
        let composite = CompositePublisher::new(Arc::clone(&a), Arc::clone(&b));

        composite.publish(b"one".to_vec()).await.unwrap();

        assert_eq!(*a.payloads.lock().unwrap(), vec![b"one".to_vec()]);
        assert_eq!(*b.payloads.lock().unwrap(), vec![b"one".to_vec()]);
    }

    #[tokio::test]
    async fn should_reach_second_when_first_fails() {
        let a = Arc::new(Recorder {
            fail: true,
            ..Recorder::default()
        });
        let b = Arc::new(Recorder::default());
        let composite = CompositePublisher::new(Arc::clone(&a), Arc::clone(&b));

        let result = composite.publish(b"one".to_vec()).await;

        assert!(matches!(result, Err(MeshError::Integration(_))));
        assert_eq!(b.payloads.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_treat_missing_publisher_as_success() {
        let a = Arc::new(Recorder::default());
        let composite = CompositePublisher::new(Arc::clone(&a), None::<Recorder>);

        assert!(composite.publish(b"one".to_vec()).await.is_ok());
        assert_eq!(a.payloads.lock().unwrap().len(), 1);
    }
}
