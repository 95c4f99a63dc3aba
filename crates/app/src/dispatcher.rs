//! Side effects of accepted commands.
//!
//! Runs after the event is durably recorded and applied. Nothing here can
//! fail the command: failures are logged and dropped.

use wirelessmesh_domain::event::LocationEvent;
use wirelessmesh_domain::location::Location;

use crate::ports::{DeviceControlPort, PublishPort};

/// Publishes recorded events and drives physical devices.
pub struct SideEffectDispatcher<P, D> {
    publisher: P,
    devices: D,
}

impl<P, D> SideEffectDispatcher<P, D>
where
    P: PublishPort,
    D: DeviceControlPort,
{
    pub fn new(publisher: P, devices: D) -> Self {
        Self { publisher, devices }
    }

    /// Execute the effects of one recorded event.
    ///
    /// Every event is published. `NightlightToggled` additionally calls the
    /// physical device with the access token of `location` (the state after
    /// the event was applied).
    #[tracing::instrument(
        skip_all,
        fields(location_id = %event.location_id(), event_type = event.event_type())
    )]
    pub async fn dispatch(&self, event: &LocationEvent, location: Option<&Location>) {
        match event.to_bytes() {
            Ok(payload) => {
                if let Err(err) = self.publisher.publish(payload).await {
                    tracing::warn!(error = ?err, "failed to publish event");
                }
            }
            Err(err) => tracing::warn!(%err, "failed to encode event for publishing"),
        }

        if let LocationEvent::NightlightToggled { device_id, .. } = event {
            let Some(location) = location else {
                tracing::warn!(%device_id, "no location state, skipping device call");
                return;
            };
            if let Err(err) = self
                .devices
                .toggle_nightlight(location.access_token(), device_id)
                .await
            {
                tracing::warn!(error = ?err, %device_id, "failed to toggle nightlight on device");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use wirelessmesh_domain::error::MeshError;
    use wirelessmesh_domain::evolve::replay;
    use wirelessmesh_domain::id::AccessToken;

    #[derive(Default)]
    struct Publisher {
        payloads: Mutex<Vec<Vec<u8>>>,
    }

    impl PublishPort for Publisher {
        async fn publish(&self, payload: Vec<u8>) -> Result<(), MeshError> {
            self.payloads.lock().unwrap().push(payload);
            Ok(())
        }
    }

    #[derive(Default)]
    struct Devices {
        calls: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    impl DeviceControlPort for Devices {
        async fn toggle_nightlight(
            &self,
            access_token: &AccessToken,
            device_id: &str,
        ) -> Result<(), MeshError> {
            self.calls
                .lock()
                .unwrap()
                .push((access_token.as_str().to_string(), device_id.to_string()));
            if self.fail {
                return Err(MeshError::Integration("bulb unreachable".into()));
            }
            Ok(())
        }
    }

    fn events() -> Vec<LocationEvent> {
        vec![
            LocationEvent::LocationAdded {
                location_id: "customerId1".parse().unwrap(),
                access_token: "accessToken".parse().unwrap(),
            },
            LocationEvent::DeviceActivated {
                location_id: "customerId1".parse().unwrap(),
                device_id: "deviceId2".to_string(),
            },
            LocationEvent::NightlightToggled {
                location_id: "customerId1".parse().unwrap(),
                device_id: "deviceId2".to_string(),
                nightlight_on: true,
            },
        ]
    }

    fn dispatcher(
        fail_devices: bool,
    ) -> (
        SideEffectDispatcher<Arc<Publisher>, Arc<Devices>>,
        Arc<Publisher>,
        Arc<Devices>,
    ) {
        let publisher = Arc::new(Publisher::default());
        let devices = Arc::new(Devices {
            fail: fail_devices,
            ..Devices::default()
        });
        let dispatcher = SideEffectDispatcher::new(Arc::clone(&publisher), Arc::clone(&devices));
        (dispatcher, publisher, devices)
    }

    #[tokio::test]
    async fn should_publish_event_bytes_without_device_call() {
        let (dispatcher, publisher, devices) = dispatcher(false);
        let events = events();
        let state = replay(&events[..2]);

        dispatcher.dispatch(&events[1], state.as_ref()).await;

        let payloads = publisher.payloads.lock().unwrap();
        assert_eq!(*payloads, vec![events[1].to_bytes().unwrap()]);
        assert!(devices.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_call_device_with_stored_access_token_on_toggle() {
        let (dispatcher, publisher, devices) = dispatcher(false);
        let events = events();
        let state = replay(&events);

        dispatcher.dispatch(&events[2], state.as_ref()).await;

        assert_eq!(publisher.payloads.lock().unwrap().len(), 1);
        assert_eq!(
            *devices.calls.lock().unwrap(),
            vec![("accessToken".to_string(), "deviceId2".to_string())]
        );
    }

    #[tokio::test]
    async fn should_swallow_device_failure() {
        let (dispatcher, publisher, devices) = dispatcher(true);
        let events = events();
        let state = replay(&events);

        dispatcher.dispatch(&events[2], state.as_ref()).await;

        assert_eq!(devices.calls.lock().unwrap().len(), 1);
        assert_eq!(publisher.payloads.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_skip_device_call_without_location() {
        let (dispatcher, _publisher, devices) = dispatcher(false);
        let events = events();

        dispatcher.dispatch(&events[2], None).await;

        assert!(devices.calls.lock().unwrap().is_empty());
    }
}
