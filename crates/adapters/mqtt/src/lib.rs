//! # wirelessmesh-adapter-mqtt
//!
//! MQTT adapter: publishes every recorded location event to a broker.
//!
//! ## Responsibilities
//! - Connect to an MQTT broker and keep the connection alive
//! - Implement `PublishPort` by sending the event bytes to one topic
//!
//! ## Dependency rule
//! Same as other adapters: depends on `wirelessmesh-app` and
//! `wirelessmesh-domain`.

pub mod config;
pub mod error;

use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use tokio::task::JoinHandle;

use wirelessmesh_app::ports::PublishPort;
use wirelessmesh_domain::error::MeshError;

pub use config::MqttConfig;
pub use error::MqttError;

/// Publishes event payloads to a single MQTT topic with QoS 1.
///
/// Publishing never waits for the broker: when the request queue is full
/// the payload is dropped and the call fails.
#[derive(Clone)]
pub struct MqttPublisher {
    client: AsyncClient,
    topic: String,
}

impl MqttPublisher {
    /// Create the client and spawn the task driving its event loop.
    ///
    /// The connection is established lazily by the event loop; publishing
    /// before it is up queues the message.
    #[must_use]
    pub fn connect(config: &MqttConfig) -> (Self, JoinHandle<()>) {
        let mut options = MqttOptions::new(
            config.client_id.clone(),
            config.broker_host.clone(),
            config.broker_port,
        );
        options.set_keep_alive(Duration::from_secs(u64::from(config.keep_alive_secs)));

        let (client, eventloop) = AsyncClient::new(options, config.queue_capacity);
        let handle = tokio::spawn(drive(eventloop));

        tracing::info!(
            host = %config.broker_host,
            port = config.broker_port,
            topic = %config.topic,
            "MQTT publisher started"
        );
        (Self::new(client, config.topic.clone()), handle)
    }

    /// Wrap an existing client.
    #[must_use]
    pub fn new(client: AsyncClient, topic: String) -> Self {
        Self { client, topic }
    }

    /// Ask the broker to close the session.
    ///
    /// # Errors
    ///
    /// Returns [`MqttError::Client`] if the request cannot be queued.
    pub async fn disconnect(&self) -> Result<(), MqttError> {
        self.client.disconnect().await.map_err(MqttError::Client)
    }
}

impl PublishPort for MqttPublisher {
    #[tracing::instrument(skip_all, fields(topic = %self.topic, bytes = payload.len()))]
    async fn publish(&self, payload: Vec<u8>) -> Result<(), MeshError> {
        self.client
            .try_publish(&self.topic, QoS::AtLeastOnce, false, payload)
            .map_err(MqttError::Client)?;
        Ok(())
    }
}

async fn drive(mut eventloop: EventLoop) {
    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => tracing::info!("MQTT connected"),
            Ok(Event::Outgoing(rumqttc::Outgoing::Disconnect)) => {
                tracing::info!("MQTT disconnected");
                return;
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(error = %err, "MQTT connection error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    }
}
