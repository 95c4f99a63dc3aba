//! MQTT adapter error types.

use wirelessmesh_domain::error::MeshError;

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// The rumqttc client could not queue the request.
    #[error("MQTT client error")]
    Client(#[source] rumqttc::ClientError),
}

impl From<MqttError> for MeshError {
    fn from(err: MqttError) -> Self {
        Self::Integration(Box::new(err))
    }
}
