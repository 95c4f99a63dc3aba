//! LIFX adapter error types.

use wirelessmesh_domain::error::MeshError;

/// Errors talking to the LIFX API.
#[derive(Debug, thiserror::Error)]
pub enum LifxError {
    /// The request could not be sent or timed out.
    #[error("LIFX request failed")]
    Request(#[from] reqwest::Error),

    /// The configured base URL is not a usable HTTP base.
    #[error("invalid LIFX base URL {0}")]
    BaseUrl(String),

    /// The device id cannot address a single light.
    #[error("device id {0:?} cannot be addressed")]
    DeviceId(String),

    /// The API answered with a non-success status.
    #[error("LIFX API returned status {status}: {message}")]
    Status { status: u16, message: String },
}

impl From<LifxError> for MeshError {
    fn from(err: LifxError) -> Self {
        Self::Integration(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_status_error() {
        let err = LifxError::Status {
            status: 401,
            message: "bad token".to_string(),
        };
        assert_eq!(err.to_string(), "LIFX API returned status 401: bad token");
    }

    #[test]
    fn should_convert_to_integration_error() {
        let err: MeshError = LifxError::Status {
            status: 500,
            message: String::new(),
        }
        .into();
        assert!(matches!(err, MeshError::Integration(_)));
    }
}
