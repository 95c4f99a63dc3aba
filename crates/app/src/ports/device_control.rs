//! Device control port: calls into physical mesh devices.

use std::future::Future;

use wirelessmesh_domain::error::MeshError;
use wirelessmesh_domain::id::AccessToken;

/// Drives physical devices on behalf of a location.
///
/// Implementations return connectivity failures as errors; retrying or
/// degrading is their concern, not the caller's.
pub trait DeviceControlPort {
    /// Flip the nightlight of `device_id` using the location's credential.
    fn toggle_nightlight(
        &self,
        access_token: &AccessToken,
        device_id: &str,
    ) -> impl Future<Output = Result<(), MeshError>> + Send;
}

impl<T: DeviceControlPort + Send + Sync> DeviceControlPort for std::sync::Arc<T> {
    fn toggle_nightlight(
        &self,
        access_token: &AccessToken,
        device_id: &str,
    ) -> impl Future<Output = Result<(), MeshError>> + Send {
        (**self).toggle_nightlight(access_token, device_id)
    }
}
