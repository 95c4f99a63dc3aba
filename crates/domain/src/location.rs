//! Location: the aggregate root: one customer site and its mesh devices.
//!
//! The aggregate state is `Option<Location>`: `None` means the location does
//! not exist (never added, or removed). A `Location` is only ever built by
//! [`evolve`](crate::evolve::evolve) from a `LocationAdded` event.

use serde::{Deserialize, Serialize};

use crate::id::{AccessToken, LocationId};

/// A wireless mesh device (e.g. a smart bulb) registered at a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub device_id: String,
    pub location_id: LocationId,
    pub activated: bool,
    /// Empty when no room is assigned.
    pub room: String,
    pub nightlight_on: bool,
}

impl Device {
    /// A freshly activated device: no room, nightlight off.
    #[must_use]
    pub fn activated(location_id: LocationId, device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            location_id,
            activated: true,
            room: String::new(),
            nightlight_on: false,
        }
    }
}

/// A customer location.
///
/// `id` and `access_token` never change after creation. Devices are kept in
/// activation order; callers that need a canonical order sort explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    id: LocationId,
    access_token: AccessToken,
    devices: Vec<Device>,
}

impl Location {
    pub(crate) fn new(id: LocationId, access_token: AccessToken) -> Self {
        Self {
            id,
            access_token,
            devices: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &LocationId {
        &self.id
    }

    #[must_use]
    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Devices in activation order.
    #[must_use]
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Look up a device by id.
    #[must_use]
    pub fn device(&self, device_id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.device_id == device_id)
    }

    pub(crate) fn device_mut(&mut self, device_id: &str) -> Option<&mut Device> {
        self.devices.iter_mut().find(|d| d.device_id == device_id)
    }

    /// Insert the device, or mark an existing one as activated.
    pub(crate) fn activate_device(&mut self, device_id: &str) {
        if let Some(device) = self.device_mut(device_id) {
            device.activated = true;
        } else {
            let device = Device::activated(self.id.clone(), device_id);
            self.devices.push(device);
        }
    }
}
