//! # wirelessmesh-adapter-lifx
//!
//! Drives the physical device behind a mesh device id. A LIFX bulb stands
//! in for the addressable mesh device; its id must match the mesh device id.
//!
//! ## Dependency rule
//! Same as other adapters: depends on `wirelessmesh-app` and
//! `wirelessmesh-domain`.

pub mod config;
pub mod error;

use std::time::Duration;

use reqwest::{Client, Url};

use wirelessmesh_app::ports::DeviceControlPort;
use wirelessmesh_domain::error::MeshError;
use wirelessmesh_domain::id::AccessToken;

pub use config::LifxConfig;
pub use error::LifxError;

/// LIFX HTTP client implementing [`DeviceControlPort`].
#[derive(Clone)]
pub struct LifxDeviceControl {
    client: Client,
    base_url: Url,
}

impl LifxDeviceControl {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LifxError::BaseUrl`] if the base URL cannot carry a path,
    /// or [`LifxError::Request`] if the HTTP client cannot be built.
    pub fn new(config: &LifxConfig) -> Result<Self, LifxError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|err| LifxError::BaseUrl(format!("{}: {err}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(LifxError::BaseUrl(config.base_url.clone()));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, base_url })
    }

    /// `{base}/lights/{device_id}/toggle`, the device id encoded as a single
    /// path segment.
    fn toggle_url(&self, device_id: &str) -> Result<Url, LifxError> {
        if matches!(device_id, "" | "." | "..") {
            return Err(LifxError::DeviceId(device_id.to_string()));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| LifxError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["lights", device_id, "toggle"]);
        Ok(url)
    }

    async fn toggle(&self, access_token: &AccessToken, device_id: &str) -> Result<(), LifxError> {
        let response = self
            .client
            .post(self.toggle_url(device_id)?)
            .bearer_auth(access_token.as_str())
            .header("content-type", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let message = response.text().await.unwrap_or_default();
        Err(LifxError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

impl DeviceControlPort for LifxDeviceControl {
    #[tracing::instrument(skip(self, access_token))]
    async fn toggle_nightlight(
        &self,
        access_token: &AccessToken,
        device_id: &str,
    ) -> Result<(), MeshError> {
        self.toggle(access_token, device_id).await?;
        tracing::debug!("device toggled");
        Ok(())
    }
}
