// src/gateways/geolocation_gateway.rs
//
// Geolocation seams: device-reported position (tier 1) and the external
// city-label lookup (tier 2). Both are best-effort inputs to the
// geolocation service's fallback chain; neither failure ever propagates
// past that service.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;

use crate::config::GeolocationApiConfig;
use crate::domain::Coordinates;
use crate::error::{AppError, AppResult};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait DevicePositionSource: Send + Sync {
    /// Platform-reported position. `Err` means unavailable - the caller
    /// falls through to the default label.
    async fn current_position(&self) -> AppResult<Coordinates>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CityLabelGateway: Send + Sync {
    /// Resolve a human-readable city label. The position is advisory;
    /// implementations may key on something else entirely (see
    /// `IpstackGateway`).
    async fn city_label(&self, position: Coordinates) -> AppResult<String>;
}

/// Position source for headless hosts: tier 1 is always unavailable, so
/// the fallback chain proceeds directly to the default label.
pub struct UnavailableDevicePosition;

#[async_trait]
impl DevicePositionSource for UnavailableDevicePosition {
    async fn current_position(&self) -> AppResult<Coordinates> {
        Err(AppError::Other(
            "device position is not available on this host".to_string(),
        ))
    }
}

#[derive(Debug, Deserialize)]
struct IpstackCheckResponse {
    city: Option<String>,
}

/// ipstack-backed city lookup. The `/check` endpoint keys on the caller's
/// IP address; the device position is only logged.
pub struct IpstackGateway {
    base_url: String,
    api_key: String,
    http_client: Client,
}

impl IpstackGateway {
    pub fn new(config: &GeolocationApiConfig, timeout: Duration) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AppError::Transport)?;

        Ok(Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            http_client,
        })
    }
}

#[async_trait]
impl CityLabelGateway for IpstackGateway {
    async fn city_label(&self, position: Coordinates) -> AppResult<String> {
        log::debug!(
            "city lookup keys on caller IP; device position {:.4},{:.4} is advisory",
            position.latitude,
            position.longitude
        );

        let url = format!("{}/check", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("access_key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let parsed: IpstackCheckResponse = serde_json::from_str(&body)?;

        parsed
            .city
            .filter(|city| !city.is_empty())
            .ok_or_else(|| AppError::Other("geolocation service returned no city".to_string()))
    }
}
