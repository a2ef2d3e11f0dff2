//! Reqwest-based gateway for the reservation API

use crate::error::GatewayError;
use courtrace_core::DeviceIdentity;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Bounded per-request timeout. Each flow makes five calls, so one flow's
/// wall-clock cost is bounded at five times this.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Gateway to the reservation API.
///
/// Owns a dedicated connection pool and applies the fixed header set to every
/// call. One gateway per concurrent flow; never share a gateway across flows.
pub struct Gateway {
    client: Client,
    base_url: String,
    utility_id: i64,
    token: String,
    device: DeviceIdentity,
}

impl Gateway {
    /// Create a gateway for one flow.
    ///
    /// The base URL should include any path prefix and no trailing slash.
    pub fn new(
        base_url: impl Into<String>,
        utility_id: i64,
        token: impl Into<String>,
        device: &DeviceIdentity,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap(),
            base_url: base_url.into(),
            utility_id,
            token: token.into(),
            device: device.clone(),
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn utility_id(&self) -> i64 {
        self.utility_id
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.decorate(self.client.get(format!("{}{}", self.base_url, path)))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.decorate(self.client.post(format!("{}{}", self.base_url, path)))
    }

    /// Apply the fixed header set the server requires on every call.
    fn decorate(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("user-agent", &self.device.user_agent)
            .header("app-version-name", &self.device.app_version)
            .header("device-inf", &self.device.device_inf)
            .header("accept-language", &self.device.language)
            .header("x-vinhome-token", &self.token)
            .header("device-id", &self.device.device_id)
            .header("content-type", "application/json; charset=UTF-8")
    }

    /// Issue a decorated request and capture the outcome uniformly: decoded
    /// body on 2xx, [`GatewayError::Status`] with the raw body otherwise.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, GatewayError> {
        let response = request.send().await.map_err(GatewayError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<T>().await.map_err(GatewayError::Decode)
    }
}
