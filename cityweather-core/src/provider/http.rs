use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, warn};

use crate::{SubmitError, WeatherQuery, WeatherResult};

use super::WeatherProvider;

/// Talks to the local weather backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    endpoint: Url,
    http: Client,
}

impl HttpProvider {
    /// `timeout` of `None` leaves reqwest's default in place, which never times out.
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { endpoint, http })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// `/health` on the endpoint's host.
    pub fn health_url(&self) -> Result<Url> {
        self.endpoint
            .join("/health")
            .with_context(|| format!("Failed to derive health URL from {}", self.endpoint))
    }

    /// Probe the backend's health route and return its JSON.
    pub async fn health(&self) -> Result<WeatherResult, SubmitError> {
        let url = self
            .health_url()
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        debug!(%url, "checking backend health");

        let res = self.http.get(url).send().await?;
        read_json(res).await
    }
}

#[async_trait]
impl WeatherProvider for HttpProvider {
    async fn get_weather(&self, query: &WeatherQuery) -> Result<WeatherResult, SubmitError> {
        debug!(endpoint = %self.endpoint, city = %query.city, "posting weather query");

        // `.json()` sets `Content-Type: application/json`.
        let res = self
            .http
            .post(self.endpoint.clone())
            .json(query)
            .send()
            .await?;

        read_json(res).await
    }
}

async fn read_json(res: reqwest::Response) -> Result<WeatherResult, SubmitError> {
    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        warn!(%status, "weather endpoint returned an error status");
        return Err(SubmitError::Remote(body));
    }

    let value: WeatherResult = serde_json::from_str(&body)?;
    Ok(value)
}
