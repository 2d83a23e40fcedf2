use crate::{Config, SubmitError, WeatherQuery, WeatherResult, provider::http::HttpProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod http;

/// Transport seam between the request handler and the weather endpoint.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, query: &WeatherQuery) -> Result<WeatherResult, SubmitError>;
}

/// Construct the HTTP provider from config, with an optional endpoint override.
pub fn provider_from_config(
    config: &Config,
    endpoint_override: Option<&str>,
) -> anyhow::Result<HttpProvider> {
    let endpoint = config.endpoint_url(endpoint_override)?;
    HttpProvider::new(endpoint, config.timeout())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_uses_default_endpoint() {
        let provider = provider_from_config(&Config::default(), None).unwrap();
        assert_eq!(provider.endpoint().as_str(), crate::config::DEFAULT_ENDPOINT);
    }

    #[test]
    fn provider_from_config_errors_on_invalid_override() {
        let err = provider_from_config(&Config::default(), Some("::")).unwrap_err();
        assert!(err.to_string().contains("Invalid endpoint URL"));
    }
}
