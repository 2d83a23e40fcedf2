use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    SubmitError, UiState, WeatherQuery, WeatherResult,
    provider::WeatherProvider,
    ui::{DisplayElement, Notifier},
};

pub const LOADING_TEXT: &str = "Loading...";
pub const ERROR_PREFIX: &str = "Error: ";

/// Binds a trigger to one weather request and renders its outcome.
///
/// Activations are not serialized: `submit` takes `&self`, so several calls
/// may be in flight at once and whichever settles last owns the display.
#[derive(Clone)]
pub struct RequestHandler {
    provider: Arc<dyn WeatherProvider>,
    display: Arc<dyn DisplayElement>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for RequestHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestHandler")
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}

impl RequestHandler {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        display: Arc<dyn DisplayElement>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self { provider, display, notifier }
    }

    /// Run one activation with the raw input text.
    ///
    /// Blank input raises an alert, leaves the display alone and returns
    /// [`UiState::Idle`] without touching the network.
    pub async fn submit(&self, raw_city: &str) -> UiState {
        let query = match WeatherQuery::new(raw_city) {
            Ok(query) => query,
            Err(err) => {
                debug!("rejected blank city input");
                self.notifier.alert(&err.to_string());
                return UiState::Idle;
            }
        };

        self.render(UiState::Loading);

        let state = match self.provider.get_weather(&query).await {
            Ok(result) => {
                info!(city = %query.city, "weather received");
                UiState::Success(result)
            }
            Err(err) => {
                warn!(city = %query.city, kind = err.kind(), error = %err, "weather request failed");
                UiState::Failure(err.to_string())
            }
        };

        self.render(state)
    }

    fn render(&self, state: UiState) -> UiState {
        match state {
            UiState::Success(result) => match render_result(&result) {
                Ok(html) => {
                    self.display.set_html(&html);
                    UiState::Success(result)
                }
                Err(err) => self.render(UiState::Failure(err.to_string())),
            },
            UiState::Failure(msg) => {
                self.display.set_text(&render_error(&msg));
                UiState::Failure(msg)
            }
            UiState::Loading => {
                self.display.set_text(LOADING_TEXT);
                UiState::Loading
            }
            UiState::Idle => UiState::Idle,
        }
    }
}

/// Pretty-printed JSON (2-space indent) inside a `<pre>` block.
pub fn render_result(result: &WeatherResult) -> Result<String, SubmitError> {
    let pretty = serde_json::to_string_pretty(result)?;
    Ok(format!("<pre>{pretty}</pre>"))
}

pub fn render_error(message: &str) -> String {
    format!("{ERROR_PREFIX}{message}")
}
