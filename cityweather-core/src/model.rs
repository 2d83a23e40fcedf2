use serde::{Deserialize, Serialize};

use crate::error::SubmitError;

/// Body of the `POST /weather` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherQuery {
    pub city: String,
}

impl WeatherQuery {
    /// Build a query from raw input text. The city is trimmed and must not be empty.
    ///
    /// A byte order mark counts as whitespace here.
    pub fn new(raw: &str) -> Result<Self, SubmitError> {
        let city = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
        if city.is_empty() {
            return Err(SubmitError::Input);
        }

        Ok(Self { city: city.to_string() })
    }
}

/// Whatever JSON the endpoint answers with. No schema is assumed.
pub type WeatherResult = serde_json::Value;

/// Lifecycle of a single request/response cycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Success(WeatherResult),
    Failure(String),
}

impl UiState {
    pub fn is_success(&self) -> bool {
        matches!(self, UiState::Success(_))
    }

    /// Failure message, if any.
    pub fn failure(&self) -> Option<&str> {
        match self {
            UiState::Failure(msg) => Some(msg),
            _ => None,
        }
    }
}
