use thiserror::Error;

/// Everything that can go wrong during one submit.
///
/// The `Display` text of each variant is the message shown to the user,
/// without the `Error: ` prefix added by the handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Empty city; caught before any I/O.
    #[error("Enter a city")]
    Input,

    /// Non-2xx response; carries the raw body.
    #[error("{0}")]
    Remote(String),

    /// Connection or protocol failure.
    #[error("{0}")]
    Transport(String),

    /// A 2xx response whose body is not valid JSON.
    #[error("{0}")]
    Parse(String),
}

impl SubmitError {
    pub fn kind(&self) -> &'static str {
        match self {
            SubmitError::Input => "input",
            SubmitError::Remote(_) => "remote",
            SubmitError::Transport(_) => "transport",
            SubmitError::Parse(_) => "parse",
        }
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        SubmitError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for SubmitError {
    fn from(err: serde_json::Error) -> Self {
        SubmitError::Parse(err.to_string())
    }
}
