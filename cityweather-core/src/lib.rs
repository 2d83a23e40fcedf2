//! Core library for the `cityweather` client.
//!
//! This crate defines:
//! - Configuration of the weather endpoint
//! - The transport seam (`WeatherProvider`) and its HTTP implementation
//! - The request handler that turns one city lookup into rendered output
//! - UI collaborator traits so the handler can run without a real front end
//!
//! It is used by `cityweather-cli`, but can also be embedded in other front ends.

pub mod config;
pub mod error;
pub mod handler;
pub mod model;
pub mod provider;
pub mod ui;

pub use config::Config;
pub use error::SubmitError;
pub use handler::RequestHandler;
pub use model::{UiState, WeatherQuery, WeatherResult};
pub use provider::{WeatherProvider, http::HttpProvider};
pub use ui::{DisplayElement, Notifier};
