use std::sync::Arc;

use anyhow::Context;
use cityweather_core::{
    Config, DisplayElement, RequestHandler, handler::render_result,
    provider::provider_from_config,
};
use clap::{ArgAction, Parser, Subcommand};
use inquire::{CustomType, InquireError, Text};
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::terminal::{TerminalDisplay, TerminalNotifier};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Look up the weather for a city")]
pub struct Cli {
    /// Weather endpoint URL; overrides the config file.
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for a city.
    Show {
        /// City name.
        city: String,
    },

    /// Prompt for cities interactively until Esc or Ctrl-C.
    Prompt,

    /// Check that the backend is up.
    Health,

    /// Configure the endpoint and request timeout.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Show { city } => {
                let handler = build_handler(&config, self.endpoint.as_deref())?;
                handler.submit(&city).await;
            }
            Command::Prompt => {
                let handler = build_handler(&config, self.endpoint.as_deref())?;
                prompt_loop(handler).await?;
            }
            Command::Health => {
                let provider = provider_from_config(&config, self.endpoint.as_deref())?;
                let status = provider
                    .health()
                    .await
                    .with_context(|| format!("Health check against {} failed", provider.endpoint()))?;
                TerminalDisplay.set_html(&render_result(&status)?);
            }
            Command::Configure => configure(config)?,
        }

        Ok(())
    }
}

fn build_handler(config: &Config, endpoint: Option<&str>) -> anyhow::Result<Arc<RequestHandler>> {
    let provider = provider_from_config(config, endpoint)?;
    info!(endpoint = %provider.endpoint(), "using weather endpoint");

    Ok(Arc::new(RequestHandler::new(
        Arc::new(provider),
        Arc::new(TerminalDisplay),
        Arc::new(TerminalNotifier),
    )))
}

/// Every entered line is a trigger. Submits run concurrently and are not
/// cancelled by later input.
async fn prompt_loop(handler: Arc<RequestHandler>) -> anyhow::Result<()> {
    let mut in_flight = JoinSet::new();

    loop {
        let answer = tokio::task::spawn_blocking(|| Text::new("City:").prompt())
            .await
            .context("City prompt task failed")?;

        let city = match answer {
            Ok(city) => city,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city"),
        };

        let handler = handler.clone();
        in_flight.spawn(async move { handler.submit(&city).await });

        // Reap whatever has already settled.
        while in_flight.try_join_next().is_some() {}
    }

    debug!(pending = in_flight.len(), "waiting for in-flight requests");
    while in_flight.join_next().await.is_some() {}

    Ok(())
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let current = config
        .endpoint
        .clone()
        .unwrap_or_else(|| cityweather_core::config::DEFAULT_ENDPOINT.to_string());

    loop {
        let endpoint = Text::new("Weather endpoint:")
            .with_default(&current)
            .prompt()
            .context("Failed to read endpoint")?;

        match config.set_endpoint(&endpoint) {
            Ok(()) => break,
            Err(err) => eprintln!("{err:#}"),
        }
    }

    let help = match config.timeout_secs {
        Some(secs) => format!("Currently {secs}s. Esc keeps it, 0 removes it"),
        None => "Currently none. Esc keeps no timeout".to_string(),
    };
    let answer = CustomType::<u64>::new("Request timeout in seconds:")
        .with_help_message(&help)
        .prompt_skippable()
        .context("Failed to read timeout")?;
    config.apply_timeout_answer(answer);

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_with_global_flags() {
        let cli = Cli::try_parse_from([
            "cityweather",
            "show",
            "New York",
            "--endpoint",
            "http://127.0.0.1:9000/weather",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.endpoint.as_deref(), Some("http://127.0.0.1:9000/weather"));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Show { city } if city == "New York"));
    }

    #[test]
    fn show_requires_a_city() {
        assert!(Cli::try_parse_from(["cityweather", "show"]).is_err());
    }

    #[test]
    fn parses_bare_subcommands() {
        let cli = Cli::try_parse_from(["cityweather", "health"]).unwrap();
        assert!(matches!(cli.command, Command::Health));
        assert!(cli.endpoint.is_none());
    }
}
