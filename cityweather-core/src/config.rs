use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

/// Endpoint used when neither the command line nor the config file names one.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/weather";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// endpoint = "http://127.0.0.1:8000/weather"
/// timeout_secs = 10
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Weather endpoint URL. Falls back to [`DEFAULT_ENDPOINT`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Request timeout. Absent means the transport's own default (no timeout).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Resolve the endpoint, letting `override_url` win over the stored value.
    pub fn endpoint_url(&self, override_url: Option<&str>) -> Result<Url> {
        let raw = override_url
            .or(self.endpoint.as_deref())
            .unwrap_or(DEFAULT_ENDPOINT);

        let url = Url::parse(raw).with_context(|| format!("Invalid endpoint URL: {raw}"))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(anyhow!(
                "Unsupported endpoint scheme '{other}' in {raw}. Use http or https."
            )),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Apply an answer from the timeout prompt. A skipped prompt keeps the
    /// stored value and `0` clears it.
    pub fn apply_timeout_answer(&mut self, answer: Option<u64>) {
        match answer {
            None => {}
            Some(0) => self.timeout_secs = None,
            Some(secs) => self.timeout_secs = Some(secs),
        }
    }

    pub fn set_endpoint(&mut self, endpoint: &str) -> Result<()> {
        let url = self.endpoint_url(Some(endpoint))?;
        self.endpoint = Some(url.to_string());
        Ok(())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "cityweather", "cityweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint_when_nothing_configured() {
        let cfg = Config::default();
        let url = cfg.endpoint_url(None).unwrap();
        assert_eq!(url.as_str(), DEFAULT_ENDPOINT);
        assert!(cfg.timeout().is_none());
    }

    #[test]
    fn override_beats_config_file() {
        let cfg = Config {
            endpoint: Some("http://10.0.0.1:9000/weather".into()),
            timeout_secs: None,
        };

        assert_eq!(cfg.endpoint_url(None).unwrap().port(), Some(9000));

        let url = cfg.endpoint_url(Some("http://localhost:7000/weather")).unwrap();
        assert_eq!(url.host_str(), Some("localhost"));
        assert_eq!(url.port(), Some(7000));
    }

    #[test]
    fn rejects_bad_endpoints() {
        let cfg = Config::default();

        let err = cfg.endpoint_url(Some("not a url")).unwrap_err();
        assert!(err.to_string().contains("Invalid endpoint URL"));

        let err = cfg.endpoint_url(Some("ftp://127.0.0.1/weather")).unwrap_err();
        assert!(err.to_string().contains("Unsupported endpoint scheme"));
    }

    #[test]
    fn set_endpoint_validates_before_storing() {
        let mut cfg = Config::default();
        assert!(cfg.set_endpoint("nope").is_err());
        assert!(cfg.endpoint.is_none());

        cfg.set_endpoint("http://127.0.0.1:8080/weather").unwrap();
        assert_eq!(cfg.endpoint.as_deref(), Some("http://127.0.0.1:8080/weather"));
    }

    #[test]
    fn skipped_timeout_prompt_keeps_stored_value() {
        let mut cfg = Config { endpoint: None, timeout_secs: Some(7) };

        cfg.apply_timeout_answer(None);
        assert_eq!(cfg.timeout_secs, Some(7));

        cfg.apply_timeout_answer(Some(12));
        assert_eq!(cfg.timeout_secs, Some(12));

        cfg.apply_timeout_answer(Some(0));
        assert_eq!(cfg.timeout_secs, None);
    }

    #[test]
    fn parses_toml() {
        let cfg = Config::from_toml("endpoint = \"http://h:1/weather\"\ntimeout_secs = 5\n").unwrap();
        assert_eq!(cfg.endpoint.as_deref(), Some("http://h:1/weather"));
        assert_eq!(cfg.timeout(), Some(Duration::from_secs(5)));

        let empty = Config::from_toml("").unwrap();
        assert_eq!(empty, Config::default());
    }
}
