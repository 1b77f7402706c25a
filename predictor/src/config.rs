use std::{env, path::Path, time::Duration};

use serde::Deserialize;

use crate::error::PredictorError;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8100/predict";
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(200);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

const ENV_ENDPOINT: &str = "PREDICTOR_ENDPOINT";
const ENV_MOCK_DELAY_MS: &str = "PREDICTOR_MOCK_DELAY_MS";
const ENV_CONNECT_TIMEOUT_MS: &str = "PREDICTOR_CONNECT_TIMEOUT_MS";

/// Settings shared by the prediction client and the mock bearing API.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub mock_delay: Duration,
    pub connect_timeout: Duration,
}

/// On-disk shape of the config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    endpoint: Option<String>,
    mock_delay_ms: Option<u64>,
    connect_timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            mock_delay: DEFAULT_MOCK_DELAY,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Loads a JSON config file on top of the defaults.
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be read and `InvalidConfig` if it is not valid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PredictorError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let file: ConfigFile = serde_json::from_str(&content)
            .map_err(|e| PredictorError::InvalidConfig(format!("{}: {e}", path.display())))?;

        let mut config = Self::default();
        if let Some(endpoint) = file.endpoint {
            config.endpoint = endpoint;
        }
        if let Some(ms) = file.mock_delay_ms {
            config.mock_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = file.connect_timeout_ms {
            config.connect_timeout = Duration::from_millis(ms);
        }
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by the process environment.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if a variable holds an unusable value.
    pub fn from_env() -> Result<Self, PredictorError> {
        Self::default().with_env()
    }

    /// Applies `PREDICTOR_*` environment overrides to `self`.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if a variable holds an unusable value.
    pub fn with_env(self) -> Result<Self, PredictorError> {
        self.with_vars(|key| env::var(key).ok())
    }

    fn with_vars<F>(mut self, var: F) -> Result<Self, PredictorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let millis = |key: &str, raw: String| {
            raw.trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| PredictorError::InvalidConfig(format!("{key} must be milliseconds, got '{raw}'")))
        };

        if let Some(endpoint) = var(ENV_ENDPOINT) {
            self.endpoint = endpoint;
        }
        if let Some(raw) = var(ENV_MOCK_DELAY_MS) {
            self.mock_delay = millis(ENV_MOCK_DELAY_MS, raw)?;
        }
        if let Some(raw) = var(ENV_CONNECT_TIMEOUT_MS) {
            self.connect_timeout = millis(ENV_CONNECT_TIMEOUT_MS, raw)?;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), PredictorError> {
        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(PredictorError::InvalidConfig(format!(
                "endpoint must be an http(s) url, got '{}'",
                self.endpoint
            )));
        }
        Ok(())
    }

    /// Scheme, host and port of the endpoint followed by `/`.
    pub fn root_url(&self) -> String {
        let endpoint = self.endpoint.trim();
        let after_scheme = endpoint.find("://").map_or(0, |i| i + 3);
        match endpoint[after_scheme..].find('/') {
            Some(i) => endpoint[..after_scheme + i + 1].to_string(),
            None => format!("{endpoint}/"),
        }
    }
}
