use std::path::Path;

use serde::Deserialize;

/// Top-level client configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Origin of the games service, e.g. `http://127.0.0.1:8080`.
    pub base_url: String,
    /// Resource path of the games collection, resolved against `base_url`.
    pub games_path: String,
    pub store: StoreConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            games_path: "/games".to_string(),
            store: StoreConfig::default(),
        }
    }
}

/// Store behavior settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub fetch_ordering: FetchOrdering,
}

/// Which list response gets to commit when fetches overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchOrdering {
    /// Every successful response commits as it arrives; the last to resolve wins.
    #[default]
    LastResolved,
    /// A response commits only if it was issued after the last committed one.
    LastIssued,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    InvalidUrl(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(m) => write!(f, "invalid client config: {m}"),
            Self::InvalidUrl(m) => write!(f, "invalid games URL: {m}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ClientConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load config from `path` if it exists, falling back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => {
                    tracing::info!(path = %path.display(), "Loaded client configuration");
                    cfg
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), "{e}, using defaults");
                    Self::default()
                },
            },
            Err(_) => {
                tracing::info!(path = %path.display(), "No client config found, using defaults");
                Self::default()
            },
        }
    }

    /// Resolve the games collection URL, validating `base_url` and `games_path`.
    pub fn games_url(&self) -> Result<reqwest::Url, ConfigError> {
        let base = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                self.base_url
            )));
        }
        if self.games_path.is_empty() {
            return Err(ConfigError::InvalidUrl("games_path is empty".to_string()));
        }
        base.join(&self.games_path)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {e}", self.games_path)))
    }
}
