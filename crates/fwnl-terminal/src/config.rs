//! Terminal configuration, loadable from TOML.

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TerminalConfig {
    /// Name printed in front of the bot's replies.
    #[serde(default = "default_nickname")]
    pub nickname: String,
    /// Name printed in the input prompt.
    #[serde(default = "default_user")]
    pub user: String,
}

fn default_nickname() -> String {
    "FwBot Terminal".to_string()
}

fn default_user() -> String {
    "User".to_string()
}

impl TerminalConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            nickname: default_nickname(),
            user: default_user(),
        }
    }
}
