//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `listener.bind_address`.
pub const ENV_BIND_ADDRESS: &str = "RELAY_BIND_ADDRESS";
/// Environment variable overriding `backend.base_url`.
pub const ENV_BACKEND_BASE_URL: &str = "RELAY_BACKEND_BASE_URL";
/// Environment variable overriding `backend.api_key`.
pub const ENV_BACKEND_API_KEY: &str = "RELAY_BACKEND_API_KEY";
/// Environment variable overriding `backend.bearer_token`.
pub const ENV_BACKEND_BEARER_TOKEN: &str = "RELAY_BACKEND_BEARER_TOKEN";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration from an optional TOML file, apply environment
/// overrides, then validate the result.
///
/// Without a file the built-in defaults are used.
pub fn load_config(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_file(path)?,
        None => RelayConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn parse_file(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Overlay values from the environment onto `config`.
///
/// `lookup` abstracts the environment so callers can supply their own source.
/// Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut RelayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(addr) = get(ENV_BIND_ADDRESS) {
        config.listener.bind_address = addr;
    }
    if let Some(url) = get(ENV_BACKEND_BASE_URL) {
        config.backend.base_url = url;
    }
    if let Some(key) = get(ENV_BACKEND_API_KEY) {
        config.backend.api_key = key;
    }
    if let Some(token) = get(ENV_BACKEND_BEARER_TOKEN) {
        config.backend.bearer_token = token;
    }
}
