//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{Secret, TunnelConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides the configured shared secret.
pub const SECRET_ENV_VAR: &str = "TUNNEL_SHARED_SECRET";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Where the active shared secret came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretSource {
    Default,
    File,
    Environment,
}

impl SecretSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecretSource::Default => "built-in default",
            SecretSource::File => "config file",
            SecretSource::Environment => SECRET_ENV_VAR,
        }
    }
}

/// Parse a TOML document into a config, without validation.
///
/// A blank `shared_secret` in the document is treated as unset.
pub fn parse_config(content: &str) -> Result<(TunnelConfig, SecretSource), ConfigError> {
    let mut config: TunnelConfig = toml::from_str(content)?;

    let source = if config.tunnel.shared_secret.is_blank() {
        config.tunnel.shared_secret = Secret::default();
        SecretSource::Default
    } else if config.tunnel.shared_secret.is_default() {
        SecretSource::Default
    } else {
        SecretSource::File
    };

    Ok((config, source))
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<TunnelConfig, ConfigError> {
    let (config, _) = load_config_with_source(path)?;
    Ok(config)
}

fn load_config_with_source(path: &Path) -> Result<(TunnelConfig, SecretSource), ConfigError> {
    let content = fs::read_to_string(path)?;
    let (config, source) = parse_config(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok((config, source))
}

/// Replace the secret with `value` when it is present and non-blank.
pub fn apply_secret_override(
    config: &mut TunnelConfig,
    source: SecretSource,
    value: Option<String>,
) -> SecretSource {
    match value {
        Some(v) if !v.trim().is_empty() => {
            config.tunnel.shared_secret = Secret::new(v);
            SecretSource::Environment
        }
        _ => source,
    }
}

/// Resolve the startup configuration.
///
/// Starts from defaults (or the file at `path`), then applies the
/// `TUNNEL_SHARED_SECRET` override and validates the result.
pub fn resolve(path: Option<&Path>) -> Result<(TunnelConfig, SecretSource), ConfigError> {
    let (mut config, source) = match path {
        Some(path) => load_config_with_source(path)?,
        None => (TunnelConfig::default(), SecretSource::Default),
    };

    let source = apply_secret_override(&mut config, source, std::env::var(SECRET_ENV_VAR).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok((config, source))
}
