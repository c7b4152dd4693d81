//! Game configuration loading.

use std::fs;
use std::path::Path;

use crate::domain::AppError;
use crate::domain::configuration::GameConfig;

/// On-disk format of a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// `.toml` files are TOML; everything else is treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Load the config at `path`, or the defaults when no path was given.
pub fn resolve_config(path: Option<&Path>) -> Result<GameConfig, AppError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(GameConfig::default()),
    }
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<GameConfig, AppError> {
    let content = fs::read_to_string(path)
        .map_err(|source| AppError::ConfigRead { path: path.to_path_buf(), source })?;
    parse_config_content(&content, ConfigFormat::from_path(path)).map_err(|err| match err {
        AppError::ParseError { what, details } => {
            AppError::ParseError { what: format!("{what} {}", path.display()), details }
        }
        other => other,
    })
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str, format: ConfigFormat) -> Result<GameConfig, AppError> {
    let config: GameConfig = match format {
        ConfigFormat::Json => {
            serde_json::from_str(content).map_err(|e| AppError::parse_error("config", e))?
        }
        ConfigFormat::Toml => {
            toml::from_str(content).map_err(|e| AppError::parse_error("config", e))?
        }
    };
    config.validate()?;
    Ok(config)
}
