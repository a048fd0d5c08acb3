mod schema;
pub mod validation;

pub use schema::Config;
pub use validation::validate_config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Get the config directory path (~/.config/golf-odds/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("golf-odds"))
}

/// Get the default config file path (~/.config/golf-odds/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/golf-odds/config.yaml) when it exists and built-in defaults
///   otherwise.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
/// - The parsed values fail validation
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path
        }
        None => match get_config_path().filter(|p| p.exists()) {
            Some(path) => path,
            None => {
                debug!("no config file found, using defaults");
                return Ok(Config::default());
            }
        },
    };

    read_config(&config_path)
}

fn read_config(config_path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    validate_config(&config).map_err(|errors| {
        anyhow::anyhow!(
            "Invalid config in {}:\n  {}",
            config_path.display(),
            errors.join("\n  ")
        )
    })?;

    debug!(path = %config_path.display(), "loaded config");
    Ok(config)
}
