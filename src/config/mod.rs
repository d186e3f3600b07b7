mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)
        .with_context(|| format!("Invalid config file: {:?}", path))?;

    tracing::debug!(
        "Loaded config from {:?} ({} translations)",
        path,
        config.translations.len()
    );

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./mediameta.toml",
        "~/.config/mediameta/config.toml",
        "/etc/mediameta/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    config.display.validate()?;

    for (key, text) in &config.translations {
        if key.is_empty() {
            anyhow::bail!("Translation keys cannot be empty");
        }
        if text.is_empty() {
            tracing::warn!("Translation for {:?} is empty, the English text will be used", key);
        }
    }

    Ok(())
}
