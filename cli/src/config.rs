// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use tokio::fs;

use kbcal_core::{APP_NAME, Config as CoreConfig};

const KBCAL_CONFIG_ENV: &str = "KBCAL_CONFIG";

/// Locates and reads the configuration.
///
/// An explicit path (`--config` or `KBCAL_CONFIG`) must exist, a missing default file
/// means all defaults.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<CoreConfig, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(KBCAL_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        match default_config_file(get_config_dir()) {
            Some(config) => config,
            None => return normalized(CoreConfig::default()),
        }
    };

    let raw = fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()
        .map_err(|e| format!("Failed to parse config file at {}: {}", path.display(), e))?;
    normalized(raw.core)
}

fn normalized(mut config: CoreConfig) -> Result<CoreConfig, Box<dyn Error>> {
    config.normalize()?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

#[derive(Debug, Default, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: CoreConfig,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

/// The default config file, if there is one to read.
fn default_config_file(config_dir: Result<PathBuf, Box<dyn Error>>) -> Option<PathBuf> {
    let config = match config_dir {
        Ok(dir) => dir.join(format!("{APP_NAME}/config.toml")),
        Err(e) => {
            tracing::warn!(err = %e, "no config directory, using defaults");
            return None;
        }
    };
    if !config.exists() {
        tracing::debug!(path = %config.display(), "no config file, using defaults");
        return None;
    }
    Some(config)
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific config directory not found".into())
}
