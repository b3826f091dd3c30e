// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use crate::errors::ConfigPathScope;

fn non_empty_env(name: &str) -> Option<PathBuf> {
    let value = std::env::var(name).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

/// Directory holding the persisted cart and locally submitted orders.
#[must_use]
pub fn resolve_khitat_data_dir() -> PathBuf {
    if let Some(explicit) = non_empty_env(crate::ENV_KHITAT_DATA_DIR) {
        return explicit;
    }
    if let Some(xdg_data_home) = non_empty_env("XDG_DATA_HOME") {
        return xdg_data_home.join("khitat");
    }
    if let Some(home) = non_empty_env("HOME") {
        return home.join(".local").join("share").join("khitat");
    }
    PathBuf::from(".khitat").join("data")
}

#[must_use]
pub fn resolve_khitat_config_path(scope: ConfigPathScope) -> PathBuf {
    match scope {
        ConfigPathScope::User => {
            if let Some(xdg_config_home) = non_empty_env("XDG_CONFIG_HOME") {
                return xdg_config_home.join("khitat").join("config.toml");
            }
            if let Some(home) = non_empty_env("HOME") {
                return home.join(".config").join("khitat").join("config.toml");
            }
            PathBuf::from(".khitat").join("config.toml")
        }
        ConfigPathScope::Workspace => PathBuf::from(".khitat").join("config.toml"),
    }
}
