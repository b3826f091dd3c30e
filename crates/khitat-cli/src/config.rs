// SPDX-License-Identifier: Apache-2.0

use khitat_core::{
    resolve_khitat_config_path, resolve_khitat_data_dir, ConfigPathScope, ResultExt,
    ENV_KHITAT_CONFIG, ENV_KHITAT_DATA_DIR,
};
use khitat_model::AMOUNT_STEP;
use khitat_store::{validate_storage_key, DEFAULT_STORAGE_KEY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub amount_step: u64,
    pub order_dir: Option<PathBuf>,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            data_dir: resolve_khitat_data_dir(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            amount_step: AMOUNT_STEP,
            order_dir: None,
        }
    }
}

/// On-disk shape of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CartConfigFile {
    data_dir: Option<PathBuf>,
    storage_key: Option<String>,
    amount_step: Option<u64>,
    order_dir: Option<PathBuf>,
}

impl CartConfig {
    /// Root under which submitted orders land in `checkouts/`.
    #[must_use]
    pub fn order_root(&self) -> &Path {
        self.order_dir.as_deref().unwrap_or(&self.data_dir)
    }

    pub fn merge_toml(mut self, raw: &str) -> Result<Self, String> {
        let file: CartConfigFile =
            toml::from_str(raw).map_err(|e| format!("invalid config file: {e}"))?;
        if let Some(data_dir) = file.data_dir {
            self.data_dir = data_dir;
        }
        if let Some(storage_key) = file.storage_key {
            self.storage_key = storage_key;
        }
        if let Some(amount_step) = file.amount_step {
            self.amount_step = amount_step;
        }
        if file.order_dir.is_some() {
            self.order_dir = file.order_dir;
        }
        Ok(self)
    }
}

pub fn validate_cart_config(config: &CartConfig) -> Result<(), String> {
    validate_storage_key(&config.storage_key).map_err(|e| e.message)?;
    if config.amount_step == 0 {
        return Err("amount_step must be > 0".to_string());
    }
    if config.data_dir.as_os_str().is_empty() {
        return Err("data_dir must not be empty".to_string());
    }
    Ok(())
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

/// Config file used when `--config` is absent: `KHITAT_CONFIG`, then the
/// workspace file, then the user file. Only an existing file is returned.
fn discover_config_file() -> Option<PathBuf> {
    if let Some(path) = env_path(ENV_KHITAT_CONFIG) {
        return Some(path);
    }
    [ConfigPathScope::Workspace, ConfigPathScope::User]
        .into_iter()
        .map(resolve_khitat_config_path)
        .find(|path| path.is_file())
}

/// Defaults, then the config file, then `KHITAT_DATA_DIR`, then flags.
pub fn load_cart_config(
    explicit_config: Option<&Path>,
    data_dir_flag: Option<PathBuf>,
) -> Result<CartConfig, String> {
    let mut config = CartConfig::default();
    let file = explicit_config
        .map(Path::to_path_buf)
        .or_else(discover_config_file);
    if let Some(path) = file {
        let raw = fs::read_to_string(&path)
            .with_context("failed to read config")
            .map_err(|e| format!("{e} ({})", path.display()))?;
        config = config.merge_toml(&raw)?;
        tracing::debug!(path = %path.display(), "config file loaded");
    }
    if let Some(dir) = env_path(ENV_KHITAT_DATA_DIR) {
        config.data_dir = dir;
    }
    if let Some(dir) = data_dir_flag {
        config.data_dir = dir;
    }
    validate_cart_config(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> CartConfig {
        CartConfig {
            data_dir: PathBuf::from("/tmp/khitat"),
            ..CartConfig::default()
        }
    }

    #[test]
    fn toml_overrides_only_given_keys() {
        let config = base()
            .merge_toml("storage_key = \"cart-v2\"\namount_step = 25\n")
            .expect("merge");
        assert_eq!(config.storage_key, "cart-v2");
        assert_eq!(config.amount_step, 25);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/khitat"));
        assert_eq!(config.order_root(), Path::new("/tmp/khitat"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = base()
            .merge_toml("isCartOpen = true\n")
            .expect_err("unknown key");
        assert!(err.contains("invalid config file"));
    }

    #[test]
    fn order_dir_takes_precedence_over_data_dir() {
        let config = base()
            .merge_toml("order_dir = \"/srv/orders\"\n")
            .expect("merge");
        assert_eq!(config.order_root(), Path::new("/srv/orders"));
    }

    #[test]
    fn validation_rejects_zero_step_and_unsafe_keys() {
        let mut config = base();
        config.amount_step = 0;
        assert!(validate_cart_config(&config)
            .expect_err("zero step")
            .contains("amount_step"));

        let mut config = base();
        config.storage_key = "../cart".to_string();
        assert!(validate_cart_config(&config).is_err());

        assert!(validate_cart_config(&base()).is_ok());
    }
}
