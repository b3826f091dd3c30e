// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod errors;
mod paths;

pub use errors::{ConfigPathScope, ErrorContext, ExitCode, MachineError, ResultExt};
pub use paths::{resolve_khitat_config_path, resolve_khitat_data_dir};

pub const CRATE_NAME: &str = "khitat-core";

pub const ENV_KHITAT_LOG_LEVEL: &str = "KHITAT_LOG_LEVEL";
pub const ENV_KHITAT_DATA_DIR: &str = "KHITAT_DATA_DIR";
pub const ENV_KHITAT_CONFIG: &str = "KHITAT_CONFIG";
