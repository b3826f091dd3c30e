// SPDX-License-Identifier: Apache-2.0

use khitat_core::ENV_KHITAT_LOG_LEVEL;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Clone, Copy)]
pub(crate) struct LogFlags {
    pub(crate) quiet: bool,
    pub(crate) verbose: u8,
    pub(crate) trace: bool,
    pub(crate) json: bool,
}

fn build_filter(flags: LogFlags) -> EnvFilter {
    if flags.trace {
        return EnvFilter::new("trace");
    }
    if flags.verbose > 0 {
        return EnvFilter::new("debug");
    }
    if flags.quiet {
        return EnvFilter::new("error");
    }
    if let Ok(level) = std::env::var(ENV_KHITAT_LOG_LEVEL) {
        if let Ok(filter) = EnvFilter::try_new(level) {
            return filter;
        }
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Installs the stderr subscriber. Stdout stays reserved for command output.
pub(crate) fn init_tracing(flags: LogFlags) -> Result<(), String> {
    let filter = build_filter(flags);
    let result = if flags.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    result.map_err(|e| format!("failed to install log subscriber: {e}"))
}
