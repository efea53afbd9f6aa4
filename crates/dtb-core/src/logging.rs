use tracing_subscriber::{fmt, EnvFilter};

use crate::{errors::Error, Result};

/// Initialize tracing for the bot.
///
/// `RUST_LOG` wins when set; otherwise `default_level` (from `LOG_LEVEL`) applies
/// to our crates and everything else stays at `warn`.
pub fn init(service_name: &str, default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(service_name, default_level)));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| Error::External(format!("failed to init logging: {e}")))
}

fn default_directives(service_name: &str, level: &str) -> String {
    format!("warn,{service_name}={level},dtb_core={level},dtb_telegram={level}")
}
