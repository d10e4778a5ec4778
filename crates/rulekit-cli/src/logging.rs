//! Tracing subscriber setup. Logs go to stderr so stdout stays parseable.

use crate::config::{CliConfig, LogFormat};
use tracing_subscriber::EnvFilter;

pub fn init(config: &CliConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.log).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match config.log_format {
        LogFormat::Compact => builder.compact().with_target(true).try_init(),
        LogFormat::Json => builder.json().with_target(true).try_init(),
    };
    result.map_err(|e| anyhow::anyhow!("failed to install log subscriber: {}", e))
}
