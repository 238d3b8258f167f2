use anyhow::{anyhow, Result};
use tracing_subscriber::fmt::Layer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

/// Install a stderr subscriber so stdout carries nothing but the JSON result.
/// `RUST_LOG` takes precedence over `log_level`.
pub fn init(log_level: &str) -> Result<()> {
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| anyhow!("invalid log level {:?}: {}", log_level, e))?;

    let stderr_layer = Layer::new()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(false);

    let subscriber = Registry::default().with(stderr_layer).with(filter_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    tracing::debug!("Tracing set up.");
    Ok(())
}
