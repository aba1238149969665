use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::errors::ConfTreeError;

/// Install a fmt subscriber at `level`. `RUST_LOG` wins when set. A second
/// call leaves the existing subscriber in place.
pub fn init_logging(level: &str) -> Result<(), ConfTreeError> {
    let level = Level::from_str(level.trim())
        .map_err(|_| ConfTreeError::InvalidOption(format!("invalid log level `{level}`")))?;

    let installed = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string())))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
    if installed.is_err() {
        tracing::debug!("global subscriber already installed");
    }
    Ok(())
}
