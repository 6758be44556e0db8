//! Subscriber setup.
//!
//! The subscriber is installed before the config file is read, with
//! `RUST_LOG` or `info` as a provisional filter, so config loading and
//! migration are logged. Once the config is known its `log_level` replaces
//! the provisional filter unless `RUST_LOG` is set.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, reload};

const PROVISIONAL_LEVEL: &str = "info";

pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Install the global subscriber, writing to stderr.
pub fn init(json: bool) -> FilterHandle {
    let (filter, handle) = reload::Layer::new(provisional_filter());
    let registry = tracing_subscriber::registry().with(filter);
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    if json {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer).init();
    }
    handle
}

/// Switch to the configured level. `RUST_LOG` still wins.
pub fn apply_level(handle: &FilterHandle, level: &str) -> eyre::Result<()> {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        return Ok(());
    }
    handle.reload(EnvFilter::new(level))?;
    tracing::debug!(level, "log level applied from config");
    Ok(())
}

fn provisional_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(PROVISIONAL_LEVEL))
}
