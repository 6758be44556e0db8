//! Startup checks and settings resolution.

use std::path::{Path, PathBuf};

use servicechat_catalog::validate::validate_catalog;

use crate::config::{Overrides, Settings, load_or_init};

/// Check the static catalog, then load (or create) the config in
/// `config_dir` and layer the environment and flags on top.
///
/// A catalog problem fails startup before anything is written.
pub fn prepare(
    config_dir: &Path,
    env_endpoint: Option<String>,
    overrides: Overrides,
    default_data_dir: PathBuf,
    now: jiff::Timestamp,
) -> eyre::Result<Settings> {
    validate_catalog()?;
    let config = load_or_init(config_dir, now)?;
    Ok(config.resolve(env_endpoint, overrides, default_data_dir))
}
