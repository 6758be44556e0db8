use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

/// Directory name under the platform config and data roots.
pub const APP_DIR: &str = "com.servicechat.cli";

/// Overrides the endpoint stored in the config file.
pub const ENDPOINT_ENV: &str = "SERVICECHAT_ENDPOINT";

const CONFIG_FILE: &str = "config.json";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Chat endpoint. Without one the guided offline flow is used.
    #[serde(default)]
    pub endpoint: Option<String>,
    pub request_timeout_secs: u64,
    /// Send the tunnel's interstitial-skip header. Added in v1.
    #[serde(default)]
    pub bypass_tunnel_interstitial: bool,
    /// Where conversation logs live; the platform data directory when unset.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Default `EnvFilter` directive when `RUST_LOG` is not set. Added in v1.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub created_at: jiff::Timestamp,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl CliConfig {
    pub fn new(created_at: jiff::Timestamp) -> Self {
        Self {
            config_version: CURRENT_VERSION,
            endpoint: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            bypass_tunnel_interstitial: true,
            data_dir: None,
            log_level: default_log_level(),
            created_at,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub offline: bool,
}

/// Effective settings after layering file, environment and flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// `None` runs the guided offline flow.
    pub endpoint: Option<String>,
    pub timeout: Duration,
    pub bypass_tunnel_interstitial: bool,
    pub data_dir: PathBuf,
    pub log_level: String,
}

impl CliConfig {
    /// Layer `env_endpoint` and then `overrides` on top of the file values.
    /// `default_data_dir` is used when neither names a data directory.
    pub fn resolve(&self, env_endpoint: Option<String>, overrides: Overrides, default_data_dir: PathBuf) -> Settings {
        let endpoint = if overrides.offline {
            None
        } else {
            overrides
                .endpoint
                .or(env_endpoint)
                .or_else(|| self.endpoint.clone())
                .filter(|e| !e.trim().is_empty())
        };
        Settings {
            endpoint,
            timeout: Duration::from_secs(overrides.timeout_secs.unwrap_or(self.request_timeout_secs)),
            bypass_tunnel_interstitial: self.bypass_tunnel_interstitial,
            data_dir: overrides
                .data_dir
                .or_else(|| self.data_dir.clone())
                .unwrap_or(default_data_dir),
            log_level: self.log_level.clone(),
        }
    }
}

pub fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join(APP_DIR))
}

pub fn default_data_dir() -> eyre::Result<PathBuf> {
    let base = dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
    Ok(base.join(APP_DIR))
}

/// Read the config in `dir`, migrating older versions. `None` when there is
/// no config file yet.
pub fn load_config(dir: &Path) -> eyre::Result<Option<CliConfig>> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(&path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: CliConfig = serde_json::from_value(migrated)?;
    Ok(Some(config))
}

/// Load the config in `dir`, writing defaults on first run.
pub fn load_or_init(dir: &Path, now: jiff::Timestamp) -> eyre::Result<CliConfig> {
    if let Some(config) = load_config(dir)? {
        return Ok(config);
    }
    let config = CliConfig::new(now);
    save_config(dir, &config)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update servicechat."
        ));
    }

    // v0 → v1: add log_level and bypass_tunnel_interstitial (on).
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("log_level")
            .or_insert(serde_json::Value::String(default_log_level()));
        obj.entry("bypass_tunnel_interstitial")
            .or_insert(serde_json::Value::Bool(true));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added log_level, bypass_tunnel_interstitial)");
    }

    Ok(json)
}

pub fn save_config(dir: &Path, config: &CliConfig) -> eyre::Result<()> {
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
