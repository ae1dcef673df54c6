use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use follicle_predict::client::{DEFAULT_BASE_URL, DEFAULT_HEALTH_TIMEOUT, DEFAULT_PREDICT_TIMEOUT};
use follicle_predict::ClientConfig;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

/// Environment variable that overrides the configured backend URL.
pub const BACKEND_URL_ENV: &str = "FOLLICLE_BACKEND_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollicleConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub backend_base_url: String,
    /// Added in v1.
    pub predict_timeout_secs: u64,
    /// Added in v1.
    pub health_timeout_secs: u64,
    pub created_at: jiff::Timestamp,
}

impl FollicleConfig {
    pub fn new(backend_base_url: impl Into<String>) -> Self {
        Self {
            config_version: CURRENT_VERSION,
            backend_base_url: backend_base_url.into(),
            predict_timeout_secs: DEFAULT_PREDICT_TIMEOUT.as_secs(),
            health_timeout_secs: DEFAULT_HEALTH_TIMEOUT.as_secs(),
            created_at: jiff::Timestamp::now(),
        }
    }

    /// Zero timeouts would fail every request before it is sent.
    pub fn validate(&self) -> eyre::Result<()> {
        if self.predict_timeout_secs == 0 {
            return Err(eyre::eyre!("predict_timeout_secs must be at least 1"));
        }
        if self.health_timeout_secs == 0 {
            return Err(eyre::eyre!("health_timeout_secs must be at least 1"));
        }
        Ok(())
    }

    /// Client settings, with `backend_url` (flag or env) taking precedence.
    pub fn client_config(&self, backend_url: Option<&str>) -> ClientConfig {
        ClientConfig {
            base_url: backend_url.unwrap_or(&self.backend_base_url).to_string(),
            predict_timeout: Duration::from_secs(self.predict_timeout_secs),
            health_timeout: Duration::from_secs(self.health_timeout_secs),
        }
    }
}

impl Default for FollicleConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.follicle.cli"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load the user's config, falling back to defaults when none exists.
pub fn load_or_default() -> eyre::Result<FollicleConfig> {
    let path = config_path()?;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(FollicleConfig::default());
    }
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> eyre::Result<FollicleConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Migrations run on the raw JSON before it has to fit the current shape.
    let raw: serde_json::Value = serde_json::from_str(&contents)?;
    let version = stored_version(&raw)?;
    let config: FollicleConfig = serde_json::from_value(migrate(raw, version)?)?;
    config.validate()?;
    Ok(config)
}

/// `config_version` as written on disk; absent means 0.
fn stored_version(raw: &serde_json::Value) -> eyre::Result<u32> {
    match raw.get("config_version").and_then(serde_json::Value::as_u64) {
        None => Ok(0),
        Some(v) => u32::try_from(v)
            .map_err(|_| eyre::eyre!("config_version {v} is out of range")),
    }
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update follicle."
        ));
    }

    // v0 → v1: add request timeouts
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("predict_timeout_secs")
            .or_insert(serde_json::Value::Number(DEFAULT_PREDICT_TIMEOUT.as_secs().into()));
        obj.entry("health_timeout_secs")
            .or_insert(serde_json::Value::Number(DEFAULT_HEALTH_TIMEOUT.as_secs().into()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added timeouts)");
    }

    Ok(json)
}

pub fn save_config(config: &FollicleConfig) -> eyre::Result<PathBuf> {
    save_config_in(&config_dir()?, config)
}

/// Write `config.json` into `dir`, returning the written path.
pub fn save_config_in(dir: &Path, config: &FollicleConfig) -> eyre::Result<PathBuf> {
    config.validate()?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = dir.join("config.json");
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(path)
}

/// Pick the backend URL override: the flag wins over the environment.
pub fn backend_override(flag: Option<String>, env: Option<String>) -> Option<String> {
    flag.or(env).filter(|url| !url.trim().is_empty())
}
