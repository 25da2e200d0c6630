use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use perioscope_assess::pipeline::PipelineConfig;
use perioscope_bedrock::limiter::LimiterConfig;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-sonnet-4-20250514-v1:0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerioscopeConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub region: String,
    pub model_id: String,
    pub created_at: jiff::Timestamp,
    /// Added in v1.
    #[serde(default)]
    pub limiter: LimiterConfig,
    /// Added in v1.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl PerioscopeConfig {
    pub fn new(region: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            config_version: CURRENT_VERSION,
            region: region.into(),
            model_id: model_id.into(),
            created_at: jiff::Timestamp::now(),
            limiter: LimiterConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl Default for PerioscopeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REGION, DEFAULT_MODEL_ID)
    }
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("perioscope").join("config.json"))
}

/// The `--config` override, or the platform default.
pub fn resolve_path(explicit: Option<&Path>) -> eyre::Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => default_config_path(),
    }
}

pub fn load_config(path: &Path) -> eyre::Result<PerioscopeConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: PerioscopeConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to defaults.
pub fn load_or_default(path: &Path) -> eyre::Result<PerioscopeConfig> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        Ok(PerioscopeConfig::default())
    }
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update perioscope."
        ));
    }

    // v0 → v1: limiter and pipeline sections; v0 files carried only region and model
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("model_id")
            .or_insert(serde_json::Value::String(DEFAULT_MODEL_ID.to_string()));
        obj.entry("limiter")
            .or_insert(serde_json::to_value(LimiterConfig::default())?);
        obj.entry("pipeline")
            .or_insert(serde_json::to_value(PipelineConfig::default())?);
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added limiter and pipeline settings)");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &PerioscopeConfig) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path {} has no parent directory", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
