use std::path::{Path, PathBuf};
use std::time::Duration;

use evalia_rewrite::RewriteConfig;
use evalia_rewrite::client::{DEFAULT_ENDPOINT, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const CONFIG_FILE: &str = "config.json";

/// Environment variable that takes precedence over the stored API key.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaliaConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Per-request timeout for the rewrite service.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for EvaliaConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            endpoint: default_endpoint(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

impl EvaliaConfig {
    /// The API key to use given the environment value, which wins when set.
    pub fn api_key_from(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
    }

    /// API key from [`API_KEY_ENV`] or the stored config.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key_from(std::env::var(API_KEY_ENV).ok())
    }

    pub fn rewrite_config(&self, api_key: String) -> RewriteConfig {
        RewriteConfig {
            endpoint: self.endpoint.clone(),
            api_key,
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Redacted config info safe to print.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigInfo {
    pub path: String,
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    /// `env`, `config` or `none`.
    pub api_key_source: String,
    pub api_key_hint: Option<String>,
}

/// Location of the config file on disk.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// The platform config directory, e.g. `~/.config/evalia` on Linux.
    pub fn default_location() -> eyre::Result<Self> {
        let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
        Ok(Self::at(base.join("evalia")))
    }

    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    pub fn exists(&self) -> bool {
        self.path().exists()
    }

    /// Load the config, or the defaults when none has been saved.
    pub fn load(&self) -> eyre::Result<EvaliaConfig> {
        let path = self.path();
        if !path.exists() {
            return Ok(EvaliaConfig::default());
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
        let config: EvaliaConfig = serde_json::from_value(migrated)?;
        Ok(config)
    }

    pub fn save(&self, config: &EvaliaConfig) -> eyre::Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        // Always write the current version, regardless of what was loaded.
        let mut stamped = config.clone();
        stamped.config_version = CURRENT_VERSION;

        let path = self.path();
        let json = serde_json::to_string_pretty(&stamped)?;

        // Write to a temp file then rename for atomicity
        let tmp_path = self.dir.join("config.json.tmp");
        std::fs::write(&tmp_path, json.as_bytes())?;

        // The file may hold an API key
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
        }

        std::fs::rename(&tmp_path, &path)?;

        tracing::info!(path = %path.display(), "config saved");
        Ok(())
    }

    pub fn info(&self, config: &EvaliaConfig, env_value: Option<String>) -> ConfigInfo {
        config_info(&self.path(), config, env_value)
    }
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update evalia."
        ));
    }

    // v0 → v1: `anthropic_api_key` renamed to `api_key`
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        if let Some(key) = obj.remove("anthropic_api_key") {
            obj.entry("api_key").or_insert(key);
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (renamed anthropic_api_key)");
    }

    Ok(json)
}

fn config_info(path: &Path, config: &EvaliaConfig, env_value: Option<String>) -> ConfigInfo {
    let env_value = env_value.filter(|k| !k.trim().is_empty());
    let stored = config.api_key.as_deref().filter(|k| !k.trim().is_empty());
    let (api_key_source, api_key_hint) = match (&env_value, stored) {
        (Some(key), _) => ("env", Some(redact_api_key(key))),
        (None, Some(key)) => ("config", Some(redact_api_key(key))),
        (None, None) => ("none", None),
    };

    ConfigInfo {
        path: path.display().to_string(),
        endpoint: config.endpoint.clone(),
        model: config.model.clone(),
        max_tokens: config.max_tokens,
        timeout_secs: config.timeout_secs,
        api_key_source: api_key_source.to_string(),
        api_key_hint,
    }
}

fn redact_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{prefix}...{suffix}")
}
