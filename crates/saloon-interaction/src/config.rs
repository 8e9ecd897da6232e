//! Secret management for the Gemini gateways.
//!
//! Supports reading secrets from `~/.config/saloon/secret.json`. The
//! `GEMINI_API_KEY` environment variable takes precedence over the file.

use saloon_core::error::{Result, SaloonError};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the API key from secret.json.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Root configuration structure for secret.json
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API configuration
#[derive(Clone, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl SecretConfig {
    /// Loads secrets from `path`. A missing file yields an empty config.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SaloonError::Io {
            message: format!("Failed to read secret file at {}: {}", path.display(), e),
        })?;

        serde_json::from_str(&content).map_err(|e| SaloonError::Serialization {
            format: "JSON".to_string(),
            message: format!("Failed to parse secret file at {}: {}", path.display(), e),
        })
    }

    /// Loads secrets from the default location.
    pub fn load_default() -> Result<Self> {
        Self::load(&default_secret_path()?)
    }

    /// Picks the API key, preferring `env_override` over the file.
    pub fn api_key(&self, env_override: Option<String>) -> Result<String> {
        if let Some(key) = env_override.filter(|k| !k.trim().is_empty()) {
            return Ok(key);
        }
        self.gemini
            .as_ref()
            .map(|g| g.api_key.clone())
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                SaloonError::config(format!(
                    "Gemini API key not found: set {API_KEY_ENV} or add gemini.api_key to secret.json"
                ))
            })
    }
}

/// Resolves the API key from the environment or `~/.config/saloon/secret.json`.
pub fn resolve_api_key(secret_path: Option<&Path>) -> Result<String> {
    let secrets = match secret_path {
        Some(path) => SecretConfig::load(path)?,
        None => SecretConfig::load_default()?,
    };
    secrets.api_key(std::env::var(API_KEY_ENV).ok())
}

/// Returns the path to the secret file: ~/.config/saloon/secret.json
pub fn default_secret_path() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| SaloonError::config("Could not determine home directory"))?;
    Ok(home.join(".config").join("saloon").join("secret.json"))
}
