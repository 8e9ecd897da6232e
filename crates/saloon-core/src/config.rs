//! Application configuration.
//!
//! Read from `~/.config/saloon/config.toml`. Every key is optional; a missing
//! file yields the defaults.

use crate::capture::DEFAULT_JPEG_QUALITY;
use crate::device::{ConstraintDescriptor, default_ladder};
use crate::error::{Result, SaloonError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_ANALYSIS_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_SYNTHESIS_MODEL: &str = "gemini-2.5-flash-image";

/// Root configuration structure for config.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaloonConfig {
    pub gateway: GatewayConfig,
    pub timeouts: TimeoutConfig,
    pub capture: CaptureConfig,
    pub camera: CameraConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub base_url: String,
    pub analysis_model: String,
    pub synthesis_model: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            analysis_model: DEFAULT_ANALYSIS_MODEL.to_string(),
            synthesis_model: DEFAULT_SYNTHESIS_MODEL.to_string(),
        }
    }
}

/// Upper bounds for each suspension point, in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub device_secs: u64,
    pub analysis_secs: u64,
    pub synthesis_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            device_secs: 10,
            analysis_secs: 30,
            synthesis_secs: 120,
        }
    }
}

impl TimeoutConfig {
    pub fn device(&self) -> Duration {
        Duration::from_secs(self.device_secs)
    }

    pub fn analysis(&self) -> Duration {
        Duration::from_secs(self.analysis_secs)
    }

    pub fn synthesis(&self) -> Duration {
        Duration::from_secs(self.synthesis_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub jpeg_quality: u8,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Overrides the default constraint ladder when non-empty
    pub ladder: Vec<ConstraintDescriptor>,
}

impl SaloonConfig {
    /// Returns the path to the configuration file: ~/.config/saloon/config.toml
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SaloonError::config("Could not determine home directory"))?;
        Ok(home.join(".config").join("saloon").join("config.toml"))
    }

    /// Loads and validates the file at `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn load_default() -> Result<Self> {
        Self::load(&Self::default_path()?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.capture.jpeg_quality) {
            return Err(SaloonError::config(format!(
                "capture.jpeg_quality must be within 1..=100, got {}",
                self.capture.jpeg_quality
            )));
        }
        let timeouts = &self.timeouts;
        if timeouts.device_secs == 0 || timeouts.analysis_secs == 0 || timeouts.synthesis_secs == 0 {
            return Err(SaloonError::config("timeouts must be greater than zero"));
        }
        if self.gateway.base_url.trim().is_empty() {
            return Err(SaloonError::config("gateway.base_url must not be empty"));
        }
        Ok(())
    }

    /// The configured ladder, or the default one.
    pub fn ladder(&self) -> Vec<ConstraintDescriptor> {
        if self.camera.ladder.is_empty() {
            default_ladder()
        } else {
            self.camera.ladder.clone()
        }
    }
}
