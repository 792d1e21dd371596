//! Configuration and settings management for GCodeView
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Parser settings (extra skip rules, tool gating)
//! - Camera limits (zoom range and factors, rotation speed, fit margin)
//! - Render style (colors, widths, placeholder label)

use crate::error::{SettingsError, SettingsResult};
use gcodeview_core::ConfigError;
use gcodeview_visualizer::{
    CameraLimits, LineParser, RenderStyle, SkipRule, SkipRules, ToolGating, ViewerOptions,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the default configuration
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Parser settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Only skip blank and comment lines, dropping the standard prefix table
    pub comments_only: bool,
    /// Additional case-sensitive line prefixes to skip
    pub extra_skip_prefixes: Vec<String>,
    /// Additional regular expressions; matching lines are skipped
    pub extra_skip_patterns: Vec<String>,
    /// Tool-down policy for lines without a Z word
    pub tool_gating: ToolGating,
}

impl ParserSettings {
    /// Build the skip table these settings describe
    pub fn skip_rules(&self) -> Result<SkipRules, ConfigError> {
        let mut rules = if self.comments_only {
            SkipRules::comments_only()
        } else {
            SkipRules::standard()
        };
        for prefix in &self.extra_skip_prefixes {
            if prefix.trim().is_empty() {
                return Err(ConfigError::ValueOutOfRange {
                    key: "parser.extra_skip_prefixes".to_string(),
                    value: format!("{:?}", prefix),
                });
            }
            rules.push(SkipRule::prefix(prefix.clone()));
        }
        for pattern in &self.extra_skip_patterns {
            rules.push(SkipRule::pattern(pattern)?);
        }
        Ok(rules)
    }

    pub fn build_parser(&self) -> Result<LineParser, ConfigError> {
        Ok(LineParser::new(self.skip_rules()?))
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Parser settings
    pub parser: ParserSettings,
    /// Camera limits
    pub camera: CameraLimits,
    /// Render style
    pub style: RenderStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Load from `path` if it exists, otherwise return defaults
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.parser.skip_rules()?;
        self.camera.validate()?;

        if !(self.style.path_width > 0.0 && self.style.path_width.is_finite()) {
            return Err(SettingsError::InvalidSetting {
                key: "style.path_width".to_string(),
                reason: "must be > 0".to_string(),
            });
        }
        if !(self.style.line_width > 0.0 && self.style.line_width.is_finite()) {
            return Err(SettingsError::InvalidSetting {
                key: "style.line_width".to_string(),
                reason: "must be > 0".to_string(),
            });
        }

        Ok(())
    }

    /// Session options described by this config
    pub fn to_viewer_options(&self) -> SettingsResult<ViewerOptions> {
        Ok(ViewerOptions {
            parser: self.parser.build_parser()?,
            gating: self.parser.tool_gating,
            camera: self.camera,
            style: self.style.clone(),
        })
    }
}

/// Default config location: `<platform config dir>/gcodeview/config.toml`
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("gcodeview").join(CONFIG_FILE_NAME))
        .ok_or_else(|| {
            SettingsError::ConfigDirectory("platform config directory not found".to_string())
        })
}
