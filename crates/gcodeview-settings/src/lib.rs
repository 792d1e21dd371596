//! GCodeView Settings Crate
//!
//! Loads, validates and saves the viewer configuration.

pub mod config;
pub mod error;

pub use config::{default_config_path, Config, ParserSettings, CONFIG_FILE_NAME};
pub use error::{SettingsError, SettingsResult};
