//! # GCodeView
//!
//! A G-code tool path viewer core:
//! - Coordinate line parsing with a configurable skip table
//! - Tool-down gating and polyline segmentation
//! - A 2D camera with zoom, pan and rotation about the path center
//! - A draw-list emitter for the placeholder and tool path frames
//!
//! ## Architecture
//!
//! GCodeView is organized as a workspace with multiple crates:
//!
//! 1. **gcodeview-core** - Errors and shared constants
//! 2. **gcodeview-visualizer** - Parser, segmenter, camera, emitter, viewer session
//! 3. **gcodeview-settings** - TOML/JSON configuration
//! 4. **gcodeview** - Logging bootstrap and the headless preview binary

pub use gcodeview_core::{constants, ConfigError, Error, LoadError, Result};

pub use gcodeview_visualizer::{
    fit_to_bounds, render_frame, render_placeholder_frame, BoundingBox, CameraLimits, Color,
    Cursor, DrawCommand, Frame, LineParser, LoadOutcome, PathSegment, PointerButton, Projection,
    RenderStyle, SkipRule, SkipRules, ToolGating, ToolPath, ViewState, ViewerOptions,
    ViewerSession,
};

pub use gcodeview_settings::{default_config_path, Config, ParserSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatted output on stderr, leaving stdout for frame output
/// - RUST_LOG environment variable support, INFO when unset
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(())
}
