//! Shared constants for the viewer core.

/// Fraction of the path extent added as margin on each axis when fitting.
pub const FIT_MARGIN: f32 = 0.1;

/// Minimum interactive zoom.
pub const MIN_ZOOM: f32 = 0.1;

/// Maximum interactive zoom.
pub const MAX_ZOOM: f32 = 10.0;

/// Zoom multiplier for one wheel step forward.
pub const ZOOM_IN_FACTOR: f32 = 1.1;

/// Zoom multiplier for one wheel step backward.
pub const ZOOM_OUT_FACTOR: f32 = 0.9;

/// Degrees of rotation per pixel of horizontal drag.
pub const ROTATION_DEG_PER_PX: f32 = 0.5;

/// Substitute extent for a zero-sized bounding box axis.
pub const MIN_EXTENT: f32 = 1.0;

/// Near/far planes of the orthographic projection.
pub const DEPTH_NEAR: f32 = -1.0;
pub const DEPTH_FAR: f32 = 1.0;

/// Placeholder grid: lines from -GRID_HALF_LINES to +GRID_HALF_LINES.
pub const GRID_HALF_LINES: i32 = 10;
/// Placeholder grid spacing in normalized device units.
pub const GRID_STEP: f32 = 0.1;

/// File extensions offered by the file picker.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["nc", "tap", "cnc", "gcode", "txt"];

/// Window title with no file loaded.
pub const APP_TITLE: &str = "GCode Viewer";

/// Label shown over the placeholder grid.
pub const PLACEHOLDER_LABEL: &str = "Load GCode to view tool path";

/// Informational notice when a file has no drawable path.
pub const NO_PATH_DATA_NOTICE: &str = "No valid tool path data found in the file.";
