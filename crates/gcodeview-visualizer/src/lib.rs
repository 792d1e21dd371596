//! # GCode Viewer Visualizer
//!
//! G-code coordinate parsing, tool path segmentation, the 2D camera model
//! and the draw-list emitter for the viewer.

pub mod gcode;
pub mod utils;
pub mod visualizer;

pub use gcode::{
    AxisChanges, Cursor, LineParser, LineUpdate, ParseStats, PathSegment, SkipRule, SkipRules,
    ToolGating, ToolPath, ToolPathBuilder,
};

pub use visualizer::{
    fit_to_bounds, render_frame, render_placeholder_frame, BoundingBox, CameraLimits, Color,
    DrawCommand, Frame, LabelAnchor, LoadOutcome, PointerButton, Projection, RenderStyle,
    ToolpathCache, ViewState, ViewerOptions, ViewerSession,
};

pub use utils::{display_name, has_supported_extension, read_gcode_file};
