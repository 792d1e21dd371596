//! 2D tool path visualization
//!
//! This module provides:
//! - Bounding box and orthographic projection fitting (viewport)
//! - Zoom, pan and rotation state (camera)
//! - Cached renderable polylines (toolpath_cache)
//! - Draw-list emission for the placeholder and path frames (canvas_renderer)
//! - The viewer session tying loading, interaction and painting together

pub mod camera;
pub mod canvas_renderer;
pub mod session;
pub mod toolpath_cache;
pub mod viewport;

pub use camera::{CameraLimits, ViewState};
pub use canvas_renderer::{
    render_axes, render_crosshair, render_frame, render_grid, render_placeholder_frame,
    render_toolpath_strips, Color, DrawCommand, Frame, LabelAnchor, RenderStyle,
};
pub use session::{LoadOutcome, PointerButton, ViewerOptions, ViewerSession};
pub use toolpath_cache::ToolpathCache;
pub use viewport::{fit_to_bounds, BoundingBox, Projection};
