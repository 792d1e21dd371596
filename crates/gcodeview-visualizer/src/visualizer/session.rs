//! Viewer session
//!
//! Single owner of the loaded tool path, the view state and pointer
//! interaction state. The window layer forwards file, pointer, wheel and
//! resize events here and asks for a [`Frame`] whenever it paints.

use super::camera::{CameraLimits, ViewState};
use super::canvas_renderer::{render_frame, render_placeholder_frame, Frame, RenderStyle};
use super::toolpath_cache::ToolpathCache;
use super::viewport::Projection;
use crate::gcode::{LineParser, ToolGating, ToolPath};
use crate::utils::file_io::{display_name, read_gcode_file, strip_bom};
use gcodeview_core::constants::{APP_TITLE, NO_PATH_DATA_NOTICE};
use gcodeview_core::Result;
use glam::Vec2;
use std::path::Path;
use tracing::{debug, info, warn};

/// Everything configurable about a session
#[derive(Debug, Clone, Default)]
pub struct ViewerOptions {
    pub parser: LineParser,
    pub gating: ToolGating,
    pub camera: CameraLimits,
    pub style: RenderStyle,
}

/// Result of a load that read its input successfully
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// At least one drawable segment
    Loaded { segments: usize, points: usize },
    /// Nothing drawable; the placeholder is shown
    NoPathData,
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }

    /// Informational text for the user, if any
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            LoadOutcome::Loaded { .. } => None,
            LoadOutcome::NoPathData => Some(NO_PATH_DATA_NOTICE),
        }
    }
}

/// Pointer buttons the session reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DragMode {
    #[default]
    Idle,
    Pan,
    Rotate,
}

/// Viewer session state
#[derive(Debug)]
pub struct ViewerSession {
    parser: LineParser,
    gating: ToolGating,
    style: RenderStyle,
    path: ToolPath,
    source_name: Option<String>,
    last_outcome: Option<LoadOutcome>,
    view: ViewState,
    last_projection: Option<Projection>,
    cache: ToolpathCache,
    drag: DragMode,
    last_pointer: Vec2,
    /// Dirty flag: set when the surface needs a repaint
    dirty: bool,
}

impl Default for ViewerSession {
    fn default() -> Self {
        Self::new(ViewerOptions::default())
    }
}

impl ViewerSession {
    pub fn new(options: ViewerOptions) -> Self {
        Self {
            parser: options.parser,
            gating: options.gating,
            style: options.style,
            path: ToolPath::default(),
            source_name: None,
            last_outcome: None,
            view: ViewState::new(options.camera),
            last_projection: None,
            cache: ToolpathCache::new(),
            drag: DragMode::Idle,
            last_pointer: Vec2::ZERO,
            dirty: true,
        }
    }

    /// Replace parser, gating, camera limits and style. Parser and gating
    /// changes apply from the next load.
    pub fn set_options(&mut self, options: ViewerOptions) {
        self.parser = options.parser;
        self.gating = options.gating;
        self.style = options.style;
        self.view.set_limits(options.camera);
        self.dirty = true;
    }

    pub fn tool_gating(&self) -> ToolGating {
        self.gating
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Load a file from disk.
    ///
    /// The file is read completely before anything changes; on error the
    /// previous tool path and view stay as they were.
    ///
    /// # Errors
    /// Returns a load error if the file cannot be read.
    pub fn load_file(&mut self, path: &Path) -> Result<LoadOutcome> {
        let text = read_gcode_file(path).map_err(|e| {
            warn!("Load failed: {}", e);
            e
        })?;
        Ok(self.load_text(Some(&display_name(path)), &text))
    }

    /// Load G-code from an in-memory string
    pub fn load_text(&mut self, name: Option<&str>, text: &str) -> LoadOutcome {
        debug!("Starting G-code parse, input size: {} bytes", text.len());
        self.load_lines(name, strip_bom(text).lines())
    }

    /// Load G-code from a sequence of lines
    pub fn load_lines<I, S>(&mut self, name: Option<&str>, lines: I) -> LoadOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let path = ToolPath::from_lines(lines, &self.parser, self.gating);
        self.commit(name.map(str::to_string), path)
    }

    /// Swap in a fully built path and reset the view
    fn commit(&mut self, name: Option<String>, path: ToolPath) -> LoadOutcome {
        let outcome = if path.is_valid() {
            LoadOutcome::Loaded {
                segments: path.renderable_segments().count(),
                points: path.point_count(),
            }
        } else {
            LoadOutcome::NoPathData
        };

        if !self.cache.sync(&path) {
            debug!("Tool path unchanged, reusing cached polylines");
        }
        self.path = path;
        self.source_name = name;
        self.last_outcome = Some(outcome);
        self.view.reset();
        self.last_projection = None;
        self.drag = DragMode::Idle;
        self.dirty = true;

        match outcome {
            LoadOutcome::Loaded { segments, points } => info!(
                "Loaded {}: {} segments, {} points",
                self.source_name.as_deref().unwrap_or("<memory>"),
                segments,
                points
            ),
            LoadOutcome::NoPathData => info!("{}", NO_PATH_DATA_NOTICE),
        }
        outcome
    }

    /// A drawable tool path is loaded
    pub fn is_loaded(&self) -> bool {
        matches!(self.last_outcome, Some(LoadOutcome::Loaded { .. }))
    }

    pub fn last_outcome(&self) -> Option<LoadOutcome> {
        self.last_outcome
    }

    pub fn tool_path(&self) -> &ToolPath {
        &self.path
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Window title reflecting the loaded file
    pub fn title(&self) -> String {
        match &self.source_name {
            Some(name) => format!(
                "{} - {} (Points: {})",
                APP_TITLE,
                name,
                self.path.point_count()
            ),
            None => APP_TITLE.to_string(),
        }
    }

    /// Returns true if the surface needs a repaint
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag after painting
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if self.view.viewport_size() != (width, height) {
            self.view.set_viewport_size(width, height);
            self.dirty = true;
        }
    }

    /// Left and middle buttons pan, right rotates
    pub fn pointer_down(&mut self, button: PointerButton, pos: Vec2) {
        self.last_pointer = pos;
        self.drag = match button {
            PointerButton::Left | PointerButton::Middle => DragMode::Pan,
            PointerButton::Right => DragMode::Rotate,
        };
    }

    /// Returns true if the view changed
    pub fn pointer_move(&mut self, pos: Vec2) -> bool {
        if !self.is_loaded() {
            return false;
        }
        let delta = pos - self.last_pointer;
        let changed = match self.drag {
            DragMode::Pan => self.view.apply_pan(delta, self.path.bounds()),
            DragMode::Rotate => self.view.apply_rotation(delta.x),
            DragMode::Idle => false,
        };
        self.last_pointer = pos;
        self.dirty |= changed;
        changed
    }

    pub fn pointer_up(&mut self) {
        self.drag = DragMode::Idle;
    }

    /// Returns true if the zoom changed
    pub fn wheel(&mut self, delta: f32) -> bool {
        if !self.is_loaded() {
            return false;
        }
        let changed = self.view.apply_zoom(delta);
        self.dirty |= changed;
        changed
    }

    /// Reset zoom, pan and rotation
    pub fn double_click(&mut self) {
        self.reset_view();
    }

    pub fn reset_view(&mut self) {
        self.view.reset();
        self.dirty = true;
    }

    /// Build the draw list for the current state
    pub fn frame(&mut self) -> Frame {
        if !self.is_loaded() {
            return render_placeholder_frame(&self.style);
        }

        let bounds = self.path.bounds();
        if let Some(projection) = self.view.fit_to_bounds(bounds) {
            self.last_projection = Some(projection);
        }
        let modelview = self.view.compose_modelview(bounds);
        render_frame(
            self.cache.polylines(),
            self.last_projection,
            modelview,
            &self.style,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "G21\nG90\nG1 X0 Y0 Z1\nG1 X0 Y0 Z-1\nG1 X5 Y0\nG1 X5 Y5\nG1 X0 Y0 Z1\n";

    fn loaded_session() -> ViewerSession {
        let mut session = ViewerSession::default();
        session.resize(800, 600);
        session.load_text(Some("square.nc"), SQUARE);
        session
    }

    #[test]
    fn test_new_session_shows_placeholder() {
        let mut session = ViewerSession::default();
        assert!(!session.is_loaded());
        assert!(session.frame().placeholder);
        assert_eq!(session.title(), "GCode Viewer");
    }

    #[test]
    fn test_load_text_outcome_and_title() {
        let mut session = ViewerSession::default();
        let outcome = session.load_text(Some("square.nc"), SQUARE);
        assert_eq!(
            outcome,
            LoadOutcome::Loaded {
                segments: 1,
                points: 3
            }
        );
        assert!(outcome.notice().is_none());
        assert_eq!(session.title(), "GCode Viewer - square.nc (Points: 3)");
    }

    #[test]
    fn test_no_path_data_outcome() {
        let mut session = ViewerSession::default();
        let outcome = session.load_text(None, "; nothing\n(here)\nG21\n");
        assert_eq!(outcome, LoadOutcome::NoPathData);
        assert_eq!(
            outcome.notice(),
            Some("No valid tool path data found in the file.")
        );
        assert!(session.frame().placeholder);
    }

    #[test]
    fn test_interaction_ignored_until_loaded() {
        let mut session = ViewerSession::default();
        session.resize(800, 600);
        session.pointer_down(PointerButton::Left, Vec2::ZERO);
        assert!(!session.pointer_move(Vec2::new(50.0, 0.0)));
        assert!(!session.wheel(1.0));
        assert!(session.view().is_reset());
    }

    #[test]
    fn test_left_drag_pans_right_drag_rotates() {
        let mut session = loaded_session();
        session.pointer_down(PointerButton::Left, Vec2::new(100.0, 100.0));
        assert!(session.pointer_move(Vec2::new(180.0, 100.0)));
        session.pointer_up();
        assert!((session.view().pan().x - 0.5).abs() < 1e-5);

        session.pointer_down(PointerButton::Right, Vec2::new(0.0, 0.0));
        session.pointer_move(Vec2::new(20.0, 40.0));
        session.pointer_up();
        assert_eq!(session.view().rotation_deg(), 10.0);

        assert!(!session.pointer_move(Vec2::new(500.0, 500.0)));
    }

    #[test]
    fn test_double_click_resets_view() {
        let mut session = loaded_session();
        session.wheel(1.0);
        session.pointer_down(PointerButton::Right, Vec2::ZERO);
        session.pointer_move(Vec2::new(7.0, 0.0));
        session.double_click();
        assert!(session.view().is_reset());
    }

    #[test]
    fn test_new_load_resets_view() {
        let mut session = loaded_session();
        session.wheel(1.0);
        session.wheel(1.0);
        session.load_text(Some("again.nc"), SQUARE);
        assert!(session.view().is_reset());
    }

    #[test]
    fn test_failed_file_load_keeps_previous_path() {
        let mut session = loaded_session();
        let dir = tempfile::tempdir().unwrap();
        let err = session.load_file(&dir.path().join("missing.nc")).unwrap_err();
        assert!(err.is_load_error());
        assert!(session.is_loaded());
        assert_eq!(session.source_name(), Some("square.nc"));
        assert_eq!(session.tool_path().point_count(), 3);
    }

    #[test]
    fn test_frame_for_loaded_path() {
        let mut session = loaded_session();
        let frame = session.frame();
        assert!(!frame.placeholder);
        assert_eq!(frame.line_strips().count(), 1);
        let projection = frame.projection.unwrap();
        assert!((projection.aspect_ratio() - 800.0 / 600.0).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_viewport_keeps_last_projection() {
        let mut session = loaded_session();
        let first = session.frame().projection;
        assert!(first.is_some());
        session.resize(800, 0);
        assert_eq!(session.frame().projection, first);
    }

    #[test]
    fn test_dirty_flag_lifecycle() {
        let mut session = loaded_session();
        assert!(session.is_dirty());
        session.clear_dirty();
        session.resize(800, 600);
        assert!(!session.is_dirty());
        session.wheel(-1.0);
        assert!(session.is_dirty());
    }

    #[test]
    fn test_load_text_ignores_leading_bom() {
        let mut session = ViewerSession::default();
        let outcome = session.load_text(None, "\u{feff}; header\nZ-1\nX5 Y0\nZ1\n");
        assert_eq!(
            outcome,
            LoadOutcome::Loaded {
                segments: 1,
                points: 2
            }
        );
    }

    #[test]
    fn test_assume_down_option() {
        let mut session = ViewerSession::new(ViewerOptions {
            gating: ToolGating::AssumeDownWithoutZ,
            ..Default::default()
        });
        let outcome = session.load_text(None, "G0 X0 Y0\nG1 X10 Y0\n");
        assert!(outcome.is_loaded());
    }
}
