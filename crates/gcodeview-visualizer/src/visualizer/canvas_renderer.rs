//! Canvas draw-list emitter
//!
//! Turns the segmented tool path and the camera transform into a [`Frame`]:
//! a projection window, a modelview transform and an ordered list of draw
//! commands in data space. Applying the transforms is left to the drawing
//! surface (its matrix stack, or a CPU pre-transform via
//! [`Frame::transformed_strips`]).

use super::viewport::Projection;
use gcodeview_core::constants::{GRID_HALF_LINES, GRID_STEP, PLACEHOLDER_LABEL};
use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const LIME_GREEN: Color = Color::rgb(50, 205, 50);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRID_GRAY: Color = Color::rgb(40, 40, 40);
    pub const CROSSHAIR_GRAY: Color = Color::rgb(80, 80, 80);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Normalized components for float color APIs
    pub fn to_f32_array(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

/// Colors, widths and label text of the emitted frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub path_color: Color,
    pub path_width: f32,
    pub axis_color: Color,
    pub grid_color: Color,
    pub crosshair_color: Color,
    pub label_color: Color,
    pub line_width: f32,
    pub placeholder_label: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            path_color: Color::LIME_GREEN,
            path_width: 3.0,
            axis_color: Color::WHITE,
            grid_color: Color::GRID_GRAY,
            crosshair_color: Color::CROSSHAIR_GRAY,
            label_color: Color::WHITE,
            line_width: 1.0,
            placeholder_label: PLACEHOLDER_LABEL.to_string(),
        }
    }
}

/// Where a label is placed on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelAnchor {
    /// Centered in the viewport, in pixel space
    ViewportCenter,
}

/// One draw primitive
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Connected polyline
    LineStrip {
        points: Vec<Vec2>,
        color: Color,
        width: f32,
    },
    /// Independent line segments
    Lines {
        segments: Vec<[Vec2; 2]>,
        color: Color,
        width: f32,
    },
    /// Screen-space text
    Label {
        text: String,
        anchor: LabelAnchor,
        color: Color,
    },
}

/// Everything the drawing surface needs for one paint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// `None` means keep the surface's previous projection (degenerate viewport)
    pub projection: Option<Projection>,
    pub modelview: Affine2,
    pub commands: Vec<DrawCommand>,
    pub placeholder: bool,
}

impl Frame {
    /// Tool path line strips, in draw order
    pub fn line_strips(&self) -> impl Iterator<Item = &[Vec2]> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::LineStrip { points, .. } => Some(points.as_slice()),
            _ => None,
        })
    }

    pub fn label(&self) -> Option<&str> {
        self.commands.iter().find_map(|cmd| match cmd {
            DrawCommand::Label { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Line strips with the modelview already applied, for surfaces with no
    /// matrix stack
    pub fn transformed_strips(&self) -> Vec<Vec<Vec2>> {
        self.line_strips()
            .map(|strip| {
                strip
                    .iter()
                    .map(|p| self.modelview.transform_point2(*p))
                    .collect()
            })
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Render tool path polylines as line strips; single points are skipped
pub fn render_toolpath_strips(polylines: &[Vec<Vec2>], style: &RenderStyle) -> Vec<DrawCommand> {
    polylines
        .iter()
        .filter(|points| points.len() >= 2)
        .map(|points| DrawCommand::LineStrip {
            points: points.clone(),
            color: style.path_color,
            width: style.path_width,
        })
        .collect()
}

/// Unit-length X and Y reference lines through the data origin
pub fn render_axes(style: &RenderStyle) -> DrawCommand {
    DrawCommand::Lines {
        segments: unit_cross(),
        color: style.axis_color,
        width: style.line_width,
    }
}

/// Placeholder background grid covering the unit square
pub fn render_grid(style: &RenderStyle) -> DrawCommand {
    let mut segments = Vec::with_capacity((GRID_HALF_LINES as usize * 2 + 1) * 2);
    for i in -GRID_HALF_LINES..=GRID_HALF_LINES {
        let x = i as f32 * GRID_STEP;
        segments.push([Vec2::new(x, -1.0), Vec2::new(x, 1.0)]);
    }
    for i in -GRID_HALF_LINES..=GRID_HALF_LINES {
        let y = i as f32 * GRID_STEP;
        segments.push([Vec2::new(-1.0, y), Vec2::new(1.0, y)]);
    }
    DrawCommand::Lines {
        segments,
        color: style.grid_color,
        width: style.line_width,
    }
}

/// Placeholder crosshair through the center of the unit square
pub fn render_crosshair(style: &RenderStyle) -> DrawCommand {
    DrawCommand::Lines {
        segments: unit_cross(),
        color: style.crosshair_color,
        width: style.line_width,
    }
}

fn unit_cross() -> Vec<[Vec2; 2]> {
    vec![
        [Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0)],
        [Vec2::new(0.0, -1.0), Vec2::new(0.0, 1.0)],
    ]
}

/// Frame for a loaded, valid tool path
pub fn render_frame(
    polylines: &[Vec<Vec2>],
    projection: Option<Projection>,
    modelview: Affine2,
    style: &RenderStyle,
) -> Frame {
    let mut commands = render_toolpath_strips(polylines, style);
    commands.push(render_axes(style));
    Frame {
        projection,
        modelview,
        commands,
        placeholder: false,
    }
}

/// Frame shown when nothing drawable is loaded
pub fn render_placeholder_frame(style: &RenderStyle) -> Frame {
    Frame {
        projection: Some(Projection::UNIT),
        modelview: Affine2::IDENTITY,
        commands: vec![
            render_grid(style),
            render_crosshair(style),
            DrawCommand::Label {
                text: style.placeholder_label.clone(),
                anchor: LabelAnchor::ViewportCenter,
                color: style.label_color,
            },
        ],
        placeholder: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_frame_contents() {
        let frame = render_placeholder_frame(&RenderStyle::default());
        assert!(frame.placeholder);
        assert_eq!(frame.projection, Some(Projection::UNIT));
        assert_eq!(frame.modelview, Affine2::IDENTITY);
        assert_eq!(frame.line_strips().count(), 0);
        assert_eq!(frame.label(), Some("Load GCode to view tool path"));

        match &frame.commands[0] {
            DrawCommand::Lines { segments, color, .. } => {
                assert_eq!(segments.len(), 42);
                assert_eq!(*color, Color::GRID_GRAY);
            }
            other => panic!("expected grid lines, got {:?}", other),
        }
        match &frame.commands[1] {
            DrawCommand::Lines { color, .. } => assert_eq!(*color, Color::CROSSHAIR_GRAY),
            other => panic!("expected crosshair, got {:?}", other),
        }
    }

    #[test]
    fn test_path_frame_strips_then_axes() {
        let polylines = vec![
            vec![Vec2::ZERO, Vec2::X],
            vec![Vec2::ONE],
            vec![Vec2::Y, Vec2::ONE, Vec2::X],
        ];
        let frame = render_frame(&polylines, None, Affine2::IDENTITY, &RenderStyle::default());
        assert!(!frame.placeholder);
        assert_eq!(frame.line_strips().count(), 2);
        match frame.commands.last() {
            Some(DrawCommand::Lines { color, segments, .. }) => {
                assert_eq!(*color, Color::WHITE);
                assert_eq!(segments.len(), 2);
            }
            other => panic!("expected axes last, got {:?}", other),
        }
        match &frame.commands[0] {
            DrawCommand::LineStrip { color, width, .. } => {
                assert_eq!(*color, Color::LIME_GREEN);
                assert_eq!(*width, 3.0);
            }
            other => panic!("expected line strip, got {:?}", other),
        }
    }

    #[test]
    fn test_transformed_strips_apply_modelview() {
        let polylines = vec![vec![Vec2::ZERO, Vec2::X]];
        let frame = render_frame(
            &polylines,
            None,
            Affine2::from_translation(Vec2::new(2.0, 3.0)),
            &RenderStyle::default(),
        );
        let strips = frame.transformed_strips();
        assert_eq!(strips, vec![vec![Vec2::new(2.0, 3.0), Vec2::new(3.0, 3.0)]]);
    }

    #[test]
    fn test_frame_json_tags_commands() {
        let frame = render_placeholder_frame(&RenderStyle::default());
        let json = frame.to_json().unwrap();
        assert!(json.contains("\"kind\": \"lines\""));
        assert!(json.contains("\"kind\": \"label\""));
        assert!(json.contains("\"anchor\": \"viewport_center\""));
    }

    #[test]
    fn test_color_normalization() {
        assert_eq!(Color::WHITE.to_f32_array(), [1.0, 1.0, 1.0]);
    }
}
