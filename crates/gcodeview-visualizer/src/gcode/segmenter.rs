//! Tool path segmentation
//!
//! Folds parsed line updates into drawn path segments. The tool is down
//! (cutting) while Z <= 0 and up otherwise; each down stretch becomes one
//! [`PathSegment`].

use super::parser::{Cursor, LineParser, LineUpdate};
use crate::visualizer::viewport::BoundingBox;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::{debug, trace};

/// How tool-down is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolGating {
    /// Only a Z word at or below zero lowers the tool. Files without Z
    /// words draw nothing.
    #[default]
    Strict,
    /// The tool starts down, so Z-less files (laser/plotter output) draw.
    /// The first XY move opens a segment; Z words gate as usual once seen.
    AssumeDownWithoutZ,
}

/// One continuous polyline drawn while the tool is down
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathSegment {
    points: Vec<Vec2>,
}

impl PathSegment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A line strip needs at least two points
    pub fn is_renderable(&self) -> bool {
        self.points.len() >= 2
    }
}

impl From<Vec<Vec2>> for PathSegment {
    fn from(points: Vec<Vec2>) -> Self {
        Self { points }
    }
}

/// Line counters gathered during one load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub total_lines: usize,
    pub skipped_lines: usize,
    pub plunges: usize,
    pub retracts: usize,
}

/// Segmented tool path: the result of one complete load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolPath {
    segments: Vec<PathSegment>,
    bounds: BoundingBox,
    stats: ParseStats,
}

impl ToolPath {
    /// Parse and segment a sequence of lines
    pub fn from_lines<I, S>(lines: I, parser: &LineParser, gating: ToolGating) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = ToolPathBuilder::new(parser, gating);
        for line in lines {
            builder.feed_line(line.as_ref());
        }
        builder.finish()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    pub fn point_count(&self) -> usize {
        self.segments.iter().map(PathSegment::len).sum()
    }

    /// Segments with enough points to draw, in file order
    pub fn renderable_segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter().filter(|s| s.is_renderable())
    }

    /// At least one segment can be drawn
    pub fn is_valid(&self) -> bool {
        self.segments.iter().any(PathSegment::is_renderable)
    }

    /// Hash over the segment geometry
    pub fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.segments.len().hash(&mut hasher);
        for segment in &self.segments {
            segment.len().hash(&mut hasher);
            for p in segment.points() {
                p.x.to_bits().hash(&mut hasher);
                p.y.to_bits().hash(&mut hasher);
            }
        }
        hasher.finish()
    }
}

/// Segmentation state for one load
///
/// Each call to [`apply`](Self::apply) consumes one parsed line. The open
/// segment is owned here and moved into the finished list when the tool
/// lifts or the load ends.
#[derive(Debug)]
pub struct ToolPathBuilder<'p> {
    parser: &'p LineParser,
    cursor: Cursor,
    tool_down: bool,
    current: Option<PathSegment>,
    segments: Vec<PathSegment>,
    bounds: BoundingBox,
    stats: ParseStats,
}

impl<'p> ToolPathBuilder<'p> {
    pub fn new(parser: &'p LineParser, gating: ToolGating) -> Self {
        Self {
            parser,
            cursor: Cursor::default(),
            tool_down: gating == ToolGating::AssumeDownWithoutZ,
            current: None,
            segments: Vec::new(),
            bounds: BoundingBox::new(),
            stats: ParseStats::default(),
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn is_tool_down(&self) -> bool {
        self.tool_down
    }

    /// Parse a raw line and apply it
    pub fn feed_line(&mut self, line: &str) {
        self.stats.total_lines += 1;
        match self.parser.parse_line(self.cursor, line) {
            Some(update) => self.apply(&update),
            None => self.stats.skipped_lines += 1,
        }
    }

    /// Apply one parsed line
    pub fn apply(&mut self, update: &LineUpdate) {
        let LineUpdate { cursor, changes } = *update;
        self.cursor = cursor;

        let mut plunged = false;
        if changes.z {
            let down = cursor.z <= 0.0;
            if down != self.tool_down {
                self.tool_down = down;
                if down {
                    self.begin_segment();
                    plunged = true;
                } else {
                    self.end_segment();
                }
            }
        }

        // The plunge point already records this line's XY position.
        if self.tool_down && changes.xy() && !plunged {
            if self.current.is_some() {
                self.add_point();
            } else {
                self.begin_segment();
            }
        }
    }

    fn begin_segment(&mut self) {
        self.end_segment();
        trace!(
            "Tool down at ({:.3}, {:.3})",
            self.cursor.x,
            self.cursor.y
        );
        self.stats.plunges += 1;
        self.current = Some(PathSegment::new());
        self.add_point();
    }

    fn end_segment(&mut self) {
        if let Some(segment) = self.current.take() {
            trace!("Tool up, closing segment of {} points", segment.len());
            self.stats.retracts += 1;
            self.segments.push(segment);
        }
    }

    fn add_point(&mut self) {
        let point = Vec2::new(self.cursor.x, self.cursor.y);
        if let Some(segment) = self.current.as_mut() {
            segment.points.push(point);
            self.bounds.include(point);
        }
    }

    /// Close any open segment and return the finished path
    pub fn finish(mut self) -> ToolPath {
        if let Some(segment) = self.current.take() {
            self.segments.push(segment);
        }

        debug!(
            "Segmentation complete: {} lines ({} skipped), {} segments, {} plunges",
            self.stats.total_lines,
            self.stats.skipped_lines,
            self.segments.len(),
            self.stats.plunges
        );

        ToolPath {
            segments: self.segments,
            bounds: self.bounds,
            stats: self.stats,
        }
    }
}
