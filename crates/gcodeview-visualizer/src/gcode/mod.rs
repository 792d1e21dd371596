//! G-code coordinate extraction
//!
//! This module provides:
//! - Per-line coordinate parsing with an extensible skip table
//! - Tool-down/tool-up segmentation into drawable path segments

pub mod parser;
pub mod segmenter;

pub use parser::{AxisChanges, Cursor, LineParser, LineUpdate, SkipRule, SkipRules};
pub use segmenter::{ParseStats, PathSegment, ToolGating, ToolPath, ToolPathBuilder};
