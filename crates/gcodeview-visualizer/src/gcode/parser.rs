//! Coordinate line parser
//!
//! Extracts X/Y/Z words from a single G-code line and folds them into a
//! running cursor. Parsing a line is a pure transition from one [`Cursor`]
//! to the next; nothing is shared between lines except the cursor value the
//! caller threads through.

use gcodeview_core::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Comment markers; a line starting with one of these is ignored.
const COMMENT_MARKERS: &[&str] = &[";", "("];

/// Non-motion command prefixes ignored by the standard rule set
/// (spindle speed, tool change, program end, spindle on, feed rate,
/// units/positioning/work offset/feed mode, bare plane select).
const NON_MOTION_PREFIXES: &[&str] = &[
    "S", "T", "M30", "M3", "F", "G21", "G90", "G54", "G94", "17",
];

/// Word separators within a line.
const SEPARATORS: [char; 2] = [' ', '\t'];

/// Running machine position carried across lines
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cursor {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Cursor {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Axes written by one line. Reset for every line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisChanges {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl AxisChanges {
    /// True when the line moved in the XY plane
    pub fn xy(&self) -> bool {
        self.x || self.y
    }

    pub fn any(&self) -> bool {
        self.x || self.y || self.z
    }
}

/// Result of parsing one non-skipped line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineUpdate {
    /// Cursor after this line
    pub cursor: Cursor,
    /// Axes this line wrote
    pub changes: AxisChanges,
}

/// One entry of the line skip table
#[derive(Debug, Clone)]
pub enum SkipRule {
    /// Skip lines starting with this literal text (case-sensitive)
    Prefix(String),
    /// Skip lines matching this regular expression
    Pattern(Regex),
}

impl SkipRule {
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::Prefix(prefix.into())
    }

    /// Compile a pattern rule.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidPattern`] if the expression does not compile.
    pub fn pattern(pattern: &str) -> Result<Self, ConfigError> {
        Regex::new(pattern)
            .map(Self::Pattern)
            .map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })
    }

    /// Check a trimmed line against this rule
    pub fn matches(&self, line: &str) -> bool {
        match self {
            Self::Prefix(prefix) => line.starts_with(prefix.as_str()),
            Self::Pattern(re) => re.is_match(line),
        }
    }
}

/// Ordered table of skip rules
///
/// The standard table covers comments and the common non-motion commands of
/// hobby CNC post-processors. It is a heuristic, not a G-code grammar:
/// dialects that put motion words after one of these prefixes on the same
/// line need their own table.
#[derive(Debug, Clone)]
pub struct SkipRules {
    rules: Vec<SkipRule>,
}

impl Default for SkipRules {
    fn default() -> Self {
        Self::standard()
    }
}

impl SkipRules {
    /// Comment markers plus the standard non-motion prefixes
    pub fn standard() -> Self {
        let rules = COMMENT_MARKERS
            .iter()
            .chain(NON_MOTION_PREFIXES)
            .map(|p| SkipRule::prefix(*p))
            .collect();
        Self { rules }
    }

    /// Comment markers only
    pub fn comments_only() -> Self {
        Self {
            rules: COMMENT_MARKERS.iter().map(|p| SkipRule::prefix(*p)).collect(),
        }
    }

    pub fn push(&mut self, rule: SkipRule) {
        self.rules.push(rule);
    }

    pub fn with_rule(mut self, rule: SkipRule) -> Self {
        self.push(rule);
        self
    }

    pub fn rules(&self) -> &[SkipRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// True if a trimmed line carries no coordinates worth reading
    pub fn should_skip(&self, line: &str) -> bool {
        line.is_empty() || self.rules.iter().any(|rule| rule.matches(line))
    }
}

/// Line parser with a configurable skip table
#[derive(Debug, Clone, Default)]
pub struct LineParser {
    skip_rules: SkipRules,
}

impl LineParser {
    pub fn new(skip_rules: SkipRules) -> Self {
        Self { skip_rules }
    }

    pub fn skip_rules(&self) -> &SkipRules {
        &self.skip_rules
    }

    /// Parse one line against the incoming cursor.
    ///
    /// Returns `None` when the line is skipped. Otherwise returns the new
    /// cursor and the axes written by this line. A word whose value does not
    /// parse as a finite number is dropped; the axis keeps its previous value.
    pub fn parse_line(&self, cursor: Cursor, line: &str) -> Option<LineUpdate> {
        let line = line.trim();
        if self.skip_rules.should_skip(line) {
            return None;
        }

        let mut next = cursor;
        let mut changes = AxisChanges::default();

        for word in line.split(SEPARATORS).filter(|w| !w.is_empty()) {
            let mut chars = word.chars();
            let Some(letter) = chars.next() else {
                continue;
            };
            let letter = letter.to_ascii_uppercase();
            if !matches!(letter, 'X' | 'Y' | 'Z') {
                continue;
            }

            let Some(value) = parse_coordinate(chars.as_str()) else {
                trace!("Dropping malformed coordinate word '{}'", word);
                continue;
            };

            match letter {
                'X' => {
                    next.x = value;
                    changes.x = true;
                }
                'Y' => {
                    next.y = value;
                    changes.y = true;
                }
                _ => {
                    next.z = value;
                    changes.z = true;
                }
            }
        }

        Some(LineUpdate {
            cursor: next,
            changes,
        })
    }
}

/// Locale-invariant float parse; `.` is the only decimal separator and
/// non-finite values are rejected.
fn parse_coordinate(text: &str) -> Option<f32> {
    text.parse::<f32>().ok().filter(|v| v.is_finite())
}
