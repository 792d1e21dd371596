use crate::gcode::ToolPath;
use glam::Vec2;
use tracing::debug;

/// Renderable polylines of the loaded tool path, rebuilt only when the path
/// content changes.
#[derive(Debug, Default, Clone)]
pub struct ToolpathCache {
    content_hash: Option<u64>,
    polylines: Vec<Vec<Vec2>>,
    point_count: usize,
}

impl ToolpathCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn needs_update(&self, new_hash: u64) -> bool {
        self.content_hash != Some(new_hash)
    }

    /// Rebuild from `path` unless it is already cached. Returns true if rebuilt.
    pub fn sync(&mut self, path: &ToolPath) -> bool {
        let hash = path.content_hash();
        if !self.needs_update(hash) {
            return false;
        }
        self.update(hash, path);
        true
    }

    pub fn update(&mut self, new_hash: u64, path: &ToolPath) {
        self.content_hash = Some(new_hash);
        self.polylines = path
            .renderable_segments()
            .map(|segment| segment.points().to_vec())
            .collect();
        self.point_count = self.polylines.iter().map(Vec::len).sum();

        debug!(
            "Rebuilt {} polylines ({} points) from {} segments",
            self.polylines.len(),
            self.point_count,
            path.segments().len()
        );
    }

    pub fn clear(&mut self) {
        self.content_hash = None;
        self.polylines.clear();
        self.point_count = 0;
    }

    pub fn polylines(&self) -> &[Vec<Vec2>] {
        &self.polylines
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn len(&self) -> usize {
        self.polylines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
    }
}
