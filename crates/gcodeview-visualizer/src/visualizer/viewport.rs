//! Shared viewport helpers for 2D tool path rendering.

use gcodeview_core::constants::{DEPTH_FAR, DEPTH_NEAR, MIN_EXTENT};
use glam::{Mat4, Vec2};
use serde::{Deserialize, Serialize};

/// Bounding box accumulator used while segmenting tool paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundingBox {
    /// Empty box with sentinel extents
    pub fn new() -> Self {
        Self {
            min_x: f32::INFINITY,
            min_y: f32::INFINITY,
            max_x: f32::NEG_INFINITY,
            max_y: f32::NEG_INFINITY,
        }
    }

    pub fn from_corners(min: Vec2, max: Vec2) -> Self {
        Self {
            min_x: min.x.min(max.x),
            min_y: min.y.min(max.y),
            max_x: max.x.max(min.x),
            max_y: max.y.max(min.y),
        }
    }

    pub fn include(&mut self, point: Vec2) {
        self.min_x = self.min_x.min(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_x = self.max_x.max(point.x);
        self.max_y = self.max_y.max(point.y);
    }

    /// True until a point has been included
    pub fn is_empty(&self) -> bool {
        !(self.min_x <= self.max_x && self.min_y <= self.max_y)
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.min_x, self.min_y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.max_x, self.max_y)
    }

    /// Extent along X, zero for an empty box
    pub fn width(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.max_x - self.min_x
        }
    }

    /// Extent along Y, zero for an empty box
    pub fn height(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.max_y - self.min_y
        }
    }

    /// Center of the box, the origin for an empty box
    pub fn center(&self) -> Vec2 {
        if self.is_empty() {
            Vec2::ZERO
        } else {
            (self.min() + self.max()) * 0.5
        }
    }
}

/// Orthographic projection window in data space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    /// Normalized device window used by the placeholder view
    pub const UNIT: Projection = Projection {
        left: -1.0,
        right: 1.0,
        bottom: -1.0,
        top: 1.0,
        near: DEPTH_NEAR,
        far: DEPTH_FAR,
    };

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.bottom + self.top) * 0.5,
        )
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width() / self.height()
    }

    /// OpenGL-style orthographic matrix for this window
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh_gl(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }
}

/// Compute a projection window that shows `bbox` with `margin` (a fraction
/// of the extent) on each side and the viewport's aspect ratio.
///
/// Extents under [`MIN_EXTENT`] are widened to it, so a path with all points
/// on one vertical or horizontal line still gets a usable window. Returns
/// `None` for an empty box or a viewport with a zero dimension.
pub fn fit_to_bounds(
    bbox: &BoundingBox,
    viewport_width: u32,
    viewport_height: u32,
    margin: f32,
) -> Option<Projection> {
    if viewport_width == 0 || viewport_height == 0 || bbox.is_empty() {
        return None;
    }

    let width = bbox.width().max(MIN_EXTENT);
    let height = bbox.height().max(MIN_EXTENT);
    let center = bbox.center();

    let mut half_w = width * (0.5 + margin);
    let mut half_h = height * (0.5 + margin);

    let viewport_aspect = viewport_width as f32 / viewport_height as f32;
    if viewport_aspect > half_w / half_h {
        half_w = half_h * viewport_aspect;
    } else {
        half_h = half_w / viewport_aspect;
    }

    Some(Projection {
        left: center.x - half_w,
        right: center.x + half_w,
        bottom: center.y - half_h,
        top: center.y + half_h,
        near: DEPTH_NEAR,
        far: DEPTH_FAR,
    })
}
