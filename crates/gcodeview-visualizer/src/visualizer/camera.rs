//! 2D view camera: zoom, pan and rotation about the path centroid.

use super::viewport::{fit_to_bounds, BoundingBox, Projection};
use gcodeview_core::constants as core_constants;
use gcodeview_core::ConfigError;
use glam::{Affine2, Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Interactive limits and step sizes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraLimits {
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Zoom multiplier per forward wheel step
    pub zoom_in_factor: f32,
    /// Zoom multiplier per backward wheel step
    pub zoom_out_factor: f32,
    /// Degrees per pixel of horizontal rotate-drag
    pub rotation_deg_per_px: f32,
    /// Fit margin as a fraction of the path extent, per side
    pub fit_margin: f32,
}

impl Default for CameraLimits {
    fn default() -> Self {
        Self {
            min_zoom: core_constants::MIN_ZOOM,
            max_zoom: core_constants::MAX_ZOOM,
            zoom_in_factor: core_constants::ZOOM_IN_FACTOR,
            zoom_out_factor: core_constants::ZOOM_OUT_FACTOR,
            rotation_deg_per_px: core_constants::ROTATION_DEG_PER_PX,
            fit_margin: core_constants::FIT_MARGIN,
        }
    }
}

impl CameraLimits {
    /// Check the limits are usable; the default zoom of 1 must lie in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let out_of_range = |key: &str, value: f32| ConfigError::ValueOutOfRange {
            key: format!("camera.{key}"),
            value: value.to_string(),
        };

        if !(self.min_zoom > 0.0 && self.min_zoom <= 1.0) {
            return Err(out_of_range("min_zoom", self.min_zoom));
        }
        if !(self.max_zoom >= 1.0 && self.max_zoom.is_finite()) {
            return Err(out_of_range("max_zoom", self.max_zoom));
        }
        if !(self.zoom_in_factor > 1.0 && self.zoom_in_factor.is_finite()) {
            return Err(out_of_range("zoom_in_factor", self.zoom_in_factor));
        }
        if !(self.zoom_out_factor > 0.0 && self.zoom_out_factor < 1.0) {
            return Err(out_of_range("zoom_out_factor", self.zoom_out_factor));
        }
        if !self.rotation_deg_per_px.is_finite() {
            return Err(out_of_range("rotation_deg_per_px", self.rotation_deg_per_px));
        }
        if !(self.fit_margin >= 0.0 && self.fit_margin.is_finite()) {
            return Err(out_of_range("fit_margin", self.fit_margin));
        }
        Ok(())
    }
}

/// View state owned by one viewer session
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewState {
    zoom: f32,
    pan: Vec2,
    rotation_deg: f32,
    viewport_width: u32,
    viewport_height: u32,
    #[serde(skip)]
    limits: CameraLimits,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(CameraLimits::default())
    }
}

impl ViewState {
    pub fn new(limits: CameraLimits) -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
            rotation_deg: 0.0,
            viewport_width: 0,
            viewport_height: 0,
            limits,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Pan offset in data units
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Rotation in degrees, unbounded
    pub fn rotation_deg(&self) -> f32 {
        self.rotation_deg
    }

    pub fn limits(&self) -> &CameraLimits {
        &self.limits
    }

    pub fn set_limits(&mut self, limits: CameraLimits) {
        self.limits = limits;
        self.zoom = self.zoom.clamp(limits.min_zoom, limits.max_zoom);
    }

    pub fn viewport_size(&self) -> (u32, u32) {
        (self.viewport_width, self.viewport_height)
    }

    pub fn set_viewport_size(&mut self, width: u32, height: u32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Both viewport dimensions are non-zero
    pub fn has_viewport(&self) -> bool {
        self.viewport_width > 0 && self.viewport_height > 0
    }

    /// Projection window fitting `bbox` into the current viewport
    pub fn fit_to_bounds(&self, bbox: &BoundingBox) -> Option<Projection> {
        fit_to_bounds(
            bbox,
            self.viewport_width,
            self.viewport_height,
            self.limits.fit_margin,
        )
    }

    /// Pan by a pointer delta in pixels.
    ///
    /// One viewport width of drag moves the view by one path width; screen Y
    /// grows downward so the Y delta is inverted. Returns false when the
    /// viewport is degenerate.
    pub fn apply_pan(&mut self, delta_px: Vec2, bbox: &BoundingBox) -> bool {
        if !self.has_viewport() {
            return false;
        }
        self.pan.x += delta_px.x / self.viewport_width as f32 * bbox.width();
        self.pan.y -= delta_px.y / self.viewport_height as f32 * bbox.height();
        true
    }

    /// Zoom one wheel step; the sign of `wheel_delta` picks the direction.
    pub fn apply_zoom(&mut self, wheel_delta: f32) -> bool {
        let factor = if wheel_delta > 0.0 {
            self.limits.zoom_in_factor
        } else if wheel_delta < 0.0 {
            self.limits.zoom_out_factor
        } else {
            return false;
        };
        self.zoom = (self.zoom * factor).clamp(self.limits.min_zoom, self.limits.max_zoom);
        true
    }

    /// Rotate by a horizontal drag in pixels
    pub fn apply_rotation(&mut self, delta_px_x: f32) -> bool {
        if delta_px_x == 0.0 {
            return false;
        }
        self.rotation_deg += delta_px_x * self.limits.rotation_deg_per_px;
        true
    }

    /// Back to zoom 1, no pan, no rotation. The viewport size is kept.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan = Vec2::ZERO;
        self.rotation_deg = 0.0;
    }

    pub fn is_reset(&self) -> bool {
        self.zoom == 1.0 && self.pan == Vec2::ZERO && self.rotation_deg == 0.0
    }

    /// Data-space modelview transform.
    ///
    /// Applied to a point right to left: move the bbox center to the origin,
    /// pan, scale, rotate, then move back. Zoom and rotation therefore pivot
    /// on the path center while pan happens in the zoomed, rotated frame.
    pub fn compose_modelview(&self, bbox: &BoundingBox) -> Affine2 {
        let center = bbox.center();
        Affine2::from_translation(center)
            * Affine2::from_angle(self.rotation_deg.to_radians())
            * Affine2::from_scale(Vec2::splat(self.zoom))
            * Affine2::from_translation(self.pan)
            * Affine2::from_translation(-center)
    }

    /// The modelview as a 4x4 matrix for matrix-stack surfaces
    pub fn modelview_matrix(&self, bbox: &BoundingBox) -> Mat4 {
        let center = bbox.center().extend(0.0);
        Mat4::from_translation(center)
            * Mat4::from_quat(Quat::from_rotation_z(self.rotation_deg.to_radians()))
            * Mat4::from_scale(Vec3::new(self.zoom, self.zoom, 1.0))
            * Mat4::from_translation(self.pan.extend(0.0))
            * Mat4::from_translation(-center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f32) -> BoundingBox {
        BoundingBox::from_corners(Vec2::ZERO, Vec2::splat(size))
    }

    fn sized_view() -> ViewState {
        let mut view = ViewState::default();
        view.set_viewport_size(800, 600);
        view
    }

    #[test]
    fn test_default_state() {
        let view = ViewState::default();
        assert!(view.is_reset());
        assert!(!view.has_viewport());
    }

    #[test]
    fn test_zoom_steps_and_clamps() {
        let mut view = ViewState::default();
        assert!(view.apply_zoom(120.0));
        assert!((view.zoom() - 1.1).abs() < 1e-6);
        view.apply_zoom(-120.0);
        assert!((view.zoom() - 0.99).abs() < 1e-6);

        for _ in 0..100 {
            view.apply_zoom(1.0);
        }
        assert_eq!(view.zoom(), 10.0);
        for _ in 0..100 {
            view.apply_zoom(-1.0);
        }
        assert_eq!(view.zoom(), 0.1);
    }

    #[test]
    fn test_zero_wheel_delta_is_ignored() {
        let mut view = ViewState::default();
        assert!(!view.apply_zoom(0.0));
        assert_eq!(view.zoom(), 1.0);
    }

    #[test]
    fn test_pan_scales_by_path_extent() {
        let mut view = sized_view();
        let bbox = BoundingBox::from_corners(Vec2::ZERO, Vec2::new(100.0, 30.0));
        assert!(view.apply_pan(Vec2::new(80.0, 60.0), &bbox));
        assert!((view.pan().x - 10.0).abs() < 1e-5);
        assert!((view.pan().y + 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_pan_without_viewport_is_noop() {
        let mut view = ViewState::default();
        assert!(!view.apply_pan(Vec2::new(10.0, 10.0), &square(10.0)));
        assert_eq!(view.pan(), Vec2::ZERO);
    }

    #[test]
    fn test_rotation_half_degree_per_pixel() {
        let mut view = ViewState::default();
        view.apply_rotation(90.0);
        assert_eq!(view.rotation_deg(), 45.0);
        view.apply_rotation(-900.0);
        assert_eq!(view.rotation_deg(), -405.0);
    }

    #[test]
    fn test_reset_restores_defaults_and_keeps_viewport() {
        let mut view = sized_view();
        view.apply_zoom(1.0);
        view.apply_pan(Vec2::new(5.0, 5.0), &square(10.0));
        view.apply_rotation(3.0);
        view.reset();
        assert_eq!(view.zoom(), 1.0);
        assert_eq!(view.pan(), Vec2::ZERO);
        assert_eq!(view.rotation_deg(), 0.0);
        assert_eq!(view.viewport_size(), (800, 600));
    }

    #[test]
    fn test_identity_modelview_at_rest() {
        let view = ViewState::default();
        let m = view.compose_modelview(&square(10.0));
        let p = m.transform_point2(Vec2::new(3.0, 7.0));
        assert!(p.abs_diff_eq(Vec2::new(3.0, 7.0), 1e-5));
    }

    #[test]
    fn test_zoom_pivots_on_center() {
        let mut view = ViewState::default();
        view.apply_zoom(1.0);
        let bbox = square(10.0);
        let m = view.compose_modelview(&bbox);
        assert!(m
            .transform_point2(Vec2::splat(5.0))
            .abs_diff_eq(Vec2::splat(5.0), 1e-5));
        let corner = m.transform_point2(Vec2::splat(10.0));
        assert!(corner.abs_diff_eq(Vec2::splat(10.5), 1e-4));
    }

    #[test]
    fn test_rotation_pivots_on_center() {
        let mut view = ViewState::default();
        view.apply_rotation(180.0); // 90 degrees
        let m = view.compose_modelview(&square(10.0));
        let p = m.transform_point2(Vec2::new(10.0, 5.0));
        assert!(p.abs_diff_eq(Vec2::new(5.0, 10.0), 1e-4));
    }

    #[test]
    fn test_pan_applied_inside_zoom() {
        let mut view = sized_view();
        let bbox = square(800.0);
        view.apply_zoom(1.0);
        view.apply_pan(Vec2::new(1.0, 0.0), &bbox);
        let m = view.compose_modelview(&bbox);
        let shift = m.transform_point2(Vec2::splat(400.0)) - Vec2::splat(400.0);
        assert!((shift.x - 1.1).abs() < 1e-4);
    }

    #[test]
    fn test_matrix_agrees_with_affine() {
        let mut view = sized_view();
        let bbox = BoundingBox::from_corners(Vec2::new(-5.0, 2.0), Vec2::new(20.0, 9.0));
        view.apply_zoom(1.0);
        view.apply_rotation(37.0);
        view.apply_pan(Vec2::new(12.0, -7.0), &bbox);

        let affine = view.compose_modelview(&bbox);
        let matrix = view.modelview_matrix(&bbox);
        let p = Vec2::new(4.0, -3.0);
        let a = affine.transform_point2(p);
        let b = matrix.transform_point3(p.extend(0.0));
        assert!(a.abs_diff_eq(b.truncate(), 1e-4));
    }

    #[test]
    fn test_limits_validation() {
        assert!(CameraLimits::default().validate().is_ok());
        let bad = CameraLimits {
            min_zoom: 2.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
        let bad = CameraLimits {
            zoom_out_factor: 1.5,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_set_limits_clamps_zoom() {
        let mut view = ViewState::default();
        for _ in 0..30 {
            view.apply_zoom(1.0);
        }
        view.set_limits(CameraLimits {
            max_zoom: 4.0,
            ..Default::default()
        });
        assert_eq!(view.zoom(), 4.0);
    }
}
