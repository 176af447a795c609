use vista_common::CameraAngle;
use vista_config::schema::RenderConfig;

use crate::sphere::matrix::{self as mat, Mat4};

/// Perspective camera fixed at the sphere's center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanoramaCamera {
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PanoramaCamera {
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            fov_y: (config.fov_deg as f32).to_radians(),
            aspect: 1.0,
            near: config.near as f32,
            far: config.far as f32,
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn projection(&self) -> Mat4 {
        mat::perspective(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Projection × view for the given angle. Roll is always zero.
    pub fn view_proj(&self, angle: CameraAngle) -> Mat4 {
        mat::mul(
            &self.projection(),
            &mat::look_from_angles(angle.yaw, angle.pitch),
        )
    }
}

impl Default for PanoramaCamera {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_config() {
        let cam = PanoramaCamera::default();
        assert!((cam.fov_y - 100f32.to_radians()).abs() < 1e-6);
        assert_eq!(cam.near, 1.0);
        assert_eq!(cam.far, 1100.0);
    }

    #[test]
    fn viewport_sets_aspect() {
        let mut cam = PanoramaCamera::default();
        cam.set_viewport(1920, 1080);
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
        cam.set_viewport(1080, 1920);
        assert!((cam.aspect - 9.0 / 16.0).abs() < 1e-6);
        cam.set_viewport(0, 0);
        assert_eq!(cam.aspect, 1.0);
    }

    #[test]
    fn sphere_point_ahead_is_centered_and_visible() {
        let mut cam = PanoramaCamera::default();
        cam.set_viewport(800, 600);
        let vp = cam.view_proj(CameraAngle::ZERO);
        let clip = mat::transform_point(&vp, [0.0, 0.0, -500.0]);
        let ndc = [clip[0] / clip[3], clip[1] / clip[3], clip[2] / clip[3]];
        assert!(ndc[0].abs() < 1e-5 && ndc[1].abs() < 1e-5);
        assert!(ndc[2] > 0.0 && ndc[2] < 1.0, "depth {}", ndc[2]);
    }

    #[test]
    fn point_behind_is_clipped() {
        let vp = PanoramaCamera::default().view_proj(CameraAngle::ZERO);
        let clip = mat::transform_point(&vp, [0.0, 0.0, 500.0]);
        assert!(clip[3] < 0.0);
    }
}
