use blockworld_common::ProjectionConfig;
use glam::Mat4;

/// Perspective projection. Field of view is vertical, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(45.0, 800.0 / 600.0, 0.1, 100.0)
    }
}

impl Projection {
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_degrees,
            aspect,
            near,
            far,
        }
    }

    pub fn from_config(config: &ProjectionConfig, width: u32, height: u32) -> Self {
        let mut projection = Self::new(config.fov_degrees, 1.0, config.near, config.far);
        projection.resize(width, height);
        projection
    }

    /// Track a new surface size. Zero-sized surfaces (minimised windows) are
    /// ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
            tracing::debug!(width, height, aspect = self.aspect, "projection resized");
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn default_matches_window() {
        let p = Projection::default();
        assert_eq!(p.fov_degrees, 45.0);
        assert!((p.aspect - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn resize_ignores_zero() {
        let mut p = Projection::default();
        p.resize(1920, 1080);
        assert!((p.aspect - 16.0 / 9.0).abs() < 1e-6);
        p.resize(0, 600);
        assert!((p.aspect - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn near_and_far_map_to_depth_range() {
        let p = Projection::default();
        let m = p.matrix();
        let near = m * Vec4::new(0.0, 0.0, -p.near, 1.0);
        let far = m * Vec4::new(0.0, 0.0, -p.far, 1.0);
        assert!((near.z / near.w).abs() < 1e-5);
        assert!((far.z / far.w - 1.0).abs() < 1e-5);
    }

    #[test]
    fn from_config_uses_surface_aspect() {
        let p = Projection::from_config(&ProjectionConfig::default(), 800, 600);
        assert_eq!(p, Projection::default());
    }
}
