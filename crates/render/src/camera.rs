use blockworld_common::CameraConfig;
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Pitch limit in degrees. Looking straight up or down would collapse the
/// right vector.
pub const PITCH_LIMIT: f32 = 89.0;

/// The up direction of the world. Fixed, so the camera never rolls.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// A movement direction the camera can be driven in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];
}

/// First-person fly camera.
///
/// Orientation is yaw/pitch in degrees. The `front`/`right`/`up` basis is
/// derived from them and recomputed after every orientation change, so it is
/// always orthonormal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Units per second.
    pub movement_speed: f32,
    /// Degrees per pixel of cursor movement.
    pub mouse_sensitivity: f32,
    yaw: f32,
    pitch: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl Camera {
    /// Camera at `position` with orientation in degrees. Pitch is clamped.
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            movement_speed: 10.0,
            mouse_sensitivity: 0.1,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
        };
        camera.update_vectors();
        camera
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            movement_speed: config.movement_speed,
            mouse_sensitivity: config.mouse_sensitivity,
            ..Self::new(
                Vec3::from_array(config.position),
                config.yaw,
                config.pitch,
            )
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Move `movement_speed * dt` units in `direction`.
    ///
    /// Up/Down follow the world up axis. The other four follow `front` and
    /// `right` flattened onto the ground plane, so looking up or down never
    /// changes horizontal speed.
    pub fn process_keyboard(&mut self, direction: Direction, dt: f32) {
        let velocity = self.movement_speed * dt;
        let forward = horizontal(self.front);
        let right = horizontal(self.right);
        let step = match direction {
            Direction::Forward => forward,
            Direction::Backward => -forward,
            Direction::Left => -right,
            Direction::Right => right,
            Direction::Up => WORLD_UP,
            Direction::Down => -WORLD_UP,
        };
        self.position += step * velocity;
    }

    /// Turn by cursor offsets in pixels. Positive `y_offset` looks up.
    ///
    /// With `constrain_pitch`, pitch is clamped to ±[`PITCH_LIMIT`]. Yaw is
    /// never wrapped.
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;
        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
        self.update_vectors();
    }

    /// Look-at transform from `position` towards `position + front`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        // Straight up/down (only reachable unconstrained): keep the last right.
        self.right = self.front.cross(WORLD_UP).try_normalize().unwrap_or(self.right);
        self.up = self.right.cross(self.front).normalize();
    }
}

fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn assert_orthonormal(c: &Camera) {
        for v in [c.front(), c.right(), c.up()] {
            assert!((v.length() - 1.0).abs() < EPS, "not unit: {v}");
        }
        assert!(c.front().dot(c.right()).abs() < EPS);
        assert!(c.front().dot(c.up()).abs() < EPS);
        assert!(c.right().dot(c.up()).abs() < EPS);
    }

    #[test]
    fn basis_orthonormal_over_yaw_and_pitch() {
        let mut yaw = -720.0;
        while yaw <= 720.0 {
            let mut pitch = -89.0;
            while pitch <= 89.0 {
                let c = Camera::new(Vec3::ZERO, yaw, pitch);
                assert_orthonormal(&c);
                assert!(c.right().y.abs() < EPS, "roll introduced");
                pitch += 8.9;
            }
            yaw += 37.0;
        }
    }

    #[test]
    fn default_looks_down_negative_z() {
        let c = Camera::default();
        assert_eq!(c.position, Vec3::new(0.0, 5.0, 10.0));
        assert!(c.front().z < 0.0);
        assert!(c.front().y < 0.0);
        assert!(c.front().x.abs() < EPS);
    }

    #[test]
    fn mouse_movement_is_linear_without_clamping() {
        let mut a = Camera::new(Vec3::ZERO, -90.0, 0.0);
        let mut b = a;
        a.process_mouse_movement(30.0, 50.0, false);
        a.process_mouse_movement(-12.0, 70.0, false);
        b.process_mouse_movement(18.0, 120.0, false);
        assert!((a.yaw() - b.yaw()).abs() < EPS);
        assert!((a.pitch() - b.pitch()).abs() < EPS);
    }

    #[test]
    fn new_clamps_initial_pitch() {
        let c = Camera::new(Vec3::ZERO, 0.0, 120.0);
        assert_eq!(c.pitch(), PITCH_LIMIT);
        assert_orthonormal(&c);
    }

    #[test]
    fn pitch_clamps_exactly_at_limits() {
        let mut c = Camera::default();
        c.process_mouse_movement(0.0, 10_000.0, true);
        assert_eq!(c.pitch(), 89.0);
        c.process_mouse_movement(0.0, -50_000.0, true);
        assert_eq!(c.pitch(), -89.0);
        assert_orthonormal(&c);
    }

    #[test]
    fn unconstrained_pitch_passes_limit() {
        let mut c = Camera::new(Vec3::ZERO, 0.0, 0.0);
        c.process_mouse_movement(0.0, 1000.0, false);
        assert!((c.pitch() - 100.0).abs() < EPS);
        assert!(c.front().is_finite() && c.right().is_finite() && c.up().is_finite());
    }

    #[test]
    fn yaw_is_not_wrapped() {
        let mut c = Camera::new(Vec3::ZERO, 0.0, 0.0);
        c.process_mouse_movement(5000.0, 0.0, true);
        assert!((c.yaw() - 500.0).abs() < EPS);
    }

    #[test]
    fn up_moves_only_vertically() {
        let mut c = Camera::new(Vec3::new(1.0, 2.0, 3.0), 33.0, -40.0);
        c.process_keyboard(Direction::Up, 0.25);
        assert_eq!(c.position.x, 1.0);
        assert_eq!(c.position.z, 3.0);
        assert!((c.position.y - (2.0 + 10.0 * 0.25)).abs() < EPS);

        c.process_keyboard(Direction::Down, 0.25);
        assert!((c.position.y - 2.0).abs() < EPS);
    }

    #[test]
    fn forward_then_backward_returns_home() {
        let start = Vec3::new(4.0, 1.0, -2.0);
        let mut c = Camera::new(start, 123.0, 45.0);
        c.process_keyboard(Direction::Forward, 0.016);
        c.process_keyboard(Direction::Backward, 0.016);
        assert!((c.position - start).length() < EPS);

        c.process_keyboard(Direction::Left, 0.5);
        c.process_keyboard(Direction::Right, 0.5);
        assert!((c.position - start).length() < EPS);
    }

    #[test]
    fn horizontal_speed_ignores_pitch() {
        for pitch in [-89.0, -30.0, 0.0, 60.0] {
            let mut c = Camera::new(Vec3::ZERO, -90.0, pitch);
            c.process_keyboard(Direction::Forward, 1.0);
            assert_eq!(c.position.y, 0.0);
            assert!((c.position.length() - 10.0).abs() < 1e-3);
            assert!(c.position.z < 0.0);
        }
    }

    #[test]
    fn strafe_is_perpendicular_to_forward() {
        let mut c = Camera::new(Vec3::ZERO, -90.0, -30.0);
        c.process_keyboard(Direction::Right, 1.0);
        assert!((c.position - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn view_matrix_matches_look_at_from_initial_angles() {
        let c = Camera::new(Vec3::new(0.0, 5.0, 10.0), -90.0, -30.0);
        let (yaw, pitch) = ((-90.0_f32).to_radians(), (-30.0_f32).to_radians());
        let front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
            .normalize();
        let right = front.cross(Vec3::Y).normalize();
        let up = right.cross(front).normalize();
        let expected = Mat4::look_at_rh(c.position, c.position + front, up);
        assert!(c.view_matrix().abs_diff_eq(expected, 1e-6));
        // deterministic
        assert_eq!(c.view_matrix(), Camera::new(c.position, -90.0, -30.0).view_matrix());
    }

    #[test]
    fn from_config_applies_tuning() {
        let config = CameraConfig {
            movement_speed: 3.0,
            mouse_sensitivity: 0.5,
            ..CameraConfig::default()
        };
        let c = Camera::from_config(&config);
        assert_eq!(c.movement_speed, 3.0);
        assert_eq!(c.mouse_sensitivity, 0.5);
        assert_eq!(c.yaw(), -90.0);
    }
}
