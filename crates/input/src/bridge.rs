use crate::clock::{CursorTracker, FrameClock};
use blockworld_render::{Camera, Direction};
use glam::Vec2;
use std::time::Instant;

/// The set of movement directions currently held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldDirections([bool; 6]);

impl HeldDirections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, direction: Direction) {
        self.0[direction as usize] = true;
    }

    pub fn release(&mut self, direction: Direction) {
        self.0[direction as usize] = false;
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        self.0[direction as usize]
    }

    pub fn clear(&mut self) {
        self.0 = [false; 6];
    }

    /// Held directions in [`Direction::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|d| self.is_held(*d))
    }
}

/// What one bridge update fed to the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    pub dt: f32,
    pub look: Vec2,
    pub moves: usize,
}

/// Feeds one frame of input into the camera: elapsed time, cursor delta and
/// every held movement direction.
#[derive(Debug, Clone)]
pub struct InputBridge {
    clock: FrameClock,
    cursor: CursorTracker,
}

impl InputBridge {
    pub fn new(cursor_anchor: Vec2) -> Self {
        Self {
            clock: FrameClock::new(),
            cursor: CursorTracker::new(cursor_anchor),
        }
    }

    /// Run one frame. Look is applied before movement, so this frame's
    /// movement already uses this frame's orientation.
    pub fn update(
        &mut self,
        camera: &mut Camera,
        now: Instant,
        cursor: Vec2,
        held: &HeldDirections,
    ) -> FrameState {
        let dt = self.clock.tick(now);
        let look = self.cursor.offsets(cursor);
        camera.process_mouse_movement(look.x, look.y, true);

        let mut moves = 0;
        for direction in held.iter() {
            camera.process_keyboard(direction, dt);
            moves += 1;
        }
        FrameState { dt, look, moves }
    }

    /// Apply new movement speed and mouse sensitivity. Values that are not
    /// finite and positive leave the current setting in place.
    pub fn tune(&self, camera: &mut Camera, movement_speed: f32, mouse_sensitivity: f32) {
        if movement_speed.is_finite() && movement_speed > 0.0 {
            camera.movement_speed = movement_speed;
        }
        if mouse_sensitivity.is_finite() && mouse_sensitivity > 0.0 {
            camera.mouse_sensitivity = mouse_sensitivity;
        }
    }

    /// Restart timing and cursor tracking, e.g. when gameplay begins.
    pub fn reset(&mut self, cursor: Vec2) {
        self.clock.reset();
        self.cursor.reanchor(cursor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::time::Duration;

    #[test]
    fn held_directions_are_independent() {
        let mut held = HeldDirections::new();
        held.press(Direction::Forward);
        held.press(Direction::Right);
        held.press(Direction::Forward);
        assert_eq!(held.iter().collect::<Vec<_>>(), vec![Direction::Forward, Direction::Right]);
        held.release(Direction::Forward);
        assert!(!held.is_held(Direction::Forward));
        assert!(held.is_held(Direction::Right));
        held.clear();
        assert_eq!(held.iter().count(), 0);
    }

    #[test]
    fn diagonal_movement_combines_two_calls() {
        let mut camera = Camera::new(Vec3::ZERO, -90.0, 0.0);
        let mut bridge = InputBridge::new(Vec2::new(400.0, 300.0));
        let mut held = HeldDirections::new();
        held.press(Direction::Forward);
        held.press(Direction::Right);

        let t0 = Instant::now();
        bridge.update(&mut camera, t0, Vec2::new(400.0, 300.0), &held);
        let state = bridge.update(
            &mut camera,
            t0 + Duration::from_millis(100),
            Vec2::new(400.0, 300.0),
            &held,
        );
        assert_eq!(state.moves, 2);
        // forward is -Z, right is +X, 10 u/s for 0.1 s each
        assert!((camera.position - Vec3::new(1.0, 0.0, -1.0)).length() < 1e-3);
    }

    #[test]
    fn cursor_delta_turns_camera() {
        let mut camera = Camera::new(Vec3::ZERO, -90.0, 0.0);
        let mut bridge = InputBridge::new(Vec2::new(400.0, 300.0));
        let held = HeldDirections::new();
        let state = bridge.update(&mut camera, Instant::now(), Vec2::new(500.0, 250.0), &held);
        assert_eq!(state.look, Vec2::new(100.0, 50.0));
        // sensitivity 0.1
        assert!((camera.yaw() - -80.0).abs() < 1e-4);
        assert!((camera.pitch() - 5.0).abs() < 1e-4);
        assert_eq!(state.moves, 0);
        assert_eq!(camera.position, Vec3::ZERO);
    }

    #[test]
    fn tune_rejects_invalid_values() {
        let mut camera = Camera::default();
        let bridge = InputBridge::new(Vec2::ZERO);
        bridge.tune(&mut camera, 4.0, 0.25);
        assert_eq!(camera.movement_speed, 4.0);
        assert_eq!(camera.mouse_sensitivity, 0.25);

        bridge.tune(&mut camera, f32::NAN, -1.0);
        assert_eq!(camera.movement_speed, 4.0);
        assert_eq!(camera.mouse_sensitivity, 0.25);
    }

    #[test]
    fn reset_prevents_catch_up_jump() {
        let mut camera = Camera::default();
        let mut bridge = InputBridge::new(Vec2::ZERO);
        let mut held = HeldDirections::new();
        held.press(Direction::Up);
        let t0 = Instant::now();
        bridge.update(&mut camera, t0, Vec2::ZERO, &held);
        let before = camera;

        bridge.reset(Vec2::new(640.0, 360.0));
        let state = bridge.update(
            &mut camera,
            t0 + Duration::from_secs(30),
            Vec2::new(640.0, 360.0),
            &held,
        );
        assert_eq!(state.dt, 0.0);
        assert_eq!(state.look, Vec2::ZERO);
        assert_eq!(camera.position, before.position);
    }
}
