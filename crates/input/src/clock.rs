use glam::Vec2;
use std::time::Instant;

/// Measures the time between consecutive frames.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous tick. The first tick after construction or
    /// [`reset`](Self::reset) returns 0.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        self.last = Some(now);
        dt
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Turns absolute cursor positions into per-frame look offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorTracker {
    last: Vec2,
}

impl CursorTracker {
    /// Start tracking from `anchor`, usually the window centre.
    pub fn new(anchor: Vec2) -> Self {
        Self { last: anchor }
    }

    /// Offset since the previous call. Y is inverted: screen Y grows down,
    /// pitch grows looking up.
    pub fn offsets(&mut self, cursor: Vec2) -> Vec2 {
        let offset = Vec2::new(cursor.x - self.last.x, self.last.y - cursor.y);
        self.last = cursor;
        offset
    }

    /// Forget the previous position so the next frame reports no jump.
    pub fn reanchor(&mut self, cursor: Vec2) {
        self.last = cursor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(Instant::now()), 0.0);
    }

    #[test]
    fn tick_measures_difference() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick(t0);
        let dt = clock.tick(t0 + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-6);
        let dt = clock.tick(t0 + Duration::from_millis(50));
        assert!((dt - 0.034).abs() < 1e-6);
    }

    #[test]
    fn reset_restarts_measurement() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick(t0);
        clock.reset();
        assert_eq!(clock.tick(t0 + Duration::from_secs(10)), 0.0);
    }

    #[test]
    fn cursor_offsets_invert_y() {
        let mut tracker = CursorTracker::new(Vec2::new(400.0, 300.0));
        let off = tracker.offsets(Vec2::new(410.0, 280.0));
        assert_eq!(off, Vec2::new(10.0, 20.0));
        let off = tracker.offsets(Vec2::new(410.0, 280.0));
        assert_eq!(off, Vec2::ZERO);
    }

    #[test]
    fn reanchor_suppresses_jump() {
        let mut tracker = CursorTracker::new(Vec2::ZERO);
        tracker.reanchor(Vec2::new(700.0, 500.0));
        assert_eq!(tracker.offsets(Vec2::new(700.0, 500.0)), Vec2::ZERO);
        assert_eq!(tracker.offsets(Vec2::new(710.0, 500.0)), Vec2::new(10.0, 0.0));
    }
}
