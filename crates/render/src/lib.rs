//! Rendering adapter: the first-person camera and backend-agnostic frame
//! building.
//!
//! # Invariants
//! - The camera basis is orthonormal after every orientation change.
//! - A [`Frame`] holds exactly one draw per world instance.
//! - Renderers read frames; they never mutate camera or world state.

mod camera;
mod frame;
mod projection;
mod renderer;

pub use camera::{Camera, Direction, PITCH_LIMIT, WORLD_UP};
pub use frame::{DrawCall, Frame, Material, MeshKind};
pub use projection::Projection;
pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "blockworld-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
