//! Input layer: maps raw window input to actions, drives the camera from
//! them each frame and runs the title/game screen state machine.
//!
//! # Invariants
//! - The camera is written only by [`InputBridge`]: movement and look in
//!   [`InputBridge::update`], speed and sensitivity in
//!   [`InputBridge::tune`]. Everything else sees it through
//!   [`Session::camera`].
//! - Keys are independent; every held direction moves the camera each frame.
//! - IN_GAME is terminal: nothing transitions back to the title.

pub mod action;
pub mod bridge;
pub mod clock;
pub mod screen;
pub mod session;

pub use action::Action;
pub use bridge::{FrameState, HeldDirections, InputBridge};
pub use clock::{CursorTracker, FrameClock};
pub use screen::{Button, Rect, Screen, TitleLayout, Transition};
pub use session::{Control, Session};

pub fn crate_info() -> &'static str {
    "blockworld-input v0.1.0"
}
