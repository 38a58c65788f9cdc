use blockworld_render::Direction;
use glam::Vec2;

/// A high-level input action.
///
/// The session consumes actions, never raw window events, so the desktop
/// app and headless tools drive the game the same way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// A movement key went down.
    Press(Direction),
    /// A movement key went up.
    Release(Direction),
    /// Absolute cursor position in window pixels (free cursor on menus).
    CursorMoved(Vec2),
    /// Raw pointer motion in pixels (captured cursor in game).
    MouseMotion(Vec2),
    /// Drop every held movement key, e.g. when the window loses focus and
    /// key releases will not arrive.
    ReleaseAll,
    /// Primary button click at a window position.
    Click(Vec2),
    /// Close the game (window close or Escape).
    Quit,
}
