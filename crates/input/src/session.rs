use crate::action::Action;
use crate::bridge::{FrameState, HeldDirections, InputBridge};
use crate::screen::{Screen, TitleLayout, Transition};
use blockworld_common::GameConfig;
use blockworld_render::Camera;
use glam::Vec2;
use std::time::Instant;

/// What the host loop should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    /// The active screen changed; the host may need to grab or release the
    /// cursor.
    ScreenChanged(Screen),
    Exit,
}

/// Per-run game context: active screen, the camera and everything that
/// feeds it. Created at startup, passed by reference to the update and
/// render steps, dropped at shutdown.
#[derive(Debug, Clone)]
pub struct Session {
    camera: Camera,
    screen: Screen,
    layout: TitleLayout,
    bridge: InputBridge,
    held: HeldDirections,
    /// Virtual cursor: absolute on menus, accumulated from raw motion in game.
    cursor: Vec2,
}

impl Session {
    pub fn new(camera: Camera, width: u32, height: u32) -> Self {
        let center = Vec2::new(width as f32 / 2.0, height as f32 / 2.0);
        Self {
            camera,
            screen: Screen::default(),
            layout: TitleLayout::for_window(width, height),
            bridge: InputBridge::new(center),
            held: HeldDirections::new(),
            cursor: center,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            Camera::from_config(&config.camera),
            config.window.width,
            config.window.height,
        )
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn layout(&self) -> &TitleLayout {
        &self.layout
    }

    /// Read-only view of the camera. It changes only through the bridge.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Change movement speed and mouse sensitivity (settings overlay).
    pub fn set_tuning(&mut self, movement_speed: f32, mouse_sensitivity: f32) {
        self.bridge
            .tune(&mut self.camera, movement_speed, mouse_sensitivity);
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Re-lay the title buttons for a new window size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.layout = TitleLayout::for_window(width, height);
    }

    pub fn handle(&mut self, action: Action) -> Control {
        match action {
            Action::Press(direction) => {
                self.held.press(direction);
                Control::Continue
            }
            Action::Release(direction) => {
                self.held.release(direction);
                Control::Continue
            }
            Action::ReleaseAll => {
                self.held.clear();
                Control::Continue
            }
            Action::CursorMoved(p) => {
                if self.screen != Screen::InGame {
                    self.cursor = p;
                }
                Control::Continue
            }
            Action::MouseMotion(delta) => {
                if self.screen == Screen::InGame {
                    self.cursor += delta;
                }
                Control::Continue
            }
            Action::Click(p) => self.click(p),
            Action::Quit => Control::Exit,
        }
    }

    fn click(&mut self, p: Vec2) -> Control {
        match self.screen.on_click(p, &self.layout) {
            Transition::Stay => Control::Continue,
            Transition::Exit => {
                tracing::info!("exit selected on title screen");
                Control::Exit
            }
            Transition::To(next) => {
                tracing::info!(from = ?self.screen, to = ?next, "screen transition");
                if next == Screen::InGame {
                    self.bridge.reset(self.cursor);
                }
                self.screen = next;
                Control::ScreenChanged(next)
            }
        }
    }

    /// Advance one frame. Only the game screen drives the camera.
    pub fn update(&mut self, now: Instant) -> Option<FrameState> {
        if self.screen != Screen::InGame {
            return None;
        }
        Some(self.bridge.update(&mut self.camera, now, self.cursor, &self.held))
    }
}
