use glam::Vec2;

/// Axis-aligned rectangle in window pixels. `min` inclusive, `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            max: center + size / 2.0,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.y >= self.min.y && p.x < self.max.x && p.y < self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Start,
    Settings,
    Exit,
}

/// Title screen button placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleLayout {
    pub start: Rect,
    pub settings: Rect,
    pub exit: Rect,
}

impl TitleLayout {
    const BUTTON: Vec2 = Vec2::new(220.0, 50.0);
    const SPACING: f32 = 70.0;

    /// Three stacked buttons, horizontally centred, starting at mid height.
    pub fn for_window(width: u32, height: u32) -> Self {
        let cx = width as f32 / 2.0;
        let y = height as f32 / 2.0;
        let at = |row: f32| Rect::from_center_size(Vec2::new(cx, y + row * Self::SPACING), Self::BUTTON);
        Self {
            start: at(0.0),
            settings: at(1.0),
            exit: at(2.0),
        }
    }

    pub fn hit(&self, p: Vec2) -> Option<Button> {
        self.buttons()
            .into_iter()
            .find(|(_, rect)| rect.contains(p))
            .map(|(button, _)| button)
    }

    pub fn buttons(&self) -> [(Button, Rect); 3] {
        [
            (Button::Start, self.start),
            (Button::Settings, self.settings),
            (Button::Exit, self.exit),
        ]
    }
}

/// Which screen is active. The settings overlay only exists on top of the
/// title, and there is no way back from the game to the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Title,
    SettingsOverlay,
    InGame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    To(Screen),
    Exit,
}

impl Screen {
    /// React to a click at `p`.
    ///
    /// On the title (with or without the overlay) Start enters the game,
    /// Settings toggles the overlay and Exit quits. In game, clicks are not
    /// screen transitions.
    pub fn on_click(self, p: Vec2, layout: &TitleLayout) -> Transition {
        if self == Screen::InGame {
            return Transition::Stay;
        }
        match layout.hit(p) {
            Some(Button::Start) => Transition::To(Screen::InGame),
            Some(Button::Settings) => Transition::To(match self {
                Screen::Title => Screen::SettingsOverlay,
                _ => Screen::Title,
            }),
            Some(Button::Exit) => Transition::Exit,
            None => Transition::Stay,
        }
    }
}
