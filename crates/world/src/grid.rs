use blockworld_common::Color;
use serde::{Deserialize, Serialize};

/// Light/dark colour pair for the checkerboard floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckerPalette {
    pub light: Color,
    pub dark: Color,
}

impl Default for CheckerPalette {
    fn default() -> Self {
        Self {
            light: Color::new(0.8, 0.8, 0.8),
            dark: Color::new(0.3, 0.3, 0.3),
        }
    }
}

/// A cell is light when `x + z` is even. Euclidean parity keeps the pattern
/// alternating across negative coordinates.
pub fn is_light_cell(x: i32, z: i32) -> bool {
    (x as i64 + z as i64).rem_euclid(2) == 0
}

pub fn checker_color(x: i32, z: i32, palette: &CheckerPalette) -> Color {
    if is_light_cell(x, z) {
        palette.light
    } else {
        palette.dark
    }
}
