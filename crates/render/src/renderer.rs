use crate::frame::{Frame, Material, MeshKind};
use std::fmt::Write;

/// Renderer-agnostic interface. All renderers consume a built [`Frame`].
///
/// A renderer never mutates the camera or the world; the frame is a
/// read-only snapshot of both.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    fn render(&self, frame: &Frame) -> Self::Output;
}

/// Human-readable frame dump for the CLI, logs and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Print every draw call, not just the summary.
    pub verbose: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose() -> Self {
        Self { verbose: true }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &Frame) -> String {
        let tiles = frame.draws.iter().filter(|d| d.mesh == MeshKind::Quad).count();
        let blocks = frame.draws.len() - tiles;
        let mut out = String::new();
        let _ = writeln!(out, "=== Frame (draws={}) ===", frame.draw_count());
        let _ = writeln!(
            out,
            "Eye: ({:.2}, {:.2}, {:.2})",
            frame.eye.x, frame.eye.y, frame.eye.z
        );
        let _ = writeln!(out, "Tiles: {tiles}  Blocks: {blocks}");

        if self.verbose {
            for (i, draw) in frame.draws.iter().enumerate() {
                let p = draw.model.w_axis;
                let material = match draw.material {
                    Material::Color(c) => format!("color=({:.2}, {:.2}, {:.2})", c.r, c.g, c.b),
                    Material::Faces(id) => format!("faces={}", id.0),
                };
                let _ = writeln!(
                    out,
                    "  #{i:<4} {:?} pos=({:.2}, {:.2}, {:.2}) {material}",
                    draw.mesh, p.x, p.y, p.z
                );
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Camera, Projection};
    use blockworld_common::Color;
    use blockworld_world::{CheckerPalette, World};

    #[test]
    fn summary_for_empty_world() {
        let frame = Frame::build(&Camera::default(), &Projection::default(), &World::new(), Color::BLACK);
        let out = DebugTextRenderer::new().render(&frame);
        assert!(out.contains("draws=0"));
        assert!(out.contains("Eye: (0.00, 5.00, 10.00)"));
    }

    #[test]
    fn verbose_lists_every_draw() {
        let world = World::checker_grid(1, &CheckerPalette::default());
        let frame = Frame::build(&Camera::default(), &Projection::default(), &world, Color::BLACK);
        let out = DebugTextRenderer::verbose().render(&frame);
        assert!(out.contains("Tiles: 9  Blocks: 0"));
        assert_eq!(out.matches("Quad pos=").count(), 9);
    }
}
