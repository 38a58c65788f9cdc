use crate::camera::Camera;
use crate::projection::Projection;
use blockworld_common::Color;
use blockworld_world::{FaceSetId, World};
use glam::{Mat4, Vec3};
use serde::Serialize;

/// Which shared mesh a draw uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MeshKind {
    Quad,
    Cube,
}

/// What a draw is shaded with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Material {
    Color(Color),
    Faces(FaceSetId),
}

/// One instance to draw: shared mesh, its model matrix and material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawCall {
    pub mesh: MeshKind,
    pub model: Mat4,
    pub material: Material,
}

/// Everything a backend needs to draw one frame. Built fresh each frame
/// from read-only camera and world state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub view: Mat4,
    pub projection: Mat4,
    pub eye: Vec3,
    pub clear_color: Color,
    /// Tiles in world order, then blocks. No batching: one per instance.
    pub draws: Vec<DrawCall>,
}

impl Frame {
    pub fn build(camera: &Camera, projection: &Projection, world: &World, clear_color: Color) -> Self {
        let mut draws = Vec::with_capacity(world.instance_count());
        draws.extend(world.tiles().iter().map(|tile| DrawCall {
            mesh: MeshKind::Quad,
            model: tile.transform.model_matrix(),
            material: Material::Color(tile.color),
        }));
        draws.extend(world.blocks().iter().map(|block| DrawCall {
            mesh: MeshKind::Cube,
            model: block.transform.model_matrix(),
            material: Material::Faces(block.faces),
        }));
        Self {
            view: camera.view_matrix(),
            projection: projection.matrix(),
            eye: camera.position,
            clear_color,
            draws,
        }
    }

    pub fn draw_count(&self) -> usize {
        self.draws.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockworld_common::Transform;
    use blockworld_world::{CheckerPalette, FaceSet};

    fn world() -> World {
        let mut w = World::checker_grid(1, &CheckerPalette::default());
        let faces = w.register_face_set(FaceSet::uniform("dirt.png"));
        w.add_block(Transform::new(Vec3::new(0.0, 0.5, 0.0)), faces).unwrap();
        w.add_block(Transform::new(Vec3::new(1.0, 0.5, 0.0)), faces).unwrap();
        w
    }

    #[test]
    fn one_draw_per_instance() {
        let w = world();
        let frame = Frame::build(&Camera::default(), &Projection::default(), &w, Color::WHITE);
        assert_eq!(frame.draw_count(), w.instance_count());
        assert_eq!(frame.draw_count(), 9 + 2);
    }

    #[test]
    fn tiles_before_blocks() {
        let frame = Frame::build(&Camera::default(), &Projection::default(), &world(), Color::WHITE);
        let first_cube = frame.draws.iter().position(|d| d.mesh == MeshKind::Cube).unwrap();
        assert_eq!(first_cube, 9);
        assert!(frame.draws[..9].iter().all(|d| matches!(d.material, Material::Color(_))));
        assert!(frame.draws[9..].iter().all(|d| matches!(d.material, Material::Faces(_))));
    }

    #[test]
    fn uses_camera_and_projection_matrices() {
        let camera = Camera::default();
        let projection = Projection::default();
        let frame = Frame::build(&camera, &projection, &World::new(), Color::BLACK);
        assert_eq!(frame.view, camera.view_matrix());
        assert_eq!(frame.projection, projection.matrix());
        assert_eq!(frame.draw_count(), 0);
    }

    #[test]
    fn model_matrix_comes_from_transform() {
        let mut w = World::new();
        let t = Transform::new(Vec3::new(2.0, 0.0, 3.0)).rotated(90.0, Vec3::X);
        w.add_tile(blockworld_world::Tile {
            transform: t,
            color: Color::WHITE,
        });
        let frame = Frame::build(&Camera::default(), &Projection::default(), &w, Color::BLACK);
        assert_eq!(frame.draws[0].model, t.model_matrix());
    }
}
