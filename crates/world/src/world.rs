use crate::grid::{CheckerPalette, checker_color};
use blockworld_common::{Color, Face, GameConfig, Transform};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A flat coloured quad instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub transform: Transform,
    pub color: Color,
}

/// Index of a registered [`FaceSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FaceSetId(pub usize);

/// Texture paths for the six faces of a block, in [`Face::ALL`] order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceSet {
    pub paths: [PathBuf; 6],
}

impl FaceSet {
    pub fn new(paths: [PathBuf; 6]) -> Self {
        Self { paths }
    }

    /// The same texture on every face.
    pub fn uniform(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            paths: std::array::from_fn(|_| path.clone()),
        }
    }

    pub fn path(&self, face: Face) -> &PathBuf {
        &self.paths[face.index()]
    }
}

/// A textured unit cube instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub transform: Transform,
    pub faces: FaceSetId,
}

/// Errors from world construction.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("face set {0:?} is not registered")]
    UnknownFaceSet(FaceSetId),
}

/// The static scene: tiles first, then blocks, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    tiles: Vec<Tile>,
    blocks: Vec<Block>,
    face_sets: Vec<FaceSet>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the scene described by the config: checkerboard floor, sample
    /// tile cluster and textured blocks.
    pub fn from_config(config: &GameConfig) -> Self {
        let mut world = if config.grid.enabled {
            Self::checker_grid(
                config.grid.half_extent,
                &CheckerPalette {
                    light: config.grid.light,
                    dark: config.grid.dark,
                },
            )
        } else {
            Self::new()
        };

        if let Some(origin) = config.sample_cluster {
            world.sample_cluster(Vec3::from_array(origin));
        }

        if !config.blocks.positions.is_empty() {
            let faces = world.register_face_set(FaceSet::new(config.blocks.face_paths()));
            for p in &config.blocks.positions {
                world.blocks.push(Block {
                    transform: Transform::new(Vec3::from_array(*p)),
                    faces,
                });
            }
        }

        tracing::debug!(
            tiles = world.tiles.len(),
            blocks = world.blocks.len(),
            "world built from config"
        );
        world
    }

    /// Flat floor of unit tiles spanning `-half_extent..=half_extent` on X
    /// and Z, coloured by cell parity.
    pub fn checker_grid(half_extent: i32, palette: &CheckerPalette) -> Self {
        let mut world = Self::new();
        for x in -half_extent..=half_extent {
            for z in -half_extent..=half_extent {
                world.add_tile(Tile {
                    transform: Transform::new(Vec3::new(x as f32, 0.0, z as f32)),
                    color: checker_color(x, z, palette),
                });
            }
        }
        world
    }

    /// Add six coloured tiles forming an open unit cube whose centre is
    /// `origin + (0, 0, 0.5)`.
    pub fn sample_cluster(&mut self, origin: Vec3) {
        let o = origin;
        let tiles = [
            (o + Vec3::new(0.0, 0.0, 1.0), 90.0, Vec3::X, Color::new(0.7, 0.2, 0.1)),
            (o, 90.0, Vec3::X, Color::WHITE),
            (o + Vec3::new(-0.5, 0.0, 0.5), 90.0, Vec3::Z, Color::new(1.0, 0.0, 0.4)),
            (o + Vec3::new(0.5, 0.0, 0.5), 90.0, Vec3::Z, Color::new(0.3, 1.0, 0.0)),
            (o + Vec3::new(0.0, 0.5, 0.5), 0.0, Vec3::X, Color::BLACK),
            (o + Vec3::new(0.0, -0.5, 0.5), 180.0, Vec3::X, Color::new(0.5, 0.2, 0.2)),
        ];
        for (position, angle, axis, color) in tiles {
            self.add_tile(Tile {
                transform: Transform::new(position).rotated(angle, axis),
                color,
            });
        }
    }

    pub fn add_tile(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    pub fn register_face_set(&mut self, faces: FaceSet) -> FaceSetId {
        self.face_sets.push(faces);
        FaceSetId(self.face_sets.len() - 1)
    }

    /// Add a block. Its face set must already be registered.
    pub fn add_block(&mut self, transform: Transform, faces: FaceSetId) -> Result<(), WorldError> {
        if faces.0 >= self.face_sets.len() {
            return Err(WorldError::UnknownFaceSet(faces));
        }
        self.blocks.push(Block { transform, faces });
        Ok(())
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn face_sets(&self) -> &[FaceSet] {
        &self.face_sets
    }

    /// Tiles plus blocks.
    pub fn instance_count(&self) -> usize {
        self.tiles.len() + self.blocks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_starts_empty() {
        let w = World::new();
        assert_eq!(w.instance_count(), 0);
        assert!(w.face_sets().is_empty());
    }

    #[test]
    fn checker_grid_covers_every_cell() {
        let w = World::checker_grid(2, &CheckerPalette::default());
        assert_eq!(w.tiles().len(), 25);
        assert!(w.tiles().iter().all(|t| t.transform.position.y == 0.0));
    }

    #[test]
    fn checker_grid_colours_by_parity() {
        let palette = CheckerPalette::default();
        let w = World::checker_grid(4, &palette);
        for tile in w.tiles() {
            let x = tile.transform.position.x as i32;
            let z = tile.transform.position.z as i32;
            assert_eq!(tile.color, checker_color(x, z, &palette));
        }
    }

    #[test]
    fn sample_cluster_adds_six_tiles() {
        let mut w = World::new();
        w.sample_cluster(Vec3::ZERO);
        assert_eq!(w.tiles().len(), 6);
        assert_eq!(w.tiles()[0].transform.position, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(w.tiles()[5].transform.angle_degrees, 180.0);
    }

    #[test]
    fn add_block_requires_registered_face_set() {
        let mut w = World::new();
        let err = w.add_block(Transform::default(), FaceSetId(0)).unwrap_err();
        assert!(matches!(err, WorldError::UnknownFaceSet(FaceSetId(0))));

        let id = w.register_face_set(FaceSet::uniform("stone.png"));
        w.add_block(Transform::default(), id).unwrap();
        assert_eq!(w.blocks().len(), 1);
        assert_eq!(w.face_sets()[id.0].path(Face::Top), &PathBuf::from("stone.png"));
    }

    #[test]
    fn from_config_default_scene() {
        let config = GameConfig::default();
        let w = World::from_config(&config);
        let side = (2 * config.grid.half_extent + 1) as usize;
        assert_eq!(w.tiles().len(), side * side + 6);
        assert_eq!(w.blocks().len(), config.blocks.positions.len());
        assert_eq!(w.face_sets().len(), 1);
    }

    #[test]
    fn from_config_without_grid_or_blocks() {
        let mut config = GameConfig::default();
        config.grid.enabled = false;
        config.sample_cluster = None;
        config.blocks.positions.clear();
        let w = World::from_config(&config);
        assert_eq!(w.instance_count(), 0);
        assert!(w.face_sets().is_empty());
    }
}
