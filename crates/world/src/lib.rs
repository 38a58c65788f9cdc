//! Block world: the static set of coloured tiles and textured blocks drawn
//! each frame.
//!
//! # Invariants
//! - Instances share meshes; a tile or block is only a transform plus a
//!   colour or a face-set reference.
//! - Every block references a registered face set.
//! - Renderers read the world, they never mutate it.

pub mod grid;
pub mod world;

pub use grid::{CheckerPalette, checker_color, is_light_cell};
pub use world::{Block, FaceSet, FaceSetId, Tile, World, WorldError};

pub fn crate_info() -> &'static str {
    "blockworld-world v0.1.0"
}
