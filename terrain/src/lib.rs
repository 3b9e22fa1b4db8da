//! # Terrain Meshes
//!
//! `terrain` turns a single-channel height grid into a smooth-shaded
//! triangle mesh, carving a recorded trail into the surface so the
//! trail never floats above or clips below it.

mod error;
mod fusion;
mod grid;
mod mesh;
mod texture;

pub use crate::{
    error::TerrainError,
    fusion::Fusion,
    grid::HeightGrid,
    mesh::{
        Mesh, MeshBuilder, Vertex, DEFAULT_HEIGHT_SCALE, DEFAULT_HORIZONTAL_SCALE,
        DEFAULT_INFLUENCE_RADIUS,
    },
    texture::{Texture, TextureFormat},
};
pub use glam;
